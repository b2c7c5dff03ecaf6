//! `Scheduler` — the shared clock plus the queue of suspended processes.

use sf_core::{SimClock, SimTime};

use crate::{EventQueue, ScheduleError, ScheduleResult};

/// Single-threaded cooperative scheduler.
///
/// At any instant exactly one process runs: the caller pops it with
/// [`next_before`][Self::next_before], lets it act, and re-queues it (or a
/// successor) with [`timeout`][Self::timeout] or [`immediately`][Self::immediately].
pub struct Scheduler<P> {
    clock: SimClock,
    queue: EventQueue<P>,
}

impl<P> Default for Scheduler<P> {
    fn default() -> Self {
        Self { clock: SimClock::new(), queue: EventQueue::new() }
    }
}

impl<P> Scheduler<P> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    /// Resume `process` after `delay` days.
    ///
    /// `delay` must be finite and ≥ 0.  A zero delay resumes the process at
    /// the current instant, after everything already queued for it.
    pub fn timeout(&mut self, delay: f64, process: P) -> ScheduleResult<()> {
        if !(delay.is_finite() && delay >= 0.0) {
            return Err(ScheduleError::InvalidDelay { delay, now: self.now() });
        }
        let at = self.now().after(delay);
        self.queue.push(at, process);
        Ok(())
    }

    /// Resume `process` at the current instant.
    pub fn immediately(&mut self, process: P) {
        let now = self.now();
        self.queue.push(now, process);
    }

    /// Pop the next process due strictly before `horizon`, advancing the
    /// clock to its resume time.
    ///
    /// Returns `None` once the queue is empty or the next process is due at
    /// or after `horizon`; in that case the clock is moved to `horizon` and
    /// the remaining processes stay queued.
    pub fn next_before(&mut self, horizon: SimTime) -> Option<P> {
        match self.queue.next_time() {
            Some(at) if at < horizon => {
                let (at, process) = self.queue.pop()?;
                self.clock.advance_to(at);
                Some(process)
            }
            _ => {
                self.clock.advance_to(horizon);
                None
            }
        }
    }

    /// Number of suspended processes.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
