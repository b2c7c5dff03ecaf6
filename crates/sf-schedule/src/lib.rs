//! `sf-schedule` — the event queue and scheduler behind the simulation.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`event_queue`] | `EventQueue<P>` (`BTreeMap<(SimTime, seq), P>`)         |
//! | [`scheduler`]   | `Scheduler<P>` — clock + queue, "timeout" semantics     |
//! | [`error`]       | `ScheduleError`, `ScheduleResult<T>`                    |
//!
//! # Process model (summary)
//!
//! Every logical process is a plain value `P` describing what it will do when
//! it resumes.  A process suspends by handing itself back to the scheduler
//! with a delay:
//!
//! ```text
//! scheduler.timeout(delay, process)   // resume at now + delay
//! while let Some(p) = scheduler.next_before(horizon) {
//!     // clock is now at p's resume time; run p until it suspends again
//! }
//! ```
//!
//! Processes resuming at the same instant run in the order they were
//! scheduled (FIFO), so a run is deterministic for a fixed seed.

pub mod error;
pub mod event_queue;
pub mod scheduler;


pub use error::{ScheduleError, ScheduleResult};
pub use event_queue::EventQueue;
pub use scheduler::Scheduler;
