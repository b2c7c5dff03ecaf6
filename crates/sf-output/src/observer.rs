//! `ReportObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use sf_core::SimTime;
use sf_pathway::{AuditReport, AuditRow, CarePathway};
use sf_sim::SimObserver;
use tracing::warn;

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that streams audit rows to any [`OutputWriter`]
/// backend and writes the summary when the run ends.
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `model.run_with()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct ReportObserver<W: OutputWriter> {
    writer:     W,
    rows:       u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> ReportObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, rows: 0, last_error: None }
    }

    /// Take the stored write error (if any) after the run returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Audit rows successfully handed to the writer.
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            warn!(error = %e, "output write failed");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for ReportObserver<W> {
    fn on_audit(&mut self, row: &AuditRow, _pathway: &CarePathway) {
        let result = self.writer.write_audit_rows(std::slice::from_ref(row));
        if result.is_ok() {
            self.rows += 1;
        }
        self.store_err(result);
    }

    fn on_run_end(&mut self, _now: SimTime, report: &AuditReport) {
        if let Some(summary) = &report.summary {
            let result = self.writer.write_summary(summary);
            self.store_err(result);
        }
        let result = self.writer.finish();
        self.store_err(result);
    }
}
