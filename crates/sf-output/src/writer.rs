//! The `OutputWriter` trait implemented by all backend writers.

use sf_pathway::{AuditRow, AuditSummary};

use crate::OutputResult;

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors are stored by [`ReportObserver`][crate::ReportObserver] and
/// retrieved with its `take_error`.
pub trait OutputWriter {
    /// Append a batch of audit rows.
    fn write_audit_rows(&mut self, rows: &[AuditRow]) -> OutputResult<()>;

    /// Write the nine-entry percentile summary.
    fn write_summary(&mut self, summary: &AuditSummary) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
