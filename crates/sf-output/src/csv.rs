//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `audit_report.csv` — `Time,Occupied_hasu_beds,Occupied_asu_beds,Occupied_esd_beds`
//! - `audit_summary.csv` — `metric,Result`, one row per summary entry

use std::fs::File;
use std::path::Path;

use csv::Writer;
use sf_pathway::report::AUDIT_COLUMNS;
use sf_pathway::{AuditRow, AuditSummary};

use crate::OutputResult;
use crate::writer::OutputWriter;

pub const AUDIT_FILE: &str = "audit_report.csv";
pub const SUMMARY_FILE: &str = "audit_summary.csv";

/// Writes the audit report and summary to two CSV files.
pub struct CsvWriter {
    audit:    Writer<File>,
    summary:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut audit = Writer::from_path(dir.join(AUDIT_FILE))?;
        audit.write_record(AUDIT_COLUMNS)?;

        let mut summary = Writer::from_path(dir.join(SUMMARY_FILE))?;
        summary.write_record(["metric", "Result"])?;

        Ok(Self { audit, summary, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_audit_rows(&mut self, rows: &[AuditRow]) -> OutputResult<()> {
        for row in rows {
            self.audit.write_record(&[
                row.time.to_string(),
                row.hasu.to_string(),
                row.asu.to_string(),
                row.esd.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, summary: &AuditSummary) -> OutputResult<()> {
        for (name, value) in summary.entries() {
            self.summary.write_record(&[name.to_string(), format!("{value:.1}")])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.audit.flush()?;
        self.summary.flush()?;
        Ok(())
    }
}
