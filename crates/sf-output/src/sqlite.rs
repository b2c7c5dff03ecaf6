//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `audit_report` and `audit_summary`.

use std::path::Path;

use rusqlite::Connection;
use sf_pathway::{AuditRow, AuditSummary};

use crate::OutputResult;
use crate::writer::OutputWriter;

/// Writes the audit report and summary to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS audit_report (
                 time               REAL    NOT NULL,
                 occupied_hasu_beds INTEGER NOT NULL,
                 occupied_asu_beds  INTEGER NOT NULL,
                 occupied_esd_beds  INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS audit_summary (
                 metric TEXT PRIMARY KEY,
                 result REAL NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_audit_rows(&mut self, rows: &[AuditRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO audit_report \
                 (time, occupied_hasu_beds, occupied_asu_beds, occupied_esd_beds) \
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.time, row.hasu, row.asu, row.esd])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_summary(&mut self, summary: &AuditSummary) -> OutputResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR REPLACE INTO audit_summary (metric, result) VALUES (?1, ?2)",
            )?;
            for (name, value) in summary.entries() {
                stmt.execute(rusqlite::params![name, value])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
