//! `sf-output` — report writers and the occupancy chart.
//!
//! Two report backends are provided:
//!
//! | Feature   | Backend     | Files created                                |
//! |-----------|-------------|----------------------------------------------|
//! | *(none)*  | CSV         | `audit_report.csv`, `audit_summary.csv`      |
//! | `sqlite`  | SQLite      | `output.db`                                  |
//!
//! Both implement [`OutputWriter`] and are driven by [`ReportObserver`],
//! which implements `sf_sim::SimObserver`.  The chart is drawn by
//! [`SvgChartRenderer`], a `sf_pathway::ChartRenderer` that writes
//! `bed_occupancy.svg`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sf_output::{CsvWriter, ReportObserver, SvgChartRenderer};
//!
//! let mut model = ModelBuilder::new(params)
//!     .renderer(SvgChartRenderer::new(Path::new("./output")))
//!     .build()?;
//! let mut obs = ReportObserver::new(CsvWriter::new(Path::new("./output"))?);
//! model.run_with(100.0, 365.0, &mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod svg;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::ReportObserver;
pub use svg::SvgChartRenderer;
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use crate::sqlite::SqliteWriter;
