//! sf-run — command-line runner for the stroke pathway model.
//!
//! Runs one warm-up + audit period and writes `audit_report.csv`,
//! `audit_summary.csv` and `bed_occupancy.svg` to the output directory.
//! With `--replications N` (N > 1) the model is re-run with derived seeds
//! and the summary is taken over every replication's audit rows.
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sf_core::RunWindow;
use sf_output::{CsvWriter, OutputWriter, ReportObserver, SvgChartRenderer};
use sf_pathway::{AuditSummary, ChartOptions};
use sf_sim::{DEFAULT_SEED, ModelBuilder, ModelParams, load_params_json, pooled_summary, run_replications};

#[derive(Parser)]
#[command(name = "sf-run")]
#[command(about = "Stroke pathway bed-occupancy simulation")]
struct Cli {
    /// JSON file of model parameters (missing keys take defaults)
    #[arg(long)]
    params: Option<PathBuf>,

    /// Unaudited warm-up period in days
    #[arg(long, default_value_t = 100.0)]
    warm_up: f64,

    /// Audited period in days
    #[arg(long, default_value_t = 365.0)]
    duration: f64,

    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Independent replications to pool into one summary
    #[arg(long, default_value_t = 1)]
    replications: usize,

    /// Directory for the CSV reports and the chart
    #[arg(long, default_value = "output")]
    output: PathBuf,

    /// Also draw the ESD line and band on the chart
    #[arg(long)]
    all_stages: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let params = match &cli.params {
        Some(path) => load_params_json(path)
            .with_context(|| format!("loading parameters from {}", path.display()))?,
        None => ModelParams::default(),
    };
    params.validate()?;
    debug!(params = %serde_json::to_string(&params)?, "parameters");

    std::fs::create_dir_all(&cli.output)
        .with_context(|| format!("creating output directory {}", cli.output.display()))?;

    let started = Instant::now();
    let summary = if cli.replications > 1 {
        run_pooled(&cli, &params)?
    } else {
        run_single(&cli, params)?
    };

    match summary {
        Some(summary) => {
            for (metric, value) in summary.entries() {
                info!(metric, value, "summary");
            }
        }
        None => info!("audit period recorded no rows; no summary"),
    }
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        output = %cli.output.display(),
        "done"
    );
    Ok(())
}

/// One run: CSV reports streamed by the observer, chart drawn at run end.
fn run_single(cli: &Cli, params: ModelParams) -> Result<Option<AuditSummary>> {
    let chart = if cli.all_stages { ChartOptions::all_stages() } else { ChartOptions::default() };
    let mut model = ModelBuilder::new(params)
        .seed(cli.seed)
        .chart_options(chart)
        .renderer(SvgChartRenderer::new(&cli.output))
        .build()?;

    let mut obs = ReportObserver::new(CsvWriter::new(&cli.output)?);
    model.run_with(cli.warm_up, cli.duration, &mut obs)?;
    if let Some(e) = obs.take_error() {
        return Err(e).context("writing audit report");
    }
    info!(rows = obs.rows_written(), "audit report written");

    Ok(model.summary().cloned())
}

/// Several replications: every replication's rows go to one audit CSV and
/// the summary is taken over all of them.  No chart is drawn.
fn run_pooled(cli: &Cli, params: &ModelParams) -> Result<Option<AuditSummary>> {
    let window = RunWindow::new(cli.warm_up, cli.duration)?;
    let reports = run_replications(params, cli.seed, cli.replications, window)?;
    info!(replications = reports.len(), "replications finished");

    let mut writer = CsvWriter::new(&cli.output)?;
    for report in &reports {
        writer.write_audit_rows(&report.rows)?;
    }
    let summary = pooled_summary(&reports);
    if let Some(summary) = &summary {
        writer.write_summary(summary)?;
    }
    writer.finish()?;
    Ok(summary)
}
