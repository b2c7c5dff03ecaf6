//! Independent replications of one configuration.
//!
//! Each replication is a full run with its own seed, derived from a root
//! [`SimRng`] so that the set of seeds depends only on `base_seed`.  With the
//! `parallel` feature replications run on Rayon's thread pool; results are
//! returned in replication order either way.

use sf_core::{RunWindow, SimRng};
use sf_pathway::{AuditReport, AuditRow, AuditSummary};
use tracing::debug;

use crate::{ModelBuilder, ModelParams, SimResult};

/// Seeds for `count` replications derived from `base_seed`.
pub fn replication_seeds(base_seed: u64, count: usize) -> Vec<u64> {
    let mut root = SimRng::new(base_seed);
    (0..count as u64).map(|i| root.child_seed(i)).collect()
}

/// Run `count` independent replications and collect their audit reports.
pub fn run_replications(
    params:    &ModelParams,
    base_seed: u64,
    count:     usize,
    window:    RunWindow,
) -> SimResult<Vec<AuditReport>> {
    params.validate()?;
    let seeds = replication_seeds(base_seed, count);
    debug!(count, base_seed, "running replications");

    let run_one = |seed: u64| -> SimResult<AuditReport> {
        let mut model = ModelBuilder::new(params.clone()).seed(seed).build()?;
        model.run(window.warm_up, window.sim_duration)?;
        Ok(model.report().cloned().unwrap_or_default())
    };

    #[cfg(not(feature = "parallel"))]
    {
        seeds.into_iter().map(run_one).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        seeds.into_par_iter().map(run_one).collect()
    }
}

/// Percentile summary over the audit rows of every replication pooled
/// together.  `None` if no replication produced rows.
pub fn pooled_summary(reports: &[AuditReport]) -> Option<AuditSummary> {
    let rows: Vec<AuditRow> = reports.iter().flat_map(|r| r.rows.iter().copied()).collect();
    AuditSummary::from_rows(&rows)
}
