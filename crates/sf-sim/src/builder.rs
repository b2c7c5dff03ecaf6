//! Fluent builder for constructing a [`Model`].

use sf_core::SimTime;
use sf_pathway::{CarePathway, ChartOptions, ChartRenderer, NoopRenderer};

use crate::{Model, ModelParams, SimResult};

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// Fluent builder for [`Model`].
///
/// # Required inputs
///
/// - [`ModelParams`] — arrival rate, routing proportions, lengths of stay
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                        |
/// |----------------------|--------------------------------|
/// | `.seed(s)`           | [`DEFAULT_SEED`]               |
/// | `.chart_options(o)`  | HASU + ASU lines and bands     |
/// | `.renderer(r)`       | [`NoopRenderer`]               |
///
/// # Example
///
/// ```rust,ignore
/// let mut model = ModelBuilder::new(params)
///     .seed(7)
///     .renderer(SvgChartRenderer::new(Path::new("./output")))
///     .build()?;
/// model.run(100.0, 365.0)?;
/// ```
pub struct ModelBuilder {
    params:   ModelParams,
    seed:     u64,
    chart:    ChartOptions,
    renderer: Box<dyn ChartRenderer>,
}

impl ModelBuilder {
    pub fn new(params: ModelParams) -> Self {
        Self {
            params,
            seed:     DEFAULT_SEED,
            chart:    ChartOptions::default(),
            renderer: Box::new(NoopRenderer),
        }
    }

    /// Seed of the run's random stream.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Which stages the chart draws.
    pub fn chart_options(mut self, options: ChartOptions) -> Self {
        self.chart = options;
        self
    }

    /// Renderer invoked at the end of every run.
    pub fn renderer<R: ChartRenderer + 'static>(mut self, renderer: R) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Validate the parameters and return a ready-to-run [`Model`].
    ///
    /// Fails with `InvalidParameter` naming the first violated field; no
    /// process is started for an invalid configuration.
    pub fn build(self) -> SimResult<Model> {
        let resolved = self.params.resolve()?;
        Ok(Model {
            params:   self.params,
            resolved,
            seed:     self.seed,
            chart:    self.chart,
            renderer: self.renderer,
            pathway:  CarePathway::new(),
            now:      SimTime::ZERO,
        })
    }
}
