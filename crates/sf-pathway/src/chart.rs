//! Chart view over a finished audit, and the renderer seam.
//!
//! The pathway never draws anything itself.  It hands an [`OccupancyChart`]
//! (series, percentile bands, axis offset, options) to a [`ChartRenderer`];
//! writing an image artifact is the renderer's business.

use crate::{AuditRow, AuditSummary, Stage};

/// Caption drawn on the occupancy chart.
pub const CHART_CAPTION: &str = "Shaded areas show 5th to 95th percentile occupancy";

/// What to draw for one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageStyle {
    /// Draw the occupancy time series.
    pub line: bool,
    /// Shade the 5th–95th percentile band.
    pub band: bool,
}

impl StageStyle {
    pub const SHOWN: StageStyle = StageStyle { line: true, band: true };
    pub const HIDDEN: StageStyle = StageStyle { line: false, band: false };
}

/// Per-stage drawing choices.
///
/// The default draws HASU and ASU (lines and bands) and leaves ESD out,
/// matching the standard bed-occupancy chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    pub hasu: StageStyle,
    pub asu:  StageStyle,
    pub esd:  StageStyle,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            hasu: StageStyle::SHOWN,
            asu:  StageStyle::SHOWN,
            esd:  StageStyle::HIDDEN,
        }
    }
}

impl ChartOptions {
    /// Every stage drawn, ESD included.
    pub fn all_stages() -> Self {
        Self { hasu: StageStyle::SHOWN, asu: StageStyle::SHOWN, esd: StageStyle::SHOWN }
    }

    pub fn style(&self, stage: Stage) -> StageStyle {
        match stage {
            Stage::Hasu => self.hasu,
            Stage::Asu => self.asu,
            Stage::Esd => self.esd,
        }
    }
}

/// Read-only view of everything a renderer needs.
#[derive(Debug, Clone, Copy)]
pub struct OccupancyChart<'a> {
    pub rows:       &'a [AuditRow],
    pub summary:    Option<&'a AuditSummary>,
    /// Subtracted from audit times so the x axis counts days since warm-up.
    pub day_offset: f64,
    pub options:    ChartOptions,
}

impl<'a> OccupancyChart<'a> {
    /// `(day, occupied beds)` points for `stage`, or an empty iterator when
    /// the stage's line is switched off.
    pub fn series(&self, stage: Stage) -> impl Iterator<Item = (f64, u32)> + 'a {
        let rows: &'a [AuditRow] = if self.options.style(stage).line { self.rows } else { &[] };
        let offset = self.day_offset;
        rows.iter().map(move |r| (r.time - offset, r.count(stage)))
    }

    /// `(p5, p95)` band for `stage`, if enabled and a summary exists.
    pub fn band(&self, stage: Stage) -> Option<(f64, f64)> {
        if !self.options.style(stage).band {
            return None;
        }
        let p = self.summary?.stage(stage);
        Some((p.p5, p.p95))
    }

    /// Stages with a line or a band to draw, in pathway order.
    pub fn visible_stages(&self) -> impl Iterator<Item = Stage> + use<> {
        let options = self.options;
        Stage::ALL.into_iter().filter(move |&s| {
            let style = options.style(s);
            style.line || style.band
        })
    }

    /// `(first day, last day)` on the x axis, or `None` with no rows.
    pub fn day_range(&self) -> Option<(f64, f64)> {
        let first = self.rows.first()?.time - self.day_offset;
        let last = self.rows.last()?.time - self.day_offset;
        Some((first, last))
    }

    /// Largest value any visible line or band reaches.
    pub fn max_occupancy(&self) -> f64 {
        self.visible_stages()
            .flat_map(|s| {
                let line = self.series(s).map(|(_, n)| n as f64).fold(0.0, f64::max);
                let band = self.band(s).map_or(0.0, |(_, hi)| hi);
                [line, band]
            })
            .fold(0.0, f64::max)
    }
}

/// Turns an [`OccupancyChart`] into an artifact (an image file, a plot
/// widget, …).
pub trait ChartRenderer {
    fn render(&mut self, chart: &OccupancyChart<'_>) -> std::io::Result<()>;
}

/// A [`ChartRenderer`] that draws nothing.
pub struct NoopRenderer;

impl ChartRenderer for NoopRenderer {
    fn render(&mut self, _chart: &OccupancyChart<'_>) -> std::io::Result<()> {
        Ok(())
    }
}

impl<R: ChartRenderer + ?Sized> ChartRenderer for Box<R> {
    fn render(&mut self, chart: &OccupancyChart<'_>) -> std::io::Result<()> {
        (**self).render(chart)
    }
}
