//! SVG occupancy chart.
//!
//! Draws one line per visible stage (x = day since warm-up, y = occupied
//! beds), shades each enabled stage's 5th–95th percentile band across the
//! whole x range, and adds axis labels, a legend and the caption.  The
//! output is a standalone `bed_occupancy.svg` with no external assets.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use sf_pathway::chart::CHART_CAPTION;
use sf_pathway::{ChartRenderer, OccupancyChart, Stage};
use tracing::debug;

pub const CHART_FILE: &str = "bed_occupancy.svg";

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 60.0;

fn colour(stage: Stage) -> &'static str {
    match stage {
        Stage::Hasu => "blue",
        Stage::Asu => "green",
        Stage::Esd => "red",
    }
}

/// Writes the occupancy chart as an SVG file.
pub struct SvgChartRenderer {
    path: PathBuf,
}

impl SvgChartRenderer {
    /// Render to `bed_occupancy.svg` inside `dir`.
    pub fn new(dir: &Path) -> Self {
        Self { path: dir.join(CHART_FILE) }
    }

    /// Render to an explicit file path.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&mut self, chart: &OccupancyChart<'_>) -> std::io::Result<()> {
        let svg = to_svg(chart);
        std::fs::write(&self.path, svg)?;
        debug!(path = %self.path.display(), "chart written");
        Ok(())
    }
}

// ── Drawing ───────────────────────────────────────────────────────────────────

/// Linear mapping from data space to pixel space.
struct Frame {
    x0: f64,
    x1: f64,
    y1: f64,
}

impl Frame {
    fn plot_w() -> f64 {
        WIDTH - MARGIN_LEFT - MARGIN_RIGHT
    }

    fn plot_h() -> f64 {
        HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn px(&self, day: f64) -> f64 {
        MARGIN_LEFT + (day - self.x0) / (self.x1 - self.x0) * Self::plot_w()
    }

    fn py(&self, beds: f64) -> f64 {
        MARGIN_TOP + Self::plot_h() - beds / self.y1 * Self::plot_h()
    }
}

/// Render `chart` to an SVG document string.
pub fn to_svg(chart: &OccupancyChart<'_>) -> String {
    let (x0, mut x1) = chart.day_range().unwrap_or((0.0, 1.0));
    if x1 <= x0 {
        x1 = x0 + 1.0;
    }
    let y1 = (chart.max_occupancy() * 1.05).max(1.0);
    let frame = Frame { x0, x1, y1 };

    let mut s = String::new();
    // Writing to a String cannot fail.
    let _ = write_document(&mut s, chart, &frame);
    s
}

fn write_document(s: &mut String, chart: &OccupancyChart<'_>, f: &Frame) -> std::fmt::Result {
    writeln!(
        s,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif" font-size="12">"#
    )?;
    writeln!(s, r#"<rect width="{WIDTH}" height="{HEIGHT}" fill="white"/>"#)?;

    // Bands first so lines draw on top.
    for stage in chart.visible_stages() {
        if let Some((lo, hi)) = chart.band(stage) {
            let top = f.py(hi);
            let height = (f.py(lo) - top).max(0.5);
            writeln!(
                s,
                r#"<rect class="band-{key}" x="{x:.2}" y="{top:.2}" width="{w:.2}" height="{height:.2}" fill="{c}" fill-opacity="0.2"/>"#,
                key = stage.key(),
                x = MARGIN_LEFT,
                w = Frame::plot_w(),
                c = colour(stage),
            )?;
        }
    }

    for stage in chart.visible_stages() {
        let points: Vec<String> = chart
            .series(stage)
            .map(|(day, beds)| format!("{:.2},{:.2}", f.px(day), f.py(beds as f64)))
            .collect();
        if points.is_empty() {
            continue;
        }
        writeln!(
            s,
            r#"<polyline class="line-{key}" points="{pts}" fill="none" stroke="{c}" stroke-width="1.5"/>"#,
            key = stage.key(),
            pts = points.join(" "),
            c = colour(stage),
        )?;
    }

    write_axes(s, f)?;
    write_legend(s, chart)?;

    writeln!(
        s,
        r#"<rect x="{x:.2}" y="{y:.2}" width="360" height="22" fill="white" fill-opacity="0.5" stroke="black" stroke-opacity="0.3"/>"#,
        x = WIDTH / 2.0 - 180.0,
        y = MARGIN_TOP + 6.0,
    )?;
    writeln!(
        s,
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle">{CHART_CAPTION}</text>"#,
        x = WIDTH / 2.0,
        y = MARGIN_TOP + 21.0,
    )?;
    writeln!(s, "</svg>")
}

fn write_axes(s: &mut String, f: &Frame) -> std::fmt::Result {
    let bottom = MARGIN_TOP + Frame::plot_h();
    let right = MARGIN_LEFT + Frame::plot_w();
    writeln!(
        s,
        r#"<path d="M{MARGIN_LEFT},{MARGIN_TOP} V{bottom} H{right}" fill="none" stroke="black"/>"#
    )?;

    for day in ticks(f.x0, f.x1) {
        let x = f.px(day);
        writeln!(
            s,
            r#"<line x1="{x:.2}" y1="{bottom}" x2="{x:.2}" y2="{y2}" stroke="black"/><text x="{x:.2}" y="{ty}" text-anchor="middle">{l}</text>"#,
            l = label(day),
            y2 = bottom + 5.0,
            ty = bottom + 20.0,
        )?;
    }
    for beds in ticks(0.0, f.y1) {
        let y = f.py(beds);
        writeln!(
            s,
            r#"<line x1="{x1}" y1="{y:.2}" x2="{MARGIN_LEFT}" y2="{y:.2}" stroke="black"/><text x="{tx}" y="{ty:.2}" text-anchor="end">{l}</text>"#,
            l = label(beds),
            x1 = MARGIN_LEFT - 5.0,
            tx = MARGIN_LEFT - 8.0,
            ty = y + 4.0,
        )?;
    }

    writeln!(
        s,
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle">Day</text>"#,
        x = MARGIN_LEFT + Frame::plot_w() / 2.0,
        y = HEIGHT - 15.0,
    )?;
    writeln!(
        s,
        r#"<text x="20" y="{y:.2}" text-anchor="middle" transform="rotate(-90 20 {y:.2})">Occupancy (people)</text>"#,
        y = MARGIN_TOP + Frame::plot_h() / 2.0,
    )
}

fn write_legend(s: &mut String, chart: &OccupancyChart<'_>) -> std::fmt::Result {
    let x = MARGIN_LEFT + Frame::plot_w() - 90.0;
    let mut y = MARGIN_TOP + 15.0;
    for stage in chart.visible_stages() {
        if !chart.options.style(stage).line {
            continue;
        }
        writeln!(
            s,
            r#"<line x1="{x:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{c}" stroke-width="2"/><text x="{tx:.2}" y="{ty:.2}">{key}</text>"#,
            x2 = x + 25.0,
            c = colour(stage),
            tx = x + 32.0,
            ty = y + 4.0,
            key = stage.key(),
        )?;
        y += 18.0;
    }
    Ok(())
}

/// Round tick positions covering `[lo, hi]`: steps of 1, 2 or 5 × 10ⁿ,
/// about five to ten of them.
pub(crate) fn ticks(lo: f64, hi: f64) -> Vec<f64> {
    let span = hi - lo;
    if !span.is_finite() || span <= 0.0 {
        return vec![lo];
    }
    let raw = span / 5.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|&st| st >= raw)
        .unwrap_or(10.0 * magnitude);
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Tick label without floating-point noise (`0.30000000000000004` → `0.3`).
fn label(v: f64) -> String {
    let rounded = (v * 1e6).round() / 1e6;
    if rounded == 0.0 { "0".to_string() } else { rounded.to_string() }
}
