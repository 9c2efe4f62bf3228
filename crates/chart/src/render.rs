//! Two-panel SVG figure rendering.
//!
//! The top panel stacks absolute durations centered on zero; the bottom
//! panel stacks each series' percentage share from 0 to 100. Both panels
//! share the x axis labeling of the log.

use std::fs;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use timebars_core::Srgb;

use crate::error::ChartError;
use crate::log::TimingLog;
use crate::stack::{absolute_spans, percent_spans};

const BG_COLOR: RGBColor = RGBColor(0, 0, 0);
const TEXT_COLOR: RGBColor = RGBColor(255, 255, 255);
const GRID_COLOR: RGBColor = RGBColor(128, 128, 128);

/// Fraction of each x slot a bar fills.
const BAR_WIDTH: f64 = 0.95;
/// Cap on x tick labels before they start overlapping.
const MAX_X_LABELS: usize = 24;

/// Figure geometry and labeling knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    /// Figure width in pixels.
    pub width: u32,
    /// Figure height in pixels, shared evenly by the two panels.
    pub height: u32,
    /// Y-axis label of the absolute panel.
    pub y_label: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 1600,
            y_label: "time (s)".to_string(),
        }
    }
}

/// Renders the two-panel figure for `log` into an SVG document.
///
/// `colors` must hold exactly one color per series, in series order.
pub fn render_svg(
    log: &TimingLog,
    colors: &[Srgb],
    options: &ChartOptions,
) -> Result<String, ChartError> {
    if options.width == 0 || options.height == 0 {
        return Err(ChartError::InvalidDimensions);
    }
    if colors.len() != log.series_count() {
        return Err(ChartError::ColorCountMismatch {
            series: log.series_count(),
            colors: colors.len(),
        });
    }

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (options.width, options.height))
            .into_drawing_area();
        draw_figure(&root, log, colors, options)
            .map_err(|e| ChartError::Render(e.to_string()))?;
        root.present().map_err(|e| ChartError::Render(e.to_string()))?;
    }
    Ok(svg)
}

/// Renders the figure and writes it to `path`.
pub fn render_to_file(
    log: &TimingLog,
    colors: &[Srgb],
    options: &ChartOptions,
    path: &Path,
) -> Result<(), ChartError> {
    let svg = render_svg(log, colors, options)?;
    fs::write(path, svg).map_err(|e| ChartError::Io(format!("{}: {e}", path.display())))
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    log: &TimingLog,
    colors: &[Srgb],
    options: &ChartOptions,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB::ErrorType: 'static,
{
    root.fill(&BG_COLOR)?;
    let panels = root.split_evenly((2, 1));
    draw_absolute_panel(&panels[0], log, colors, options)?;
    draw_percent_panel(&panels[1], log, colors)?;
    Ok(())
}

fn draw_absolute_panel<DB: DrawingBackend>(
    panel: &DrawingArea<DB, Shift>,
    log: &TimingLog,
    colors: &[Srgb],
    options: &ChartOptions,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB::ErrorType: 'static,
{
    let stack = absolute_spans(log.rows());
    let y_limit = symmetric_y_limit(&stack.spans);
    let x_max = log.len() as f64 + 0.5;

    let mut chart = ChartBuilder::on(panel)
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .build_cartesian_2d(0.5..x_max, -y_limit..y_limit)?;

    let labels = log.x_labels();
    let x_formatter = |x: &f64| slot_label(*x, labels);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(GRID_COLOR.mix(0.35))
        .light_line_style(TRANSPARENT)
        .axis_style(GRID_COLOR)
        .label_style(("sans-serif", 15).into_font().color(&TEXT_COLOR))
        .x_desc(log.x_desc())
        .y_desc(options.y_label.as_str())
        .x_labels(log.len().min(MAX_X_LABELS))
        .x_label_formatter(&x_formatter)
        .draw()?;

    for (s, name) in log.series_names().iter().enumerate() {
        let color = fill_color(colors[s]);
        chart
            .draw_series(stack.spans.iter().enumerate().map(|(sample, row)| {
                let (y0, y1) = row[s];
                bar(sample, y0, y1, color)
            }))?
            .label(name)
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.filled())
            });
    }

    // Zero baseline on top of the bars.
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(0.5, 0.0), (x_max, 0.0)],
        TEXT_COLOR.mix(0.8),
    )))?;

    chart
        .configure_series_labels()
        .background_style(BG_COLOR.mix(0.8))
        .border_style(GRID_COLOR)
        .label_font(("sans-serif", 16).into_font().color(&TEXT_COLOR))
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;
    Ok(())
}

fn draw_percent_panel<DB: DrawingBackend>(
    panel: &DrawingArea<DB, Shift>,
    log: &TimingLog,
    colors: &[Srgb],
) -> Result<(), Box<dyn std::error::Error>>
where
    DB::ErrorType: 'static,
{
    let spans = percent_spans(log.rows(), log.series_count());
    let x_max = log.len() as f64 + 0.5;

    let mut chart = ChartBuilder::on(panel)
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .build_cartesian_2d(0.5..x_max, 0.0..100.0)?;

    let labels = log.x_labels();
    let x_formatter = |x: &f64| slot_label(*x, labels);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(GRID_COLOR.mix(0.35))
        .light_line_style(TRANSPARENT)
        .axis_style(GRID_COLOR)
        .label_style(("sans-serif", 15).into_font().color(&TEXT_COLOR))
        .x_desc(log.x_desc())
        .y_desc("share (%)")
        .x_labels(log.len().min(MAX_X_LABELS))
        .x_label_formatter(&x_formatter)
        .draw()?;

    for s in 0..log.series_count() {
        let color = fill_color(colors[s]);
        chart.draw_series(spans.iter().enumerate().map(|(sample, row)| {
            let (y0, y1) = row[s];
            bar(sample, y0, y1, color)
        }))?;
    }
    Ok(())
}

/// Largest absolute span edge, padded 5%, with a fallback for all-zero logs.
fn symmetric_y_limit(spans: &[Vec<(f64, f64)>]) -> f64 {
    let mut extent = 0.0_f64;
    for row in spans {
        for &(y0, y1) in row {
            extent = extent.max(y0.abs()).max(y1.abs());
        }
    }
    if extent > 0.0 {
        extent * 1.05
    } else {
        1.0
    }
}

/// Label for an x tick, or empty when the tick falls between sample slots.
fn slot_label(x: f64, labels: &[String]) -> String {
    let nearest = x.round();
    if (x - nearest).abs() > 1e-6 {
        return String::new();
    }
    let slot = nearest as i64;
    if slot < 1 || slot > labels.len() as i64 {
        return String::new();
    }
    labels[slot as usize - 1].clone()
}

fn bar(sample: usize, y0: f64, y1: f64, color: RGBColor) -> Rectangle<(f64, f64)> {
    let x = sample as f64 + 1.0;
    Rectangle::new(
        [(x - BAR_WIDTH / 2.0, y0), (x + BAR_WIDTH / 2.0, y1)],
        color.filled(),
    )
}

fn fill_color(c: Srgb) -> RGBColor {
    RGBColor(channel_byte(c.r), channel_byte(c.g), channel_byte(c.b))
}

fn channel_byte(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
