#![deny(unsafe_code)]
//! CLI binary for the timebars timing-chart tool.
//!
//! Subcommands:
//! - `render <log.csv>` - load a CSV timing log, write a two-panel SVG
//! - `palette <count>` - print perceptually distinct colors as hex

mod error;

use chrono::Local;
use clap::{Parser, Subcommand};
use error::CliError;
use std::path::{Path, PathBuf};
use std::process;
use timebars_chart::{render_to_file, ChartOptions, LogOptions, TimingLog};
use timebars_core::{distinct_palette, PaletteConfig};

#[derive(Parser)]
#[command(name = "timebars", about = "Stacked timing charts from CSV logs")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a CSV timing log as a two-panel SVG figure.
    Render {
        /// Path to the CSV timing log.
        input: PathBuf,

        /// Output SVG path. Defaults to `<input stem>_<MM-DD_HH-MM>.svg`
        /// next to the input.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Substring that marks a column as a duration series.
        #[arg(long, default_value = "time")]
        series_marker: String,

        /// Exact header of the round column.
        #[arg(long, default_value = "round")]
        round_column: String,

        /// Exact header of the depth column.
        #[arg(long, default_value = "depth")]
        depth_column: String,

        /// Multiplier from logged units to chart units (default:
        /// microseconds to seconds).
        #[arg(long, default_value_t = 1e-6)]
        unit_scale: f64,

        /// Figure width in pixels.
        #[arg(short = 'W', long, default_value_t = 1600)]
        width: u32,

        /// Figure height in pixels.
        #[arg(short = 'H', long, default_value_t = 1600)]
        height: u32,

        /// Y-axis label of the absolute panel.
        #[arg(long, default_value = "time (s)")]
        y_label: String,
    },
    /// Print perceptually distinct colors as hex strings.
    Palette {
        /// Number of colors.
        count: usize,
    },
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Render {
            input,
            output,
            series_marker,
            round_column,
            depth_column,
            unit_scale,
            width,
            height,
            y_label,
        } => {
            if !unit_scale.is_finite() || unit_scale <= 0.0 {
                return Err(CliError::Input(format!(
                    "--unit-scale must be positive and finite, got {unit_scale}"
                )));
            }

            let log_options = LogOptions {
                series_marker,
                round_column,
                depth_column,
                unit_scale,
            };
            let log = TimingLog::from_path(&input, &log_options)?;
            let colors = distinct_palette(log.series_count(), &PaletteConfig::default())?;

            let chart_options = ChartOptions {
                width,
                height,
                y_label,
            };
            let output = output.unwrap_or_else(|| default_output_path(&input));
            render_to_file(&log, &colors, &chart_options, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "input": input.display().to_string(),
                    "output": output.display().to_string(),
                    "samples": log.len(),
                    "series": log.series_names(),
                    "colors": colors,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} series x {} samples -> {}",
                    log.series_count(),
                    log.len(),
                    output.display()
                );
            }
        }
        Command::Palette { count } => {
            let colors = distinct_palette(count, &PaletteConfig::default())?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&colors)?);
            } else {
                for color in &colors {
                    println!("{}", color.to_hex());
                }
            }
        }
    }

    Ok(())
}

/// `logs/search.csv` becomes `logs/search_<MM-DD_HH-MM>.svg`.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "timings".to_string());
    let name = format!("{stem}_{}.svg", Local::now().format("%m-%d_%H-%M"));
    input.with_file_name(name)
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
