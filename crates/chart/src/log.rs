//! Timing-log loading.
//!
//! A timing log is a CSV table with one row per sample. Every column whose
//! header contains the configured marker is a duration series; optional
//! round/depth columns label the x axis.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::ChartError;

/// Knobs for interpreting a timing-log CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct LogOptions {
    /// Substring that marks a column as a duration series.
    pub series_marker: String,
    /// Exact header of the round column, if the log has one.
    pub round_column: String,
    /// Exact header of the depth column, if the log has one.
    pub depth_column: String,
    /// Multiplier applied to every parsed duration. Defaults to `1e-6`,
    /// turning microsecond counts into seconds.
    pub unit_scale: f64,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            series_marker: "time".to_string(),
            round_column: "round".to_string(),
            depth_column: "depth".to_string(),
            unit_scale: 1e-6,
        }
    }
}

/// A parsed timing log: named duration series sampled over consecutive rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingLog {
    series_names: Vec<String>,
    rows: Vec<Vec<f64>>,
    x_labels: Vec<String>,
    x_desc: String,
}

impl TimingLog {
    /// Loads a timing log from a CSV file on disk.
    pub fn from_path(path: &Path, options: &LogOptions) -> Result<Self, ChartError> {
        let file = File::open(path)
            .map_err(|e| ChartError::Io(format!("{}: {e}", path.display())))?;
        Self::from_reader(file, options)
    }

    /// Loads a timing log from any CSV reader.
    ///
    /// Duration cells that are missing or fail to parse as finite numbers
    /// are coerced to zero, and short rows are padded with zeros, so a
    /// partially written log still renders.
    pub fn from_reader<R: Read>(reader: R, options: &LogOptions) -> Result<Self, ChartError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| ChartError::Csv(e.to_string()))?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                // Spreadsheet exports often prefix the first header with a BOM.
                if i == 0 {
                    h.trim_start_matches('\u{feff}').to_string()
                } else {
                    h.to_string()
                }
            })
            .collect();

        let series_cols: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| h.contains(options.series_marker.as_str()))
            .map(|(i, _)| i)
            .collect();
        if series_cols.is_empty() {
            return Err(ChartError::NoSeriesColumns {
                marker: options.series_marker.clone(),
            });
        }
        let series_names: Vec<String> =
            series_cols.iter().map(|&i| headers[i].clone()).collect();

        let round_col = headers.iter().position(|h| *h == options.round_column);
        let depth_col = headers.iter().position(|h| *h == options.depth_column);

        let mut rows = Vec::new();
        let mut x_labels = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| ChartError::Csv(e.to_string()))?;
            let row: Vec<f64> = series_cols
                .iter()
                .map(|&c| parse_duration(record.get(c)) * options.unit_scale)
                .collect();
            rows.push(row);
            x_labels.push(match (round_col, depth_col) {
                (Some(r), Some(d)) => format!("{}.{}", cell(&record, r), cell(&record, d)),
                (None, Some(d)) => cell(&record, d).to_string(),
                _ => (idx + 1).to_string(),
            });
        }
        if rows.is_empty() {
            return Err(ChartError::EmptyLog);
        }

        let x_desc = match (round_col, depth_col) {
            (Some(_), Some(_)) => {
                format!("{}.{}", options.round_column, options.depth_column)
            }
            (None, Some(_)) => options.depth_column.clone(),
            _ => "sample".to_string(),
        };

        Ok(Self {
            series_names,
            rows,
            x_labels,
            x_desc,
        })
    }

    /// Names of the duration series, in header order.
    pub fn series_names(&self) -> &[String] {
        &self.series_names
    }

    /// Number of duration series.
    pub fn series_count(&self) -> usize {
        self.series_names.len()
    }

    /// Scaled duration rows; `rows()[sample][series]`.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the log holds no samples. Loading rejects empty logs, so
    /// this is always false for a loaded log.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One x-axis label per sample.
    pub fn x_labels(&self) -> &[String] {
        &self.x_labels
    }

    /// Description of what the x-axis labels mean.
    pub fn x_desc(&self) -> &str {
        &self.x_desc
    }
}

fn cell<'r>(record: &'r csv::StringRecord, index: usize) -> &'r str {
    record.get(index).unwrap_or("").trim()
}

fn parse_duration(cell: Option<&str>) -> f64 {
    cell.and_then(|text| text.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
