//! Stacking layouts for the two chart panels.
//!
//! The absolute panel stacks each sample's durations symmetrically around
//! zero, so the silhouette height reads as the sample's total. The percent
//! panel stacks each series' share of the total from 0 to 100, largest
//! average share at the bottom.

use std::cmp::Ordering;

/// Segment layout for the centered absolute panel.
#[derive(Debug, Clone, PartialEq)]
pub struct AbsoluteStack {
    /// `spans[sample][series]` is the `(bottom, top)` of that segment.
    pub spans: Vec<Vec<(f64, f64)>>,
    /// Total duration of each sample.
    pub totals: Vec<f64>,
}

/// Stacks each row's durations in series order, centered on zero.
///
/// The first series starts at `-total / 2`, and the last one ends at
/// `total / 2`.
pub fn absolute_spans(rows: &[Vec<f64>]) -> AbsoluteStack {
    let mut spans = Vec::with_capacity(rows.len());
    let mut totals = Vec::with_capacity(rows.len());
    for row in rows {
        let total: f64 = row.iter().sum();
        let mut bottom = -total / 2.0;
        let row_spans = row
            .iter()
            .map(|&v| {
                let span = (bottom, bottom + v);
                bottom += v;
                span
            })
            .collect();
        spans.push(row_spans);
        totals.push(total);
    }
    AbsoluteStack { spans, totals }
}

/// Series indices sorted by mean share of the row total, descending.
///
/// Rows whose total is zero contribute nothing to the mean. Ties keep the
/// original series order, and if every row total is zero the original order
/// is returned unchanged.
pub fn stacking_order(rows: &[Vec<f64>], series_count: usize) -> Vec<usize> {
    let mut share_sums = vec![0.0; series_count];
    let mut counted_rows = 0usize;
    for row in rows {
        let total: f64 = row.iter().sum();
        if total == 0.0 {
            continue;
        }
        counted_rows += 1;
        for (s, &v) in row.iter().enumerate().take(series_count) {
            share_sums[s] += v / total * 100.0;
        }
    }

    let mut order: Vec<usize> = (0..series_count).collect();
    if counted_rows > 0 {
        let means: Vec<f64> = share_sums
            .iter()
            .map(|s| s / counted_rows as f64)
            .collect();
        order.sort_by(|&a, &b| means[b].partial_cmp(&means[a]).unwrap_or(Ordering::Equal));
    }
    order
}

/// Stacks each row's percentage shares from 0 to 100 in [`stacking_order`].
///
/// Returns `spans[sample][series]` in the original series indexing, so the
/// caller can pair spans with series names and colors directly. Rows whose
/// total is zero get all-zero spans.
pub fn percent_spans(rows: &[Vec<f64>], series_count: usize) -> Vec<Vec<(f64, f64)>> {
    let order = stacking_order(rows, series_count);
    rows.iter()
        .map(|row| {
            let total: f64 = row.iter().sum();
            let mut spans = vec![(0.0, 0.0); series_count];
            if total != 0.0 {
                let mut bottom = 0.0;
                for &s in &order {
                    let share = row.get(s).copied().unwrap_or(0.0) / total * 100.0;
                    spans[s] = (bottom, bottom + share);
                    bottom += share;
                }
            }
            spans
        })
        .collect()
}
