#![deny(unsafe_code)]

//! Timing-log model and chart rendering for the timebars tool.
//!
//! [`TimingLog`] loads a CSV timing log, [`stack`] computes the centered
//! absolute and percentage stacking layouts, and [`render_svg`] draws both
//! as a two-panel SVG figure on a dark theme.

pub mod error;
pub mod log;
pub mod render;
pub mod stack;

pub use error::ChartError;
pub use log::{LogOptions, TimingLog};
pub use render::{render_svg, render_to_file, ChartOptions};
pub use stack::{absolute_spans, percent_spans, stacking_order, AbsoluteStack};
