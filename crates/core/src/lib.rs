#![deny(unsafe_code)]
//! Core color math for the timebars timing-chart tool.
//!
//! Provides the color types (`Srgb`, `LinearRgb`, `OkLab`, `OkLch`), the
//! one-way sRGB -> OKLCh conversion chain, a chroma-weighted perceptual
//! distance, and a deterministic generator of maximally-distinct palettes
//! for chart series.

pub mod color;
pub mod error;
pub mod palette;

pub use color::{LinearRgb, OkLab, OkLch, Srgb};
pub use error::PaletteError;
pub use palette::{distinct_colors, distinct_palette, PaletteConfig};
