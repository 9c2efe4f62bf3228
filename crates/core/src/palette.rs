//! Perceptually-distinct palette generation by greedy farthest-point sampling.
//!
//! Candidates come from a deterministic HLS grid: many evenly spaced hues
//! crossed with a few lightness and saturation levels. Selection happens in
//! OKLCh space: the first color is the candidate farthest from neutral gray,
//! and every later color maximizes its minimum perceptual distance to the
//! colors already chosen. The same count and config always produce the same
//! palette.

use crate::color::{perceptual_distance, srgb_to_oklch, OkLch, Srgb};
use crate::error::PaletteError;

/// Neutral gray anchoring the first selection.
const NEUTRAL_GRAY: Srgb = Srgb {
    r: 0.5,
    g: 0.5,
    b: 0.5,
};

/// Configuration for the distinct-palette candidate grid.
///
/// The default grid holds at least 540 candidates and grows with the
/// requested count (27 candidates per color once the count passes 20), so
/// every realistic request can be satisfied.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteConfig {
    /// Lower bound on the number of hue steps in the grid.
    pub min_hue_steps: usize,
    /// Hue steps per requested color; the grid uses
    /// `max(min_hue_steps, count * hue_steps_per_color)` hues.
    pub hue_steps_per_color: usize,
    /// HLS lightness levels sampled at every hue.
    pub lightness_levels: Vec<f64>,
    /// HLS saturation levels sampled at every hue and lightness.
    pub saturation_levels: Vec<f64>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            min_hue_steps: 60,
            hue_steps_per_color: 3,
            lightness_levels: vec![0.38, 0.50, 0.62],
            saturation_levels: vec![0.60, 0.78, 0.92],
        }
    }
}

impl PaletteConfig {
    /// Number of hue steps the grid will use for `count` output colors.
    pub fn hue_steps(&self, count: usize) -> usize {
        self.min_hue_steps.max(count * self.hue_steps_per_color)
    }

    /// Number of candidates the grid will contain for `count` output colors.
    pub fn pool_size(&self, count: usize) -> usize {
        self.hue_steps(count) * self.lightness_levels.len() * self.saturation_levels.len()
    }

    fn validate(&self) -> Result<(), PaletteError> {
        if self.lightness_levels.is_empty() {
            return Err(PaletteError::InvalidConfig(
                "at least one lightness level is required".to_string(),
            ));
        }
        if self.saturation_levels.is_empty() {
            return Err(PaletteError::InvalidConfig(
                "at least one saturation level is required".to_string(),
            ));
        }
        for &level in self
            .lightness_levels
            .iter()
            .chain(self.saturation_levels.iter())
        {
            if !level.is_finite() || !(0.0..=1.0).contains(&level) {
                return Err(PaletteError::InvalidConfig(format!(
                    "levels must be finite and within [0, 1], got {level}"
                )));
            }
        }
        if self.min_hue_steps == 0 && self.hue_steps_per_color == 0 {
            return Err(PaletteError::InvalidConfig(
                "hue step configuration would produce an empty grid".to_string(),
            ));
        }
        Ok(())
    }
}

/// Generates `count` maximally-distinct colors using the default config.
///
/// The default grid always holds far more candidates than any count asks for,
/// so this cannot fail.
pub fn distinct_colors(count: usize) -> Vec<Srgb> {
    distinct_palette(count, &PaletteConfig::default())
        .expect("default palette config satisfies any count")
}

/// Generates `count` colors from the configured HLS grid, greedily maximizing
/// the minimum pairwise perceptual distance.
///
/// Returns an empty vector for `count == 0`. Fails with `InvalidConfig` for a
/// degenerate config and with `InsufficientCandidates` when the grid is
/// smaller than `count`. Output is deterministic: the same count and config
/// always yield the same colors, in selection order. Palettes for different
/// counts are not prefixes of one another, since the grid itself depends on
/// the count.
pub fn distinct_palette(count: usize, config: &PaletteConfig) -> Result<Vec<Srgb>, PaletteError> {
    config.validate()?;
    if count == 0 {
        return Ok(Vec::new());
    }

    let candidates = candidate_pool(count, config);
    if count > candidates.len() {
        return Err(PaletteError::InsufficientCandidates {
            requested: count,
            available: candidates.len(),
        });
    }

    let in_oklch: Vec<OkLch> = candidates.iter().map(|&c| srgb_to_oklch(c)).collect();
    let gray = srgb_to_oklch(NEUTRAL_GRAY);

    // Seed with the candidate farthest from neutral gray. Strict comparison
    // means ties go to the earliest grid position.
    let mut seed = 0;
    let mut seed_dist = f64::NEG_INFINITY;
    for (i, &candidate) in in_oklch.iter().enumerate() {
        let d = perceptual_distance(candidate, gray);
        if d > seed_dist {
            seed_dist = d;
            seed = i;
        }
    }

    let mut selected = Vec::with_capacity(count);
    selected.push(candidates[seed]);
    let mut last_picked = in_oklch[seed];

    // Remaining candidates in grid order, each carrying its minimum distance
    // to the selected set so far.
    let mut remaining: Vec<(usize, f64)> = (0..candidates.len())
        .filter(|&i| i != seed)
        .map(|i| (i, f64::INFINITY))
        .collect();

    while selected.len() < count {
        let mut best_pos = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (pos, entry) in remaining.iter_mut().enumerate() {
            let d = perceptual_distance(in_oklch[entry.0], last_picked);
            entry.1 = entry.1.min(d);
            if entry.1 > best_score {
                best_score = entry.1;
                best_pos = pos;
            }
        }
        let (picked, _) = remaining.remove(best_pos);
        selected.push(candidates[picked]);
        last_picked = in_oklch[picked];
    }

    Ok(selected)
}

/// Builds the deterministic candidate grid: `hue_steps` evenly spaced hues
/// covering the full turn (endpoint excluded), crossed with every configured
/// lightness and saturation level, in hue-major order.
fn candidate_pool(count: usize, config: &PaletteConfig) -> Vec<Srgb> {
    let hue_steps = config.hue_steps(count);
    let mut pool = Vec::with_capacity(config.pool_size(count));
    for step in 0..hue_steps {
        let hue = step as f64 / hue_steps as f64;
        for &lightness in &config.lightness_levels {
            for &saturation in &config.saturation_levels {
                pool.push(hls_to_srgb(hue, lightness, saturation));
            }
        }
    }
    pool
}

/// Standard HLS to RGB conversion (the classic m1/m2 formulation), with all
/// three coordinates in [0, 1].
fn hls_to_srgb(h: f64, l: f64, s: f64) -> Srgb {
    if s == 0.0 {
        return Srgb { r: l, g: l, b: l };
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    Srgb {
        r: hue_to_channel(m1, m2, h + 1.0 / 3.0),
        g: hue_to_channel(m1, m2, h),
        b: hue_to_channel(m1, m2, h - 1.0 / 3.0),
    }
}

/// Resolves one RGB channel from the m1/m2 pair and a (wrapping) hue offset.
fn hue_to_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}
