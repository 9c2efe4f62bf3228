//! Color types and conversion functions for the timebars palette generator.
//!
//! Provides four color types (`Srgb`, `LinearRgb`, `OkLab`, `OkLch`) and pure
//! conversion functions along the one-way chain sRGB -> linear RGB -> OKLab ->
//! OKLCh, plus the chroma-weighted perceptual distance used to pick
//! well-separated chart colors. Uses `f64` throughout for precision.
//!
//! The OKLab color space is perceptually uniform, so distances computed in its
//! cylindrical OKLCh form track how different two colors actually look.

use crate::error::PaletteError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::f64::consts::TAU;

/// sRGB color with components in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"` for human-readable formats.
/// The hex round-trip has 8-bit quantization (1/255 precision loss),
/// which is acceptable since hex colors are inherently 8-bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Linear RGB color (gamma-decoded).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// OKLab perceptual color space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OkLab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// OKLCh (cylindrical form of OKLab).
///
/// Hue is an angle in radians in [0, 2*pi); the distance metric consumes it
/// directly, so it is never converted to degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OkLch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Srgb {
    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `PaletteError::InvalidColor` if the input is not a valid 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Srgb, PaletteError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return Err(PaletteError::InvalidColor(format!(
                "expected 6 hex digits, got {}",
                hex.len()
            )));
        }
        let r = u8::from_str_radix(&hex[0..2], 16)
            .map_err(|e| PaletteError::InvalidColor(format!("invalid red component: {e}")))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .map_err(|e| PaletteError::InvalidColor(format!("invalid green component: {e}")))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .map_err(|e| PaletteError::InvalidColor(format!("invalid blue component: {e}")))?;
        Ok(Srgb {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        })
    }

    /// Converts the color to a hex string like `"#rrggbb"`.
    ///
    /// Components are clamped to [0, 1] and quantized to 8-bit with rounding.
    pub fn to_hex(self) -> String {
        let r = (self.r.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (self.g.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (self.b.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Applies inverse sRGB gamma to a single component in [0, 1].
pub fn linearize(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Converts sRGB to linear RGB by applying inverse sRGB gamma per channel.
///
/// Out-of-gamut channels are clamped to [0, 1] first, so the conversion is
/// total over all finite inputs.
pub fn srgb_to_linear(c: Srgb) -> LinearRgb {
    LinearRgb {
        r: linearize(c.r.clamp(0.0, 1.0)),
        g: linearize(c.g.clamp(0.0, 1.0)),
        b: linearize(c.b.clamp(0.0, 1.0)),
    }
}

/// Converts linear RGB to OKLab via the OKLab matrix transform.
pub fn linear_to_oklab(c: LinearRgb) -> OkLab {
    let l = 0.4122214708 * c.r + 0.5363325363 * c.g + 0.0514459929 * c.b;
    let m = 0.2119034982 * c.r + 0.6806995451 * c.g + 0.1073969566 * c.b;
    let s = 0.0883024619 * c.r + 0.2817188376 * c.g + 0.6299787005 * c.b;

    let l = l.cbrt();
    let m = m.cbrt();
    let s = s.cbrt();

    OkLab {
        l: 0.2104542553 * l + 0.7936177850 * m - 0.0040720468 * s,
        a: 1.9779984951 * l - 2.4285922050 * m + 0.4505937099 * s,
        b: 0.0259040371 * l + 0.7827717662 * m - 0.8086757660 * s,
    }
}

/// Converts OKLab to OKLCh (cylindrical form).
///
/// Hue is `atan2(b, a)` shifted into [0, 2*pi). `f64::atan2(0.0, 0.0)` is 0,
/// so achromatic colors get hue 0 rather than NaN.
pub fn oklab_to_oklch(c: OkLab) -> OkLch {
    let chroma = (c.a * c.a + c.b * c.b).sqrt();
    let mut h = c.b.atan2(c.a);
    if h < 0.0 {
        h += TAU;
    }
    OkLch {
        l: c.l,
        c: chroma,
        h,
    }
}

/// Convenience: sRGB to OKLab via the chain sRGB -> linear -> OKLab.
pub fn srgb_to_oklab(c: Srgb) -> OkLab {
    linear_to_oklab(srgb_to_linear(c))
}

/// Convenience: sRGB to OKLCh via the chain sRGB -> linear -> OKLab -> OKLCh.
pub fn srgb_to_oklch(c: Srgb) -> OkLch {
    oklab_to_oklch(srgb_to_oklab(c))
}

/// Perceptual distance between two OKLCh colors.
///
/// Euclidean over lightness and chroma, with the hue difference wrapped to
/// the shorter arc around the circle and weighted by the mean chroma of the
/// pair. Near-gray colors therefore differ almost purely by lightness, no
/// matter how far apart their nominal hues sit.
pub fn perceptual_distance(c1: OkLch, c2: OkLch) -> f64 {
    let dl = c1.l - c2.l;
    let dc = c1.c - c2.c;
    let hue_diff = (c1.h - c2.h).abs();
    let hue_wrap = hue_diff.min(TAU - hue_diff);
    let hue_term = hue_wrap * (c1.c + c2.c) / 2.0;
    (dl * dl + dc * dc + hue_term * hue_term).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    // -- Gamma linearization tests --

    #[test]
    fn linearize_zero_is_zero() {
        assert!(approx_eq(linearize(0.0), 0.0));
    }

    #[test]
    fn linearize_one_is_one() {
        assert!(approx_eq(linearize(1.0), 1.0));
    }

    #[test]
    fn linearize_mid_gray_matches_known_value() {
        // sRGB 0.5 decodes to linear ~0.21404114.
        assert!(approx_eq(linearize(0.5), 0.2140411));
    }

    #[test]
    fn linearize_boundary_at_0_04045() {
        // Exactly at the boundary the linear segment applies.
        assert!(approx_eq(linearize(0.04045), 0.04045 / 12.92));

        // Just above it the power segment applies.
        let expected = ((0.04046 + 0.055) / 1.055_f64).powf(2.4);
        assert!(approx_eq(linearize(0.04046), expected));
    }

    #[test]
    fn srgb_to_linear_black_is_zero() {
        let lin = srgb_to_linear(Srgb {
            r: 0.0,
            g: 0.0,
            b: 0.0,
        });
        assert!(approx_eq(lin.r, 0.0));
        assert!(approx_eq(lin.g, 0.0));
        assert!(approx_eq(lin.b, 0.0));
    }

    #[test]
    fn srgb_to_linear_white_is_one() {
        let lin = srgb_to_linear(Srgb {
            r: 1.0,
            g: 1.0,
            b: 1.0,
        });
        assert!(approx_eq(lin.r, 1.0));
        assert!(approx_eq(lin.g, 1.0));
        assert!(approx_eq(lin.b, 1.0));
    }

    #[test]
    fn srgb_to_linear_clamps_out_of_gamut_channels() {
        let lin = srgb_to_linear(Srgb {
            r: 1.5,
            g: -0.2,
            b: 0.5,
        });
        assert!(approx_eq(lin.r, 1.0), "r should clamp to 1.0, got {}", lin.r);
        assert!(approx_eq(lin.g, 0.0), "g should clamp to 0.0, got {}", lin.g);
        assert!(approx_eq(lin.b, linearize(0.5)));
    }

    // -- OKLab / OKLCh conversion tests --

    #[test]
    fn white_in_oklab_has_l_near_one_and_zero_chroma() {
        let lab = linear_to_oklab(LinearRgb {
            r: 1.0,
            g: 1.0,
            b: 1.0,
        });
        assert!(approx_eq(lab.l, 1.0), "expected L~1.0, got {}", lab.l);
        assert!(approx_eq(lab.a, 0.0), "expected a~0.0, got {}", lab.a);
        assert!(approx_eq(lab.b, 0.0), "expected b~0.0, got {}", lab.b);
    }

    #[test]
    fn black_in_oklab_has_l_near_zero() {
        let lab = linear_to_oklab(LinearRgb {
            r: 0.0,
            g: 0.0,
            b: 0.0,
        });
        assert!(approx_eq(lab.l, 0.0), "expected L~0.0, got {}", lab.l);
        assert!(approx_eq(lab.a, 0.0), "expected a~0.0, got {}", lab.a);
        assert!(approx_eq(lab.b, 0.0), "expected b~0.0, got {}", lab.b);
    }

    #[test]
    fn oklch_pure_red_has_hue_near_half_radian() {
        // sRGB red sits at ~29.2 degrees, i.e. ~0.510 rad.
        let lch = srgb_to_oklch(Srgb {
            r: 1.0,
            g: 0.0,
            b: 0.0,
        });
        assert!(
            (lch.h - 0.510).abs() < 0.02,
            "expected red hue ~0.510 rad, got {}",
            lch.h
        );
        assert!(lch.c > 0.0, "expected positive chroma for red");
    }

    #[test]
    fn oklch_pure_green_has_hue_near_2_5_radians() {
        // sRGB green sits at ~142.5 degrees, i.e. ~2.487 rad.
        let lch = srgb_to_oklch(Srgb {
            r: 0.0,
            g: 1.0,
            b: 0.0,
        });
        assert!(
            (lch.h - 2.487).abs() < 0.03,
            "expected green hue ~2.487 rad, got {}",
            lch.h
        );
    }

    #[test]
    fn oklch_negative_atan2_hue_wraps_into_range() {
        // Negative b puts atan2 in (-pi, 0); the hue must come back shifted
        // by a full turn.
        let lch = oklab_to_oklch(OkLab {
            l: 0.5,
            a: 0.1,
            b: -0.1,
        });
        assert!(
            lch.h > std::f64::consts::PI,
            "expected hue > pi, got {}",
            lch.h
        );
        assert!(lch.h < TAU, "expected hue < tau, got {}", lch.h);
    }

    #[test]
    fn oklch_achromatic_input_has_zero_hue_not_nan() {
        let lch = oklab_to_oklch(OkLab {
            l: 0.5,
            a: 0.0,
            b: 0.0,
        });
        assert_eq!(lch.h, 0.0, "achromatic color should have hue=0");
        assert!(lch.c < 1e-10, "achromatic color should have chroma~0");
    }

    #[test]
    fn mid_gray_has_negligible_chroma() {
        let lch = srgb_to_oklch(Srgb {
            r: 0.5,
            g: 0.5,
            b: 0.5,
        });
        assert!(lch.c < 1e-6, "expected near-zero chroma, got {}", lch.c);
    }

    // -- Perceptual distance tests --

    #[test]
    fn distance_between_identical_colors_is_zero() {
        let c = srgb_to_oklch(Srgb {
            r: 0.3,
            g: 0.6,
            b: 0.9,
        });
        assert_eq!(perceptual_distance(c, c), 0.0);
    }

    #[test]
    fn distance_between_grays_is_lightness_difference() {
        let dark = srgb_to_oklch(Srgb {
            r: 0.25,
            g: 0.25,
            b: 0.25,
        });
        let light = srgb_to_oklch(Srgb {
            r: 0.75,
            g: 0.75,
            b: 0.75,
        });
        let d = perceptual_distance(dark, light);
        assert!(
            approx_eq(d, (light.l - dark.l).abs()),
            "expected pure lightness difference {}, got {d}",
            (light.l - dark.l).abs()
        );
    }

    #[test]
    fn distance_weights_hue_by_mean_chroma() {
        // Same lightness and chroma, hues half a turn apart: the distance is
        // exactly hue_wrap * chroma = pi * 0.2.
        let a = OkLch {
            l: 0.5,
            c: 0.2,
            h: 0.0,
        };
        let b = OkLch {
            l: 0.5,
            c: 0.2,
            h: std::f64::consts::PI,
        };
        let d = perceptual_distance(a, b);
        assert!(
            approx_eq(d, std::f64::consts::PI * 0.2),
            "expected {}, got {d}",
            std::f64::consts::PI * 0.2
        );
    }

    #[test]
    fn distance_wraps_hue_across_zero() {
        // Hues at 0.05 and tau - 0.05 are 0.1 rad apart around the wrap, not
        // tau - 0.1.
        let a = OkLch {
            l: 0.5,
            c: 0.15,
            h: 0.05,
        };
        let b = OkLch {
            l: 0.5,
            c: 0.15,
            h: TAU - 0.05,
        };
        let d = perceptual_distance(a, b);
        assert!(approx_eq(d, 0.1 * 0.15), "expected {}, got {d}", 0.1 * 0.15);
    }

    // -- Hex parsing tests --

    #[test]
    fn from_hex_parses_blue_with_hash() {
        let blue = Srgb::from_hex("#0000ff").unwrap();
        assert!(approx_eq(blue.r, 0.0));
        assert!(approx_eq(blue.g, 0.0));
        assert!(approx_eq(blue.b, 1.0));
    }

    #[test]
    fn from_hex_parses_without_hash() {
        let orange = Srgb::from_hex("ffa500").unwrap();
        assert!(approx_eq(orange.r, 1.0));
        assert!(approx_eq(orange.g, 0xa5 as f64 / 255.0));
        assert!(approx_eq(orange.b, 0.0));
    }

    #[test]
    fn from_hex_is_case_insensitive() {
        let upper = Srgb::from_hex("#1E90FF").unwrap();
        let lower = Srgb::from_hex("#1e90ff").unwrap();
        assert_eq!(upper.to_hex(), lower.to_hex());
    }

    #[test]
    fn from_hex_rejects_invalid_input() {
        assert!(Srgb::from_hex("#12345g").is_err());
        assert!(Srgb::from_hex("4af").is_err()); // shorthand form not supported
        assert!(Srgb::from_hex("").is_err());
        assert!(Srgb::from_hex("#aabbccdd").is_err()); // no alpha channel
    }

    #[test]
    fn from_hex_parses_arbitrary_color() {
        let color = Srgb::from_hex("#3c7a1f").unwrap();
        assert!(approx_eq(color.r, 0x3c as f64 / 255.0));
        assert!(approx_eq(color.g, 0x7a as f64 / 255.0));
        assert!(approx_eq(color.b, 0x1f as f64 / 255.0));
    }

    // -- to_hex tests --

    #[test]
    fn to_hex_known_colors() {
        let white = Srgb {
            r: 1.0,
            g: 1.0,
            b: 1.0,
        };
        assert_eq!(white.to_hex(), "#ffffff");

        let color = Srgb {
            r: 0x3c as f64 / 255.0,
            g: 0x7a as f64 / 255.0,
            b: 0x1f as f64 / 255.0,
        };
        assert_eq!(color.to_hex(), "#3c7a1f");
    }

    #[test]
    fn to_hex_clamps_out_of_range() {
        let color = Srgb {
            r: -0.25,
            g: 2.0,
            b: 0.5,
        };
        assert_eq!(color.to_hex(), "#00ff80");
    }

    #[test]
    fn from_hex_to_hex_round_trip() {
        let original = "#2a9d8f";
        let color = Srgb::from_hex(original).unwrap();
        assert_eq!(color.to_hex(), original);
    }

    // -- Serde tests --

    #[test]
    fn srgb_serializes_as_hex_string() {
        let teal = Srgb::from_hex("#2a9d8f").unwrap();
        let json = serde_json::to_string(&teal).unwrap();
        assert_eq!(json, "\"#2a9d8f\"");
    }

    #[test]
    fn srgb_deserializes_from_hex_string() {
        let navy: Srgb = serde_json::from_str("\"#000080\"").unwrap();
        assert!(approx_eq(navy.r, 0.0));
        assert!(approx_eq(navy.g, 0.0));
        assert!(approx_eq(navy.b, 0x80 as f64 / 255.0));
    }

    #[test]
    fn srgb_deserialize_rejects_invalid_hex() {
        let result: Result<Srgb, _> = serde_json::from_str("\"#bad\"");
        assert!(result.is_err());
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        /// Strategy for sRGB component values in [0, 1].
        fn srgb_component() -> impl Strategy<Value = f64> {
            0.0_f64..=1.0
        }

        proptest! {
            #[test]
            fn oklch_hue_stays_in_range(
                r in srgb_component(),
                g in srgb_component(),
                b in srgb_component(),
            ) {
                let lch = srgb_to_oklch(Srgb { r, g, b });
                prop_assert!(!lch.h.is_nan(), "hue is NaN for ({r}, {g}, {b})");
                prop_assert!(!lch.c.is_nan(), "chroma is NaN for ({r}, {g}, {b})");
                prop_assert!(
                    lch.h >= 0.0 && lch.h < TAU,
                    "hue {} out of [0, tau) for ({r}, {g}, {b})", lch.h
                );
            }

            #[test]
            fn distance_is_symmetric(
                r1 in srgb_component(), g1 in srgb_component(), b1 in srgb_component(),
                r2 in srgb_component(), g2 in srgb_component(), b2 in srgb_component(),
            ) {
                let c1 = srgb_to_oklch(Srgb { r: r1, g: g1, b: b1 });
                let c2 = srgb_to_oklch(Srgb { r: r2, g: g2, b: b2 });
                prop_assert_eq!(
                    perceptual_distance(c1, c2),
                    perceptual_distance(c2, c1)
                );
            }

            #[test]
            fn distance_is_nonnegative_and_finite(
                r1 in srgb_component(), g1 in srgb_component(), b1 in srgb_component(),
                r2 in srgb_component(), g2 in srgb_component(), b2 in srgb_component(),
            ) {
                let c1 = srgb_to_oklch(Srgb { r: r1, g: g1, b: b1 });
                let c2 = srgb_to_oklch(Srgb { r: r2, g: g2, b: b2 });
                let d = perceptual_distance(c1, c2);
                prop_assert!(d >= 0.0, "negative distance {d}");
                prop_assert!(d.is_finite(), "non-finite distance {d}");
            }

            #[test]
            fn distance_to_self_is_zero(
                r in srgb_component(),
                g in srgb_component(),
                b in srgb_component(),
            ) {
                let c = srgb_to_oklch(Srgb { r, g, b });
                prop_assert_eq!(perceptual_distance(c, c), 0.0);
            }

            #[test]
            fn linearize_is_monotonic(
                a in srgb_component(),
                b in srgb_component(),
            ) {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(
                    linearize(lo) <= linearize(hi),
                    "linearize not monotonic: f({lo}) > f({hi})"
                );
            }
        }
    }
}
