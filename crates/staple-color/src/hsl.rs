// SPDX-License-Identifier: MIT
//
// HSL helpers for the picker's hue/saturation/lightness sliders.
//
// HSL is not perceptual and nothing in ramp or harmony generation uses it.
// It exists because that is the model people drag sliders in.

use serde::{Deserialize, Serialize};

use crate::color::{Color, normalize_hue, to_u8};
use crate::error::ColorError;

/// An sRGB color in HSL form.
///
/// `h` is in degrees [0, 360); `s` and `l` are percentages [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    /// Create an HSL value. Hue wraps, saturation and lightness clamp.
    #[must_use]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: normalize_hue(h),
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
        }
    }

    /// HSL of an 8-bit sRGB triple.
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        let r = f64::from(r) / 255.0;
        let g = f64::from(g) / 255.0;
        let b = f64::from(b) / 255.0;

        let max = r.max(g.max(b));
        let min = r.min(g.min(b));
        let l = (max + min) * 0.5;
        let d = max - min;

        if d < 1e-12 {
            return Self { h: 0.0, s: 0.0, l: l * 100.0 };
        }

        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };

        // `max` is one of the three inputs, so exact comparison is sound.
        #[allow(clippy::float_cmp)]
        let h = if max == r {
            ((g - b) / d).rem_euclid(6.0)
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        } * 60.0;

        Self {
            h: normalize_hue(h),
            s: s * 100.0,
            l: l * 100.0,
        }
    }

    /// 8-bit sRGB for this HSL value.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let s = self.s.clamp(0.0, 100.0) / 100.0;
        let l = self.l.clamp(0.0, 100.0) / 100.0;
        let h = normalize_hue(self.h) / 360.0;

        if s < 1e-12 {
            let v = to_u8(l);
            return (v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l.mul_add(-s, l + s) };
        let p = 2.0f64.mul_add(l, -q);

        (
            to_u8(hue_to_channel(p, q, h + 1.0 / 3.0)),
            to_u8(hue_to_channel(p, q, h)),
            to_u8(hue_to_channel(p, q, h - 1.0 / 3.0)),
        )
    }

    /// Lift into OKLCH.
    #[must_use]
    pub fn to_color(self) -> Color {
        let (r, g, b) = self.to_rgb8();
        Color::rgb8(r, g, b)
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        ((q - p) * 6.0).mul_add(t, p)
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        ((q - p) * 6.0).mul_add(2.0 / 3.0 - t, p)
    } else {
        p
    }
}

/// Parse a hex color and express it in HSL.
///
/// # Errors
///
/// Returns [`ColorError::InvalidColorFormat`] for malformed hex input.
pub fn hex_to_hsl(hex: &str) -> Result<Hsl, ColorError> {
    let (r, g, b) = Color::from_hex(hex)?.to_rgb8();
    Ok(Hsl::from_rgb8(r, g, b))
}

/// Emit an HSL value as `#rrggbb`.
#[must_use]
pub fn hsl_to_hex(hsl: Hsl) -> String {
    let (r, g, b) = hsl.to_rgb8();
    format!("#{r:02x}{g:02x}{b:02x}")
}
