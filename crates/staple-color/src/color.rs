// SPDX-License-Identifier: MIT
//
// OKLCH colors for the token engine.
//
// Ramps need equal numeric steps to read as equal visual steps, which sRGB
// and HSL cannot give. Generators therefore work on OKLCH values and only
// touch sRGB at the edges: parsing a seed and printing a hex string.
//
//   hex → sRGB → linear sRGB → LMS → Oklab → OKLCH   (and back)
//
// An OKLCH value outside sRGB is never an error. `to_hex` clamps each
// channel; `to_gamut` trades chroma for a faithful lightness and hue.

// l, c, h, r, g, b are the names every color paper uses.
#![allow(clippy::many_single_char_names)]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ColorError;

/// Chroma below this is treated as gray and its hue ignored.
const ACHROMATIC_CHROMA: f64 = 1e-5;

/// Slack allowed on each sRGB channel before a color counts as out of gamut.
/// The published matrices are rounded to ten digits, so a color parsed from
/// `#ff0000` comes back with channels around 1e-6 past the edge.
const GAMUT_EPS: f64 = 1e-5;

/// Bisection rounds in [`Color::to_gamut`]. 24 halvings of 0.4 chroma land
/// well below one 8-bit step.
const GAMUT_ROUNDS: usize = 24;

/// A color in OKLCH with straight alpha.
///
/// Fields are public and unchecked: generators routinely build colors past
/// the sRGB edge and map them back with [`Color::to_gamut`].
///
/// # Examples
///
/// ```
/// use staple_color::Color;
///
/// let blue = Color::from_hex("#2563eb").unwrap();
/// assert_eq!(blue.to_hex(), "#2563eb");
///
/// let complement = blue.shift_hue(180.0);
/// assert!((complement.l - blue.l).abs() < 1e-12);
/// ```
#[derive(Clone, Copy)]
pub struct Color {
    /// Perceived lightness, 0 is black and 1 is white.
    pub l: f64,
    /// Colorfulness. sRGB tops out near 0.37.
    pub c: f64,
    /// Hue in degrees, kept in `[0, 360)` by every constructor here.
    pub h: f64,
    /// Opacity, 1 is solid.
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::oklch(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::oklch(1.0, 0.0, 0.0);

    /// Opaque color from raw OKLCH components.
    #[inline]
    #[must_use]
    pub const fn oklch(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h, alpha: 1.0 }
    }

    #[inline]
    #[must_use]
    pub const fn oklcha(l: f64, c: f64, h: f64, alpha: f64) -> Self {
        Self { l, c, h, alpha }
    }

    /// Neutral gray at lightness `l`.
    #[inline]
    #[must_use]
    pub const fn gray(l: f64) -> Self {
        Self::oklch(l, 0.0, 0.0)
    }

    /// Opaque color from gamma-encoded sRGB channels in `[0, 1]`.
    #[must_use]
    pub fn srgb(r: f64, g: f64, b: f64) -> Self {
        let lms = mat3(&LRGB_TO_LMS, [decode(r), decode(g), decode(b)]);
        let lab = mat3(&LMS_TO_LAB, lms.map(f64::cbrt));
        let (c, h) = polar(lab[1], lab[2]);
        Self::oklch(lab[0], c, h)
    }

    /// Opaque color from 8-bit sRGB channels.
    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        let unit = |v: u8| f64::from(v) / 255.0;
        Self::srgb(unit(r), unit(g), unit(b))
    }

    /// Parse `#rrggbb`. The hash is optional and digits may be either case;
    /// anything else, shorthand and `#rrggbbaa` included, is rejected.
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidColorFormat`] carrying the input.
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::invalid(input));
        }
        let channel = |at: usize| {
            u8::from_str_radix(&digits[at..at + 2], 16).map_err(|_| ColorError::invalid(input))
        };
        Ok(Self::rgb8(channel(0)?, channel(2)?, channel(4)?))
    }

    #[inline]
    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    #[inline]
    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.alpha >= 1.0
    }

    /// True when chroma is too small for hue to mean anything.
    #[inline]
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self.c.abs() < ACHROMATIC_CHROMA
    }

    /// Replace lightness, clamped to `[0, 1]`.
    #[inline]
    #[must_use]
    pub const fn set_lightness(self, l: f64) -> Self {
        Self {
            l: l.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Raise lightness by `amount`, clamped to `[0, 1]`.
    #[inline]
    #[must_use]
    pub const fn lighten(self, amount: f64) -> Self {
        self.set_lightness(self.l + amount)
    }

    /// Lower lightness by `amount`, clamped to `[0, 1]`.
    #[inline]
    #[must_use]
    pub const fn darken(self, amount: f64) -> Self {
        self.set_lightness(self.l - amount)
    }

    /// Replace chroma. Negative values become gray.
    #[inline]
    #[must_use]
    pub const fn set_chroma(self, c: f64) -> Self {
        Self {
            c: c.max(0.0),
            ..self
        }
    }

    /// Rotate hue by `degrees`, either direction.
    #[inline]
    #[must_use]
    pub fn shift_hue(self, degrees: f64) -> Self {
        Self {
            h: normalize_hue(self.h + degrees),
            ..self
        }
    }

    /// Blend toward `other` by `t` (clamped to `[0, 1]`).
    ///
    /// Components blend linearly; hue goes round the short arc. A gray end
    /// has no hue of its own, so the other end's hue is kept throughout.
    #[must_use]
    pub fn mix(self, other: &Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let lerp = |from: f64, to: f64| (to - from).mul_add(t, from);

        let h = match (self.is_achromatic(), other.is_achromatic()) {
            (true, _) => other.h,
            (false, true) => self.h,
            (false, false) => {
                let mut delta = other.h - self.h;
                if delta > 180.0 {
                    delta -= 360.0;
                } else if delta < -180.0 {
                    delta += 360.0;
                }
                normalize_hue(delta.mul_add(t, self.h))
            }
        };

        Self {
            l: lerp(self.l, other.l),
            c: lerp(self.c, other.c),
            h,
            alpha: lerp(self.alpha, other.alpha),
        }
    }

    /// Euclidean ΔE in Oklab. Around 0.02 is the smallest step most people
    /// notice.
    #[must_use]
    pub fn distance(self, other: &Self) -> f64 {
        let (a1, b1) = cartesian(self.c, self.h);
        let (a2, b2) = cartesian(other.c, other.h);
        let (dl, da, db) = (self.l - other.l, a1 - a2, b1 - b2);
        dl.hypot(da).hypot(db)
    }

    /// Gamma-encoded sRGB, unclamped.
    fn srgb_raw(self) -> [f64; 3] {
        let (a, b) = cartesian(self.c, self.h);
        let lms = mat3(&LAB_TO_LMS, [self.l, a, b]).map(|v| v * v * v);
        mat3(&LMS_TO_LRGB, lms).map(encode)
    }

    /// 8-bit sRGB with each channel clamped into range.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let [r, g, b] = self.srgb_raw().map(to_u8);
        (r, g, b)
    }

    /// Lowercase `#rrggbb`, or `#rrggbbaa` for a translucent color.
    #[must_use]
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        if self.is_opaque() {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{:02x}", to_u8(self.alpha))
        }
    }

    #[must_use]
    pub fn in_srgb_gamut(self) -> bool {
        self.srgb_raw()
            .iter()
            .all(|v| (-GAMUT_EPS..=1.0 + GAMUT_EPS).contains(v))
    }

    /// Largest chroma at this lightness and hue that sRGB can show.
    ///
    /// Lightness and hue come back bit-for-bit, so a ramp keeps its
    /// lightness curve exactly.
    #[must_use]
    pub fn to_gamut(self) -> Self {
        if self.in_srgb_gamut() {
            return self;
        }
        let (mut inside, mut outside) = (0.0_f64, self.c);
        for _ in 0..GAMUT_ROUNDS {
            let mid = (inside + outside) * 0.5;
            if (Self { c: mid, ..self }).in_srgb_gamut() {
                inside = mid;
            } else {
                outside = mid;
            }
        }
        Self { c: inside, ..self }
    }
}

/// `#rrggbb` → OKLCH.
///
/// # Errors
///
/// [`ColorError::InvalidColorFormat`] unless the input is six hex digits
/// with an optional leading `#`.
pub fn hex_to_oklch(hex: &str) -> Result<Color, ColorError> {
    Color::from_hex(hex)
}

/// OKLCH → `#rrggbb`, clamping channels that fall outside sRGB.
#[must_use]
pub fn oklch_to_hex(color: Color) -> String {
    color.to_hex()
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oklch({:.4} {:.4} {:.1}", self.l, self.c, self.h)?;
        if !self.is_opaque() {
            write!(f, " / {:.2}", self.alpha)?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_hex())
    }
}

// Float fields compare within 1e-9; hue is skipped when either side is gray.
impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        const TOL: f64 = 1e-9;
        let near = |x: f64, y: f64| (x - y).abs() < TOL;
        let hue_matters = !(self.is_achromatic() || other.is_achromatic());
        near(self.l, other.l)
            && near(self.c, other.c)
            && near(self.alpha, other.alpha)
            && (!hue_matters || hue_diff(self.h, other.h) < TOL)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// Colors travel through configs and exports as hex strings.
impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ─── Hue helpers ─────────────────────────────────────────────────────────────

/// Wrap any angle into `[0, 360)`.
#[inline]
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    let wrapped = h.rem_euclid(360.0);
    // rem_euclid of a tiny negative rounds up to exactly 360.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unsigned angular distance between two hues, at most 180.
#[inline]
#[must_use]
pub fn hue_diff(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

fn cartesian(c: f64, h: f64) -> (f64, f64) {
    let (sin, cos) = h.to_radians().sin_cos();
    (c * cos, c * sin)
}

fn polar(a: f64, b: f64) -> (f64, f64) {
    let c = a.hypot(b);
    // Grays sit a few 1e-8 off the axis because the published matrices are
    // rounded. Their hue is noise.
    if c < 1e-6 {
        (c, 0.0)
    } else {
        (c, normalize_hue(b.atan2(a).to_degrees()))
    }
}

// ─── Oklab matrices ──────────────────────────────────────────────────────────
//
// Björn Ottosson, "A perceptual color space for image processing" (2020).

const LRGB_TO_LMS: [[f64; 3]; 3] = [
    [0.412_221_470_8, 0.536_332_536_3, 0.051_445_992_9],
    [0.211_903_498_2, 0.680_699_545_1, 0.107_396_956_6],
    [0.088_302_461_9, 0.281_718_837_6, 0.629_978_700_5],
];

const LMS_TO_LAB: [[f64; 3]; 3] = [
    [0.210_454_255_3, 0.793_617_785_0, -0.004_072_046_8],
    [1.977_998_495_1, -2.428_592_205_0, 0.450_593_709_9],
    [0.025_904_037_1, 0.782_771_766_2, -0.808_675_766_0],
];

const LAB_TO_LMS: [[f64; 3]; 3] = [
    [1.0, 0.396_337_777_4, 0.215_803_757_3],
    [1.0, -0.105_561_345_8, -0.063_854_172_8],
    [1.0, -0.089_484_177_5, -1.291_485_548_0],
];

const LMS_TO_LRGB: [[f64; 3]; 3] = [
    [4.076_741_662_1, -3.307_711_591_3, 0.230_969_929_2],
    [-1.268_438_004_6, 2.609_757_401_1, -0.341_319_396_5],
    [-0.004_196_086_3, -0.703_418_614_7, 1.707_614_701_0],
];

#[inline]
fn mat3(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    m.map(|row| row[2].mul_add(v[2], row[0].mul_add(v[0], row[1] * v[1])))
}

// ─── sRGB transfer ───────────────────────────────────────────────────────────

/// Gamma-encoded sRGB channel → linear light (IEC 61966-2-1).
#[inline]
#[must_use]
pub fn srgb_to_linear(v: f64) -> f64 {
    decode(v)
}

#[inline]
fn decode(v: f64) -> f64 {
    if v > 0.040_45 {
        ((v + 0.055) / 1.055).powf(2.4)
    } else {
        v / 12.92
    }
}

#[inline]
fn encode(v: f64) -> f64 {
    if v > 0.003_130_8 {
        v.powf(1.0 / 2.4).mul_add(1.055, -0.055)
    } else {
        12.92 * v
    }
}

/// Unit channel → byte, clamped, rounding halves up.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    const SAMPLE: [&str; 30] = [
        "#000000", "#ffffff", "#ff0000", "#00ff00", "#0000ff", "#ffff00", "#00ffff", "#ff00ff",
        "#2563eb", "#dc2626", "#16a34a", "#d97706", "#9333ea", "#0d9488", "#ea580c", "#db2777",
        "#4f46e5", "#0891b2", "#6b7280", "#64748b", "#c86432", "#123456", "#abcdef", "#fedcba",
        "#010203", "#fefefe", "#7f7f7f", "#808080", "#3b0764", "#f0fdf4",
    ];

    #[test]
    fn hex_survives_oklch_and_back() {
        for hex in SAMPLE {
            let color = hex_to_oklch(hex).unwrap();
            assert_eq!(oklch_to_hex(color), hex);
        }
    }

    #[test]
    fn srgb_components_survive_conversion() {
        let start = Color::oklch(0.62, 0.12, 140.0);
        let [r, g, b] = start.srgb_raw();
        let back = Color::srgb(r, g, b);
        assert!(close(back.l, start.l, 1e-6));
        assert!(close(back.c, start.c, 1e-6));
        assert!(hue_diff(back.h, start.h) < 1e-3);
    }

    #[test]
    fn reference_red() {
        let red = hex_to_oklch("#ff0000").unwrap();
        assert!(close(red.l, 0.628, 0.002), "L = {}", red.l);
        assert!(close(red.c, 0.2577, 0.002), "C = {}", red.c);
        assert!(close(red.h, 29.23, 0.1), "H = {}", red.h);
    }

    #[test]
    fn black_and_white_endpoints() {
        let black = hex_to_oklch("#000000").unwrap();
        let white = hex_to_oklch("#ffffff").unwrap();
        assert!(close(black.l, 0.0, 1e-6) && close(black.c, 0.0, 1e-6));
        assert!(close(white.l, 1.0, 1e-4) && close(white.c, 0.0, 1e-4));
    }

    #[test]
    fn grays_get_zero_hue() {
        for hex in ["#000000", "#808080", "#ffffff", "#3a3a3a"] {
            let gray = hex_to_oklch(hex).unwrap();
            assert!(gray.is_achromatic(), "{hex}: c = {}", gray.c);
            assert_eq!(gray.h, 0.0, "{hex}");
        }
    }

    #[test]
    fn parsed_hues_in_range() {
        for hex in SAMPLE {
            let h = hex_to_oklch(hex).unwrap().h;
            assert!((0.0..360.0).contains(&h), "{hex}: h = {h}");
        }
    }

    #[test]
    fn hash_is_optional_and_case_ignored() {
        let bare = Color::from_hex("00FF00").unwrap();
        assert_eq!(bare.to_rgb8(), (0, 255, 0));
        assert_eq!(Color::from_hex("#ABCDEF").unwrap().to_hex(), "#abcdef");
    }

    #[test]
    fn malformed_hex_rejected() {
        for bad in [
            "not-a-color", "#12345", "#1234567", "#fff", "", "#", "#gggggg", "##123456",
            " #123456", "#+12345", "#12345678",
        ] {
            assert_eq!(
                Color::from_hex(bad).unwrap_err(),
                ColorError::InvalidColorFormat {
                    input: bad.to_owned()
                },
                "{bad:?}"
            );
        }
    }

    #[test]
    fn parse_via_from_str() {
        let parsed: Color = "#c86432".parse().unwrap();
        assert_eq!(parsed.to_hex(), "#c86432");
        assert!("c8643".parse::<Color>().is_err());
    }

    #[test]
    fn serde_as_hex_string() {
        let color = Color::from_hex("#2563eb").unwrap();
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#2563eb\"");
        assert_eq!(serde_json::from_str::<Color>(&json).unwrap().to_hex(), "#2563eb");
        assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
    }

    #[test]
    fn translucent_hex_carries_alpha_byte() {
        let red = Color::from_hex("#ff0000").unwrap();
        assert_eq!(red.with_alpha(0.5).to_hex(), "#ff000080");
        assert_eq!(red.with_alpha(0.0).to_hex(), "#ff000000");
    }

    #[test]
    fn out_of_gamut_prints_clamped() {
        // Raw channels are about (-4.18, 0.839, -1.13): red and blue clamp
        // to 0, green rounds to 214.
        let vivid = Color::oklch(0.7, 0.4, 150.0);
        assert!(!vivid.in_srgb_gamut());
        assert_eq!(oklch_to_hex(vivid), "#00d600");
        assert_eq!(oklch_to_hex(vivid.to_gamut()).len(), 7);
    }

    #[test]
    fn every_parsed_hex_is_in_gamut() {
        let levels = (0..=255u8).step_by(15);
        for r in levels.clone() {
            for g in levels.clone() {
                for b in levels.clone() {
                    let color = Color::rgb8(r, g, b);
                    assert!(color.in_srgb_gamut(), "{} reported out of gamut", color.to_hex());
                }
            }
        }
    }

    #[test]
    fn hex_derived_oklch_survives_hex() {
        for hex in SAMPLE {
            let color = hex_to_oklch(hex).unwrap();
            let back = hex_to_oklch(&oklch_to_hex(color)).unwrap();
            assert!(close(back.l, color.l, 1e-3), "{hex}");
            assert!(close(back.c, color.c, 1e-3), "{hex}");
            if !color.is_achromatic() {
                assert!(hue_diff(back.h, color.h) < 1e-3, "{hex}");
            }
        }
    }

    #[test]
    fn arbitrary_oklch_survives_hex_within_quantization() {
        // One 8-bit step moves L by at most about 2.3e-3 in this range.
        for tenth in 3..=19 {
            let l = f64::from(tenth) * 0.05;
            for c in [0.0, 0.05, 0.1, 0.2] {
                for h in (0..360).step_by(30) {
                    let color = Color::oklch(l, c, f64::from(h)).to_gamut();
                    let back = hex_to_oklch(&oklch_to_hex(color)).unwrap();
                    assert!(close(back.l, color.l, 3e-3), "{color:?} came back as {back:?}");
                }
            }
        }
    }

    #[test]
    fn gamut_mapping_only_touches_chroma() {
        let vivid = Color::oklch(0.85, 0.35, 264.0);
        let mapped = vivid.to_gamut();
        assert!(mapped.in_srgb_gamut());
        assert!(mapped.c < vivid.c && mapped.c > 0.0);
        assert_eq!(mapped.l.to_bits(), vivid.l.to_bits());
        assert_eq!(mapped.h.to_bits(), vivid.h.to_bits());

        let tame = Color::oklch(0.6, 0.05, 200.0);
        assert_eq!(tame.to_gamut(), tame);
    }

    #[test]
    fn hue_rotation_wraps_both_ways() {
        let c = Color::oklch(0.5, 0.1, 350.0);
        assert!(close(c.shift_hue(30.0).h, 20.0, 1e-9));
        assert!(close(c.shift_hue(-360.0).h, 350.0, 1e-9));
        assert!(close(Color::oklch(0.5, 0.1, 10.0).shift_hue(-30.0).h, 340.0, 1e-9));
    }

    #[test]
    fn hue_helpers() {
        assert!(normalize_hue(-1e-15) < 360.0);
        assert!(close(normalize_hue(720.0), 0.0, 1e-12));
        assert!(close(normalize_hue(-90.0), 270.0, 1e-12));
        assert!(close(hue_diff(10.0, 350.0), 20.0, 1e-12));
        assert!(close(hue_diff(350.0, 10.0), 20.0, 1e-12));
        assert!(close(hue_diff(0.0, 180.0), 180.0, 1e-12));
    }

    #[test]
    fn lightness_is_clamped() {
        let c = Color::oklch(0.5, 0.1, 90.0);
        assert!(close(c.set_lightness(1.4).l, 1.0, 1e-12));
        assert!(close(c.set_lightness(-0.2).l, 0.0, 1e-12));
        assert!(close(c.lighten(0.2).l, 0.7, 1e-12));
        assert!(close(c.lighten(0.8).l, 1.0, 1e-12));
        assert!(close(c.darken(0.2).l, 0.3, 1e-12));
        assert!(close(c.darken(0.8).l, 0.0, 1e-12));
        assert!(close(c.darken(0.2).h, 90.0, 1e-12));
    }

    #[test]
    fn chroma_and_alpha_setters() {
        let c = Color::oklch(0.5, 0.1, 90.0);
        assert!(close(c.set_chroma(0.25).c, 0.25, 1e-12));
        assert!(c.set_chroma(-1.0).is_achromatic());
        let glass = Color::oklcha(0.5, 0.1, 90.0, 0.4);
        assert_eq!(glass, c.with_alpha(0.4));
        assert!(!glass.is_opaque());
    }

    #[test]
    fn oklab_distance() {
        let c = Color::oklch(0.6, 0.12, 30.0);
        assert!(c.distance(&c) < 1e-12);
        assert!(close(Color::BLACK.distance(&Color::WHITE), 1.0, 1e-12));
        // Opposite hues at equal chroma sit 2C apart on the a/b plane.
        assert!(close(c.distance(&c.shift_hue(180.0)), 0.24, 1e-12));
        let other = Color::oklch(0.4, 0.05, 200.0);
        assert!(close(c.distance(&other), other.distance(&c), 1e-15));
    }

    #[test]
    fn mix_interpolates_components() {
        let dark = Color::oklch(0.3, 0.1, 40.0);
        let light = Color::oklch(0.7, 0.3, 40.0);
        assert_eq!(dark.mix(&light, 0.0), dark);
        assert_eq!(dark.mix(&light, 1.0), light);
        let mid = dark.mix(&light, 0.5);
        assert!(close(mid.l, 0.5, 1e-12));
        assert!(close(mid.c, 0.2, 1e-12));
    }

    #[test]
    fn mix_crosses_zero_degrees() {
        let warm = Color::oklch(0.5, 0.1, 20.0);
        let cool = Color::oklch(0.5, 0.1, 340.0);
        let h = warm.mix(&cool, 0.5).h;
        assert!(h < 1e-6 || h > 359.999, "h = {h}");
    }

    #[test]
    fn mix_toward_gray_holds_hue() {
        let blue = Color::oklch(0.5, 0.2, 260.0);
        assert!(close(Color::gray(0.9).mix(&blue, 0.3).h, 260.0, 1e-9));
        assert!(close(blue.mix(&Color::WHITE, 0.7).h, 260.0, 1e-9));
    }

    #[test]
    fn debug_is_css_like() {
        assert_eq!(format!("{:?}", Color::oklch(0.5, 0.1, 90.0)), "oklch(0.5000 0.1000 90.0)");
        assert_eq!(
            format!("{:?}", Color::WHITE.with_alpha(0.25)),
            "oklch(1.0000 0.0000 0.0 / 0.25)"
        );
    }
}
