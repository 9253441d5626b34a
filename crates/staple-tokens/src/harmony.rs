//! Color harmony engine: hue relationships around the OKLCH wheel.
//!
//! Each harmony takes a seed and produces one to three companions using a
//! fixed set of hue offsets. Companions keep the seed's lightness and chroma,
//! so a triad reads as three colors of equal weight. Monochrome is the
//! exception: it keeps the hue and moves lightness instead.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use staple_color::Color;

use crate::error::{Error, Result};

/// Lightness step for monochrome companions.
const MONO_STEP: f64 = 0.2;
/// Monochrome companions never leave this lightness band.
const MONO_MIN_L: f64 = 0.05;
const MONO_MAX_L: f64 = 0.97;

/// The kind of harmony used to derive companion colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HarmonyType {
    /// Opposite hue (+180).
    Complementary,
    /// The two hues flanking the complement (+150, +210).
    SplitComplementary,
    /// Three evenly spaced hues (+120, +240).
    Triadic,
    /// Four evenly spaced hues (+90, +180, +270).
    Tetradic,
    /// Neighbors on the wheel (+30, -30).
    Analogous,
    /// Same hue, one lighter and one darker.
    Monochrome,
}

impl HarmonyType {
    /// Kebab-case name, as used in configs and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Complementary => "complementary",
            Self::SplitComplementary => "split-complementary",
            Self::Triadic => "triadic",
            Self::Tetradic => "tetradic",
            Self::Analogous => "analogous",
            Self::Monochrome => "monochrome",
        }
    }

    /// Parse a harmony from its name.
    ///
    /// Case, `-`, `_` and spaces are ignored, so `"split-complementary"`,
    /// `"splitComplementary"` and `"Split Complementary"` all match.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let key = squash(name);
        Self::all().iter().find(|t| squash(t.name()) == key).copied()
    }

    /// All harmony types.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Complementary,
            Self::SplitComplementary,
            Self::Triadic,
            Self::Tetradic,
            Self::Analogous,
            Self::Monochrome,
        ]
    }

    /// Hue offsets in degrees, in companion order. Empty for monochrome.
    #[must_use]
    pub const fn hue_offsets(self) -> &'static [f64] {
        match self {
            Self::Complementary => &[180.0],
            Self::SplitComplementary => &[150.0, 210.0],
            Self::Triadic => &[120.0, 240.0],
            Self::Tetradic => &[90.0, 180.0, 270.0],
            Self::Analogous => &[30.0, -30.0],
            Self::Monochrome => &[],
        }
    }
}

fn squash(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for HarmonyType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| Error::UnknownHarmonyType { name: s.to_owned() })
    }
}

impl fmt::Display for HarmonyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A seed plus its companions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HarmonySet {
    pub kind: HarmonyType,
    pub seed: Color,
    pub companions: Vec<Color>,
}

impl HarmonySet {
    /// Seed first, then companions in offset order.
    #[must_use]
    pub fn to_hex(&self) -> Vec<String> {
        std::iter::once(self.seed)
            .chain(self.companions.iter().copied())
            .map(Color::to_hex)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.companions.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

/// Derive companions for a seed color.
#[must_use]
pub fn harmony_from_color(seed: Color, kind: HarmonyType) -> HarmonySet {
    let seed = seed.with_alpha(1.0);
    let companions = match kind {
        HarmonyType::Monochrome => vec![
            seed.set_lightness((seed.l + MONO_STEP).clamp(MONO_MIN_L, MONO_MAX_L)),
            seed.set_lightness((seed.l - MONO_STEP).clamp(MONO_MIN_L, MONO_MAX_L)),
        ],
        _ => kind
            .hue_offsets()
            .iter()
            .map(|&offset| seed.shift_hue(offset))
            .collect(),
    };

    HarmonySet {
        kind,
        seed,
        companions: companions.into_iter().map(Color::to_gamut).collect(),
    }
}

/// Derive companions for a hex seed.
///
/// # Errors
///
/// `InvalidColorFormat` for a malformed hex.
pub fn generate_harmony(hex: &str, kind: HarmonyType) -> Result<HarmonySet> {
    Ok(harmony_from_color(Color::from_hex(hex)?, kind))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
