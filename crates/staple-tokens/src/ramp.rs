//! Ramp generation: one seed color in, N perceptually stepped colors out.
//!
//! A ramp is indexed `1..=N` from lightest to darkest. Lightness comes from
//! a fixed table per step count and theme mode, so every ramp of the same
//! shape has identical perceptual spacing no matter which seed produced it.
//! The seed only contributes hue and a chroma budget.
//!
//! Chroma follows a bump: low at the extremes (no neon tints, no muddy
//! near-blacks), peaking around the solid step. Each step is then pulled
//! into the sRGB gamut by chroma reduction, which leaves lightness and hue
//! exactly where the table put them.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};
use staple_color::Color;
use tracing::trace;

use crate::error::{Error, Result};
use crate::palette::ThemeMode;

// ---------------------------------------------------------------------------
// Curve tables
// ---------------------------------------------------------------------------

const LIGHT_12_L: [f64; 12] = [
    0.985, 0.968, 0.938, 0.900, 0.852, 0.795, 0.725, 0.645, 0.555, 0.490, 0.420, 0.270,
];
const LIGHT_12_C: [f64; 12] = [
    0.06, 0.12, 0.22, 0.34, 0.46, 0.58, 0.72, 0.88, 1.00, 0.95, 0.80, 0.50,
];
const DARK_12_L: [f64; 12] = [
    0.950, 0.890, 0.810, 0.720, 0.640, 0.555, 0.480, 0.410, 0.345, 0.290, 0.235, 0.170,
];
const DARK_12_C: [f64; 12] = [
    0.30, 0.55, 0.80, 0.95, 1.00, 0.95, 0.80, 0.62, 0.45, 0.32, 0.22, 0.12,
];

const LIGHT_16_L: [f64; 16] = [
    0.990, 0.975, 0.955, 0.928, 0.895, 0.855, 0.810, 0.760, 0.705, 0.645, 0.585, 0.525, 0.465,
    0.400, 0.330, 0.250,
];
const LIGHT_16_C: [f64; 16] = [
    0.04, 0.08, 0.14, 0.22, 0.31, 0.41, 0.52, 0.64, 0.76, 0.88, 0.97, 1.00, 0.94, 0.82, 0.66,
    0.48,
];
const DARK_16_L: [f64; 16] = [
    0.960, 0.920, 0.870, 0.815, 0.755, 0.695, 0.635, 0.575, 0.515, 0.455, 0.400, 0.345, 0.295,
    0.245, 0.200, 0.160,
];
const DARK_16_C: [f64; 16] = [
    0.25, 0.40, 0.58, 0.75, 0.88, 0.97, 1.00, 0.96, 0.86, 0.72, 0.58, 0.45, 0.34, 0.25, 0.18,
    0.12,
];

const ALPHA_12: [f64; 12] = [
    0.03, 0.06, 0.10, 0.15, 0.21, 0.28, 0.36, 0.46, 0.58, 0.71, 0.85, 1.00,
];
const ALPHA_16: [f64; 16] = [
    0.02, 0.04, 0.07, 0.10, 0.14, 0.18, 0.23, 0.29, 0.36, 0.44, 0.53, 0.63, 0.74, 0.85, 0.93,
    1.00,
];

/// Smallest chroma factor the linear algorithm uses at the ends.
const LINEAR_CHROMA_FLOOR: f64 = 0.15;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Number of steps in a ramp. Only the two scale shapes the token system
/// uses are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum StepCount {
    #[default]
    Twelve,
    Sixteen,
}

impl StepCount {
    #[must_use]
    pub const fn get(self) -> usize {
        match self {
            Self::Twelve => 12,
            Self::Sixteen => 16,
        }
    }

    /// The step a palette's "solid" color sits at (buttons, badges); also
    /// the reference for alpha ramps.
    #[must_use]
    pub const fn solid_step(self) -> usize {
        match self {
            Self::Twelve => 9,
            Self::Sixteen => 12,
        }
    }

    const fn lightness(self, mode: ThemeMode) -> &'static [f64] {
        match (self, mode) {
            (Self::Twelve, ThemeMode::Light) => &LIGHT_12_L,
            (Self::Twelve, ThemeMode::Dark) => &DARK_12_L,
            (Self::Sixteen, ThemeMode::Light) => &LIGHT_16_L,
            (Self::Sixteen, ThemeMode::Dark) => &DARK_16_L,
        }
    }

    const fn chroma(self, mode: ThemeMode) -> &'static [f64] {
        match (self, mode) {
            (Self::Twelve, ThemeMode::Light) => &LIGHT_12_C,
            (Self::Twelve, ThemeMode::Dark) => &DARK_12_C,
            (Self::Sixteen, ThemeMode::Light) => &LIGHT_16_C,
            (Self::Sixteen, ThemeMode::Dark) => &DARK_16_C,
        }
    }

    const fn alpha(self) -> &'static [f64] {
        match self {
            Self::Twelve => &ALPHA_12,
            Self::Sixteen => &ALPHA_16,
        }
    }
}

impl TryFrom<usize> for StepCount {
    type Error = Error;

    fn try_from(n: usize) -> Result<Self> {
        match n {
            12 => Ok(Self::Twelve),
            16 => Ok(Self::Sixteen),
            other => Err(Error::config(format!("step count must be 12 or 16, got {other}"))),
        }
    }
}

impl From<StepCount> for usize {
    fn from(n: StepCount) -> Self {
        n.get()
    }
}

impl fmt::Display for StepCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// How lightness and chroma are distributed across steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RampAlgorithm {
    /// Hand-tuned lightness and chroma tables.
    #[default]
    Curve,
    /// Evenly spaced lightness between the table endpoints, sine chroma bump.
    Linear,
}

impl RampAlgorithm {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Curve => "curve",
            Self::Linear => "linear",
        }
    }
}

/// Ramp generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RampParams {
    pub step_count: StepCount,
    pub algorithm: RampAlgorithm,
    /// Multiplier on the seed's chroma, in [0, 2].
    pub chroma_scale: f64,
}

impl Default for RampParams {
    fn default() -> Self {
        Self {
            step_count: StepCount::Twelve,
            algorithm: RampAlgorithm::Curve,
            chroma_scale: 1.0,
        }
    }
}

impl RampParams {
    pub const MAX_CHROMA_SCALE: f64 = 2.0;

    #[must_use]
    pub fn with_step_count(step_count: StepCount) -> Self {
        Self {
            step_count,
            ..Self::default()
        }
    }

    /// Check parameter ranges.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if `chroma_scale` is not a finite number in [0, 2].
    pub fn validate(&self) -> Result<()> {
        if !self.chroma_scale.is_finite() || !(0.0..=Self::MAX_CHROMA_SCALE).contains(&self.chroma_scale) {
            return Err(Error::config(format!(
                "chromaScale must be within 0..=2, got {}",
                self.chroma_scale
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Ramp
// ---------------------------------------------------------------------------

/// An ordered, immutable sequence of colors from one seed.
///
/// Steps are 1-based in the public API to match token names (`blue-9`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ramp {
    seed: Color,
    steps: Vec<Color>,
}

impl Ramp {
    /// The seed this ramp was generated from.
    #[must_use]
    pub const fn seed(&self) -> Color {
        self.seed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Color at a 1-based step, or `None` if out of range.
    #[must_use]
    pub fn step(&self, step: usize) -> Option<Color> {
        step.checked_sub(1).and_then(|i| self.steps.get(i)).copied()
    }

    #[must_use]
    pub fn steps(&self) -> &[Color] {
        &self.steps
    }

    /// All steps as hex strings.
    #[must_use]
    pub fn to_hex(&self) -> Vec<String> {
        self.steps.iter().map(|c| c.to_hex()).collect()
    }

    /// A copy with one step replaced. `None` if `step` is out of range.
    #[must_use]
    pub fn with_step(&self, step: usize, color: Color) -> Option<Self> {
        let index = step.checked_sub(1).filter(|&i| i < self.steps.len())?;
        let mut steps = self.steps.clone();
        steps[index] = color;
        Some(Self { seed: self.seed, steps })
    }
}

/// Generate a ramp from a seed for the given theme mode.
///
/// Step `i` gets `L = table[i]`, `C = seed.c × factor[i] × chroma_scale`,
/// `H = seed.h`, then chroma is reduced until the color is in gamut.
#[must_use]
pub fn generate_ramp(seed: Color, params: &RampParams, mode: ThemeMode) -> Ramp {
    let n = params.step_count.get();
    let lightness = params.step_count.lightness(mode);
    let chroma = params.step_count.chroma(mode);
    let scale = params.chroma_scale.clamp(0.0, RampParams::MAX_CHROMA_SCALE);

    let steps = (0..n)
        .map(|i| {
            let (l, factor) = match params.algorithm {
                RampAlgorithm::Curve => (lightness[i], chroma[i]),
                RampAlgorithm::Linear => {
                    let t = i as f64 / (n - 1) as f64;
                    let first = lightness[0];
                    let last = lightness[n - 1];
                    ((last - first).mul_add(t, first), (PI * t).sin().max(LINEAR_CHROMA_FLOOR))
                }
            };
            Color::oklch(l, seed.c * factor * scale, seed.h).to_gamut()
        })
        .collect::<Vec<_>>();

    trace!(
        seed = %seed,
        steps = n,
        algorithm = params.algorithm.name(),
        mode = mode.name(),
        "generated ramp"
    );

    Ramp {
        seed: seed.with_alpha(1.0),
        steps,
    }
}

/// Generate a light-mode ramp from a hex seed with default curves.
///
/// # Errors
///
/// `InvalidColorFormat` if `hex` is malformed.
pub fn generate_ramp_hex(hex: &str, step_count: StepCount) -> Result<Ramp> {
    let seed = Color::from_hex(hex)?;
    Ok(generate_ramp(
        seed,
        &RampParams::with_step_count(step_count),
        ThemeMode::Light,
    ))
}

// ---------------------------------------------------------------------------
// AlphaRamp
// ---------------------------------------------------------------------------

/// One reference color at increasing opacity, step 1 nearly transparent,
/// step N opaque.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlphaRamp {
    reference: Color,
    steps: Vec<Color>,
}

impl AlphaRamp {
    #[must_use]
    pub const fn reference(&self) -> Color {
        self.reference
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn step(&self, step: usize) -> Option<Color> {
        step.checked_sub(1).and_then(|i| self.steps.get(i)).copied()
    }

    #[must_use]
    pub fn steps(&self) -> &[Color] {
        &self.steps
    }

    /// `#rrggbbaa` for translucent steps, `#rrggbb` for the opaque last one.
    #[must_use]
    pub fn to_hex(&self) -> Vec<String> {
        self.steps.iter().map(|c| c.to_hex()).collect()
    }
}

/// Fix hue/lightness/chroma from `reference` and vary only alpha.
#[must_use]
pub fn generate_alpha_ramp(reference: Color, step_count: StepCount) -> AlphaRamp {
    let reference = reference.with_alpha(1.0).to_gamut();
    let steps = step_count
        .alpha()
        .iter()
        .map(|&a| reference.with_alpha(a))
        .collect();
    AlphaRamp { reference, steps }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
