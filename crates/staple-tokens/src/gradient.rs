//! OKLCH gradients for the gradient editor.
//!
//! Interpolating in OKLCH keeps lightness even across the gradient and takes
//! the short way round the hue wheel, so blue to yellow does not pass
//! through a gray midpoint the way sRGB interpolation does.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use staple_color::Color;

use crate::error::{Error, Result};

/// A color at a position along the gradient line, 0.0 to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: Color,
    pub position: f64,
}

impl GradientStop {
    #[must_use]
    pub const fn new(color: Color, position: f64) -> Self {
        Self { color, position }
    }
}

/// A linear gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGradient")]
pub struct Gradient {
    stops: Vec<GradientStop>,
    /// CSS angle in degrees.
    angle: f64,
}

#[derive(Deserialize)]
struct RawGradient {
    stops: Vec<GradientStop>,
    #[serde(default = "default_angle")]
    angle: f64,
}

const fn default_angle() -> f64 {
    90.0
}

impl TryFrom<RawGradient> for Gradient {
    type Error = Error;

    fn try_from(raw: RawGradient) -> Result<Self> {
        Self::new(raw.stops, raw.angle)
    }
}

impl Gradient {
    /// Build a gradient.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` unless there are at least two stops, every position
    /// is within [0, 1], and positions never decrease.
    pub fn new(stops: Vec<GradientStop>, angle: f64) -> Result<Self> {
        if stops.len() < 2 {
            return Err(Error::config("a gradient needs at least two stops"));
        }
        if let Some(stop) = stops
            .iter()
            .find(|s| !(0.0..=1.0).contains(&s.position))
        {
            return Err(Error::config(format!(
                "gradient stop position {} is outside 0..=1",
                stop.position
            )));
        }
        if stops.windows(2).any(|w| w[1].position < w[0].position) {
            return Err(Error::config("gradient stop positions must not decrease"));
        }
        if !angle.is_finite() {
            return Err(Error::config("gradient angle must be finite"));
        }
        Ok(Self { stops, angle })
    }

    /// Evenly spaced two-stop gradient between two hex colors.
    ///
    /// # Errors
    ///
    /// `InvalidColorFormat` for a malformed hex.
    pub fn between(from: &str, to: &str, angle: f64) -> Result<Self> {
        Self::new(
            vec![
                GradientStop::new(Color::from_hex(from)?, 0.0),
                GradientStop::new(Color::from_hex(to)?, 1.0),
            ],
            angle,
        )
    }

    #[must_use]
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    #[must_use]
    pub const fn angle(&self) -> f64 {
        self.angle
    }

    /// Color at position `t`, clamped to [0, 1].
    #[must_use]
    pub fn sample(&self, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let first = self.stops[0];
        let last = self.stops[self.stops.len() - 1];
        if t <= first.position {
            return first.color.to_gamut();
        }
        if t >= last.position {
            return last.color.to_gamut();
        }

        // First segment whose end is at or past t.
        let segment = self
            .stops
            .windows(2)
            .find(|w| t <= w[1].position)
            .unwrap_or(&self.stops[self.stops.len() - 2..]);
        let (a, b) = (segment[0], segment[1]);
        let span = b.position - a.position;
        if span <= f64::EPSILON {
            return b.color.to_gamut();
        }
        a.color.mix(&b.color, (t - a.position) / span).to_gamut()
    }

    /// `samples` evenly spaced colors from start to end inclusive.
    #[must_use]
    pub fn interpolate(&self, samples: usize) -> Vec<Color> {
        match samples {
            0 => Vec::new(),
            1 => vec![self.sample(0.0)],
            n => (0..n)
                .map(|i| self.sample(i as f64 / (n - 1) as f64))
                .collect(),
        }
    }

    /// `linear-gradient(<angle>deg, #hex p%, …)`.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut out = format!("linear-gradient({}deg", round2(self.angle));
        for stop in &self.stops {
            let _ = write!(out, ", {} {}%", stop.color.to_hex(), round2(stop.position * 100.0));
        }
        out.push(')');
        out
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
