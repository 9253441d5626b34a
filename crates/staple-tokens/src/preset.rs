//! Named preset seeds: the built-in palette table.
//!
//! Each preset is a single seed color. Ramps are generated from it exactly
//! like from a user-supplied hex, so a preset is only a shortcut.

use staple_color::Color;

use crate::error::{Error, Result};
use crate::palette::ThemeMode;
use crate::ramp::{Ramp, RampParams, generate_ramp};

/// Built-in seeds, ordered roughly around the hue wheel with neutrals first.
const PRESETS: &[(&str, &str)] = &[
    ("gray", "#6b7280"),
    ("slate", "#64748b"),
    ("red", "#dc2626"),
    ("orange", "#ea580c"),
    ("amber", "#d97706"),
    ("yellow", "#ca8a04"),
    ("green", "#16a34a"),
    ("teal", "#0d9488"),
    ("cyan", "#0891b2"),
    ("blue", "#2563eb"),
    ("indigo", "#4f46e5"),
    ("purple", "#9333ea"),
    ("pink", "#db2777"),
];

/// Look up a preset's seed hex by name (case-insensitive).
///
/// Returns `None` if the name is not recognized.
#[must_use]
pub fn preset_hex(name: &str) -> Option<&'static str> {
    PRESETS
        .iter()
        .find(|(preset, _)| preset.eq_ignore_ascii_case(name.trim()))
        .map(|&(_, hex)| hex)
}

/// List all available preset names.
pub fn preset_names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|&(name, _)| name)
}

/// Seed color of a preset.
///
/// # Errors
///
/// `UnknownPreset` if the name is not in the table.
pub fn preset_seed(name: &str) -> Result<Color> {
    let hex = preset_hex(name).ok_or_else(|| Error::UnknownPreset {
        name: name.to_owned(),
    })?;
    Ok(Color::from_hex(hex)?)
}

/// Generate a ramp from a built-in preset.
///
/// # Errors
///
/// `UnknownPreset` if the name is not in the table.
pub fn generate_preset_ramp(name: &str, params: &RampParams, mode: ThemeMode) -> Result<Ramp> {
    Ok(generate_ramp(preset_seed(name)?, params, mode))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
