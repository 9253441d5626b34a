//! The theme pipeline: config in, palettes and resolved token colors out.
//!
//! Stages run in a fixed order and always all of them:
//!
//! 1. validate the config
//! 2. generate a palette per seed
//! 3. apply palette overrides
//! 4. resolve the semantic map per mode
//! 5. apply semantic overrides
//!
//! Palette overrides run before resolution so that every token pointing at
//! an overridden step sees the new color. Semantic overrides run last and
//! therefore always win.

use serde::Serialize;
use tracing::debug;

use crate::config::BuilderConfig;
use crate::error::Result;
use crate::palette::{
    Palette, PaletteSet, ResolvedColors, ThemeMode, apply_palette_overrides,
    apply_semantic_overrides, resolve_semantic_colors,
};

/// Output of a full pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuiltTheme {
    /// Palettes after palette overrides.
    pub palettes: PaletteSet,
    pub resolved: ResolvedColors,
}

/// Generate palettes for every seed, without overrides.
///
/// # Errors
///
/// Fails if a seed does not resolve.
pub fn generate_palettes(config: &BuilderConfig) -> Result<PaletteSet> {
    let mut palettes = PaletteSet::new();
    for (name, seed) in &config.seeds {
        let params = config.params_for(name);
        palettes.insert(name.clone(), Palette::generate(seed.resolve()?, &params));
    }
    Ok(palettes)
}

/// Run the whole pipeline.
///
/// # Errors
///
/// Any validation, seed, reference or override error. Nothing partial is
/// returned.
pub fn build_theme(config: &BuilderConfig) -> Result<BuiltTheme> {
    config.validate()?;
    debug!(seeds = config.seeds.len(), "config validated");

    let generated = generate_palettes(config)?;
    debug!(
        palettes = generated.len(),
        steps = config.generation.step_count.get(),
        "palettes generated"
    );

    let palettes = apply_palette_overrides(&generated, &config.overrides)?;

    let mut resolved = ResolvedColors::default();
    for mode in ThemeMode::ALL {
        let base = resolve_semantic_colors(config.semantic_map.for_mode(mode), &palettes, mode)?;
        let tokens = apply_semantic_overrides(&base, &config.overrides, &palettes, mode)?;
        debug!(mode = %mode, tokens = tokens.len(), "tokens resolved");
        match mode {
            ThemeMode::Light => resolved.light = tokens,
            ThemeMode::Dark => resolved.dark = tokens,
        }
    }

    Ok(BuiltTheme { palettes, resolved })
}
