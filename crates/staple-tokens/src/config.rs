//! Builder configuration: the declarative input to the token pipeline.
//!
//! A [`BuilderConfig`] is a plain value: seeds, generation parameters,
//! per-palette tweaks, a semantic map, overrides and the contrast pairs to
//! audit. It deserializes from the JSON shape the Token Studio saves and is
//! never mutated in place; [`BuilderConfig::apply`] returns a new value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use staple_color::Color;

use crate::audit::ContrastPair;
use crate::contrast::ApcaContext;
use crate::error::{Error, Result};
use crate::palette::{Override, PaletteName, SemanticMap, StepRef, ThemeMode, is_identifier};
use crate::preset::preset_seed;
use crate::ramp::{RampAlgorithm, RampParams};

// ---------------------------------------------------------------------------
// Seeds and per-palette parameters
// ---------------------------------------------------------------------------

/// Where a palette's seed color comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    /// A literal `#rrggbb`.
    Hex(String),
    /// A built-in preset, written `{ "preset": "blue" }`.
    Preset { preset: String },
}

impl Seed {
    #[must_use]
    pub fn hex(hex: impl Into<String>) -> Self {
        Self::Hex(hex.into())
    }

    #[must_use]
    pub fn preset(name: impl Into<String>) -> Self {
        Self::Preset {
            preset: name.into(),
        }
    }

    /// The seed color.
    ///
    /// # Errors
    ///
    /// `InvalidColorFormat` for a bad hex, `UnknownPreset` for a bad name.
    pub fn resolve(&self) -> Result<Color> {
        match self {
            Self::Hex(hex) => Ok(Color::from_hex(hex)?),
            Self::Preset { preset } => preset_seed(preset),
        }
    }
}

/// Per-palette tweaks layered over the global generation parameters.
///
/// Step count is global so every palette has the same shape and a semantic
/// map entry means the same thing in every palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct PaletteParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<RampAlgorithm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chroma_scale: Option<f64>,
}

impl PaletteParams {
    /// Global parameters with this palette's tweaks applied.
    #[must_use]
    pub fn merged(&self, global: &RampParams) -> RampParams {
        RampParams {
            step_count: global.step_count,
            algorithm: self.algorithm.unwrap_or(global.algorithm),
            chroma_scale: self.chroma_scale.unwrap_or(global.chroma_scale),
        }
    }
}

// ---------------------------------------------------------------------------
// BuilderConfig
// ---------------------------------------------------------------------------

/// Everything needed to build a theme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct BuilderConfig {
    pub seeds: BTreeMap<PaletteName, Seed>,
    pub generation: RampParams,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub palettes: BTreeMap<PaletteName, PaletteParams>,
    pub semantic_map: SemanticMap,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<Override>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contrast_pairs: Vec<ContrastPair>,
}

impl BuilderConfig {
    /// Structural validation. Reference resolution happens in the pipeline.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` for no seeds, out-of-range parameters, tweaks for
    ///   unseeded palettes, or malformed token names.
    /// - `InvalidColorFormat` / `UnknownPreset` for a seed that does not
    ///   resolve.
    pub fn validate(&self) -> Result<()> {
        if self.seeds.is_empty() {
            return Err(Error::config("at least one seed is required"));
        }
        for seed in self.seeds.values() {
            seed.resolve()?;
        }

        self.generation.validate()?;
        for (name, params) in &self.palettes {
            if !self.seeds.contains_key(name) {
                return Err(Error::config(format!(
                    "palette parameters given for {name}, which has no seed"
                )));
            }
            params.merged(&self.generation).validate()?;
        }

        for mode in ThemeMode::ALL {
            for token in self.semantic_map.for_mode(mode).keys() {
                check_token(token)?;
            }
        }
        for item in &self.overrides {
            if let Override::Semantic { token, .. } = item {
                check_token(token)?;
            }
        }
        for pair in &self.contrast_pairs {
            check_token(&pair.foreground)?;
            check_token(&pair.background)?;
        }
        Ok(())
    }

    /// Ramp parameters for one palette.
    #[must_use]
    pub fn params_for(&self, palette: &PaletteName) -> RampParams {
        self.palettes
            .get(palette)
            .map_or(self.generation, |p| p.merged(&self.generation))
    }

    /// A copy with one edit applied.
    #[must_use]
    pub fn apply(&self, edit: ConfigEdit) -> Self {
        let mut next = self.clone();
        match edit {
            ConfigEdit::SetSeed { palette, seed } => {
                next.seeds.insert(palette, seed);
            }
            ConfigEdit::RemoveSeed { palette } => {
                next.seeds.remove(&palette);
                next.palettes.remove(&palette);
            }
            ConfigEdit::SetGeneration(params) => next.generation = params,
            ConfigEdit::SetPaletteParams { palette, params } => {
                next.palettes.insert(palette, params);
            }
            ConfigEdit::MapToken {
                mode,
                token,
                target,
            } => {
                next.semantic_map.for_mode_mut(mode).insert(token, target);
            }
            ConfigEdit::UnmapToken { mode, token } => {
                next.semantic_map.for_mode_mut(mode).remove(&token);
            }
            ConfigEdit::AddOverride(item) => next.overrides.push(item),
            ConfigEdit::ClearOverrides => next.overrides.clear(),
        }
        next
    }

    /// The default theme: five palettes and a semantic map covering
    /// surfaces, text, borders and the four intent colors.
    #[must_use]
    pub fn starter() -> Self {
        let mut semantic_map = SemanticMap::default();
        for &(token, palette, light, dark) in STARTER_NEUTRAL_TOKENS {
            map_both(&mut semantic_map, token, palette, light, dark);
        }
        for &(intent, _) in STARTER_SEEDS.iter().filter(|(name, _)| *name != "neutral") {
            for &(suffix, light, dark) in STARTER_INTENT_TOKENS {
                map_both(&mut semantic_map, &format!("{intent}{suffix}"), intent, light, dark);
            }
        }

        let contrast_pairs = [
            ("text", "background", ApcaContext::BodyText),
            ("textMuted", "surface", ApcaContext::BodyText),
            ("primaryText", "primarySurface", ApcaContext::BodyText),
            ("primary", "background", ApcaContext::LargeText),
            ("borderStrong", "background", ApcaContext::NonText),
        ]
        .into_iter()
        .map(|(fg, bg, context)| ContrastPair::new(fg, bg, context))
        .collect();

        Self {
            seeds: STARTER_SEEDS
                .iter()
                .map(|&(name, seed)| (PaletteName::known(name), seed.to_seed()))
                .collect(),
            generation: RampParams::default(),
            palettes: BTreeMap::new(),
            semantic_map,
            overrides: Vec::new(),
            contrast_pairs,
        }
    }
}

/// Starter seed: a literal hex or a preset name.
#[derive(Clone, Copy)]
enum StarterSeed {
    Hex(&'static str),
    Preset(&'static str),
}

impl StarterSeed {
    fn to_seed(self) -> Seed {
        match self {
            Self::Hex(hex) => Seed::hex(hex),
            Self::Preset(name) => Seed::preset(name),
        }
    }
}

/// Palette name and seed of every starter palette.
const STARTER_SEEDS: &[(&str, StarterSeed)] = &[
    ("primary", StarterSeed::Hex("#2563eb")),
    ("neutral", StarterSeed::Preset("gray")),
    ("danger", StarterSeed::Preset("red")),
    ("success", StarterSeed::Preset("green")),
    ("warning", StarterSeed::Preset("amber")),
];

/// `(token, palette, light step, dark step)` for the neutral surfaces.
const STARTER_NEUTRAL_TOKENS: &[(&str, &str, usize, usize)] = &[
    ("background", "neutral", 1, 12),
    ("surface", "neutral", 2, 11),
    ("surfaceRaised", "neutral", 3, 10),
    ("border", "neutral", 6, 7),
    ("borderStrong", "neutral", 8, 5),
    ("text", "neutral", 12, 1),
    ("textMuted", "neutral", 11, 3),
];

/// `(suffix, light step, dark step)` for every intent palette.
const STARTER_INTENT_TOKENS: &[(&str, usize, usize)] = &[
    ("", 9, 5),
    ("Hover", 10, 4),
    ("Surface", 3, 10),
    ("Text", 11, 3),
];

fn map_both(map: &mut SemanticMap, token: &str, palette: &'static str, light: usize, dark: usize) {
    let palette = PaletteName::known(palette);
    map.light
        .insert(token.to_owned(), StepRef::new(palette.clone(), light));
    map.dark.insert(token.to_owned(), StepRef::new(palette, dark));
}

fn check_token(token: &str) -> Result<()> {
    if is_identifier(token) {
        Ok(())
    } else {
        Err(Error::config(format!("invalid token name {token:?}")))
    }
}

// ---------------------------------------------------------------------------
// Edits
// ---------------------------------------------------------------------------

/// One change to a [`BuilderConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigEdit {
    SetSeed { palette: PaletteName, seed: Seed },
    /// Also drops the palette's parameter tweaks.
    RemoveSeed { palette: PaletteName },
    SetGeneration(RampParams),
    SetPaletteParams {
        palette: PaletteName,
        params: PaletteParams,
    },
    MapToken {
        mode: ThemeMode,
        token: String,
        target: StepRef,
    },
    UnmapToken { mode: ThemeMode, token: String },
    AddOverride(Override),
    ClearOverrides,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ramp::StepCount;
    use pretty_assertions::assert_eq;

    fn name(s: &str) -> PaletteName {
        PaletteName::new(s).unwrap()
    }

    const SAMPLE: &str = r##"{
        "seeds": { "primary": "#2563eb", "neutral": { "preset": "gray" } },
        "generation": { "stepCount": 12, "algorithm": "curve", "chromaScale": 1.0 },
        "palettes": { "neutral": { "chromaScale": 0.4 } },
        "semanticMap": {
            "light": { "primary": { "palette": "primary", "step": 9 } },
            "dark": {}
        },
        "overrides": [
            { "kind": "palette", "palette": "primary", "step": 9, "mode": "light", "value": "#1d4ed8" },
            { "kind": "semantic", "token": "primary", "mode": "dark", "value": { "palette": "primary", "step": 4 } }
        ],
        "contrastPairs": [ { "foreground": "text", "background": "background", "context": "bodyText" } ]
    }"##;

    #[test]
    fn parses_documented_shape() {
        let config: BuilderConfig = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(config.seeds.len(), 2);
        assert_eq!(config.seeds[&name("neutral")], Seed::preset("gray"));
        assert_eq!(config.generation.step_count, StepCount::Twelve);
        assert_eq!(config.overrides.len(), 2);
        assert_eq!(config.contrast_pairs.len(), 1);
        config.validate().unwrap();
    }

    #[test]
    fn json_roundtrip() {
        let config: BuilderConfig = serde_json::from_str(SAMPLE).unwrap();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let back: BuilderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn sections_default() {
        let config: BuilderConfig = serde_json::from_str(r##"{"seeds":{"a":"#000000"}}"##).unwrap();
        assert_eq!(config.generation, RampParams::default());
        assert!(config.semantic_map.light.is_empty());
        config.validate().unwrap();
    }

    #[test]
    fn unknown_fields_rejected() {
        assert!(serde_json::from_str::<BuilderConfig>(r#"{"seedz":{}}"#).is_err());
    }

    #[test]
    fn palette_params_merge() {
        let global = RampParams::with_step_count(StepCount::Sixteen);
        let tweak = PaletteParams {
            algorithm: None,
            chroma_scale: Some(0.4),
        };
        let merged = tweak.merged(&global);
        assert_eq!(merged.step_count, StepCount::Sixteen);
        assert_eq!(merged.algorithm, RampAlgorithm::Curve);
        assert!((merged.chroma_scale - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn params_for_unlisted_palette_is_global() {
        let config: BuilderConfig = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(config.params_for(&name("primary")), config.generation);
        assert!((config.params_for(&name("neutral")).chroma_scale - 0.4).abs() < f64::EPSILON);
    }

    // ── Validation ──────────────────────────────────────────────────

    #[test]
    fn empty_config_is_invalid() {
        assert!(matches!(
            BuilderConfig::default().validate(),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn bad_seeds_are_reported() {
        let bad_hex = BuilderConfig::default().apply(ConfigEdit::SetSeed {
            palette: name("primary"),
            seed: Seed::hex("not-a-color"),
        });
        assert!(matches!(bad_hex.validate(), Err(Error::InvalidColorFormat(_))));

        let bad_preset = BuilderConfig::default().apply(ConfigEdit::SetSeed {
            palette: name("primary"),
            seed: Seed::preset("mauve"),
        });
        assert!(matches!(bad_preset.validate(), Err(Error::UnknownPreset { .. })));
    }

    #[test]
    fn tweaks_need_a_seed() {
        let config = BuilderConfig::starter().apply(ConfigEdit::SetPaletteParams {
            palette: name("accent"),
            params: PaletteParams::default(),
        });
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn chroma_scale_range_checked() {
        let config = BuilderConfig::starter().apply(ConfigEdit::SetPaletteParams {
            palette: name("neutral"),
            params: PaletteParams {
                algorithm: None,
                chroma_scale: Some(3.0),
            },
        });
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn token_names_checked() {
        let config = BuilderConfig::starter().apply(ConfigEdit::MapToken {
            mode: ThemeMode::Light,
            token: "bad token;".into(),
            target: StepRef::new(name("primary"), 9),
        });
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    // ── Starter and edits ───────────────────────────────────────────

    #[test]
    fn starter_is_valid() {
        let config = BuilderConfig::starter();
        config.validate().unwrap();
        assert_eq!(config.seeds.len(), 5);
        assert_eq!(
            config.semantic_map.light.len(),
            STARTER_NEUTRAL_TOKENS.len() + 4 * STARTER_INTENT_TOKENS.len()
        );
        assert_eq!(
            config.semantic_map.light.keys().collect::<Vec<_>>(),
            config.semantic_map.dark.keys().collect::<Vec<_>>()
        );
        assert!(config.semantic_map.light.contains_key("dangerSurface"));
    }

    #[test]
    fn starter_tables_hold_valid_names() {
        for (name, _) in STARTER_SEEDS {
            assert!(PaletteName::new(*name).is_ok(), "{name}");
        }
        let seeded: Vec<&str> = STARTER_SEEDS.iter().map(|(name, _)| *name).collect();
        for (token, palette, _, _) in STARTER_NEUTRAL_TOKENS {
            assert!(is_identifier(token), "{token}");
            assert!(seeded.contains(palette), "{palette}");
        }
        for (suffix, _, _) in STARTER_INTENT_TOKENS {
            assert!(is_identifier(&format!("primary{suffix}")), "{suffix}");
        }
        let config = BuilderConfig::starter();
        assert_eq!(config.seeds.len(), STARTER_SEEDS.len());
        for target in config.semantic_map.light.values().chain(config.semantic_map.dark.values()) {
            assert!(config.seeds.contains_key(&target.palette), "{target}");
        }
    }

    #[test]
    fn apply_leaves_original_untouched() {
        let config = BuilderConfig::starter();
        let edited = config.apply(ConfigEdit::RemoveSeed {
            palette: name("warning"),
        });
        assert_eq!(config.seeds.len(), 5);
        assert_eq!(edited.seeds.len(), 4);
    }

    #[test]
    fn apply_each_edit() {
        let config = BuilderConfig::starter();

        let edited = config.apply(ConfigEdit::SetGeneration(RampParams::with_step_count(
            StepCount::Sixteen,
        )));
        assert_eq!(edited.generation.step_count, StepCount::Sixteen);

        let edited = config.apply(ConfigEdit::UnmapToken {
            mode: ThemeMode::Dark,
            token: "text".into(),
        });
        assert!(!edited.semantic_map.dark.contains_key("text"));
        assert!(edited.semantic_map.light.contains_key("text"));

        let item = Override::Semantic {
            token: "text".into(),
            mode: ThemeMode::Light,
            value: crate::palette::OverrideValue::Hex("#000000".into()),
        };
        let edited = config.apply(ConfigEdit::AddOverride(item.clone()));
        assert_eq!(edited.overrides, vec![item]);
        assert!(edited.apply(ConfigEdit::ClearOverrides).overrides.is_empty());
    }
}
