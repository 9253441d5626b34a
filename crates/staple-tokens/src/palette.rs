//! Palette resolution: from generated ramps to concrete token colors.
//!
//! A [`PaletteSet`] holds one light and one dark ramp per named palette.
//! A [`SemanticMap`] points token names at `{palette, step}` references.
//! Resolution walks the map for one mode and looks every reference up;
//! overrides are then layered on top, palette-scoped ones before
//! resolution and semantic-scoped ones after it, so a semantic override is
//! always the last word on a token.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use staple_color::Color;
use tracing::warn;

use crate::error::{Error, Result};
use crate::ramp::{AlphaRamp, Ramp, RampParams, StepCount, generate_alpha_ramp, generate_ramp};

// ---------------------------------------------------------------------------
// ThemeMode
// ---------------------------------------------------------------------------

/// Light or dark color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub const ALL: [Self; 2] = [Self::Light, Self::Dark];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl FromStr for ThemeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(Error::config(format!("unknown theme mode {s:?}"))),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

// ---------------------------------------------------------------------------
// PaletteName
// ---------------------------------------------------------------------------

/// A validated palette name: an ASCII letter followed by letters, digits,
/// `-` or `_`. Palette names end up in CSS custom property names.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PaletteName(String);

impl PaletteName {
    /// Validate and wrap a name.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the name is empty or contains other characters.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if is_identifier(&name) {
            Ok(Self(name))
        } else {
            Err(Error::config(format!("invalid palette name {name:?}")))
        }
    }

    /// A name from a built-in table.
    pub(crate) fn known(name: &'static str) -> Self {
        debug_assert!(is_identifier(name), "{name:?} is not a palette name");
        Self(name.to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Letter first, then letters, digits, `-` or `_`. Shared with token names.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl TryFrom<String> for PaletteName {
    type Error = Error;

    fn try_from(name: String) -> Result<Self> {
        Self::new(name)
    }
}

impl From<PaletteName> for String {
    fn from(name: PaletteName) -> Self {
        name.0
    }
}

impl FromStr for PaletteName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for PaletteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// StepRef
// ---------------------------------------------------------------------------

/// A reference to one step of one palette, e.g. `primary` step 9.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepRef {
    pub palette: PaletteName,
    /// 1-based.
    pub step: usize,
}

impl StepRef {
    #[must_use]
    pub const fn new(palette: PaletteName, step: usize) -> Self {
        Self { palette, step }
    }
}

impl fmt::Display for StepRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.palette, self.step)
    }
}

// ---------------------------------------------------------------------------
// Palette / PaletteSet
// ---------------------------------------------------------------------------

/// One color family: a ramp and an alpha ramp per theme mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    #[serde(skip)]
    step_count: StepCount,
    light: Ramp,
    dark: Ramp,
    light_alpha: AlphaRamp,
    dark_alpha: AlphaRamp,
}

impl Palette {
    /// Generate both modes from one seed. Alpha ramps are built on each
    /// mode's solid step.
    #[must_use]
    pub fn generate(seed: Color, params: &RampParams) -> Self {
        let light = generate_ramp(seed, params, ThemeMode::Light);
        let dark = generate_ramp(seed, params, ThemeMode::Dark);
        let light_alpha = solid_alpha(&light, params.step_count);
        let dark_alpha = solid_alpha(&dark, params.step_count);
        Self {
            step_count: params.step_count,
            light,
            dark,
            light_alpha,
            dark_alpha,
        }
    }

    #[must_use]
    pub const fn step_count(&self) -> StepCount {
        self.step_count
    }

    #[must_use]
    pub const fn ramp(&self, mode: ThemeMode) -> &Ramp {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }

    #[must_use]
    pub const fn alpha(&self, mode: ThemeMode) -> &AlphaRamp {
        match mode {
            ThemeMode::Light => &self.light_alpha,
            ThemeMode::Dark => &self.dark_alpha,
        }
    }

    /// Replace one step of one mode. The alpha ramp follows when the solid
    /// step is replaced. `None` if `step` is out of range.
    #[must_use]
    pub fn with_step(&self, mode: ThemeMode, step: usize, color: Color) -> Option<Self> {
        let ramp = self.ramp(mode).with_step(step, color)?;
        let alpha = (step == self.step_count.solid_step())
            .then(|| generate_alpha_ramp(color, self.step_count));

        let mut next = self.clone();
        let (slot, alpha_slot) = match mode {
            ThemeMode::Light => (&mut next.light, &mut next.light_alpha),
            ThemeMode::Dark => (&mut next.dark, &mut next.dark_alpha),
        };
        *slot = ramp;
        if let Some(alpha) = alpha {
            *alpha_slot = alpha;
        }
        Some(next)
    }
}

fn solid_alpha(ramp: &Ramp, step_count: StepCount) -> AlphaRamp {
    let reference = ramp
        .step(step_count.solid_step())
        .unwrap_or_else(|| ramp.seed());
    generate_alpha_ramp(reference, step_count)
}

/// Generated palettes, keyed and ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PaletteSet(BTreeMap<PaletteName, Palette>);

impl PaletteSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a palette, returning the one it replaced.
    pub fn insert(&mut self, name: PaletteName, palette: Palette) -> Option<Palette> {
        self.0.insert(name, palette)
    }

    #[must_use]
    pub fn get(&self, name: &PaletteName) -> Option<&Palette> {
        self.0.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &PaletteName> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PaletteName, &Palette)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve a step reference for one mode.
    ///
    /// # Errors
    ///
    /// `UnresolvedReference` if the palette does not exist or the step is
    /// outside `1..=N`.
    pub fn lookup(&self, target: &StepRef, mode: ThemeMode) -> Result<Color> {
        let palette = self
            .get(&target.palette)
            .ok_or_else(|| Error::unresolved(target.to_string(), "no such palette"))?;
        let ramp = palette.ramp(mode);
        ramp.step(target.step).ok_or_else(|| {
            Error::unresolved(
                target.to_string(),
                format!("step must be within 1..={}", ramp.len()),
            )
        })
    }
}

// ---------------------------------------------------------------------------
// Semantic map / resolved colors
// ---------------------------------------------------------------------------

/// Token name to step reference, per mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SemanticMap {
    pub light: BTreeMap<String, StepRef>,
    pub dark: BTreeMap<String, StepRef>,
}

impl SemanticMap {
    #[must_use]
    pub const fn for_mode(&self, mode: ThemeMode) -> &BTreeMap<String, StepRef> {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }

    pub const fn for_mode_mut(&mut self, mode: ThemeMode) -> &mut BTreeMap<String, StepRef> {
        match mode {
            ThemeMode::Light => &mut self.light,
            ThemeMode::Dark => &mut self.dark,
        }
    }
}

/// Final token colors per mode. The only structure export consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolvedColors {
    pub light: BTreeMap<String, Color>,
    pub dark: BTreeMap<String, Color>,
}

impl ResolvedColors {
    #[must_use]
    pub const fn for_mode(&self, mode: ThemeMode) -> &BTreeMap<String, Color> {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }

    #[must_use]
    pub fn get(&self, token: &str, mode: ThemeMode) -> Option<Color> {
        self.for_mode(mode).get(token).copied()
    }

    /// Token to hex string for one mode.
    #[must_use]
    pub fn to_hex(&self, mode: ThemeMode) -> BTreeMap<String, String> {
        self.for_mode(mode)
            .iter()
            .map(|(token, color)| (token.clone(), color.to_hex()))
            .collect()
    }
}

/// Resolve every token of one mode's map against the palettes.
///
/// # Errors
///
/// `UnresolvedReference` on the first reference that misses.
pub fn resolve_semantic_colors(
    map: &BTreeMap<String, StepRef>,
    palettes: &PaletteSet,
    mode: ThemeMode,
) -> Result<BTreeMap<String, Color>> {
    map.iter()
        .map(|(token, target)| {
            palettes
                .lookup(target, mode)
                .map(|color| (token.clone(), color))
                .map_err(|err| match err {
                    Error::UnresolvedReference { target, reason } => {
                        Error::unresolved(format!("{token} -> {target}"), reason)
                    }
                    other => other,
                })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Overrides
// ---------------------------------------------------------------------------

/// The value a semantic override assigns: a literal hex or another step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverrideValue {
    Hex(String),
    Ref(StepRef),
}

impl OverrideValue {
    fn resolve(&self, palettes: &PaletteSet, mode: ThemeMode) -> Result<Color> {
        match self {
            Self::Hex(hex) => Ok(Color::from_hex(hex)?),
            Self::Ref(target) => palettes.lookup(target, mode),
        }
    }
}

/// A manual correction layered over generated values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Override {
    /// Replace one step of one palette ramp. Everything that references
    /// the step sees the new color.
    Palette {
        palette: PaletteName,
        step: usize,
        mode: ThemeMode,
        value: String,
    },
    /// Replace one resolved token. Applied last.
    Semantic {
        token: String,
        mode: ThemeMode,
        value: OverrideValue,
    },
}

impl Override {
    #[must_use]
    pub const fn mode(&self) -> ThemeMode {
        match self {
            Self::Palette { mode, .. } | Self::Semantic { mode, .. } => *mode,
        }
    }
}

/// Apply palette-scoped overrides, returning a new set. Later overrides of
/// the same step win.
///
/// # Errors
///
/// `InvalidColorFormat` for a bad hex, `UnresolvedReference` for a missing
/// palette or out-of-range step.
pub fn apply_palette_overrides(palettes: &PaletteSet, overrides: &[Override]) -> Result<PaletteSet> {
    let mut next = palettes.clone();
    let mut seen = BTreeSet::new();

    for item in overrides {
        let Override::Palette {
            palette,
            step,
            mode,
            value,
        } = item
        else {
            continue;
        };

        let target = StepRef::new(palette.clone(), *step);
        let color = Color::from_hex(value)?;
        let current = next
            .get(palette)
            .ok_or_else(|| Error::unresolved(target.to_string(), "no such palette"))?;
        let replaced = current.with_step(*mode, *step, color).ok_or_else(|| {
            Error::unresolved(
                target.to_string(),
                format!("step must be within 1..={}", current.ramp(*mode).len()),
            )
        })?;

        if !seen.insert((target.clone(), *mode)) {
            warn!(target = %target, mode = %mode, "palette step overridden more than once");
        }
        next.insert(palette.clone(), replaced);
    }

    Ok(next)
}

/// Apply semantic overrides for one mode on top of resolved colors. A token
/// absent from the map is added.
///
/// # Errors
///
/// `InvalidColorFormat` for a bad hex, `UnresolvedReference` for a step
/// reference that misses.
pub fn apply_semantic_overrides(
    resolved: &BTreeMap<String, Color>,
    overrides: &[Override],
    palettes: &PaletteSet,
    mode: ThemeMode,
) -> Result<BTreeMap<String, Color>> {
    let mut next = resolved.clone();
    let mut seen = BTreeSet::new();

    for item in overrides {
        let Override::Semantic {
            token,
            mode: target_mode,
            value,
        } = item
        else {
            continue;
        };
        if *target_mode != mode {
            continue;
        }

        let color = value.resolve(palettes, mode)?;
        if !seen.insert(token.as_str()) {
            warn!(token = %token, mode = %mode, "token overridden more than once");
        }
        next.insert(token.clone(), color);
    }

    Ok(next)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn name(s: &str) -> PaletteName {
        PaletteName::new(s).unwrap()
    }

    fn step(palette: &str, step: usize) -> StepRef {
        StepRef::new(name(palette), step)
    }

    fn palettes() -> PaletteSet {
        let mut set = PaletteSet::new();
        let params = RampParams::default();
        set.insert(
            name("primary"),
            Palette::generate(Color::from_hex("#2563eb").unwrap(), &params),
        );
        set.insert(
            name("neutral"),
            Palette::generate(Color::from_hex("#6b7280").unwrap(), &params),
        );
        set
    }

    fn light_map() -> BTreeMap<String, StepRef> {
        BTreeMap::from([
            ("primary".to_owned(), step("primary", 9)),
            ("background".to_owned(), step("neutral", 1)),
            ("text".to_owned(), step("neutral", 12)),
        ])
    }

    // ── Names and refs ──────────────────────────────────────────────

    #[test]
    fn palette_name_validation() {
        for ok in ["primary", "brand-2", "a_b", "X"] {
            assert!(PaletteName::new(ok).is_ok(), "{ok}");
        }
        for bad in ["", "2fast", "-x", "has space", "semi;colon", "ünï"] {
            assert!(matches!(PaletteName::new(bad), Err(Error::InvalidConfig(_))), "{bad}");
        }
    }

    #[test]
    fn palette_name_serde_validates() {
        assert!(serde_json::from_str::<PaletteName>("\"primary\"").is_ok());
        assert!(serde_json::from_str::<PaletteName>("\"9lives\"").is_err());
    }

    #[test]
    fn step_ref_json_shape() {
        let r: StepRef = serde_json::from_str(r#"{"palette":"primary","step":9}"#).unwrap();
        assert_eq!(r, step("primary", 9));
        assert_eq!(r.to_string(), "primary-9");
        assert!(serde_json::from_str::<StepRef>(r#"{"palette":"p","step":1,"x":0}"#).is_err());
    }

    #[test]
    fn theme_mode_parse() {
        assert_eq!("Dark".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert!("dim".parse::<ThemeMode>().is_err());
    }

    // ── Lookup and resolution ───────────────────────────────────────

    #[test]
    fn lookup_hits_ramp_step() {
        let set = palettes();
        let color = set.lookup(&step("primary", 9), ThemeMode::Light).unwrap();
        let expected = set.get(&name("primary")).unwrap().ramp(ThemeMode::Light).step(9);
        assert_eq!(Some(color), expected);
    }

    #[test]
    fn lookup_missing_palette() {
        let err = palettes()
            .lookup(&step("accent", 3), ThemeMode::Light)
            .unwrap_err();
        assert!(matches!(err, Error::UnresolvedReference { .. }));
    }

    #[test]
    fn lookup_step_out_of_range() {
        let set = palettes();
        for s in [0, 13] {
            let err = set.lookup(&step("primary", s), ThemeMode::Dark).unwrap_err();
            assert!(matches!(err, Error::UnresolvedReference { .. }), "{s}");
        }
    }

    #[test]
    fn resolve_all_tokens() {
        let set = palettes();
        let resolved = resolve_semantic_colors(&light_map(), &set, ThemeMode::Light).unwrap();
        assert_eq!(resolved.len(), 3);
        assert!(resolved["background"].l > resolved["text"].l);
    }

    #[test]
    fn resolve_reports_token() {
        let mut map = light_map();
        map.insert("accent".into(), step("accent", 9));
        let err = resolve_semantic_colors(&map, &palettes(), ThemeMode::Light).unwrap_err();
        match err {
            Error::UnresolvedReference { target, .. } => assert_eq!(target, "accent -> accent-9"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn modes_resolve_differently() {
        let set = palettes();
        let light = resolve_semantic_colors(&light_map(), &set, ThemeMode::Light).unwrap();
        let dark = resolve_semantic_colors(&light_map(), &set, ThemeMode::Dark).unwrap();
        assert_ne!(light["primary"].to_hex(), dark["primary"].to_hex());
    }

    // ── Overrides ───────────────────────────────────────────────────

    #[test]
    fn palette_override_replaces_step_without_touching_input() {
        let set = palettes();
        let before = set.lookup(&step("primary", 9), ThemeMode::Light).unwrap();
        let overrides = [Override::Palette {
            palette: name("primary"),
            step: 9,
            mode: ThemeMode::Light,
            value: "#1d4ed8".into(),
        }];
        let next = apply_palette_overrides(&set, &overrides).unwrap();

        assert_eq!(next.lookup(&step("primary", 9), ThemeMode::Light).unwrap().to_hex(), "#1d4ed8");
        assert_eq!(set.lookup(&step("primary", 9), ThemeMode::Light).unwrap(), before);
        // The other mode is untouched.
        assert_eq!(
            next.lookup(&step("primary", 9), ThemeMode::Dark).unwrap(),
            set.lookup(&step("primary", 9), ThemeMode::Dark).unwrap()
        );
    }

    #[test]
    fn solid_step_override_moves_alpha_ramp() {
        let overrides = [Override::Palette {
            palette: name("primary"),
            step: StepCount::Twelve.solid_step(),
            mode: ThemeMode::Light,
            value: "#ff0000".into(),
        }];
        let next = apply_palette_overrides(&palettes(), &overrides).unwrap();
        let alpha = next.get(&name("primary")).unwrap().alpha(ThemeMode::Light);
        assert_eq!(alpha.to_hex()[11], "#ff0000");
    }

    #[test]
    fn palette_override_errors() {
        let set = palettes();
        let bad_hex = [Override::Palette {
            palette: name("primary"),
            step: 1,
            mode: ThemeMode::Light,
            value: "blue".into(),
        }];
        assert!(matches!(
            apply_palette_overrides(&set, &bad_hex),
            Err(Error::InvalidColorFormat(_))
        ));

        let bad_step = [Override::Palette {
            palette: name("primary"),
            step: 40,
            mode: ThemeMode::Light,
            value: "#000000".into(),
        }];
        assert!(matches!(
            apply_palette_overrides(&set, &bad_step),
            Err(Error::UnresolvedReference { .. })
        ));
    }

    #[test]
    fn later_palette_override_wins() {
        let make = |hex: &str| Override::Palette {
            palette: name("neutral"),
            step: 2,
            mode: ThemeMode::Dark,
            value: hex.into(),
        };
        let next = apply_palette_overrides(&palettes(), &[make("#111111"), make("#222222")]).unwrap();
        assert_eq!(next.lookup(&step("neutral", 2), ThemeMode::Dark).unwrap().to_hex(), "#222222");
    }

    #[test]
    fn semantic_override_hex_and_ref() {
        let set = palettes();
        let resolved = resolve_semantic_colors(&light_map(), &set, ThemeMode::Light).unwrap();
        let overrides = [
            Override::Semantic {
                token: "primary".into(),
                mode: ThemeMode::Light,
                value: OverrideValue::Hex("#abcdef".into()),
            },
            Override::Semantic {
                token: "text".into(),
                mode: ThemeMode::Light,
                value: OverrideValue::Ref(step("primary", 11)),
            },
            Override::Semantic {
                token: "background".into(),
                mode: ThemeMode::Dark,
                value: OverrideValue::Hex("#000000".into()),
            },
        ];
        let next = apply_semantic_overrides(&resolved, &overrides, &set, ThemeMode::Light).unwrap();

        assert_eq!(next["primary"].to_hex(), "#abcdef");
        assert_eq!(next["text"], set.lookup(&step("primary", 11), ThemeMode::Light).unwrap());
        // Dark-mode override does not leak into light.
        assert_eq!(next["background"], resolved["background"]);
    }

    #[test]
    fn semantic_override_adds_missing_token() {
        let set = palettes();
        let overrides = [Override::Semantic {
            token: "focusRing".into(),
            mode: ThemeMode::Dark,
            value: OverrideValue::Hex("#ffcc00".into()),
        }];
        let next = apply_semantic_overrides(&BTreeMap::new(), &overrides, &set, ThemeMode::Dark).unwrap();
        assert_eq!(next["focusRing"].to_hex(), "#ffcc00");
    }

    #[test]
    fn override_json_shape() {
        let json = r##"[
            {"kind":"palette","palette":"primary","step":9,"mode":"light","value":"#1d4ed8"},
            {"kind":"semantic","token":"primary","mode":"dark","value":{"palette":"primary","step":4}},
            {"kind":"semantic","token":"text","mode":"light","value":"#111111"}
        ]"##;
        let parsed: Vec<Override> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].mode(), ThemeMode::Light);
        assert!(matches!(
            &parsed[1],
            Override::Semantic { value: OverrideValue::Ref(r), .. } if r.step == 4
        ));
        assert!(matches!(
            &parsed[2],
            Override::Semantic { value: OverrideValue::Hex(h), .. } if h == "#111111"
        ));
    }
}
