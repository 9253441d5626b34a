//! Accessibility audit of resolved token pairs.
//!
//! Each [`ContrastPair`] names a foreground and a background token plus
//! what the foreground is used for. The audit checks the pair in both modes
//! against the WCAG minimum for that use and the APCA threshold for the
//! same context, and suggests a nearby passing foreground when WCAG fails.

use serde::{Deserialize, Serialize};

use crate::builder::build_theme;
use crate::config::BuilderConfig;
use crate::contrast::{
    ApcaContext, ApcaRating, WcagRating, apca_contrast, contrast_ratio, ensure_readability,
};
use crate::error::{Error, Result};
use crate::palette::{ResolvedColors, ThemeMode};

/// WCAG minimum for large text and for non-text UI (1.4.3 / 1.4.11).
const WCAG_LARGE_MIN: f64 = 3.0;

/// A foreground token checked against a background token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContrastPair {
    pub foreground: String,
    pub background: String,
    #[serde(default)]
    pub context: ApcaContext,
}

impl ContrastPair {
    #[must_use]
    pub fn new(foreground: impl Into<String>, background: impl Into<String>, context: ApcaContext) -> Self {
        Self {
            foreground: foreground.into(),
            background: background.into(),
            context,
        }
    }
}

/// WCAG ratio a pair must reach for its context.
#[must_use]
pub const fn wcag_target(context: ApcaContext) -> f64 {
    match context {
        ApcaContext::BodyText => WcagRating::AA_MIN,
        ApcaContext::LargeText | ApcaContext::Headline | ApcaContext::NonText => WCAG_LARGE_MIN,
    }
}

/// Result of checking one pair in one mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastFinding {
    pub mode: ThemeMode,
    pub foreground: String,
    pub background: String,
    pub context: ApcaContext,
    pub ratio: f64,
    pub wcag: WcagRating,
    pub lc: f64,
    pub apca: ApcaRating,
    /// A foreground hex that reaches the WCAG target, when the current one
    /// does not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ContrastFinding {
    /// Whether the WCAG target for the context is met.
    #[must_use]
    pub fn meets_wcag(&self) -> bool {
        self.ratio >= wcag_target(self.context)
    }

    /// WCAG target met and APCA passes.
    #[must_use]
    pub fn passes(&self) -> bool {
        self.meets_wcag() && self.apca.passes()
    }
}

/// Check every pair in both modes. Findings come out light mode first,
/// then in pair order.
///
/// # Errors
///
/// `UnresolvedReference` if a pair names a token that is not resolved in
/// some mode.
pub fn audit_pairs(resolved: &ResolvedColors, pairs: &[ContrastPair]) -> Result<Vec<ContrastFinding>> {
    let mut findings = Vec::with_capacity(pairs.len() * ThemeMode::ALL.len());
    for mode in ThemeMode::ALL {
        for pair in pairs {
            findings.push(check_pair(resolved, pair, mode)?);
        }
    }
    Ok(findings)
}

fn check_pair(resolved: &ResolvedColors, pair: &ContrastPair, mode: ThemeMode) -> Result<ContrastFinding> {
    let token = |name: &str| {
        resolved
            .get(name, mode)
            .ok_or_else(|| Error::unresolved(name, format!("no such token in {mode} mode")))
    };
    let fg = token(&pair.foreground)?;
    let bg = token(&pair.background)?;

    let ratio = contrast_ratio(fg, bg);
    let lc = apca_contrast(fg, bg);
    let target = wcag_target(pair.context);
    let suggestion = (ratio < target).then(|| ensure_readability(fg, bg, target).to_hex());

    Ok(ContrastFinding {
        mode,
        foreground: pair.foreground.clone(),
        background: pair.background.clone(),
        context: pair.context,
        ratio,
        wcag: WcagRating::from_ratio(ratio),
        lc,
        apca: ApcaRating::from_lc(lc, pair.context),
        suggestion,
    })
}

/// Build a theme and audit the config's own pairs.
///
/// # Errors
///
/// Any pipeline error, or `UnresolvedReference` for a pair token.
pub fn audit_theme(config: &BuilderConfig) -> Result<Vec<ContrastFinding>> {
    let theme = build_theme(config)?;
    audit_pairs(&theme.resolved, &config.contrast_pairs)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
