//! Theme export and import: CSS custom properties, JSON, TypeScript.
//!
//! Every format is a pass-through serialization. CSS carries the resolved
//! token colors; JSON and TypeScript carry the full [`BuilderConfig`] so a
//! theme can be loaded back into the builder.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use staple_color::Color;
use tracing::debug;

use crate::builder::build_theme;
use crate::config::BuilderConfig;
use crate::error::{Error, Result};
use crate::palette::ResolvedColors;

const DARK_MEDIA: &str = "@media (prefers-color-scheme: dark)";
const TS_CONST: &str = "themeConfig";
const TS_TYPE: &str = "ThemeConfig";

static CSS_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"--([A-Za-z][A-Za-z0-9_-]*)\s*:\s*([^;]*);").expect("css declaration regex")
});

static TS_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)export\s+const\s+[A-Za-z_$][A-Za-z0-9_$]*\s*(?::[^=]*)?=\s*(\{.*\})\s*as\s+const\s*;?")
        .expect("typescript literal regex")
});

// ---------------------------------------------------------------------------
// ExportFormat
// ---------------------------------------------------------------------------

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Css,
    Json,
    TypeScript,
}

impl ExportFormat {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Json => "json",
            Self::TypeScript => "ts",
        }
    }

    /// Conventional file extension, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        self.name()
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "css" => Ok(Self::Css),
            "json" => Ok(Self::Json),
            "ts" | "typescript" => Ok(Self::TypeScript),
            _ => Err(Error::config(format!("unknown export format {s:?}"))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Build the theme and export it. JSON and TypeScript carry the config
/// itself, but only a config that builds is ever written out.
///
/// # Errors
///
/// Any pipeline error; serialization errors as `InvalidConfig`.
pub fn export(config: &BuilderConfig, format: ExportFormat) -> Result<String> {
    let theme = build_theme(config)?;
    debug!(
        format = %format,
        light = theme.resolved.light.len(),
        dark = theme.resolved.dark.len(),
        "exporting theme"
    );
    match format {
        ExportFormat::Css => Ok(to_css(&theme.resolved)),
        ExportFormat::Json => to_json(config),
        ExportFormat::TypeScript => to_typescript(config),
    }
}

/// Light tokens in `:root`, dark tokens in a `prefers-color-scheme` block.
#[must_use]
pub fn to_css(resolved: &ResolvedColors) -> String {
    let mut out = String::new();
    write_block(&mut out, ":root", &resolved.light, "");
    out.push('\n');
    let _ = writeln!(out, "{DARK_MEDIA} {{");
    write_block(&mut out, ":root", &resolved.dark, "  ");
    out.push_str("}\n");
    out
}

fn write_block(out: &mut String, selector: &str, tokens: &BTreeMap<String, Color>, indent: &str) {
    let _ = writeln!(out, "{indent}{selector} {{");
    for (token, color) in tokens {
        let _ = writeln!(out, "{indent}  --{token}: {};", color.to_hex());
    }
    let _ = writeln!(out, "{indent}}}");
}

/// Pretty-printed JSON of the whole config.
///
/// # Errors
///
/// `InvalidConfig` if serialization fails.
pub fn to_json(config: &BuilderConfig) -> Result<String> {
    serde_json::to_string_pretty(config)
        .map_err(|e| Error::config(format!("cannot serialize config: {e}")))
}

/// A TypeScript module exporting the config as a `const` literal plus its
/// type.
///
/// # Errors
///
/// `InvalidConfig` if serialization fails.
pub fn to_typescript(config: &BuilderConfig) -> Result<String> {
    let json = to_json(config)?;
    Ok(format!(
        "export const {TS_CONST} = {json} as const;\n\nexport type {TS_TYPE} = typeof {TS_CONST};\n"
    ))
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// Parse a config from JSON. The result is not validated.
///
/// # Errors
///
/// `InvalidConfig` with the parser's message.
pub fn config_from_json(input: &str) -> Result<BuilderConfig> {
    serde_json::from_str(input).map_err(|e| Error::config(format!("cannot parse config: {e}")))
}

/// Parse a config from a module written by [`to_typescript`].
///
/// # Errors
///
/// `InvalidConfig` if no `export const … = {…} as const` is found or the
/// literal is not valid config JSON.
pub fn config_from_typescript(input: &str) -> Result<BuilderConfig> {
    let literal = TS_LITERAL
        .captures(input)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| Error::config("no `export const … as const` literal found"))?;
    config_from_json(literal.as_str())
}

/// Read resolved colors back from CSS written by [`to_css`].
///
/// Declarations before the dark media query are light tokens, those after
/// it are dark tokens.
///
/// # Errors
///
/// `InvalidColorFormat` for a declaration whose value is not `#rrggbb`.
pub fn resolved_from_css(input: &str) -> Result<ResolvedColors> {
    let (light, dark) = input
        .find(DARK_MEDIA)
        .map_or((input, ""), |at| input.split_at(at));
    Ok(ResolvedColors {
        light: declarations(light)?,
        dark: declarations(dark)?,
    })
}

fn declarations(css: &str) -> Result<BTreeMap<String, Color>> {
    CSS_DECL
        .captures_iter(css)
        .map(|caps| {
            let color = Color::from_hex(caps[2].trim())?;
            Ok((caps[1].to_owned(), color))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
