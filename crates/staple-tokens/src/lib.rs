//! # staple-tokens: color token engine for staple-css
//!
//! Turns a handful of seed colors into a complete, accessible set of
//! semantic color tokens for light and dark mode.
//!
//! # Architecture
//!
//! ```text
//! BuilderConfig (seeds + params + semantic map + overrides)
//!     │
//!     ▼
//! ramp.rs / preset.rs:  seed → 12/16-step ramps + alpha ramps per mode
//!     │
//!     ▼
//! palette.rs:  palette overrides → semantic resolution → semantic overrides
//!     │
//!     ▼
//! builder.rs:  the whole pipeline, always run end to end
//!     │
//!     ▼
//! export.rs:   CSS custom properties, JSON, TypeScript module
//! ```
//!
//! Side modules: [`harmony`] for companion hues, [`contrast`] for WCAG 2.1
//! and APCA, [`audit`] for checking token pairs, [`gradient`] for OKLCH
//! gradient stops.
//!
//! # Color Space
//!
//! All generation happens in OKLCH via [`staple_color::Color`]. Colors are
//! gamut-mapped by chroma reduction before they become hex strings, so
//! lightness curves survive intact.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Step indices become float interpolation parameters.
#![allow(clippy::cast_precision_loss)]

pub mod audit;
pub mod builder;
pub mod config;
pub mod contrast;
pub mod error;
pub mod export;
pub mod gradient;
pub mod harmony;
pub mod palette;
pub mod preset;
pub mod ramp;

pub use audit::{ContrastFinding, ContrastPair, audit_theme};
pub use builder::{BuiltTheme, build_theme, generate_palettes};
pub use config::{BuilderConfig, ConfigEdit, PaletteParams, Seed};
pub use contrast::{ApcaContext, ContrastReport, WcagRating};
pub use error::{Error, Result};
pub use export::ExportFormat;
pub use harmony::{HarmonySet, HarmonyType, generate_harmony};
pub use palette::{
    Override, OverrideValue, PaletteName, PaletteSet, ResolvedColors, SemanticMap, StepRef,
    ThemeMode,
};
pub use ramp::{AlphaRamp, Ramp, RampAlgorithm, RampParams, StepCount, generate_ramp};
