//! Contrast metrics: WCAG 2.1 ratios, APCA lightness contrast, ratings.
//!
//! Both metrics are computed from the 8-bit sRGB value a color will
//! actually be emitted as, so a token's rating matches what the browser
//! renders for its hex string.
//!
//! Readability fixes happen in OKLCH lightness (see [`ensure_readability`])
//! because those steps are perceptually even, while the pass/fail checks
//! stay in the luminance spaces the standards define.

use std::fmt;

use serde::{Deserialize, Serialize};
use staple_color::Color;
use staple_color::color::srgb_to_linear;

use crate::error::Result;

// ---------------------------------------------------------------------------
// WCAG 2.1
// ---------------------------------------------------------------------------

fn srgb8(color: Color) -> (f64, f64, f64) {
    let (r, g, b) = color.to_rgb8();
    (f64::from(r) / 255.0, f64::from(g) / 255.0, f64::from(b) / 255.0)
}

/// Relative luminance per WCAG 2.1, in [0.0, 1.0].
///
///   Y = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
#[must_use]
pub fn relative_luminance(color: Color) -> f64 {
    let (r, g, b) = srgb8(color);
    let [r, g, b] = [r, g, b].map(srgb_to_linear);
    0.0722f64.mul_add(b, 0.2126f64.mul_add(r, 0.7152 * g))
}

/// WCAG 2.1 contrast ratio, in [1.0, 21.0], symmetric in its arguments.
///
///   (`Y_lighter` + 0.05) / (`Y_darker` + 0.05)
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let (ya, yb) = (relative_luminance(a), relative_luminance(b));
    (ya.max(yb) + 0.05) / (ya.min(yb) + 0.05)
}

/// [`contrast_ratio`] for two hex strings.
///
/// # Errors
///
/// Fails with `InvalidColorFormat` if either string is malformed.
pub fn wcag_contrast_hex(fg: &str, bg: &str) -> Result<f64> {
    Ok(contrast_ratio(Color::from_hex(fg)?, Color::from_hex(bg)?))
}

/// WCAG rating for normal body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WcagRating {
    #[serde(rename = "AAA")]
    Aaa,
    #[serde(rename = "AA")]
    Aa,
    Fail,
}

impl WcagRating {
    pub const AAA_MIN: f64 = 7.0;
    pub const AA_MIN: f64 = 4.5;

    /// AAA at >= 7, AA at >= 4.5, otherwise Fail.
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= Self::AAA_MIN {
            Self::Aaa
        } else if ratio >= Self::AA_MIN {
            Self::Aa
        } else {
            Self::Fail
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aaa => "AAA",
            Self::Aa => "AA",
            Self::Fail => "Fail",
        }
    }

    #[must_use]
    pub const fn passes(self) -> bool {
        !matches!(self, Self::Fail)
    }
}

impl fmt::Display for WcagRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// APCA
// ---------------------------------------------------------------------------
//
// APCA-W3 0.0.98G-4g, the constant set published with the WCAG 3 drafts.
// Later revisions moved constants around; this one is pinned on purpose.

mod apca {
    pub const MAIN_TRC: f64 = 2.4;
    pub const R_CO: f64 = 0.212_672_9;
    pub const G_CO: f64 = 0.715_152_2;
    pub const B_CO: f64 = 0.072_175_0;

    pub const NORM_BG: f64 = 0.56;
    pub const NORM_TXT: f64 = 0.57;
    pub const REV_TXT: f64 = 0.62;
    pub const REV_BG: f64 = 0.65;

    pub const BLK_THRS: f64 = 0.022;
    pub const BLK_CLMP: f64 = 1.414;
    pub const SCALE_BOW: f64 = 1.14;
    pub const SCALE_WOB: f64 = 1.14;
    pub const LO_BOW_OFFSET: f64 = 0.027;
    pub const LO_WOB_OFFSET: f64 = 0.027;
    pub const DELTA_Y_MIN: f64 = 0.0005;
    pub const LO_CLIP: f64 = 0.1;
}

/// APCA screen luminance with the black soft clamp applied.
fn apca_luminance(color: Color) -> f64 {
    let (r, g, b) = srgb8(color);
    let y = apca::B_CO.mul_add(
        b.powf(apca::MAIN_TRC),
        apca::R_CO.mul_add(r.powf(apca::MAIN_TRC), apca::G_CO * g.powf(apca::MAIN_TRC)),
    );
    if y < apca::BLK_THRS {
        y + (apca::BLK_THRS - y).powf(apca::BLK_CLMP)
    } else {
        y
    }
}

/// APCA lightness contrast `Lc` of `text` over `bg`, roughly [-108, 106].
///
/// Positive for dark text on a light background, negative for light text
/// on a dark background. Thresholds compare against `|Lc|`.
#[must_use]
pub fn apca_contrast(text: Color, bg: Color) -> f64 {
    let y_txt = apca_luminance(text);
    let y_bg = apca_luminance(bg);

    if (y_bg - y_txt).abs() < apca::DELTA_Y_MIN {
        return 0.0;
    }

    let out = if y_bg > y_txt {
        // Normal polarity: dark text on light background.
        let sapc = (y_bg.powf(apca::NORM_BG) - y_txt.powf(apca::NORM_TXT)) * apca::SCALE_BOW;
        if sapc < apca::LO_CLIP { 0.0 } else { sapc - apca::LO_BOW_OFFSET }
    } else {
        // Reverse polarity: light text on dark background.
        let sapc = (y_bg.powf(apca::REV_BG) - y_txt.powf(apca::REV_TXT)) * apca::SCALE_WOB;
        if sapc > -apca::LO_CLIP { 0.0 } else { sapc + apca::LO_WOB_OFFSET }
    };

    out * 100.0
}

/// [`apca_contrast`] for two hex strings (text first).
///
/// # Errors
///
/// Fails with `InvalidColorFormat` if either string is malformed.
pub fn apca_contrast_hex(fg: &str, bg: &str) -> Result<f64> {
    Ok(apca_contrast(Color::from_hex(fg)?, Color::from_hex(bg)?))
}

/// What the text is used for; decides the APCA threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApcaContext {
    /// Body copy, |Lc| >= 75.
    #[default]
    BodyText,
    /// Large or bold text, |Lc| >= 60.
    LargeText,
    /// Headlines and large display text, |Lc| >= 45.
    Headline,
    /// Borders, icons, placeholders, disabled text, |Lc| >= 30.
    NonText,
}

impl ApcaContext {
    pub const ALL: [Self; 4] = [Self::BodyText, Self::LargeText, Self::Headline, Self::NonText];

    /// Minimum `|Lc|` for this context.
    #[must_use]
    pub const fn threshold(self) -> f64 {
        match self {
            Self::BodyText => 75.0,
            Self::LargeText => 60.0,
            Self::Headline => 45.0,
            Self::NonText => 30.0,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BodyText => "body-text",
            Self::LargeText => "large-text",
            Self::Headline => "headline",
            Self::NonText => "non-text",
        }
    }
}

impl fmt::Display for ApcaContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// APCA verdict for one context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApcaRating {
    Pass,
    Fail,
}

impl ApcaRating {
    #[must_use]
    pub fn from_lc(lc: f64, context: ApcaContext) -> Self {
        if lc.abs() >= context.threshold() { Self::Pass } else { Self::Fail }
    }

    #[must_use]
    pub const fn passes(self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl fmt::Display for ApcaRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
        })
    }
}

// ---------------------------------------------------------------------------
// Text color selection
// ---------------------------------------------------------------------------

/// Black or white, whichever contrasts more with `background`. Ties go to
/// black.
#[must_use]
pub fn best_text_color(background: Color) -> Color {
    if contrast_ratio(Color::BLACK, background) >= contrast_ratio(Color::WHITE, background) {
        Color::BLACK
    } else {
        Color::WHITE
    }
}

/// [`best_text_color`] on hex strings. Always returns `#000000` or
/// `#ffffff`.
///
/// # Errors
///
/// Fails with `InvalidColorFormat` if `background` is malformed.
pub fn best_text_color_hex(background: &str) -> Result<String> {
    Ok(best_text_color(Color::from_hex(background)?).to_hex())
}

const READABILITY_ROUNDS: usize = 32;

/// Adjust a foreground color's OKLCH lightness until it reaches `min_ratio`
/// against `bg`, moving as little as possible.
///
/// The direction follows [`best_text_color`]: toward white on dark
/// backgrounds, toward black on light ones. If even the extreme cannot reach
/// `min_ratio`, the extreme is returned. Hue and chroma are kept, modulo
/// gamut mapping.
#[must_use]
pub fn ensure_readability(fg: Color, bg: Color, min_ratio: f64) -> Color {
    if contrast_ratio(fg, bg) >= min_ratio {
        return fg.to_gamut();
    }

    // `t` walks lightness from fg (0) to the extreme (1). t = 0 fails.
    let extreme = best_text_color(bg).l;
    let at = |t: f64| Color::oklch((extreme - fg.l).mul_add(t, fg.l), fg.c, fg.h).to_gamut();

    let (mut failing, mut passing) = (0.0_f64, 1.0_f64);
    for _ in 0..READABILITY_ROUNDS {
        let t = (failing + passing) * 0.5;
        if contrast_ratio(at(t), bg) >= min_ratio {
            passing = t;
        } else {
            failing = t;
        }
    }
    at(passing)
}

// ---------------------------------------------------------------------------
// ContrastReport
// ---------------------------------------------------------------------------

/// Everything the contrast checker shows for one foreground/background pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastReport {
    pub foreground: String,
    pub background: String,
    /// WCAG 2.1 ratio.
    pub ratio: f64,
    pub wcag: WcagRating,
    /// Signed APCA `Lc`.
    pub lc: f64,
    /// APCA verdict per context, in [`ApcaContext::ALL`] order.
    pub apca: Vec<(ApcaContext, ApcaRating)>,
}

impl ContrastReport {
    #[must_use]
    pub fn new(fg: Color, bg: Color) -> Self {
        let ratio = contrast_ratio(fg, bg);
        let lc = apca_contrast(fg, bg);
        Self {
            foreground: fg.to_hex(),
            background: bg.to_hex(),
            ratio,
            wcag: WcagRating::from_ratio(ratio),
            lc,
            apca: ApcaContext::ALL
                .iter()
                .map(|&ctx| (ctx, ApcaRating::from_lc(lc, ctx)))
                .collect(),
        }
    }

    /// Build a report from hex strings.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidColorFormat` if either string is malformed.
    pub fn from_hex(fg: &str, bg: &str) -> Result<Self> {
        Ok(Self::new(Color::from_hex(fg)?, Color::from_hex(bg)?))
    }

    /// APCA verdict for one context.
    #[must_use]
    pub fn apca_rating(&self, context: ApcaContext) -> ApcaRating {
        ApcaRating::from_lc(self.lc, context)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
