// SPDX-License-Identifier: MIT
//
// staple-color: the color-space layer of the staple-css Token Studio.
//
// Everything the token engine computes starts and ends here: seeds arrive
// as `#rrggbb` strings, get lifted into OKLCH for perceptual math, and go
// back out as hex for CSS. HSL exists only for the picker sliders.
//
// Pure functions over plain `Copy` data, with one error type.

pub mod color;
pub mod error;
pub mod hsl;

pub use color::{Color, hex_to_oklch, oklch_to_hex};
pub use error::ColorError;
pub use hsl::{Hsl, hex_to_hsl, hsl_to_hex};
