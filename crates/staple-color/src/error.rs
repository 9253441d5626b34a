// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised while parsing color input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The string is not a 6-digit hex color (`#rrggbb`, `#` optional).
    #[error("invalid color format: {input:?} (expected #rrggbb)")]
    InvalidColorFormat { input: String },
}

impl ColorError {
    pub(crate) fn invalid(input: &str) -> Self {
        Self::InvalidColorFormat {
            input: input.to_owned(),
        }
    }
}
