//! Error taxonomy of the token engine.
//!
//! Every failure is local and synchronous. Nothing is retried and no
//! partial result is ever returned alongside an error.

use staple_color::ColorError;
use thiserror::Error;

/// Errors produced by the token engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A hex string failed `^#?[0-9a-fA-F]{6}$`.
    #[error(transparent)]
    InvalidColorFormat(#[from] ColorError),

    /// A preset ramp name is not in the built-in table.
    #[error("unknown preset {name:?}")]
    UnknownPreset { name: String },

    /// A harmony type is not one of the defined variants.
    #[error("unknown harmony type {name:?}")]
    UnknownHarmonyType { name: String },

    /// A palette/step reference points at nothing.
    #[error("unresolved reference {target}: {reason}")]
    UnresolvedReference { target: String, reason: String },

    /// A builder config failed structural validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn unresolved(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            target: target.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
