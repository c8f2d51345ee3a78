//! Error types for recoverable failures on external input.
//!
//! Only malformed input from outside the search (position descriptions,
//! move notation, variant selectors) is reported through `StateError`.
//! Contract misuse by the caller panics instead; see the `# Panics`
//! sections on the `State` trait.

use thiserror::Error;

/// Errors reported by state construction and notation parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StateError {
    #[error("invalid position description '{description}': {reason}")]
    InvalidDescription { description: String, reason: String },

    #[error("unknown variant id {0}")]
    UnknownVariant(i32),

    #[error("unknown variant name '{0}'")]
    UnknownVariantName(String),

    #[error("malformed move notation '{notation}'")]
    MalformedNotation { notation: String },

    #[error("move '{notation}' is not legal in position '{fen}'")]
    IllegalMove { notation: String, fen: String },
}

impl StateError {
    /// Build an `InvalidDescription` error.
    pub fn invalid_description(description: &str, reason: impl Into<String>) -> Self {
        StateError::InvalidDescription {
            description: description.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for fallible state operations.
pub type Result<T> = std::result::Result<T, StateError>;
