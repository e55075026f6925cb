//! Error types for tally_widgets
//!
//! The widget API itself is infallible; these errors come from parsing and
//! validating counter requests read from text or config files.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CountError {
    #[error("unknown display kind '{0}' (expected integer or decimal)")]
    UnknownDisplayKind(String),

    /// A start or end value that is NaN or infinite
    #[error("counter {name} must be finite, got {value}")]
    NonFiniteBound { name: &'static str, value: f32 },

    /// Durations must be finite and non-negative
    #[error("duration must be a non-negative number of seconds, got {0}")]
    InvalidDuration(f32),
}

/// Result type for tally_widgets operations
pub type Result<T> = std::result::Result<T, CountError>;
