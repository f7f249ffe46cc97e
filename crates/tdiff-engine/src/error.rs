//! Error types for the diff engine.
//!
//! Diffing itself never fails; only decoding external input does.

/// Errors that can occur while decoding deltas or options.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DiffError {
    /// A delta token was malformed.
    #[error("invalid delta token {token:?}: {reason}")]
    InvalidDelta { token: String, reason: String },

    /// A delta consumed more or less of the old text than it contains.
    #[error("delta length {consumed} does not match source text length {expected}")]
    DeltaLengthMismatch { consumed: usize, expected: usize },

    /// Percent-encoded insert text could not be decoded.
    #[error("invalid escape sequence in {0:?}")]
    InvalidEscape(String),

    /// Options could not be parsed.
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

/// Convenience alias for engine results.
pub type DiffResult<T> = Result<T, DiffError>;
