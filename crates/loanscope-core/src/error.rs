//! Error types for core value construction and raw payload decoding.
//!
//! The unit converters and value types never fail on malformed numbers;
//! these errors only surface when a caller explicitly validates a
//! hand-built position or decodes a raw payload.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in the core crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A position violates one of its construction invariants.
    #[error("Invalid position '{id}': {reason}")]
    InvalidPosition {
        /// The position identifier.
        id: String,
        /// Why the position is invalid.
        reason: String,
    },

    /// A raw payload could not be decoded.
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl CoreError {
    /// Create an invalid position error.
    #[must_use]
    pub fn invalid_position(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPosition {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Deserialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_position("aave-v3:0xabc:0", "borrowed amount must be positive");
        assert!(err.to_string().contains("aave-v3:0xabc:0"));
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn test_from_serde_json() {
        let parse: Result<Vec<u32>, _> = serde_json::from_str("not json");
        let err: CoreError = parse.unwrap_err().into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }
}
