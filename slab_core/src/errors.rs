//! # Error Types
//!
//! Structured error types for slab_core. Hard errors abort a design call with
//! no partial result; everything non-fatal is reported as a
//! [`DesignWarning`](crate::calculations::DesignWarning) on the result instead.
//!
//! ## Example
//!
//! ```rust
//! use slab_core::errors::{CalcError, CalcResult};
//!
//! fn validate_span(span_m: f64) -> CalcResult<()> {
//!     if span_m <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "clear_span_m",
//!             span_m.to_string(),
//!             "Span must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_span(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for slab_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for design operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-positive span, empty bar catalogue, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The section cannot carry the moment as singly reinforced at this depth
    #[error("Insufficient depth: Mu = {moment_knm:.3} kN·m/m at d = {d_mm:.1} mm - {reason}")]
    InsufficientDepth {
        moment_knm: f64,
        d_mm: f64,
        reason: String,
    },

    /// A code table was malformed at construction time
    #[error("Invalid table '{table}': {reason}")]
    InvalidTable { table: String, reason: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InsufficientDepth error. `moment_nmm` is converted to kN·m for display.
    pub fn insufficient_depth(moment_nmm: f64, d_mm: f64, reason: impl Into<String>) -> Self {
        CalcError::InsufficientDepth {
            moment_knm: moment_nmm / 1.0e6,
            d_mm,
            reason: reason.into(),
        }
    }

    /// Create an InvalidTable error
    pub fn invalid_table(table: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidTable {
            table: table.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError { reason: reason.into() }
    }

    /// Check if the caller can retry with different geometry.
    ///
    /// Only an insufficient depth is recoverable: a deeper section (or
    /// compression steel) will carry the moment.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::InsufficientDepth { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InsufficientDepth { .. } => "INSUFFICIENT_DEPTH",
            CalcError::InvalidTable { .. } => "INVALID_TABLE",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("clear_span_m", "-4.0", "Span must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
        assert!(json.contains("InvalidInput"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::invalid_table("t27", "too short").error_code(), "INVALID_TABLE");
        assert_eq!(
            CalcError::insufficient_depth(20.0e6, 20.0, "negative discriminant").error_code(),
            "INSUFFICIENT_DEPTH"
        );
    }

    #[test]
    fn test_insufficient_depth_display() {
        let err = CalcError::insufficient_depth(20.0e6, 20.0, "negative discriminant");
        let text = err.to_string();
        assert!(text.contains("20.000 kN·m/m"));
        assert!(text.contains("d = 20.0 mm"));
        assert!(err.is_recoverable());
        assert!(!CalcError::invalid_input("x", "0", "bad").is_recoverable());
    }
}
