//! Unified error types for the pqd crates.
//!
//! [`PqdError`] is the common error currency: the model's single domain
//! failure (`InvalidInput`) plus the I/O and parsing kinds the front ends
//! funnel through it. Binary crates convert to it (or wrap it in `anyhow`)
//! at their boundaries.
//!
//! # Example
//!
//! ```
//! use pqd_core::{PqdError, PqdResult};
//!
//! fn check_magnitude(s: f64) -> PqdResult<f64> {
//!     if s < 0.0 {
//!         return Err(PqdError::InvalidInput(format!(
//!             "magnitude must be >= 0, got {s}"
//!         )));
//!     }
//!     Ok(s)
//! }
//!
//! assert!(check_magnitude(-1.0).is_err());
//! ```

use thiserror::Error;

/// Unified error type for all pqd operations.
#[derive(Error, Debug)]
pub enum PqdError {
    /// Rejected model input (non-finite angle, negative magnitude, degenerate
    /// sweep or sampler parameters)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors (config files, table export)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("parse error: {0}")]
    Parse(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using PqdError.
pub type PqdResult<T> = Result<T, PqdError>;

// Conversion from anyhow::Error
impl From<anyhow::Error> for PqdError {
    fn from(err: anyhow::Error) -> Self {
        PqdError::Other(err.to_string())
    }
}

// Conversion from string-like types for convenience
impl From<String> for PqdError {
    fn from(s: String) -> Self {
        PqdError::Other(s)
    }
}

impl From<&str> for PqdError {
    fn from(s: &str) -> Self {
        PqdError::Other(s.to_string())
    }
}
