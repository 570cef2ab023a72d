//! Error types for the withholding engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing withholdings.

use thiserror::Error;

/// The main error type for the withholding engine.
///
/// Every fallible operation in the engine returns this error type. A
/// calculation either succeeds completely or fails with one of these
/// variants before any result is produced.
///
/// # Example
///
/// ```
/// use withholding_engine::error::EngineError;
///
/// let error = EngineError::UnknownProvince {
///     code: "ZZ".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown province code: ZZ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The requested province code is not one of the configured jurisdictions.
    #[error("Unknown province code: {code}")]
    UnknownProvince {
        /// The code that was requested.
        code: String,
    },

    /// The number of pay periods per year was not positive.
    #[error("Invalid pay period count: {pay_periods} (must be at least 1)")]
    InvalidPayPeriods {
        /// The rejected pay period count.
        pay_periods: u32,
    },

    /// A bracket table violated its ordering or bounds invariant.
    #[error("Invalid bracket table: {message}")]
    InvalidBracketTable {
        /// A description of the first violation found.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
