//! Error types for reward estimation.

use thiserror::Error;

/// Result type for estimator operations
pub type Result<T> = std::result::Result<T, ComputationError>;

/// Degenerate numeric input to the estimator.
///
/// Expected inputs (unloaded account, zero stake, zero power) are never
/// errors; they estimate to zero.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputationError {
    /// A denominator evaluated to exactly zero
    #[error("Division by zero in {term}")]
    DivisionByZero { term: &'static str },

    /// An intermediate or final value was NaN or infinite
    #[error("Non-finite value in {term}")]
    NonFinite { term: &'static str },
}

/// Failure to parse an `"<amount> <SYMBOL>"` asset string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetParseError {
    /// Input had no amount token
    #[error("Asset string has no amount")]
    MissingAmount,

    /// Amount token was not a finite number
    #[error("Invalid asset amount: {0}")]
    InvalidAmount(String),
}

/// Reject NaN and infinities under the given term name.
pub(crate) fn finite(term: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ComputationError::NonFinite { term })
    }
}

/// Divide, failing on an exactly-zero denominator or a non-finite quotient.
pub(crate) fn checked_div(term: &'static str, numerator: f64, denominator: f64) -> Result<f64> {
    if denominator == 0.0 {
        return Err(ComputationError::DivisionByZero { term });
    }
    finite(term, numerator / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_div() {
        assert_eq!(checked_div("ratio", 6.0, 3.0), Ok(2.0));
        assert_eq!(
            checked_div("ratio", 1.0, 0.0),
            Err(ComputationError::DivisionByZero { term: "ratio" })
        );
        assert_eq!(
            checked_div("ratio", f64::MAX, f64::MIN_POSITIVE),
            Err(ComputationError::NonFinite { term: "ratio" })
        );
    }

    #[test]
    fn test_finite_rejects_nan() {
        assert!(finite("value", f64::NAN).is_err());
        assert!(finite("value", f64::NEG_INFINITY).is_err());
        assert_eq!(finite("value", -1.5), Ok(-1.5));
    }
}
