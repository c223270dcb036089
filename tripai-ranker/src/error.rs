//! Error types raised while configuring the similarity ranker.
#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors raised when score weights are unusable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankerError {
    /// A weight was NaN or infinite.
    #[error("weights must be finite (label {label}, colour {color})")]
    NonFiniteWeight {
        /// Configured label weight.
        label: f64,
        /// Configured colour weight.
        color: f64,
    },
    /// A weight was negative.
    #[error("weights must not be negative (label {label}, colour {color})")]
    NegativeWeight {
        /// Configured label weight.
        label: f64,
        /// Configured colour weight.
        color: f64,
    },
    /// The colour weight could outrank a label match.
    #[error("label weight {label} must exceed colour weight {color}")]
    ColorNotDominated {
        /// Configured label weight.
        label: f64,
        /// Configured colour weight.
        color: f64,
    },
}
