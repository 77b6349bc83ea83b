//! Error types for allele-evo
//!
//! Every error here signals a misconfigured run or a broken operator contract.
//! Nothing in the engine retries or recovers from them.

use thiserror::Error;

/// Error type for chromosome, operator and engine failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeneticError {
    /// Two chromosomes (or a chromosome and a reference sequence) differ in length
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// An argument is not acceptable for the operation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A representation violates its encoding's allele domain or structure
    #[error("Invalid representation: {0}")]
    InvalidRepresentation(String),

    /// A parameter that must be > 0 was not
    #[error("{parameter} must be strictly positive, got {value}")]
    NotStrictlyPositive { parameter: &'static str, value: i64 },

    /// A parameter exceeds the limit imposed by the chromosome or population
    #[error("{parameter} ({value}) is too large, must be less than {max}")]
    TooLarge {
        parameter: &'static str,
        value: usize,
        max: usize,
    },

    /// A rate or bound lies outside its closed interval
    #[error("{parameter} ({value}) is out of range [{min}, {max}]")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// An operation needed at least one chromosome
    #[error("Empty population")]
    EmptyPopulation,
}

impl GeneticError {
    /// Check that `value` lies in the closed unit interval
    pub(crate) fn check_rate(parameter: &'static str, value: f64) -> Result<f64, Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(value)
        } else {
            Err(Self::OutOfRange {
                parameter,
                value,
                min: 0.0,
                max: 1.0,
            })
        }
    }

    /// Check that a count parameter is non-zero
    pub(crate) fn check_positive(parameter: &'static str, value: usize) -> Result<usize, Self> {
        if value == 0 {
            Err(Self::NotStrictlyPositive {
                parameter,
                value: 0,
            })
        } else {
            Ok(value)
        }
    }
}

/// Result type alias for genetic operations
pub type GeneticResult<T> = Result<T, GeneticError>;

/// Failure reported by a convergence listener
///
/// Listener failures are isolated by the registry and never abort a run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Listener failed: {0}")]
pub struct ListenerError(pub String);

impl ListenerError {
    /// Create a listener error from any message
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
