//! Allele bounds
//!
//! This module provides the closed interval used by the integral and
//! real-valued encodings.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::{GeneticError, GeneticResult};

/// Closed interval `[min, max]` of allowed allele values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    /// Lower bound (inclusive)
    pub min: T,
    /// Upper bound (inclusive)
    pub max: T,
}

impl<T> Bounds<T>
where
    T: PartialOrd + Copy + Display,
{
    /// Create new bounds, rejecting `min > max`
    ///
    /// `min == max` is a single-value domain.
    pub fn new(min: T, max: T) -> GeneticResult<Self> {
        // written as a negation so NaN bounds are rejected as well
        if !(min <= max) {
            return Err(GeneticError::InvalidArgument(format!(
                "Invalid bounds: min ({}) must be <= max ({})",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// Check if a value is within bounds
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp a value to be within bounds
    pub fn clamp(&self, value: T) -> T {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

impl Bounds<f64> {
    /// Unit bounds [0, 1]
    pub fn unit() -> Self {
        Self { min: 0.0, max: 1.0 }
    }

    /// Get the range (max - min)
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

impl Bounds<i64> {
    /// Number of distinct integers in the interval
    pub fn cardinality(&self) -> u64 {
        self.max.abs_diff(self.min) + 1
    }
}
