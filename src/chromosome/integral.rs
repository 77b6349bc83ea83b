//! Integral encoding
//!
//! Chromosomes whose alleles are integers within closed bounds.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chromosome::bounds::Bounds;
use crate::chromosome::traits::{sealed, Encoding};
use crate::error::{GeneticError, GeneticResult};

/// Integer allele domain `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Integral {
    bounds: Bounds<i64>,
}

impl Integral {
    /// Create an integral encoding, rejecting `min > max`
    pub fn new(min: i64, max: i64) -> GeneticResult<Self> {
        Ok(Self {
            bounds: Bounds::new(min, max)?,
        })
    }

    /// Get the allele bounds
    pub fn bounds(&self) -> Bounds<i64> {
        self.bounds
    }
}

impl sealed::Sealed for Integral {}

impl Encoding for Integral {
    type Allele = i64;

    fn name(&self) -> &'static str {
        "integral"
    }

    fn check_allele(&self, index: usize, allele: &i64) -> GeneticResult<()> {
        if self.bounds.contains(*allele) {
            Ok(())
        } else {
            Err(GeneticError::InvalidRepresentation(format!(
                "allele {} at position {} is outside [{}, {}]",
                allele, index, self.bounds.min, self.bounds.max
            )))
        }
    }

    fn random_allele<R: Rng>(&self, rng: &mut R) -> i64 {
        rng.gen_range(self.bounds.min..=self.bounds.max)
    }
}
