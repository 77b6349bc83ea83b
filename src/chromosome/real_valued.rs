//! Real-valued encoding

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chromosome::bounds::Bounds;
use crate::chromosome::traits::{sealed, Encoding};
use crate::error::{GeneticError, GeneticResult};

/// Real allele domain `[min, max]`; alleles must be finite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RealValued {
    bounds: Bounds<f64>,
}

impl RealValued {
    /// Create a real-valued encoding
    ///
    /// Both bounds must be finite and `min <= max`.
    pub fn new(min: f64, max: f64) -> GeneticResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(GeneticError::InvalidArgument(format!(
                "Invalid bounds: [{}, {}] must be finite",
                min, max
            )));
        }
        Ok(Self {
            bounds: Bounds::new(min, max)?,
        })
    }

    /// Get the allele bounds
    pub fn bounds(&self) -> Bounds<f64> {
        self.bounds
    }
}

impl sealed::Sealed for RealValued {}

impl Encoding for RealValued {
    type Allele = f64;

    fn name(&self) -> &'static str {
        "real-valued"
    }

    fn check_allele(&self, index: usize, allele: &f64) -> GeneticResult<()> {
        if !allele.is_finite() {
            return Err(GeneticError::InvalidRepresentation(format!(
                "allele at position {} is not finite",
                index
            )));
        }
        if !self.bounds.contains(*allele) {
            return Err(GeneticError::InvalidRepresentation(format!(
                "allele {} at position {} is outside [{}, {}]",
                allele, index, self.bounds.min, self.bounds.max
            )));
        }
        Ok(())
    }

    fn random_allele<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.bounds.min..=self.bounds.max)
    }
}
