//! Binary encoding
//!
//! Chromosomes over the alphabet {0, 1}, stored as `bool` alleles.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chromosome::chromosome::{Chromosome, SharedFitness};
use crate::chromosome::traits::{sealed, Encoding};
use crate::error::{GeneticError, GeneticResult};

/// Binary allele domain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binary;

impl sealed::Sealed for Binary {}

impl Encoding for Binary {
    type Allele = bool;

    fn name(&self) -> &'static str {
        "binary"
    }

    fn check_allele(&self, _index: usize, _allele: &bool) -> GeneticResult<()> {
        Ok(())
    }

    fn random_allele<R: Rng>(&self, rng: &mut R) -> bool {
        rng.gen()
    }
}

impl Binary {
    /// Parse alleles from 0/1 digits
    ///
    /// Any other value is rejected with `InvalidRepresentation`.
    pub fn from_digits(digits: &[u8]) -> GeneticResult<Vec<bool>> {
        digits
            .iter()
            .enumerate()
            .map(|(i, &d)| match d {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(GeneticError::InvalidRepresentation(format!(
                    "binary allele at position {} must be 0 or 1, got {}",
                    i, other
                ))),
            })
            .collect()
    }
}

/// Interpret a bit slice as an unsigned integer, most significant bit first
pub fn bits_to_u64(bits: &[bool]) -> GeneticResult<u64> {
    if bits.len() > 64 {
        return Err(GeneticError::TooLarge {
            parameter: "bit count",
            value: bits.len(),
            max: 65,
        });
    }
    Ok(bits
        .iter()
        .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit)))
}

impl Chromosome<Binary> {
    /// Create a binary chromosome from 0/1 digits
    pub fn from_digits(digits: &[u8], fitness_function: SharedFitness<Binary>) -> GeneticResult<Self> {
        Self::new(Binary::from_digits(digits)?, Binary, fitness_function)
    }

    /// Count the set alleles
    pub fn count_ones(&self) -> usize {
        self.representation().iter().filter(|&&b| b).count()
    }
}

impl fmt::Display for Chromosome<Binary> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in self.representation() {
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}
