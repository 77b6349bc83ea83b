//! Core encoding trait
//!
//! An `Encoding` describes the allele domain of a chromosome and carries the
//! validator for that domain. The set of encodings is closed: only the types
//! in this crate implement it.

use std::fmt::Debug;

use rand::Rng;

use crate::error::GeneticResult;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// Allele domain and validator of a chromosome representation.
///
/// Encodings are small value types (a unit struct or a pair of bounds) that
/// every chromosome of a run carries a copy of. Operators that only make sense
/// for one encoding implement their trait for that encoding alone, so feeding
/// them the wrong kind of chromosome does not compile.
pub trait Encoding: sealed::Sealed + Clone + Debug + Send + Sync + 'static {
    /// The allele type stored at each position
    type Allele: Clone + PartialEq + Debug + Send + Sync + 'static;

    /// Short name used in error messages and logs
    fn name(&self) -> &'static str;

    /// Check a single allele against the encoding's domain
    fn check_allele(&self, index: usize, allele: &Self::Allele) -> GeneticResult<()>;

    /// Draw a random allele from the encoding's domain
    fn random_allele<R: Rng>(&self, rng: &mut R) -> Self::Allele;

    /// Validate a full representation
    fn validate(&self, representation: &[Self::Allele]) -> GeneticResult<()> {
        representation
            .iter()
            .enumerate()
            .try_for_each(|(index, allele)| self.check_allele(index, allele))
    }

    /// Draw a random representation of the given length
    fn random_representation<R: Rng>(&self, length: usize, rng: &mut R) -> Vec<Self::Allele> {
        (0..length).map(|_| self.random_allele(rng)).collect()
    }
}
