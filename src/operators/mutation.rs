//! Mutation operators
//!
//! This module provides mutation operators. Each returns a new chromosome and
//! leaves the original untouched.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::chromosome::binary::Binary;
use crate::chromosome::chromosome::Chromosome;
use crate::chromosome::integral::Integral;
use crate::chromosome::random_key::RandomKeys;
use crate::chromosome::real_valued::RealValued;
use crate::chromosome::traits::Encoding;
use crate::error::{GeneticError, GeneticResult};
use crate::operators::traits::MutationPolicy;

/// Bit-flip mutation
///
/// Flips exactly one randomly chosen allele. The rate is not used.
#[derive(Clone, Copy, Debug, Default)]
pub struct BinaryMutation;

impl MutationPolicy<Binary> for BinaryMutation {
    fn mutate<R: Rng>(
        &self,
        original: &Chromosome<Binary>,
        _rate: f64,
        rng: &mut R,
    ) -> GeneticResult<Chromosome<Binary>> {
        let mut bits = original.representation().to_vec();
        let index = rng.gen_range(0..bits.len());
        bits[index] = !bits[index];
        original.new_chromosome(bits)
    }
}

/// Swap mutation
///
/// Exchanges the alleles at two distinct positions, so a permutation stays a
/// permutation. A single-allele chromosome is returned unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct SwapMutation;

impl<E: Encoding> MutationPolicy<E> for SwapMutation {
    fn mutate<R: Rng>(
        &self,
        original: &Chromosome<E>,
        _rate: f64,
        rng: &mut R,
    ) -> GeneticResult<Chromosome<E>> {
        let length = original.len();
        if length < 2 {
            return Ok(original.clone());
        }

        let i = rng.gen_range(0..length);
        let mut j = rng.gen_range(0..length - 1);
        if j >= i {
            j += 1;
        }

        let mut alleles = original.representation().to_vec();
        alleles.swap(i, j);
        original.new_chromosome(alleles)
    }
}

// Redraw one allele from the encoding's domain
fn resample_one<E: Encoding, R: Rng>(
    original: &Chromosome<E>,
    rng: &mut R,
) -> GeneticResult<Chromosome<E>> {
    let mut alleles = original.representation().to_vec();
    let index = rng.gen_range(0..alleles.len());
    alleles[index] = original.encoding().random_allele(rng);
    original.new_chromosome(alleles)
}

/// Random-key mutation
///
/// Replaces one key with a fresh uniform draw from [0, 1).
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomKeyMutation;

impl MutationPolicy<RandomKeys> for RandomKeyMutation {
    fn mutate<R: Rng>(
        &self,
        original: &Chromosome<RandomKeys>,
        _rate: f64,
        rng: &mut R,
    ) -> GeneticResult<Chromosome<RandomKeys>> {
        resample_one(original, rng)
    }
}

/// Integral mutation
///
/// Replaces one allele with a uniform draw from the encoding bounds.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntegralMutation;

impl MutationPolicy<Integral> for IntegralMutation {
    fn mutate<R: Rng>(
        &self,
        original: &Chromosome<Integral>,
        _rate: f64,
        rng: &mut R,
    ) -> GeneticResult<Chromosome<Integral>> {
        resample_one(original, rng)
    }
}

/// Real-valued mutation
///
/// Replaces one allele with a uniform draw from the encoding bounds.
#[derive(Clone, Copy, Debug, Default)]
pub struct RealValuedMutation;

impl MutationPolicy<RealValued> for RealValuedMutation {
    fn mutate<R: Rng>(
        &self,
        original: &Chromosome<RealValued>,
        _rate: f64,
        rng: &mut R,
    ) -> GeneticResult<Chromosome<RealValued>> {
        resample_one(original, rng)
    }
}

/// Gaussian mutation
///
/// Adds Gaussian noise to each allele with a per-allele probability and
/// clamps the result to the encoding bounds.
#[derive(Clone, Copy, Debug)]
pub struct GaussianMutation {
    normal: Normal<f64>,
    /// Per-allele mutation probability (defaults to 1 / length)
    mutation_probability: Option<f64>,
}

impl GaussianMutation {
    /// Create a new Gaussian mutation with the given standard deviation
    pub fn new(sigma: f64) -> GeneticResult<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(GeneticError::InvalidArgument(format!(
                "sigma must be finite and > 0, got {}",
                sigma
            )));
        }
        let normal = Normal::new(0.0, sigma)
            .map_err(|e| GeneticError::InvalidArgument(e.to_string()))?;
        Ok(Self {
            normal,
            mutation_probability: None,
        })
    }

    /// Set a fixed mutation probability per allele
    pub fn with_probability(mut self, probability: f64) -> GeneticResult<Self> {
        self.mutation_probability =
            Some(GeneticError::check_rate("mutation probability", probability)?);
        Ok(self)
    }

    /// Standard deviation of the noise
    pub fn sigma(&self) -> f64 {
        self.normal.std_dev()
    }
}

impl MutationPolicy<RealValued> for GaussianMutation {
    fn mutate<R: Rng>(
        &self,
        original: &Chromosome<RealValued>,
        _rate: f64,
        rng: &mut R,
    ) -> GeneticResult<Chromosome<RealValued>> {
        let bounds = original.encoding().bounds();
        let prob = self
            .mutation_probability
            .unwrap_or(1.0 / original.len() as f64);

        let alleles = original
            .representation()
            .iter()
            .map(|&allele| {
                if rng.gen::<f64>() < prob {
                    bounds.clamp(allele + self.normal.sample(rng))
                } else {
                    allele
                }
            })
            .collect();
        original.new_chromosome(alleles)
    }
}
