//! Benchmark fitness functions
//!
//! This module provides standard benchmark functions for exercising the
//! engine. All of them return values to be maximized.

use std::f64::consts::PI;

use crate::chromosome::binary::{bits_to_u64, Binary};
use crate::chromosome::chromosome::Chromosome;
use crate::chromosome::random_key::{argsort, RandomKeys};
use crate::chromosome::real_valued::RealValued;
use crate::fitness::traits::FitnessFunction;

/// Trait for real-valued benchmark functions
pub trait BenchmarkFunction: Send + Sync {
    /// Name of the benchmark function
    fn name(&self) -> &'static str;

    /// Search space bounds (min, max)
    fn bounds(&self) -> (f64, f64);

    /// Optimal (minimum) value of the raw objective
    fn optimal_value(&self) -> f64;

    /// Evaluate the raw objective (to be MINIMIZED)
    fn evaluate_raw(&self, x: &[f64]) -> f64;
}

/// Sphere function: f(x) = Σxᵢ²
///
/// Unimodal, convex, separable. Optimum at origin.
#[derive(Clone, Debug, Default)]
pub struct Sphere;

impl BenchmarkFunction for Sphere {
    fn name(&self) -> &'static str {
        "Sphere"
    }

    fn bounds(&self) -> (f64, f64) {
        (-5.12, 5.12)
    }

    fn optimal_value(&self) -> f64 {
        0.0
    }

    fn evaluate_raw(&self, x: &[f64]) -> f64 {
        x.iter().map(|xi| xi * xi).sum()
    }
}

impl FitnessFunction<RealValued> for Sphere {
    fn compute(&self, chromosome: &Chromosome<RealValued>) -> f64 {
        // Negate for maximization
        -self.evaluate_raw(chromosome.representation())
    }
}

/// Rastrigin function: f(x) = 10n + Σ(xᵢ² - 10cos(2πxᵢ))
///
/// Highly multimodal with many local minima. Optimum at origin.
#[derive(Clone, Debug, Default)]
pub struct Rastrigin;

impl BenchmarkFunction for Rastrigin {
    fn name(&self) -> &'static str {
        "Rastrigin"
    }

    fn bounds(&self) -> (f64, f64) {
        (-5.12, 5.12)
    }

    fn optimal_value(&self) -> f64 {
        0.0
    }

    fn evaluate_raw(&self, x: &[f64]) -> f64 {
        let a = 10.0;
        let n = x.len() as f64;
        a * n
            + x.iter()
                .map(|xi| xi * xi - a * (2.0 * PI * xi).cos())
                .sum::<f64>()
    }
}

impl FitnessFunction<RealValued> for Rastrigin {
    fn compute(&self, chromosome: &Chromosome<RealValued>) -> f64 {
        -self.evaluate_raw(chromosome.representation())
    }
}

/// OneMax function for binary chromosomes
///
/// Counts the number of 1s. Optimum when all alleles are 1.
#[derive(Clone, Debug, Default)]
pub struct OneMax;

impl FitnessFunction<Binary> for OneMax {
    fn compute(&self, chromosome: &Chromosome<Binary>) -> f64 {
        chromosome.count_ones() as f64
    }
}

/// Sorting benchmark for random-key chromosomes
///
/// The keys decode a permutation of `0..n`; the fitness is the negated sum
/// of displacements `|π(i) - i|`, so the identity permutation scores 0.
#[derive(Clone, Debug, Default)]
pub struct SortingDisplacement;

impl FitnessFunction<RandomKeys> for SortingDisplacement {
    fn compute(&self, chromosome: &Chromosome<RandomKeys>) -> f64 {
        let displacement: usize = argsort(chromosome.representation())
            .into_iter()
            .enumerate()
            .map(|(position, element)| position.abs_diff(element))
            .sum();
        -(displacement as f64)
    }
}

/// Two-dimensional multimodal function over a 24-bit binary chromosome
///
/// The first and second 12 bits decode to `x` and `y` (divided by 100), and
/// f(x, y) = (x² + y²)^0.25 · (sin²(50 · (x² + y²)^0.1) + 1), negated.
/// The global optimum 0 lies at the origin.
#[derive(Clone, Debug, Default)]
pub struct Dimension2;

impl Dimension2 {
    /// Bits per coordinate
    pub const BITS_PER_DIMENSION: usize = 12;

    /// Required chromosome length
    pub const LENGTH: usize = 2 * Self::BITS_PER_DIMENSION;

    /// Decode the two coordinates of a 24-bit representation
    pub fn decode(bits: &[bool]) -> Option<(f64, f64)> {
        if bits.len() < Self::LENGTH {
            return None;
        }
        let (x_bits, rest) = bits.split_at(Self::BITS_PER_DIMENSION);
        let x = bits_to_u64(x_bits).ok()? as f64 / 100.0;
        let y = bits_to_u64(&rest[..Self::BITS_PER_DIMENSION]).ok()? as f64 / 100.0;
        Some((x, y))
    }

    /// Raw objective value (to be minimized)
    pub fn evaluate_raw(x: f64, y: f64) -> f64 {
        let r2 = x * x + y * y;
        r2.powf(0.25) * ((50.0 * r2.powf(0.1)).sin().powi(2) + 1.0)
    }
}

impl FitnessFunction<Binary> for Dimension2 {
    fn compute(&self, chromosome: &Chromosome<Binary>) -> f64 {
        match Self::decode(chromosome.representation()) {
            Some((x, y)) => -Self::evaluate_raw(x, y),
            None => f64::NEG_INFINITY,
        }
    }
}
