//! Chromosome type
//!
//! A chromosome is an immutable allele sequence plus a lazily computed,
//! memoized fitness value.

use std::cmp::Ordering;
use std::fmt;
use std::sync::{Arc, OnceLock};

use rand::Rng;

use crate::chromosome::traits::Encoding;
use crate::error::{GeneticError, GeneticResult};
use crate::fitness::traits::FitnessFunction;

/// Fitness function shared by every chromosome of a run
pub type SharedFitness<E> = Arc<dyn FitnessFunction<E>>;

/// A candidate solution
///
/// The representation never changes after construction, so the fitness is
/// computed at most once per instance. Cloning carries the cached value along,
/// which is what lets elites move between generations without re-evaluation.
#[derive(Clone)]
pub struct Chromosome<E: Encoding> {
    representation: Vec<E::Allele>,
    encoding: E,
    fitness_function: SharedFitness<E>,
    fitness: OnceLock<f64>,
}

impl<E: Encoding> Chromosome<E> {
    /// Create a chromosome, validating the representation against the encoding
    pub fn new(
        representation: Vec<E::Allele>,
        encoding: E,
        fitness_function: SharedFitness<E>,
    ) -> GeneticResult<Self> {
        if representation.is_empty() {
            return Err(GeneticError::InvalidRepresentation(format!(
                "{} representation must contain at least one allele",
                encoding.name()
            )));
        }
        encoding.validate(&representation)?;

        Ok(Self {
            representation,
            encoding,
            fitness_function,
            fitness: OnceLock::new(),
        })
    }

    /// Create a random chromosome of the given length
    pub fn random<R: Rng>(
        length: usize,
        encoding: E,
        fitness_function: SharedFitness<E>,
        rng: &mut R,
    ) -> GeneticResult<Self> {
        let representation = encoding.random_representation(length, rng);
        Self::new(representation, encoding, fitness_function)
    }

    /// Derive a new chromosome of the same encoding and fitness function
    ///
    /// The new representation must have the same length as this one.
    pub fn new_chromosome(&self, representation: Vec<E::Allele>) -> GeneticResult<Self> {
        if representation.len() != self.len() {
            return Err(GeneticError::InvalidRepresentation(format!(
                "expected {} alleles, got {}",
                self.len(),
                representation.len()
            )));
        }
        Self::new(
            representation,
            self.encoding.clone(),
            Arc::clone(&self.fitness_function),
        )
    }

    /// Get the alleles of this chromosome
    pub fn representation(&self) -> &[E::Allele] {
        &self.representation
    }

    /// Take the alleles out of this chromosome
    pub fn into_representation(self) -> Vec<E::Allele> {
        self.representation
    }

    /// Number of alleles
    pub fn len(&self) -> usize {
        self.representation.len()
    }

    /// Always false: a representation holds at least one allele
    pub fn is_empty(&self) -> bool {
        self.representation.is_empty()
    }

    /// Get the allele at a position
    pub fn get(&self, index: usize) -> Option<&E::Allele> {
        self.representation.get(index)
    }

    /// Get the encoding of this chromosome
    pub fn encoding(&self) -> &E {
        &self.encoding
    }

    /// Get the shared fitness function
    pub fn fitness_function(&self) -> &SharedFitness<E> {
        &self.fitness_function
    }

    /// Fitness of this chromosome, computed on first access
    ///
    /// The fitness function must not query the fitness of the chromosome it
    /// is evaluating.
    pub fn fitness(&self) -> f64 {
        *self
            .fitness
            .get_or_init(|| self.fitness_function.compute(self))
    }

    /// Check if the fitness has already been computed
    pub fn is_evaluated(&self) -> bool {
        self.fitness.get().is_some()
    }

    /// Compare by fitness (higher is better, NaN ranks lowest)
    pub fn compare_fitness(&self, other: &Self) -> Ordering {
        compare_fitness_values(self.fitness(), other.fitness())
    }

    /// Check if this chromosome is strictly fitter than another
    ///
    /// Agrees with `compare_fitness`, so a NaN fitness never wins.
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.compare_fitness(other) == Ordering::Greater
    }

    /// Check if two chromosomes carry the same representation
    pub fn is_same(&self, other: &Self) -> bool {
        self.representation == other.representation
    }
}

/// Order fitness values with NaN below every number
pub(crate) fn compare_fitness_values(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

impl<E: Encoding> fmt::Debug for Chromosome<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chromosome")
            .field("encoding", &self.encoding)
            .field("representation", &self.representation)
            .field("fitness", &self.fitness.get())
            .finish()
    }
}

impl<E: Encoding> std::ops::Index<usize> for Chromosome<E> {
    type Output = E::Allele;

    fn index(&self, index: usize) -> &Self::Output {
        &self.representation[index]
    }
}
