//! Stopping conditions
//!
//! This module provides the predicates that end an evolution run. They are
//! checked once per generation, before the population is replaced.

use std::time::{Duration, Instant};

use crate::chromosome::traits::Encoding;
use crate::error::{GeneticError, GeneticResult};
use crate::population::population::Population;

/// Stopping condition trait
///
/// Conditions take `&mut self` so they may track the history they have seen
/// across checks.
pub trait StoppingCondition<E: Encoding>: Send {
    /// Check if evolution should stop at this generation
    fn is_satisfied(&mut self, generation: usize, population: &Population<E>) -> bool;

    /// Get a description of why evolution stopped
    fn reason(&self) -> &'static str;
}

impl<E: Encoding, T: StoppingCondition<E> + ?Sized> StoppingCondition<E> for Box<T> {
    fn is_satisfied(&mut self, generation: usize, population: &Population<E>) -> bool {
        (**self).is_satisfied(generation, population)
    }

    fn reason(&self) -> &'static str {
        (**self).reason()
    }
}

/// Stop after a fixed number of generations
#[derive(Clone, Debug)]
pub struct FixedGenerationCount {
    generations: usize,
}

impl FixedGenerationCount {
    /// Create a new generation count condition; `generations` must be > 0
    pub fn new(generations: usize) -> GeneticResult<Self> {
        Ok(Self {
            generations: GeneticError::check_positive("generation count", generations)?,
        })
    }

    /// Number of generations to evolve
    pub fn generations(&self) -> usize {
        self.generations
    }
}

impl<E: Encoding> StoppingCondition<E> for FixedGenerationCount {
    fn is_satisfied(&mut self, generation: usize, _population: &Population<E>) -> bool {
        generation >= self.generations
    }

    fn reason(&self) -> &'static str {
        "Maximum generations reached"
    }
}

/// Stop once a wall-clock duration has elapsed since construction
#[derive(Clone, Debug)]
pub struct FixedElapsedTime {
    duration: Duration,
    started: Instant,
}

impl FixedElapsedTime {
    /// Create a new elapsed time condition; the clock starts now
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            started: Instant::now(),
        }
    }

    /// Time left before the condition is satisfied
    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.started.elapsed())
    }
}

impl<E: Encoding> StoppingCondition<E> for FixedElapsedTime {
    fn is_satisfied(&mut self, _generation: usize, _population: &Population<E>) -> bool {
        self.started.elapsed() >= self.duration
    }

    fn reason(&self) -> &'static str {
        "Time limit reached"
    }
}

/// Stop once the fittest chromosome reaches a threshold
///
/// An empty population never satisfies the condition.
#[derive(Clone, Debug)]
pub struct FitnessThreshold {
    threshold: f64,
    maximize: bool,
}

impl FitnessThreshold {
    /// Satisfied when the best fitness is at least `threshold`
    pub fn maximize(threshold: f64) -> Self {
        Self {
            threshold,
            maximize: true,
        }
    }

    /// Satisfied when the best fitness is at most `threshold`
    pub fn minimize(threshold: f64) -> Self {
        Self {
            threshold,
            maximize: false,
        }
    }
}

impl<E: Encoding> StoppingCondition<E> for FitnessThreshold {
    fn is_satisfied(&mut self, _generation: usize, population: &Population<E>) -> bool {
        match population.fittest() {
            Some(best) if self.maximize => best.fitness() >= self.threshold,
            Some(best) => best.fitness() <= self.threshold,
            None => false,
        }
    }

    fn reason(&self) -> &'static str {
        "Target fitness reached"
    }
}

// Counts consecutive checks that observed the same value
#[derive(Clone, Debug)]
struct Plateau {
    limit: usize,
    last: Option<f64>,
    unchanged: usize,
}

impl Plateau {
    fn new(limit: usize) -> GeneticResult<Self> {
        Ok(Self {
            limit: GeneticError::check_positive("unchanged generations", limit)?,
            last: None,
            unchanged: 0,
        })
    }

    fn observe(&mut self, value: Option<f64>) -> bool {
        let Some(value) = value else {
            return false;
        };
        if self.last == Some(value) {
            self.unchanged += 1;
        } else {
            self.last = Some(value);
            self.unchanged = 0;
        }
        self.unchanged >= self.limit
    }
}

/// Stop when the best fitness has not changed for `n` consecutive checks
#[derive(Clone, Debug)]
pub struct UnchangedBestFitness {
    plateau: Plateau,
}

impl UnchangedBestFitness {
    /// Create a new condition; `generations` must be > 0
    pub fn new(generations: usize) -> GeneticResult<Self> {
        Ok(Self {
            plateau: Plateau::new(generations)?,
        })
    }
}

impl<E: Encoding> StoppingCondition<E> for UnchangedBestFitness {
    fn is_satisfied(&mut self, _generation: usize, population: &Population<E>) -> bool {
        self.plateau
            .observe(population.fittest().map(|best| best.fitness()))
    }

    fn reason(&self) -> &'static str {
        "Best fitness unchanged"
    }
}

/// Stop when the mean fitness has not changed for `n` consecutive checks
#[derive(Clone, Debug)]
pub struct UnchangedMeanFitness {
    plateau: Plateau,
}

impl UnchangedMeanFitness {
    /// Create a new condition; `generations` must be > 0
    pub fn new(generations: usize) -> GeneticResult<Self> {
        Ok(Self {
            plateau: Plateau::new(generations)?,
        })
    }
}

impl<E: Encoding> StoppingCondition<E> for UnchangedMeanFitness {
    fn is_satisfied(&mut self, _generation: usize, population: &Population<E>) -> bool {
        self.plateau
            .observe(population.statistics().ok().map(|stats| stats.mean))
    }

    fn reason(&self) -> &'static str {
        "Mean fitness unchanged"
    }
}

/// Combine conditions with OR logic (any one stops evolution)
///
/// Every condition is checked on each call so stateful conditions see every
/// generation.
pub struct AnyOf<E: Encoding> {
    conditions: Vec<Box<dyn StoppingCondition<E>>>,
    satisfied: Option<&'static str>,
}

impl<E: Encoding> AnyOf<E> {
    /// Create a new AnyOf combinator
    pub fn new(conditions: Vec<Box<dyn StoppingCondition<E>>>) -> Self {
        Self {
            conditions,
            satisfied: None,
        }
    }
}

impl<E: Encoding> StoppingCondition<E> for AnyOf<E> {
    fn is_satisfied(&mut self, generation: usize, population: &Population<E>) -> bool {
        let mut satisfied = None;
        for condition in &mut self.conditions {
            if condition.is_satisfied(generation, population) && satisfied.is_none() {
                satisfied = Some(condition.reason());
            }
        }
        self.satisfied = satisfied;
        satisfied.is_some()
    }

    fn reason(&self) -> &'static str {
        self.satisfied.unwrap_or("One of multiple conditions met")
    }
}

/// Combine conditions with AND logic (all must hold to stop evolution)
///
/// An empty combinator is never satisfied.
pub struct AllOf<E: Encoding> {
    conditions: Vec<Box<dyn StoppingCondition<E>>>,
}

impl<E: Encoding> AllOf<E> {
    /// Create a new AllOf combinator
    pub fn new(conditions: Vec<Box<dyn StoppingCondition<E>>>) -> Self {
        Self { conditions }
    }
}

impl<E: Encoding> StoppingCondition<E> for AllOf<E> {
    fn is_satisfied(&mut self, generation: usize, population: &Population<E>) -> bool {
        let mut all = !self.conditions.is_empty();
        for condition in &mut self.conditions {
            all &= condition.is_satisfied(generation, population);
        }
        all
    }

    fn reason(&self) -> &'static str {
        "All conditions met"
    }
}

pub mod prelude {
    pub use super::{
        AllOf, AnyOf, FitnessThreshold, FixedElapsedTime, FixedGenerationCount,
        StoppingCondition, UnchangedBestFitness, UnchangedMeanFitness,
    };
}
