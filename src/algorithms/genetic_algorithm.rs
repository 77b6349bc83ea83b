//! Generational Genetic Algorithm
//!
//! This module implements the evolution loop: check the stopping condition,
//! replace the population, notify listeners, repeat.

use std::time::{Duration, Instant};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chromosome::chromosome::Chromosome;
use crate::chromosome::traits::Encoding;
use crate::error::{GeneticError, GeneticResult};
use crate::listener::ConvergenceListenerRegistry;
use crate::operators::traits::{CrossoverPolicy, MutationPolicy, SelectionPolicy};
use crate::population::population::Population;
use crate::population::reproduction::Reproduction;
use crate::termination::StoppingCondition;

/// Configuration for the genetic algorithm
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticAlgorithmConfig {
    /// Probability that a selected pair is recombined
    pub crossover_rate: f64,
    /// Probability that each child is mutated
    pub mutation_rate: f64,
    /// Fraction of the fittest chromosomes carried over unchanged
    pub elitism_rate: f64,
    /// Whether to evaluate each generation eagerly in parallel
    pub parallel_evaluation: bool,
}

impl Default for GeneticAlgorithmConfig {
    fn default() -> Self {
        Self {
            crossover_rate: 0.9,
            mutation_rate: 0.1,
            elitism_rate: 0.1,
            parallel_evaluation: true,
        }
    }
}

impl GeneticAlgorithmConfig {
    /// Check that every rate lies in [0, 1]
    pub fn validate(&self) -> GeneticResult<()> {
        GeneticError::check_rate("crossover rate", self.crossover_rate)?;
        GeneticError::check_rate("mutation rate", self.mutation_rate)?;
        GeneticError::check_rate("elitism rate", self.elitism_rate)?;
        Ok(())
    }
}

/// Outcome of an evolution run
#[derive(Clone, Debug)]
pub struct EvolutionResult<E: Encoding> {
    /// The final population
    pub population: Population<E>,
    /// The fittest chromosome seen during the whole run
    pub best: Chromosome<E>,
    /// Number of generations evolved
    pub generations: usize,
    /// Reason reported by the stopping condition
    pub termination_reason: &'static str,
    /// Wall-clock duration of the run
    pub runtime: Duration,
}

/// Generational genetic algorithm
///
/// Operators are fixed at construction; the initial population, the stopping
/// condition and the random source are supplied per run.
#[derive(Clone, Debug)]
pub struct GeneticAlgorithm<E, C, M, S>
where
    E: Encoding,
{
    reproduction: Reproduction<C, M, S>,
    config: GeneticAlgorithmConfig,
    listeners: ConvergenceListenerRegistry<E>,
}

impl<E, C, M, S> GeneticAlgorithm<E, C, M, S>
where
    E: Encoding,
    C: CrossoverPolicy<E>,
    M: MutationPolicy<E>,
    S: SelectionPolicy<E>,
{
    /// Create a new genetic algorithm
    pub fn new(
        crossover: C,
        mutation: M,
        selection: S,
        config: GeneticAlgorithmConfig,
    ) -> GeneticResult<Self> {
        config.validate()?;
        let reproduction = Reproduction::new(
            crossover,
            mutation,
            selection,
            config.crossover_rate,
            config.mutation_rate,
        )?;
        Ok(Self {
            reproduction,
            config,
            listeners: ConvergenceListenerRegistry::new(),
        })
    }

    /// Replace the listener registry
    pub fn with_listeners(mut self, listeners: ConvergenceListenerRegistry<E>) -> Self {
        self.listeners = listeners;
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &GeneticAlgorithmConfig {
        &self.config
    }

    /// Get the reproduction step
    pub fn reproduction(&self) -> &Reproduction<C, M, S> {
        &self.reproduction
    }

    /// Get the listener registry
    pub fn listeners(&self) -> &ConvergenceListenerRegistry<E> {
        &self.listeners
    }

    /// Get mutable access to the listener registry
    pub fn listeners_mut(&mut self) -> &mut ConvergenceListenerRegistry<E> {
        &mut self.listeners
    }

    /// Evolve `initial` until `stopping` is satisfied
    ///
    /// The stopping condition is checked before every replacement step, so a
    /// condition that holds for the initial population returns it unchanged
    /// after zero generations. Listeners are notified after each step.
    pub fn evolve<T, R>(
        &self,
        initial: Population<E>,
        stopping: &mut T,
        rng: &mut R,
    ) -> GeneticResult<EvolutionResult<E>>
    where
        T: StoppingCondition<E> + ?Sized,
        R: Rng,
    {
        let start_time = Instant::now();

        let mut population = initial;
        self.evaluate(&population);
        let mut best = population
            .fittest()
            .ok_or(GeneticError::EmptyPopulation)?
            .clone();

        info!(
            population_size = population.len(),
            limit = population.limit(),
            best_fitness = best.fitness(),
            "Starting evolution"
        );

        let mut generation = 0;
        while !stopping.is_satisfied(generation, &population) {
            population =
                population.next_generation(self.config.elitism_rate, &self.reproduction, rng)?;
            generation += 1;
            self.evaluate(&population);

            if let Some(fittest) = population.fittest() {
                if fittest.is_better_than(&best) {
                    best = fittest.clone();
                }
            }

            let stats = population.statistics()?;
            debug!(
                generation,
                best = stats.best,
                mean = stats.mean,
                worst = stats.worst,
                best_so_far = best.fitness(),
                "Generation complete"
            );

            self.listeners.notify_all(generation, &population);
        }

        let termination_reason = stopping.reason();
        let runtime = start_time.elapsed();
        info!(
            generations = generation,
            reason = termination_reason,
            best_fitness = best.fitness(),
            runtime_ms = runtime.as_millis() as u64,
            "Evolution finished"
        );

        Ok(EvolutionResult {
            population,
            best,
            generations: generation,
            termination_reason,
            runtime,
        })
    }

    fn evaluate(&self, population: &Population<E>) {
        if self.config.parallel_evaluation {
            population.evaluate_parallel();
        } else {
            population.evaluate();
        }
    }
}
