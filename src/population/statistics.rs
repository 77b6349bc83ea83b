//! Population statistics
//!
//! Summary statistics over the fitness values of a population.

use serde::{Deserialize, Serialize};

use crate::chromosome::chromosome::compare_fitness_values;
use crate::chromosome::traits::Encoding;
use crate::error::{GeneticError, GeneticResult};
use crate::population::population::Population;

/// Fitness summary of one population
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopulationStatistics {
    /// Number of chromosomes
    pub size: usize,
    /// Best fitness
    pub best: f64,
    /// Worst fitness
    pub worst: f64,
    /// Mean fitness
    pub mean: f64,
    /// Median fitness
    pub median: f64,
    /// Sample variance of the fitness (0 for a single chromosome)
    pub variance: f64,
    /// Fitness standard deviation
    pub std: f64,
}

impl PopulationStatistics {
    /// Compute statistics from a population
    pub fn from_population<E: Encoding>(population: &Population<E>) -> GeneticResult<Self> {
        Self::from_fitnesses(population.iter().map(|c| c.fitness()).collect())
    }

    /// Compute statistics from raw fitness values
    pub fn from_fitnesses(mut fitnesses: Vec<f64>) -> GeneticResult<Self> {
        if fitnesses.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        fitnesses.sort_by(|a, b| compare_fitness_values(*a, *b));

        let n = fitnesses.len();
        let best = fitnesses[n - 1];
        let worst = fitnesses[0];
        let mean = fitnesses.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (fitnesses[n / 2 - 1] + fitnesses[n / 2]) / 2.0
        } else {
            fitnesses[n / 2]
        };

        let variance = if n > 1 {
            fitnesses.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };

        Ok(Self {
            size: n,
            best,
            worst,
            mean,
            median,
            variance,
            std: variance.sqrt(),
        })
    }
}
