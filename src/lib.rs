//! # allele-evo
//!
//! A generic, operator-pluggable genetic algorithm engine for Rust.
//!
//! A population of chromosomes is evolved generation by generation with
//! selection, crossover and mutation operators until a stopping condition
//! holds, while the fittest chromosome seen so far is tracked.
//!
//! ## Core Concepts
//!
//! - **Encodings**: binary, integral, real-valued and random-key chromosomes,
//!   each validated against its allele domain
//! - **Memoized fitness**: a chromosome computes its fitness at most once
//! - **Pluggable operators**: crossover, mutation and selection are traits
//!   generic over the encoding, so mismatched operators do not compile
//! - **Explicit randomness**: every operator draws from a caller-supplied `Rng`
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use allele_evo::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! let ga = GeneticAlgorithm::new(
//!     OnePointCrossover,
//!     BinaryMutation,
//!     TournamentSelection::binary(),
//!     GeneticAlgorithmConfig::default(),
//! )?;
//!
//! let initial = Population::random(50, 24, Binary, Arc::new(OneMax), &mut rng)?;
//! let mut stopping = FixedGenerationCount::new(100)?;
//! let result = ga.evolve(initial, &mut stopping, &mut rng)?;
//!
//! println!("best: {} ({})", result.best, result.best.fitness());
//! # Ok::<(), allele_evo::error::GeneticError>(())
//! ```

pub mod algorithms;
pub mod chromosome;
pub mod error;
pub mod fitness;
pub mod listener;
pub mod operators;
pub mod population;
pub mod termination;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::prelude::*;
    pub use crate::chromosome::prelude::*;
    pub use crate::error::*;
    pub use crate::fitness::prelude::*;
    pub use crate::listener::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::population::prelude::*;
    pub use crate::termination::prelude::*;
}
