//! Convergence listeners
//!
//! Listeners observe every generation of a run. A registry holds them in
//! registration order and isolates their failures: a listener that errors or
//! panics is logged and skipped, and the run continues.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::chromosome::traits::Encoding;
use crate::error::ListenerError;
use crate::population::population::Population;
use crate::population::statistics::PopulationStatistics;

/// Observer notified after each generation
pub trait ConvergenceListener<E: Encoding>: Send + Sync {
    /// Called with the generation number and the new population
    fn notify(&self, generation: usize, population: &Population<E>) -> Result<(), ListenerError>;
}

impl<E, F> ConvergenceListener<E> for F
where
    E: Encoding,
    F: Fn(usize, &Population<E>) -> Result<(), ListenerError> + Send + Sync,
{
    fn notify(&self, generation: usize, population: &Population<E>) -> Result<(), ListenerError> {
        self(generation, population)
    }
}

/// Ordered collection of listeners
///
/// The registry is a plain value owned by the caller; cloning it shares the
/// listeners.
pub struct ConvergenceListenerRegistry<E: Encoding> {
    listeners: Vec<Arc<dyn ConvergenceListener<E>>>,
}

impl<E: Encoding> ConvergenceListenerRegistry<E> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Append a listener
    pub fn register<L>(&mut self, listener: L)
    where
        L: ConvergenceListener<E> + 'static,
    {
        self.listeners.push(Arc::new(listener));
    }

    /// Append a listener the caller keeps a handle to
    pub fn register_shared(&mut self, listener: Arc<dyn ConvergenceListener<E>>) {
        self.listeners.push(listener);
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Check if no listener is registered
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Notify every listener in registration order
    ///
    /// Returns the number of listeners that failed or panicked.
    pub fn notify_all(&self, generation: usize, population: &Population<E>) -> usize {
        let mut failures = 0;
        for (index, listener) in self.listeners.iter().enumerate() {
            let outcome =
                panic::catch_unwind(AssertUnwindSafe(|| listener.notify(generation, population)));
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    failures += 1;
                    warn!(generation, listener = index, error = %e, "Convergence listener failed");
                }
                Err(payload) => {
                    failures += 1;
                    let message = if let Some(s) = payload.downcast_ref::<String>() {
                        s.clone()
                    } else if let Some(s) = payload.downcast_ref::<&str>() {
                        s.to_string()
                    } else {
                        "unknown panic".to_string()
                    };
                    error!(generation, listener = index, panic = %message, "Convergence listener panicked");
                }
            }
        }
        failures
    }
}

impl<E: Encoding> Default for ConvergenceListenerRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Encoding> Clone for ConvergenceListenerRegistry<E> {
    fn clone(&self) -> Self {
        Self {
            listeners: self.listeners.clone(),
        }
    }
}

impl<E: Encoding> fmt::Debug for ConvergenceListenerRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvergenceListenerRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Logs population statistics at `info` level
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingListener;

impl<E: Encoding> ConvergenceListener<E> for LoggingListener {
    fn notify(&self, generation: usize, population: &Population<E>) -> Result<(), ListenerError> {
        let stats = population
            .statistics()
            .map_err(|e| ListenerError::new(e.to_string()))?;
        info!(
            generation,
            size = stats.size,
            best = stats.best,
            mean = stats.mean,
            worst = stats.worst,
            "Population statistics"
        );
        Ok(())
    }
}

/// Statistics of one generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationStatistics {
    /// Generation number
    pub generation: usize,
    /// Fitness summary of the population
    pub statistics: PopulationStatistics,
}

/// Records the statistics of every generation it is notified about
#[derive(Debug, Default)]
pub struct StatisticsRecorder {
    history: Mutex<Vec<GenerationStatistics>>,
}

impl StatisticsRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the recorded history, oldest first
    pub fn history(&self) -> Vec<GenerationStatistics> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded generations
    pub fn len(&self) -> usize {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// History of the best fitness values
    pub fn best_fitness_history(&self) -> Vec<f64> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|g| g.statistics.best)
            .collect()
    }
}

impl<E: Encoding> ConvergenceListener<E> for StatisticsRecorder {
    fn notify(&self, generation: usize, population: &Population<E>) -> Result<(), ListenerError> {
        let statistics = population
            .statistics()
            .map_err(|e| ListenerError::new(e.to_string()))?;
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(GenerationStatistics {
                generation,
                statistics,
            });
        Ok(())
    }
}

pub mod prelude {
    pub use super::{
        ConvergenceListener, ConvergenceListenerRegistry, GenerationStatistics, LoggingListener,
        StatisticsRecorder,
    };
}
