//! Population management
//!
//! This module provides the Population container, the reproduction step and
//! population statistics.

#[allow(clippy::module_inception)]
pub mod population;
pub mod reproduction;
pub mod statistics;

pub mod prelude {
    pub use super::population::*;
    pub use super::reproduction::*;
    pub use super::statistics::*;
}
