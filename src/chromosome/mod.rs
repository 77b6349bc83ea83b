//! Chromosome abstractions and encodings
//!
//! This module provides the `Chromosome` type and the closed set of encodings
//! it can carry: binary, integral, real-valued and random-key.

pub mod binary;
pub mod bounds;
#[allow(clippy::module_inception)]
pub mod chromosome;
pub mod integral;
pub mod random_key;
pub mod real_valued;
pub mod traits;

pub mod prelude {
    pub use super::binary::*;
    pub use super::bounds::*;
    pub use super::chromosome::*;
    pub use super::integral::*;
    pub use super::random_key::RandomKeys;
    pub use super::real_valued::*;
    pub use super::traits::*;
}
