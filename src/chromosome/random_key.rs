//! Random-key encoding
//!
//! A random-key chromosome is a vector of keys in `[0, 1]` that encodes a
//! permutation: sorting the keys and reading off the original positions gives
//! the order in which the elements of a reference sequence are arranged.
//!
//! Since any key vector decodes to a valid permutation, ordinary crossover
//! and mutation operators can be applied without repair.

use std::cmp::Ordering;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chromosome::chromosome::Chromosome;
use crate::chromosome::traits::{sealed, Encoding};
use crate::error::{GeneticError, GeneticResult};

/// Random-key allele domain: finite keys in `[0, 1]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomKeys;

impl sealed::Sealed for RandomKeys {}

impl Encoding for RandomKeys {
    type Allele = f64;

    fn name(&self) -> &'static str {
        "random-key"
    }

    fn check_allele(&self, index: usize, allele: &f64) -> GeneticResult<()> {
        if allele.is_finite() && (0.0..=1.0).contains(allele) {
            Ok(())
        } else {
            Err(GeneticError::InvalidRepresentation(format!(
                "key {} at position {} is not in [0, 1]",
                allele, index
            )))
        }
    }

    fn random_allele<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.gen::<f64>()
    }
}

/// Generate `length` keys drawn uniformly from `[0, 1)`
pub fn random_keys<R: Rng>(length: usize, rng: &mut R) -> Vec<f64> {
    RandomKeys.random_representation(length, rng)
}

/// Keys that decode to the reference sequence unchanged
pub fn identity_keys(length: usize) -> Vec<f64> {
    (0..length).map(|i| i as f64 / length as f64).collect()
}

/// Indices of `keys` in ascending key order; equal keys keep their positions
pub(crate) fn argsort(keys: &[f64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..keys.len()).collect();
    indices.sort_by(|&a, &b| keys[a].total_cmp(&keys[b]));
    indices
}

/// Apply the permutation encoded by `keys` to `reference`
///
/// Element `i` of the result is the reference element whose key has rank `i`.
pub fn decode<T: Clone>(keys: &[f64], reference: &[T]) -> GeneticResult<Vec<T>> {
    if keys.len() != reference.len() {
        return Err(GeneticError::DimensionMismatch {
            expected: keys.len(),
            actual: reference.len(),
        });
    }
    Ok(argsort(keys)
        .into_iter()
        .map(|i| reference[i].clone())
        .collect())
}

/// Keys that decode `original` into `permuted`
///
/// `permuted` must be a rearrangement of `original`. Repeated elements are
/// matched to their occurrences in `original` from left to right.
pub fn keys_for_permutation<T: PartialEq>(original: &[T], permuted: &[T]) -> GeneticResult<Vec<f64>> {
    if original.len() != permuted.len() {
        return Err(GeneticError::DimensionMismatch {
            expected: original.len(),
            actual: permuted.len(),
        });
    }

    let length = original.len();
    let mut taken = vec![false; length];
    let mut keys = vec![0.0; length];
    for (rank, element) in permuted.iter().enumerate() {
        let index = original
            .iter()
            .enumerate()
            .position(|(j, candidate)| !taken[j] && candidate == element)
            .ok_or_else(|| {
                GeneticError::InvalidRepresentation(format!(
                    "element at position {} of the permuted sequence has no unused match in the original",
                    rank
                ))
            })?;
        taken[index] = true;
        keys[index] = rank as f64 / length as f64;
    }
    Ok(keys)
}

/// Keys that decode `data` into its order under `compare`
pub fn comparator_keys<T, F>(data: &[T], mut compare: F) -> GeneticResult<Vec<f64>>
where
    T: Clone + PartialEq,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| compare(a, b));
    keys_for_permutation(data, &sorted)
}

impl Chromosome<RandomKeys> {
    /// Apply the encoded permutation to a reference sequence
    pub fn decode<T: Clone>(&self, reference: &[T]) -> GeneticResult<Vec<T>> {
        decode(self.representation(), reference)
    }
}
