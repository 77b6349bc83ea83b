//! Crossover operators
//!
//! This module provides the list crossover operators. Every operator works on
//! any encoding; the permutation-preserving ones (`OrderedCrossover`,
//! `CycleCrossover`) additionally require the parents to be permutations of
//! each other.

use rand::Rng;

use crate::chromosome::chromosome::Chromosome;
use crate::chromosome::traits::Encoding;
use crate::error::{GeneticError, GeneticResult};
use crate::operators::traits::{check_dimensions, ChromosomePair, CrossoverPolicy};

/// One-point crossover
///
/// A crossover point `k` is drawn from `[1, length - 1]`; the first child takes
/// the head of the first parent and the tail of the second, and vice versa.
#[derive(Clone, Copy, Debug, Default)]
pub struct OnePointCrossover;

impl<E: Encoding> CrossoverPolicy<E> for OnePointCrossover {
    fn mate<R: Rng>(
        &self,
        first: &Chromosome<E>,
        second: &Chromosome<E>,
        rng: &mut R,
    ) -> GeneticResult<ChromosomePair<E>> {
        let length = check_dimensions(first, second)?;
        if length < 2 {
            return Err(GeneticError::InvalidArgument(format!(
                "one-point crossover needs at least 2 alleles, got {}",
                length
            )));
        }

        let point = rng.gen_range(1..length);
        let (head1, tail1) = first.representation().split_at(point);
        let (head2, tail2) = second.representation().split_at(point);

        let child1 = [head1, tail2].concat();
        let child2 = [head2, tail1].concat();

        Ok((first.new_chromosome(child1)?, second.new_chromosome(child2)?))
    }
}

/// N-point crossover
///
/// `n` distinct crossover points split the parents into `n + 1` segments that
/// are swapped alternately between the children.
#[derive(Clone, Copy, Debug)]
pub struct NPointCrossover {
    points: usize,
}

impl NPointCrossover {
    /// Create an n-point crossover; `points` must be > 0
    pub fn new(points: usize) -> GeneticResult<Self> {
        Ok(Self {
            points: GeneticError::check_positive("crossover points", points)?,
        })
    }

    /// Number of crossover points
    pub fn points(&self) -> usize {
        self.points
    }
}

impl<E: Encoding> CrossoverPolicy<E> for NPointCrossover {
    fn mate<R: Rng>(
        &self,
        first: &Chromosome<E>,
        second: &Chromosome<E>,
        rng: &mut R,
    ) -> GeneticResult<ChromosomePair<E>> {
        let length = check_dimensions(first, second)?;
        if self.points >= length {
            return Err(GeneticError::TooLarge {
                parameter: "crossover points",
                value: self.points,
                max: length,
            });
        }

        let parent1 = first.representation();
        let parent2 = second.representation();
        let mut child1 = Vec::with_capacity(length);
        let mut child2 = Vec::with_capacity(length);

        let mut last = 0;
        let mut swapped = false;
        for remaining in (1..=self.points).rev() {
            // leaves room for the remaining points after this one
            let point = last + 1 + rng.gen_range(0..length - last - remaining);

            let (into1, into2) = if swapped {
                (&mut child2, &mut child1)
            } else {
                (&mut child1, &mut child2)
            };
            into1.extend_from_slice(&parent1[last..point]);
            into2.extend_from_slice(&parent2[last..point]);

            swapped = !swapped;
            last = point;
        }

        let (into1, into2) = if swapped {
            (&mut child2, &mut child1)
        } else {
            (&mut child1, &mut child2)
        };
        into1.extend_from_slice(&parent1[last..]);
        into2.extend_from_slice(&parent2[last..]);

        Ok((first.new_chromosome(child1)?, second.new_chromosome(child2)?))
    }
}

/// Uniform crossover
///
/// Each position is inherited from the first parent with probability `ratio`
/// and from the second otherwise; the second child gets the complement.
#[derive(Clone, Copy, Debug)]
pub struct UniformCrossover {
    ratio: f64,
}

impl UniformCrossover {
    /// Create a uniform crossover; `ratio` must lie in [0, 1]
    pub fn new(ratio: f64) -> GeneticResult<Self> {
        Ok(Self {
            ratio: GeneticError::check_rate("mixing ratio", ratio)?,
        })
    }

    /// Probability of inheriting from the first parent
    pub fn ratio(&self) -> f64 {
        self.ratio
    }
}

impl Default for UniformCrossover {
    fn default() -> Self {
        Self { ratio: 0.5 }
    }
}

impl<E: Encoding> CrossoverPolicy<E> for UniformCrossover {
    fn mate<R: Rng>(
        &self,
        first: &Chromosome<E>,
        second: &Chromosome<E>,
        rng: &mut R,
    ) -> GeneticResult<ChromosomePair<E>> {
        let length = check_dimensions(first, second)?;
        let mut child1 = Vec::with_capacity(length);
        let mut child2 = Vec::with_capacity(length);

        for (a, b) in first.representation().iter().zip(second.representation()) {
            if rng.gen::<f64>() < self.ratio {
                child1.push(a.clone());
                child2.push(b.clone());
            } else {
                child1.push(b.clone());
                child2.push(a.clone());
            }
        }

        Ok((first.new_chromosome(child1)?, second.new_chromosome(child2)?))
    }
}

/// Order 1 crossover (OX1)
///
/// A random slice `[lb, ub]` of each parent is copied to the child at the same
/// positions; the remaining positions are filled with the missing elements in
/// the order they appear in the other parent, starting right after `ub`.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderedCrossover;

impl<E: Encoding> CrossoverPolicy<E> for OrderedCrossover {
    fn mate<R: Rng>(
        &self,
        first: &Chromosome<E>,
        second: &Chromosome<E>,
        rng: &mut R,
    ) -> GeneticResult<ChromosomePair<E>> {
        let length = check_dimensions(first, second)?;
        if length < 2 {
            return Err(GeneticError::InvalidArgument(format!(
                "ordered crossover needs at least 2 alleles, got {}",
                length
            )));
        }
        let positions = positions_in_first(first.representation(), second.representation())?;

        let a = rng.gen_range(0..length);
        let mut b = rng.gen_range(0..length);
        while a == b {
            b = rng.gen_range(0..length);
        }

        let (child1, child2) = ordered_children(
            first.representation(),
            second.representation(),
            &positions,
            a.min(b),
            a.max(b),
        );
        Ok((first.new_chromosome(child1)?, second.new_chromosome(child2)?))
    }
}

fn ordered_children<T: Clone>(
    parent1: &[T],
    parent2: &[T],
    positions: &[usize],
    lb: usize,
    ub: usize,
) -> (Vec<T>, Vec<T>) {
    let length = parent1.len();
    let mut child1 = Vec::with_capacity(length);
    let mut child2 = Vec::with_capacity(length);
    // membership is tracked by each element's position in the first parent
    let mut used1 = vec![false; length];
    let mut used2 = vec![false; length];

    for k in lb..=ub {
        child1.push(parent1[k].clone());
        used1[k] = true;
        child2.push(parent2[k].clone());
        used2[positions[k]] = true;
    }

    for i in 1..=length {
        let idx = (ub + i) % length;

        let key2 = positions[idx];
        if !used1[key2] {
            child1.push(parent2[idx].clone());
            used1[key2] = true;
        }

        if !used2[idx] {
            child2.push(parent1[idx].clone());
            used2[idx] = true;
        }
    }

    child1.rotate_right(lb);
    child2.rotate_right(lb);
    (child1, child2)
}

/// Cycle crossover (CX)
///
/// Positions are partitioned into cycles through the mapping between the two
/// parents. The children start as copies of the second and first parent and
/// every other cycle, starting with the first one found, is exchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct CycleCrossover {
    random_start: bool,
}

impl CycleCrossover {
    /// Create a cycle crossover that starts at position 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cycle crossover that starts at a random position
    pub fn with_random_start() -> Self {
        Self { random_start: true }
    }

    /// Check if the first cycle starts at a random position
    pub fn random_start(&self) -> bool {
        self.random_start
    }
}

impl<E: Encoding> CrossoverPolicy<E> for CycleCrossover {
    fn mate<R: Rng>(
        &self,
        first: &Chromosome<E>,
        second: &Chromosome<E>,
        rng: &mut R,
    ) -> GeneticResult<ChromosomePair<E>> {
        let length = check_dimensions(first, second)?;
        let positions = positions_in_first(first.representation(), second.representation())?;

        let start = if self.random_start {
            rng.gen_range(0..length)
        } else {
            0
        };

        let (child1, child2) =
            cycle_children(first.representation(), second.representation(), &positions, start);
        Ok((first.new_chromosome(child1)?, second.new_chromosome(child2)?))
    }
}

fn cycle_children<T: Clone>(
    parent1: &[T],
    parent2: &[T],
    positions: &[usize],
    start: usize,
) -> (Vec<T>, Vec<T>) {
    let length = parent1.len();
    let mut child1 = parent2.to_vec();
    let mut child2 = parent1.to_vec();

    let mut visited = vec![false; length];
    let mut visited_count = 0;
    let mut cycle = Vec::with_capacity(length);
    let mut cycle_number = 1;
    let mut idx = start;

    while visited_count < length {
        cycle.push(idx);
        let mut next = positions[idx];
        while next != cycle[0] {
            cycle.push(next);
            next = positions[next];
        }

        if cycle_number % 2 == 1 {
            for &j in &cycle {
                std::mem::swap(&mut child1[j], &mut child2[j]);
            }
        }
        cycle_number += 1;

        for &j in &cycle {
            visited[j] = true;
        }
        visited_count += cycle.len();

        idx = (cycle[0] + 1) % length;
        while visited[idx] && visited_count < length {
            idx = (idx + 1) % length;
        }
        cycle.clear();
    }

    (child1, child2)
}

/// For each element of `second`, its position in `first`
///
/// Fails unless `second` is a permutation of `first`.
fn positions_in_first<T: PartialEq>(first: &[T], second: &[T]) -> GeneticResult<Vec<usize>> {
    let mut taken = vec![false; first.len()];
    second
        .iter()
        .enumerate()
        .map(|(i, element)| {
            let position = first
                .iter()
                .enumerate()
                .position(|(j, candidate)| !taken[j] && candidate == element)
                .ok_or_else(|| {
                    GeneticError::InvalidRepresentation(format!(
                        "parents are not permutations of each other (element at position {})",
                        i
                    ))
                })?;
            taken[position] = true;
            Ok(position)
        })
        .collect()
}
