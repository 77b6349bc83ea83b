//! Property-based tests for allele-evo
//!
//! Uses proptest to verify invariants of the chromosomes and operators.

use std::collections::HashSet;
use std::sync::Arc;

use allele_evo::chromosome::random_key;
use allele_evo::prelude::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn permutation_fitness() -> SharedFitness<Integral> {
    Arc::new(|c: &Chromosome<Integral>| c.representation().iter().sum::<i64>() as f64)
}

/// Shuffled permutation of 0..length as an integral chromosome
fn permutation(length: usize, rng: &mut StdRng) -> Chromosome<Integral> {
    let keys = random_key::random_keys(length, rng);
    let reference: Vec<i64> = (0..length as i64).collect();
    let alleles = random_key::decode(&keys, &reference).unwrap();
    let encoding = Integral::new(0, length as i64).unwrap();
    Chromosome::new(alleles, encoding, permutation_fitness()).unwrap()
}

fn is_permutation(chromosome: &Chromosome<Integral>) -> bool {
    let mut sorted = chromosome.representation().to_vec();
    sorted.sort_unstable();
    sorted == (0..chromosome.len() as i64).collect::<Vec<_>>()
}

fn transitions(a: &[bool], b: &[bool]) -> usize {
    let origin: Vec<bool> = a.iter().zip(b).map(|(x, y)| x == y).collect();
    origin.windows(2).filter(|w| w[0] != w[1]).count()
}

proptest! {
    // ==================== Random Key Properties ====================

    #[test]
    fn random_keys_decode_to_permutation(length in 1usize..60, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let keys = random_key::random_keys(length, &mut rng);
        let reference: Vec<usize> = (0..length).collect();
        let decoded = random_key::decode(&keys, &reference).unwrap();

        let unique: HashSet<usize> = decoded.iter().copied().collect();
        prop_assert_eq!(decoded.len(), length);
        prop_assert_eq!(unique.len(), length);
    }

    #[test]
    fn keys_for_permutation_reproduces_permutation(length in 1usize..40, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let original: Vec<usize> = (0..length).collect();
        let permuted = random_key::decode(&random_key::random_keys(length, &mut rng), &original).unwrap();

        let keys = random_key::keys_for_permutation(&original, &permuted).unwrap();
        prop_assert_eq!(random_key::decode(&keys, &original).unwrap(), permuted);
    }

    #[test]
    fn comparator_keys_sort_data_with_ties(data in prop::collection::vec(0u8..5, 1..30)) {
        let keys = random_key::comparator_keys(&data, Ord::cmp).unwrap();
        let mut sorted = data.clone();
        sorted.sort_unstable();
        prop_assert_eq!(random_key::decode(&keys, &data).unwrap(), sorted);
    }

    // ==================== Crossover Properties ====================

    #[test]
    fn ordered_crossover_preserves_permutation(length in 2usize..40, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let first = permutation(length, &mut rng);
        let second = permutation(length, &mut rng);

        let (child1, child2) = OrderedCrossover.mate(&first, &second, &mut rng).unwrap();
        prop_assert!(is_permutation(&child1));
        prop_assert!(is_permutation(&child2));
    }

    #[test]
    fn cycle_crossover_preserves_positions(length in 2usize..40, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let first = permutation(length, &mut rng);
        let second = permutation(length, &mut rng);

        let (child1, child2) = CycleCrossover::with_random_start()
            .mate(&first, &second, &mut rng)
            .unwrap();
        prop_assert!(is_permutation(&child1));
        prop_assert!(is_permutation(&child2));

        for i in 0..length {
            prop_assert!(child1[i] == first[i] || child1[i] == second[i]);
            prop_assert!(child2[i] == first[i] || child2[i] == second[i]);
        }
    }

    #[test]
    fn n_point_crossover_switches_parents_n_times(
        length in 4usize..64,
        points in 1usize..4,
        seed in any::<u64>()
    ) {
        prop_assume!(points < length);
        let fitness: SharedFitness<Binary> = Arc::new(OneMax);
        let first = Chromosome::new(vec![false; length], Binary, Arc::clone(&fitness)).unwrap();
        let second = Chromosome::new(vec![true; length], Binary, fitness).unwrap();

        let mut rng = StdRng::seed_from_u64(seed);
        let crossover = NPointCrossover::new(points).unwrap();
        let (child1, child2) = crossover.mate(&first, &second, &mut rng).unwrap();

        prop_assert_eq!(transitions(child1.representation(), first.representation()), points);
        for i in 0..length {
            prop_assert_ne!(child1[i], child2[i]);
        }
    }

    #[test]
    fn one_point_crossover_preserves_alleles(length in 2usize..64, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let fitness: SharedFitness<Binary> = Arc::new(OneMax);
        let first = Chromosome::random(length, Binary, Arc::clone(&fitness), &mut rng).unwrap();
        let second = Chromosome::random(length, Binary, fitness, &mut rng).unwrap();

        let (child1, child2) = OnePointCrossover.mate(&first, &second, &mut rng).unwrap();
        prop_assert_eq!(child1.count_ones() + child2.count_ones(), first.count_ones() + second.count_ones());
    }

    // ==================== Mutation Properties ====================

    #[test]
    fn binary_mutation_flips_exactly_one_bit(length in 1usize..64, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let original = Chromosome::random(length, Binary, Arc::new(OneMax), &mut rng).unwrap();
        let mutated = BinaryMutation.mutate(&original, 1.0, &mut rng).unwrap();

        let changed = original
            .representation()
            .iter()
            .zip(mutated.representation())
            .filter(|(a, b)| a != b)
            .count();
        prop_assert_eq!(changed, 1);
    }

    #[test]
    fn swap_mutation_preserves_permutation(length in 1usize..40, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let original = permutation(length, &mut rng);
        let mutated = SwapMutation.mutate(&original, 1.0, &mut rng).unwrap();
        prop_assert!(is_permutation(&mutated));
    }

    #[test]
    fn gaussian_mutation_stays_in_bounds(
        length in 1usize..30,
        sigma in 0.01f64..10.0,
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let encoding = RealValued::new(-1.0, 1.0).unwrap();
        let original = Chromosome::random(length, encoding, Arc::new(Sphere), &mut rng).unwrap();
        let mutation = GaussianMutation::new(sigma).unwrap().with_probability(1.0).unwrap();

        let mutated = mutation.mutate(&original, 1.0, &mut rng).unwrap();
        for allele in mutated.representation() {
            prop_assert!((-1.0..=1.0).contains(allele));
        }
    }

    #[test]
    fn integral_mutation_stays_in_bounds(
        min in -50i64..0,
        span in 1i64..50,
        length in 1usize..30,
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let encoding = Integral::new(min, min + span).unwrap();
        let fitness: SharedFitness<Integral> = Arc::new(|_: &Chromosome<Integral>| 0.0);
        let original = Chromosome::random(length, encoding, fitness, &mut rng).unwrap();

        let mutated = IntegralMutation.mutate(&original, 1.0, &mut rng).unwrap();
        for allele in mutated.representation() {
            prop_assert!((min..=min + span).contains(allele));
        }
    }

    // ==================== Chromosome Properties ====================

    #[test]
    fn new_chromosome_shares_fitness_function(length in 1usize..32, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let original = Chromosome::random(length, Binary, Arc::new(OneMax), &mut rng).unwrap();
        let copy = original.new_chromosome(original.representation().to_vec()).unwrap();

        prop_assert!(!copy.is_evaluated());
        prop_assert_eq!(copy.fitness(), original.fitness());
        prop_assert!(original.is_same(&copy));
    }

    #[test]
    fn fitness_is_memoized(length in 1usize..32, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let chromosome = Chromosome::random(length, Binary, Arc::new(OneMax), &mut rng).unwrap();
        let first = chromosome.fitness();
        prop_assert!(chromosome.is_evaluated());
        prop_assert_eq!(chromosome.fitness(), first);
        prop_assert_eq!(first, chromosome.count_ones() as f64);
    }

    // ==================== Population Properties ====================

    #[test]
    fn next_generation_fills_limit(
        limit in 1usize..40,
        elitism_rate in 0.0f64..=1.0,
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let population = Population::random(limit, 10, Binary, Arc::new(OneMax), &mut rng).unwrap();
        let reproduction = Reproduction::new(
            OnePointCrossover,
            BinaryMutation,
            TournamentSelection::binary(),
            0.9,
            0.1,
        ).unwrap();

        let next = population.next_generation(elitism_rate, &reproduction, &mut rng).unwrap();
        prop_assert_eq!(next.len(), limit);
        prop_assert_eq!(next.limit(), limit);
    }

    #[test]
    fn elites_are_the_fittest(limit in 1usize..40, elitism_rate in 0.0f64..=1.0, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let population = Population::random(limit, 12, Binary, Arc::new(OneMax), &mut rng).unwrap();
        let elites = population.with_elites(elitism_rate).unwrap();

        prop_assert_eq!(elites.len(), (elitism_rate * limit as f64).floor() as usize);
        if let Some(best) = elites.fittest() {
            prop_assert_eq!(best.fitness(), population.fittest().unwrap().fitness());
        }
    }

    #[test]
    fn tournament_select_returns_member(arity in 1usize..6, limit in 1usize..20, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let population = Population::random(limit, 8, Binary, Arc::new(OneMax), &mut rng).unwrap();
        let selection = TournamentSelection::new(arity).unwrap();

        let chosen = selection.select(&population, &mut rng).unwrap();
        prop_assert!(population.iter().any(|c| std::ptr::eq(c, chosen)));
    }
}
