//! End-to-end evolution runs
//!
//! Each test drives the full engine with a seeded random source.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use allele_evo::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn config(elitism_rate: f64) -> GeneticAlgorithmConfig {
    GeneticAlgorithmConfig {
        crossover_rate: 1.0,
        mutation_rate: 0.08,
        elitism_rate,
        ..Default::default()
    }
}

#[test]
fn test_random_key_sorting_improves() {
    let mut rng = StdRng::seed_from_u64(2024);
    let ga = GeneticAlgorithm::new(
        OnePointCrossover,
        RandomKeyMutation,
        TournamentSelection::binary(),
        config(0.2),
    )
    .unwrap();

    let initial = Population::random(80, 20, RandomKeys, Arc::new(SortingDisplacement), &mut rng)
        .unwrap();
    let initial_best = initial.fittest().unwrap().fitness();

    let recorder = Arc::new(StatisticsRecorder::new());
    let mut listeners: ConvergenceListenerRegistry<RandomKeys> = ConvergenceListenerRegistry::new();
    listeners.register_shared(recorder.clone());
    let ga = ga.with_listeners(listeners);

    let mut stopping = FixedGenerationCount::new(200).unwrap();
    let result = ga.evolve(initial, &mut stopping, &mut rng).unwrap();

    assert_eq!(result.generations, 200);
    assert_eq!(result.population.len(), 80);
    assert!(result.best.fitness() >= initial_best);
    assert!(result.best.fitness() <= 0.0);

    // elitism keeps the best fitness monotone
    let history = recorder.best_fitness_history();
    assert_eq!(history.len(), 200);
    assert!(history.windows(2).all(|w| w[1] >= w[0]));

    let reference: Vec<usize> = (0..20).collect();
    let decoded = result.best.decode(&reference).unwrap();
    let mut sorted = decoded.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, reference);
}

#[test]
fn test_elapsed_time_stops_on_schedule() {
    let mut rng = StdRng::seed_from_u64(5);
    let ga = GeneticAlgorithm::new(
        OnePointCrossover,
        BinaryMutation,
        TournamentSelection::binary(),
        GeneticAlgorithmConfig::default(),
    )
    .unwrap();

    let mut listeners = ConvergenceListenerRegistry::new();
    listeners.register(|_: usize, _: &Population<Binary>| -> Result<(), ListenerError> {
        thread::sleep(Duration::from_millis(50));
        Ok(())
    });
    let ga = ga.with_listeners(listeners);

    let limit = Duration::from_millis(300);
    let initial = Population::random(10, 16, Binary, Arc::new(OneMax), &mut rng).unwrap();
    let mut stopping = FixedElapsedTime::new(limit);
    let result = ga.evolve(initial, &mut stopping, &mut rng).unwrap();

    assert!(result.runtime >= limit);
    assert!(result.runtime < limit + Duration::from_millis(100));
    assert!(result.generations >= 5);
    assert_eq!(result.termination_reason, "Time limit reached");
}

#[test]
fn test_population_sizes() {
    for limit in [1, 2, 3, 80, 81] {
        let mut rng = StdRng::seed_from_u64(limit as u64);
        let ga = GeneticAlgorithm::new(
            OnePointCrossover,
            BinaryMutation,
            TournamentSelection::binary(),
            GeneticAlgorithmConfig::default(),
        )
        .unwrap();

        let initial = Population::random(limit, 12, Binary, Arc::new(OneMax), &mut rng).unwrap();
        let mut stopping = FixedGenerationCount::new(10).unwrap();
        let result = ga.evolve(initial, &mut stopping, &mut rng).unwrap();

        assert_eq!(result.population.len(), limit);
        assert_eq!(result.population.limit(), limit);
    }
}

#[test]
fn test_failing_listeners_do_not_stop_the_run() {
    let mut rng = StdRng::seed_from_u64(11);
    let observed = Arc::new(AtomicUsize::new(0));

    let mut listeners = ConvergenceListenerRegistry::new();
    listeners.register(|generation: usize, _: &Population<Binary>| -> Result<(), ListenerError> {
        if generation % 2 == 0 {
            panic!("even generation {generation}");
        }
        Ok(())
    });
    listeners.register(|_: usize, _: &Population<Binary>| -> Result<(), ListenerError> {
        Err(ListenerError::new("unavailable"))
    });
    let counter = Arc::clone(&observed);
    listeners.register(move |_: usize, _: &Population<Binary>| -> Result<(), ListenerError> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let ga = GeneticAlgorithm::new(
        UniformCrossover::default(),
        BinaryMutation,
        TournamentSelection::binary(),
        GeneticAlgorithmConfig::default(),
    )
    .unwrap()
    .with_listeners(listeners);

    let initial = Population::random(12, 16, Binary, Arc::new(OneMax), &mut rng).unwrap();
    let mut stopping = FixedGenerationCount::new(6).unwrap();
    let result = ga.evolve(initial, &mut stopping, &mut rng).unwrap();

    assert_eq!(result.generations, 6);
    assert_eq!(observed.load(Ordering::SeqCst), 6);
}

#[test]
fn test_config_serialization() {
    let config = GeneticAlgorithmConfig {
        crossover_rate: 0.75,
        mutation_rate: 0.05,
        elitism_rate: 0.2,
        parallel_evaluation: false,
    };
    let json = serde_json::to_string(&config).unwrap();
    let restored: GeneticAlgorithmConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, config);

    let defaults: GeneticAlgorithmConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(defaults, GeneticAlgorithmConfig::default());

    let partial: GeneticAlgorithmConfig =
        serde_json::from_str(r#"{"mutation_rate": 0.3}"#).unwrap();
    assert_eq!(partial.mutation_rate, 0.3);
    assert_eq!(partial.crossover_rate, 0.9);
}

#[test]
fn test_dimension2_reaches_threshold_or_budget() {
    let mut rng = StdRng::seed_from_u64(17);
    let ga = GeneticAlgorithm::new(
        OnePointCrossover,
        BinaryMutation,
        TournamentSelection::new(2).unwrap(),
        GeneticAlgorithmConfig {
            crossover_rate: 0.9,
            mutation_rate: 0.03,
            elitism_rate: 0.1,
            ..Default::default()
        },
    )
    .unwrap();

    let initial = Population::random(
        50,
        Dimension2::LENGTH,
        Binary,
        Arc::new(Dimension2),
        &mut rng,
    )
    .unwrap();
    let initial_best = initial.fittest().unwrap().fitness();

    let mut stopping: AnyOf<Binary> = AnyOf::new(vec![
        Box::new(FitnessThreshold::maximize(-0.01)),
        Box::new(FixedGenerationCount::new(150).unwrap()),
    ]);
    let result = ga.evolve(initial, &mut stopping, &mut rng).unwrap();

    assert!(result.generations <= 150);
    assert!(result.best.fitness() >= initial_best);
    assert!(result.best.fitness() <= 0.0);
    assert!(Dimension2::decode(result.best.representation()).is_some());
}

#[test]
fn test_combined_stopping_conditions() {
    let mut rng = StdRng::seed_from_u64(23);
    let ga = GeneticAlgorithm::new(
        OnePointCrossover,
        BinaryMutation,
        TournamentSelection::new(3).unwrap(),
        config(0.1),
    )
    .unwrap();

    let initial = Population::random(30, 16, Binary, Arc::new(OneMax), &mut rng).unwrap();
    let mut stopping: AnyOf<Binary> = AnyOf::new(vec![
        Box::new(AllOf::<Binary>::new(vec![
            Box::new(FixedGenerationCount::new(10).unwrap()),
            Box::new(UnchangedBestFitness::new(3).unwrap()),
        ])),
        Box::new(FixedGenerationCount::new(300).unwrap()),
    ]);
    let result = ga.evolve(initial, &mut stopping, &mut rng).unwrap();

    assert!(result.generations >= 10);
    assert!(result.generations <= 300);
}

#[test]
fn test_real_valued_sphere() {
    let mut rng = StdRng::seed_from_u64(31);
    let (min, max) = Sphere.bounds();
    let encoding = RealValued::new(min, max).unwrap();
    let ga = GeneticAlgorithm::new(
        UniformCrossover::default(),
        GaussianMutation::new(0.2).unwrap(),
        TournamentSelection::new(3).unwrap(),
        GeneticAlgorithmConfig {
            mutation_rate: 0.5,
            ..Default::default()
        },
    )
    .unwrap();

    let initial = Population::random(40, 5, encoding, Arc::new(Sphere), &mut rng).unwrap();
    let initial_best = initial.fittest().unwrap().fitness();

    let mut stopping = FixedGenerationCount::new(100).unwrap();
    let result = ga.evolve(initial, &mut stopping, &mut rng).unwrap();

    assert!(result.best.fitness() >= initial_best);
    assert!(result.best.fitness() > -2.0);
    assert!(-result.best.fitness() >= Sphere.optimal_value());
}
