//! Property-based tests for the assignment GA

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use u_assign::ga::{
    ordered_crossover, point_crossover, repair_duplicates, Chromosome, GaConfig, GaRunner,
    GeneticOperators, Individual, MutationType, SelectionMethod, Selector,
};
use u_assign::models::PerformanceMatrix;

// Generate a matrix with at least as many agents as tasks
prop_compose! {
    fn arb_matrix()(
        num_tasks in 1..=8usize,
        extra_agents in 0..=4usize,
    )(
        rows in prop::collection::vec(
            prop::collection::vec(-20i64..=50, num_tasks),
            num_tasks + extra_agents,
        )
    ) -> PerformanceMatrix {
        PerformanceMatrix::new(rows).unwrap()
    }
}

// Generate a matrix plus a seed for everything random drawn against it
prop_compose! {
    fn arb_problem()(matrix in arb_matrix(), seed in any::<u64>()) -> (PerformanceMatrix, u64) {
        (matrix, seed)
    }
}

fn arb_method() -> impl Strategy<Value = SelectionMethod> {
    prop_oneof![
        Just(SelectionMethod::Roulette),
        Just(SelectionMethod::Rank),
        Just(SelectionMethod::Tournament),
    ]
}

fn sorted(genes: &[usize]) -> Vec<usize> {
    let mut g = genes.to_vec();
    g.sort_unstable();
    g
}

proptest! {
    #[test]
    fn random_chromosomes_are_valid((matrix, seed) in arb_problem()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let ch = Chromosome::random(matrix.num_agents(), matrix.num_tasks(), &mut rng).unwrap();
        prop_assert_eq!(ch.len(), matrix.num_tasks());
        prop_assert!(ch.is_valid(&matrix));
    }

    #[test]
    fn fitness_is_deterministic((matrix, seed) in arb_problem()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let ch = Chromosome::random(matrix.num_agents(), matrix.num_tasks(), &mut rng).unwrap();
        prop_assert_eq!(ch.fitness(&matrix).unwrap(), ch.fitness(&matrix).unwrap());
    }

    #[test]
    fn ordered_crossover_children_are_valid((matrix, seed) in arb_problem()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let (a, t) = (matrix.num_agents(), matrix.num_tasks());
        let p1 = Chromosome::random(a, t, &mut rng).unwrap();
        let p2 = Chromosome::random(a, t, &mut rng).unwrap();
        let child = ordered_crossover(&p1, &p2, &mut rng).unwrap();
        prop_assert!(child.is_valid(&matrix));
    }

    #[test]
    fn ordered_crossover_keeps_parent1_agents(len in 1..=12usize, seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut genes: Vec<usize> = (0..len).collect();
        genes.shuffle(&mut rng);
        let p1 = Chromosome::new(genes.clone());
        genes.shuffle(&mut rng);
        let p2 = Chromosome::new(genes);

        let child = ordered_crossover(&p1, &p2, &mut rng).unwrap();
        prop_assert_eq!(sorted(&child.genes), sorted(&p1.genes));
    }

    #[test]
    fn repaired_point_crossover_is_valid(
        (matrix, seed) in arb_problem(),
        points in 1u8..=2,
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let (a, t) = (matrix.num_agents(), matrix.num_tasks());
        let p1 = Chromosome::random(a, t, &mut rng).unwrap();
        let p2 = Chromosome::random(a, t, &mut rng).unwrap();
        let mut child = point_crossover(&p1, &p2, points, &mut rng).unwrap();
        repair_duplicates(&mut child, &[&p1, &p2], a).unwrap();
        prop_assert!(child.is_valid(&matrix));
    }

    #[test]
    fn mutation_keeps_validity(
        (matrix, seed) in arb_problem(),
        kind in prop_oneof![Just(MutationType::Mixed), Just(MutationType::Swap)],
        rounds in 1..20usize,
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let (a, t) = (matrix.num_agents(), matrix.num_tasks());
        let ops = GeneticOperators { mutation_type: kind, ..GeneticOperators::default() };
        let mut ch = Chromosome::random(a, t, &mut rng).unwrap();
        for _ in 0..rounds {
            ops.mutate(&mut ch, a, &mut rng).unwrap();
            prop_assert!(ch.is_valid(&matrix));
        }
    }

    #[test]
    fn selection_is_non_destructive(
        (matrix, seed) in arb_problem(),
        method in arb_method(),
        size in 3..12usize,
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let (a, t) = (matrix.num_agents(), matrix.num_tasks());
        let population: Vec<Individual> = (0..size)
            .map(|_| {
                let c = Chromosome::random(a, t, &mut rng).unwrap();
                Individual::evaluate(c, &matrix).unwrap()
            })
            .collect();
        let before = population.clone();

        let selector = Selector::new(method);
        for _ in 0..10 {
            let picked = selector.select(&population, &mut rng).unwrap();
            prop_assert!(population.contains(picked));
        }
        prop_assert_eq!(population, before);
    }

    #[test]
    fn best_history_never_decreases(
        (matrix, seed) in arb_problem(),
        method in arb_method(),
    ) {
        let config = GaConfig::default()
            .with_selection(method)
            .with_generations(15)
            .with_mutation_rate(0.4)
            .with_seed(seed);
        let result = GaRunner::run(&matrix, &config).unwrap();
        let history = result.best_history();
        prop_assert!(history.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(result.population.iter().all(|c| c.is_valid(&matrix)));
    }
}
