//! Generational GA loop for the assignment problem.
//!
//! Each generation:
//! 1. Sort the population best-first and record its statistics.
//! 2. Carry the single best individual over unchanged (elitism).
//! 3. Fill the rest of the next population with children: two parents by
//!    the configured selector, crossover with probability `crossover_rate`
//!    (otherwise a clone of parent 1), mutation with probability
//!    `mutation_rate`.
//!
//! Elitism makes the recorded best score non-decreasing across generations.
//!
//! # Randomness
//! One generator drives the run. Before breeding, it draws one seed per
//! child; each child is bred from its own `SmallRng`. The output for a
//! given seed is therefore the same whether children are bred sequentially
//! or on the rayon pool.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::config::GaConfig;
use super::operators::GeneticOperators;
use super::population::{
    best_individual, evaluate_population, init_population, sort_descending, Individual,
};
use super::selection::Selector;
use super::Chromosome;
use crate::error::{AssignError, Result};
use crate::models::PerformanceMatrix;
use crate::validation::validate_config;

/// Score summary of one generation (taken before breeding).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// 0-based generation index.
    pub generation: usize,
    /// Highest fitness in the population.
    pub best_fitness: i64,
    /// Mean fitness.
    pub mean_fitness: f64,
    /// Lowest fitness.
    pub worst_fitness: i64,
}

impl GenerationStats {
    fn from_sorted(generation: usize, sorted: &[Individual]) -> Self {
        let best_fitness = sorted.first().map_or(0, |ind| ind.fitness);
        let worst_fitness = sorted.last().map_or(0, |ind| ind.fitness);
        let sum: i128 = sorted.iter().map(|ind| i128::from(ind.fitness)).sum();
        let mean_fitness = if sorted.is_empty() {
            0.0
        } else {
            sum as f64 / sorted.len() as f64
        };
        Self {
            generation,
            best_fitness,
            mean_fitness,
            worst_fitness,
        }
    }
}

/// Outcome of a GA run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaResult {
    /// Fittest chromosome of the final population (first one on ties).
    pub best: Chromosome,
    /// Its fitness.
    pub best_fitness: i64,
    /// The final population.
    pub population: Vec<Chromosome>,
    /// Per-generation statistics, one entry per completed generation.
    pub history: Vec<GenerationStats>,
    /// Whether the stall limit ended the run before the generation count.
    pub stopped_early: bool,
}

impl GaResult {
    /// Best fitness of each completed generation.
    pub fn best_history(&self) -> Vec<i64> {
        self.history.iter().map(|s| s.best_fitness).collect()
    }

    /// Generations completed.
    pub fn generations(&self) -> usize {
        self.history.len()
    }
}

/// Runs the assignment GA.
///
/// # Example
/// ```
/// use u_assign::ga::{GaConfig, GaRunner, SelectionMethod};
/// use u_assign::models::PerformanceMatrix;
///
/// let matrix = PerformanceMatrix::new(vec![
///     vec![5, 1, 3],
///     vec![2, 8, 1],
///     vec![0, 0, 9],
///     vec![4, 4, 4],
/// ]).unwrap();
/// let config = GaConfig::default()
///     .with_selection(SelectionMethod::Tournament)
///     .with_generations(30)
///     .with_seed(42);
///
/// let result = GaRunner::run(&matrix, &config).unwrap();
/// assert_eq!(result.best.len(), 3);
/// assert_eq!(result.best_fitness, result.best.fitness(&matrix).unwrap());
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs with a generator seeded from `config.seed`, or from the OS.
    pub fn run(matrix: &PerformanceMatrix, config: &GaConfig) -> Result<GaResult> {
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self::run_with_rng(matrix, config, &mut rng)
    }

    /// Runs with a caller-owned generator. `config.seed` is ignored.
    ///
    /// # Errors
    /// `InvalidArgument` for an unusable configuration or a matrix with
    /// fewer agents than tasks. Selection and operator errors (e.g. a
    /// tournament larger than the population) abort the run.
    pub fn run_with_rng<R: Rng>(
        matrix: &PerformanceMatrix,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult> {
        let num_agents = matrix.num_agents();
        validate_config(config, num_agents, matrix.num_tasks())
            .map_err(|errors| AssignError::invalid(&errors))?;

        let selector = config.selector();
        let operators = config.operators();

        info!(
            selection = %config.selection,
            population = config.population_size,
            generations = config.generations,
            agents = num_agents,
            tasks = matrix.num_tasks(),
            "starting assignment GA"
        );

        let initial = init_population(matrix, config.population_size, rng)?;
        let mut population = evaluate_population(initial, matrix)?;
        let mut history = Vec::with_capacity(config.generations);
        let mut stalled = 0usize;
        let mut stopped_early = false;

        for generation in 0..config.generations {
            sort_descending(&mut population);
            let stats = GenerationStats::from_sorted(generation, &population);
            debug!(
                generation,
                best = stats.best_fitness,
                mean = stats.mean_fitness,
                "generation evaluated"
            );

            let improved = history
                .last()
                .map_or(true, |prev: &GenerationStats| stats.best_fitness > prev.best_fitness);
            history.push(stats);

            if let Some(limit) = config.stall_generations {
                stalled = if improved { 0 } else { stalled + 1 };
                if stalled >= limit {
                    info!(generation, stalled, "no improvement, stopping early");
                    stopped_early = true;
                    break;
                }
            }

            population = Self::next_generation(
                &population,
                matrix,
                config,
                &selector,
                &operators,
                rng,
            )?;
        }

        let best = best_individual(&population)?.clone();
        info!(
            best_fitness = best.fitness,
            generations = history.len(),
            "assignment GA finished"
        );

        Ok(GaResult {
            best: best.chromosome,
            best_fitness: best.fitness,
            population: population.into_iter().map(|ind| ind.chromosome).collect(),
            history,
            stopped_early,
        })
    }

    /// Builds the next population from a best-first sorted one.
    fn next_generation<R: Rng>(
        sorted: &[Individual],
        matrix: &PerformanceMatrix,
        config: &GaConfig,
        selector: &Selector,
        operators: &GeneticOperators,
        rng: &mut R,
    ) -> Result<Vec<Individual>> {
        let Some(elite) = sorted.first() else {
            return Ok(Vec::new());
        };

        let seeds: Vec<u64> = (1..config.population_size).map(|_| rng.random()).collect();
        let breed = |seed: u64| {
            let mut child_rng = SmallRng::seed_from_u64(seed);
            breed_child(sorted, matrix, config, selector, operators, &mut child_rng)
        };

        let children: Vec<Individual> = if config.parallel {
            seeds.into_par_iter().map(breed).collect::<Result<_>>()?
        } else {
            seeds.into_iter().map(breed).collect::<Result<_>>()?
        };

        let mut next = Vec::with_capacity(config.population_size);
        next.push(elite.clone());
        next.extend(children);
        Ok(next)
    }
}

/// Produces one scored child. Parents are read-only; the child is a fresh
/// value, so the elite and other parents are never altered.
fn breed_child<R: Rng>(
    population: &[Individual],
    matrix: &PerformanceMatrix,
    config: &GaConfig,
    selector: &Selector,
    operators: &GeneticOperators,
    rng: &mut R,
) -> Result<Individual> {
    let num_agents = matrix.num_agents();
    let p1 = selector.select(population, rng)?;
    let p2 = selector.select(population, rng)?;

    let mut child = if rng.random_bool(config.crossover_rate) {
        operators.crossover(&p1.chromosome, &p2.chromosome, num_agents, rng)?
    } else {
        p1.chromosome.clone()
    };

    if rng.random_bool(config.mutation_rate) {
        operators.mutate(&mut child, num_agents, rng)?;
    }

    Individual::evaluate(child, matrix)
}
