//! Population initialization and scored individuals.
//!
//! An [`Individual`] pairs a chromosome with its fitness so the score is
//! computed once per chromosome and reused by sorting and selection.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Chromosome;
use crate::error::{AssignError, Result};
use crate::models::PerformanceMatrix;

/// A chromosome with its cached fitness (higher = better).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Individual {
    /// The assignment.
    pub chromosome: Chromosome,
    /// Total score of the assignment.
    pub fitness: i64,
}

impl Individual {
    /// Scores a chromosome.
    ///
    /// # Errors
    /// `InvariantViolation` if the chromosome is not valid for the matrix.
    pub fn evaluate(chromosome: Chromosome, matrix: &PerformanceMatrix) -> Result<Self> {
        let fitness = chromosome.fitness(matrix)?;
        Ok(Self {
            chromosome,
            fitness,
        })
    }
}

/// Creates `size` independent random chromosomes for the matrix.
///
/// # Errors
/// `InvalidArgument` if the matrix has fewer agents than tasks.
pub fn init_population<R: Rng>(
    matrix: &PerformanceMatrix,
    size: usize,
    rng: &mut R,
) -> Result<Vec<Chromosome>> {
    (0..size)
        .map(|_| Chromosome::random(matrix.num_agents(), matrix.num_tasks(), rng))
        .collect()
}

/// Scores every chromosome of a population, keeping order.
pub fn evaluate_population(
    chromosomes: Vec<Chromosome>,
    matrix: &PerformanceMatrix,
) -> Result<Vec<Individual>> {
    chromosomes
        .into_iter()
        .map(|c| Individual::evaluate(c, matrix))
        .collect()
}

/// Sorts best-first. The sort is stable: equal scores keep their order.
pub fn sort_descending(population: &mut [Individual]) {
    population.sort_by(|a, b| b.fitness.cmp(&a.fitness));
}

/// The fittest individual; on ties, the first one encountered.
///
/// # Errors
/// `InvalidArgument` if the population is empty.
pub fn best_individual(population: &[Individual]) -> Result<&Individual> {
    population
        .iter()
        .reduce(|best, ind| if ind.fitness > best.fitness { ind } else { best })
        .ok_or_else(|| AssignError::InvalidArgument("population is empty".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn sample_matrix() -> PerformanceMatrix {
        PerformanceMatrix::new(vec![vec![5, 1], vec![2, 8], vec![0, 0]]).unwrap()
    }

    fn individual(genes: Vec<usize>, fitness: i64) -> Individual {
        Individual {
            chromosome: Chromosome::new(genes),
            fitness,
        }
    }

    #[test]
    fn test_init_population() {
        let m = sample_matrix();
        let mut rng = SmallRng::seed_from_u64(42);
        let pop = init_population(&m, 20, &mut rng).unwrap();
        assert_eq!(pop.len(), 20);
        assert!(pop.iter().all(|c| c.is_valid(&m)));
    }

    #[test]
    fn test_init_population_varies() {
        let m = sample_matrix();
        let mut rng = SmallRng::seed_from_u64(42);
        let pop = init_population(&m, 30, &mut rng).unwrap();
        assert!(pop.iter().any(|c| *c != pop[0]));
    }

    #[test]
    fn test_init_population_too_few_agents() {
        let m = PerformanceMatrix::new(vec![vec![1, 2, 3]]).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        assert!(init_population(&m, 5, &mut rng).is_err());
    }

    #[test]
    fn test_evaluate_population() {
        let m = sample_matrix();
        let pop = vec![Chromosome::new(vec![1, 0]), Chromosome::new(vec![0, 1])];
        let scored = evaluate_population(pop, &m).unwrap();
        assert_eq!(scored[0].fitness, 3);
        assert_eq!(scored[1].fitness, 13);
    }

    #[test]
    fn test_sort_descending_is_stable() {
        let mut pop = vec![
            individual(vec![0], 1),
            individual(vec![1], 5),
            individual(vec![2], 5),
        ];
        sort_descending(&mut pop);
        assert_eq!(pop[0].chromosome.genes, vec![1]);
        assert_eq!(pop[1].chromosome.genes, vec![2]);
        assert_eq!(pop[2].fitness, 1);
    }

    #[test]
    fn test_best_individual_first_max() {
        let pop = vec![
            individual(vec![0], 4),
            individual(vec![1], 9),
            individual(vec![2], 9),
        ];
        assert_eq!(best_individual(&pop).unwrap().chromosome.genes, vec![1]);
        assert!(best_individual(&[]).is_err());
    }
}
