//! Configurable genetic operators for assignment chromosomes.
//!
//! Provides runtime-selectable crossover and mutation strategies
//! via [`GeneticOperators`].
//!
//! # Usage
//!
//! ```
//! use u_assign::ga::operators::{GeneticOperators, CrossoverType, MutationType};
//!
//! let ops = GeneticOperators::default();
//! assert_eq!(ops.crossover_type, CrossoverType::Ordered);
//! assert_eq!(ops.mutation_type, MutationType::Mixed);
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::chromosome::{
    mixed_mutation, ordered_crossover, point_crossover, repair_duplicates, replace_mutation,
    swap_mutation, Chromosome,
};
use crate::error::Result;

/// Crossover strategy for assignment chromosomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverType {
    /// Ordered crossover (Davis, 1985). Children are always valid.
    #[default]
    Ordered,
    /// Slice-based crossover with 1 or 2 cut points, for comparison only.
    /// Children are repaired before use.
    Point(u8),
}

/// Mutation strategy for assignment chromosomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationType {
    /// Swap or replace with equal probability.
    #[default]
    Mixed,
    /// Exchange the agents of two tasks.
    Swap,
    /// Give one task to an idle agent.
    Replace,
}

/// Runtime-selectable genetic operators for the assignment GA.
///
/// # Example
///
/// ```
/// use u_assign::ga::operators::{GeneticOperators, CrossoverType, MutationType};
///
/// let ops = GeneticOperators {
///     crossover_type: CrossoverType::Point(2),
///     mutation_type: MutationType::Swap,
/// };
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneticOperators {
    /// Crossover strategy.
    pub crossover_type: CrossoverType,
    /// Mutation strategy.
    pub mutation_type: MutationType,
}

impl GeneticOperators {
    /// Produces one child using the configured strategy.
    ///
    /// Point-crossover children are repaired, so the result is always a
    /// valid assignment when the parents are.
    pub fn crossover<R: Rng>(
        &self,
        p1: &Chromosome,
        p2: &Chromosome,
        num_agents: usize,
        rng: &mut R,
    ) -> Result<Chromosome> {
        match self.crossover_type {
            CrossoverType::Ordered => ordered_crossover(p1, p2, rng),
            CrossoverType::Point(points) => {
                let mut child = point_crossover(p1, p2, points, rng)?;
                repair_duplicates(&mut child, &[p1, p2], num_agents)?;
                Ok(child)
            }
        }
    }

    /// Mutates a child in place using the configured strategy.
    pub fn mutate<R: Rng>(
        &self,
        chromosome: &mut Chromosome,
        num_agents: usize,
        rng: &mut R,
    ) -> Result<()> {
        match self.mutation_type {
            MutationType::Mixed => mixed_mutation(chromosome, num_agents, rng),
            MutationType::Swap => {
                swap_mutation(chromosome, rng);
                Ok(())
            }
            MutationType::Replace => replace_mutation(chromosome, num_agents, rng),
        }
    }
}
