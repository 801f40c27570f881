//! Partial-permutation chromosome for task → agent assignment.
//!
//! # Encoding
//!
//! One gene per task: `genes[t]` is the 0-based agent performing task `t`.
//! Genes are pairwise distinct (no agent is double-booked) and every gene is
//! a valid row of the performance matrix. When there are more agents than
//! tasks, the chromosome is a partial permutation of the agent range.
//!
//! # Operators
//!
//! - Ordered crossover keeps a segment of parent 1 in place and fills the
//!   rest from parent 2 in order, skipping agents already used.
//! - Point crossover splices raw slices and can double-book agents; it is
//!   kept for comparison, and [`repair_duplicates`] must run on its output.
//! - Swap mutation exchanges two tasks' agents; replace mutation hands one
//!   task to an agent that is currently idle.
//!
//! # Reference
//! Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains" (OX)

use std::collections::HashSet;

use rand::prelude::IndexedRandom;
use rand::seq::{index, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{AssignError, Result};
use crate::models::PerformanceMatrix;
use crate::validation::validate_genes;

/// A candidate assignment: `genes[task] = agent`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chromosome {
    /// Agent assigned to each task, indexed by task.
    pub genes: Vec<usize>,
}

impl Chromosome {
    /// Wraps a gene vector without validating it.
    pub fn new(genes: Vec<usize>) -> Self {
        Self { genes }
    }

    /// Creates a random chromosome: `num_tasks` distinct agents drawn
    /// without replacement from `0..num_agents`, in shuffled order.
    ///
    /// # Errors
    /// `InvalidArgument` if `num_agents < num_tasks`.
    pub fn random<R: Rng>(num_agents: usize, num_tasks: usize, rng: &mut R) -> Result<Self> {
        if num_agents < num_tasks {
            return Err(AssignError::InvalidArgument(format!(
                "cannot draw {num_tasks} distinct agents from {num_agents}"
            )));
        }
        let mut genes = index::sample(rng, num_agents, num_tasks).into_vec();
        genes.shuffle(rng);
        Ok(Self { genes })
    }

    /// Number of genes (tasks).
    #[inline]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the chromosome has no genes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Agent assigned to `task`.
    pub fn agent_for(&self, task: usize) -> Option<usize> {
        self.genes.get(task).copied()
    }

    /// Agents in `0..num_agents` that have no task, ascending.
    pub fn unassigned_agents(&self, num_agents: usize) -> Vec<usize> {
        let mut used = vec![false; num_agents];
        for &agent in &self.genes {
            if let Some(slot) = used.get_mut(agent) {
                *slot = true;
            }
        }
        (0..num_agents).filter(|&a| !used[a]).collect()
    }

    /// Checks the chromosome against the matrix dimensions.
    ///
    /// # Errors
    /// `InvariantViolation` listing every length, range and duplicate problem.
    pub fn validate(&self, matrix: &PerformanceMatrix) -> Result<()> {
        validate_genes(&self.genes, matrix.num_agents(), matrix.num_tasks())
            .map_err(|errors| AssignError::violation(&errors))
    }

    /// Whether the chromosome is a valid assignment for the matrix.
    pub fn is_valid(&self, matrix: &PerformanceMatrix) -> bool {
        self.validate(matrix).is_ok()
    }

    /// Total score: `Σ matrix[genes[t]][t]` over all tasks `t`.
    ///
    /// # Errors
    /// `InvariantViolation` if the chromosome is not a valid assignment;
    /// `InvalidArgument` if the total does not fit in an `i64`.
    pub fn fitness(&self, matrix: &PerformanceMatrix) -> Result<i64> {
        self.validate(matrix)?;
        self.genes
            .iter()
            .enumerate()
            .filter_map(|(task, &agent)| matrix.score(agent, task))
            .try_fold(0i64, i64::checked_add)
            .ok_or_else(|| {
                AssignError::InvalidArgument(format!(
                    "fitness of {:?} overflows i64; scale the matrix down",
                    self.genes
                ))
            })
    }
}

impl From<Vec<usize>> for Chromosome {
    fn from(genes: Vec<usize>) -> Self {
        Self::new(genes)
    }
}

/// Scores a chromosome against a performance matrix.
///
/// Free-function form of [`Chromosome::fitness`].
pub fn fitness(chromosome: &Chromosome, matrix: &PerformanceMatrix) -> Result<i64> {
    chromosome.fitness(matrix)
}

fn check_same_length(p1: &Chromosome, p2: &Chromosome) -> Result<()> {
    if p1.len() != p2.len() {
        return Err(AssignError::InvalidArgument(format!(
            "parent lengths differ: parent 1 has {}, parent 2 has {}",
            p1.len(),
            p2.len()
        )));
    }
    Ok(())
}

// ======================== Crossover operators ========================

/// Performs ordered crossover with random cut points.
///
/// Draws two distinct positions `start < end`, then delegates to
/// [`ordered_crossover_at`]. Chromosomes shorter than two genes have no
/// distinct cut points; parent 1 is cloned.
pub fn ordered_crossover<R: Rng>(
    p1: &Chromosome,
    p2: &Chromosome,
    rng: &mut R,
) -> Result<Chromosome> {
    check_same_length(p1, p2)?;
    let len = p1.len();
    if len < 2 {
        return Ok(p1.clone());
    }
    let cuts = index::sample(rng, len, 2);
    let (a, b) = (cuts.index(0), cuts.index(1));
    ordered_crossover_at(p1, p2, a.min(b), a.max(b))
}

/// Performs ordered crossover with fixed cut points.
///
/// Copies `p1[start..=end]` into the same positions of the child, then
/// fills the remaining positions left to right with `p2`'s genes in order,
/// skipping any agent already in the child. The child never repeats an
/// agent; when both parents use the same agent set it holds exactly
/// parent 1's agents.
///
/// # Errors
/// `InvalidArgument` if the parents differ in length or the cut points are
/// not `start < end < len`. `InvariantViolation` if parent 2 repeats agents
/// and so cannot fill the child.
pub fn ordered_crossover_at(
    p1: &Chromosome,
    p2: &Chromosome,
    start: usize,
    end: usize,
) -> Result<Chromosome> {
    check_same_length(p1, p2)?;
    let len = p1.len();
    if start >= end || end >= len {
        return Err(AssignError::InvalidArgument(format!(
            "cut points must satisfy start < end < {len}, got start={start}, end={end}"
        )));
    }

    let segment: HashSet<usize> = p1.genes[start..=end].iter().copied().collect();
    let mut donor = p2.genes.iter().filter(|g| !segment.contains(*g));

    let mut genes = Vec::with_capacity(len);
    for i in 0..len {
        if (start..=end).contains(&i) {
            genes.push(p1.genes[i]);
        } else if let Some(&g) = donor.next() {
            genes.push(g);
        } else {
            return Err(AssignError::InvariantViolation(
                "parent 2 ran out of unused agents during ordered crossover".into(),
            ));
        }
    }

    Ok(Chromosome { genes })
}

/// Performs slice-based one- or two-point crossover.
///
/// One point: `p1[..c] ++ p2[c..]`. Two points: `p1[..c1] ++ p2[c1..c2] ++
/// p1[c2..]`. Cut points lie in `1..len` so each parent contributes. With
/// fewer than three genes two distinct interior cuts do not exist and a
/// single cut is used.
///
/// The child may assign one agent to several tasks. Run
/// [`repair_duplicates`] before letting it into a population.
///
/// # Errors
/// `InvalidArgument` if `points` is not 1 or 2, or the parents differ in
/// length.
pub fn point_crossover<R: Rng>(
    p1: &Chromosome,
    p2: &Chromosome,
    points: u8,
    rng: &mut R,
) -> Result<Chromosome> {
    if !(1..=2).contains(&points) {
        return Err(AssignError::InvalidArgument(format!(
            "crossover points must be 1 or 2, got {points}"
        )));
    }
    check_same_length(p1, p2)?;
    let len = p1.len();
    if len < 2 {
        return Ok(p1.clone());
    }

    let genes = if points == 2 && len >= 3 {
        let cuts = index::sample(rng, len - 1, 2);
        let (a, b) = (cuts.index(0) + 1, cuts.index(1) + 1);
        let (c1, c2) = (a.min(b), a.max(b));
        [&p1.genes[..c1], &p2.genes[c1..c2], &p1.genes[c2..]].concat()
    } else {
        let cut = rng.random_range(1..len);
        [&p1.genes[..cut], &p2.genes[cut..]].concat()
    };

    Ok(Chromosome { genes })
}

/// Replaces repeated and out-of-range agents so the chromosome is a valid
/// assignment again.
///
/// The first in-range occurrence of each agent is kept. Later occurrences,
/// and any agent `>= num_agents`, take the next agent not yet used,
/// preferring the donors' genes in order and then the lowest free id in
/// `0..num_agents`.
///
/// # Errors
/// `InvariantViolation` if no free agent remains for a position.
pub fn repair_duplicates(
    chromosome: &mut Chromosome,
    donors: &[&Chromosome],
    num_agents: usize,
) -> Result<()> {
    let mut used: HashSet<usize> = HashSet::with_capacity(chromosome.len());
    let mut repeated = Vec::new();
    for (i, &agent) in chromosome.genes.iter().enumerate() {
        if agent >= num_agents || !used.insert(agent) {
            repeated.push(i);
        }
    }
    if repeated.is_empty() {
        return Ok(());
    }

    let mut candidates = donors
        .iter()
        .flat_map(|d| d.genes.iter().copied())
        .chain(0..num_agents);

    for pos in repeated {
        let replacement = candidates
            .by_ref()
            .find(|&a| a < num_agents && !used.contains(&a))
            .ok_or_else(|| {
                AssignError::InvariantViolation(format!(
                    "no free agent left to repair task {pos}"
                ))
            })?;
        used.insert(replacement);
        chromosome.genes[pos] = replacement;
    }
    Ok(())
}

// ======================== Mutation operators ========================

/// Swap mutation: exchanges the agents of two distinct random tasks.
pub fn swap_mutation<R: Rng>(chromosome: &mut Chromosome, rng: &mut R) {
    let len = chromosome.len();
    if len < 2 {
        return;
    }
    let picks = index::sample(rng, len, 2);
    chromosome.genes.swap(picks.index(0), picks.index(1));
}

/// Replace mutation: hands one random task to a random idle agent.
///
/// # Errors
/// `InvariantViolation` if every agent already has a task.
pub fn replace_mutation<R: Rng>(
    chromosome: &mut Chromosome,
    num_agents: usize,
    rng: &mut R,
) -> Result<()> {
    if chromosome.is_empty() {
        return Ok(());
    }
    let idle = chromosome.unassigned_agents(num_agents);
    let &agent = idle.choose(rng).ok_or_else(|| {
        AssignError::InvariantViolation(format!(
            "replace mutation needs an idle agent, but all {num_agents} are assigned"
        ))
    })?;
    let task = rng.random_range(0..chromosome.len());
    chromosome.genes[task] = agent;
    Ok(())
}

/// Mixed mutation: swap or replace with equal probability.
///
/// When no agent is idle (as many agents as tasks) replace is impossible
/// and swap is applied instead.
pub fn mixed_mutation<R: Rng>(
    chromosome: &mut Chromosome,
    num_agents: usize,
    rng: &mut R,
) -> Result<()> {
    let can_replace = num_agents > chromosome.len();
    if can_replace && rng.random_bool(0.5) {
        replace_mutation(chromosome, num_agents, rng)
    } else {
        swap_mutation(chromosome, rng);
        Ok(())
    }
}
