//! Assignment plan (decoded solution) model.
//!
//! Turns a chromosome into the list of (task, agent, score) triples it
//! encodes, with summary figures for reporting.

use serde::{Deserialize, Serialize};

use super::PerformanceMatrix;
use crate::error::Result;
use crate::ga::Chromosome;

/// One task handed to one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Task index.
    pub task: usize,
    /// Agent index.
    pub agent: usize,
    /// Score of the agent on this task.
    pub score: i64,
}

/// A complete task → agent assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentPlan {
    /// One entry per task, in task order.
    pub assignments: Vec<Assignment>,
    /// Agents left without a task, ascending.
    pub idle_agents: Vec<usize>,
}

impl AssignmentPlan {
    /// Decodes a chromosome against its matrix.
    ///
    /// # Errors
    /// `InvariantViolation` if the chromosome is not a valid assignment;
    /// `InvalidArgument` if its total score overflows `i64`.
    pub fn decode(chromosome: &Chromosome, matrix: &PerformanceMatrix) -> Result<Self> {
        chromosome.fitness(matrix)?;
        let assignments = chromosome
            .genes
            .iter()
            .enumerate()
            .filter_map(|(task, &agent)| {
                matrix
                    .score(agent, task)
                    .map(|score| Assignment { task, agent, score })
            })
            .collect();

        Ok(Self {
            assignments,
            idle_agents: chromosome.unassigned_agents(matrix.num_agents()),
        })
    }

    /// Sum of all scores (equals the chromosome's fitness). Saturates at the
    /// `i64` bounds for hand-built plans; [`decode`](Self::decode) rejects
    /// totals that do not fit.
    pub fn total_score(&self) -> i64 {
        self.assignments
            .iter()
            .fold(0i64, |acc, a| acc.saturating_add(a.score))
    }

    /// Weakest single assignment, if any.
    pub fn min_score(&self) -> Option<i64> {
        self.assignments.iter().map(|a| a.score).min()
    }

    /// Mean score per task (0.0 for an empty plan).
    pub fn mean_score(&self) -> f64 {
        if self.assignments.is_empty() {
            0.0
        } else {
            self.assignments.iter().map(|a| a.score as f64).sum::<f64>()
                / self.assignments.len() as f64
        }
    }

    /// Agent assigned to `task`.
    pub fn agent_for(&self, task: usize) -> Option<usize> {
        self.assignments
            .iter()
            .find(|a| a.task == task)
            .map(|a| a.agent)
    }
}
