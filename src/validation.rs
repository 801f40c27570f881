//! Input validation for assignment problems.
//!
//! Checks structural integrity of performance matrices, chromosomes, and
//! GA configurations before (or while) searching. Detects:
//! - Empty or ragged matrices
//! - Chromosomes of the wrong length, with out-of-range or repeated agents
//! - Out-of-range rates, empty populations, too few agents for the tasks
//!
//! Every check reports all problems it finds rather than stopping at the first.

use crate::ga::{CrossoverType, GaConfig};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The matrix has no agent rows.
    EmptyMatrix,
    /// The matrix has rows but no task columns.
    NoTasks,
    /// A row's length differs from the first row's.
    RaggedRow,
    /// A chromosome does not have one gene per task.
    LengthMismatch,
    /// A gene names an agent outside the matrix.
    AgentOutOfRange,
    /// An agent is assigned to more than one task.
    DuplicateAgent,
    /// Fewer agents than tasks: no valid chromosome exists.
    TooFewAgents,
    /// Population size of zero.
    EmptyPopulation,
    /// A probability outside `[0, 1]`.
    InvalidRate,
    /// Tournament size of zero.
    InvalidTournamentSize,
    /// Point crossover with a cut count other than 1 or 2.
    InvalidCrossoverPoints,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the shape of a performance matrix given as agent rows.
///
/// Checks:
/// 1. At least one agent row
/// 2. At least one task column
/// 3. Every row has the same number of tasks as the first
pub fn validate_rows(rows: &[Vec<i64>]) -> ValidationResult {
    let mut errors = Vec::new();

    let Some(first) = rows.first() else {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyMatrix,
            "performance matrix has no agents",
        ));
        return finish(errors);
    };

    let num_tasks = first.len();
    if num_tasks == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoTasks,
            "performance matrix has no tasks",
        ));
    }

    for (agent, row) in rows.iter().enumerate().skip(1) {
        if row.len() != num_tasks {
            errors.push(ValidationError::new(
                ValidationErrorKind::RaggedRow,
                format!(
                    "agent {agent} has {} task scores, expected {num_tasks}",
                    row.len()
                ),
            ));
        }
    }

    finish(errors)
}

/// Validates a chromosome's genes against the matrix dimensions.
///
/// Checks:
/// 1. Exactly `num_tasks` genes
/// 2. Every agent id is `< num_agents`
/// 3. No agent appears twice
pub fn validate_genes(genes: &[usize], num_agents: usize, num_tasks: usize) -> ValidationResult {
    let mut errors = Vec::new();

    if genes.len() != num_tasks {
        errors.push(ValidationError::new(
            ValidationErrorKind::LengthMismatch,
            format!("chromosome has {} genes, expected {num_tasks}", genes.len()),
        ));
    }

    let mut seen = vec![false; num_agents];
    for (task, &agent) in genes.iter().enumerate() {
        match seen.get_mut(agent) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::AgentOutOfRange,
                format!("task {task} assigned to agent {agent}, but only {num_agents} agents exist"),
            )),
            Some(true) => errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateAgent,
                format!("agent {agent} assigned to more than one task (again at task {task})"),
            )),
            Some(slot) => *slot = true,
        }
    }

    finish(errors)
}

/// Validates a GA configuration against a problem of the given size.
///
/// Checks:
/// 1. Population size ≥ 1
/// 2. Crossover and mutation rates within `[0, 1]`
/// 3. Tournament size ≥ 1
/// 4. Point crossover uses 1 or 2 cut points
/// 5. At least as many agents as tasks
pub fn validate_config(config: &GaConfig, num_agents: usize, num_tasks: usize) -> ValidationResult {
    let mut errors = Vec::new();

    if config.population_size == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyPopulation,
            "population size must be at least 1",
        ));
    }

    for (name, rate) in [
        ("crossover rate", config.crossover_rate),
        ("mutation rate", config.mutation_rate),
    ] {
        if !(0.0..=1.0).contains(&rate) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRate,
                format!("{name} {rate} is outside [0, 1]"),
            ));
        }
    }

    if config.tournament_size == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTournamentSize,
            "tournament size must be at least 1",
        ));
    }

    if let CrossoverType::Point(points) = config.crossover {
        if !(1..=2).contains(&points) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCrossoverPoints,
                format!("crossover points must be 1 or 2, got {points}"),
            ));
        }
    }

    if num_agents < num_tasks {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooFewAgents,
            format!("{num_agents} agents cannot cover {num_tasks} tasks without double-booking"),
        ));
    }

    finish(errors)
}
