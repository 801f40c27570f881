//! Parent selection strategies.
//!
//! All strategies are non-destructive: they return a reference into the
//! population and never reorder or remove individuals, so the same
//! individual can be picked repeatedly.
//!
//! | Strategy | Probability of picking individual i |
//! |----------|-------------------------------------|
//! | Roulette | fitness_i / Σ fitness |
//! | Rank | (N − rank_i) / (N(N+1)/2), best rank = 0 |
//! | Tournament | best of k drawn without replacement |
//!
//! # Ties
//! - Rank: equal scores keep population order, so the earlier individual
//!   gets the better rank.
//! - Tournament: the first contestant drawn wins among equals. The draw
//!   order is random, so ties are broken at random.
//!
//! # Reference
//! Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//! Used in Genetic Algorithms"

use std::fmt;
use std::str::FromStr;

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::prelude::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Chromosome, Individual};
use crate::error::{AssignError, Result};
use crate::models::PerformanceMatrix;

/// Parent selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMethod {
    /// Fitness-proportional ("roulette wheel") selection.
    #[default]
    Roulette,
    /// Linear rank-based selection.
    Rank,
    /// k-way tournament selection.
    Tournament,
}

impl SelectionMethod {
    /// All strategies, in declaration order.
    pub const ALL: [SelectionMethod; 3] = [Self::Roulette, Self::Rank, Self::Tournament];

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Roulette => "roulette",
            Self::Rank => "rank",
            Self::Tournament => "tournament",
        }
    }
}

impl fmt::Display for SelectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SelectionMethod {
    type Err = AssignError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "roulette" => Ok(Self::Roulette),
            "rank" => Ok(Self::Rank),
            "tournament" => Ok(Self::Tournament),
            other => Err(AssignError::InvalidArgument(format!(
                "invalid selection method: {other} (expected roulette, rank or tournament)"
            ))),
        }
    }
}

/// What roulette selection does when total fitness is zero or negative.
///
/// The wheel has no area then, and the proportional walk is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouletteFallback {
    /// Pick uniformly at random.
    #[default]
    Uniform,
    /// Fail with `DegenerateInput`.
    Reject,
}

/// A configured selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector {
    /// Strategy.
    pub method: SelectionMethod,
    /// Contestants per tournament.
    pub tournament_size: usize,
    /// Roulette behavior on non-positive total fitness.
    pub roulette_fallback: RouletteFallback,
}

impl Default for Selector {
    fn default() -> Self {
        Self::new(SelectionMethod::default())
    }
}

impl Selector {
    /// Creates a selector with tournament size 3 and uniform roulette fallback.
    pub fn new(method: SelectionMethod) -> Self {
        Self {
            method,
            tournament_size: 3,
            roulette_fallback: RouletteFallback::default(),
        }
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Sets the roulette fallback.
    pub fn with_roulette_fallback(mut self, fallback: RouletteFallback) -> Self {
        self.roulette_fallback = fallback;
        self
    }

    /// Picks one parent from a scored population.
    pub fn select<'a, R: Rng>(
        &self,
        population: &'a [Individual],
        rng: &mut R,
    ) -> Result<&'a Individual> {
        let scores: Vec<i64> = population.iter().map(|ind| ind.fitness).collect();
        let idx = self.select_index(&scores, rng)?;
        Ok(&population[idx])
    }

    /// Picks one parent from unscored chromosomes, scoring them first.
    ///
    /// # Errors
    /// `InvariantViolation` if any chromosome is invalid for the matrix, plus
    /// the strategy's own errors.
    pub fn select_chromosome<'a, R: Rng>(
        &self,
        population: &'a [Chromosome],
        matrix: &PerformanceMatrix,
        rng: &mut R,
    ) -> Result<&'a Chromosome> {
        let scores = population
            .iter()
            .map(|c| c.fitness(matrix))
            .collect::<Result<Vec<_>>>()?;
        let idx = self.select_index(&scores, rng)?;
        Ok(&population[idx])
    }

    fn select_index<R: Rng>(&self, scores: &[i64], rng: &mut R) -> Result<usize> {
        match self.method {
            SelectionMethod::Roulette => roulette_index(scores, self.roulette_fallback, rng),
            SelectionMethod::Rank => rank_index(scores, rng),
            SelectionMethod::Tournament => tournament_index(scores, self.tournament_size, rng),
        }
    }
}

fn ensure_non_empty(scores: &[i64]) -> Result<()> {
    if scores.is_empty() {
        return Err(AssignError::InvalidArgument(
            "cannot select from an empty population".into(),
        ));
    }
    Ok(())
}

// ======================== Roulette ========================

/// Roulette selection over a scored population.
pub fn roulette_selection<'a, R: Rng>(
    population: &'a [Individual],
    fallback: RouletteFallback,
    rng: &mut R,
) -> Result<&'a Individual> {
    Selector::new(SelectionMethod::Roulette)
        .with_roulette_fallback(fallback)
        .select(population, rng)
}

/// Walks the wheel: index of the first individual whose running fitness
/// total reaches `pick`.
///
/// `None` only if `pick` exceeds the total.
pub fn roulette_pick(scores: &[i64], pick: f64) -> Option<usize> {
    let mut current = 0i128;
    scores.iter().position(|&f| {
        current += i128::from(f);
        current as f64 >= pick
    })
}

fn roulette_index<R: Rng>(scores: &[i64], fallback: RouletteFallback, rng: &mut R) -> Result<usize> {
    ensure_non_empty(scores)?;
    // i128: a population of in-range fitnesses can still sum past i64::MAX.
    let total: i128 = scores.iter().map(|&f| i128::from(f)).sum();

    if total <= 0 {
        return match fallback {
            RouletteFallback::Uniform => {
                tracing::debug!(total = %total, "non-positive total fitness, roulette picks uniformly");
                Ok(rng.random_range(0..scores.len()))
            }
            RouletteFallback::Reject => Err(AssignError::DegenerateInput(format!(
                "roulette selection needs positive total fitness, got {total}"
            ))),
        };
    }

    let pick = rng.random_range(0.0..=total as f64);
    Ok(roulette_pick(scores, pick).unwrap_or(scores.len() - 1))
}

// ======================== Rank ========================

/// Rank selection over a scored population.
pub fn rank_selection<'a, R: Rng>(
    population: &'a [Individual],
    rng: &mut R,
) -> Result<&'a Individual> {
    Selector::new(SelectionMethod::Rank).select(population, rng)
}

fn rank_index<R: Rng>(scores: &[i64], rng: &mut R) -> Result<usize> {
    ensure_non_empty(scores)?;
    let n = scores.len();

    let mut ranked: Vec<usize> = (0..n).collect();
    ranked.sort_by(|&a, &b| scores[b].cmp(&scores[a]));

    // Weight N − k for rank k; normalizing by N(N+1)/2 is left to WeightedIndex.
    let weights = (0..n).map(|rank| (n - rank) as u64);
    let dist = WeightedIndex::new(weights)
        .map_err(|e| AssignError::InvariantViolation(format!("rank weights: {e}")))?;
    Ok(ranked[dist.sample(rng)])
}

// ======================== Tournament ========================

/// Tournament selection over a scored population.
pub fn tournament_selection<'a, R: Rng>(
    population: &'a [Individual],
    size: usize,
    rng: &mut R,
) -> Result<&'a Individual> {
    Selector::new(SelectionMethod::Tournament)
        .with_tournament_size(size)
        .select(population, rng)
}

fn tournament_index<R: Rng>(scores: &[i64], size: usize, rng: &mut R) -> Result<usize> {
    ensure_non_empty(scores)?;
    if size == 0 || size > scores.len() {
        return Err(AssignError::InvariantViolation(format!(
            "tournament of {size} needs between 1 and {} contestants",
            scores.len()
        )));
    }

    let indices: Vec<usize> = (0..scores.len()).collect();
    indices
        .choose_multiple(rng, size)
        .copied()
        .reduce(|best, i| if scores[i] > scores[best] { i } else { best })
        .ok_or_else(|| AssignError::InvariantViolation("empty tournament".into()))
}
