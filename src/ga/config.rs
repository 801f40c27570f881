//! GA run configuration.
//!
//! Defaults reproduce the classic setup: roulette selection, 20
//! individuals, 100 generations, crossover 0.8, mutation 0.1.
//!
//! A tuned-parameters file with the keys `selection_method`,
//! `population_size`, `num_generations`, `crossover_rate` and
//! `mutation_rate` deserializes directly:
//!
//! ```
//! use u_assign::ga::{GaConfig, SelectionMethod};
//!
//! let config = GaConfig::from_json_str(r#"{
//!     "selection_method": "tournament",
//!     "population_size": 120,
//!     "num_generations": 900,
//!     "crossover_rate": 0.71,
//!     "mutation_rate": 0.12
//! }"#).unwrap();
//! assert_eq!(config.selection, SelectionMethod::Tournament);
//! assert_eq!(config.generations, 900);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::operators::{CrossoverType, GeneticOperators, MutationType};
use super::selection::{RouletteFallback, SelectionMethod, Selector};
use crate::error::Result;

/// Hyperparameters of one GA run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Parent selection strategy.
    #[serde(alias = "selection_method")]
    pub selection: SelectionMethod,
    /// Individuals per generation.
    pub population_size: usize,
    /// Generations to run.
    #[serde(alias = "num_generations")]
    pub generations: usize,
    /// Probability that a child is bred by crossover rather than cloned.
    pub crossover_rate: f64,
    /// Probability that a child is mutated.
    pub mutation_rate: f64,
    /// Contestants per tournament.
    pub tournament_size: usize,
    /// Crossover strategy.
    pub crossover: CrossoverType,
    /// Mutation strategy.
    pub mutation: MutationType,
    /// Roulette behavior on non-positive total fitness.
    pub roulette_fallback: RouletteFallback,
    /// Seed for reproducible runs; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Breed children on the rayon thread pool.
    pub parallel: bool,
    /// Stop early after this many generations without a new best.
    /// `None` always runs the full generation count.
    pub stall_generations: Option<usize>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            selection: SelectionMethod::Roulette,
            population_size: 20,
            generations: 100,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            tournament_size: 3,
            crossover: CrossoverType::Ordered,
            mutation: MutationType::Mixed,
            roulette_fallback: RouletteFallback::Uniform,
            seed: None,
            parallel: false,
            stall_generations: None,
        }
    }
}

impl GaConfig {
    /// Parses a configuration from JSON. Missing keys take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    /// Sets the parent selection method.
    pub fn with_selection(mut self, selection: SelectionMethod) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the number of individuals per generation.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the number of generations to run.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the probability that a child is bred by crossover.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the probability that a child is mutated.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the contestants per tournament.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, crossover: CrossoverType) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the mutation operator.
    pub fn with_mutation(mut self, mutation: MutationType) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets the roulette behavior for non-positive total fitness.
    pub fn with_roulette_fallback(mut self, fallback: RouletteFallback) -> Self {
        self.roulette_fallback = fallback;
        self
    }

    /// Fixes the random seed for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Breeds children on the rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Stops after this many generations without a new best.
    pub fn with_stall_generations(mut self, generations: usize) -> Self {
        self.stall_generations = Some(generations);
        self
    }

    /// The configured selection strategy.
    pub fn selector(&self) -> Selector {
        Selector::new(self.selection)
            .with_tournament_size(self.tournament_size)
            .with_roulette_fallback(self.roulette_fallback)
    }

    /// The configured crossover and mutation strategies.
    pub fn operators(&self) -> GeneticOperators {
        GeneticOperators {
            crossover_type: self.crossover,
            mutation_type: self.mutation,
        }
    }
}
