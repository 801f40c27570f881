//! GA-based assignment optimization.
//!
//! Searches for the task → agent assignment with the highest total score
//! using a generational genetic algorithm with single-individual elitism.
//!
//! # Encoding
//!
//! A chromosome holds one agent id per task (0-based). Agents are pairwise
//! distinct, so a chromosome is a partial permutation of the agent range.
//! Every operator in this module preserves that invariant.
//!
//! # Submodules
//!
//! - [`operators`]: Runtime-selectable crossover and mutation strategies
//! - [`selection`]: Roulette, rank and tournament parent selection
//!
//! # Reference
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//!   Machine Learning"

mod chromosome;
mod config;
pub mod operators;
mod population;
mod runner;
pub mod selection;

pub use chromosome::{
    fitness, mixed_mutation, ordered_crossover, ordered_crossover_at, point_crossover,
    repair_duplicates, replace_mutation, swap_mutation, Chromosome,
};
pub use config::GaConfig;
pub use operators::{CrossoverType, GeneticOperators, MutationType};
pub use population::{
    best_individual, evaluate_population, init_population, sort_descending, Individual,
};
pub use runner::{GaResult, GaRunner, GenerationStats};
pub use selection::{
    rank_selection, roulette_pick, roulette_selection, tournament_selection, RouletteFallback,
    SelectionMethod, Selector,
};
