//! Task-to-agent assignment by genetic algorithm.
//!
//! Assigns a fixed number of tasks to distinct agents so that the summed
//! performance score is maximal, without enumerating every permutation.
//!
//! # Modules
//!
//! - **`models`**: `PerformanceMatrix` (agent × task scores) and
//!   `AssignmentPlan` (decoded solution)
//! - **`ga`**: Chromosome encoding, selection strategies, crossover and
//!   mutation operators, and the generational runner
//! - **`validation`**: Matrix, chromosome and configuration integrity checks
//!
//! # Example
//!
//! ```
//! use u_assign::ga::{GaConfig, GaRunner};
//! use u_assign::models::{AssignmentPlan, PerformanceMatrix};
//!
//! let matrix = PerformanceMatrix::from_json_str("[[5, 1], [2, 8], [0, 0]]").unwrap();
//! let result = GaRunner::run(&matrix, &GaConfig::default().with_seed(42)).unwrap();
//! let plan = AssignmentPlan::decode(&result.best, &matrix).unwrap();
//! assert_eq!(plan.total_score(), result.best_fitness);
//! ```
//!
//! # Indexing
//!
//! Agents and tasks are 0-based throughout.

pub mod error;
pub mod ga;
pub mod models;
pub mod validation;

pub use error::{AssignError, Result};
