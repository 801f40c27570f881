//! Assignment domain models.
//!
//! Provides the input (performance scores) and the decoded output
//! (task → agent plan) of an assignment problem.
//!
//! # Domain Mappings
//!
//! | u-assign | Staffing | Computing | Logistics |
//! |----------|----------|-----------|-----------|
//! | Agent | Employee | Worker node | Vehicle |
//! | Task | Project role | Job | Delivery |
//! | Score | Skill rating | Throughput | Margin |

mod assignment;
mod matrix;

pub use assignment::{Assignment, AssignmentPlan};
pub use matrix::PerformanceMatrix;
