//! Performance matrix model.
//!
//! Scores for every (agent, task) pair. Rows are agents, columns are
//! tasks, both 0-based. The matrix is immutable once built.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{AssignError, Result};
use crate::validation::validate_rows;

/// Agent × task score table.
///
/// Stored row-major in a flat buffer. Serializes as a 2-D array of agent
/// rows; deserializes from either that array or `{ "scores": [[...]] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "Vec<Vec<i64>>")]
pub struct PerformanceMatrix {
    scores: Vec<i64>,
    num_agents: usize,
    num_tasks: usize,
}

/// Accepted on-disk shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum MatrixFile {
    Rows(Vec<Vec<i64>>),
    Wrapped { scores: Vec<Vec<i64>> },
}

impl PerformanceMatrix {
    /// Builds a matrix from agent rows.
    ///
    /// # Errors
    /// `InvalidArgument` if there are no agents, no tasks, or the rows differ
    /// in length.
    pub fn new(rows: Vec<Vec<i64>>) -> Result<Self> {
        validate_rows(&rows).map_err(|errors| AssignError::invalid(&errors))?;

        let num_agents = rows.len();
        let num_tasks = rows[0].len();
        let scores = rows.into_iter().flatten().collect();

        Ok(Self {
            scores,
            num_agents,
            num_tasks,
        })
    }

    /// Parses a matrix from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON matrix from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Reads a JSON matrix file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Number of agents (rows).
    #[inline]
    pub fn num_agents(&self) -> usize {
        self.num_agents
    }

    /// Number of tasks (columns), i.e. chromosome length.
    #[inline]
    pub fn num_tasks(&self) -> usize {
        self.num_tasks
    }

    /// Score of `agent` performing `task`, or `None` if either is out of range.
    #[inline]
    pub fn score(&self, agent: usize, task: usize) -> Option<i64> {
        if agent < self.num_agents && task < self.num_tasks {
            Some(self.scores[agent * self.num_tasks + task])
        } else {
            None
        }
    }

    /// All task scores of one agent.
    pub fn row(&self, agent: usize) -> Option<&[i64]> {
        if agent < self.num_agents {
            let start = agent * self.num_tasks;
            Some(&self.scores[start..start + self.num_tasks])
        } else {
            None
        }
    }

    /// Copies the matrix back into agent rows.
    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        self.scores
            .chunks(self.num_tasks)
            .map(|row| row.to_vec())
            .collect()
    }
}

impl<'de> Deserialize<'de> for PerformanceMatrix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let rows = match MatrixFile::deserialize(deserializer)? {
            MatrixFile::Rows(rows) | MatrixFile::Wrapped { scores: rows } => rows,
        };
        Self::new(rows).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<Vec<Vec<i64>>> for PerformanceMatrix {
    type Error = AssignError;

    fn try_from(rows: Vec<Vec<i64>>) -> Result<Self> {
        Self::new(rows)
    }
}

impl From<PerformanceMatrix> for Vec<Vec<i64>> {
    fn from(matrix: PerformanceMatrix) -> Self {
        matrix.to_rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PerformanceMatrix {
        PerformanceMatrix::new(vec![vec![5, 1], vec![2, 8], vec![0, 0]]).unwrap()
    }

    #[test]
    fn test_dimensions() {
        let m = sample();
        assert_eq!(m.num_agents(), 3);
        assert_eq!(m.num_tasks(), 2);
    }

    #[test]
    fn test_score_lookup() {
        let m = sample();
        assert_eq!(m.score(1, 0), Some(2));
        assert_eq!(m.score(0, 1), Some(1));
        assert_eq!(m.score(3, 0), None);
        assert_eq!(m.score(0, 2), None);
        assert_eq!(m.row(1), Some(&[2, 8][..]));
        assert_eq!(m.row(3), None);
    }

    #[test]
    fn test_rejects_ragged() {
        let err = PerformanceMatrix::new(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert!(matches!(err, AssignError::InvalidArgument(_)));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(PerformanceMatrix::new(vec![]).is_err());
        assert!(PerformanceMatrix::new(vec![vec![]]).is_err());
    }

    #[test]
    fn test_json_shapes() {
        let bare = PerformanceMatrix::from_json_str("[[5, 1], [2, 8], [0, 0]]").unwrap();
        let wrapped =
            PerformanceMatrix::from_json_str(r#"{"scores": [[5, 1], [2, 8], [0, 0]]}"#).unwrap();
        assert_eq!(bare, sample());
        assert_eq!(wrapped, sample());
    }

    #[test]
    fn test_json_serializes_as_rows() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, "[[5,1],[2,8],[0,0]]");
    }

    #[test]
    fn test_json_ragged_rejected() {
        assert!(PerformanceMatrix::from_json_str("[[1, 2], [3]]").is_err());
    }
}
