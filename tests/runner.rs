//! End-to-end runs through the public API

use std::io::Write;

use u_assign::ga::{GaConfig, GaRunner, SelectionMethod};
use u_assign::models::{AssignmentPlan, PerformanceMatrix};
use u_assign::AssignError;

/// 13 agents × 10 tasks.
fn staffing_matrix() -> PerformanceMatrix {
    let rows = (0..13)
        .map(|a| (0..10).map(|t| ((a * 37 + t * 11) % 19) as i64).collect())
        .collect();
    PerformanceMatrix::new(rows).unwrap()
}

/// Best score by exhaustive search, for small matrices only.
fn exhaustive_best(matrix: &PerformanceMatrix) -> i64 {
    fn go(matrix: &PerformanceMatrix, task: usize, used: &mut Vec<bool>) -> i64 {
        if task == matrix.num_tasks() {
            return 0;
        }
        let mut best = i64::MIN;
        for agent in 0..matrix.num_agents() {
            if !used[agent] {
                used[agent] = true;
                let score = matrix.score(agent, task).unwrap() + go(matrix, task + 1, used);
                best = best.max(score);
                used[agent] = false;
            }
        }
        best
    }
    go(matrix, 0, &mut vec![false; matrix.num_agents()])
}

#[test]
fn test_run_from_json_files() {
    let dir = tempfile::tempdir().unwrap();

    let matrix_path = dir.path().join("scores.json");
    let mut f = std::fs::File::create(&matrix_path).unwrap();
    write!(f, "{}", serde_json::to_string(&staffing_matrix()).unwrap()).unwrap();

    let params_path = dir.path().join("best_params.json");
    std::fs::write(
        &params_path,
        r#"{"selection_method": "rank", "population_size": 40, "num_generations": 50,
            "crossover_rate": 0.7, "mutation_rate": 0.2}"#,
    )
    .unwrap();

    let matrix = PerformanceMatrix::from_path(&matrix_path).unwrap();
    let config = GaConfig::from_path(&params_path).unwrap().with_seed(42);
    assert_eq!(config.selection, SelectionMethod::Rank);

    let result = GaRunner::run(&matrix, &config).unwrap();
    assert_eq!(result.generations(), 50);
    assert_eq!(result.population.len(), 40);

    let plan = AssignmentPlan::decode(&result.best, &matrix).unwrap();
    assert_eq!(plan.assignments.len(), 10);
    assert_eq!(plan.idle_agents.len(), 3);
    assert_eq!(plan.total_score(), result.best_fitness);
}

#[test]
fn test_reaches_exhaustive_optimum_on_small_problem() {
    let rows = vec![
        vec![7, 2, 9, 4],
        vec![3, 8, 1, 6],
        vec![5, 5, 5, 5],
        vec![9, 1, 2, 8],
        vec![2, 9, 7, 3],
        vec![6, 4, 8, 1],
    ];
    let matrix = PerformanceMatrix::new(rows).unwrap();
    let optimum = exhaustive_best(&matrix);

    let config = GaConfig::default()
        .with_selection(SelectionMethod::Tournament)
        .with_population_size(40)
        .with_generations(150)
        .with_mutation_rate(0.3)
        .with_seed(42);
    let result = GaRunner::run(&matrix, &config).unwrap();
    assert_eq!(result.best_fitness, optimum);
}

#[test]
fn test_negative_scores_with_roulette() {
    let rows = (0..6)
        .map(|a| (0..4).map(|t| -((a + t) as i64) - 1).collect())
        .collect();
    let matrix = PerformanceMatrix::new(rows).unwrap();
    let config = GaConfig::default().with_generations(20).with_seed(1);
    let result = GaRunner::run(&matrix, &config).unwrap();
    assert!(result.best_fitness < 0);
    assert!(result.best.is_valid(&matrix));
}

#[test]
fn test_missing_matrix_file() {
    let err = PerformanceMatrix::from_path("/nonexistent/scores.json").unwrap_err();
    assert!(matches!(err, AssignError::Io(_)));
}

#[test]
fn test_result_serializes() {
    let matrix = staffing_matrix();
    let result = GaRunner::run(&matrix, &GaConfig::default().with_generations(3).with_seed(2)).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["best_fitness"], result.best_fitness);
    assert_eq!(json["history"].as_array().unwrap().len(), 3);
    assert_eq!(json["best"].as_array().unwrap().len(), 10);
}
