//! Assignment optimizer CLI
//!
//! Loads a performance matrix (agents × tasks, JSON) and searches for the
//! best task → agent assignment with the genetic algorithm.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use u_assign::ga::{GaConfig, GaResult, GaRunner, SelectionMethod};
use u_assign::models::{AssignmentPlan, PerformanceMatrix};
use u_assign::Result;

#[derive(Parser, Debug)]
#[command(name = "assign")]
#[command(about = "Assign tasks to agents with a genetic algorithm")]
struct Args {
    /// Performance matrix JSON: [[score, ...], ...] with one row per agent
    #[arg(short = 'm', long)]
    matrix: PathBuf,

    /// Tuned hyperparameters JSON (overridden by the flags below)
    #[arg(short = 'p', long)]
    params: Option<PathBuf>,

    /// Selection method: roulette, rank or tournament
    #[arg(short = 's', long)]
    selection: Option<SelectionMethod>,

    /// Population size
    #[arg(long)]
    population: Option<usize>,

    /// Number of generations
    #[arg(short = 'g', long)]
    generations: Option<usize>,

    /// Crossover probability (0..=1)
    #[arg(long)]
    crossover_rate: Option<f64>,

    /// Mutation probability (0..=1)
    #[arg(long)]
    mutation_rate: Option<f64>,

    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Breed children in parallel
    #[arg(long)]
    parallel: bool,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,

    /// Log every generation
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> Result<GaConfig> {
        let mut config = match &self.params {
            Some(path) => GaConfig::from_path(path)?,
            None => GaConfig::default(),
        };
        if let Some(selection) = self.selection {
            config.selection = selection;
        }
        if let Some(size) = self.population {
            config.population_size = size;
        }
        if let Some(generations) = self.generations {
            config.generations = generations;
        }
        if let Some(rate) = self.crossover_rate {
            config.crossover_rate = rate;
        }
        if let Some(rate) = self.mutation_rate {
            config.mutation_rate = rate;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        config.parallel |= self.parallel;
        Ok(config)
    }
}

fn print_report(result: &GaResult, plan: &AssignmentPlan) {
    println!("Generations run: {}", result.generations());
    println!("Best solution:   {:?}", result.best.genes);
    println!("Best score:      {}", result.best_fitness);
    println!();
    println!("  task  agent  score");
    for a in &plan.assignments {
        println!("  {:>4}  {:>5}  {:>5}", a.task, a.agent, a.score);
    }
    if !plan.idle_agents.is_empty() {
        println!();
        println!("Idle agents: {:?}", plan.idle_agents);
    }
}

fn run(args: &Args) -> Result<()> {
    let matrix = PerformanceMatrix::from_path(&args.matrix)?;
    let config = args.config()?;
    let result = GaRunner::run(&matrix, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let plan = AssignmentPlan::decode(&result.best, &matrix)?;
        print_report(&result, &plan);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
