//! Solver entry point: evolves a timetable for one instance file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use u_timetable::TimetableError;
use u_timetable::config::SolverConfig;
use u_timetable::ga::{GaRunner, TimetableProblem};
use u_timetable::io::{load_instance, save_solution};

#[derive(Parser, Debug)]
#[command(name = "solve")]
#[command(about = "Evolve a curriculum-based course timetable")]
struct Args {
    /// Instance file (ITC-2007 CTT format)
    instance: PathBuf,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Solution file to write (overrides config)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Random seed (overrides config)
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Number of generations (overrides config)
    #[arg(short = 'g', long)]
    generations: Option<usize>,

    /// Population size (overrides config)
    #[arg(short = 'p', long)]
    population: Option<usize>,

    /// Debug output
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn enable_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), TimetableError> {
    let mut config = SolverConfig::load(args.config.as_deref())?;
    if let Some(path) = args.output {
        config.output.solution_path = path;
    }
    if let Some(seed) = args.seed {
        config.ga.seed = Some(seed);
    }
    if let Some(n) = args.generations {
        config.ga.max_generations = n;
    }
    if let Some(n) = args.population {
        config.ga.population_size = n;
    }
    config.validate()?;

    let instance = load_instance(&args.instance)?;
    info!(
        instance = instance.name(),
        courses = instance.courses().len(),
        rooms = instance.rooms().len(),
        events = instance.total_events(),
        "instance loaded"
    );
    debug!(?config, "solver configuration");

    let problem = TimetableProblem::new(&instance).with_weights(config.weights);
    let result = GaRunner::run(&problem, &config.ga)?;

    let timetable = problem.decode(&result.best);
    let breakdown = problem.breakdown(&timetable);
    save_solution(&config.output.solution_path, &instance, &timetable.assignments)?;

    info!(
        generations = result.generations,
        best_fitness = result.best_fitness,
        placed = timetable.assignment_count(),
        path = %config.output.solution_path.display(),
        "solution written"
    );
    info!("{breakdown}");
    if !timetable.is_complete() {
        warn!(
            unplaced = timetable.unplaced_count(),
            "some lectures could not be placed"
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    enable_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
