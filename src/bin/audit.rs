//! Auditor entry point: reports violations and costs of a solution file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use u_timetable::TimetableError;
use u_timetable::audit::AuditReport;
use u_timetable::io::{load_instance, load_solution};

#[derive(Parser, Debug)]
#[command(name = "audit")]
#[command(about = "Check a timetable against its instance")]
struct Args {
    /// Instance file (ITC-2007 CTT format)
    instance: PathBuf,

    /// Solution file to check
    solution: PathBuf,
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<AuditReport, TimetableError> {
    let instance = load_instance(&args.instance)?;
    let solution = load_solution(&args.solution, &instance)?;
    Ok(AuditReport::compute(&instance, &solution))
}

fn main() -> ExitCode {
    let args = Args::parse();
    enable_tracing();

    match run(&args) {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
