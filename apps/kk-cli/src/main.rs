use clap::Parser;
use kk_app::{AppError, Simulation};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kk")]
#[command(about = "kinetic-kebab - fluid network simulation", long_about = None)]
struct Cli {
    /// Simulated duration to advance, in seconds
    #[arg(short, long)]
    duration: f64,

    /// Path to the model file (JSON or YAML)
    #[arg(short, long)]
    input: PathBuf,

    /// Solve for steady state before advancing
    #[arg(long)]
    steady: bool,

    /// History output path (overrides RecorderOptions.path)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Project(#[from] kk_project::ProjectError),

    #[error(transparent)]
    Results(#[from] kk_results::ResultsError),
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let model = kk_project::load(&cli.input)?;
    let output = cli.output.clone().or_else(|| {
        model
            .recorder_options
            .as_ref()
            .map(|r| PathBuf::from(&r.path))
    });

    let mut sim = Simulation::from_model(&model)?;
    let started = Instant::now();

    if cli.steady {
        let solution = sim.solve_steady()?;
        println!(
            "Steady state: {} iterations, residual norm {:e}",
            solution.iterations, solution.residual_norm
        );
    }

    sim.step_duration(cli.duration)?;
    println!(
        "Advanced to t = {} s in {:.3} s wall time",
        sim.time()?,
        started.elapsed().as_secs_f64()
    );

    match output {
        Some(path) => save_history(&sim, &path)?,
        None => print_state(&sim)?,
    }

    sim.end();
    Ok(())
}

fn save_history(sim: &Simulation, path: &Path) -> Result<(), CliError> {
    let history = sim.history()?;
    kk_results::write_history(path, sim.state_names()?, history)?;
    info!(path = %path.display(), samples = history.len(), "history written");
    println!("Wrote {} samples to {}", history.len(), path.display());
    Ok(())
}

fn print_state(sim: &Simulation) -> Result<(), CliError> {
    let names = sim.state_names()?;
    let vals = sim.state_vals()?;
    let width = names.iter().map(String::len).max().unwrap_or(0);
    for (name, val) in names.iter().zip(&vals) {
        println!("{name:<width$}  {val:.6e}");
    }
    Ok(())
}
