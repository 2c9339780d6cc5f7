use clap::{Parser, Subcommand};
use fl_project::{ProjectError, Scenario};
use fl_sim::{SimError, SimRecord, run_sim};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "fl-cli")]
#[command(about = "Flooding CLI - progressive flooding of compartmented vessels", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate scenario file syntax, structure and vessel geometry
    Validate {
        /// Path to the scenario file (YAML, or JSON by extension)
        scenario_path: PathBuf,
    },
    /// Run a scenario and print final water areas
    Run {
        /// Path to the scenario file (YAML, or JSON by extension)
        scenario_path: PathBuf,
        /// Time step in seconds (overrides the scenario)
        #[arg(long)]
        dt: Option<f64>,
        /// End time in seconds (overrides the scenario)
        #[arg(long)]
        t_end: Option<f64>,
        /// Write the recorded water areas as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    // Initialize tracing; RUST_LOG=fl_solver=trace shows per-connection flow.
    let filter = log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Run {
            scenario_path,
            dt,
            t_end,
            output,
        } => cmd_run(&scenario_path, dt, t_end, output.as_deref()),
    }
}

/// Directives from the environment, or the default when unset or malformed.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn cmd_validate(scenario_path: &Path) -> CliResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = fl_project::load(scenario_path)?;
    let assembled = fl_project::assemble(&scenario)?;
    println!("✓ Scenario is valid");
    println!(
        "  {} compartments, {} connections",
        assembled.vessel.compartments().len(),
        assembled.vessel.connection_count()
    );
    Ok(())
}

fn cmd_run(
    scenario_path: &Path,
    dt: Option<f64>,
    t_end: Option<f64>,
    output: Option<&Path>,
) -> CliResult<()> {
    let scenario: Scenario = fl_project::load(scenario_path)?;
    let mut assembled = fl_project::assemble(&scenario)?;
    if let Some(dt) = dt {
        assembled.options.dt = dt;
    }
    if let Some(t_end) = t_end {
        assembled.options.t_end = t_end;
    }

    println!("Running scenario: {}", scenario.name);
    println!(
        "  dt = {:.3} s, t_end = {:.3} s",
        assembled.options.dt, assembled.options.t_end
    );

    let started = Instant::now();
    let record = run_sim(
        &mut assembled.vessel,
        &assembled.environment,
        &mut assembled.motion,
        &assembled.options,
    )?;
    info!(elapsed_ms = started.elapsed().as_millis() as u64, "run complete");

    println!("✓ Simulation completed ({} records)", record.t.len());
    println!("  {:<16} {:>10} {:>10} {:>6}", "compartment", "water", "air", "vents");
    for compartment in assembled.vessel.compartments() {
        println!(
            "  {:<16} {:>10.4} {:>10.4} {:>6}",
            compartment.name(),
            compartment.water_area(),
            compartment.air_integrity(),
            if compartment.can_release_air() { "yes" } else { "no" }
        );
    }
    println!("  total water: {:.6}", assembled.vessel.total_water());

    if let Some(path) = output {
        let names: Vec<&str> = assembled.vessel.compartments().iter().map(|c| c.name()).collect();
        std::fs::write(path, to_csv(&names, &record))?;
        println!("✓ Exported {} time points to {}", record.t.len(), path.display());
    }
    Ok(())
}

fn to_csv(names: &[&str], record: &SimRecord) -> String {
    let mut csv = String::from("time_s");
    for name in names {
        csv.push(',');
        csv.push_str(name);
    }
    csv.push('\n');
    for (t, snapshot) in record.t.iter().zip(&record.x) {
        csv.push_str(&t.to_string());
        for area in &snapshot.water_area {
            csv.push_str(&format!(",{}", area));
        }
        csv.push('\n');
    }
    csv
}
