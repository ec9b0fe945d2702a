use std::path::PathBuf;

use clap::Parser;

use bridge_bench::config::{ResolvedOutputs, SimulationConfig};
use bridge_bench::logging::init_logging;
use bridge_bench::simulation::SimulationRunner;

/// Simulation harness for bridge strategies.
#[derive(Debug, Parser)]
#[command(
    name = "bridge-bench",
    author,
    version,
    about = "Deterministic bridge simulation harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the master RNG seed.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = SimulationConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.games.count = games;
    }

    if let Some(seed) = cli.seed {
        config.games.seed = Some(seed);
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let games = config.games.count;

    println!(
        "Loaded configuration '{run_id}' ({games} game{})",
        if games == 1 { "" } else { "s" }
    );

    let _logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = SimulationRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: simulation skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Simulation complete for '{run_id}': {} games → {} rows at {}",
        summary.games_played,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());

    Ok(())
}
