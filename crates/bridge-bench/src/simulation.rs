use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use bridge_bot::{HeuristicStrategy, PassStrategy, RandomStrategy};
use bridge_core::game::session::{Game, GameError, GameOutcome};
use bridge_core::model::seat::{Seat, SeatPosition};
use bridge_core::strategy::Strategy;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{ResolvedOutputs, SeatConfig, SimulationConfig, StrategyKind};

/// Primary entry point for running a configured batch of games.
pub struct SimulationRunner {
    config: SimulationConfig,
    outputs: ResolvedOutputs,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub games_played: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("simulation requires exactly 4 seats, found {found}")]
    SeatCount { found: usize },
    #[error("game {game_index} failed: {source}")]
    Game {
        game_index: usize,
        #[source]
        source: GameError,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// One JSONL row per completed game.
#[derive(Debug, Serialize)]
struct GameRow<'a> {
    game_index: usize,
    seed: u64,
    dealer: SeatPosition,
    seats: [&'a str; 4],
    contract: Option<String>,
    declarer: Option<SeatPosition>,
    declarer_tricks: u8,
    made: bool,
    scores: [u32; 4],
}

#[derive(Debug, Default)]
struct Aggregates {
    totals: [u64; 4],
    made: usize,
    defeated: usize,
    passed_out: usize,
}

impl SimulationRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: SimulationConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        if config.seats.len() != 4 {
            return Err(RunnerError::SeatCount {
                found: config.seats.len(),
            });
        }
        Ok(Self { config, outputs })
    }

    /// Execute the simulation, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.games.seed.unwrap_or(0));
        let mut aggregates = Aggregates::default();
        let mut rows_written = 0usize;

        for game_index in 0..self.config.games.count {
            let seed = rng.next_u64();
            let row = self.play_game(game_index, seed)?;
            aggregates.record(&row);
            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
            rows_written += 1;
        }

        writer.flush()?;
        self.write_summary(&aggregates)?;

        Ok(RunSummary {
            games_played: self.config.games.count,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
        })
    }

    fn play_game(&self, game_index: usize, seed: u64) -> Result<GameRow<'_>, RunnerError> {
        let seats: Vec<Seat> = self
            .config
            .seats
            .iter()
            .map(|seat| Seat::new(seat.name.clone()))
            .collect();
        let mut strategies = build_strategies(&self.config.seats, seed);

        let mut game = Game::new(seats, seed).map_err(|source| RunnerError::Game {
            game_index,
            source,
        })?;
        let outcome = game
            .play(&mut strategies)
            .map_err(|source| RunnerError::Game { game_index, source })?;

        let (contract, declarer, declarer_tricks, made) = match outcome {
            GameOutcome::PassedOut => (None, None, 0, false),
            GameOutcome::Played {
                contract,
                declarer_tricks,
                made,
            } => (
                Some(contract.bid.to_string()),
                Some(contract.declarer),
                declarer_tricks,
                made,
            ),
        };

        event!(
            target: "bridge_bench::game",
            Level::INFO,
            game_index,
            seed,
            dealer = %game.dealer(),
            contract = contract.as_deref().unwrap_or("passed out"),
            declarer_tricks,
            made,
        );

        let mut names = self.config.seats.iter().map(|seat| seat.name.as_str());
        let seats = std::array::from_fn(|_| names.next().expect("exactly four seats"));

        Ok(GameRow {
            game_index,
            seed,
            dealer: game.dealer(),
            seats,
            contract,
            declarer,
            declarer_tricks,
            made,
            scores: *game.scores().standings(),
        })
    }

    fn write_summary(&self, aggregates: &Aggregates) -> Result<(), RunnerError> {
        let games = self.config.games.count;
        let mut summary = String::new();
        summary.push_str(&format!("# Simulation summary — {}\n\n", self.config.run_id));
        summary.push_str(&format!(
            "{games} games, master seed {}\n\n",
            self.config
                .games
                .seed
                .map(|seed| seed.to_string())
                .unwrap_or_else(|| "unset".to_string())
        ));
        summary.push_str("| Seat | Strategy | Total points | Points/game |\n");
        summary.push_str("|------|----------|--------------|-------------|\n");
        for (index, seat) in self.config.seats.iter().enumerate() {
            let total = aggregates.totals[index];
            summary.push_str(&format!(
                "| {} | {} | {} | {:.1} |\n",
                seat.name,
                strategy_label(seat.kind),
                total,
                total as f64 / games as f64
            ));
        }
        summary.push_str(&format!(
            "\nContracts: {} made, {} defeated, {} passed out\n",
            aggregates.made, aggregates.defeated, aggregates.passed_out
        ));

        fs::write(&self.outputs.summary_md, summary)?;
        Ok(())
    }
}

impl Aggregates {
    fn record(&mut self, row: &GameRow<'_>) {
        for (total, score) in self.totals.iter_mut().zip(row.scores.iter()) {
            *total += u64::from(*score);
        }
        if row.contract.is_none() {
            self.passed_out += 1;
        } else if row.made {
            self.made += 1;
        } else {
            self.defeated += 1;
        }
    }
}

fn strategy_label(kind: StrategyKind) -> &'static str {
    match kind {
        StrategyKind::Heuristic => "heuristic",
        StrategyKind::Random => "random",
        StrategyKind::Pass => "pass",
    }
}

/// One strategy per seat; random seats derive their stream from the game
/// seed so whole runs replay exactly.
fn build_strategies(seats: &[SeatConfig], game_seed: u64) -> [Box<dyn Strategy>; 4] {
    let mut built: Vec<Box<dyn Strategy>> = Vec::with_capacity(4);
    for (index, seat) in seats.iter().enumerate() {
        built.push(match seat.kind {
            StrategyKind::Heuristic => Box::new(HeuristicStrategy::new()),
            StrategyKind::Random => {
                Box::new(RandomStrategy::with_seed(game_seed.wrapping_add(index as u64)))
            }
            StrategyKind::Pass => Box::new(PassStrategy::new()),
        });
    }
    built
        .try_into()
        .unwrap_or_else(|_| panic!("exactly four strategies are built"))
}

fn ensure_parent(parent: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = parent {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    Ok(())
}
