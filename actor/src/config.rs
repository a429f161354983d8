//! Configuration for the actor binary
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use engine_config::{load_config, CentralConfig};
use engine_games::GameId;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

use crate::policy::PolicyKind;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_env_id() -> String {
    CENTRAL_CONFIG.common.env_id.clone()
}

fn default_data_dir() -> String {
    CENTRAL_CONFIG.common.data_dir.clone()
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_max_iterations() -> u32 {
    CENTRAL_CONFIG.mcts.max_iterations
}

fn default_max_episodes() -> i32 {
    CENTRAL_CONFIG.actor.max_episodes
}

fn default_log_interval() -> u32 {
    CENTRAL_CONFIG.actor.log_interval
}

fn default_verbose() -> bool {
    CENTRAL_CONFIG.actor.verbose
}

fn default_bench_iterations() -> Vec<u32> {
    CENTRAL_CONFIG.bench.iterations.clone()
}

fn default_bench_games() -> u32 {
    CENTRAL_CONFIG.bench.games
}

/// What the actor does once started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Play episodes and print every move
    Play,
    /// Compare iteration budgets over many games
    Bench,
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "actor")]
#[command(about = "playout actor - MCTS self-play and benchmark driver")]
#[command(
    long_about = "Plays games with Monte Carlo Tree Search choosing every move, or benchmarks
search budgets against each other.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Game to run (tictactoe, blackjack, balatro)
    #[arg(long, default_value_t = default_env_id())]
    pub env_id: String,

    /// Play episodes or benchmark iteration budgets
    #[arg(long, value_enum, default_value_t = Mode::Play)]
    pub mode: Mode,

    /// Policy that picks the moves
    #[arg(long, value_enum, default_value_t = PolicyKind::Mcts)]
    pub policy: PolicyKind,

    /// MCTS iterations per move (0 uses the game's default)
    #[arg(long, default_value_t = default_max_iterations())]
    pub max_iterations: u32,

    /// Maximum episodes to run in play mode (-1 for unlimited)
    #[arg(long, default_value_t = default_max_episodes())]
    pub max_episodes: i32,

    /// Seed every rng for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Log progress every N episodes (0 to disable)
    #[arg(long, default_value_t = default_log_interval())]
    pub log_interval: u32,

    /// Print every move and the resulting state
    #[arg(long, default_value_t = default_verbose(), action = clap::ArgAction::Set)]
    pub verbose: bool,

    /// Data directory for the stats file
    #[arg(long, default_value_t = default_data_dir())]
    pub data_dir: String,

    /// Iteration budgets compared in bench mode
    #[arg(long, value_delimiter = ',', default_values_t = default_bench_iterations())]
    pub bench_iterations: Vec<u32>,

    /// Games per budget in bench mode
    #[arg(long, default_value_t = default_bench_games())]
    pub bench_games: u32,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.env_id.is_empty() {
            return Err(anyhow!("env_id cannot be empty"));
        }

        self.game_id()?;

        if self.data_dir.is_empty() {
            return Err(anyhow!("data_dir cannot be empty"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        if self.mode == Mode::Bench {
            if self.bench_iterations.is_empty() {
                return Err(anyhow!("bench_iterations cannot be empty in bench mode"));
            }
            if self.bench_iterations.contains(&0) {
                return Err(anyhow!("bench_iterations must all be greater than 0"));
            }
            if self.bench_games == 0 {
                return Err(anyhow!("bench_games must be greater than 0"));
            }
        }

        Ok(())
    }

    pub fn game_id(&self) -> Result<GameId> {
        Ok(self.env_id.parse::<GameId>()?)
    }

    /// Search budget per move: the configured value, or the game's own
    /// default when that is 0.
    pub fn iterations_for(&self, game: GameId) -> u32 {
        if self.max_iterations == 0 {
            game.default_iterations()
        } else {
            self.max_iterations
        }
    }

    /// Seed from the command line, falling back to the central config.
    pub fn effective_seed(&self) -> Option<u64> {
        self.seed.or(CENTRAL_CONFIG.common.seed)
    }

    /// Path of the JSON stats snapshot
    pub fn stats_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("actor_stats.json")
    }
}
