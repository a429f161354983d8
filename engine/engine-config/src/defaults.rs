//! Default configuration values loaded from config.defaults.toml.
//!
//! The shared TOML file is embedded at compile time so the binary and the
//! checked-in file can never disagree.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    mcts: MctsDefaults,
    actor: ActorDefaults,
    bench: BenchDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    data_dir: String,
    env_id: String,
    log_level: String,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    max_iterations: u32,
}

#[derive(Debug, Deserialize)]
struct ActorDefaults {
    max_episodes: i32,
    log_interval: u32,
    verbose: bool,
}

#[derive(Debug, Deserialize)]
struct BenchDefaults {
    iterations: Vec<u32>,
    games: u32,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn data_dir() -> &'static str {
    &DEFAULTS.common.data_dir
}
pub fn env_id() -> &'static str {
    &DEFAULTS.common.env_id
}
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}
pub fn seed() -> Option<u64> {
    DEFAULTS.common.seed
}

// MCTS
pub fn max_iterations() -> u32 {
    DEFAULTS.mcts.max_iterations
}

// Actor
pub fn max_episodes() -> i32 {
    DEFAULTS.actor.max_episodes
}
pub fn log_interval() -> u32 {
    DEFAULTS.actor.log_interval
}
pub fn verbose() -> bool {
    DEFAULTS.actor.verbose
}

// Bench
pub fn bench_iterations() -> &'static [u32] {
    &DEFAULTS.bench.iterations
}
pub fn bench_games() -> u32 {
    DEFAULTS.bench.games
}
