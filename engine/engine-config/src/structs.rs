//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// ============================================================================

fn d_data_dir() -> String {
    defaults::data_dir().into()
}
fn d_env_id() -> String {
    defaults::env_id().into()
}
fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_seed() -> Option<u64> {
    defaults::seed()
}
fn d_max_iterations() -> u32 {
    defaults::max_iterations()
}
fn d_max_episodes() -> i32 {
    defaults::max_episodes()
}
fn d_log_interval() -> u32 {
    defaults::log_interval()
}
fn d_verbose() -> bool {
    defaults::verbose()
}
fn d_bench_iterations() -> Vec<u32> {
    defaults::bench_iterations().to_vec()
}
fn d_bench_games() -> u32 {
    defaults::bench_games()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub actor: ActorConfig,
    #[serde(default)]
    pub bench: BenchConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_data_dir")]
    pub data_dir: String,
    #[serde(default = "d_env_id")]
    pub env_id: String,
    #[serde(default = "d_log_level")]
    pub log_level: String,
    /// Fixed seed for every rng; None seeds from entropy
    #[serde(default = "d_seed")]
    pub seed: Option<u64>,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            data_dir: defaults::data_dir().into(),
            env_id: defaults::env_id().into(),
            log_level: defaults::log_level().into(),
            seed: defaults::seed(),
        }
    }
}

/// Search configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    /// Iterations per decision; 0 uses the game's own budget
    #[serde(default = "d_max_iterations")]
    pub max_iterations: u32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            max_iterations: defaults::max_iterations(),
        }
    }
}

/// Console driver configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ActorConfig {
    /// Episodes to play; -1 plays until interrupted
    #[serde(default = "d_max_episodes")]
    pub max_episodes: i32,
    #[serde(default = "d_log_interval")]
    pub log_interval: u32,
    /// Print every move and the board after it
    #[serde(default = "d_verbose")]
    pub verbose: bool,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            max_episodes: defaults::max_episodes(),
            log_interval: defaults::log_interval(),
            verbose: defaults::verbose(),
        }
    }
}

/// Benchmark mode configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BenchConfig {
    /// Iteration budgets to compare
    #[serde(default = "d_bench_iterations")]
    pub iterations: Vec<u32>,
    /// Games played per budget
    #[serde(default = "d_bench_games")]
    pub games: u32,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: defaults::bench_iterations().to_vec(),
            games: defaults::bench_games(),
        }
    }
}
