//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from subdirectory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by PLAYOUT_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var("PLAYOUT_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from PLAYOUT_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "PLAYOUT_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
///
/// An unreadable or malformed file falls back to the built-in defaults.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (i32, u32, bool, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
    // Optional parseable field (Option<u64>, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, optional_parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = Some(v);
        }
    };
}

/// Parse a comma-separated list such as `100,500,1000`.
fn parse_list(raw: &str) -> Option<Vec<u32>> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().ok())
        .collect()
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: PLAYOUT_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.env_id, "PLAYOUT_COMMON_ENV_ID");
    env_override!(config, common.data_dir, "PLAYOUT_COMMON_DATA_DIR");
    env_override!(config, common.log_level, "PLAYOUT_COMMON_LOG_LEVEL");
    env_override!(config, common.seed, "PLAYOUT_COMMON_SEED", optional_parse);

    // MCTS
    env_override!(
        config,
        mcts.max_iterations,
        "PLAYOUT_MCTS_MAX_ITERATIONS",
        parse
    );

    // Actor
    env_override!(
        config,
        actor.max_episodes,
        "PLAYOUT_ACTOR_MAX_EPISODES",
        parse
    );
    env_override!(
        config,
        actor.log_interval,
        "PLAYOUT_ACTOR_LOG_INTERVAL",
        parse
    );
    env_override!(config, actor.verbose, "PLAYOUT_ACTOR_VERBOSE", parse);

    // Bench
    if let Ok(raw) = std::env::var("PLAYOUT_BENCH_ITERATIONS") {
        match parse_list(&raw) {
            Some(list) if !list.is_empty() => config.bench.iterations = list,
            _ => warn!("Ignoring PLAYOUT_BENCH_ITERATIONS={raw}: expected a comma-separated list"),
        }
    }
    env_override!(config, bench.games, "PLAYOUT_BENCH_GAMES", parse);

    config
}
