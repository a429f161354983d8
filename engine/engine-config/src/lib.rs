//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic for the
//! playout binaries.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Command-line flags (applied by the binary)
//! 2. Environment variables (`PLAYOUT_<SECTION>_<KEY>`)
//! 3. config.toml file
//! 4. Built-in defaults (config.defaults.toml)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! PLAYOUT_<SECTION>_<KEY>=value
//!
//! Examples:
//!     PLAYOUT_COMMON_ENV_ID=blackjack
//!     PLAYOUT_COMMON_SEED=42
//!     PLAYOUT_MCTS_MAX_ITERATIONS=2000
//!     PLAYOUT_BENCH_ITERATIONS=100,1000
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;

#[cfg(test)]
mod tests;
