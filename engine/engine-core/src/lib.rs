//! Core traits and types for the playout search engine
//!
//! This crate provides the rule-side abstractions that search consumes:
//! - `Game`: typed trait every game implements
//! - `Player`, `Outcome`, `RewardConvention`: shared vocabulary for turns and results
//! - `GameMetadata`: display information for drivers
//! - `game_utils`: deck and move-set helpers shared by the card games

pub mod game;
pub mod game_utils;
pub mod metadata;

// Re-export main types for convenience
pub use game::{Game, GameError, Outcome, Player, RewardConvention};
pub use metadata::GameMetadata;
