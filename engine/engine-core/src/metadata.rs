//! Game metadata for display and configuration
//!
//! Drivers use this to print headers, name the seats, and decide how to
//! summarize a finished game without knowing the concrete game type.

use serde::{Deserialize, Serialize};

use crate::game::{Player, RewardConvention};

/// Metadata about a game for console display and configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMetadata {
    /// Environment identifier (e.g., "tictactoe", "blackjack")
    pub env_id: String,

    /// Human-readable display name (e.g., "Tic-Tac-Toe")
    pub display_name: String,

    /// Number of seats (1 for solitaire scoring games)
    pub player_count: usize,

    /// Display names for each player (e.g., ["X", "O"] or ["Player", "Dealer"])
    pub player_names: Vec<String>,

    /// Single-character symbols for each player
    pub player_symbols: Vec<char>,

    /// Reward convention, mirrored here so drivers can pick a summary format
    pub reward_convention: RewardConvention,

    /// Brief description of the game rules
    pub description: String,
}

impl GameMetadata {
    /// Create a new GameMetadata with required fields
    pub fn new(env_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            env_id: env_id.into(),
            display_name: display_name.into(),
            player_count: 2,
            player_names: vec!["Player 1".to_string(), "Player 2".to_string()],
            player_symbols: vec!['1', '2'],
            reward_convention: RewardConvention::WinLossDraw,
            description: String::new(),
        }
    }

    /// Builder method for player information
    pub fn with_players(mut self, count: usize, names: Vec<String>, symbols: Vec<char>) -> Self {
        self.player_count = count;
        self.player_names = names;
        self.player_symbols = symbols;
        self
    }

    /// Builder method for the reward convention
    pub fn with_convention(mut self, convention: RewardConvention) -> Self {
        self.reward_convention = convention;
        self
    }

    /// Builder method for description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Display name of a seat, falling back to `Player N`.
    pub fn player_name(&self, player: Player) -> String {
        self.player_names
            .get(player.index())
            .cloned()
            .unwrap_or_else(|| format!("Player {}", player.0 + 1))
    }

    /// Whether this game is played by a single seat.
    pub fn is_single_player(&self) -> bool {
        self.player_count == 1
    }
}
