//! Catalogue of the games shipped with playout
//!
//! This crate is the single place that knows every bundled game. Drivers
//! parse an env id into a [`GameId`] and then dispatch on it to the concrete
//! [`Game`](engine_core::Game) type, which keeps search fully monomorphized.
//!
//! # Usage
//!
//! ```rust
//! use engine_games::GameId;
//!
//! let id: GameId = "tictactoe".parse().unwrap();
//! assert_eq!(id.metadata().display_name, "Tic-Tac-Toe");
//! assert!(GameId::all().contains(&id));
//! ```

use std::fmt;
use std::str::FromStr;

use engine_core::{Game, GameMetadata, RewardConvention};
use games_balatro::Balatro;
use games_blackjack::Blackjack;
use games_tictactoe::TicTacToe;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A bundled game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameId {
    TicTacToe,
    Blackjack,
    Balatro,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown game '{0}'. Known games: tictactoe, blackjack, balatro")]
pub struct ParseGameIdError(pub String);

impl GameId {
    /// Every bundled game, in menu order.
    pub fn all() -> &'static [GameId] {
        &[GameId::TicTacToe, GameId::Blackjack, GameId::Balatro]
    }

    /// Env id used in config files and on the command line
    pub fn env_id(&self) -> &'static str {
        match self {
            GameId::TicTacToe => "tictactoe",
            GameId::Blackjack => "blackjack",
            GameId::Balatro => "balatro",
        }
    }

    /// Search budget used when the configuration leaves it at 0.
    pub fn default_iterations(&self) -> u32 {
        match self {
            GameId::TicTacToe => 1000,
            GameId::Blackjack => 500,
            GameId::Balatro => 500,
        }
    }

    pub fn metadata(&self) -> GameMetadata {
        match self {
            GameId::TicTacToe => TicTacToe::new().metadata(),
            GameId::Blackjack => Blackjack::new().metadata(),
            GameId::Balatro => Balatro::new().metadata(),
        }
    }

    pub fn reward_convention(&self) -> RewardConvention {
        self.metadata().reward_convention
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.env_id())
    }
}

impl FromStr for GameId {
    type Err = ParseGameIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tictactoe" | "tic_tac_toe" | "tic-tac-toe" => Ok(GameId::TicTacToe),
            "blackjack" => Ok(GameId::Blackjack),
            "balatro" | "mini_balatro" | "minibalatro" => Ok(GameId::Balatro),
            _ => Err(ParseGameIdError(s.to_string())),
        }
    }
}
