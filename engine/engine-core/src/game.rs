//! Typed Game trait describing the rules the search engine consumes
//!
//! A game supplies its own state and action types plus the handful of rule
//! queries MCTS needs: the start position, legal moves, transitions,
//! terminality, and how a finished game is scored.

use std::fmt;

use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::metadata::GameMetadata;

/// Index of a seat at the table (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Player(pub u8);

impl Player {
    pub const FIRST: Player = Player(0);
    pub const SECOND: Player = Player(1);

    /// The other seat in a two-player game.
    #[inline]
    pub fn opponent(self) -> Player {
        Player(1 - self.0.min(1))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// How a finished game is turned into a reward signal.
///
/// Every game declares exactly one convention; the search engine refuses to
/// mix them within a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardConvention {
    /// Bounded 0/1/2 scale: loss, draw, win for the perspective player.
    WinLossDraw,
    /// The game's own score at termination, unbounded above.
    CumulativeScore,
}

/// Result of a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(Player),
    Draw,
    Score(i64),
}

impl Outcome {
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(p) => Some(*p),
            _ => None,
        }
    }
}

/// Errors a game raises when asked to do something its rules forbid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("Illegal transition: {action} ({reason})")]
    IllegalTransition { action: String, reason: String },

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl GameError {
    /// Shorthand for building an [`GameError::IllegalTransition`].
    pub fn illegal(action: impl fmt::Display, reason: impl Into<String>) -> Self {
        GameError::IllegalTransition {
            action: action.to_string(),
            reason: reason.into(),
        }
    }
}

/// Main trait for game implementations
///
/// States are immutable values: [`Game::apply`] always returns a fresh state.
/// Actions compare structurally, so the engine can tell tried moves from
/// untried ones by value.
///
/// Randomness (shuffles, card draws) comes exclusively from the
/// `ChaCha20Rng` the caller passes in. A game must never seed its own source,
/// otherwise fixed-seed runs stop being reproducible.
///
/// # Example
///
/// ```rust
/// use engine_core::{Game, GameError, GameMetadata, Outcome, Player, RewardConvention};
/// use rand_chacha::ChaCha20Rng;
///
/// /// Take one or two stones; whoever takes the last stone wins.
/// #[derive(Debug)]
/// struct Nim;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Take(u8);
///
/// impl std::fmt::Display for Take {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "take {}", self.0)
///     }
/// }
///
/// impl Game for Nim {
///     type State = (u8, Player);
///     type Action = Take;
///
///     fn metadata(&self) -> GameMetadata { GameMetadata::new("nim", "Nim") }
///     fn reward_convention(&self) -> RewardConvention { RewardConvention::WinLossDraw }
///     fn opener(&self) -> Player { Player(0) }
///     fn start(&self, _rng: &mut ChaCha20Rng) -> Self::State { (5, Player(0)) }
///     fn to_move(&self, s: &Self::State) -> Player { s.1 }
///     fn legal_actions(&self, s: &Self::State, player: Player) -> Vec<Take> {
///         if player != s.1 { return vec![]; }
///         (1..=s.0.min(2)).map(Take).collect()
///     }
///     fn apply(&self, s: &Self::State, a: &Take, _rng: &mut ChaCha20Rng)
///         -> Result<Self::State, GameError>
///     {
///         if a.0 == 0 || a.0 > s.0.min(2) {
///             return Err(GameError::illegal(a, "not enough stones"));
///         }
///         Ok((s.0 - a.0, s.1.opponent()))
///     }
///     fn is_terminal(&self, s: &Self::State) -> bool { s.0 == 0 }
///     fn outcome(&self, s: &Self::State) -> Outcome { Outcome::Winner(s.1.opponent()) }
/// }
/// ```
pub trait Game: Send + Sync + fmt::Debug + 'static {
    /// Immutable game snapshot
    type State: Clone + fmt::Debug + Send + Sync + 'static;

    /// One legal transition; equality must be structural
    type Action: Clone + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Get game metadata for UI and configuration
    fn metadata(&self) -> GameMetadata;

    /// Which reward convention terminal states are scored under
    fn reward_convention(&self) -> RewardConvention;

    /// The player who moves first
    fn opener(&self) -> Player;

    /// Build the initial state
    ///
    /// # Arguments
    ///
    /// * `rng` - Deterministic random number generator for shuffles and deals
    fn start(&self, rng: &mut ChaCha20Rng) -> Self::State;

    /// The player whose decision it is in `state`
    fn to_move(&self, state: &Self::State) -> Player;

    /// Legal actions for `player` in `state`
    ///
    /// Empty when the state is terminal or it is not `player`'s turn. The
    /// order must be deterministic for a given state.
    fn legal_actions(&self, state: &Self::State, player: Player) -> Vec<Self::Action>;

    /// Apply `action` and return the successor state
    ///
    /// # Errors
    ///
    /// [`GameError::IllegalTransition`] if `action` is not legal in `state`.
    fn apply(
        &self,
        state: &Self::State,
        action: &Self::Action,
        rng: &mut ChaCha20Rng,
    ) -> Result<Self::State, GameError>;

    /// Whether the game is over
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Result of a terminal state
    ///
    /// Win/draw games return [`Outcome::Winner`] or [`Outcome::Draw`];
    /// scoring games return [`Outcome::Score`].
    fn outcome(&self, state: &Self::State) -> Outcome;

    /// Legal actions for whoever is to move.
    fn legal_actions_to_move(&self, state: &Self::State) -> Vec<Self::Action> {
        self.legal_actions(state, self.to_move(state))
    }
}
