//! Terminal outcome to scalar reward.
//!
//! Two conventions exist side by side and are never normalized against each
//! other:
//!
//! - [`RewardConvention::WinLossDraw`]: 2 for a win, 1 for a draw, 0 for a
//!   loss, judged from the node's perspective player. Mean rewards stay in
//!   `[0, 2]`.
//! - [`RewardConvention::CumulativeScore`]: the game's raw score, the same for
//!   every perspective. Larger scores shrink the relative pull of the
//!   exploration term; sibling comparisons are unaffected.

use engine_core::{Outcome, Player, RewardConvention};
use thiserror::Error;

pub const WIN_REWARD: f64 = 2.0;
pub const DRAW_REWARD: f64 = 1.0;
pub const LOSS_REWARD: f64 = 0.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RewardError {
    #[error("Outcome {outcome:?} cannot be scored under the {convention:?} convention")]
    ConventionMismatch {
        convention: RewardConvention,
        outcome: Outcome,
    },
}

/// One rollout's result, ready to be read from any perspective.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RewardSample {
    /// Winner of a win/draw/loss game (`None` is a draw)
    WinLossDraw(Option<Player>),
    /// Final score of a cumulative-score game
    Score(f64),
}

impl RewardSample {
    /// Check that `outcome` matches `convention` and wrap it.
    pub fn from_outcome(
        convention: RewardConvention,
        outcome: Outcome,
    ) -> Result<Self, RewardError> {
        match (convention, outcome) {
            (RewardConvention::WinLossDraw, Outcome::Winner(p)) => {
                Ok(RewardSample::WinLossDraw(Some(p)))
            }
            (RewardConvention::WinLossDraw, Outcome::Draw) => Ok(RewardSample::WinLossDraw(None)),
            (RewardConvention::CumulativeScore, Outcome::Score(s)) => {
                Ok(RewardSample::Score(s as f64))
            }
            (convention, outcome) => Err(RewardError::ConventionMismatch {
                convention,
                outcome,
            }),
        }
    }

    /// Reward credited to a node whose perspective is `perspective`.
    #[inline]
    pub fn value_for(&self, perspective: Player) -> f64 {
        match self {
            RewardSample::WinLossDraw(Some(winner)) if *winner == perspective => WIN_REWARD,
            RewardSample::WinLossDraw(Some(_)) => LOSS_REWARD,
            RewardSample::WinLossDraw(None) => DRAW_REWARD,
            RewardSample::Score(score) => *score,
        }
    }
}
