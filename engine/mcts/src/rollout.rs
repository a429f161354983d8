//! Simulation phase: play a state out to the end.
//!
//! Rollout states are throwaway values; nothing here touches the tree.

use engine_core::{Game, Outcome};
use rand::Rng;
use rand_chacha::ChaCha20Rng;

use crate::search::SearchError;

/// Chooses the move to play at each rollout step.
///
/// The default is [`UniformRollout`]; games can supply a smarter policy
/// through [`crate::MctsSearch::with_rollout_policy`].
pub trait RolloutPolicy<G: Game> {
    /// Return an index into `actions` (never empty).
    fn choose(
        &self,
        game: &G,
        state: &G::State,
        actions: &[G::Action],
        rng: &mut ChaCha20Rng,
    ) -> usize;
}

/// Picks uniformly among the legal actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRollout;

impl<G: Game> RolloutPolicy<G> for UniformRollout {
    #[inline]
    fn choose(
        &self,
        _game: &G,
        _state: &G::State,
        actions: &[G::Action],
        rng: &mut ChaCha20Rng,
    ) -> usize {
        rng.gen_range(0..actions.len())
    }
}

/// Result of a single playout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RolloutResult {
    pub outcome: Outcome,
    /// Number of actions applied to reach the terminal state
    pub steps: u32,
}

/// Play `start` to a terminal state, choosing moves with `policy` for
/// whichever player is to move.
///
/// # Errors
///
/// - [`SearchError::StuckRollout`] if a non-terminal state offers no move
/// - [`SearchError::InvalidRolloutChoice`] if the policy returns a bad index
/// - [`SearchError::Game`] if the game rejects a move it listed as legal
pub fn rollout<G, P>(
    game: &G,
    policy: &P,
    start: &G::State,
    rng: &mut ChaCha20Rng,
) -> Result<RolloutResult, SearchError>
where
    G: Game,
    P: RolloutPolicy<G> + ?Sized,
{
    let mut state = start.clone();
    let mut steps = 0u32;

    while !game.is_terminal(&state) {
        let actions = game.legal_actions_to_move(&state);
        if actions.is_empty() {
            return Err(SearchError::StuckRollout {
                player: game.to_move(&state),
            });
        }

        let index = policy.choose(game, &state, &actions, rng);
        let action = actions
            .get(index)
            .ok_or(SearchError::InvalidRolloutChoice {
                index,
                available: actions.len(),
            })?;

        state = game.apply(&state, action, rng)?;
        steps += 1;
    }

    Ok(RolloutResult {
        outcome: game.outcome(&state),
        steps,
    })
}
