//! Action selection policies for the actor

use anyhow::Result;
use clap::ValueEnum;
use engine_core::Game;
use mcts::SearchStats;
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

/// Which policy drives the decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Monte Carlo Tree Search
    Mcts,
    /// Uniform random legal move (baseline)
    Random,
}

/// One chosen move plus whatever the policy learned choosing it.
#[derive(Debug, Clone)]
pub struct Decision<A> {
    pub action: A,
    /// Search statistics, when the policy searched
    pub stats: Option<SearchStats>,
    /// Root mean reward, when the policy searched
    pub value: Option<f64>,
}

impl<A> Decision<A> {
    pub fn new(action: A) -> Self {
        Self {
            action,
            stats: None,
            value: None,
        }
    }
}

/// Trait for action selection policies.
pub trait Policy<G: Game>: Send {
    fn name(&self) -> &'static str;

    /// Pick a move for the player to move in `state`.
    ///
    /// Returns `Ok(None)` when there is nothing to choose from.
    fn select_action(&mut self, game: &G, state: &G::State) -> Result<Option<Decision<G::Action>>>;
}

/// Random policy that selects legal actions uniformly at random.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Game> Policy<G> for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select_action(&mut self, game: &G, state: &G::State) -> Result<Option<Decision<G::Action>>> {
        let mut actions = game.legal_actions_to_move(state);
        if actions.is_empty() {
            return Ok(None);
        }
        let idx = self.rng.gen_range(0..actions.len());
        Ok(Some(Decision::new(actions.swap_remove(idx))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_tictactoe::{State, TicTacToe};

    #[test]
    fn test_random_policy_picks_legal_moves() {
        let game = TicTacToe::new();
        let mut policy = RandomPolicy::with_seed(42);
        let state = State::from_diagram("XO. X.O ...").unwrap();
        let legal = game.legal_actions_to_move(&state);

        for _ in 0..20 {
            let decision = policy.select_action(&game, &state).unwrap().unwrap();
            assert!(legal.contains(&decision.action));
            assert!(decision.stats.is_none());
        }
    }

    #[test]
    fn test_random_policy_no_moves() {
        let game = TicTacToe::new();
        let mut policy = RandomPolicy::with_seed(42);
        let state = State::from_diagram("XXX OO. ...").unwrap();

        assert!(policy.select_action(&game, &state).unwrap().is_none());
    }

    #[test]
    fn test_policy_determinism_with_same_seed() {
        let game = TicTacToe::new();
        let mut policy1 = RandomPolicy::with_seed(12345);
        let mut policy2 = RandomPolicy::with_seed(12345);

        for _ in 0..20 {
            let a = policy1.select_action(&game, &State::new()).unwrap().unwrap();
            let b = policy2.select_action(&game, &State::new()).unwrap().unwrap();
            assert_eq!(a.action, b.action);
        }
    }

    #[test]
    fn test_policy_different_with_different_seeds() {
        let game = TicTacToe::new();
        let mut policy1 = RandomPolicy::with_seed(11111);
        let mut policy2 = RandomPolicy::with_seed(22222);

        let found_difference = (0..20).any(|_| {
            let a = policy1.select_action(&game, &State::new()).unwrap().unwrap();
            let b = policy2.select_action(&game, &State::new()).unwrap().unwrap();
            a.action != b.action
        });
        assert!(
            found_difference,
            "policies with different seeds should produce different actions"
        );
    }
}
