//! MCTS-based policy
//!
//! Builds a fresh tree from the live state for every decision and plays the
//! most-visited root action.

use anyhow::{anyhow, Result};
use engine_core::Game;
use mcts::{run_mcts, MctsConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::policy::{Decision, Policy};

/// MCTS-based policy with random rollouts
#[derive(Debug)]
pub struct MctsPolicy {
    config: MctsConfig,
    /// Search rng, shared by every search this policy runs
    rng: ChaCha20Rng,
}

impl MctsPolicy {
    pub fn new(max_iterations: u32) -> Self {
        Self {
            config: MctsConfig::for_play().with_iterations(max_iterations),
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    /// Create with a specific seed for determinism
    pub fn with_seed(max_iterations: u32, seed: u64) -> Self {
        Self {
            config: MctsConfig::for_play().with_iterations(max_iterations),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn max_iterations(&self) -> u32 {
        self.config.max_iterations
    }
}

impl<G: Game> Policy<G> for MctsPolicy {
    fn name(&self) -> &'static str {
        "mcts"
    }

    fn select_action(&mut self, game: &G, state: &G::State) -> Result<Option<Decision<G::Action>>> {
        let result = run_mcts(game, self.config.clone(), state.clone(), &mut self.rng)
            .map_err(|e| anyhow!("MCTS search failed: {}", e))?;

        let Some(action) = result.action else {
            return Ok(None);
        };

        debug!(
            action = %action,
            budget = self.max_iterations(),
            value = result.root_mean_reward,
            iterations = result.stats.iterations,
            nodes = result.stats.nodes_created,
            "MCTS selected action"
        );

        Ok(Some(Decision {
            action,
            stats: Some(result.stats),
            value: Some(result.root_mean_reward),
        }))
    }
}
