//! MCTS search implementation.
//!
//! Implements the classic four-phase loop:
//! 1. Selection: descend fully expanded nodes by UCT
//! 2. Expansion: materialize one random untried action as a new child
//! 3. Simulation: random rollout from the new child to a terminal state
//! 4. Backpropagation: credit the result to every node on the path
//!
//! One call owns its tree and random source; nothing is shared between
//! calls and trees are not reused across real-game turns.

use std::time::Instant;

use engine_core::{Game, GameError, Player, RewardConvention};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::{MctsConfig, EXPLORATION_CONSTANT};
use crate::node::{MctsNode, NodeId};
use crate::reward::{RewardError, RewardSample};
use crate::rollout::{rollout, RolloutPolicy, UniformRollout};
use crate::tree::{ChildSummary, MctsTree, TreeStats};

/// Errors that abort a search call.
///
/// An empty action set at the root is not an error; it yields a result
/// with no action.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("Reward error: {0}")]
    Reward(#[from] RewardError),

    #[error("Rollout stuck: non-terminal state has no legal actions for {player}")]
    StuckRollout { player: Player },

    #[error("Rollout policy chose action {index} but only {available} are legal")]
    InvalidRolloutChoice { index: usize, available: usize },
}

/// Counters and phase timings for one search call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    pub iterations: u32,
    pub nodes_created: u32,
    /// Iterations whose sample came from a terminal tree node
    pub terminal_hits: u32,
    /// Actions applied across all rollouts
    pub rollout_steps: u64,
    pub selection_time_us: u64,
    pub expansion_time_us: u64,
    pub rollout_time_us: u64,
    pub backprop_time_us: u64,
    pub total_time_us: u64,
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult<A> {
    /// Most-visited root child's action; None if the root had no legal
    /// actions or no iteration ran
    pub action: Option<A>,

    /// Root children in expansion order
    pub children: Vec<ChildSummary<A>>,

    pub root_visits: u32,

    /// Mean reward at the root, from the root player's perspective
    pub root_mean_reward: f64,

    pub stats: SearchStats,
}

/// MCTS search state.
pub struct MctsSearch<'a, G: Game, P = UniformRollout> {
    tree: MctsTree<G::State, G::Action>,
    game: &'a G,
    config: MctsConfig,
    policy: P,
    convention: RewardConvention,
    stats: SearchStats,
}

impl<'a, G: Game> MctsSearch<'a, G, UniformRollout> {
    /// Create a new search rooted at `state`, using uniform random rollouts.
    pub fn new(game: &'a G, config: MctsConfig, state: G::State) -> Self {
        let is_terminal = game.is_terminal(&state);
        let legal = if is_terminal {
            Vec::new()
        } else {
            game.legal_actions_to_move(&state)
        };
        let perspective = game.to_move(&state);
        let root = MctsNode::new_root(state, perspective, legal, is_terminal);

        Self {
            tree: MctsTree::new(root),
            game,
            config,
            policy: UniformRollout,
            convention: game.reward_convention(),
            stats: SearchStats::default(),
        }
    }
}

impl<'a, G: Game, P: RolloutPolicy<G>> MctsSearch<'a, G, P> {
    /// Replace the rollout policy.
    pub fn with_rollout_policy<Q: RolloutPolicy<G>>(self, policy: Q) -> MctsSearch<'a, G, Q> {
        MctsSearch {
            tree: self.tree,
            game: self.game,
            config: self.config,
            policy,
            convention: self.convention,
            stats: self.stats,
        }
    }

    /// Seed the root with statistics carried over by the caller.
    pub fn with_root_stats(mut self, visits: u32, reward_sum: f64) -> Self {
        let root_id = self.tree.root();
        let root = self.tree.get_mut(root_id);
        root.visit_count = visits;
        root.reward_sum = reward_sum;
        self
    }

    /// Run the configured number of iterations and pick the most-visited
    /// root child.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult<G::Action>, SearchError> {
        let start = Instant::now();
        let root = self.tree.get(self.tree.root());

        if root.is_terminal || root.legal_count == 0 {
            debug!(
                terminal = root.is_terminal,
                "MCTS root has no legal actions"
            );
            return Ok(self.result(start));
        }

        for _ in 0..self.config.max_iterations {
            self.iterate(rng)?;
        }

        let result = self.result(start);
        debug!(
            iterations = result.stats.iterations,
            nodes = result.stats.nodes_created,
            root_visits = result.root_visits,
            root_mean = result.root_mean_reward,
            total_us = result.stats.total_time_us,
            "MCTS search complete"
        );
        Ok(result)
    }

    /// Run one select -> expand -> simulate -> backpropagate iteration.
    fn iterate(&mut self, rng: &mut ChaCha20Rng) -> Result<(), SearchError> {
        let t0 = Instant::now();
        let mut path = self.select();
        let leaf = path[path.len() - 1];
        let t1 = Instant::now();

        let sample = if self.tree.get(leaf).is_terminal {
            // Selection reached a known terminal: credit it like any other node
            self.stats.terminal_hits += 1;
            self.terminal_sample(&self.tree.get(leaf).state)?
        } else {
            let expanded = self.expand(leaf, rng)?;
            let t2 = Instant::now();
            self.stats.expansion_time_us += (t2 - t1).as_micros() as u64;

            match expanded {
                Some(child) if self.tree.get(child).is_terminal => {
                    // The construction seed is this iteration's sample for
                    // the child; only its ancestors are credited below.
                    self.stats.terminal_hits += 1;
                    self.terminal_sample(&self.tree.get(child).state)?
                }
                Some(child) => {
                    path.push(child);
                    self.simulate(child, rng)?
                }
                None => self.simulate(leaf, rng)?,
            }
        };
        let t3 = Instant::now();

        self.tree.backpropagate(&path, &sample);
        let t4 = Instant::now();

        self.stats.iterations += 1;
        self.stats.selection_time_us += (t1 - t0).as_micros() as u64;
        self.stats.backprop_time_us += (t4 - t3).as_micros() as u64;

        trace!(
            leaf = leaf.0,
            path_len = path.len(),
            "MCTS iteration complete"
        );

        Ok(())
    }

    /// Descend from the root while the current node is fully expanded and
    /// non-terminal. Returns the full path, root first.
    fn select(&self) -> Vec<NodeId> {
        let mut path = vec![self.tree.root()];
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);

            // Stop at terminal or not fully expanded nodes
            if !node.is_fully_expanded() {
                break;
            }

            match self.tree.select_child(current, EXPLORATION_CONSTANT) {
                Some(child_id) => {
                    path.push(child_id);
                    current = child_id;
                }
                None => break, // No visited children (only possible with no legal actions)
            }
        }

        path
    }

    /// Materialize one random untried action of `node_id` as a child.
    /// Returns None when nothing is left to try.
    fn expand(
        &mut self,
        node_id: NodeId,
        rng: &mut ChaCha20Rng,
    ) -> Result<Option<NodeId>, SearchError> {
        let node = self.tree.get_mut(node_id);
        if node.untried.is_empty() {
            return Ok(None);
        }

        let index = rng.gen_range(0..node.untried.len());
        let action = node.untried.swap_remove(index);
        let mover = self.game.to_move(&node.state);
        let next = self.game.apply(&node.state, &action, rng)?;

        let child = self.make_child(next, action, mover)?;
        self.stats.nodes_created += 1;
        Ok(Some(self.tree.add_child(node_id, child)))
    }

    fn make_child(
        &self,
        state: G::State,
        action: G::Action,
        perspective: Player,
    ) -> Result<MctsNode<G::State, G::Action>, SearchError> {
        if self.game.is_terminal(&state) {
            let reward = self.terminal_sample(&state)?.value_for(perspective);
            Ok(MctsNode::new_terminal(state, action, perspective, reward))
        } else {
            let legal = self.game.legal_actions_to_move(&state);
            Ok(MctsNode::new_child(state, action, perspective, legal))
        }
    }

    /// Roll out from `node_id`'s state.
    fn simulate(
        &mut self,
        node_id: NodeId,
        rng: &mut ChaCha20Rng,
    ) -> Result<RewardSample, SearchError> {
        let t = Instant::now();
        let result = rollout(self.game, &self.policy, &self.tree.get(node_id).state, rng)?;
        self.stats.rollout_steps += u64::from(result.steps);
        self.stats.rollout_time_us += t.elapsed().as_micros() as u64;
        Ok(RewardSample::from_outcome(self.convention, result.outcome)?)
    }

    fn terminal_sample(&self, state: &G::State) -> Result<RewardSample, SearchError> {
        Ok(RewardSample::from_outcome(
            self.convention,
            self.game.outcome(state),
        )?)
    }

    fn result(&mut self, start: Instant) -> SearchResult<G::Action> {
        self.stats.total_time_us += start.elapsed().as_micros() as u64;
        let root = self.tree.get(self.tree.root());
        SearchResult {
            action: self.tree.best_action().cloned(),
            children: self.tree.root_children(),
            root_visits: root.visit_count,
            root_mean_reward: root.mean_reward(),
            stats: self.stats.clone(),
        }
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree<G::State, G::Action> {
        &self.tree
    }

    pub fn tree_stats(&self) -> TreeStats {
        self.tree.stats()
    }
}

/// Convenience function to run a single MCTS search.
pub fn run_mcts<G: Game>(
    game: &G,
    config: MctsConfig,
    state: G::State,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult<G::Action>, SearchError> {
    MctsSearch::new(game, config, state).run(rng)
}

/// Pick a move for the player to move in `state`.
///
/// Builds a fresh root, runs `max_iterations` iterations and returns the
/// most-visited root action. Returns `Ok(None)` when the root is terminal,
/// has no legal actions, or `max_iterations` is zero.
pub fn find_best_move<G: Game>(
    game: &G,
    state: &G::State,
    max_iterations: u32,
    rng: &mut ChaCha20Rng,
) -> Result<Option<G::Action>, SearchError> {
    let config = MctsConfig::default().with_iterations(max_iterations);
    Ok(run_mcts(game, config, state.clone(), rng)?.action)
}
