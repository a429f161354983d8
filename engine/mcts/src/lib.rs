//! Monte Carlo Tree Search (MCTS) with random playouts.
//!
//! This crate provides a game-agnostic MCTS implementation that works with any
//! game implementing the `engine-core` [`Game`](engine_core::Game) trait.
//!
//! # Overview
//!
//! MCTS builds a search tree one iteration at a time. Each iteration
//! consists of four phases:
//!
//! 1. **Selection**: Descend fully expanded nodes using UCT (Upper Confidence
//!    bound applied to Trees) with exploration constant √2
//! 2. **Expansion**: Add one child for a randomly chosen untried action
//! 3. **Simulation**: Play uniformly random moves from the new child until the
//!    game ends
//! 4. **Backpropagation**: Update visit counts and reward sums along the path
//!    from leaf to root
//!
//! After the iteration budget is spent, the most-visited root child is
//! returned.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mcts::find_best_move;
//! use games_tictactoe::{State, TicTacToe};
//! use rand_chacha::ChaCha20Rng;
//! use rand::SeedableRng;
//!
//! let game = TicTacToe::new();
//! let state = State::from_diagram("XX. OO. ...").unwrap();
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let action = find_best_move(&game, &state, 1000, &mut rng).unwrap();
//!
//! println!("Best action: {}", action.unwrap());
//! ```
//!
//! # Rewards
//!
//! Win/loss/draw games score 2/0/1 from the perspective of the player who
//! chose the action leading into a node. Cumulative-score games credit the
//! raw final score. See [`reward`] for details.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         MctsSearch                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │  MctsTree   │  │    Game     │  │   RolloutPolicy     │  │
//! │  │  (arena)    │  │ (rules)     │  │ (uniform random)    │  │
//! │  └──────┬──────┘  └──────┬──────┘  └──────────┬──────────┘  │
//! │         │                │                    │             │
//! │         ▼                ▼                    ▼             │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │              select → expand → simulate →            │   │
//! │  │                     backpropagate                    │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod node;
pub mod reward;
pub mod rollout;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::{MctsConfig, EXPLORATION_CONSTANT};
pub use node::{ExpansionState, MctsNode, NodeId};
pub use reward::{RewardError, RewardSample};
pub use rollout::{rollout, RolloutPolicy, RolloutResult, UniformRollout};
pub use search::{find_best_move, run_mcts, MctsSearch, SearchError, SearchResult, SearchStats};
pub use tree::{ChildSummary, MctsTree, TreeStats};
