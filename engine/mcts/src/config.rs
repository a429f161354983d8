//! MCTS configuration parameters.

/// UCT exploration constant, fixed at √2.
pub const EXPLORATION_CONSTANT: f64 = std::f64::consts::SQRT_2;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MctsConfig {
    /// Number of select/expand/simulate/backpropagate iterations per search.
    /// This is the only bound on the work one search call does.
    pub max_iterations: u32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            max_iterations: 200,
        }
    }

    /// Budget used for real moves in the console driver.
    pub fn for_play() -> Self {
        Self::default()
    }

    /// Builder pattern: set the iteration budget.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.max_iterations = n;
        self
    }
}
