//! MCTS tree node representation.
//!
//! Each node owns one game state, the action that produced it, and the
//! visit/reward statistics UCT reads. Nodes never point back at their parent;
//! backpropagation walks the path recorded during selection instead.

use engine_core::Player;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// Where a node sits in its expansion lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionState {
    /// Non-terminal, no children yet
    Unexpanded,
    /// Some but not all legal actions have children
    PartiallyExpanded,
    /// Every legal action has a child; eligible for UCT descent
    FullyExpanded,
    /// Game over; permanently a leaf
    Terminal,
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode<S, A> {
    /// Game state at this node
    pub state: S,

    /// Action that led to this node from its parent (None for root)
    pub action: Option<A>,

    /// Player whose reward this node accumulates: the player who chose
    /// `action`, or the player to move for the root
    pub perspective: Player,

    /// Whether this is a terminal state (game over)
    pub is_terminal: bool,

    /// Number of simulations that passed through this node
    pub visit_count: u32,

    /// Sum of rewards backpropagated through this node
    pub reward_sum: f64,

    /// Number of legal actions in `state` for the player to move
    pub legal_count: usize,

    /// Legal actions that have no child yet
    pub untried: Vec<A>,

    /// Children in expansion order
    pub children: Vec<NodeId>,
}

impl<S, A> MctsNode<S, A> {
    /// Create a root node. Its statistics start empty unless the caller
    /// seeds them.
    pub fn new_root(state: S, perspective: Player, legal_actions: Vec<A>, is_terminal: bool) -> Self {
        let legal_actions = if is_terminal { Vec::new() } else { legal_actions };
        Self {
            state,
            action: None,
            perspective,
            is_terminal,
            visit_count: 0,
            reward_sum: 0.0,
            legal_count: legal_actions.len(),
            untried: legal_actions,
            children: Vec::new(),
        }
    }

    /// Create a non-terminal child with no statistics.
    pub fn new_child(state: S, action: A, perspective: Player, legal_actions: Vec<A>) -> Self {
        Self {
            state,
            action: Some(action),
            perspective,
            is_terminal: false,
            visit_count: 0,
            reward_sum: 0.0,
            legal_count: legal_actions.len(),
            untried: legal_actions,
            children: Vec::new(),
        }
    }

    /// Create a terminal child, seeded with one visit worth `reward`.
    pub fn new_terminal(state: S, action: A, perspective: Player, reward: f64) -> Self {
        Self {
            state,
            action: Some(action),
            perspective,
            is_terminal: true,
            visit_count: 1,
            reward_sum: reward,
            legal_count: 0,
            untried: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Mean reward per visit. Returns 0.0 if never visited.
    #[inline]
    pub fn mean_reward(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.reward_sum / self.visit_count as f64
        }
    }

    /// UCT score as seen from the parent:
    /// `mean + c * sqrt(ln(N_parent) / N)`.
    ///
    /// Takes pre-computed `ln(N_parent)` so siblings share one log call.
    /// Returns `None` for unvisited nodes, which UCT never selects.
    #[inline]
    pub fn uct_score(&self, parent_visits_ln: f64, c: f64) -> Option<f64> {
        if self.visit_count == 0 {
            return None;
        }
        let n = self.visit_count as f64;
        Some(self.mean_reward() + c * (parent_visits_ln / n).sqrt())
    }

    #[inline]
    pub fn expansion_state(&self) -> ExpansionState {
        if self.is_terminal {
            ExpansionState::Terminal
        } else if self.untried.is_empty() {
            ExpansionState::FullyExpanded
        } else if self.children.is_empty() {
            ExpansionState::Unexpanded
        } else {
            ExpansionState::PartiallyExpanded
        }
    }

    /// Non-terminal with a child for every legal action.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.expansion_state() == ExpansionState::FullyExpanded
    }

    /// Check if this is a leaf node (no children or terminal).
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.is_terminal || self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(legal: Vec<u8>) -> MctsNode<(), u8> {
        MctsNode::new_root((), Player(0), legal, false)
    }

    #[test]
    fn test_new_root() {
        let node = root(vec![0, 1, 2]);

        assert!(node.action.is_none());
        assert_eq!(node.visit_count, 0);
        assert_eq!(node.legal_count, 3);
        assert!(!node.is_terminal);
        assert!(node.children.is_empty());
        assert_eq!(node.expansion_state(), ExpansionState::Unexpanded);
    }

    #[test]
    fn test_terminal_root_has_no_actions() {
        let node: MctsNode<(), u8> = MctsNode::new_root((), Player(0), vec![1, 2], true);
        assert_eq!(node.legal_count, 0);
        assert!(node.untried.is_empty());
        assert_eq!(node.expansion_state(), ExpansionState::Terminal);
        assert_eq!(node.visit_count, 0);
    }

    #[test]
    fn test_terminal_child_is_seeded() {
        let node: MctsNode<(), u8> = MctsNode::new_terminal((), 4, Player(1), 2.0);
        assert_eq!(node.visit_count, 1);
        assert!((node.reward_sum - 2.0).abs() < 1e-9);
        assert!(node.is_leaf());
        assert_eq!(node.action, Some(4));
    }

    #[test]
    fn test_mean_reward() {
        let mut node = root(vec![]);

        // Unvisited
        assert!(node.mean_reward().abs() < 1e-9);

        // After visits; 0..2 scale can exceed the visit count
        node.visit_count = 4;
        node.reward_sum = 6.0;
        assert!((node.mean_reward() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_uct_score() {
        let mut node = root(vec![]);
        assert!(node.uct_score(1.0, std::f64::consts::SQRT_2).is_none());

        node.visit_count = 10;
        node.reward_sum = 5.0;

        let parent_visits: f64 = 100.0;
        let c = std::f64::consts::SQRT_2;
        // 0.5 + sqrt(2) * sqrt(ln(100) / 10) = 0.5 + 0.9597...
        let uct = node.uct_score(parent_visits.ln(), c).unwrap();
        assert!((uct - 1.4597).abs() < 1e-3);
    }

    #[test]
    fn test_expansion_states() {
        let mut node = root(vec![0, 1]);
        assert_eq!(node.expansion_state(), ExpansionState::Unexpanded);

        node.untried.pop();
        node.children.push(NodeId(1));
        assert_eq!(node.expansion_state(), ExpansionState::PartiallyExpanded);

        node.untried.pop();
        node.children.push(NodeId(2));
        assert_eq!(node.expansion_state(), ExpansionState::FullyExpanded);
        assert!(node.is_fully_expanded());
        assert!(!node.is_leaf());
    }
}
