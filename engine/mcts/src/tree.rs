//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices; parent links are never stored.

use crate::node::{MctsNode, NodeId};
use crate::reward::RewardSample;

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree<S, A> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<S, A>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

/// Visit summary for one root child.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildSummary<A> {
    pub action: A,
    pub visits: u32,
    pub mean_reward: f64,
    pub is_terminal: bool,
}

impl<S, A> MctsTree<S, A> {
    /// Create a new tree holding only `root`.
    pub fn new(root: MctsNode<S, A>) -> Self {
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<S, A> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<S, A> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: MctsNode<S, A>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[MctsNode<S, A>] {
        &self.nodes
    }

    /// Select the child of `node_id` with the highest UCT score.
    ///
    /// Unvisited children are skipped. Ties go to the earliest child.
    /// Returns None if no child has been visited.
    pub fn select_child(&self, node_id: NodeId, c: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        // Pre-compute ln once instead of per-child comparison
        let parent_visits_ln = (node.visit_count.max(1) as f64).ln();

        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &node.children {
            let Some(score) = self.get(child_id).uct_score(parent_visits_ln, c) else {
                continue;
            };
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((child_id, score)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Add a child to a parent node.
    /// Returns the new child's NodeId.
    pub fn add_child(&mut self, parent_id: NodeId, child: MctsNode<S, A>) -> NodeId {
        let child_id = self.allocate(child);

        // Add to parent's children
        self.get_mut(parent_id).children.push(child_id);

        child_id
    }

    /// Credit one reward sample to every node on `path`, each from its own
    /// perspective.
    pub fn backpropagate(&mut self, path: &[NodeId], sample: &RewardSample) {
        for &node_id in path {
            let node = self.get_mut(node_id);
            node.visit_count += 1;
            node.reward_sum += sample.value_for(node.perspective);
        }
    }

    /// Most-visited root child. Ties go to the earliest-expanded child.
    pub fn best_child(&self) -> Option<NodeId> {
        let root = self.get(self.root);
        let mut best: Option<(NodeId, u32)> = None;
        for &child_id in &root.children {
            let visits = self.get(child_id).visit_count;
            match best {
                Some((_, best_visits)) if visits <= best_visits => {}
                _ => best = Some((child_id, visits)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Action of the most-visited root child.
    /// Returns None if root has no children.
    pub fn best_action(&self) -> Option<&A> {
        self.best_child()
            .and_then(|id| self.get(id).action.as_ref())
    }

    /// Per-child statistics at the root, in expansion order.
    pub fn root_children(&self) -> Vec<ChildSummary<A>>
    where
        A: Clone,
    {
        self.get(self.root)
            .children
            .iter()
            .filter_map(|&id| {
                let child = self.get(id);
                child.action.clone().map(|action| ChildSummary {
                    action,
                    visits: child.visit_count,
                    mean_reward: child.mean_reward(),
                    is_terminal: child.is_terminal,
                })
            })
            .collect()
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            root_mean_reward: root.mean_reward(),
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        let node = self.get(node_id);
        if node.children.is_empty() {
            return current_depth;
        }

        node.children
            .iter()
            .map(|id| self.compute_max_depth(*id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_mean_reward: f64,
    pub max_depth: u32,
}
