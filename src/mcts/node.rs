//! MCTS node structures.
//!
//! Uses arena-based allocation with index references (NodeId). A node owns
//! either no children or exactly two: the play of the drawn card and the play
//! of the held card.

use serde::{Deserialize, Serialize};

use crate::core::Card;

/// Index into the search tree's node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Parent link of the root.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// True for the root's parent link.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Arena slot.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// Result of a finished (or abandoned) line of play, from the searching
/// seat's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    /// Score contributed on backpropagation.
    #[inline]
    #[must_use]
    pub const fn score(self) -> u32 {
        match self {
            Outcome::Win => 1,
            Outcome::Loss => 0,
        }
    }
}

/// Visit statistics of one child, as seen by a selection policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Arm {
    pub visits: u32,
    pub score: u32,

    /// Placeholder for a move the rules forbid; never selected.
    pub pruned: bool,
}

impl Arm {
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.score as f64 / self.visits as f64
        }
    }
}

/// A node in the search tree.
///
/// Each node owns its own copy of the hypothetical round.
#[derive(Clone, Debug)]
pub struct SearchNode<S> {
    /// Parent link (`NONE` at the root).
    pub parent: NodeId,

    /// `[drawn-card play, held-card play]`, or `[forced play, pruned]`.
    pub children: Option<[NodeId; 2]>,

    /// Plies below the root.
    pub depth: u16,

    pub visits: u32,

    /// Wins credited through this node; never exceeds `visits`.
    pub score: u32,

    /// Set once, when the node is created (or when expanding it fails).
    pub terminal: Option<Outcome>,

    pub pruned: bool,

    /// Card played to reach this node (None for root).
    pub played: Option<Card>,

    /// The hypothetical round after `played`. Pruned placeholders have none.
    pub state: Option<S>,
}

impl<S> SearchNode<S> {
    /// Create a new node.
    pub fn new(parent: NodeId, depth: u16, played: Option<Card>, state: S) -> Self {
        Self {
            parent,
            children: None,
            depth,
            visits: 0,
            score: 0,
            terminal: None,
            pruned: false,
            played,
            state: Some(state),
        }
    }

    /// Stand-in sibling for a forced play: never selected, holds no state.
    pub fn pruned(parent: NodeId, depth: u16) -> Self {
        Self {
            parent,
            children: None,
            depth,
            visits: 0,
            score: 0,
            terminal: None,
            pruned: true,
            played: None,
            state: None,
        }
    }

    /// Create a root node.
    pub fn root(state: S) -> Self {
        Self::new(NodeId::NONE, 0, None, state)
    }

    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.terminal.is_some()
    }

    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// A visited, non-terminal leaf: the next selection through it expands it.
    #[must_use]
    pub fn is_expandable(&self) -> bool {
        self.is_leaf() && !self.is_terminal() && !self.pruned && self.visits > 0
    }

    #[must_use]
    pub fn arm(&self) -> Arm {
        Arm {
            visits: self.visits,
            score: self.score,
            pruned: self.pruned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId::new(5);
        assert_eq!(id.raw(), 5);
        assert!(!id.is_none());
        assert_eq!(format!("{}", id), "NodeId(5)");

        assert!(NodeId::NONE.is_none());
        assert_eq!(format!("{}", NodeId::NONE), "NodeId(NONE)");
    }

    #[test]
    fn test_node_root() {
        let node = SearchNode::root(());

        assert!(node.parent.is_none());
        assert_eq!(node.depth, 0);
        assert_eq!(node.visits, 0);
        assert!(node.is_leaf());
        assert!(!node.is_terminal());
        assert!(!node.is_expandable());
    }

    #[test]
    fn test_expandable_after_first_visit() {
        let mut node = SearchNode::new(NodeId::new(0), 1, Some(Card::Guard), ());
        node.visits = 1;
        assert!(node.is_expandable());

        node.terminal = Some(Outcome::Loss);
        assert!(!node.is_expandable());

        node.terminal = None;
        node.pruned = true;
        assert!(!node.is_expandable());
    }

    #[test]
    fn test_pruned_placeholder_is_stateless() {
        let node = SearchNode::<u64>::pruned(NodeId::new(0), 1);

        assert!(node.pruned);
        assert!(node.arm().pruned);
        assert!(node.state.is_none());
        assert!(node.played.is_none());
        assert!(!node.is_expandable());
    }

    #[test]
    fn test_arm_mean() {
        let mut node = SearchNode::root(());
        assert_eq!(node.arm().mean(), 0.0);

        node.visits = 4;
        node.score = 3;
        assert_eq!(node.arm().mean(), 0.75);
    }

    #[test]
    fn test_outcome_score() {
        assert_eq!(Outcome::Win.score(), 1);
        assert_eq!(Outcome::Loss.score(), 0);
    }
}
