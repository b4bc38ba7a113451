//! Arena-based search tree.
//!
//! Uses a flat `Vec<SearchNode<S>>` with index-based references. The whole
//! tree is dropped after each determinization.

use super::node::{NodeId, Outcome, SearchNode};

/// Arena of search nodes linked by `NodeId`; slot 0 is the root.
/// Parent links are plain indices, so there is no ownership cycle.
#[derive(Clone, Debug)]
pub struct SearchTree<S> {
    /// Node arena.
    nodes: Vec<SearchNode<S>>,

    /// The root node ID (always 0).
    root: NodeId,
}

impl<S> SearchTree<S> {
    /// Create a new tree whose root owns `state`.
    pub fn new(state: S) -> Self {
        Self::with_capacity(state, 64)
    }

    /// Tree with room for `capacity` nodes before reallocating.
    pub fn with_capacity(state: S, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(SearchNode::root(state));
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode<S> {
        &self.nodes[id.0 as usize]
    }

    /// Mutable access to a node.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<S> {
        &mut self.nodes[id.0 as usize]
    }

    /// Push a node into the arena.
    pub fn alloc(&mut self, node: SearchNode<S>) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Hang exactly two children under `parent`.
    pub fn attach(&mut self, parent: NodeId, first: SearchNode<S>, second: SearchNode<S>) -> [NodeId; 2] {
        let children = [self.alloc(first), self.alloc(second)];
        self.get_mut(parent).children = Some(children);
        children
    }

    /// Credit `outcome` to `node` and every ancestor up to the root.
    pub fn backpropagate(&mut self, node: NodeId, outcome: Outcome) {
        let mut current = node;
        while !current.is_none() {
            let n = self.get_mut(current);
            n.visits += 1;
            n.score += outcome.score();
            current = n.parent;
        }
    }

    /// Node count, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true: the root always exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Shape summary of the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let max_depth = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        let terminal_count = self.nodes.iter().filter(|n| n.is_terminal()).count();
        let expanded_count = self.nodes.iter().filter(|n| !n.is_leaf()).count();
        let pruned_count = self.nodes.iter().filter(|n| n.pruned).count();

        TreeStats {
            node_count: self.nodes.len(),
            max_depth,
            terminal_count,
            expanded_count,
            pruned_count,
        }
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &SearchNode<S> {
        self.get(self.root)
    }

    /// Every node with its id, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode<S>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }
}

/// Statistics about the search tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Nodes allocated.
    pub node_count: usize,

    /// Deepest node.
    pub max_depth: u16,

    /// Nodes whose outcome is fixed.
    pub terminal_count: usize,

    /// Number of nodes with children.
    pub expanded_count: usize,

    /// Placeholders for forbidden plays.
    pub pruned_count: usize,
}

impl TreeStats {
    /// Fraction of nodes that have been expanded.
    #[must_use]
    pub fn expansion_ratio(&self) -> f64 {
        if self.node_count == 0 {
            0.0
        } else {
            self.expanded_count as f64 / self.node_count as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Card;

    fn grown() -> (SearchTree<u8>, [NodeId; 2], [NodeId; 2]) {
        let mut tree = SearchTree::new(0u8);
        let root = tree.root();
        let top = tree.attach(
            root,
            SearchNode::new(root, 1, Some(Card::Guard), 1),
            SearchNode::new(root, 1, Some(Card::Priest), 2),
        );
        let below = tree.attach(
            top[0],
            SearchNode::new(top[0], 2, Some(Card::Baron), 3),
            SearchNode::new(top[0], 2, Some(Card::King), 4),
        );
        (tree, top, below)
    }

    #[test]
    fn test_tree_new() {
        let tree = SearchTree::new(7u8);

        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.root(), NodeId::new(0));
        assert_eq!(tree.root_node().state, Some(7));
    }

    #[test]
    fn test_attach_two_children() {
        let (tree, top, _) = grown();

        assert_eq!(tree.len(), 5);
        assert_eq!(tree.root_node().children, Some(top));
        assert_eq!(tree.get(top[1]).played, Some(Card::Priest));
        assert_eq!(tree.get(top[0]).parent, tree.root());
    }

    #[test]
    fn test_backpropagate_to_root() {
        let (mut tree, top, below) = grown();

        tree.backpropagate(below[1], Outcome::Win);
        tree.backpropagate(below[0], Outcome::Loss);

        assert_eq!(tree.get(below[1]).visits, 1);
        assert_eq!(tree.get(below[1]).score, 1);
        assert_eq!(tree.get(below[0]).score, 0);
        assert_eq!(tree.get(top[0]).visits, 2);
        assert_eq!(tree.get(top[0]).score, 1);
        assert_eq!(tree.root_node().visits, 2);
        assert_eq!(tree.get(top[1]).visits, 0);
    }

    #[test]
    fn test_tree_stats() {
        let (mut tree, top, _) = grown();
        tree.get_mut(top[1]).terminal = Some(Outcome::Loss);

        let stats = tree.stats();

        assert_eq!(stats.node_count, 5);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.terminal_count, 1);
        assert_eq!(stats.expanded_count, 2);
        assert_eq!(stats.expansion_ratio(), 0.4);
    }

    #[test]
    fn test_tree_iter() {
        let (tree, _, _) = grown();
        let ids: Vec<_> = tree.iter().map(|(id, _)| id).collect();

        assert_eq!(ids.len(), 5);
        assert_eq!(ids[0], NodeId::new(0));
        assert_eq!(ids[4], NodeId::new(4));
    }
}
