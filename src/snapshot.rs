//! Frozen copies of the search tree handed out at every phase boundary
//!
//! A [`TreeSnapshot`] owns all of its data. It keeps the node ids of the live
//! tree it was taken from, so ids seen in one snapshot can be looked up in a
//! later one as long as the node still exists.

use std::fmt::Write;

use crate::{
    config::BestChildCriteria,
    game_state::{Board, Player},
    presentation::{Annotations, NodeFlags},
    tree::{NodeId, NodePath, SearchTree},
    utils, MCTSError, Result,
};

/// One node of a snapshot, with derived statistics filled in
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotNode {
    /// The board at this node
    pub state: Board,
    /// Player to move on `state`
    pub player: Player,
    /// Parent node (None for root)
    pub parent: Option<NodeId>,
    /// Children in creation order
    pub children: Vec<NodeId>,
    /// Visit count
    pub visits: u64,
    /// Accumulated reward
    pub value: f64,
    /// UCT score at the time of the snapshot
    pub uct_value: f64,
    /// Mean reward at the time of the snapshot
    pub mean_value: f64,
    /// Highlighting for the viewer
    pub flags: NodeFlags,
}

/// Immutable, independently owned copy of the search tree
#[derive(Debug, Clone, PartialEq)]
pub struct TreeSnapshot {
    nodes: Vec<SnapshotNode>,
    exploration_constant: f64,
}

impl TreeSnapshot {
    /// Copies the live tree together with its annotations
    pub fn capture(tree: &SearchTree, annotations: &Annotations, exploration_constant: f64) -> Self {
        let nodes = (0..tree.len())
            .map(|index| {
                let id = NodeId(index);
                let node = tree.get(id);
                SnapshotNode {
                    state: node.state,
                    player: node.player,
                    parent: node.parent,
                    children: node.children.clone(),
                    visits: node.visits,
                    value: node.value,
                    uct_value: 0.0,
                    mean_value: 0.0,
                    flags: annotations.get(id),
                }
            })
            .collect();

        let mut snapshot = TreeSnapshot {
            nodes,
            exploration_constant,
        };
        snapshot.recompute_derived();
        snapshot
    }

    /// Recomputes `uct_value` and `mean_value` of every node from the raw
    /// visit and value counts
    pub fn recompute_derived(&mut self) {
        let parent_visits: Vec<Option<u64>> = self
            .nodes
            .iter()
            .map(|node| node.parent.map(|parent| self.nodes[parent.index()].visits))
            .collect();

        for (node, parent_visits) in self.nodes.iter_mut().zip(parent_visits) {
            node.mean_value = utils::mean_value(node.value, node.visits);
            node.uct_value = match parent_visits {
                None => 0.0,
                Some(parent_visits) => utils::uct_score(
                    node.value,
                    node.visits,
                    parent_visits,
                    self.exploration_constant,
                ),
            };
        }
    }

    /// Exploration constant the UCT values were computed with
    pub fn exploration_constant(&self) -> f64 {
        self.exploration_constant
    }

    /// Returns the root node
    pub fn root(&self) -> &SnapshotNode {
        &self.nodes[NodeId::ROOT.index()]
    }

    /// Returns a node by id
    pub fn node(&self, id: NodeId) -> Option<&SnapshotNode> {
        self.nodes.get(id.index())
    }

    /// Follows a child-index path from the root
    pub fn find(&self, path: &NodePath) -> Option<NodeId> {
        path.indices.iter().try_fold(NodeId::ROOT, |current, &index| {
            self.nodes[current.index()].children.get(index).copied()
        })
    }

    /// Returns the child-index path leading from the root to `id`
    ///
    /// The path can be fed back into [`TreeSnapshot::toggle_expanded`].
    pub fn path_to(&self, id: NodeId) -> NodePath {
        let mut indices = Vec::new();
        let mut current = id;
        while let Some(parent) = self.nodes[current.index()].parent {
            if let Some(position) = self.nodes[parent.index()]
                .children
                .iter()
                .position(|&child| child == current)
            {
                indices.push(position);
            }
            current = parent;
        }
        indices.reverse();
        NodePath::from_indices(indices)
    }

    /// Returns the number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false, a snapshot holds at least the root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over all nodes depth-first, parents before children
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SnapshotNode)> + '_ {
        let mut stack = vec![NodeId::ROOT];
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            let node = &self.nodes[id.index()];
            stack.extend(node.children.iter().rev().copied());
            Some((id, node))
        })
    }

    /// Returns a copy with the expanded flag of the node at `path` flipped
    ///
    /// This snapshot is left as it was.
    pub fn toggle_expanded(&self, path: &NodePath) -> Result<TreeSnapshot> {
        let id = self
            .find(path)
            .ok_or_else(|| MCTSError::InvalidPath(path.clone()))?;

        let mut toggled = self.clone();
        let flags = &mut toggled.nodes[id.index()].flags;
        flags.expanded = !flags.expanded;
        Ok(toggled)
    }

    /// Returns the root child recommended by the given criteria
    ///
    /// Ties go to the first child. Returns `None` if the root has no children.
    pub fn best_child(&self, criteria: BestChildCriteria) -> Option<NodeId> {
        let children = &self.root().children;
        let score = |id: &NodeId| {
            let node = &self.nodes[id.index()];
            match criteria {
                BestChildCriteria::MostVisits => node.visits as f64,
                BestChildCriteria::HighestValue => node.mean_value,
            }
        };

        let mut best: Option<(NodeId, f64)> = None;
        for id in children {
            let value = score(id);
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((*id, value));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Renders the tree as indented text, one node per line
    ///
    /// Collapsed nodes hide their children.
    pub fn visualize(&self) -> String {
        let mut output = String::new();
        self.visualize_node(NodeId::ROOT, 0, &mut output);
        output
    }

    fn visualize_node(&self, id: NodeId, depth: usize, output: &mut String) {
        let node = &self.nodes[id.index()];
        let indent = "  ".repeat(depth);
        let label = if node.parent.is_none() {
            "Root".to_string()
        } else if node.flags.simulation_node {
            "Rollout".to_string()
        } else {
            format!("Move {}", depth)
        };

        let _ = writeln!(
            output,
            "{}{} {} (visits: {}, value: {:.3}, mean: {:.3}, uct: {:.3})",
            indent, label, node.state, node.visits, node.value, node.mean_value, node.uct_value
        );

        if node.flags.expanded {
            for &child in &node.children {
                self.visualize_node(child, depth + 1, output);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> SearchTree {
        let mut tree = SearchTree::new(Board::empty(), Player::X);
        let a = tree.add_child(tree.root(), "X--------".parse().unwrap(), Player::O);
        let b = tree.add_child(tree.root(), "-X-------".parse().unwrap(), Player::O);
        tree.get_mut(tree.root()).visits = 3;
        tree.get_mut(a).visits = 2;
        tree.get_mut(a).value = 1.0;
        tree.get_mut(b).visits = 1;
        tree.get_mut(b).value = -1.0;
        tree
    }

    #[test]
    fn test_capture_fills_derived_values() {
        let tree = sample_tree();
        let snapshot = TreeSnapshot::capture(&tree, &Annotations::new(), 1.0);

        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.root().uct_value, 0.0);
        let a = snapshot.node(NodeId(1)).unwrap();
        assert_eq!(a.mean_value, 0.5);
        assert!((a.uct_value - (0.5 + (3f64.ln() / 2.0).sqrt())).abs() < 1e-12);
    }

    #[test]
    fn test_snapshot_is_independent_of_tree() {
        let mut tree = sample_tree();
        let snapshot = TreeSnapshot::capture(&tree, &Annotations::new(), 1.0);
        tree.get_mut(NodeId(1)).visits = 100;
        tree.add_child(NodeId(1), Board::empty(), Player::X);

        assert_eq!(snapshot.node(NodeId(1)).unwrap().visits, 2);
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn test_toggle_leaves_original_untouched() {
        let snapshot = TreeSnapshot::capture(&sample_tree(), &Annotations::new(), 1.0);
        let toggled = snapshot
            .toggle_expanded(&NodePath::from_indices(vec![1]))
            .unwrap();

        assert!(snapshot.node(NodeId(2)).unwrap().flags.expanded);
        assert!(!toggled.node(NodeId(2)).unwrap().flags.expanded);

        let missing = snapshot.toggle_expanded(&NodePath::from_indices(vec![5]));
        assert!(matches!(missing, Err(MCTSError::InvalidPath(_))));
    }

    #[test]
    fn test_best_child_criteria() {
        let snapshot = TreeSnapshot::capture(&sample_tree(), &Annotations::new(), 1.0);
        assert_eq!(
            snapshot.best_child(BestChildCriteria::MostVisits),
            Some(NodeId(1))
        );
        assert_eq!(
            snapshot.best_child(BestChildCriteria::HighestValue),
            Some(NodeId(1))
        );
    }

    #[test]
    fn test_visualize_hides_collapsed_children() {
        let mut annotations = Annotations::new();
        annotations.reset(3);
        annotations.get_mut(NodeId::ROOT).expanded = false;
        let snapshot = TreeSnapshot::capture(&sample_tree(), &annotations, 1.0);

        let text = snapshot.visualize();
        assert!(text.starts_with("Root ---------"));
        assert_eq!(text.lines().count(), 1);

        let expanded = snapshot.toggle_expanded(&NodePath::new()).unwrap();
        assert_eq!(expanded.visualize().lines().count(), 3);
        assert!(expanded.visualize().contains("  Move 1 X--------"));
    }
}
