//! Tree data structures for Monte Carlo Tree Search
//!
//! Nodes live in a single arena and refer to each other by [`NodeId`]. A
//! node owns its children through the `children` list; the `parent` index is
//! only ever read, to look up the parent's visit count and to walk back up
//! during backpropagation.

use std::fmt;

use crate::game_state::{Board, Player};

/// Index of a node inside a [`SearchTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root is always the first node of the arena
    pub const ROOT: NodeId = NodeId(0);

    /// Returns the arena index
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Represents a node in the MCTS tree
#[derive(Debug, Clone, PartialEq)]
pub struct MCTSNode {
    /// The board at this node
    pub state: Board,

    /// Player to move on `state`
    pub player: Player,

    /// Parent node (None for root)
    pub parent: Option<NodeId>,

    /// Children in creation order
    pub children: Vec<NodeId>,

    /// Number of completed iterations whose path went through this node
    pub visits: u64,

    /// Sum of the rewards credited during backpropagation
    pub value: f64,
}

impl MCTSNode {
    /// Creates an unvisited node
    pub fn new(state: Board, player: Player, parent: Option<NodeId>) -> Self {
        MCTSNode {
            state,
            player,
            parent,
            children: Vec::new(),
            visits: 0,
            value: 0.0,
        }
    }

    /// Returns true if this node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns true if this node is the root
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Arena-allocated search tree
///
/// Node ids are stable: a node keeps its id for the lifetime of the tree.
/// The only removal is [`SearchTree::remove_last_child`], which drops the
/// most recently added node.
#[derive(Debug, Clone)]
pub struct SearchTree {
    nodes: Vec<MCTSNode>,
}

impl SearchTree {
    /// Creates a tree holding only the root
    pub fn new(state: Board, player: Player) -> Self {
        SearchTree {
            nodes: vec![MCTSNode::new(state, player, None)],
        }
    }

    /// Returns the root id
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Returns a reference to a node
    ///
    /// # Panics
    ///
    /// Panics if the id does not belong to this tree.
    pub fn get(&self, id: NodeId) -> &MCTSNode {
        &self.nodes[id.0]
    }

    /// Returns a mutable reference to a node
    ///
    /// # Panics
    ///
    /// Panics if the id does not belong to this tree.
    pub fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode {
        &mut self.nodes[id.0]
    }

    /// Appends a new, unvisited child to `parent` and returns its id
    pub fn add_child(&mut self, parent: NodeId, state: Board, player: Player) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(MCTSNode::new(state, player, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Removes `child` from `parent` if it is the most recently added node
    ///
    /// Returns the removed node, or `None` when `child` is not the last node
    /// of the arena or not the last child of `parent`.
    pub fn remove_last_child(&mut self, parent: NodeId, child: NodeId) -> Option<MCTSNode> {
        if child.0 + 1 != self.nodes.len() || self.nodes[parent.0].children.last() != Some(&child)
        {
            return None;
        }

        self.nodes[parent.0].children.pop();
        self.nodes.pop()
    }

    /// Returns the number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false, the root cannot be removed
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the depth of a node (root = 0)
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count() - 1
    }

    /// Iterates from `id` up to the root, both included
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&current| self.get(current).parent)
    }

    /// Returns the child-index path leading from the root to `id`
    pub fn path_to(&self, id: NodeId) -> NodePath {
        let mut indices = Vec::new();
        let mut current = id;
        while let Some(parent) = self.get(current).parent {
            if let Some(position) = self.get(parent).children.iter().position(|&c| c == current) {
                indices.push(position);
            }
            current = parent;
        }
        indices.reverse();
        NodePath::from_indices(indices)
    }

    /// Follows a child-index path from the root
    pub fn find(&self, path: &NodePath) -> Option<NodeId> {
        path.indices.iter().try_fold(self.root(), |current, &index| {
            self.get(current).children.get(index).copied()
        })
    }

    /// Iterates over all nodes depth-first, parents before children
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MCTSNode)> + '_ {
        let mut stack = vec![self.root()];
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            let node = self.get(id);
            stack.extend(node.children.iter().rev().copied());
            Some((id, node))
        })
    }

    /// Returns the greatest depth of any node
    pub fn max_depth(&self) -> usize {
        self.iter()
            .map(|(id, _)| self.depth(id))
            .max()
            .unwrap_or(0)
    }
}

/// Represents a path through the MCTS tree
///
/// A path is a sequence of child positions that can be used to navigate from
/// the root node to a specific node in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodePath {
    /// Indices of children to follow from the root
    pub indices: Vec<usize>,
}

impl NodePath {
    /// Creates a new empty path (pointing to the root)
    pub fn new() -> Self {
        NodePath {
            indices: Vec::new(),
        }
    }

    /// Creates a path with the given indices
    pub fn from_indices(indices: Vec<usize>) -> Self {
        NodePath { indices }
    }

    /// Extends the path with a new index
    pub fn push(&mut self, index: usize) {
        self.indices.push(index);
    }

    /// Returns the length of the path
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if the path is empty
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl Default for NodePath {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path[")?;
        for (i, idx) in self.indices.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", idx)?;
        }
        write!(f, "]")
    }
}
