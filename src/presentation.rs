//! Render-only annotations for tree nodes
//!
//! The step driver marks which nodes and edges took part in the current phase
//! so that a viewer can highlight them. These flags are kept beside the tree,
//! keyed by [`NodeId`], and are never consulted by the search itself.

use crate::tree::NodeId;

/// Highlighting state of one node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeFlags {
    /// The node takes part in the current phase
    pub node_selected: bool,
    /// The edge from the parent into this node takes part in the current phase
    pub edge_selected: bool,
    /// Only the UCT value is relevant for this node (selection)
    pub highlight_uct_only: bool,
    /// Visits, value and UCT changed on this node (backpropagation)
    pub highlight_visits_value_uct: bool,
    /// The node is the temporary end position of a rollout
    pub simulation_node: bool,
    /// The viewer shows this node's children
    pub expanded: bool,
}

impl Default for NodeFlags {
    /// Flags of a freshly created node: expanded, nothing highlighted
    fn default() -> Self {
        NodeFlags {
            node_selected: false,
            edge_selected: false,
            highlight_uct_only: false,
            highlight_visits_value_uct: false,
            simulation_node: false,
            expanded: true,
        }
    }
}

impl NodeFlags {
    /// Flags with every highlight removed and the node collapsed
    pub fn cleared() -> Self {
        NodeFlags {
            expanded: false,
            ..NodeFlags::default()
        }
    }
}

/// Side table of [`NodeFlags`] indexed by node id
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    flags: Vec<NodeFlags>,
}

impl Annotations {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the flags of a node, defaults for nodes never touched
    pub fn get(&self, id: NodeId) -> NodeFlags {
        self.flags.get(id.index()).copied().unwrap_or_default()
    }

    /// Returns mutable flags of a node, growing the table as needed
    pub fn get_mut(&mut self, id: NodeId) -> &mut NodeFlags {
        if id.index() >= self.flags.len() {
            self.flags.resize(id.index() + 1, NodeFlags::default());
        }
        &mut self.flags[id.index()]
    }

    /// Clears every flag of a tree with `len` nodes and expands the root
    pub fn reset(&mut self, len: usize) {
        self.flags.clear();
        self.flags.resize(len, NodeFlags::cleared());
        self.get_mut(NodeId::ROOT).expanded = true;
    }

    /// Removes node and edge selection everywhere
    pub fn clear_selection(&mut self) {
        for flags in &mut self.flags {
            flags.node_selected = false;
            flags.edge_selected = false;
        }
    }

    /// Removes selection and the UCT-only highlight everywhere
    pub fn clear_highlights(&mut self) {
        self.clear_selection();
        for flags in &mut self.flags {
            flags.highlight_uct_only = false;
        }
    }

    /// Forgets the flags of all nodes from `len` on
    pub fn truncate(&mut self, len: usize) {
        self.flags.truncate(len);
    }
}
