use std::fmt;

/// A snapshot of the shape of a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Stats {
    /// Total number of nodes.
    pub nodes: usize,
    /// Nodes without children.
    pub leaves: usize,
    /// Nodes with both children.
    pub two_children: usize,
    /// Number of levels. A lone root is one level.
    pub levels: usize,
}

impl Stats {
    /// Nodes with exactly one child. Every node is a leaf, has one child, or has two.
    ///
    /// Saturates at `0` if the fields were filled in by hand and don't add up.
    pub fn one_child(&self) -> usize {
        self.nodes
            .saturating_sub(self.leaves)
            .saturating_sub(self.two_children)
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {} leaves, {} with two children, {} levels",
            self.nodes, self.leaves, self.two_children, self.levels
        )
    }
}
