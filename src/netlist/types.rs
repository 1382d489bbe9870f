//! Core types for netlist representation.

use std::fmt;

/// A circuit node (an electrical potential).
///
/// The ground node is the 0 V reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Node {
    pub id: String,
    pub is_ground: bool,
}

impl Node {
    /// Create a new node.
    pub fn new(id: impl Into<String>, is_ground: bool) -> Self {
        Self {
            id: id.into(),
            is_ground,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ground {
            write!(f, "{} (GND)", self.id)
        } else {
            write!(f, "{}", self.id)
        }
    }
}

/// Row/column of a node voltage in the nodal equation system.
/// Ground has no row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub usize);

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{}", self.0)
    }
}

/// Row/column of an extra branch-current unknown (augmented formulation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchIndex(pub usize);

impl fmt::Display for BranchIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I{}", self.0)
    }
}
