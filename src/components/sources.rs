//! Ideal voltage sources.

/// An ideal voltage source component.
///
/// The source enforces: V(nodes[0]) - V(nodes[1]) = voltage. Any real value
/// is allowed, including zero.
#[derive(Debug, Clone, PartialEq)]
pub struct VoltageSource {
    pub id: String,
    pub nodes: [String; 2], // [positive, negative]
    pub voltage: f64,
}

impl VoltageSource {
    /// Create a new voltage source.
    pub fn new(id: String, nodes: [String; 2], voltage: f64) -> Self {
        Self { id, nodes, voltage }
    }

    /// Positive reference terminal.
    pub fn positive(&self) -> &str {
        &self.nodes[0]
    }

    /// Negative reference terminal.
    pub fn negative(&self) -> &str {
        &self.nodes[1]
    }

    /// KVL residual for the given terminal voltages.
    pub fn residual(&self, v_pos: f64, v_neg: f64) -> f64 {
        (v_pos - v_neg) - self.voltage
    }
}
