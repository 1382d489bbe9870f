//! Linear passive components: Resistor.

/// A resistor component.
///
/// Positive current flows from `nodes[0]` to `nodes[1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Resistor {
    pub id: String,
    pub nodes: [String; 2], // [n1, n2]
    /// Resistance in ohms. Must be strictly positive to pass validation;
    /// `f64::INFINITY` is an open circuit.
    pub resistance: f64,
}

impl Resistor {
    /// Create a new resistor.
    ///
    /// The value is stored as given; range checks belong to the validator so
    /// that a bad value is reported instead of silently clamped.
    pub fn new(id: String, nodes: [String; 2], resistance: f64) -> Self {
        Self {
            id,
            nodes,
            resistance,
        }
    }

    /// Whether the resistance is usable for analysis: > 0 with a finite 1/R.
    pub fn has_valid_resistance(&self) -> bool {
        self.resistance > 0.0 && self.conductance().is_finite()
    }

    /// Get the conductance (1/R).
    pub fn conductance(&self) -> f64 {
        1.0 / self.resistance
    }

    /// Branch current for the given terminal voltages (Ohm's law).
    pub fn current(&self, v1: f64, v2: f64) -> f64 {
        (v1 - v2) / self.resistance
    }
}
