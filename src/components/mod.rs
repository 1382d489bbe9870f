//! Component models for DC circuit analysis.
//!
//! This module provides models for all supported circuit components:
//! - Linear: Resistor
//! - Sources: ideal Voltage Source
//! - Nonlinear: ideal Diode (carried in the model, not yet solved)
//!
//! Every consumer matches on [`Component`] exhaustively, so a new kind must be
//! handled by the equation builder, the reconstructor and the law checker
//! before the crate compiles again.

mod diode;
mod linear;
mod sources;

pub use diode::{DiodePolarity, IdealDiode};
pub use linear::Resistor;
pub use sources::VoltageSource;

/// A two-terminal circuit component.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Resistor(Resistor),
    VoltageSource(VoltageSource),
    Diode(IdealDiode),
}

impl Component {
    /// Create a resistor between `n1` and `n2`.
    pub fn resistor(
        id: impl Into<String>,
        n1: impl Into<String>,
        n2: impl Into<String>,
        resistance: f64,
    ) -> Self {
        Component::Resistor(Resistor::new(id.into(), [n1.into(), n2.into()], resistance))
    }

    /// Create an ideal voltage source enforcing `V(n1) - V(n2) = voltage`.
    pub fn voltage_source(
        id: impl Into<String>,
        n1: impl Into<String>,
        n2: impl Into<String>,
        voltage: f64,
    ) -> Self {
        Component::VoltageSource(VoltageSource::new(
            id.into(),
            [n1.into(), n2.into()],
            voltage,
        ))
    }

    /// Create an ideal diode.
    pub fn diode(
        id: impl Into<String>,
        n1: impl Into<String>,
        n2: impl Into<String>,
        polarity: DiodePolarity,
    ) -> Self {
        Component::Diode(IdealDiode::new(id.into(), [n1.into(), n2.into()], polarity))
    }

    /// Get the component ID.
    pub fn id(&self) -> &str {
        match self {
            Component::Resistor(r) => &r.id,
            Component::VoltageSource(v) => &v.id,
            Component::Diode(d) => &d.id,
        }
    }

    /// Get both terminal node IDs as `[n1, n2]`.
    pub fn nodes(&self) -> &[String; 2] {
        match self {
            Component::Resistor(r) => &r.nodes,
            Component::VoltageSource(v) => &v.nodes,
            Component::Diode(d) => &d.nodes,
        }
    }

    /// First terminal.
    pub fn n1(&self) -> &str {
        &self.nodes()[0]
    }

    /// Second terminal.
    pub fn n2(&self) -> &str {
        &self.nodes()[1]
    }

    /// Check if this component is nonlinear (not handled by the linear solve).
    pub fn is_nonlinear(&self) -> bool {
        matches!(self, Component::Diode(_))
    }
}
