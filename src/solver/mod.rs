//! Nodal analysis solver.
//!
//! This module provides the numerical engine for DC operating-point analysis.
//!
//! ## Nodal Analysis
//!
//! The builder assembles a system of equations Ax = b where:
//! - x contains the non-ground node voltages (plus, in the augmented
//!   formulation, one branch current per voltage source)
//! - A is the conductance/coefficient matrix
//! - b is the equivalent current (and source voltage) vector
//!
//! Voltage sources are enforced in one of two ways, selected by
//! [`SourceModel`]:
//!
//! - **Penalty** (default): a source between ground and node m adds a very
//!   large conductance K to A[m,m] and ±K·V to b[m]. The unknown count stays
//!   at the number of non-ground nodes. The constraint error is roughly
//!   G_node/K relative, where G_node is the node's self-conductance, and the
//!   matrix condition number grows with K / min(G). Sources with neither
//!   terminal at ground cannot be expressed and are skipped. Source branch
//!   currents are not recovered.
//!
//! - **Augmented**: classical MNA. Each source adds a branch-current unknown
//!   and a constraint row V(n+) - V(n-) = E:
//!
//! ```text
//! [ G   B ] [ v ]   [ i ]
//! [ C   0 ] [ j ] = [ e ]
//! ```
//!
//!   This enforces every source exactly, floating or not, and reports the
//!   current through it.

mod linear;
mod mna;
mod simulator;

pub use linear::{LinearSolver, LuSolver};
pub use mna::{build_system, EquationSystem, Meta};
pub use simulator::{simulate, Simulator, SimulatorConfig};

pub use crate::analysis::CheckTolerances;
pub use crate::netlist::FloatingSourcePolicy;

/// Default penalty conductance (siemens) used to pin ground-referenced sources.
pub const DEFAULT_PENALTY_CONDUCTANCE: f64 = 1e12;

/// Relative pivot threshold: a pivot at or below this fraction of its row's
/// largest original entry is treated as singular.
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-14;

/// How ideal voltage sources enter the equation system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceModel {
    /// Large-conductance approximation of ground-referenced sources.
    Penalty {
        /// Conductance K stamped onto the driven node, in siemens.
        conductance: f64,
    },
    /// Exact constraint rows with one current unknown per source.
    Augmented,
}

impl Default for SourceModel {
    fn default() -> Self {
        SourceModel::Penalty {
            conductance: DEFAULT_PENALTY_CONDUCTANCE,
        }
    }
}

impl SourceModel {
    /// Whether source branch currents are solved for.
    pub fn solves_source_currents(&self) -> bool {
        matches!(self, SourceModel::Augmented)
    }
}
