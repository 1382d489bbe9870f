//! Equation system assembly.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::components::Component;
use crate::netlist::{BranchIndex, Netlist, NodeIndex};

use super::SourceModel;

/// Linear system Ax = b built from a netlist.
#[derive(Debug, Clone, PartialEq)]
pub struct EquationSystem {
    /// System matrix A (row-major)
    pub a: Vec<f64>,
    /// Right-hand side b
    pub b: Vec<f64>,
    /// Matrix dimension
    pub size: usize,
}

impl EquationSystem {
    /// Create a zeroed system of the given dimension.
    pub fn new(size: usize) -> Self {
        Self {
            a: vec![0.0; size * size],
            b: vec![0.0; size],
            size,
        }
    }

    /// Get matrix element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.a[row * self.size + col]
    }

    /// Add to matrix element at (row, col).
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        self.a[row * self.size + col] += value;
    }

    /// Add to right-hand side element.
    pub fn add_source(&mut self, row: usize, value: f64) {
        self.b[row] += value;
    }

    /// Stamp a conductance between two nodes.
    /// For a conductance G between nodes n1 and n2:
    ///   A[n1,n1] += G
    ///   A[n2,n2] += G
    ///   A[n1,n2] -= G
    ///   A[n2,n1] -= G
    /// Ground terminals (None) have no row, so only the self terms of the
    /// other terminal are stamped.
    pub fn stamp_conductance(&mut self, n1: Option<usize>, n2: Option<usize>, g: f64) {
        if let Some(i) = n1 {
            self.add(i, i, g);
        }
        if let Some(j) = n2 {
            self.add(j, j, g);
        }
        if let (Some(i), Some(j)) = (n1, n2) {
            self.add(i, j, -g);
            self.add(j, i, -g);
        }
    }

    /// Pin node `m` towards `voltage` with a penalty conductance `k`.
    ///
    /// Equivalent to a Norton source of k·voltage in parallel with k to
    /// ground. `sign` is +1 when `m` is the positive terminal and -1 when it
    /// is the negative one.
    pub fn stamp_penalty_source(&mut self, m: usize, k: f64, voltage: f64, sign: f64) {
        self.add(m, m, k);
        self.add_source(m, sign * k * voltage);
    }

    /// Stamp a voltage source between two nodes with branch current at index br.
    /// V[n+] - V[n-] = E
    pub fn stamp_voltage_source(
        &mut self,
        n_pos: Option<usize>,
        n_neg: Option<usize>,
        br: usize,
        voltage: f64,
    ) {
        if let Some(i) = n_pos {
            self.add(br, i, 1.0);
            self.add(i, br, 1.0);
        }
        if let Some(j) = n_neg {
            self.add(br, j, -1.0);
            self.add(j, br, -1.0);
        }
        self.b[br] = voltage;
    }

    /// Ratio of the largest to the smallest non-zero diagonal magnitude.
    ///
    /// A cheap conditioning indicator: under the penalty formulation it is
    /// about K / min(G). Returns `None` when no diagonal entry is non-zero.
    pub fn diagonal_ratio(&self) -> Option<f64> {
        let diag = (0..self.size)
            .map(|i| self.get(i, i).abs())
            .filter(|d| *d > 0.0);
        let (min, max) = diag.fold((f64::INFINITY, 0.0_f64), |(lo, hi), d| (lo.min(d), hi.max(d)));
        (max > 0.0).then(|| max / min)
    }
}

/// Bookkeeping needed to turn the solution vector back into named values.
#[derive(Debug, Clone)]
pub struct Meta<'a> {
    /// Mapping from non-ground node ID to matrix row
    pub node_index: HashMap<String, NodeIndex>,
    /// Mapping from voltage-source ID to its branch-current row
    /// (augmented formulation only)
    pub source_branches: HashMap<String, BranchIndex>,
    /// Number of non-ground nodes
    pub num_nodes: usize,
    /// Components of the analyzed netlist
    pub components: &'a [Component],
}

impl Meta<'_> {
    /// Matrix row for a node voltage. Returns None for ground.
    pub fn node_row(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).map(|idx| idx.0)
    }

    /// Matrix row for a source branch current.
    pub fn branch_row(&self, id: &str) -> Option<usize> {
        self.source_branches
            .get(id)
            .map(|br| self.num_nodes + br.0)
    }

    /// Size of the solution vector.
    pub fn size(&self) -> usize {
        self.num_nodes + self.source_branches.len()
    }
}

/// Assemble the equation system for a validated netlist.
///
/// Never fails: rejection happens during validation. Under the penalty
/// formulation a voltage source with neither terminal at ground is skipped
/// with a warning.
pub fn build_system<'a>(netlist: &'a Netlist, model: &SourceModel) -> (EquationSystem, Meta<'a>) {
    let node_index: HashMap<String, NodeIndex> = netlist
        .non_ground_nodes()
        .enumerate()
        .map(|(i, node)| (node.id.clone(), NodeIndex(i)))
        .collect();
    let num_nodes = node_index.len();

    let mut source_branches = HashMap::new();
    if model.solves_source_currents() {
        for comp in netlist.components() {
            if let Component::VoltageSource(v) = comp {
                let br = BranchIndex(source_branches.len());
                source_branches.insert(v.id.clone(), br);
            }
        }
    }

    let meta = Meta {
        node_index,
        source_branches,
        num_nodes,
        components: netlist.components(),
    };
    let mut system = EquationSystem::new(meta.size());

    for comp in netlist.components() {
        match comp {
            Component::Resistor(r) => {
                let n1 = meta.node_row(&r.nodes[0]);
                let n2 = meta.node_row(&r.nodes[1]);
                trace!(id = %r.id, g = r.conductance(), "stamp resistor");
                system.stamp_conductance(n1, n2, r.conductance());
            }

            Component::VoltageSource(v) => {
                let n_pos = meta.node_row(v.positive());
                let n_neg = meta.node_row(v.negative());
                match model {
                    SourceModel::Penalty { conductance } => match (n_pos, n_neg) {
                        (Some(m), None) => system.stamp_penalty_source(m, *conductance, v.voltage, 1.0),
                        (None, Some(m)) => system.stamp_penalty_source(m, *conductance, v.voltage, -1.0),
                        _ => warn!(
                            id = %v.id,
                            n1 = %v.positive(),
                            n2 = %v.negative(),
                            "voltage source without a ground terminal is not enforced by the penalty formulation; skipped"
                        ),
                    },
                    SourceModel::Augmented => {
                        if let Some(br) = meta.branch_row(&v.id) {
                            system.stamp_voltage_source(n_pos, n_neg, br, v.voltage);
                        }
                    }
                }
                trace!(id = %v.id, volts = v.voltage, "stamp voltage source");
            }

            // Not solved in the linear formulation
            Component::Diode(d) => {
                trace!(id = %d.id, "diode left unstamped");
            }
        }
    }

    let unsolved = netlist.components().iter().filter(|c| c.is_nonlinear()).count();
    if unsolved > 0 {
        warn!(count = unsolved, "nonlinear components are not part of the linear solve");
    }

    debug!(
        unknowns = system.size,
        nodes = num_nodes,
        branches = meta.source_branches.len(),
        unsolved,
        diagonal_ratio = system.diagonal_ratio().unwrap_or(0.0),
        "equation system assembled"
    );

    (system, meta)
}
