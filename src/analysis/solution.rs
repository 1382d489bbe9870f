//! Solution reconstruction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::components::Component;
use crate::solver::Meta;

use super::CheckReport;

/// Result of one DC analysis.
///
/// Maps are ordered by ID so that printing or serializing a solution is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Node ID -> voltage (V). Ground is not listed and reads as 0.
    pub node_voltages: BTreeMap<String, f64>,
    /// Component ID -> branch current (A), positive from n1 to n2.
    pub branch_currents: BTreeMap<String, f64>,
    /// Component ID -> diode conduction state. Always empty: diodes are not solved.
    pub diode_states: BTreeMap<String, String>,
    /// Kirchhoff law audit of this solution.
    pub checks: CheckReport,
}

impl Solution {
    /// Voltage at a node. Ground and unknown IDs read as 0.0.
    pub fn voltage(&self, node: &str) -> f64 {
        self.node_voltages.get(node).copied().unwrap_or(0.0)
    }

    /// Branch current of a component, if one was computed.
    pub fn current(&self, component: &str) -> Option<f64> {
        self.branch_currents.get(component).copied()
    }
}

/// Map the solution vector back to named node voltages and branch currents.
///
/// Voltage-source currents are 0.0 unless the system carried a branch
/// unknown for the source. Diodes get no entry.
pub fn reconstruct(x: &[f64], meta: &Meta<'_>) -> Solution {
    let node_voltages: BTreeMap<String, f64> = meta
        .node_index
        .iter()
        .map(|(id, idx)| (id.clone(), x[idx.0]))
        .collect();

    let v = |id: &str| node_voltages.get(id).copied().unwrap_or(0.0);

    let mut branch_currents = BTreeMap::new();
    for comp in meta.components {
        match comp {
            Component::Resistor(r) => {
                let i = r.current(v(&r.nodes[0]), v(&r.nodes[1]));
                branch_currents.insert(r.id.clone(), i);
            }
            Component::VoltageSource(s) => {
                let i = meta.branch_row(&s.id).map_or(0.0, |row| x[row]);
                branch_currents.insert(s.id.clone(), i);
            }
            Component::Diode(_) => {}
        }
    }

    Solution {
        node_voltages,
        branch_currents,
        diode_states: BTreeMap::new(),
        checks: CheckReport::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist::Netlist;
    use crate::solver::{build_system, SourceModel};
    use approx::assert_relative_eq;

    fn divider() -> Netlist {
        let mut nl = Netlist::new();
        nl.add_node("GND", true);
        nl.add_node("N1", false);
        nl.add_node("N2", false);
        nl.add_component(Component::voltage_source("V1", "N1", "GND", 12.0));
        nl.add_component(Component::resistor("R1", "N1", "N2", 1000.0));
        nl.add_component(Component::resistor("R2", "N2", "GND", 2000.0));
        nl
    }

    #[test]
    fn test_reconstruct_from_known_vector() {
        let nl = divider();
        let (_, meta) = build_system(&nl, &SourceModel::default());
        let sol = reconstruct(&[12.0, 8.0], &meta);

        assert_eq!(sol.voltage("N1"), 12.0);
        assert_eq!(sol.voltage("N2"), 8.0);
        assert_eq!(sol.voltage("GND"), 0.0);
        assert!(!sol.node_voltages.contains_key("GND"));

        assert_relative_eq!(sol.current("R1").unwrap(), 0.004);
        assert_relative_eq!(sol.current("R2").unwrap(), 0.004);
        // Penalty formulation has no source current unknown
        assert_eq!(sol.current("V1"), Some(0.0));
        assert!(sol.diode_states.is_empty());
    }

    #[test]
    fn test_reconstruct_reads_branch_unknown() {
        let nl = divider();
        let (_, meta) = build_system(&nl, &SourceModel::Augmented);
        let sol = reconstruct(&[12.0, 8.0, -0.004], &meta);
        assert_relative_eq!(sol.current("V1").unwrap(), -0.004);
    }

    #[test]
    fn test_diodes_have_no_current() {
        let mut nl = divider();
        nl.add_component(Component::diode(
            "D1",
            "N2",
            "GND",
            crate::components::DiodePolarity::AnodeToCathode,
        ));
        let (_, meta) = build_system(&nl, &SourceModel::default());
        let sol = reconstruct(&[12.0, 8.0], &meta);
        assert_eq!(sol.current("D1"), None);
    }
}
