//! Kirchhoff law checks.
//!
//! The checks recompute residuals from the named solution rather than from
//! the solved matrix, so they also catch reconstruction mistakes. They run
//! after every simulation and never fail.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::components::Component;
use crate::netlist::Netlist;

use super::Solution;

/// Tolerances for the law checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckTolerances {
    /// Relative tolerance for KCL sums
    pub rtol: f64,
    /// Absolute tolerance for KCL sums (amperes)
    pub atol: f64,
    /// Absolute tolerance for KVL residuals (volts)
    pub kvl_atol: f64,
}

impl Default for CheckTolerances {
    fn default() -> Self {
        Self {
            rtol: 1e-6,
            atol: 1e-9,
            kvl_atol: 1e-6,
        }
    }
}

impl CheckTolerances {
    /// Whether a KCL current sum is acceptable.
    pub fn kcl_ok(&self, sum: f64) -> bool {
        sum.abs() <= self.atol.max(self.rtol * sum.abs().max(1.0))
    }

    /// Whether a KVL residual is acceptable.
    pub fn kvl_ok(&self, residual: f64) -> bool {
        residual.abs() <= self.kvl_atol
    }
}

/// Net current leaving a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KclRecord {
    #[serde(rename = "sum_A")]
    pub sum_a: f64,
    pub ok: bool,
}

/// Deviation of a source's terminal voltage from its nominal value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KvlRecord {
    #[serde(rename = "sum_V")]
    pub sum_v: f64,
    pub ok: bool,
}

/// KCL residual per non-ground node and KVL residual per voltage source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckReport {
    #[serde(rename = "KCL")]
    pub kcl: BTreeMap<String, KclRecord>,
    #[serde(rename = "KVL")]
    pub kvl: BTreeMap<String, KvlRecord>,
}

impl CheckReport {
    /// True when every recorded check passed.
    pub fn all_ok(&self) -> bool {
        self.kcl.values().all(|r| r.ok) && self.kvl.values().all(|r| r.ok)
    }

    /// Labels of failed checks, e.g. `"KCL N1"` or `"KVL V1"`.
    pub fn failures(&self) -> Vec<String> {
        let kcl = self
            .kcl
            .iter()
            .filter(|(_, r)| !r.ok)
            .map(|(id, _)| format!("KCL {}", id));
        let kvl = self
            .kvl
            .iter()
            .filter(|(_, r)| !r.ok)
            .map(|(id, _)| format!("KVL {}", id));
        kcl.chain(kvl).collect()
    }
}

/// Audit a solution against Kirchhoff's current and voltage laws.
///
/// KCL sums, at each non-ground node, the resistor currents leaving it plus
/// any voltage-source currents present in the solution (0.0 under the
/// penalty formulation). Diodes contribute nothing.
pub fn check_laws(netlist: &Netlist, solution: &Solution, tol: &CheckTolerances) -> CheckReport {
    let v = |id: &str| solution.voltage(id);

    let mut kcl = BTreeMap::new();
    for node in netlist.non_ground_nodes() {
        let mut sum = 0.0;
        for comp in netlist.components() {
            let current = match comp {
                Component::Resistor(r) => r.current(v(&r.nodes[0]), v(&r.nodes[1])),
                Component::VoltageSource(s) => solution.current(&s.id).unwrap_or(0.0),
                Component::Diode(_) => continue,
            };
            if comp.n1() == node.id {
                sum += current;
            } else if comp.n2() == node.id {
                sum -= current;
            }
        }
        kcl.insert(
            node.id.clone(),
            KclRecord {
                sum_a: sum,
                ok: tol.kcl_ok(sum),
            },
        );
    }

    let mut kvl = BTreeMap::new();
    for comp in netlist.components() {
        if let Component::VoltageSource(s) = comp {
            let err = s.residual(v(s.positive()), v(s.negative()));
            kvl.insert(
                s.id.clone(),
                KvlRecord {
                    sum_v: err,
                    ok: tol.kvl_ok(err),
                },
            );
        }
    }

    CheckReport { kcl, kvl }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn solution(n1: f64, n2: f64, i_v1: f64) -> Solution {
        let mut sol = Solution::default();
        sol.node_voltages.insert("N1".to_string(), n1);
        sol.node_voltages.insert("N2".to_string(), n2);
        sol.branch_currents.insert("V1".to_string(), i_v1);
        sol
    }

    #[test]
    fn test_kcl_balanced_internal_node() {
        let report = check_laws(&divider(), &solution(12.0, 8.0, 0.0), &CheckTolerances::default());
        let n2 = report.kcl["N2"];
        assert!(n2.ok);
        assert!(n2.sum_a.abs() < 1e-15);
        assert!(!report.kcl.contains_key("GND"));
    }

    #[test]
    fn test_kcl_without_source_current() {
        // Only R1 is counted at N1 when the source current is unknown
        let report = check_laws(&divider(), &solution(12.0, 8.0, 0.0), &CheckTolerances::default());
        assert_relative_eq!(report.kcl["N1"].sum_a, 0.004);
        assert!(!report.kcl["N1"].ok);
        assert!(!report.all_ok());
        assert_eq!(report.failures(), vec!["KCL N1".to_string()]);
    }

    #[test]
    fn test_kcl_with_source_current() {
        let report = check_laws(&divider(), &solution(12.0, 8.0, -0.004), &CheckTolerances::default());
        assert!(report.kcl["N1"].ok);
        assert!(report.all_ok());
        assert!(report.failures().is_empty());
    }

    #[test]
    fn test_kvl_residual() {
        let report = check_laws(&divider(), &solution(11.9, 8.0, 0.0), &CheckTolerances::default());
        let kvl = report.kvl["V1"];
        assert_relative_eq!(kvl.sum_v, -0.1, epsilon = 1e-12);
        assert!(!kvl.ok);

        let report = check_laws(&divider(), &solution(12.0, 8.0, 0.0), &CheckTolerances::default());
        assert_eq!(report.kvl["V1"].sum_v, 0.0);
        assert!(report.kvl["V1"].ok);
    }

    #[test]
    fn test_kcl_tolerance_formula() {
        let tol = CheckTolerances::default();
        assert!(tol.kcl_ok(5e-10));
        assert!(!tol.kcl_ok(2e-6));
        // Relative term dominates for large sums, but a large sum still fails
        assert!(!tol.kcl_ok(10.0));
    }

    #[test]
    fn test_report_serializes_with_law_keys() {
        let report = check_laws(&divider(), &solution(12.0, 8.0, 0.0), &CheckTolerances::default());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["KCL"]["N2"]["sum_A"].is_number());
        assert_eq!(json["KVL"]["V1"]["ok"], serde_json::Value::Bool(true));
    }
}
