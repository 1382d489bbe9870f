//! Netlist validation.

use std::collections::HashSet;

use tracing::debug;

use crate::components::Component;
use crate::error::{CircuitError, Result};

use super::Netlist;

/// What to do with a voltage source that has neither terminal at ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloatingSourcePolicy {
    /// Accept the netlist. The penalty formulation then leaves the source's
    /// constraint unenforced; the augmented formulation solves it exactly.
    #[default]
    Ignore,
    /// Fail validation with a topology error.
    Reject,
}

/// Validate a netlist for analysis, accepting floating voltage sources.
///
/// Checks, in order, stopping at the first violation:
/// - Exactly one ground node
/// - At least one component
/// - Per component: unique ID, existing and distinct terminals, R > 0
/// - Every node reachable from ground through some component
pub fn validate_netlist(netlist: &Netlist) -> Result<()> {
    validate_netlist_with(netlist, FloatingSourcePolicy::Ignore)
}

/// Validate a netlist with an explicit floating-source policy.
pub fn validate_netlist_with(netlist: &Netlist, floating: FloatingSourcePolicy) -> Result<()> {
    let ground = check_ground(netlist)?;

    if netlist.components().is_empty() {
        return Err(CircuitError::EmptyNetlist);
    }

    let mut seen_ids = HashSet::new();
    for comp in netlist.components() {
        check_component(netlist, comp)?;
        if !seen_ids.insert(comp.id()) {
            return Err(CircuitError::topology(comp.id(), "duplicate component id"));
        }
    }

    if floating == FloatingSourcePolicy::Reject {
        check_floating_sources(netlist)?;
    }

    check_connectivity(netlist, ground)?;

    debug!(
        nodes = netlist.num_nodes(),
        components = netlist.num_components(),
        "netlist validated"
    );
    Ok(())
}

fn check_ground(netlist: &Netlist) -> Result<&str> {
    let grounds: Vec<&str> = netlist.ground_nodes().map(|n| n.id.as_str()).collect();
    match grounds.as_slice() {
        [] => Err(CircuitError::ground("missing ground")),
        [only] => Ok(*only),
        many => Err(CircuitError::ground(format!(
            "multiple ground nodes ({})",
            many.join(", ")
        ))),
    }
}

fn check_component(netlist: &Netlist, comp: &Component) -> Result<()> {
    let [n1, n2] = comp.nodes();

    for node in [n1, n2] {
        if !netlist.contains_node(node) {
            return Err(CircuitError::topology(
                comp.id(),
                format!("terminal connected to unknown node '{}' ({}/{})", node, n1, n2),
            ));
        }
    }

    if n1 == n2 {
        return Err(CircuitError::topology(
            comp.id(),
            format!("both terminals on the same node '{}'", n1),
        ));
    }

    match comp {
        Component::Resistor(r) => {
            if r.resistance.is_nan() || r.resistance <= 0.0 {
                return Err(CircuitError::parameter(
                    &r.id,
                    format!("resistance must be > 0 (got {})", r.resistance),
                ));
            }
            if !r.has_valid_resistance() {
                return Err(CircuitError::parameter(
                    &r.id,
                    format!("conductance 1/R overflows (R = {:e})", r.resistance),
                ));
            }
        }
        // Any real value is a valid ideal source
        Component::VoltageSource(_) => {}
        // Polarity is a closed enum; unrecognized spellings are rejected when parsed
        Component::Diode(_) => {}
    }

    Ok(())
}

fn check_floating_sources(netlist: &Netlist) -> Result<()> {
    for comp in netlist.components() {
        if let Component::VoltageSource(v) = comp {
            if !netlist.is_ground(v.positive()) && !netlist.is_ground(v.negative()) {
                return Err(CircuitError::topology(
                    &v.id,
                    format!(
                        "floating voltage source between '{}' and '{}' is not supported",
                        v.positive(),
                        v.negative()
                    ),
                ));
            }
        }
    }
    Ok(())
}

fn check_connectivity(netlist: &Netlist, ground: &str) -> Result<()> {
    let reached = netlist.reachable_from(ground);
    let mut missing: Vec<String> = netlist
        .nodes()
        .iter()
        .filter(|n| !reached.contains(&n.id))
        .map(|n| n.id.clone())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    missing.sort();
    Err(CircuitError::Connectivity { nodes: missing })
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_valid_divider() {
        assert!(validate_netlist(&divider()).is_ok());
    }

    #[test]
    fn test_missing_ground() {
        let mut nl = Netlist::new();
        nl.add_node("N1", false);
        nl.add_component(Component::resistor("R1", "N1", "N1", 1.0));
        let err = validate_netlist(&nl).unwrap_err();
        assert!(matches!(err, CircuitError::Ground { ref message } if message == "missing ground"));
    }

    #[test]
    fn test_multiple_grounds() {
        let mut nl = divider();
        nl.add_node("GND2", true);
        let err = validate_netlist(&nl).unwrap_err();
        match err {
            CircuitError::Ground { message } => {
                assert!(message.starts_with("multiple ground nodes"));
                assert!(message.contains("GND2"));
            }
            other => panic!("expected ground error, got {other:?}"),
        }
    }

    #[test]
    fn test_ground_checked_before_components() {
        let nl = Netlist::new();
        assert!(matches!(validate_netlist(&nl), Err(CircuitError::Ground { .. })));

        let mut nl = Netlist::new();
        nl.add_node("GND", true);
        assert!(matches!(validate_netlist(&nl), Err(CircuitError::EmptyNetlist)));
    }

    #[test]
    fn test_unknown_terminal() {
        let mut nl = divider();
        nl.add_component(Component::resistor("R3", "N2", "N9", 10.0));
        let err = validate_netlist(&nl).unwrap_err();
        assert!(matches!(err, CircuitError::Topology { ref component, .. } if component == "R3"));
        assert!(err.to_string().contains("N9"));
    }

    #[test]
    fn test_self_loop() {
        let mut nl = divider();
        nl.add_component(Component::resistor("R3", "N2", "N2", 10.0));
        let err = validate_netlist(&nl).unwrap_err();
        assert!(matches!(err, CircuitError::Topology { ref component, .. } if component == "R3"));
    }

    #[test]
    fn test_non_positive_resistance() {
        for value in [0.0, -5.0, f64::NAN] {
            let mut nl = divider();
            nl.add_component(Component::resistor("R3", "N2", "GND", value));
            let err = validate_netlist(&nl).unwrap_err();
            assert!(matches!(err, CircuitError::Parameter { ref component, .. } if component == "R3"));
        }
    }

    #[test]
    fn test_resistance_extremes() {
        let mut nl = divider();
        nl.add_component(Component::resistor("R3", "N2", "GND", f64::INFINITY));
        assert!(validate_netlist(&nl).is_ok());

        let mut nl = divider();
        nl.add_component(Component::resistor("R3", "N2", "GND", 1e-320));
        let err = validate_netlist(&nl).unwrap_err();
        assert!(matches!(err, CircuitError::Parameter { ref component, .. } if component == "R3"));
        assert!(err.to_string().contains("overflows"));
    }

    #[test]
    fn test_component_errors_follow_insertion_order() {
        let mut nl = divider();
        nl.add_component(Component::resistor("R3", "N2", "GND", 0.0));
        nl.add_component(Component::resistor("R4", "N2", "N7", 10.0));
        // R3 comes first, so its parameter error wins over R4's topology error
        assert!(matches!(validate_netlist(&nl), Err(CircuitError::Parameter { .. })));
    }

    #[test]
    fn test_zero_volt_source_is_valid() {
        let mut nl = divider();
        nl.add_component(Component::voltage_source("V2", "N2", "GND", 0.0));
        assert!(validate_netlist(&nl).is_ok());
    }

    #[test]
    fn test_duplicate_component_id() {
        let mut nl = divider();
        nl.add_component(Component::resistor("R1", "N2", "GND", 10.0));
        let err = validate_netlist(&nl).unwrap_err();
        assert!(matches!(err, CircuitError::Topology { ref component, .. } if component == "R1"));
    }

    #[test]
    fn test_parameter_error_wins_over_duplicate_id() {
        let mut nl = divider();
        nl.add_component(Component::resistor("R1", "N2", "GND", 0.0));
        let err = validate_netlist(&nl).unwrap_err();
        assert!(matches!(err, CircuitError::Parameter { ref component, .. } if component == "R1"));
    }

    #[test]
    fn test_disconnected_nodes_sorted() {
        let mut nl = divider();
        nl.add_node("Z", false);
        nl.add_node("X", false);
        nl.add_node("Y", false);
        nl.add_component(Component::resistor("R9", "X", "Y", 10.0));
        let err = validate_netlist(&nl).unwrap_err();
        match err {
            CircuitError::Connectivity { nodes } => assert_eq!(nodes, vec!["X", "Y", "Z"]),
            other => panic!("expected connectivity error, got {other:?}"),
        }
    }

    #[test]
    fn test_floating_source_policy() {
        let mut nl = divider();
        nl.add_component(Component::voltage_source("V2", "N1", "N2", 1.0));
        assert!(validate_netlist_with(&nl, FloatingSourcePolicy::Ignore).is_ok());
        let err = validate_netlist_with(&nl, FloatingSourcePolicy::Reject).unwrap_err();
        assert!(matches!(err, CircuitError::Topology { ref component, .. } if component == "V2"));
    }

    #[test]
    fn test_diode_counts_for_connectivity() {
        let mut nl = divider();
        nl.add_node("N3", false);
        nl.add_component(Component::diode(
            "D1",
            "N2",
            "N3",
            crate::components::DiodePolarity::AnodeToCathode,
        ));
        assert!(validate_netlist(&nl).is_ok());
    }

    #[test]
    fn test_validation_is_idempotent() {
        let mut nl = divider();
        nl.add_node("LOOSE", false);
        let first = validate_netlist(&nl).unwrap_err().to_string();
        let second = validate_netlist(&nl).unwrap_err().to_string();
        assert_eq!(first, second);
    }
}
