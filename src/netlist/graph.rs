//! Netlist structure.

use std::collections::{HashMap, HashSet, VecDeque};

use super::types::Node;
use crate::components::Component;

/// A circuit netlist: nodes plus two-terminal components.
///
/// Nodes keep their registration order and components their insertion
/// order, so every analysis of the same netlist produces the same output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Netlist {
    /// Nodes in registration order
    nodes: Vec<Node>,
    /// Mapping from node ID to position in `nodes`
    node_map: HashMap<String, usize>,
    /// All components in insertion order
    components: Vec<Component>,
}

impl Netlist {
    /// Create an empty netlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node.
    ///
    /// Registering an existing ID keeps the node and ORs in the ground flag,
    /// so a node can be promoted to ground but never demoted.
    pub fn add_node(&mut self, id: impl Into<String>, is_ground: bool) -> &Node {
        let id = id.into();
        let idx = match self.node_map.get(&id) {
            Some(&idx) => {
                self.nodes[idx].is_ground |= is_ground;
                idx
            }
            None => {
                let idx = self.nodes.len();
                self.node_map.insert(id.clone(), idx);
                self.nodes.push(Node::new(id, is_ground));
                idx
            }
        };
        &self.nodes[idx]
    }

    /// Append a component. Terminals are not checked here; see
    /// [`validate_netlist`](super::validate_netlist).
    pub fn add_component(&mut self, component: Component) {
        self.components.push(component);
    }

    /// All nodes in registration order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All components in insertion order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Find a node by ID.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_map.get(id).map(|&idx| &self.nodes[idx])
    }

    /// Check whether a node ID is registered.
    pub fn contains_node(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    /// Whether `id` names a registered ground node.
    pub fn is_ground(&self, id: &str) -> bool {
        self.node(id).is_some_and(|n| n.is_ground)
    }

    /// All nodes flagged as ground, in registration order.
    pub fn ground_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_ground)
    }

    /// ID of the first ground node, if any.
    pub fn ground_id(&self) -> Option<&str> {
        self.ground_nodes().next().map(|n| n.id.as_str())
    }

    /// Non-ground nodes in registration order.
    pub fn non_ground_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| !n.is_ground)
    }

    /// Find a component by ID.
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id() == id)
    }

    /// Number of registered nodes (including ground).
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of components.
    pub fn num_components(&self) -> usize {
        self.components.len()
    }

    /// Undirected adjacency between node IDs, one edge per component.
    pub fn adjacency(&self) -> HashMap<&str, Vec<&str>> {
        let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
        for comp in &self.components {
            let [n1, n2] = comp.nodes();
            adj.entry(n1.as_str()).or_default().push(n2.as_str());
            adj.entry(n2.as_str()).or_default().push(n1.as_str());
        }
        adj
    }

    /// Node IDs reachable from `start` through any component, direction-agnostic.
    pub fn reachable_from(&self, start: &str) -> HashSet<String> {
        let adj = self.adjacency();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut queue = VecDeque::new();
        seen.insert(start);
        queue.push_back(start);

        while let Some(u) = queue.pop_front() {
            for &v in adj.get(u).into_iter().flatten() {
                if seen.insert(v) {
                    queue.push_back(v);
                }
            }
        }

        seen.into_iter().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_node_merges_ground_flag() {
        let mut nl = Netlist::new();
        nl.add_node("N1", false);
        nl.add_node("GND", false);
        assert!(!nl.is_ground("GND"));

        let node = nl.add_node("GND", true);
        assert!(node.is_ground);

        // A later non-ground registration does not demote it
        nl.add_node("GND", false);
        assert!(nl.is_ground("GND"));
        assert_eq!(nl.num_nodes(), 2);
        assert_eq!(nl.ground_id(), Some("GND"));
    }

    #[test]
    fn test_node_order_is_stable() {
        let mut nl = Netlist::new();
        for id in ["C", "A", "GND", "B"] {
            nl.add_node(id, id == "GND");
        }
        let ids: Vec<&str> = nl.non_ground_nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_reachability_ignores_direction() {
        let mut nl = Netlist::new();
        nl.add_node("GND", true);
        nl.add_node("A", false);
        nl.add_node("B", false);
        nl.add_node("C", false);
        nl.add_component(Component::resistor("R1", "A", "GND", 1.0));
        nl.add_component(Component::resistor("R2", "B", "A", 1.0));

        let reached = nl.reachable_from("GND");
        assert!(reached.contains("A"));
        assert!(reached.contains("B"));
        assert!(!reached.contains("C"));
    }

    #[test]
    fn test_component_lookup() {
        let mut nl = Netlist::new();
        nl.add_component(Component::resistor("R1", "A", "B", 10.0));
        assert!(nl.component("R1").is_some());
        assert!(nl.component("R2").is_none());
    }
}
