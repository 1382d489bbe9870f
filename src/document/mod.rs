//! Persisted netlist documents.
//!
//! A netlist is stored as JSON with a `nodes` list and a `components` list.
//! Each component carries a one-letter `kind` tag and its kind-specific
//! field:
//!
//! ```json
//! {
//!   "nodes": [
//!     { "id": "GND", "is_ground": true },
//!     { "id": "N1", "is_ground": false }
//!   ],
//!   "components": [
//!     { "id": "V1", "kind": "V", "n1": "N1", "n2": "GND", "V": 5.0 },
//!     { "id": "R1", "kind": "R", "n1": "N1", "n2": "GND", "R": 1000.0 },
//!     { "id": "D1", "kind": "D", "n1": "N1", "n2": "GND", "polarity": "A_to_K" }
//!   ]
//! }
//! ```
//!
//! `is_ground` defaults to `false` and `polarity` to `"A_to_K"`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::components::{Component, DiodePolarity};
use crate::error::{CircuitError, Result};
use crate::netlist::Netlist;

/// A node entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    #[serde(default)]
    pub is_ground: bool,
}

/// A component entry, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ComponentRecord {
    #[serde(rename = "R")]
    Resistor {
        id: String,
        n1: String,
        n2: String,
        #[serde(rename = "R")]
        resistance: f64,
    },
    #[serde(rename = "V")]
    VoltageSource {
        id: String,
        n1: String,
        n2: String,
        #[serde(rename = "V")]
        voltage: f64,
    },
    #[serde(rename = "D")]
    Diode {
        id: String,
        n1: String,
        n2: String,
        #[serde(default = "default_polarity")]
        polarity: String,
    },
}

fn default_polarity() -> String {
    DiodePolarity::default().as_str().to_string()
}

/// The on-disk shape of a netlist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetlistDocument {
    pub nodes: Vec<NodeRecord>,
    pub components: Vec<ComponentRecord>,
}

impl NetlistDocument {
    /// Parse a document from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build a netlist, rejecting unrecognized diode polarities.
    pub fn into_netlist(self) -> Result<Netlist> {
        let mut netlist = Netlist::new();
        for node in self.nodes {
            netlist.add_node(node.id, node.is_ground);
        }
        for record in self.components {
            let component = match record {
                ComponentRecord::Resistor { id, n1, n2, resistance } => {
                    Component::resistor(id, n1, n2, resistance)
                }
                ComponentRecord::VoltageSource { id, n1, n2, voltage } => {
                    Component::voltage_source(id, n1, n2, voltage)
                }
                ComponentRecord::Diode { id, n1, n2, polarity } => {
                    let polarity = polarity.parse::<DiodePolarity>().map_err(|_| {
                        CircuitError::parameter(&id, format!("invalid diode polarity '{}'", polarity))
                    })?;
                    Component::diode(id, n1, n2, polarity)
                }
            };
            netlist.add_component(component);
        }
        Ok(netlist)
    }
}

impl From<&Netlist> for NetlistDocument {
    fn from(netlist: &Netlist) -> Self {
        let nodes = netlist
            .nodes()
            .iter()
            .map(|n| NodeRecord {
                id: n.id.clone(),
                is_ground: n.is_ground,
            })
            .collect();

        let components = netlist
            .components()
            .iter()
            .map(|c| match c {
                Component::Resistor(r) => ComponentRecord::Resistor {
                    id: r.id.clone(),
                    n1: r.nodes[0].clone(),
                    n2: r.nodes[1].clone(),
                    resistance: r.resistance,
                },
                Component::VoltageSource(v) => ComponentRecord::VoltageSource {
                    id: v.id.clone(),
                    n1: v.nodes[0].clone(),
                    n2: v.nodes[1].clone(),
                    voltage: v.voltage,
                },
                Component::Diode(d) => ComponentRecord::Diode {
                    id: d.id.clone(),
                    n1: d.nodes[0].clone(),
                    n2: d.nodes[1].clone(),
                    polarity: d.polarity.as_str().to_string(),
                },
            })
            .collect();

        Self { nodes, components }
    }
}

/// Parse a netlist from JSON text.
pub fn parse_netlist(input: &str) -> Result<Netlist> {
    NetlistDocument::from_json(input)?.into_netlist()
}

/// Load a netlist from a JSON file.
pub fn load_netlist(path: &Path) -> Result<Netlist> {
    let content = std::fs::read_to_string(path).map_err(|e| CircuitError::FileRead {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_netlist(&content)
}

/// Save a netlist as pretty-printed JSON.
pub fn save_netlist(netlist: &Netlist, path: &Path) -> Result<()> {
    let json = NetlistDocument::from(netlist).to_json()?;
    std::fs::write(path, json).map_err(|e| CircuitError::FileWrite {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIVIDER: &str = r#"{
        "nodes": [
            { "id": "GND", "is_ground": true },
            { "id": "N1", "is_ground": false },
            { "id": "N2" }
        ],
        "components": [
            { "id": "V1", "kind": "V", "n1": "N1", "n2": "GND", "V": 12 },
            { "id": "R1", "kind": "R", "n1": "N1", "n2": "N2", "R": 1000 },
            { "id": "R2", "kind": "R", "n1": "N2", "n2": "GND", "R": 2000.0 },
            { "id": "D1", "kind": "D", "n1": "N2", "n2": "GND" }
        ]
    }"#;

    #[test]
    fn test_parse_document() {
        let nl = parse_netlist(DIVIDER).unwrap();
        assert_eq!(nl.num_nodes(), 3);
        assert_eq!(nl.ground_id(), Some("GND"));
        assert!(!nl.is_ground("N2"));
        assert_eq!(nl.num_components(), 4);
        assert_eq!(nl.component("R1"), Some(&Component::resistor("R1", "N1", "N2", 1000.0)));
        assert_eq!(
            nl.component("D1"),
            Some(&Component::diode("D1", "N2", "GND", DiodePolarity::AnodeToCathode))
        );
    }

    #[test]
    fn test_round_trip_preserves_netlist() {
        let nl = parse_netlist(DIVIDER).unwrap();
        let json = NetlistDocument::from(&nl).to_json().unwrap();
        let again = parse_netlist(&json).unwrap();
        assert_eq!(nl, again);
    }

    #[test]
    fn test_written_fields_use_kind_letters() {
        let nl = parse_netlist(DIVIDER).unwrap();
        let value = serde_json::to_value(NetlistDocument::from(&nl)).unwrap();
        assert_eq!(value["components"][0]["kind"], "V");
        assert_eq!(value["components"][0]["V"], 12.0);
        assert_eq!(value["components"][1]["R"], 1000.0);
        assert_eq!(value["components"][3]["polarity"], "A_to_K");
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let input = r#"{ "nodes": [], "components": [
            { "id": "C1", "kind": "C", "n1": "A", "n2": "B", "C": 1e-6 }
        ] }"#;
        assert!(matches!(parse_netlist(input), Err(CircuitError::Json { .. })));
    }

    #[test]
    fn test_bad_polarity_is_parameter_error() {
        let input = r#"{ "nodes": [], "components": [
            { "id": "D1", "kind": "D", "n1": "A", "n2": "B", "polarity": "sideways" }
        ] }"#;
        let err = parse_netlist(input).unwrap_err();
        assert!(matches!(err, CircuitError::Parameter { ref component, .. } if component == "D1"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_missing_file() {
        let err = load_netlist(Path::new("/nonexistent/netlist.json")).unwrap_err();
        assert!(matches!(err, CircuitError::FileRead { .. }));
    }

    #[test]
    fn test_save_and_load_file() {
        let nl = parse_netlist(DIVIDER).unwrap();
        let path = std::env::temp_dir().join(format!("kirchhoff_doc_{}.json", std::process::id()));
        save_netlist(&nl, &path).unwrap();
        let loaded = load_netlist(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(nl, loaded);
    }
}
