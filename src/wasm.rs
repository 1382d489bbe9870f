//! WASM bindings for Kirchhoff Core.
//!
//! This module provides JavaScript-friendly bindings so a browser-based
//! schematic editor can run the analysis locally.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCircuitSim, simulate_json } from 'kirchhoff_core';
//!
//! await init();
//!
//! const netlist = JSON.stringify({
//!   nodes: [{ id: "GND", is_ground: true }, { id: "N1" }],
//!   components: [
//!     { id: "V1", kind: "V", n1: "N1", n2: "GND", V: 5 },
//!     { id: "R1", kind: "R", n1: "N1", n2: "GND", R: 1000 },
//!   ],
//! });
//!
//! const solution = JSON.parse(simulate_json(netlist));
//!
//! const sim = new WasmCircuitSim(netlist);
//! sim.simulate();
//! sim.node_voltage("N1"); // 5
//! ```

use wasm_bindgen::prelude::*;

use crate::analysis::Solution;
use crate::document::parse_netlist;
use crate::netlist::Netlist;
use crate::solver::{Simulator, SimulatorConfig};

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Simulate a JSON netlist document and return the solution as JSON.
#[wasm_bindgen]
pub fn simulate_json(netlist_json: &str) -> Result<String, JsValue> {
    let netlist = parse_netlist(netlist_json).map_err(to_js)?;
    let solution = Simulator::new().simulate(&netlist).map_err(to_js)?;
    serde_json::to_string(&solution).map_err(to_js)
}

/// WASM-compatible DC circuit simulator.
///
/// Holds a parsed netlist and the result of the most recent run.
#[wasm_bindgen]
pub struct WasmCircuitSim {
    netlist: Netlist,
    simulator: Simulator,
    solution: Option<Solution>,
}

#[wasm_bindgen]
impl WasmCircuitSim {
    /// Create a new simulator from a JSON netlist document.
    ///
    /// # Example
    /// ```javascript
    /// const sim = new WasmCircuitSim(netlistJson);
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(netlist_json: &str) -> Result<WasmCircuitSim, JsValue> {
        Self::with_config(netlist_json, false, crate::solver::DEFAULT_PENALTY_CONDUCTANCE)
    }

    /// Create a new simulator choosing the voltage source formulation.
    ///
    /// # Arguments
    /// * `netlist_json` - The netlist document
    /// * `augmented` - Solve sources exactly with branch-current unknowns
    /// * `penalty` - Penalty conductance when `augmented` is false (default: 1e12)
    #[wasm_bindgen]
    pub fn with_config(
        netlist_json: &str,
        augmented: bool,
        penalty: f64,
    ) -> Result<WasmCircuitSim, JsValue> {
        let netlist = parse_netlist(netlist_json).map_err(to_js)?;

        let config = if augmented {
            SimulatorConfig::new().augmented()
        } else {
            SimulatorConfig::new().with_penalty(penalty)
        };
        config.validate().map_err(to_js)?;

        Ok(WasmCircuitSim {
            netlist,
            simulator: Simulator::with_config(config),
            solution: None,
        })
    }

    /// Run the analysis and return the solution as JSON.
    #[wasm_bindgen]
    pub fn simulate(&mut self) -> Result<String, JsValue> {
        let solution = self.simulator.simulate(&self.netlist).map_err(to_js)?;
        let json = serde_json::to_string(&solution).map_err(to_js)?;
        self.solution = Some(solution);
        Ok(json)
    }

    /// Voltage at a node from the last run, or `undefined` before any run.
    #[wasm_bindgen]
    pub fn node_voltage(&self, node_id: &str) -> Option<f64> {
        self.solution.as_ref().map(|s| s.voltage(node_id))
    }

    /// Whether every Kirchhoff check of the last run passed.
    #[wasm_bindgen(getter)]
    pub fn checks_ok(&self) -> bool {
        self.solution.as_ref().is_some_and(|s| s.checks.all_ok())
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
