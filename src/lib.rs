//! # Kirchhoff Core
//!
//! DC operating-point analysis of linear resistive netlists.
//!
//! This library provides:
//! - A netlist model of nodes, resistors, ideal voltage sources and ideal diodes
//! - Structural and electrical validation of netlists
//! - Nodal analysis with a dense LU solve
//! - An independent audit of every solution against Kirchhoff's laws
//! - A JSON netlist document format
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`netlist`] - Netlist container and validation
//! - [`components`] - Component models (resistor, voltage source, diode)
//! - [`solver`] - Equation assembly, linear solve and the [`Simulator`]
//! - [`analysis`] - Solution reconstruction and law checks
//! - [`document`] - JSON netlist persistence
//!
//! ## Usage
//!
//! ```
//! use kirchhoff_core::{simulate, Component, Netlist};
//!
//! let mut netlist = Netlist::new();
//! netlist.add_node("GND", true);
//! netlist.add_node("N1", false);
//! netlist.add_component(Component::voltage_source("V1", "N1", "GND", 5.0));
//! netlist.add_component(Component::resistor("R1", "N1", "GND", 1000.0));
//!
//! let solution = simulate(&netlist)?;
//! assert!((solution.voltage("N1") - 5.0).abs() < 1e-9);
//! assert!((solution.current("R1").unwrap() - 0.005).abs() < 1e-12);
//! # Ok::<(), kirchhoff_core::CircuitError>(())
//! ```
//!
//! ### Native CLI
//!
//! ```bash
//! kirchhoff divider.json --format json
//! ```
//!
//! ## Analysis Method
//!
//! 1. Validate the netlist (ground, terminals, parameters, connectivity)
//! 2. Assemble the nodal system Ax = b, one row per non-ground node
//! 3. Solve Ax = b by LU decomposition with partial pivoting
//! 4. Map x back to node voltages and branch currents
//! 5. Recompute KCL/KVL residuals and attach them to the solution
//!
//! Ideal voltage sources are pinned with a large penalty conductance by
//! default; see [`solver::SourceModel`] for the exact augmented alternative.

pub mod analysis;
pub mod components;
pub mod document;
pub mod error;
pub mod netlist;
pub mod solver;

// Re-export main types for convenience
pub use analysis::{CheckReport, CheckTolerances, Solution};
pub use components::{Component, DiodePolarity};
pub use error::{CircuitError, Result};
pub use netlist::{validate_netlist, FloatingSourcePolicy, Netlist};
pub use solver::{simulate, Simulator, SimulatorConfig, SourceModel};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmCircuitSim;
