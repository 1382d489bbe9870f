//! Netlist representation and validation.
//!
//! This module provides the caller-owned description of a circuit. A
//! [`Netlist`] holds registered nodes and the components between them;
//! [`validate_netlist`] decides whether it can be analyzed at all.

mod graph;
mod types;
mod validate;

pub use graph::Netlist;
pub use types::*;
pub use validate::{validate_netlist, validate_netlist_with, FloatingSourcePolicy};
