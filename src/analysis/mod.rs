//! Post-solve analysis: named results and Kirchhoff law audits.
//!
//! [`reconstruct`] turns the raw solution vector into a [`Solution`] keyed by
//! node and component IDs. [`check_laws`] then recomputes KCL and KVL
//! residuals from those named values. A failed check is reported as data and
//! never aborts a simulation.

mod checks;
mod solution;

pub use checks::{check_laws, CheckReport, CheckTolerances, KclRecord, KvlRecord};
pub use solution::{reconstruct, Solution};
