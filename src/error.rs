//! Error types for the Kirchhoff circuit engine.
//!
//! This module provides a unified error type [`CircuitError`] that covers
//! every failure the engine can report: netlist validation, linear solve,
//! configuration, and netlist document I/O.

use thiserror::Error;

/// Result type alias using [`CircuitError`].
pub type Result<T> = std::result::Result<T, CircuitError>;

/// Unified error type for all Kirchhoff operations.
#[derive(Error, Debug)]
pub enum CircuitError {
    // ============ Validation Errors ============
    /// Ground reference missing or ambiguous
    #[error("Ground error: {message}")]
    Ground { message: String },

    /// Netlist has nothing to analyze
    #[error("Validation error: no components")]
    EmptyNetlist,

    /// Component terminals do not describe a usable topology
    #[error("Topology error in '{component}': {message}")]
    Topology { component: String, message: String },

    /// Component parameter out of range
    #[error("Parameter error in '{component}': {message}")]
    Parameter { component: String, message: String },

    /// Nodes with no path to ground through any component
    #[error("Connectivity error: nodes disconnected from ground: {}", .nodes.join(", "))]
    Connectivity { nodes: Vec<String> },

    // ============ Solve Errors ============
    /// Matrix is singular and cannot be solved
    #[error("Singular matrix - circuit may have a floating node, an unsolved diode path or conflicting sources")]
    SingularMatrix,

    /// Linear solver returned the wrong number of unknowns
    #[error("Linear solver returned {actual} values for {expected} unknowns")]
    SolutionSize { expected: usize, actual: usize },

    /// Invalid simulator configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    // ============ Document Errors ============
    /// Netlist document is malformed
    #[error("Invalid netlist document: {message}")]
    Document { message: String },

    /// Error reading a netlist file
    #[error("Failed to read netlist file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing a netlist file
    #[error("Failed to write netlist file '{path}': {source}")]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failure
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl CircuitError {
    /// Create a ground error
    pub fn ground(message: impl Into<String>) -> Self {
        Self::Ground {
            message: message.into(),
        }
    }

    /// Create a topology error
    pub fn topology(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Topology {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a parameter error
    pub fn parameter(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parameter {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a document error
    pub fn document(message: impl Into<String>) -> Self {
        Self::Document {
            message: message.into(),
        }
    }

    /// Whether this error was raised while validating a netlist.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Ground { .. }
                | Self::EmptyNetlist
                | Self::Topology { .. }
                | Self::Parameter { .. }
                | Self::Connectivity { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connectivity_message_lists_nodes() {
        let err = CircuitError::Connectivity {
            nodes: vec!["A".to_string(), "B".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Connectivity error: nodes disconnected from ground: A, B"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_solve_errors_are_not_validation() {
        assert!(!CircuitError::SingularMatrix.is_validation());
        assert!(!CircuitError::invalid_config("bad").is_validation());
    }
}
