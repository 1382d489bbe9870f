//! Ideal diode model.
//!
//! The diode is part of the netlist model and takes part in validation and
//! connectivity, but the linear equation builder does not stamp it. Solving it
//! needs a piecewise-linear iteration over conduction states, which this
//! engine does not perform; `Solution::diode_states` stays empty.

use std::fmt;
use std::str::FromStr;

use crate::error::CircuitError;

/// Which terminal of the diode is the anode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiodePolarity {
    /// `n1` is the anode, `n2` the cathode.
    #[default]
    AnodeToCathode,
    /// `n1` is the cathode, `n2` the anode.
    CathodeToAnode,
}

impl DiodePolarity {
    /// Persisted spelling (`"A_to_K"` or `"K_to_A"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            DiodePolarity::AnodeToCathode => "A_to_K",
            DiodePolarity::CathodeToAnode => "K_to_A",
        }
    }
}

impl fmt::Display for DiodePolarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiodePolarity {
    type Err = CircuitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A_to_K" => Ok(DiodePolarity::AnodeToCathode),
            "K_to_A" => Ok(DiodePolarity::CathodeToAnode),
            other => Err(CircuitError::document(format!(
                "invalid diode polarity '{}'",
                other
            ))),
        }
    }
}

/// An ideal diode component.
#[derive(Debug, Clone, PartialEq)]
pub struct IdealDiode {
    pub id: String,
    pub nodes: [String; 2],
    pub polarity: DiodePolarity,
}

impl IdealDiode {
    /// Create a new ideal diode.
    pub fn new(id: String, nodes: [String; 2], polarity: DiodePolarity) -> Self {
        Self {
            id,
            nodes,
            polarity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity_parse() {
        assert_eq!("A_to_K".parse::<DiodePolarity>().unwrap(), DiodePolarity::AnodeToCathode);
        assert_eq!("K_to_A".parse::<DiodePolarity>().unwrap(), DiodePolarity::CathodeToAnode);
        assert!("forward".parse::<DiodePolarity>().is_err());
        assert_eq!(DiodePolarity::default().to_string(), "A_to_K");
    }
}
