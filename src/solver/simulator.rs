//! Main simulator interface.

use tracing::{debug, debug_span, info};

use crate::analysis::{check_laws, reconstruct, CheckTolerances, Solution};
use crate::error::{CircuitError, Result};
use crate::netlist::{validate_netlist_with, FloatingSourcePolicy, Netlist};

use super::linear::{LinearSolver, LuSolver};
use super::mna::build_system;
use super::{SourceModel, DEFAULT_PIVOT_TOLERANCE};

/// Configuration for the simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// How voltage sources are enforced.
    pub source_model: SourceModel,
    /// Whether voltage sources with no ground terminal pass validation.
    pub floating_sources: FloatingSourcePolicy,
    /// Tolerances for the post-solve law checks.
    pub tolerances: CheckTolerances,
    /// Relative pivot threshold for [`LuSolver`].
    pub pivot_tolerance: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            source_model: SourceModel::default(),
            floating_sources: FloatingSourcePolicy::default(),
            tolerances: CheckTolerances::default(),
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the voltage source formulation.
    pub fn with_source_model(mut self, source_model: SourceModel) -> Self {
        self.source_model = source_model;
        self
    }

    /// Use the penalty formulation with conductance `k` (siemens).
    ///
    /// Larger K pins sources more tightly but worsens conditioning:
    /// - 1e12 (default): constraint error ~1e-15 relative for kΩ networks
    /// - 1e8: better conditioned, error ~1e-11 relative for kΩ networks
    pub fn with_penalty(self, k: f64) -> Self {
        self.with_source_model(SourceModel::Penalty { conductance: k })
    }

    /// Use exact branch-current unknowns for every voltage source.
    pub fn augmented(self) -> Self {
        self.with_source_model(SourceModel::Augmented)
    }

    /// Set the floating voltage source policy.
    pub fn with_floating_sources(mut self, policy: FloatingSourcePolicy) -> Self {
        self.floating_sources = policy;
        self
    }

    /// Set the law check tolerances.
    pub fn with_tolerances(mut self, tolerances: CheckTolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Set the relative singular pivot threshold.
    pub fn with_pivot_tolerance(mut self, pivot_tolerance: f64) -> Self {
        self.pivot_tolerance = pivot_tolerance;
        self
    }

    /// Reject non-finite or non-positive numeric settings.
    pub fn validate(&self) -> Result<()> {
        if let SourceModel::Penalty { conductance } = self.source_model {
            positive("penalty conductance", conductance)?;
        }
        positive("rtol", self.tolerances.rtol)?;
        positive("atol", self.tolerances.atol)?;
        positive("kvl_atol", self.tolerances.kvl_atol)?;
        positive("pivot tolerance", self.pivot_tolerance)?;
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(CircuitError::invalid_config(format!(
            "{} must be finite and > 0 (got {})",
            name, value
        )))
    }
}

/// DC operating-point simulator.
///
/// Holds only configuration; each call to [`Simulator::simulate`] allocates
/// its own system and shares nothing with other calls.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Create a simulator with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a simulator with custom configuration.
    pub fn with_config(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Validate, assemble, solve, reconstruct and audit.
    pub fn simulate(&self, netlist: &Netlist) -> Result<Solution> {
        self.simulate_with(netlist, &LuSolver::with_pivot_tolerance(self.config.pivot_tolerance))
    }

    /// Same as [`Simulator::simulate`] with a caller-supplied linear solver.
    pub fn simulate_with<S: LinearSolver + ?Sized>(
        &self,
        netlist: &Netlist,
        solver: &S,
    ) -> Result<Solution> {
        let _span = debug_span!("simulate", nodes = netlist.num_nodes()).entered();

        self.config.validate()?;
        validate_netlist_with(netlist, self.config.floating_sources)?;

        let (system, meta) = build_system(netlist, &self.config.source_model);
        let x = solver.solve(&system.a, &system.b, system.size)?;
        if x.len() != meta.size() {
            return Err(CircuitError::SolutionSize {
                expected: meta.size(),
                actual: x.len(),
            });
        }
        debug!(unknowns = x.len(), "linear system solved");

        let mut solution = reconstruct(&x, &meta);
        solution.checks = check_laws(netlist, &solution, &self.config.tolerances);

        if solution.checks.all_ok() {
            debug!("all Kirchhoff checks passed");
        } else {
            info!(failed = ?solution.checks.failures(), "Kirchhoff checks reported residuals");
        }

        Ok(solution)
    }
}

/// Simulate a netlist with the default configuration.
pub fn simulate(netlist: &Netlist) -> Result<Solution> {
    Simulator::new().simulate(netlist)
}
