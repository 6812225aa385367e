//! Scenario runner for batch and sensitivity projections
//!
//! Holds one engine configuration and reuses it across many parameter sets.
//! Projections are independent, so batches run in parallel.

use crate::params::ParameterSet;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};
use rayon::prelude::*;

/// Runner for many projections sharing one configuration
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
///
/// // What if prices rise faster than expected?
/// let results = runner.run_inflation_sweep(&params, &[3.0, 5.0, 8.0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Runner labelling rows from the current year
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
        }
    }

    /// Run a single projection
    pub fn run(&self, params: &ParameterSet) -> ProjectionResult {
        self.engine.project(params)
    }

    /// Run projections for many parameter sets in parallel, preserving order
    pub fn run_batch(&self, params: &[ParameterSet]) -> Vec<ProjectionResult> {
        log::debug!("projecting batch of {}", params.len());
        params.par_iter().map(|p| self.engine.project(p)).collect()
    }

    /// Re-project one parameter set under alternative inflation rates (percent)
    pub fn run_inflation_sweep(&self, params: &ParameterSet, inflation_rates: &[f64]) -> Vec<ProjectionResult> {
        inflation_rates
            .par_iter()
            .map(|&inflation_rate| {
                let adjusted = ParameterSet {
                    inflation_rate,
                    ..params.clone()
                };
                self.engine.project(&adjusted)
            })
            .collect()
    }

    pub fn config(&self) -> &ProjectionConfig {
        self.engine.config()
    }
}
