//! AWS Lambda handler for solar projections
//!
//! Accepts raw parameters as JSON (the extraction step's output, camelCase
//! keys, any field optional) and returns both scenario projections with the
//! derived metrics.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use solar_projection::{
    comparison::{compare_benchmarks, reduced_rate_saving, BenchmarkComparison},
    projection::{
        Milestone, ProjectionConfig, ProjectionEngine, ProjectionResult, DEFAULT_MILESTONES,
    },
    RawParameters,
};
use std::time::Instant;

/// Input of one invocation
#[derive(Debug, Deserialize)]
pub struct ProjectionRequest {
    /// Raw parameters, normalized before projecting
    #[serde(flatten)]
    pub params: RawParameters,

    /// Calendar year of the first ledger row (default: current year)
    #[serde(default, alias = "startYear")]
    pub start_year: Option<i32>,

    /// Milestone horizons in years (default: 5, 10, 20)
    #[serde(default = "default_milestones")]
    pub milestones: Vec<u32>,

    /// Keep the full 30-year ledgers in the response (default: true); when
    /// false only the view windows are returned
    #[serde(default = "default_full_horizon", alias = "fullHorizon")]
    pub full_horizon: bool,
}

fn default_milestones() -> Vec<u32> {
    DEFAULT_MILESTONES.to_vec()
}

fn default_full_horizon() -> bool {
    true
}

/// Output of one invocation
#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    pub result: ProjectionResult,
    pub milestones: Vec<Milestone>,
    pub benchmarks: Vec<BenchmarkComparison>,
    pub reduced_vat_saving: f64,
    pub execution_time_ms: u64,
}

/// Lambda handler function
async fn handler(event: LambdaEvent<ProjectionRequest>) -> Result<ProjectionResponse, Error> {
    Ok(respond(event.payload))
}

fn respond(request: ProjectionRequest) -> ProjectionResponse {
    let start = Instant::now();

    let params = request.params.normalize();
    let config = request
        .start_year
        .map(ProjectionConfig::starting_in)
        .unwrap_or_default();
    let mut result = ProjectionEngine::new(config).project(&params);

    let milestones = result.milestones(&request.milestones);
    let benchmarks = compare_benchmarks(result.headline().roi_percent);
    let reduced_vat_saving = reduced_rate_saving(params.install_cost);

    if !request.full_horizon {
        result.loan.ledger.clear();
        result.cash.ledger.clear();
    }

    let execution_time_ms = start.elapsed().as_millis() as u64;
    log::info!("projection served in {} ms", execution_time_ms);

    ProjectionResponse {
        result,
        milestones,
        benchmarks,
        reduced_vat_saving,
        execution_time_ms,
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
