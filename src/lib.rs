//! Solar Projection - Financial outcome of a solar installation versus staying on the grid
//!
//! This library provides:
//! - Normalization of loosely-typed parameters into a complete parameter set
//! - 30-year yearly ledgers for loan and cash financed installations
//! - Investment metrics (break-even year, ROI, bank-equivalent capital, cost of waiting)
//! - Batch and sensitivity runs, CSV reports

pub mod comparison;
pub mod error;
pub mod params;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::{Error, Result};
pub use params::{ParameterSet, RawParameters};
pub use projection::{
    project, FinancingMode, ProjectionConfig, ProjectionEngine, ProjectionResult, YearlyRecord,
};
pub use scenario::ScenarioRunner;
