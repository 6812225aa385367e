//! Projection engine for loan and cash financed installations

mod cashflows;
mod energy;
mod engine;
mod state;
mod summary;

pub use cashflows::{
    Milestone, MonthlyView, ProjectionResult, ScenarioProjection, YearlyRecord, DEFAULT_MILESTONES,
};
pub use energy::{price_at_year, EnergyBalance, YearPricing};
pub use engine::{project, FinancingMode, ProjectionConfig, ProjectionEngine, HORIZON_YEARS};
pub use state::ProjectionState;
pub use summary::{ScenarioSummary, WaitingCost, MIN_COST_PER_SECOND, REFERENCE_YIELD};
