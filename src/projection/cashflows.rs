//! Ledger rows and projection output structures

use super::energy::{bounded, EnergyBalance};
use super::engine::{FinancingMode, HORIZON_YEARS};
use super::summary::{ScenarioSummary, WaitingCost};
use crate::params::ParameterSet;
use serde::{Deserialize, Serialize};

/// Milestone horizons shown by default (years)
pub const DEFAULT_MILESTONES: [u32; 3] = [5, 10, 20];

/// One simulated year of one financing scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyRecord {
    // Timing
    pub year: i32,
    pub offset: u32,

    // Energy side
    pub price_per_kwh: f64,
    pub bill_without_solar: f64,
    pub savings_in_currency: f64,
    pub residual_bill: f64,

    // Financing side
    pub credit_cost_this_year: f64,
    pub total_outlay: f64,
    pub yearly_cashflow: f64,

    // Running totals
    pub cumulative_savings: f64,
    pub cumulative_spend_without_solar: f64,
    pub cumulative_spend_with_solar: f64,
}

impl YearlyRecord {
    /// Extra spend compared with staying on the grid; negative is a gain
    pub fn effort(&self) -> f64 {
        self.total_outlay - self.bill_without_solar
    }

    /// Same year expressed per month
    pub fn monthly(&self) -> MonthlyView {
        MonthlyView {
            year: self.year,
            bill_without_solar: self.bill_without_solar / 12.0,
            credit_cost: self.credit_cost_this_year / 12.0,
            residual_bill: self.residual_bill / 12.0,
            total_outlay: self.total_outlay / 12.0,
            effort: self.effort() / 12.0,
        }
    }
}

/// Per-month figures of a ledger year
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyView {
    pub year: i32,
    pub bill_without_solar: f64,
    pub credit_cost: f64,
    pub residual_bill: f64,
    pub total_outlay: f64,
    pub effort: f64,
}

/// Ledger and metrics of one financing scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioProjection {
    pub mode: FinancingMode,

    /// Full 30-year ledger
    pub ledger: Vec<YearlyRecord>,

    /// First `projection_years` rows of `ledger`
    pub view: Vec<YearlyRecord>,

    pub summary: ScenarioSummary,
}

impl ScenarioProjection {
    /// Wrap a full ledger, slicing the view window out of it
    pub fn new(mode: FinancingMode, params: &ParameterSet, ledger: Vec<YearlyRecord>) -> Self {
        let view_len = (params.projection_years as usize).min(ledger.len());
        let view = ledger[..view_len].to_vec();
        let summary = ScenarioSummary::from_ledger(mode, params, &ledger, &view);

        Self {
            mode,
            ledger,
            view,
            summary,
        }
    }

    /// Full-ledger row closing year `years` (1-based)
    pub fn after_years(&self, years: u32) -> Option<&YearlyRecord> {
        let index = usize::try_from(years).ok()?.checked_sub(1)?;
        self.ledger.get(index)
    }
}

/// Complete projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Inputs the projection was computed from
    pub params: ParameterSet,

    pub energy: EnergyBalance,

    /// Financed installation
    pub loan: ScenarioProjection,

    /// Installation paid upfront
    pub cash: ScenarioProjection,

    pub waiting_cost: WaitingCost,
}

impl ProjectionResult {
    /// Headline metrics (those of the financed scenario)
    pub fn headline(&self) -> &ScenarioSummary {
        &self.loan.summary
    }

    pub fn scenario(&self, mode: FinancingMode) -> &ScenarioProjection {
        match mode {
            FinancingMode::Loan => &self.loan,
            FinancingMode::Cash => &self.cash,
        }
    }

    /// Both scenarios' positions after each requested number of years.
    ///
    /// Horizons outside 1..=30 are skipped.
    pub fn milestones(&self, years: &[u32]) -> Vec<Milestone> {
        years
            .iter()
            .filter(|&&y| (1..=HORIZON_YEARS).contains(&y))
            .filter_map(|&y| {
                let loan = self.loan.after_years(y)?;
                let cash = self.cash.after_years(y)?;
                Some(Milestone {
                    years: y,
                    spend_without_solar: loan.cumulative_spend_without_solar,
                    loan_spend_with_solar: loan.cumulative_spend_with_solar,
                    loan_cumulative_savings: loan.cumulative_savings,
                    cash_spend_with_solar: bounded(
                        cash.cumulative_spend_with_solar
                            + FinancingMode::Cash.upfront_capital(&self.params),
                    ),
                    cash_cumulative_savings: cash.cumulative_savings,
                })
            })
            .collect()
    }
}

/// Position of both scenarios after a fixed number of years
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub years: u32,
    pub spend_without_solar: f64,
    pub loan_spend_with_solar: f64,
    pub loan_cumulative_savings: f64,
    /// Includes the upfront install cost
    pub cash_spend_with_solar: f64,
    pub cash_cumulative_savings: f64,
}
