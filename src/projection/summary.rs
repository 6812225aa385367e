//! Summary metrics derived from a scenario ledger

use super::cashflows::YearlyRecord;
use super::energy::{bounded, price_at_year, EnergyBalance};
use super::engine::FinancingMode;
use crate::params::ParameterSet;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Yield of the reference savings account used for the bank-equivalent figure
pub const REFERENCE_YIELD: f64 = 0.03;

/// Floor of the per-second cost of inaction
pub const MIN_COST_PER_SECOND: f64 = 0.0001;

const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 3600.0;

/// Investment metrics of one financing scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    /// First year (1-based) with positive cumulative savings; 30 when never reached
    pub break_even_year: u32,

    /// Cumulative savings at the end of the view window
    pub total_savings: f64,

    pub average_yearly_gain: f64,

    /// Average yearly gain over the install cost (percent)
    pub roi_percent: f64,

    /// Capital earning the same yearly amount at the reference yield
    pub bank_equivalent_capital: f64,

    /// Year-1 monthly spend increase over staying on the grid; negative is a gain
    pub monthly_effort_year1: f64,

    pub cost_of_inaction_per_second: f64,

    // Spend totals over the view window
    pub total_spend_without_solar: f64,
    pub total_spend_with_solar: f64,
    pub total_spend_with_solar_including_capital: f64,
}

impl ScenarioSummary {
    /// Derive metrics from the full ledger and its view window
    pub fn from_ledger(
        mode: FinancingMode,
        params: &ParameterSet,
        ledger: &[YearlyRecord],
        view: &[YearlyRecord],
    ) -> Self {
        let break_even_year = ledger
            .iter()
            .position(|r| r.cumulative_savings > 0.0)
            .map_or(super::engine::HORIZON_YEARS, |index| index as u32 + 1);

        let last = view.last();
        let total_savings = last.map_or(0.0, |r| r.cumulative_savings);
        let total_spend_without_solar = last.map_or(0.0, |r| r.cumulative_spend_without_solar);
        let total_spend_with_solar = last.map_or(0.0, |r| r.cumulative_spend_with_solar);

        let average_yearly_gain = if params.projection_years > 0 {
            bounded(total_savings / f64::from(params.projection_years))
        } else {
            0.0
        };

        let monthly_effort_year1 = ledger
            .first()
            .map_or(0.0, |r| bounded(r.total_outlay / 12.0 - r.bill_without_solar / 12.0));

        Self {
            break_even_year,
            total_savings,
            average_yearly_gain,
            roi_percent: bounded(average_yearly_gain / params.effective_install_cost() * 100.0),
            bank_equivalent_capital: bounded(average_yearly_gain / REFERENCE_YIELD),
            monthly_effort_year1,
            cost_of_inaction_per_second: (average_yearly_gain / SECONDS_PER_YEAR)
                .max(MIN_COST_PER_SECOND),
            total_spend_without_solar,
            total_spend_with_solar,
            total_spend_with_solar_including_capital: bounded(
                total_spend_with_solar + mode.upfront_capital(params),
            ),
        }
    }

    /// Money forgone while hesitating for `elapsed`
    pub fn wasted_after(&self, elapsed: Duration) -> f64 {
        self.cost_of_inaction_per_second * elapsed.as_secs_f64()
    }

    /// Whether year 1 costs more per month than staying on the grid
    pub fn has_investment_effort(&self) -> bool {
        self.monthly_effort_year1 > 0.0
    }
}

/// What postponing the decision by one year costs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaitingCost {
    /// Electricity price one year from now
    pub price_next_year: f64,

    /// Full grid bill paid during the year of waiting
    pub loss_if_wait_one_year: f64,

    /// Self-consumption savings forgone during that year
    pub savings_lost_if_wait_one_year: f64,
}

impl WaitingCost {
    pub fn from_params(params: &ParameterSet, energy: &EnergyBalance) -> Self {
        let price_next_year = price_at_year(params, 1);
        Self {
            price_next_year,
            loss_if_wait_one_year: bounded(energy.base_consumption_kwh * price_next_year),
            savings_lost_if_wait_one_year: bounded(energy.self_consumed_kwh * price_next_year),
        }
    }
}
