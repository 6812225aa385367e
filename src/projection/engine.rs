//! Core projection engine for yearly solar financing ledgers

use super::cashflows::{ProjectionResult, ScenarioProjection, YearlyRecord};
use super::energy::{bounded, EnergyBalance, YearPricing};
use super::state::ProjectionState;
use super::summary::WaitingCost;
use crate::params::ParameterSet;
use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Number of simulated years, independent of the view window
pub const HORIZON_YEARS: u32 = 30;

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Calendar year of ledger offset 0; only labels the rows
    pub start_year: i32,
}

impl ProjectionConfig {
    pub fn starting_in(start_year: i32) -> Self {
        Self { start_year }
    }
}

impl Default for ProjectionConfig {
    /// Rows labelled from the current local year
    fn default() -> Self {
        Self {
            start_year: chrono::Local::now().year(),
        }
    }
}

/// How the installation is paid for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancingMode {
    /// Monthly instalments plus insurance during the credit window
    Loan,
    /// Install cost paid upfront, no recurring financing
    Cash,
}

impl FinancingMode {
    pub const ALL: [FinancingMode; 2] = [FinancingMode::Loan, FinancingMode::Cash];

    /// Financing charged in the year starting at `offset`
    pub fn credit_cost(self, params: &ParameterSet, offset: u32) -> f64 {
        match self {
            FinancingMode::Loan if params.is_credit_active(offset) => {
                bounded(params.monthly_financing() * 12.0)
            }
            FinancingMode::Loan | FinancingMode::Cash => 0.0,
        }
    }

    /// Capital paid before year 0
    pub fn upfront_capital(self, params: &ParameterSet) -> f64 {
        match self {
            FinancingMode::Loan => 0.0,
            FinancingMode::Cash => params.install_cost,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FinancingMode::Loan => "loan",
            FinancingMode::Cash => "cash",
        }
    }
}

/// Main projection engine.
///
/// Stateless apart from its configuration: the same parameters always give a
/// bit-identical result, and one engine can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project both financing scenarios and derive every metric
    pub fn project(&self, params: &ParameterSet) -> ProjectionResult {
        let energy = EnergyBalance::from_params(params);

        let loan = ScenarioProjection::new(
            FinancingMode::Loan,
            params,
            self.project_ledger(params, &energy, FinancingMode::Loan),
        );
        let cash = ScenarioProjection::new(
            FinancingMode::Cash,
            params,
            self.project_ledger(params, &energy, FinancingMode::Cash),
        );

        log::debug!(
            "projected {} years: loan break-even year {}, cash break-even year {}",
            HORIZON_YEARS,
            loan.summary.break_even_year,
            cash.summary.break_even_year,
        );

        ProjectionResult {
            params: params.clone(),
            energy,
            loan,
            cash,
            waiting_cost: WaitingCost::from_params(params, &energy),
        }
    }

    /// Full 30-year ledger of one scenario
    pub fn project_ledger(
        &self,
        params: &ParameterSet,
        energy: &EnergyBalance,
        mode: FinancingMode,
    ) -> Vec<YearlyRecord> {
        let mut state = ProjectionState::initial(params, mode, self.config.start_year);
        let mut ledger = Vec::with_capacity(HORIZON_YEARS as usize);

        for _ in 0..HORIZON_YEARS {
            ledger.push(self.calculate_year(params, energy, mode, &mut state));
            state.advance_year();
        }

        ledger
    }

    /// Compute one ledger row and fold it into the running state
    fn calculate_year(
        &self,
        params: &ParameterSet,
        energy: &EnergyBalance,
        mode: FinancingMode,
        state: &mut ProjectionState,
    ) -> YearlyRecord {
        let pricing = YearPricing::at(params, energy, state.offset);

        let credit_cost_this_year = mode.credit_cost(params, state.offset);
        let total_outlay = bounded(pricing.residual_bill + credit_cost_this_year);
        let yearly_cashflow = bounded(pricing.bill_without_solar - total_outlay);

        state.accumulate(pricing.bill_without_solar, total_outlay, yearly_cashflow);

        log::trace!(
            "{} year {}: outlay {:.2}, cashflow {:.2}, cumulative {:.2}",
            mode.as_str(),
            state.year,
            total_outlay,
            yearly_cashflow,
            state.cumulative_savings,
        );

        YearlyRecord {
            year: state.year,
            offset: state.offset,
            price_per_kwh: pricing.price_per_kwh,
            bill_without_solar: pricing.bill_without_solar,
            savings_in_currency: pricing.savings_in_currency,
            residual_bill: pricing.residual_bill,
            credit_cost_this_year,
            total_outlay,
            yearly_cashflow,
            cumulative_savings: state.cumulative_savings,
            cumulative_spend_without_solar: state.cumulative_spend_without_solar,
            cumulative_spend_with_solar: state.cumulative_spend_with_solar,
        }
    }
}

/// Project with the default configuration.
///
/// Row years follow the local clock. For output that does not depend on when it
/// runs, use `ProjectionEngine::new(ProjectionConfig::starting_in(year))`.
pub fn project(params: &ParameterSet) -> ProjectionResult {
    ProjectionEngine::default().project(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_params() -> ParameterSet {
        ParameterSet {
            current_annual_bill: 1600.0,
            yearly_consumption: 0.0,
            electricity_price: 0.25,
            inflation_rate: 5.0,
            yearly_production: 5000.0,
            self_consumption_rate: 70.0,
            install_cost: 20_000.0,
            credit_monthly_payment: 150.0,
            insurance_monthly_payment: 10.0,
            credit_duration_months: 180,
            ..ParameterSet::default()
        }
    }

    fn engine() -> ProjectionEngine {
        ProjectionEngine::new(ProjectionConfig::starting_in(2025))
    }

    #[test]
    fn test_reference_year_zero() {
        let result = engine().project(&reference_params());
        let row = &result.loan.ledger[0];

        assert_relative_eq!(result.energy.base_consumption_kwh, 6400.0, epsilon = 1e-9);
        assert_relative_eq!(result.energy.self_consumed_kwh, 3500.0, epsilon = 1e-9);
        assert_eq!(row.year, 2025);
        assert_relative_eq!(row.bill_without_solar, 1600.0, epsilon = 1e-9);
        assert_relative_eq!(row.savings_in_currency, 875.0, epsilon = 1e-9);
        assert_relative_eq!(row.residual_bill, 725.0, epsilon = 1e-9);
        assert_relative_eq!(row.credit_cost_this_year, 1920.0, epsilon = 1e-9);
        assert_relative_eq!(row.total_outlay, 2645.0, epsilon = 1e-9);
        assert_relative_eq!(row.yearly_cashflow, -1045.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ledgers_span_horizon() {
        let result = engine().project(&reference_params());

        assert_eq!(result.loan.ledger.len(), 30);
        assert_eq!(result.cash.ledger.len(), 30);
        assert_eq!(result.loan.view.len(), 20);
        assert_eq!(result.cash.ledger[29].year, 2054);
        assert_eq!(result.cash.ledger[29].offset, 29);
    }

    #[test]
    fn test_credit_window_of_fifteen_years() {
        let result = engine().project(&reference_params());

        for row in &result.loan.ledger {
            let expected = if row.offset < 15 { 1920.0 } else { 0.0 };
            assert_eq!(row.credit_cost_this_year, expected, "offset {}", row.offset);
        }
    }

    #[test]
    fn test_credit_gating_boundary() {
        let params = ParameterSet {
            credit_duration_months: 24,
            ..reference_params()
        };
        let result = engine().project(&params);
        let credited: Vec<bool> = result
            .loan
            .ledger
            .iter()
            .map(|r| r.credit_cost_this_year > 0.0)
            .collect();

        assert!(credited[0] && credited[1]);
        assert!(credited[2..].iter().all(|&c| !c));
    }

    #[test]
    fn test_cash_never_pays_credit() {
        let result = engine().project(&reference_params());

        for row in &result.cash.ledger {
            assert_eq!(row.credit_cost_this_year, 0.0);
            assert_eq!(row.total_outlay, row.residual_bill);
            assert!(row.yearly_cashflow >= 0.0);
        }
    }

    #[test]
    fn test_seed_invariants() {
        let result = engine().project(&reference_params());
        let loan = &result.loan.ledger[0];
        let cash = &result.cash.ledger[0];

        assert_eq!(loan.cumulative_savings, loan.yearly_cashflow);
        assert_eq!(cash.cumulative_savings, -20_000.0 + cash.yearly_cashflow);
    }

    #[test]
    fn test_scenarios_share_energy_math() {
        let result = engine().project(&reference_params());

        for (loan, cash) in result.loan.ledger.iter().zip(&result.cash.ledger) {
            assert_eq!(loan.price_per_kwh, cash.price_per_kwh);
            assert_eq!(loan.bill_without_solar, cash.bill_without_solar);
            assert_eq!(loan.residual_bill, cash.residual_bill);
        }
    }

    #[test]
    fn test_cumulative_fields_are_running_sums() {
        let result = engine().project(&reference_params());

        for scenario in [&result.loan, &result.cash] {
            let mut savings = -scenario.mode.upfront_capital(&result.params);
            let mut without = 0.0;
            let mut with = 0.0;
            for row in &scenario.ledger {
                savings += row.yearly_cashflow;
                without += row.bill_without_solar;
                with += row.total_outlay;
                assert_eq!(row.cumulative_savings, savings);
                assert_eq!(row.cumulative_spend_without_solar, without);
                assert_eq!(row.cumulative_spend_with_solar, with);
                assert_eq!(row.yearly_cashflow, row.bill_without_solar - row.total_outlay);
            }
        }
    }

    #[test]
    fn test_truncation_consistency() {
        let full = engine().project(&reference_params());

        for years in 1..=30 {
            let params = ParameterSet {
                projection_years: years,
                ..reference_params()
            };
            let result = engine().project(&params);
            let row = (years - 1) as usize;

            assert_eq!(result.loan.summary.total_savings, full.loan.ledger[row].cumulative_savings);
            assert_eq!(result.cash.summary.total_savings, full.cash.ledger[row].cumulative_savings);
            assert_eq!(result.loan.ledger, full.loan.ledger);
        }
    }

    #[test]
    fn test_reference_break_even() {
        let result = engine().project(&reference_params());
        let loan_index = result.loan.summary.break_even_year as usize - 1;
        let cash_index = result.cash.summary.break_even_year as usize - 1;

        assert!(result.loan.ledger[loan_index].cumulative_savings > 0.0);
        assert!(result.loan.ledger[..loan_index].iter().all(|r| r.cumulative_savings <= 0.0));
        assert!(result.cash.ledger[cash_index].cumulative_savings > 0.0);
        assert!(result.cash.ledger[..cash_index].iter().all(|r| r.cumulative_savings <= 0.0));
    }

    #[test]
    fn test_year_one_effort() {
        let result = engine().project(&reference_params());

        assert_relative_eq!(result.headline().monthly_effort_year1, 1045.0 / 12.0, epsilon = 1e-9);
        assert!(result.headline().has_investment_effort());
        assert_relative_eq!(result.cash.summary.monthly_effort_year1, -875.0 / 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_no_production_never_breaks_even() {
        let params = ParameterSet {
            yearly_production: 0.0,
            ..reference_params()
        };
        let result = engine().project(&params);

        assert_eq!(result.loan.summary.break_even_year, 30);
        assert_eq!(result.cash.summary.break_even_year, 30);
    }

    #[test]
    fn test_zero_install_cost_roi_is_finite() {
        let params = ParameterSet {
            install_cost: 0.0,
            ..reference_params()
        };
        let result = engine().project(&params);
        let expected = result.loan.summary.average_yearly_gain / 20_000.0 * 100.0;

        assert!(result.loan.summary.roi_percent.is_finite());
        assert_eq!(result.loan.summary.roi_percent, expected);
        assert!(result.cash.summary.roi_percent.is_finite());
    }

    #[test]
    fn test_all_zero_parameters_stay_finite() {
        let params = ParameterSet {
            current_annual_bill: 0.0,
            yearly_consumption: 0.0,
            electricity_price: 0.0,
            inflation_rate: 0.0,
            yearly_production: 0.0,
            self_consumption_rate: 0.0,
            install_cost: 0.0,
            credit_monthly_payment: 0.0,
            insurance_monthly_payment: 0.0,
            credit_duration_months: 0,
            credit_interest_rate: 0.0,
            projection_years: 0,
        };
        let result = engine().project(&params);

        for scenario in [&result.loan, &result.cash] {
            assert!(scenario.view.is_empty());
            for row in &scenario.ledger {
                assert_eq!(row.total_outlay, 0.0);
                assert_eq!(row.cumulative_savings, 0.0);
            }
            let s = &scenario.summary;
            for value in [
                s.total_savings,
                s.average_yearly_gain,
                s.roi_percent,
                s.bank_equivalent_capital,
                s.monthly_effort_year1,
                s.total_spend_with_solar_including_capital,
            ] {
                assert_eq!(value, 0.0);
            }
            assert_eq!(s.cost_of_inaction_per_second, 0.0001);
        }
        assert_eq!(result.energy.autonomy_percent, 0.0);
        assert_eq!(result.waiting_cost.loss_if_wait_one_year, 0.0);
    }

    #[test]
    fn test_inconsistent_inputs_stay_finite() {
        let params = ParameterSet {
            current_annual_bill: 1800.0,
            electricity_price: 0.0,
            yearly_production: 9000.0,
            self_consumption_rate: 250.0,
            inflation_rate: -100.0,
            ..reference_params()
        };
        let result = engine().project(&params);

        for scenario in [&result.loan, &result.cash] {
            for row in &scenario.ledger {
                assert!(row.residual_bill >= 0.0);
                assert!(row.cumulative_savings.is_finite());
            }
            assert!(scenario.summary.roi_percent.is_finite());
        }
    }

    #[test]
    fn test_overflowing_inputs_stay_finite() {
        let tiny_price = ParameterSet {
            electricity_price: 1e-320,
            current_annual_bill: 1600.0,
            ..reference_params()
        };
        let runaway_inflation = ParameterSet {
            inflation_rate: 1e20,
            ..reference_params()
        };

        for params in [tiny_price, runaway_inflation] {
            let result = engine().project(&params);
            assert!(result.waiting_cost.loss_if_wait_one_year.is_finite());

            for scenario in [&result.loan, &result.cash] {
                for row in &scenario.ledger {
                    assert!(row.bill_without_solar.is_finite());
                    assert!(row.yearly_cashflow.is_finite());
                    assert!(row.cumulative_savings.is_finite());
                    assert!(row.cumulative_spend_without_solar.is_finite());
                }
                let summary = &scenario.summary;
                assert!(summary.total_savings.is_finite());
                assert!(summary.roi_percent.is_finite());
                assert!(summary.bank_equivalent_capital.is_finite());
                assert!(summary.cost_of_inaction_per_second.is_finite());
            }
        }
    }

    #[test]
    fn test_cash_cashflow_non_negative_with_negative_rate() {
        let params = ParameterSet {
            self_consumption_rate: -20.0,
            ..reference_params()
        };
        let result = engine().project(&params);

        for row in &result.cash.ledger {
            assert!(row.residual_bill <= row.bill_without_solar);
            assert!(row.yearly_cashflow >= 0.0);
        }
    }

    #[test]
    fn test_deterministic() {
        let params = reference_params();
        let first = engine().project(&params);
        let second = engine().project(&params);

        assert_eq!(first.loan.ledger, second.loan.ledger);
        assert_eq!(first.cash.ledger, second.cash.ledger);
        assert_eq!(first.loan.summary, second.loan.summary);
    }

    #[test]
    fn test_start_year_only_labels_rows() {
        let params = reference_params();
        let early = engine().project(&params);
        let late = ProjectionEngine::new(ProjectionConfig::starting_in(2040)).project(&params);

        assert_eq!(late.loan.ledger[0].year, 2040);
        assert_eq!(late.loan.ledger[29].year, 2069);
        for (a, b) in early.loan.ledger.iter().zip(&late.loan.ledger) {
            assert_eq!(YearlyRecord { year: b.year, ..a.clone() }, *b);
        }
        assert_eq!(early.loan.summary, late.loan.summary);
        assert_eq!(early.cash.summary, late.cash.summary);
    }

    #[test]
    fn test_milestones() {
        let result = engine().project(&reference_params());
        let milestones = result.milestones(&[0, 5, 10, 20, 31]);

        assert_eq!(milestones.len(), 3);
        assert_eq!(milestones[0].years, 5);
        assert_eq!(milestones[0].loan_cumulative_savings, result.loan.ledger[4].cumulative_savings);
        assert_eq!(milestones[2].cash_cumulative_savings, result.cash.ledger[19].cumulative_savings);
        assert_eq!(
            milestones[1].cash_spend_with_solar,
            result.cash.ledger[9].cumulative_spend_with_solar + 20_000.0
        );
    }
}
