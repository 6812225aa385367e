//! Running position of one financing scenario during projection

use super::energy::bounded;
use super::engine::FinancingMode;
use crate::params::ParameterSet;

/// Running totals carried from one ledger year to the next
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Offset of the year about to be computed (0-based)
    pub offset: u32,

    /// Calendar year of `offset`
    pub year: i32,

    /// Net position so far; starts at minus the upfront capital
    pub cumulative_savings: f64,

    /// Total paid to the supplier had nothing been installed
    pub cumulative_spend_without_solar: f64,

    /// Total paid to supplier and lender with the installation
    pub cumulative_spend_with_solar: f64,
}

impl ProjectionState {
    /// State before year 0 is added
    pub fn initial(params: &ParameterSet, mode: FinancingMode, start_year: i32) -> Self {
        Self {
            offset: 0,
            year: start_year,
            cumulative_savings: -mode.upfront_capital(params),
            cumulative_spend_without_solar: 0.0,
            cumulative_spend_with_solar: 0.0,
        }
    }

    /// Fold one year's figures into the running totals
    pub fn accumulate(&mut self, bill_without_solar: f64, total_outlay: f64, yearly_cashflow: f64) {
        self.cumulative_savings = bounded(self.cumulative_savings + yearly_cashflow);
        self.cumulative_spend_without_solar =
            bounded(self.cumulative_spend_without_solar + bill_without_solar);
        self.cumulative_spend_with_solar = bounded(self.cumulative_spend_with_solar + total_outlay);
    }

    /// Move on to the next year
    pub fn advance_year(&mut self) {
        self.offset += 1;
        self.year += 1;
    }
}
