//! Energy quantities and per-year pricing shared by both financing scenarios

use crate::params::ParameterSet;
use serde::{Deserialize, Serialize};

/// Physical energy figures, constant over the horizon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyBalance {
    /// Household consumption used for every year (kWh/year)
    pub base_consumption_kwh: f64,

    /// Production consumed on site (kWh/year)
    pub self_consumed_kwh: f64,

    /// Production not consumed on site (kWh/year)
    pub exported_kwh: f64,

    /// Share of consumption covered by self-consumption, capped at 100
    pub autonomy_percent: f64,
}

impl EnergyBalance {
    pub fn from_params(params: &ParameterSet) -> Self {
        let base_consumption_kwh = if params.yearly_consumption > 0.0 {
            params.yearly_consumption
        } else if params.electricity_price > 0.0 {
            bounded(params.current_annual_bill / params.electricity_price)
        } else {
            0.0
        };

        // Negative production or rate would turn savings into extra spend
        let self_consumed_kwh =
            bounded(params.yearly_production * (params.self_consumption_rate / 100.0)).max(0.0);

        let autonomy_percent = if base_consumption_kwh > 0.0 {
            bounded(self_consumed_kwh / base_consumption_kwh * 100.0).min(100.0)
        } else {
            0.0
        };

        Self {
            base_consumption_kwh,
            self_consumed_kwh,
            exported_kwh: bounded(params.yearly_production - self_consumed_kwh).max(0.0),
            autonomy_percent,
        }
    }
}

/// Clamp an amount into the finite range, NaN reading as 0
pub(crate) fn bounded(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(f64::MIN, f64::MAX)
    }
}

/// Electricity price after `offset` years of compound inflation
pub fn price_at_year(params: &ParameterSet, offset: u32) -> f64 {
    let exponent = i32::try_from(offset).unwrap_or(i32::MAX);
    bounded(params.electricity_price * (1.0 + params.inflation_rate / 100.0).powi(exponent))
}

/// Energy-side money figures for one year, before any financing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearPricing {
    pub price_per_kwh: f64,
    pub bill_without_solar: f64,
    pub savings_in_currency: f64,
    /// Bill still paid to the supplier; never negative, surplus earns no credit
    pub residual_bill: f64,
}

impl YearPricing {
    pub fn at(params: &ParameterSet, energy: &EnergyBalance, offset: u32) -> Self {
        let price_per_kwh = price_at_year(params, offset);
        let bill_without_solar = bounded(energy.base_consumption_kwh * price_per_kwh);
        let savings_in_currency = bounded(energy.self_consumed_kwh * price_per_kwh);

        Self {
            price_per_kwh,
            bill_without_solar,
            savings_in_currency,
            residual_bill: bounded(bill_without_solar - savings_in_currency).max(0.0),
        }
    }
}
