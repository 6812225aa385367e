//! CSV reports of ledgers and batch summaries

use crate::error::Result;
use crate::projection::{FinancingMode, ProjectionResult, YearlyRecord};
use serde::Serialize;
use std::io::Write;

/// Ledger row tagged with its scenario, as written to CSV
#[derive(Debug, Serialize)]
struct LedgerCsvRow {
    scenario: &'static str,
    year: i32,
    offset: u32,
    price_per_kwh: f64,
    bill_without_solar: f64,
    savings_in_currency: f64,
    residual_bill: f64,
    credit_cost_this_year: f64,
    total_outlay: f64,
    yearly_cashflow: f64,
    cumulative_savings: f64,
    cumulative_spend_without_solar: f64,
    cumulative_spend_with_solar: f64,
}

impl LedgerCsvRow {
    fn new(mode: FinancingMode, record: &YearlyRecord) -> Self {
        Self {
            scenario: mode.as_str(),
            year: record.year,
            offset: record.offset,
            price_per_kwh: record.price_per_kwh,
            bill_without_solar: record.bill_without_solar,
            savings_in_currency: record.savings_in_currency,
            residual_bill: record.residual_bill,
            credit_cost_this_year: record.credit_cost_this_year,
            total_outlay: record.total_outlay,
            yearly_cashflow: record.yearly_cashflow,
            cumulative_savings: record.cumulative_savings,
            cumulative_spend_without_solar: record.cumulative_spend_without_solar,
            cumulative_spend_with_solar: record.cumulative_spend_with_solar,
        }
    }
}

/// Write both scenarios' rows (loan first) as one CSV table
pub fn write_ledger_csv<W: Write>(writer: W, result: &ProjectionResult, full_horizon: bool) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for mode in FinancingMode::ALL {
        let scenario = result.scenario(mode);
        let rows = if full_horizon { &scenario.ledger } else { &scenario.view };
        for record in rows {
            csv_writer.serialize(LedgerCsvRow::new(mode, record))?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

/// One line of a batch summary report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummaryRow {
    pub label: String,
    pub base_consumption_kwh: f64,
    pub autonomy_percent: f64,
    pub loan_break_even_year: u32,
    pub loan_total_savings: f64,
    pub loan_roi_percent: f64,
    pub cash_break_even_year: u32,
    pub cash_total_savings: f64,
    pub cash_roi_percent: f64,
    pub average_yearly_gain: f64,
    pub bank_equivalent_capital: f64,
    pub monthly_effort_year1: f64,
    pub loss_if_wait_one_year: f64,
}

impl BatchSummaryRow {
    pub fn from_result(label: impl Into<String>, result: &ProjectionResult) -> Self {
        let headline = result.headline();
        Self {
            label: label.into(),
            base_consumption_kwh: result.energy.base_consumption_kwh,
            autonomy_percent: result.energy.autonomy_percent,
            loan_break_even_year: result.loan.summary.break_even_year,
            loan_total_savings: result.loan.summary.total_savings,
            loan_roi_percent: result.loan.summary.roi_percent,
            cash_break_even_year: result.cash.summary.break_even_year,
            cash_total_savings: result.cash.summary.total_savings,
            cash_roi_percent: result.cash.summary.roi_percent,
            average_yearly_gain: headline.average_yearly_gain,
            bank_equivalent_capital: headline.bank_equivalent_capital,
            monthly_effort_year1: headline.monthly_effort_year1,
            loss_if_wait_one_year: result.waiting_cost.loss_if_wait_one_year,
        }
    }
}

/// Write a batch summary as CSV
pub fn write_batch_summary<W: Write>(writer: W, rows: &[BatchSummaryRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
