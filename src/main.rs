//! Solar Projection CLI
//!
//! Projects a single parameter set and prints the headline metrics and the
//! view-window ledger of both financing scenarios.

use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use solar_projection::{
    comparison::{compare_benchmarks, reduced_rate_saving},
    params::loader::load_raw_json,
    projection::{
        ProjectionConfig, ProjectionEngine, ProjectionResult, ScenarioProjection,
        DEFAULT_MILESTONES,
    },
    report::write_ledger_csv,
    RawParameters,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Project the finances of a solar installation against staying on the grid
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON document with raw parameters (camelCase keys); flags override it
    #[arg(long)]
    params: Option<PathBuf>,

    /// Current energy bill (currency/year)
    #[arg(long)]
    annual_bill: Option<String>,

    /// Yearly consumption (kWh); 0 derives it from bill and price
    #[arg(long)]
    consumption: Option<String>,

    /// Electricity price (currency/kWh)
    #[arg(long)]
    price: Option<String>,

    /// Electricity price inflation (percent/year)
    #[arg(long)]
    inflation: Option<String>,

    /// Yearly production (kWh)
    #[arg(long)]
    production: Option<String>,

    /// Self-consumption rate (percent)
    #[arg(long)]
    self_consumption: Option<String>,

    /// Installation cost (currency)
    #[arg(long)]
    install_cost: Option<String>,

    /// Loan instalment (currency/month)
    #[arg(long)]
    credit_payment: Option<String>,

    /// Borrower insurance (currency/month)
    #[arg(long)]
    insurance_payment: Option<String>,

    /// Financing window (months)
    #[arg(long)]
    credit_months: Option<String>,

    /// Nominal loan rate (percent, informational)
    #[arg(long)]
    credit_rate: Option<String>,

    /// Number of years reported
    #[arg(long)]
    years: Option<String>,

    /// Calendar year of the first ledger row (defaults to the current year)
    #[arg(long)]
    start_year: Option<i32>,

    /// Show the ledger per month instead of per year
    #[arg(long)]
    monthly: bool,

    /// Write the ledger of both scenarios to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Include all 30 years in the CSV, not just the view window
    #[arg(long)]
    full_horizon: bool,

    /// Print the full result as JSON instead of tables
    #[arg(long)]
    json: bool,
}

impl Args {
    /// Raw parameters from the JSON document, overridden by flags
    fn raw_parameters(&self) -> anyhow::Result<RawParameters> {
        let mut raw = match &self.params {
            Some(path) => load_raw_json(path).with_context(|| format!("reading {}", path.display()))?,
            None => RawParameters::default(),
        };

        let overrides = [
            (&self.annual_bill, &mut raw.current_annual_bill),
            (&self.consumption, &mut raw.yearly_consumption),
            (&self.price, &mut raw.electricity_price),
            (&self.inflation, &mut raw.inflation_rate),
            (&self.production, &mut raw.yearly_production),
            (&self.self_consumption, &mut raw.self_consumption_rate),
            (&self.install_cost, &mut raw.install_cost),
            (&self.credit_payment, &mut raw.credit_monthly_payment),
            (&self.insurance_payment, &mut raw.insurance_monthly_payment),
            (&self.credit_months, &mut raw.credit_duration_months),
            (&self.credit_rate, &mut raw.credit_interest_rate),
            (&self.years, &mut raw.projection_years),
        ];
        for (flag, field) in overrides {
            if let Some(text) = flag {
                *field = Some(Value::String(text.clone()));
            }
        }

        Ok(raw)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let params = args.raw_parameters()?.normalize();
    log::info!("projecting {:?}", params);

    let config = args
        .start_year
        .map(ProjectionConfig::starting_in)
        .unwrap_or_default();
    let result = ProjectionEngine::new(config).project(&params);

    if let Some(path) = &args.csv {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        write_ledger_csv(BufWriter::new(file), &result, args.full_horizon)?;
        log::info!("ledger written to {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_overview(&result);
    print_scenario("Loan", &result.loan, args.monthly);
    print_scenario("Cash", &result.cash, args.monthly);
    print_comparisons(&result);

    if let Some(path) = &args.csv {
        println!("\nFull ledger written to: {}", path.display());
    }

    Ok(())
}

fn print_overview(result: &ProjectionResult) {
    let energy = &result.energy;
    let headline = result.headline();

    println!("Solar Projection v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");

    println!("Energy:");
    println!("  Consumption:      {:>10.0} kWh/year", energy.base_consumption_kwh);
    println!("  Self-consumed:    {:>10.0} kWh/year", energy.self_consumed_kwh);
    println!("  Exported:         {:>10.0} kWh/year", energy.exported_kwh);
    println!("  Autonomy:         {:>10.1} %", energy.autonomy_percent);
    println!();

    println!("Over {} years:", result.params.projection_years);
    println!("  Average yearly gain:     {:>12.2}", headline.average_yearly_gain);
    println!("  Bank-equivalent capital: {:>12.2}", headline.bank_equivalent_capital);
    println!("  Year-1 monthly effort:   {:>12.2}", headline.monthly_effort_year1);
    println!("  Cost of inaction:        {:>12.4} per second", headline.cost_of_inaction_per_second);
    println!(
        "  Waiting one more year:   {:>12.2} paid to the supplier, {:.2} of savings lost",
        result.waiting_cost.loss_if_wait_one_year, result.waiting_cost.savings_lost_if_wait_one_year,
    );
}

fn print_scenario(name: &str, scenario: &ScenarioProjection, monthly: bool) {
    let summary = &scenario.summary;

    println!("\n{} scenario:", name);
    println!("  Break-even year:  {}", summary.break_even_year);
    println!("  Total savings:    {:.2}", summary.total_savings);
    println!("  ROI:              {:.2} %", summary.roi_percent);
    println!(
        "  Total spend:      {:.2} without solar, {:.2} with solar (incl. capital)",
        summary.total_spend_without_solar, summary.total_spend_with_solar_including_capital,
    );

    println!(
        "{:>6} {:>12} {:>10} {:>10} {:>12} {:>10} {:>14}",
        "Year", "Grid bill", "Credit", "Residual", "Total", "Effort", "Cumulative",
    );
    println!("{}", "-".repeat(80));

    for row in &scenario.view {
        if monthly {
            let m = row.monthly();
            println!(
                "{:>6} {:>12.2} {:>10.2} {:>10.2} {:>12.2} {:>10.2} {:>14.2}",
                m.year, m.bill_without_solar, m.credit_cost, m.residual_bill, m.total_outlay, m.effort,
                row.cumulative_savings,
            );
        } else {
            println!(
                "{:>6} {:>12.2} {:>10.2} {:>10.2} {:>12.2} {:>10.2} {:>14.2}",
                row.year,
                row.bill_without_solar,
                row.credit_cost_this_year,
                row.residual_bill,
                row.total_outlay,
                row.effort(),
                row.cumulative_savings,
            );
        }
    }
}

fn print_comparisons(result: &ProjectionResult) {
    println!("\nMilestones (cumulative savings):");
    for milestone in result.milestones(&DEFAULT_MILESTONES) {
        println!(
            "  {:>2} years: loan {:>12.2}, cash {:>12.2}",
            milestone.years, milestone.loan_cumulative_savings, milestone.cash_cumulative_savings,
        );
    }

    println!("\nAgainst other placements (solar ROI {:.2} %):", result.headline().roi_percent);
    for comparison in compare_benchmarks(result.headline().roi_percent) {
        println!(
            "  {:<28} {:>5.2} %  {:+.2} pts",
            comparison.benchmark.name, comparison.benchmark.annual_yield_percent, comparison.advantage_points,
        );
    }

    println!(
        "\nReduced VAT offer saves {:.0} on the installation",
        reduced_rate_saving(result.params.install_cost),
    );
}
