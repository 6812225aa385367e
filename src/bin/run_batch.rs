//! Run projections for every parameter set of a CSV batch
//!
//! Outputs one summary line per parameter set

use anyhow::Context;
use clap::Parser;
use solar_projection::{
    params::load_parameter_sets,
    projection::{ProjectionConfig, HORIZON_YEARS},
    report::{write_batch_summary, BatchSummaryRow},
    ParameterSet, ScenarioRunner,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

/// Project a batch of parameter sets in parallel
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// CSV file, one parameter set per row (optional `label` column)
    input: PathBuf,

    /// Summary CSV to write
    #[arg(long, default_value = "batch_projection_output.csv")]
    output: PathBuf,

    /// Calendar year of the first ledger row (defaults to the current year)
    #[arg(long)]
    start_year: Option<i32>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    println!("Loading parameter sets from {}...", args.input.display());
    let sets = load_parameter_sets(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    println!("Loaded {} parameter sets in {:?}", sets.len(), start.elapsed());

    let config = args
        .start_year
        .map(ProjectionConfig::starting_in)
        .unwrap_or_default();
    let runner = ScenarioRunner::with_config(config);

    println!("Running projections...");
    let proj_start = Instant::now();
    let params: Vec<ParameterSet> = sets.iter().map(|s| s.params.clone()).collect();
    let results = runner.run_batch(&params);
    println!("Projections complete in {:?}", proj_start.elapsed());

    let rows: Vec<BatchSummaryRow> = sets
        .iter()
        .zip(&results)
        .map(|(set, result)| BatchSummaryRow::from_result(set.label.as_str(), result))
        .collect();

    let file = File::create(&args.output).with_context(|| format!("creating {}", args.output.display()))?;
    write_batch_summary(BufWriter::new(file), &rows)?;
    println!("Output written to {}", args.output.display());

    // Print summary stats
    if !rows.is_empty() {
        let count = rows.len() as f64;
        let breaking_even = rows.iter().filter(|r| r.loan_break_even_year < HORIZON_YEARS).count();
        let mean_roi = rows.iter().map(|r| r.loan_roi_percent).sum::<f64>() / count;
        let mean_gain = rows.iter().map(|r| r.average_yearly_gain).sum::<f64>() / count;

        println!("\nBatch Summary:");
        println!("  Loan break-even before year {}: {}/{}", HORIZON_YEARS, breaking_even, rows.len());
        println!("  Mean loan ROI:                  {:.2} %", mean_roi);
        println!("  Mean average yearly gain:       {:.2}", mean_gain);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
