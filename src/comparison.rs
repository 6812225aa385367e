//! Comparisons against other uses of the same money
//!
//! Reference savings products and the two VAT regimes an installation can be
//! sold under. All figures are fixed illustrative rates.

use serde::{Deserialize, Serialize};

/// A reference savings product with a fixed yearly yield
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SavingsBenchmark {
    pub name: &'static str,
    /// Yearly yield (percent)
    pub annual_yield_percent: f64,
}

/// Reference products, lowest yield first
pub const DEFAULT_BENCHMARKS: [SavingsBenchmark; 3] = [
    SavingsBenchmark {
        name: "Regulated savings account",
        annual_yield_percent: 3.0,
    },
    SavingsBenchmark {
        name: "Life insurance",
        annual_yield_percent: 3.5,
    },
    SavingsBenchmark {
        name: "Real-estate fund",
        annual_yield_percent: 4.5,
    },
];

/// Where the solar ROI stands against one benchmark
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenchmarkComparison {
    pub benchmark: SavingsBenchmark,
    /// Solar ROI minus the benchmark yield (percentage points)
    pub advantage_points: f64,
}

impl BenchmarkComparison {
    pub fn solar_wins(&self) -> bool {
        self.advantage_points > 0.0
    }
}

/// Compare a solar ROI (percent) with the default benchmarks
pub fn compare_benchmarks(solar_roi_percent: f64) -> Vec<BenchmarkComparison> {
    compare_with(solar_roi_percent, &DEFAULT_BENCHMARKS)
}

pub fn compare_with(solar_roi_percent: f64, benchmarks: &[SavingsBenchmark]) -> Vec<BenchmarkComparison> {
    benchmarks
        .iter()
        .map(|&benchmark| BenchmarkComparison {
            benchmark,
            advantage_points: solar_roi_percent - benchmark.annual_yield_percent,
        })
        .collect()
}

/// VAT regime of the installation offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VatRate {
    /// Full-warranty offer at the standard rate (20 %)
    Standard,
    /// Essential offer at the reduced rate (5.5 %)
    Reduced,
}

impl VatRate {
    /// Rate as a fraction
    pub fn rate(self) -> f64 {
        match self {
            VatRate::Standard => 0.20,
            VatRate::Reduced => 0.055,
        }
    }

    /// VAT due on `install_cost`
    pub fn vat_amount(self, install_cost: f64) -> f64 {
        install_cost * self.rate()
    }
}

/// VAT saved by choosing the reduced-rate offer
pub fn reduced_rate_saving(install_cost: f64) -> f64 {
    install_cost * (VatRate::Standard.rate() - VatRate::Reduced.rate())
}
