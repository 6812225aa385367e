//! Parameter set and the normalization of loosely-typed upstream input

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default annual electricity price inflation (percent)
pub const DEFAULT_INFLATION_RATE: f64 = 5.0;

/// Default base-year electricity price (currency/kWh)
pub const DEFAULT_ELECTRICITY_PRICE: f64 = 0.25;

/// Default share of production consumed on site (percent)
pub const DEFAULT_SELF_CONSUMPTION_RATE: f64 = 70.0;

/// Default installation cost (currency)
pub const DEFAULT_INSTALL_COST: f64 = 20_000.0;

/// Default financing window (months)
pub const DEFAULT_CREDIT_DURATION_MONTHS: u32 = 180;

/// Default view window (years)
pub const DEFAULT_PROJECTION_YEARS: u32 = 20;

/// Parameters as handed over by the extraction step.
///
/// Every field is optional and may hold any JSON value: numbers, numeric
/// strings, garbage. Nothing is validated here; [`RawParameters::normalize`]
/// is the only place where values are interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawParameters {
    #[serde(default, alias = "current_annual_bill")]
    pub current_annual_bill: Option<Value>,
    #[serde(default, alias = "yearly_consumption")]
    pub yearly_consumption: Option<Value>,
    #[serde(default, alias = "electricity_price")]
    pub electricity_price: Option<Value>,
    #[serde(default, alias = "inflation_rate")]
    pub inflation_rate: Option<Value>,
    #[serde(default, alias = "yearly_production")]
    pub yearly_production: Option<Value>,
    #[serde(default, alias = "self_consumption_rate")]
    pub self_consumption_rate: Option<Value>,
    #[serde(default, alias = "install_cost")]
    pub install_cost: Option<Value>,
    #[serde(default, alias = "credit_monthly_payment")]
    pub credit_monthly_payment: Option<Value>,
    #[serde(default, alias = "insurance_monthly_payment")]
    pub insurance_monthly_payment: Option<Value>,
    #[serde(default, alias = "credit_duration_months")]
    pub credit_duration_months: Option<Value>,
    #[serde(default, alias = "credit_interest_rate")]
    pub credit_interest_rate: Option<Value>,
    #[serde(default, alias = "projection_years")]
    pub projection_years: Option<Value>,
}

impl RawParameters {
    /// Coerce every field into a complete [`ParameterSet`].
    ///
    /// Absent, null, non-numeric and non-finite values take the field's
    /// default (or zero when the field has none). Never fails.
    pub fn normalize(&self) -> ParameterSet {
        ParameterSet {
            current_annual_bill: number_or("currentAnnualBill", &self.current_annual_bill, 0.0),
            yearly_consumption: number_or("yearlyConsumption", &self.yearly_consumption, 0.0),
            electricity_price: number_or(
                "electricityPrice",
                &self.electricity_price,
                DEFAULT_ELECTRICITY_PRICE,
            ),
            inflation_rate: number_or("inflationRate", &self.inflation_rate, DEFAULT_INFLATION_RATE),
            yearly_production: number_or("yearlyProduction", &self.yearly_production, 0.0),
            self_consumption_rate: number_or(
                "selfConsumptionRate",
                &self.self_consumption_rate,
                DEFAULT_SELF_CONSUMPTION_RATE,
            ),
            install_cost: number_or("installCost", &self.install_cost, DEFAULT_INSTALL_COST),
            credit_monthly_payment: number_or(
                "creditMonthlyPayment",
                &self.credit_monthly_payment,
                0.0,
            ),
            insurance_monthly_payment: number_or(
                "insuranceMonthlyPayment",
                &self.insurance_monthly_payment,
                0.0,
            ),
            // Rounded up: for whole-year offsets `offset * 12 < months` gives the
            // same answer for `months` and `ceil(months)`.
            credit_duration_months: whole_or(
                "creditDurationMonths",
                &self.credit_duration_months,
                DEFAULT_CREDIT_DURATION_MONTHS,
                f64::ceil,
            ),
            credit_interest_rate: number_or("creditInterestRate", &self.credit_interest_rate, 0.0),
            projection_years: whole_or(
                "projectionYears",
                &self.projection_years,
                DEFAULT_PROJECTION_YEARS,
                f64::trunc,
            ),
        }
    }
}

/// Interpret a raw JSON value as a finite number
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Parse a numeric string, accepting a single decimal comma ("0,25")
fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().or_else(|| {
        if trimmed.matches(',').count() == 1 && !trimmed.contains('.') {
            trimmed.replace(',', ".").parse::<f64>().ok()
        } else {
            None
        }
    })
}

fn number_or(field: &str, value: &Option<Value>, default: f64) -> f64 {
    match value {
        None | Some(Value::Null) => {
            log::trace!("{field}: absent, using {default}");
            default
        }
        Some(raw) => coerce_number(raw).unwrap_or_else(|| {
            log::debug!("{field}: unusable value {raw}, using {default}");
            default
        }),
    }
}

fn whole_or(field: &str, value: &Option<Value>, default: u32, round: fn(f64) -> f64) -> u32 {
    let number = number_or(field, value, f64::from(default));
    // Saturating float-to-int cast: negatives land on 0
    round(number) as u32
}

/// Fully-numeric, immutable input to a projection.
///
/// Rates are plain percentages (5 means 5 %).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Current energy spend (currency/year)
    pub current_annual_bill: f64,

    /// Consumption (kWh/year); 0 means "derive from bill and price"
    pub yearly_consumption: f64,

    /// Base-year electricity price (currency/kWh)
    pub electricity_price: f64,

    /// Annual electricity price inflation (percent)
    pub inflation_rate: f64,

    /// Nameplate production (kWh/year)
    pub yearly_production: f64,

    /// Share of production consumed on site (percent)
    pub self_consumption_rate: f64,

    /// One-time installation cost (currency)
    pub install_cost: f64,

    /// Loan instalment (currency/month)
    pub credit_monthly_payment: f64,

    /// Borrower insurance (currency/month)
    pub insurance_monthly_payment: f64,

    /// Length of the financing window (months)
    pub credit_duration_months: u32,

    /// Nominal loan rate (percent); informational, not used in the arithmetic
    pub credit_interest_rate: f64,

    /// Number of ledger rows reported (view window)
    pub projection_years: u32,
}

impl ParameterSet {
    /// Monthly financing charge (instalment plus insurance)
    pub fn monthly_financing(&self) -> f64 {
        self.credit_monthly_payment + self.insurance_monthly_payment
    }

    /// Whether the credit applies to the year starting at `offset`.
    ///
    /// A year that starts before the last loan month is billed in full.
    pub fn is_credit_active(&self, offset: u32) -> bool {
        u64::from(offset) * 12 < u64::from(self.credit_duration_months)
    }

    /// Install cost used as ROI denominator; 20000 stands in for a non-positive cost
    pub fn effective_install_cost(&self) -> f64 {
        if self.install_cost > 0.0 {
            self.install_cost
        } else {
            DEFAULT_INSTALL_COST
        }
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        RawParameters::default().normalize()
    }
}

impl From<RawParameters> for ParameterSet {
    fn from(raw: RawParameters) -> Self {
        raw.normalize()
    }
}

impl From<&RawParameters> for ParameterSet {
    fn from(raw: &RawParameters) -> Self {
        raw.normalize()
    }
}
