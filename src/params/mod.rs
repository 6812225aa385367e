//! Projection inputs: the parameter set, its normalization, and loaders

mod data;
pub mod loader;

pub use data::{
    coerce_number, ParameterSet, RawParameters, DEFAULT_CREDIT_DURATION_MONTHS,
    DEFAULT_ELECTRICITY_PRICE, DEFAULT_INFLATION_RATE, DEFAULT_INSTALL_COST,
    DEFAULT_PROJECTION_YEARS, DEFAULT_SELF_CONSUMPTION_RATE,
};
pub use loader::{
    load_parameter_sets, load_parameter_sets_from_reader, load_raw_json, LabeledParameters,
};
