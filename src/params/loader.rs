//! Load raw parameter sets from JSON documents and CSV batches

use super::{ParameterSet, RawParameters};
use crate::error::{Error, Result};
use csv::Reader;
use serde_json::{Map, Value};
use std::fs::File;
use std::path::Path;

/// Column holding an optional row label in batch files
const LABEL_COLUMNS: [&str; 2] = ["label", "id"];

/// A normalized parameter set tagged with where it came from
#[derive(Debug, Clone)]
pub struct LabeledParameters {
    /// Label column value, or the 1-based row number when the column is missing/empty
    pub label: String,
    pub params: ParameterSet,
}

/// Read a single raw parameter document (a JSON object) from a file
pub fn load_raw_json<P: AsRef<Path>>(path: P) -> Result<RawParameters> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    load_raw_json_from_reader(file)
}

/// Read a single raw parameter document from any reader
pub fn load_raw_json_from_reader<R: std::io::Read>(reader: R) -> Result<RawParameters> {
    let value: Value = serde_json::from_reader(reader)?;
    raw_from_value(value)
}

/// Interpret a JSON value as raw parameters.
///
/// Extraction output is sometimes wrapped as `{"params": {...}}`; the wrapper
/// is unwrapped when present.
pub fn raw_from_value(value: Value) -> Result<RawParameters> {
    let value = match value {
        Value::Object(mut map) if map.get("params").is_some_and(Value::is_object) => {
            map.remove("params").unwrap_or_default()
        }
        other => other,
    };
    match value {
        Value::Object(_) => Ok(serde_json::from_value(value)?),
        Value::Null => Err(Error::NotAnObject("null")),
        Value::Bool(_) => Err(Error::NotAnObject("a boolean")),
        Value::Number(_) => Err(Error::NotAnObject("a number")),
        Value::String(_) => Err(Error::NotAnObject("a string")),
        Value::Array(_) => Err(Error::NotAnObject("an array")),
    }
}

/// Load and normalize every row of a CSV batch file
pub fn load_parameter_sets<P: AsRef<Path>>(path: P) -> Result<Vec<LabeledParameters>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    load_parameter_sets_from_reader(file)
}

/// Load and normalize every row of a CSV batch from any reader.
///
/// Headers name the parameters (camelCase or snake_case). Cells are kept as
/// text and coerced by normalization, so a malformed cell falls back to its
/// default instead of failing the whole file.
pub fn load_parameter_sets_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<LabeledParameters>> {
    let mut csv_reader = Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut sets = Vec::new();

    for (index, result) in csv_reader.records().enumerate() {
        let record = result?;
        let mut fields = Map::new();
        let mut label = None;

        for (header, cell) in headers.iter().zip(record.iter()) {
            let header = header.trim();
            if LABEL_COLUMNS.contains(&header) {
                if !cell.trim().is_empty() {
                    label = Some(cell.trim().to_string());
                }
                continue;
            }
            fields.insert(header.to_string(), Value::String(cell.to_string()));
        }

        let raw: RawParameters = serde_json::from_value(Value::Object(fields))?;
        sets.push(LabeledParameters {
            label: label.unwrap_or_else(|| (index + 1).to_string()),
            params: raw.normalize(),
        });
    }

    log::debug!("loaded {} parameter sets", sets.len());
    Ok(sets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_csv_batch() {
        let data = "\
label,currentAnnualBill,electricityPrice,yearlyProduction,installCost,creditDurationMonths
north,1600,0.25,5000,20000,180
south,2400,\"0,30\",,oops,120
,900,,3000,15000,
";
        let sets = load_parameter_sets_from_reader(data.as_bytes()).unwrap();
        assert_eq!(sets.len(), 3);

        assert_eq!(sets[0].label, "north");
        assert_eq!(sets[0].params.current_annual_bill, 1600.0);
        assert_eq!(sets[0].params.yearly_production, 5000.0);

        assert_eq!(sets[1].label, "south");
        assert_eq!(sets[1].params.electricity_price, 0.30);
        assert_eq!(sets[1].params.yearly_production, 0.0);
        assert_eq!(sets[1].params.install_cost, 20_000.0);
        assert_eq!(sets[1].params.credit_duration_months, 120);

        // Missing label falls back to the row number; empty cells take defaults
        assert_eq!(sets[2].label, "3");
        assert_eq!(sets[2].params.electricity_price, 0.25);
        assert_eq!(sets[2].params.credit_duration_months, 180);
    }

    #[test]
    fn test_snake_case_headers() {
        let data = "id,current_annual_bill,projection_years\n7,1200,25\n";
        let sets = load_parameter_sets_from_reader(data.as_bytes()).unwrap();

        assert_eq!(sets[0].label, "7");
        assert_eq!(sets[0].params.current_annual_bill, 1200.0);
        assert_eq!(sets[0].params.projection_years, 25);
    }

    #[test]
    fn test_json_with_params_wrapper() {
        let document = r#"{"params": {"installCost": 18000}, "salesPitch": "..."}"#;
        let raw = load_raw_json_from_reader(document.as_bytes()).unwrap();

        assert_eq!(raw.normalize().install_cost, 18_000.0);
    }

    #[test]
    fn test_json_must_be_object() {
        let err = load_raw_json_from_reader("[1, 2]".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::NotAnObject("an array")));
    }
}
