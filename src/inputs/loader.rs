//! File-based input loading
//!
//! Inputs can be supplied as a JSON object (any subset of the `Inputs`
//! fields) or as a two-column `field,value` CSV file.

use std::fs::File;
use std::path::Path;

use serde_json::{Map, Value};

use super::Inputs;
use crate::error::{ModelError, Result};

/// Default path to an inputs file
pub const DEFAULT_INPUTS_PATH: &str = "data/inputs.json";

/// Scalar fields accepted in a CSV inputs file
const NUMERIC_FIELDS: &[&str] = &[
    "discount_rate",
    "home_price",
    "down_payment_fraction",
    "mortgage_rate",
    "hoa_monthly",
    "property_tax_rate",
    "home_insurance_monthly",
    "maintenance_rate",
    "home_appreciation_rate",
    "closing_costs",
    "loan_fees",
    "monthly_rent",
    "rent_inflation_rate",
    "renters_insurance_monthly",
    "other_rent_costs_monthly",
];

const INTEGER_FIELDS: &[&str] = &["analysis_years", "mortgage_term_years"];

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    field: String,
    value: String,
}

/// Load inputs from a `.json` or `.csv` file, picking the format by extension
pub fn load_inputs(path: &Path) -> Result<Inputs> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        load_csv(path)
    } else {
        load_json(path)
    }
}

pub fn load_json(path: &Path) -> Result<Inputs> {
    let file = File::open(path)?;
    let inputs = serde_json::from_reader(file)?;
    log::debug!("loaded inputs from {}", path.display());
    Ok(inputs)
}

pub fn load_csv(path: &Path) -> Result<Inputs> {
    let file = File::open(path)?;
    let inputs = parse_csv(csv::Reader::from_reader(file))?;
    log::debug!("loaded inputs from {}", path.display());
    Ok(inputs)
}

fn parse_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Inputs> {
    let mut fields = Map::new();
    let mut sale = Map::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        let name = row.field.trim();
        let raw = row.value.trim();

        if NUMERIC_FIELDS.contains(&name) {
            fields.insert(name.to_string(), parse_number(name, raw)?);
        } else if INTEGER_FIELDS.contains(&name) {
            fields.insert(name.to_string(), parse_integer(name, raw)?);
        } else if name == "mortgage_rate_convention" {
            fields.insert(name.to_string(), Value::String(raw.to_string()));
        } else if name == "sale_month" {
            sale.insert("month".to_string(), parse_integer(name, raw)?);
        } else if name == "sale_selling_cost_rate" {
            sale.insert("selling_cost_rate".to_string(), parse_number(name, raw)?);
        } else {
            return Err(ModelError::UnknownField(name.to_string()));
        }
    }

    if !sale.is_empty() {
        fields.insert("sale".to_string(), Value::Object(sale));
    }

    Ok(serde_json::from_value(Value::Object(fields))?)
}

fn parse_number(field: &str, raw: &str) -> Result<Value> {
    raw.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| ModelError::Parse { field: field.to_string(), value: raw.to_string() })
}

fn parse_integer(field: &str, raw: &str) -> Result<Value> {
    raw.parse::<u32>()
        .map(Value::from)
        .map_err(|_| ModelError::Parse { field: field.to_string(), value: raw.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::RateConvention;

    fn reader(text: &str) -> csv::Reader<&[u8]> {
        csv::Reader::from_reader(text.as_bytes())
    }

    #[test]
    fn test_parse_csv_inputs() {
        let text = "field,value\n\
                    home_price,350000\n\
                    analysis_years,15\n\
                    mortgage_rate,0.045\n\
                    mortgage_rate_convention,Effective\n\
                    sale_month,84\n\
                    sale_selling_cost_rate,0.06\n";
        let inputs = parse_csv(reader(text)).unwrap();

        assert_eq!(inputs.home_price, 350_000.0);
        assert_eq!(inputs.analysis_years, 15);
        assert_eq!(inputs.mortgage_rate, 0.045);
        assert_eq!(inputs.mortgage_rate_convention, RateConvention::Effective);
        let sale = inputs.sale.unwrap();
        assert_eq!(sale.month, 84);
        assert_eq!(sale.selling_cost_rate, 0.06);

        // Untouched fields keep their defaults
        assert_eq!(inputs.mortgage_term_years, 30);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse_csv(reader("field,value\nhoa,100\n")).unwrap_err();
        assert!(matches!(err, ModelError::UnknownField(ref f) if f == "hoa"));
    }

    #[test]
    fn test_bad_number_rejected() {
        let err = parse_csv(reader("field,value\nhome_price,lots\n")).unwrap_err();
        assert!(matches!(err, ModelError::Parse { .. }));

        let err = parse_csv(reader("field,value\nanalysis_years,2.5\n")).unwrap_err();
        assert!(matches!(err, ModelError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_inputs(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, ModelError::Io(_)));
    }
}
