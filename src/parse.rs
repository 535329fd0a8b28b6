use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::dataset::{Dataset, Point};
use crate::error::{RbfError, Result};

const CATEGORY_FIELD: &str = "category";
const X1_FIELD: &str = "x1";
const X2_FIELD: &str = "x2";

/// Parses a comma-separated list of numbers such as `"1, 2"`.
pub fn parse_vector(field: &'static str, text: &str) -> Result<Vec<f64>> {
    text.split(',')
        .map(|token| parse_number(field, token))
        .collect()
}

/// Parses a single float or integer literal.
pub fn parse_scalar(field: &'static str, text: &str) -> Result<f64> {
    parse_number(field, text)
}

fn parse_number(field: &'static str, token: &str) -> Result<f64> {
    let token = token.trim();

    token.parse::<f64>().map_err(|_| RbfError::InvalidNumber {
        field,
        token: token.to_string(),
    })
}

pub fn parse(file_path: &Path) -> Result<Dataset> {
    let file = File::open(file_path)?;

    parse_reader(BufReader::new(file))
}

/// Reads `category,x1,x2` rows. Columns are located by header name, any other
/// columns are ignored.
pub fn parse_reader<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| RbfError::InvalidRow(format!("missing column {name:?}")))
    };

    let category_index = column(CATEGORY_FIELD)?;
    let x1_index = column(X1_FIELD)?;
    let x2_index = column(X2_FIELD)?;

    let mut dataset = Dataset::new();

    for (row, result) in reader.records().enumerate() {
        let record = result?;

        let value = |index: usize, field: &'static str| -> Result<f64> {
            let text = record.get(index).unwrap_or_default();

            parse_number(field, text).map_err(|_| {
                RbfError::InvalidRow(format!("row {row}: {field} is not a number: {text:?}"))
            })
        };

        let point = Point::new(
            value(category_index, CATEGORY_FIELD)?,
            value(x1_index, X1_FIELD)?,
            value(x2_index, X2_FIELD)?,
        );

        dataset.push(point)?;
    }

    Ok(dataset)
}
