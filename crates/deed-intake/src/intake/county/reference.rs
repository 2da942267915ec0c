//! Loader for the canonical county reference dataset.
//!
//! The dataset is a headed CSV of `name,tax_rate` rows, loaded once per
//! invocation and never mutated. A missing or corrupt dataset is an
//! infrastructure failure, distinct from any domain rejection.

use super::CountyRecord;
use crate::money::TaxRate;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("failed to read county reference data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid county reference data: {0}")]
    Csv(#[from] csv::Error),
    #[error("county '{county}' has an invalid tax rate '{value}'")]
    TaxRate { county: String, value: String },
}

#[derive(Debug, Deserialize)]
struct CountyRow {
    name: String,
    tax_rate: String,
}

pub fn counties_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CountyRecord>, ReferenceError> {
    let file = File::open(path)?;
    counties_from_reader(file)
}

pub fn counties_from_reader<R: Read>(reader: R) -> Result<Vec<CountyRecord>, ReferenceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut counties = Vec::new();

    for row in csv_reader.deserialize::<CountyRow>() {
        let row = row?;
        let tax_rate = TaxRate::parse(&row.tax_rate).ok_or_else(|| ReferenceError::TaxRate {
            county: row.name.clone(),
            value: row.tax_rate.clone(),
        })?;
        counties.push(CountyRecord {
            name: row.name,
            tax_rate,
        });
    }

    Ok(counties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn loads_name_and_exact_tax_rate() {
        let counties = counties_from_reader(Cursor::new(
            "name,tax_rate\nSanta Clara,0.0055\nAlameda , 0.0012\n",
        ))
        .expect("reference parses");

        assert_eq!(counties.len(), 2);
        assert_eq!(counties[0].name, "Santa Clara");
        assert_eq!(counties[0].tax_rate.millionths(), 5_500);
        assert_eq!(counties[1].name, "Alameda");
        assert_eq!(counties[1].tax_rate.millionths(), 1_200);
    }

    #[test]
    fn preserves_dataset_order() {
        let counties = counties_from_reader(Cursor::new(
            "name,tax_rate\nYuba,0.001\nAlameda,0.0012\nMarin,0.002\n",
        ))
        .expect("reference parses");
        let names: Vec<&str> = counties.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Yuba", "Alameda", "Marin"]);
    }

    #[test]
    fn header_only_dataset_is_empty_not_an_error() {
        let counties =
            counties_from_reader(Cursor::new("name,tax_rate\n")).expect("reference parses");
        assert!(counties.is_empty());
    }

    #[test]
    fn bad_tax_rate_is_an_infrastructure_error() {
        let error = counties_from_reader(Cursor::new("name,tax_rate\nSanta Clara,free\n"))
            .expect_err("expected tax rate error");
        match error {
            ReferenceError::TaxRate { county, value } => {
                assert_eq!(county, "Santa Clara");
                assert_eq!(value, "free");
            }
            other => panic!("expected tax rate error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let error =
            counties_from_path("./does-not-exist.csv").expect_err("expected io error");
        assert!(matches!(error, ReferenceError::Io(_)));
    }
}
