//! CSV ingestion for the retail sales dataset.

use chrono::NaiveDate;
use pulse_core::error::{PulseError, PulseResult};
use pulse_core::types::{MonthKey, SalesRecord};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Raw CSV row using the dataset's literal column headers.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Product Category")]
    category: String,
    #[serde(rename = "Quantity")]
    quantity: u32,
    #[serde(rename = "Total Amount")]
    total_amount: f64,
    #[serde(rename = "Age")]
    age: u8,
    #[serde(rename = "Gender")]
    gender: String,
}

/// Fully loaded, immutable dataset shared for the process lifetime.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<SalesRecord>,
}

impl Dataset {
    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct product categories, sorted ascending.
    pub fn categories(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Inclusive `[min, max]` date bounds; `None` for an empty dataset.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }
}

/// Load the dataset from a file. A missing or malformed file is an error
/// the caller treats as fatal.
pub fn load_path(path: impl AsRef<Path>, date_format: &str) -> PulseResult<Dataset> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| PulseError::DatasetLoad(format!("cannot open {}: {e}", path.display())))?;
    let dataset = load_reader(file, date_format)?;

    info!(path = %path.display(), rows = dataset.len(), "Dataset loaded");
    metrics::counter!("dataset.loads").increment(1);
    Ok(dataset)
}

/// Load the dataset from any reader. Row numbers in errors are 1-based
/// data rows (the header line is not counted).
pub fn load_reader<R: Read>(reader: R, date_format: &str) -> PulseResult<Dataset> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (idx, row) in csv_reader.deserialize::<RawRecord>().enumerate() {
        let row_no = idx + 1;
        let raw = row.map_err(|e| PulseError::DatasetParse {
            row: row_no,
            message: e.to_string(),
        })?;
        records.push(convert(raw, row_no, date_format)?);
    }

    Ok(Dataset { records })
}

fn convert(raw: RawRecord, row: usize, date_format: &str) -> PulseResult<SalesRecord> {
    let date = NaiveDate::parse_from_str(&raw.date, date_format).map_err(|e| {
        PulseError::DatasetParse {
            row,
            message: format!("invalid date '{}': {e}", raw.date),
        }
    })?;

    if !raw.total_amount.is_finite() {
        return Err(PulseError::DatasetParse {
            row,
            message: format!("non-finite total amount {}", raw.total_amount),
        });
    }
    if raw.total_amount < 0.0 {
        return Err(PulseError::DatasetParse {
            row,
            message: format!("negative total amount {}", raw.total_amount),
        });
    }

    Ok(SalesRecord {
        date,
        month: MonthKey::from_date(date),
        category: raw.category,
        quantity: raw.quantity,
        total_amount: raw.total_amount,
        age: raw.age,
        gender: raw.gender,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Date,Product Category,Quantity,Total Amount,Age,Gender
2023-01-05,Beauty,3,150.0,34,Female
2023-01-31,Clothing,2,500.0,26,Male
2023-02-14,Beauty,1,30.0,50,Female
";

    #[test]
    fn test_load_sample() {
        let dataset = load_reader(SAMPLE.as_bytes(), "%Y-%m-%d").unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.categories(), vec!["Beauty", "Clothing"]);

        let first = &dataset.records()[0];
        assert_eq!(first.category, "Beauty");
        assert_eq!(first.quantity, 3);
        assert_eq!(first.month.to_string(), "2023-01");

        let (min, max) = dataset.date_bounds().unwrap();
        assert_eq!(min, NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
        assert_eq!(max, NaiveDate::from_ymd_opt(2023, 2, 14).unwrap());
    }

    #[test]
    fn test_invalid_date_is_fatal() {
        let csv = "\
Date,Product Category,Quantity,Total Amount,Age,Gender
05/01/2023,Beauty,3,150.0,34,Female
";
        let err = load_reader(csv.as_bytes(), "%Y-%m-%d").unwrap_err();
        assert!(matches!(err, PulseError::DatasetParse { row: 1, .. }));
    }

    #[test]
    fn test_negative_amount_is_fatal() {
        let csv = "\
Date,Product Category,Quantity,Total Amount,Age,Gender
2023-01-05,Beauty,3,150.0,34,Female
2023-01-06,Beauty,1,-25.0,40,Male
";
        let err = load_reader(csv.as_bytes(), "%Y-%m-%d").unwrap_err();
        assert!(matches!(err, PulseError::DatasetParse { row: 2, .. }));
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let csv = "\
Date,Quantity,Total Amount,Age,Gender
2023-01-05,3,150.0,34,Female
";
        assert!(load_reader(csv.as_bytes(), "%Y-%m-%d").is_err());
    }

    #[test]
    fn test_empty_file_yields_empty_dataset() {
        let csv = "Date,Product Category,Quantity,Total Amount,Age,Gender\n";
        let dataset = load_reader(csv.as_bytes(), "%Y-%m-%d").unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.date_bounds().is_none());
    }
}
