use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use super::model::Dataset;
use super::normalize::{self, RawPatient};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Structural problems with the dataset file. These are fatal at startup;
/// per-cell value problems are not errors (they become missing values in
/// normalization).
#[derive(Debug, Error)]
pub enum DataError {
    #[error("dataset is missing required column '{0}'")]
    MissingColumn(String),
}

/// Every column the dashboard reads. Validated against the header row up
/// front so a renamed column fails with a clear message instead of a serde
/// field error deep in row parsing.
pub const REQUIRED_COLUMNS: [&str; 12] = [
    "Age",
    "Gender",
    "COVID_Severity",
    "Hospitalized",
    "Fatigue_Level",
    "Brain_Fog",
    "Breathing_Issue",
    "Loss_of_Taste_Smell",
    "Mental_Health_Impact",
    "Days_to_Recovery",
    "Long_COVID_Risk",
    "Physical_Activity_Level",
];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the patient dataset from a CSV file.
///
/// Header row with the exact column names in [`REQUIRED_COLUMNS`]; extra
/// columns are ignored. Called exactly once, at startup.
pub fn load_csv(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening dataset file {}", path.display()))?;
    read_patients(file)
}

/// Parse a normalized [`Dataset`] from any CSV source.
pub fn read_patients(source: impl Read) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(source);

    let headers = reader.headers().context("reading CSV header row")?;
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(DataError::MissingColumn(required.to_string()).into());
        }
    }

    let mut patients = Vec::new();
    for (row_no, result) in reader.deserialize::<RawPatient>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        patients.push(normalize::normalize(raw));
    }

    log::info!("loaded {} patient records", patients.len());
    Ok(Dataset::from_patients(patients))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Age,Gender,COVID_Severity,Hospitalized,Fatigue_Level,Brain_Fog,\
Breathing_Issue,Loss_of_Taste_Smell,Mental_Health_Impact,Days_to_Recovery,\
Long_COVID_Risk,Physical_Activity_Level";

    #[test]
    fn reads_and_normalizes_rows() {
        let csv = format!(
            "{HEADER}\n\
             34,Female,Mild,No,6,Yes,No,No,4,21,Low,High\n\
             58,Male,Severe,Yes,9,Yes,Yes,weird,8,oops,High,Low\n"
        );
        let ds = read_patients(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.patients[0].brain_fog, Some(1.0));
        assert_eq!(ds.patients[1].loss_of_taste_smell, None);
        assert_eq!(ds.patients[1].days_to_recovery, None);
    }

    #[test]
    fn missing_column_is_fatal() {
        let csv = "Age,Gender\n34,Female\n";
        let err = read_patients(csv.as_bytes()).unwrap_err();
        let data_err = err.downcast_ref::<DataError>().unwrap();
        assert!(matches!(data_err, DataError::MissingColumn(col) if col == "COVID_Severity"));
    }

    #[test]
    fn missing_file_is_fatal() {
        assert!(load_csv(Path::new("definitely_not_here.csv")).is_err());
    }

    #[test]
    fn empty_file_yields_empty_dataset_error() {
        // No header at all means every required column is missing.
        let err = read_patients("".as_bytes()).unwrap_err();
        assert!(err.downcast_ref::<DataError>().is_some());
    }

    #[test]
    fn header_only_yields_zero_rows() {
        let csv = format!("{HEADER}\n");
        let ds = read_patients(csv.as_bytes()).unwrap();
        assert!(ds.is_empty());
    }
}
