use serde::Deserialize;

use super::model::Patient;

// ---------------------------------------------------------------------------
// RawPatient – one CSV row before normalization
// ---------------------------------------------------------------------------

/// A row exactly as it appears in the CSV; field names map to the file's
/// header names. Everything that can be malformed per-cell stays textual
/// here and is coerced by [`normalize`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawPatient {
    #[serde(rename = "Age")]
    pub age: String,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "COVID_Severity")]
    pub covid_severity: String,
    #[serde(rename = "Hospitalized")]
    pub hospitalized: String,
    #[serde(rename = "Fatigue_Level")]
    pub fatigue_level: String,
    #[serde(rename = "Brain_Fog")]
    pub brain_fog: String,
    #[serde(rename = "Breathing_Issue")]
    pub breathing_issue: String,
    #[serde(rename = "Loss_of_Taste_Smell")]
    pub loss_of_taste_smell: String,
    #[serde(rename = "Mental_Health_Impact")]
    pub mental_health_impact: String,
    #[serde(rename = "Days_to_Recovery")]
    pub days_to_recovery: String,
    #[serde(rename = "Long_COVID_Risk")]
    pub long_covid_risk: String,
    #[serde(rename = "Physical_Activity_Level")]
    pub physical_activity_level: String,
}

// ---------------------------------------------------------------------------
// Cell coercions
// ---------------------------------------------------------------------------

/// Map a Yes/No indicator cell to a 0/1 value.
///
/// Cells already in numeric {0, 1} form pass through unchanged, so
/// normalizing an already-normalized column is a no-op. Anything else
/// (including empty cells) is missing.
pub fn binary_indicator(cell: &str) -> Option<f64> {
    match cell.trim() {
        "Yes" => Some(1.0),
        "No" => Some(0.0),
        "1" | "1.0" => Some(1.0),
        "0" | "0.0" => Some(0.0),
        _ => None,
    }
}

/// Parse a numeric cell; malformed cells become missing, never an error.
pub fn numeric(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse an integer cell (used for `Age`).
pub fn integer(cell: &str) -> Option<i64> {
    cell.trim().parse::<i64>().ok()
}

// ---------------------------------------------------------------------------
// Row normalization
// ---------------------------------------------------------------------------

/// Coerce a raw CSV row into a typed [`Patient`].
///
/// Total: per-cell failures degrade to `None`, they never abort the load.
/// Categorical cells are kept verbatim apart from whitespace trimming.
pub fn normalize(raw: RawPatient) -> Patient {
    Patient {
        age: integer(&raw.age),
        gender: raw.gender.trim().to_string(),
        covid_severity: raw.covid_severity.trim().to_string(),
        hospitalized: raw.hospitalized.trim().to_string(),
        fatigue_level: numeric(&raw.fatigue_level),
        brain_fog: binary_indicator(&raw.brain_fog),
        breathing_issue: binary_indicator(&raw.breathing_issue),
        loss_of_taste_smell: binary_indicator(&raw.loss_of_taste_smell),
        mental_health_impact: numeric(&raw.mental_health_impact),
        days_to_recovery: numeric(&raw.days_to_recovery),
        long_covid_risk: raw.long_covid_risk.trim().to_string(),
        physical_activity_level: raw.physical_activity_level.trim().to_string(),
    }
}
