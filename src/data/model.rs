use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Patient – one normalized row of the dataset
// ---------------------------------------------------------------------------

/// A single patient record after normalization.
///
/// Numeric columns are `Option<f64>`: a cell that failed to parse (or a
/// Yes/No indicator with an unrecognized value) is `None` and is skipped by
/// every downstream mean/percentage computation.
#[derive(Debug, Clone, PartialEq)]
pub struct Patient {
    pub age: Option<i64>,
    pub gender: String,
    pub covid_severity: String,
    pub hospitalized: String,
    pub fatigue_level: Option<f64>,
    pub brain_fog: Option<f64>,
    pub breathing_issue: Option<f64>,
    pub loss_of_taste_smell: Option<f64>,
    pub mental_health_impact: Option<f64>,
    pub days_to_recovery: Option<f64>,
    pub long_covid_risk: String,
    pub physical_activity_level: String,
}

// ---------------------------------------------------------------------------
// Typed column handles
// ---------------------------------------------------------------------------

/// Categorical columns of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryColumn {
    Gender,
    CovidSeverity,
    Hospitalized,
    LongCovidRisk,
    PhysicalActivityLevel,
}

impl CategoryColumn {
    pub const ALL: [CategoryColumn; 5] = [
        CategoryColumn::Gender,
        CategoryColumn::CovidSeverity,
        CategoryColumn::Hospitalized,
        CategoryColumn::LongCovidRisk,
        CategoryColumn::PhysicalActivityLevel,
    ];

    /// The value of this column for a given patient.
    pub fn get<'a>(&self, patient: &'a Patient) -> &'a str {
        match self {
            CategoryColumn::Gender => &patient.gender,
            CategoryColumn::CovidSeverity => &patient.covid_severity,
            CategoryColumn::Hospitalized => &patient.hospitalized,
            CategoryColumn::LongCovidRisk => &patient.long_covid_risk,
            CategoryColumn::PhysicalActivityLevel => &patient.physical_activity_level,
        }
    }

    /// Human-readable label for UI headers and chart axes.
    pub fn label(&self) -> &'static str {
        match self {
            CategoryColumn::Gender => "Gender",
            CategoryColumn::CovidSeverity => "COVID Severity",
            CategoryColumn::Hospitalized => "Hospitalized",
            CategoryColumn::LongCovidRisk => "Long COVID Risk",
            CategoryColumn::PhysicalActivityLevel => "Physical Activity Level",
        }
    }
}

impl fmt::Display for CategoryColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Numeric columns (all nullable after normalization).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumericColumn {
    FatigueLevel,
    BrainFog,
    BreathingIssue,
    LossOfTasteSmell,
    MentalHealthImpact,
    DaysToRecovery,
}

/// The four symptom columns charted against Long COVID risk.
pub const SYMPTOM_COLUMNS: [NumericColumn; 4] = [
    NumericColumn::FatigueLevel,
    NumericColumn::BrainFog,
    NumericColumn::BreathingIssue,
    NumericColumn::LossOfTasteSmell,
];

impl NumericColumn {
    pub fn get(&self, patient: &Patient) -> Option<f64> {
        match self {
            NumericColumn::FatigueLevel => patient.fatigue_level,
            NumericColumn::BrainFog => patient.brain_fog,
            NumericColumn::BreathingIssue => patient.breathing_issue,
            NumericColumn::LossOfTasteSmell => patient.loss_of_taste_smell,
            NumericColumn::MentalHealthImpact => patient.mental_health_impact,
            NumericColumn::DaysToRecovery => patient.days_to_recovery,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NumericColumn::FatigueLevel => "Fatigue Level",
            NumericColumn::BrainFog => "Brain Fog",
            NumericColumn::BreathingIssue => "Breathing Issue",
            NumericColumn::LossOfTasteSmell => "Loss of Taste/Smell",
            NumericColumn::MentalHealthImpact => "Mental Health Impact",
            NumericColumn::DaysToRecovery => "Days to Recovery",
        }
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full normalized dataset with pre-computed category indices.
///
/// Constructed once at startup and never mutated; each render cycle borrows
/// it read-only.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All patients (rows), in file order.
    pub patients: Vec<Patient>,
    /// For each categorical column the sorted set of distinct values.
    pub unique_values: BTreeMap<CategoryColumn, BTreeSet<String>>,
    /// Min/max observed age across rows with a parseable age.
    age_bounds: Option<(i64, i64)>,
}

impl Dataset {
    /// Build category indices from the loaded patients.
    pub fn from_patients(patients: Vec<Patient>) -> Self {
        let mut unique_values: BTreeMap<CategoryColumn, BTreeSet<String>> = CategoryColumn::ALL
            .iter()
            .map(|col| (*col, BTreeSet::new()))
            .collect();

        let mut age_bounds: Option<(i64, i64)> = None;
        for patient in &patients {
            for col in CategoryColumn::ALL {
                if let Some(values) = unique_values.get_mut(&col) {
                    values.insert(col.get(patient).to_string());
                }
            }
            if let Some(age) = patient.age {
                age_bounds = Some(match age_bounds {
                    Some((lo, hi)) => (lo.min(age), hi.max(age)),
                    None => (age, age),
                });
            }
        }

        Dataset {
            patients,
            unique_values,
            age_bounds,
        }
    }

    /// Distinct values observed for a categorical column.
    pub fn distinct(&self, column: CategoryColumn) -> &BTreeSet<String> {
        // from_patients seeds every column, so the lookup cannot miss.
        &self.unique_values[&column]
    }

    /// Observed (min, max) age; `(0, 100)` for a dataset with no valid ages
    /// so the UI sliders always have a sane range.
    pub fn age_bounds(&self) -> (i64, i64) {
        self.age_bounds.unwrap_or((0, 100))
    }

    /// Number of patients.
    pub fn len(&self) -> usize {
        self.patients.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// A patient with every field present; tests override what they need.
    pub fn patient(age: i64, gender: &str, severity: &str, hospitalized: &str) -> Patient {
        Patient {
            age: Some(age),
            gender: gender.to_string(),
            covid_severity: severity.to_string(),
            hospitalized: hospitalized.to_string(),
            fatigue_level: Some(5.0),
            brain_fog: Some(1.0),
            breathing_issue: Some(0.0),
            loss_of_taste_smell: Some(0.0),
            mental_health_impact: Some(4.0),
            days_to_recovery: Some(30.0),
            long_covid_risk: "Medium".to_string(),
            physical_activity_level: "Moderate".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::patient;
    use super::*;

    #[test]
    fn from_patients_indexes_distinct_values() {
        let ds = Dataset::from_patients(vec![
            patient(30, "Female", "Mild", "No"),
            patient(45, "Male", "Severe", "Yes"),
            patient(60, "Female", "Mild", "No"),
        ]);

        let genders: Vec<&str> = ds
            .distinct(CategoryColumn::Gender)
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(genders, ["Female", "Male"]);
        assert_eq!(ds.distinct(CategoryColumn::CovidSeverity).len(), 2);
        assert_eq!(ds.age_bounds(), (30, 60));
    }

    #[test]
    fn age_bounds_default_when_all_missing() {
        let mut p = patient(0, "Female", "Mild", "No");
        p.age = None;
        let ds = Dataset::from_patients(vec![p]);
        assert_eq!(ds.age_bounds(), (0, 100));
    }

    #[test]
    fn empty_dataset_has_empty_indices() {
        let ds = Dataset::from_patients(Vec::new());
        assert!(ds.is_empty());
        assert!(ds.distinct(CategoryColumn::LongCovidRisk).is_empty());
    }
}
