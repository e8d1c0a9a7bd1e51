use std::collections::BTreeSet;

use super::model::{CategoryColumn, Dataset};

// ---------------------------------------------------------------------------
// Selection – per-column set-membership criterion
// ---------------------------------------------------------------------------

/// What a multi-select control allows for one categorical column.
///
/// The "empty selection means select all" policy lives here, in the type:
/// [`Selection::from_set`] turns an empty set into `AllOf`, so an empty
/// multi-select never hides every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every value passes.
    AllOf,
    /// Only values in the (non-empty) set pass.
    SubsetOf(BTreeSet<String>),
}

impl Selection {
    /// Build a criterion from a UI selection set; empty means "all".
    pub fn from_set(set: BTreeSet<String>) -> Self {
        if set.is_empty() {
            Selection::AllOf
        } else {
            Selection::SubsetOf(set)
        }
    }

    /// Whether a column value passes this criterion.
    pub fn allows(&self, value: &str) -> bool {
        match self {
            Selection::AllOf => true,
            Selection::SubsetOf(set) => set.contains(value),
        }
    }

    /// The concrete set of allowed values given the distinct values present
    /// in the dataset. `AllOf` resolves to the full distinct set.
    pub fn resolve<'a>(&'a self, distinct: &'a BTreeSet<String>) -> &'a BTreeSet<String> {
        match self {
            Selection::AllOf => distinct,
            Selection::SubsetOf(set) => set,
        }
    }
}

// ---------------------------------------------------------------------------
// FilterCriteria – the full sidebar state as a value object
// ---------------------------------------------------------------------------

/// All filter controls combined. Conditions are conjunctive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Inclusive age bounds. `min > max` is tolerated and matches nothing.
    pub age_range: (i64, i64),
    pub genders: Selection,
    pub severities: Selection,
    pub hospitalized: Selection,
}

impl FilterCriteria {
    /// Criteria passing every row whose age falls inside the dataset's
    /// observed bounds (the sidebar's initial state).
    pub fn all(dataset: &Dataset) -> Self {
        FilterCriteria {
            age_range: dataset.age_bounds(),
            genders: Selection::AllOf,
            severities: Selection::AllOf,
            hospitalized: Selection::AllOf,
        }
    }
}

/// Return indices of patients that pass all criteria, in dataset order.
///
/// A patient passes when:
/// * `age` is present and within `age_range` (inclusive on both ends), and
/// * each categorical value is allowed by its [`Selection`].
///
/// Rows with a missing age never match an age range, consistent with
/// missing-value semantics elsewhere.
pub fn filtered_indices(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<usize> {
    let (min_age, max_age) = criteria.age_range;
    dataset
        .patients
        .iter()
        .enumerate()
        .filter(|(_, p)| {
            let age_ok = p.age.is_some_and(|a| a >= min_age && a <= max_age);
            age_ok
                && criteria.genders.allows(CategoryColumn::Gender.get(p))
                && criteria
                    .severities
                    .allows(CategoryColumn::CovidSeverity.get(p))
                && criteria
                    .hospitalized
                    .allows(CategoryColumn::Hospitalized.get(p))
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::test_support::patient;

    fn sample_dataset() -> Dataset {
        Dataset::from_patients(vec![
            patient(10, "Female", "Mild", "Yes"),
            patient(30, "Male", "Severe", "Yes"),
            patient(90, "Female", "Mild", "No"),
        ])
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn age_range_is_inclusive_and_selects_middle_row() {
        let ds = sample_dataset();
        let mut criteria = FilterCriteria::all(&ds);
        criteria.age_range = (20, 70);
        assert_eq!(filtered_indices(&ds, &criteria), [1]);
    }

    #[test]
    fn inverted_age_range_matches_nothing() {
        let ds = sample_dataset();
        let mut criteria = FilterCriteria::all(&ds);
        criteria.age_range = (70, 20);
        assert!(filtered_indices(&ds, &criteria).is_empty());
    }

    #[test]
    fn empty_selection_behaves_as_select_all() {
        let ds = sample_dataset();
        let mut empty = FilterCriteria::all(&ds);
        empty.genders = Selection::from_set(BTreeSet::new());

        let mut explicit = FilterCriteria::all(&ds);
        explicit.genders =
            Selection::SubsetOf(ds.distinct(CategoryColumn::Gender).clone());

        assert_eq!(
            filtered_indices(&ds, &empty),
            filtered_indices(&ds, &explicit)
        );
        assert_eq!(filtered_indices(&ds, &empty).len(), 3);
    }

    #[test]
    fn empty_severity_selection_matches_explicit_full_set() {
        let ds = sample_dataset();
        let mut empty = FilterCriteria::all(&ds);
        empty.severities = Selection::from_set(BTreeSet::new());

        let mut explicit = FilterCriteria::all(&ds);
        explicit.severities = Selection::SubsetOf(set(&["Mild", "Severe"]));

        assert_eq!(
            filtered_indices(&ds, &empty),
            filtered_indices(&ds, &explicit)
        );
    }

    #[test]
    fn conditions_are_conjunctive() {
        let ds = sample_dataset();
        let mut criteria = FilterCriteria::all(&ds);
        criteria.genders = Selection::SubsetOf(set(&["Female"]));
        criteria.hospitalized = Selection::SubsetOf(set(&["Yes"]));
        // Only row 0 is both Female and hospitalized.
        assert_eq!(filtered_indices(&ds, &criteria), [0]);
    }

    #[test]
    fn missing_age_fails_the_range_check() {
        let mut p = patient(0, "Female", "Mild", "No");
        p.age = None;
        let ds = Dataset::from_patients(vec![p, patient(40, "Male", "Mild", "No")]);
        let criteria = FilterCriteria {
            age_range: (0, 120),
            genders: Selection::AllOf,
            severities: Selection::AllOf,
            hospitalized: Selection::AllOf,
        };
        assert_eq!(filtered_indices(&ds, &criteria), [1]);
    }

    #[test]
    fn selection_resolves_to_distinct_set() {
        let ds = sample_dataset();
        let distinct = ds.distinct(CategoryColumn::CovidSeverity);
        assert_eq!(Selection::AllOf.resolve(distinct), distinct);
        let subset = Selection::SubsetOf(set(&["Mild"]));
        assert_eq!(subset.resolve(distinct), &set(&["Mild"]));
    }
}
