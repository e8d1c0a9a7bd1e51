use std::collections::BTreeMap;

use super::model::{
    CategoryColumn, Dataset, NumericColumn, Patient, SYMPTOM_COLUMNS,
};

// ---------------------------------------------------------------------------
// View – a filtered, read-only subset of the dataset
// ---------------------------------------------------------------------------

/// A borrowed view over the rows passing the current filters.
///
/// Every aggregation below is total over the empty view: counts go to zero,
/// means go to `None`, percentages go to `0.0`, tables go empty. Interactive
/// filtering routinely produces zero rows and must never panic.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    dataset: &'a Dataset,
    indices: &'a [usize],
}

impl<'a> View<'a> {
    pub fn new(dataset: &'a Dataset, indices: &'a [usize]) -> Self {
        View { dataset, indices }
    }

    /// Iterate the patients in the view, in dataset order.
    pub fn patients(&self) -> impl Iterator<Item = &'a Patient> + '_ {
        self.indices.iter().map(|&i| &self.dataset.patients[i])
    }

    /// Row count of the view.
    pub fn count(&self) -> usize {
        self.indices.len()
    }

    /// Mean of a numeric column, skipping missing cells.
    /// `None` when the view is empty or every cell is missing.
    pub fn mean(&self, column: NumericColumn) -> Option<f64> {
        let (sum, n) = self
            .patients()
            .filter_map(|p| column.get(p))
            .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
        if n == 0 { None } else { Some(sum / n as f64) }
    }

    /// Mean recovery time in days.
    pub fn mean_recovery_days(&self) -> Option<f64> {
        self.mean(NumericColumn::DaysToRecovery)
    }

    /// Fraction of rows satisfying `pred`, as a percentage in [0, 100]
    /// rounded to two decimal places. The empty view yields `0.0` rather
    /// than an undefined value, so KPI tiles always have a number to show.
    pub fn percentage(&self, pred: impl Fn(&Patient) -> bool) -> f64 {
        if self.indices.is_empty() {
            return 0.0;
        }
        let matching = self.patients().filter(|p| pred(p)).count();
        round2(matching as f64 / self.count() as f64 * 100.0)
    }

    /// Partition rows by a categorical column and compute the mean of each
    /// given numeric column per group (missing cells skipped).
    ///
    /// The result vector is parallel to `columns`. Group order is
    /// alphabetical (`BTreeMap`), which is deterministic and doubles as the
    /// chart label order. Every row lands in exactly one group.
    pub fn grouped_means(
        &self,
        group: CategoryColumn,
        columns: &[NumericColumn],
    ) -> BTreeMap<String, Vec<Option<f64>>> {
        let mut sums: BTreeMap<String, Vec<(f64, usize)>> = BTreeMap::new();
        for patient in self.patients() {
            let acc = sums
                .entry(group.get(patient).to_string())
                .or_insert_with(|| vec![(0.0, 0); columns.len()]);
            for (slot, column) in acc.iter_mut().zip(columns) {
                if let Some(v) = column.get(patient) {
                    slot.0 += v;
                    slot.1 += 1;
                }
            }
        }
        sums.into_iter()
            .map(|(key, acc)| {
                let means = acc
                    .into_iter()
                    .map(|(sum, n)| if n == 0 { None } else { Some(sum / n as f64) })
                    .collect();
                (key, means)
            })
            .collect()
    }

    /// Frequency table of a categorical column's values within the view.
    pub fn distribution_counts(&self, column: CategoryColumn) -> BTreeMap<String, usize> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for patient in self.patients() {
            *counts.entry(column.get(patient).to_string()).or_default() += 1;
        }
        counts
    }

    /// Five-number summaries of a numeric column per group, for box plots.
    /// Groups where every cell is missing are omitted (nothing to draw).
    pub fn grouped_quartiles(
        &self,
        group: CategoryColumn,
        column: NumericColumn,
    ) -> BTreeMap<String, Quartiles> {
        let mut grouped: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for patient in self.patients() {
            if let Some(v) = column.get(patient) {
                grouped
                    .entry(group.get(patient).to_string())
                    .or_default()
                    .push(v);
            }
        }
        grouped
            .into_iter()
            .filter_map(|(key, mut values)| {
                values.sort_by(f64::total_cmp);
                Quartiles::from_sorted(&values).map(|q| (key, q))
            })
            .collect()
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Quartiles – five-number summary for box plots
// ---------------------------------------------------------------------------

/// Min, quartiles, median, max of a non-empty sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl Quartiles {
    /// Compute from an ascending-sorted slice; `None` when empty.
    /// Quartiles use linear interpolation between order statistics.
    pub fn from_sorted(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        Some(Quartiles {
            min: values[0],
            q1: quantile(values, 0.25),
            median: quantile(values, 0.5),
            q3: quantile(values, 0.75),
            max: values[values.len() - 1],
        })
    }
}

/// Linearly interpolated quantile of an ascending-sorted, non-empty slice.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

// ---------------------------------------------------------------------------
// DashboardSummary – everything one render cycle hands to the charts
// ---------------------------------------------------------------------------

/// All aggregates the dashboard consumes, recomputed from scratch after
/// every filter change. Plain values, no handles back into the view.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    // KPI row
    pub total_patients: usize,
    pub mean_recovery_days: Option<f64>,
    pub pct_high_risk: f64,
    pub pct_hospitalized: f64,

    /// Mean recovery days per COVID severity.
    pub recovery_by_severity: BTreeMap<String, Option<f64>>,
    /// Patient counts per Long COVID risk level.
    pub risk_distribution: BTreeMap<String, usize>,
    /// Mean of each symptom column ([`SYMPTOM_COLUMNS`] order) per risk level.
    pub symptoms_by_risk: BTreeMap<String, Vec<Option<f64>>>,
    /// Mean mental-health impact per risk level.
    pub mental_health_by_risk: BTreeMap<String, Option<f64>>,
    /// Recovery-days five-number summary per physical activity level.
    pub recovery_by_activity: BTreeMap<String, Quartiles>,
}

impl DashboardSummary {
    pub fn compute(view: &View<'_>) -> Self {
        let single = |group| {
            view.grouped_means(group, &[NumericColumn::DaysToRecovery])
                .into_iter()
                .map(|(key, means)| (key, means[0]))
                .collect::<BTreeMap<String, Option<f64>>>()
        };

        DashboardSummary {
            total_patients: view.count(),
            mean_recovery_days: view.mean_recovery_days(),
            pct_high_risk: view.percentage(|p| p.long_covid_risk == "High"),
            pct_hospitalized: view.percentage(|p| p.hospitalized == "Yes"),
            recovery_by_severity: single(CategoryColumn::CovidSeverity),
            risk_distribution: view.distribution_counts(CategoryColumn::LongCovidRisk),
            symptoms_by_risk: view
                .grouped_means(CategoryColumn::LongCovidRisk, &SYMPTOM_COLUMNS),
            mental_health_by_risk: view
                .grouped_means(
                    CategoryColumn::LongCovidRisk,
                    &[NumericColumn::MentalHealthImpact],
                )
                .into_iter()
                .map(|(key, means)| (key, means[0]))
                .collect(),
            recovery_by_activity: view.grouped_quartiles(
                CategoryColumn::PhysicalActivityLevel,
                NumericColumn::DaysToRecovery,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::test_support::patient;

    fn view_all(ds: &Dataset) -> Vec<usize> {
        (0..ds.len()).collect()
    }

    #[test]
    fn hospitalized_percentage_rounds_to_two_places() {
        let ds = Dataset::from_patients(vec![
            patient(30, "Female", "Mild", "Yes"),
            patient(40, "Male", "Mild", "Yes"),
            patient(50, "Female", "Severe", "No"),
        ]);
        let indices = view_all(&ds);
        let view = View::new(&ds, &indices);
        assert_eq!(view.percentage(|p| p.hospitalized == "Yes"), 66.67);
    }

    #[test]
    fn percentage_stays_within_bounds() {
        let ds = Dataset::from_patients(vec![
            patient(30, "Female", "Mild", "Yes"),
            patient(40, "Male", "Mild", "No"),
        ]);
        let indices = view_all(&ds);
        let view = View::new(&ds, &indices);
        assert_eq!(view.percentage(|_| true), 100.0);
        assert_eq!(view.percentage(|_| false), 0.0);
    }

    #[test]
    fn mean_skips_missing_cells() {
        let mut a = patient(30, "Female", "Mild", "No");
        a.days_to_recovery = Some(10.0);
        let mut b = patient(40, "Male", "Mild", "No");
        b.days_to_recovery = None;
        let mut c = patient(50, "Male", "Mild", "No");
        c.days_to_recovery = Some(30.0);

        let ds = Dataset::from_patients(vec![a, b, c]);
        let indices = view_all(&ds);
        let view = View::new(&ds, &indices);
        assert_eq!(view.mean_recovery_days(), Some(20.0));
    }

    #[test]
    fn all_missing_mean_is_none() {
        let mut a = patient(30, "Female", "Mild", "No");
        a.days_to_recovery = None;
        let ds = Dataset::from_patients(vec![a]);
        let indices = view_all(&ds);
        let view = View::new(&ds, &indices);
        assert_eq!(view.mean_recovery_days(), None);
    }

    #[test]
    fn empty_view_is_safe_for_every_kpi() {
        let ds = Dataset::from_patients(vec![patient(30, "Female", "Mild", "No")]);
        let indices: Vec<usize> = Vec::new();
        let view = View::new(&ds, &indices);
        let summary = DashboardSummary::compute(&view);

        assert_eq!(summary.total_patients, 0);
        assert_eq!(summary.mean_recovery_days, None);
        assert_eq!(summary.pct_high_risk, 0.0);
        assert_eq!(summary.pct_hospitalized, 0.0);
        assert!(summary.recovery_by_severity.is_empty());
        assert!(summary.risk_distribution.is_empty());
        assert!(summary.symptoms_by_risk.is_empty());
        assert!(summary.recovery_by_activity.is_empty());
    }

    #[test]
    fn grouped_means_partition_is_exhaustive_and_disjoint() {
        let mut rows = Vec::new();
        for (i, risk) in ["Low", "High", "Medium", "High", "Low"].iter().enumerate() {
            let mut p = patient(30 + i as i64, "Female", "Mild", "No");
            p.long_covid_risk = risk.to_string();
            rows.push(p);
        }
        let ds = Dataset::from_patients(rows);
        let indices = view_all(&ds);
        let view = View::new(&ds, &indices);

        let counts = view.distribution_counts(CategoryColumn::LongCovidRisk);
        // Every row is in exactly one group.
        assert_eq!(counts.values().sum::<usize>(), view.count());
        assert_eq!(counts["High"], 2);

        let means = view.grouped_means(CategoryColumn::LongCovidRisk, &SYMPTOM_COLUMNS);
        let group_keys: Vec<&str> = means.keys().map(String::as_str).collect();
        assert_eq!(group_keys, ["High", "Low", "Medium"]);
        for row_means in means.values() {
            assert_eq!(row_means.len(), SYMPTOM_COLUMNS.len());
        }
    }

    #[test]
    fn grouped_means_skip_missing_per_group() {
        let mut a = patient(30, "Female", "Mild", "No");
        a.long_covid_risk = "High".to_string();
        a.mental_health_impact = Some(8.0);
        let mut b = patient(40, "Male", "Mild", "No");
        b.long_covid_risk = "High".to_string();
        b.mental_health_impact = None;

        let ds = Dataset::from_patients(vec![a, b]);
        let indices = view_all(&ds);
        let view = View::new(&ds, &indices);
        let means = view.grouped_means(
            CategoryColumn::LongCovidRisk,
            &[NumericColumn::MentalHealthImpact],
        );
        assert_eq!(means["High"], [Some(8.0)]);
    }

    #[test]
    fn quartiles_interpolate_linearly() {
        let q = Quartiles::from_sorted(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(q.min, 1.0);
        assert_eq!(q.q1, 1.75);
        assert_eq!(q.median, 2.5);
        assert_eq!(q.q3, 3.25);
        assert_eq!(q.max, 4.0);

        assert_eq!(Quartiles::from_sorted(&[]), None);
        let single = Quartiles::from_sorted(&[7.0]).unwrap();
        assert_eq!(single.median, 7.0);
        assert_eq!(single.min, single.max);
    }

    #[test]
    fn grouped_quartiles_omit_all_missing_groups() {
        let mut a = patient(30, "Female", "Mild", "No");
        a.physical_activity_level = "Low".to_string();
        a.days_to_recovery = None;
        let mut b = patient(40, "Male", "Mild", "No");
        b.physical_activity_level = "High".to_string();
        b.days_to_recovery = Some(12.0);

        let ds = Dataset::from_patients(vec![a, b]);
        let indices = view_all(&ds);
        let view = View::new(&ds, &indices);
        let boxes = view.grouped_quartiles(
            CategoryColumn::PhysicalActivityLevel,
            NumericColumn::DaysToRecovery,
        );
        assert!(!boxes.contains_key("Low"));
        assert_eq!(boxes["High"].median, 12.0);
    }
}
