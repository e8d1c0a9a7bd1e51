use std::collections::{BTreeMap, BTreeSet};

use crate::color::ColorMap;
use crate::data::filter::{filtered_indices, FilterCriteria, Selection};
use crate::data::model::{CategoryColumn, Dataset, SYMPTOM_COLUMNS};
use crate::data::summary::{DashboardSummary, View};

/// The columns exposed as multi-select filters in the sidebar.
pub const FILTER_COLUMNS: [CategoryColumn; 3] = [
    CategoryColumn::Gender,
    CategoryColumn::CovidSeverity,
    CategoryColumn::Hospitalized,
];

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// `dataset` is loaded once in `main` and never replaced; everything else is
/// derived from the filter controls and rebuilt by [`AppState::refilter`].
pub struct AppState {
    /// The immutable dataset loaded at startup.
    pub dataset: Dataset,

    /// Inclusive age-range control, clamped to the dataset's observed bounds.
    pub age_range: (i64, i64),

    /// Per-column checkbox selections. An empty set means "select all"
    /// (resolved through [`Selection::from_set`]), never "hide everything".
    pub selections: BTreeMap<CategoryColumn, BTreeSet<String>>,

    /// Indices of patients passing the current filters.
    pub visible: Vec<usize>,

    /// Aggregates for the current filtered view.
    pub summary: DashboardSummary,

    /// Stable colours for Long COVID risk categories.
    pub risk_colors: ColorMap,

    /// Stable colours for the stacked symptom series.
    pub symptom_colors: ColorMap,
}

impl AppState {
    /// Initialise with every value selected and the full age range.
    pub fn new(dataset: Dataset) -> Self {
        let selections: BTreeMap<CategoryColumn, BTreeSet<String>> = FILTER_COLUMNS
            .iter()
            .map(|&col| (col, dataset.distinct(col).clone()))
            .collect();

        let visible = filtered_indices(&dataset, &FilterCriteria::all(&dataset));
        let summary = DashboardSummary::compute(&View::new(&dataset, &visible));
        let risk_colors = ColorMap::new(dataset.distinct(CategoryColumn::LongCovidRisk));
        let symptom_colors =
            ColorMap::from_labels(SYMPTOM_COLUMNS.iter().map(|c| c.label()));
        AppState {
            age_range: dataset.age_bounds(),
            dataset,
            selections,
            visible,
            summary,
            risk_colors,
            symptom_colors,
        }
    }

    /// The sidebar state as a filter value object.
    pub fn criteria(&self) -> FilterCriteria {
        let selection = |col: CategoryColumn| {
            Selection::from_set(self.selections.get(&col).cloned().unwrap_or_default())
        };
        FilterCriteria {
            age_range: self.age_range,
            genders: selection(CategoryColumn::Gender),
            severities: selection(CategoryColumn::CovidSeverity),
            hospitalized: selection(CategoryColumn::Hospitalized),
        }
    }

    /// Recompute the filtered view and its aggregates. One render cycle's
    /// worth of work, run synchronously after any control change.
    pub fn refilter(&mut self) {
        let criteria = self.criteria();
        self.visible = filtered_indices(&self.dataset, &criteria);
        let view = View::new(&self.dataset, &self.visible);
        self.summary = DashboardSummary::compute(&view);
        log::debug!(
            "refilter: {} of {} patients match",
            self.visible.len(),
            self.dataset.len()
        );
    }

    /// Toggle a single value in a column's selection.
    pub fn toggle_filter_value(&mut self, column: CategoryColumn, value: &str) {
        let selected = self.selections.entry(column).or_default();
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
    }

    /// Select all values in a column.
    pub fn select_all(&mut self, column: CategoryColumn) {
        let all = self.dataset.distinct(column).clone();
        self.selections.insert(column, all);
        self.refilter();
    }

    /// Deselect all values in a column. By the empty-means-all policy this
    /// shows every row, matching the original dashboard's behaviour.
    pub fn select_none(&mut self, column: CategoryColumn) {
        self.selections.insert(column, BTreeSet::new());
        self.refilter();
    }

    /// Set the age range, normalising the control order.
    pub fn set_age_range(&mut self, min: i64, max: i64) {
        self.age_range = (min, max);
        self.refilter();
    }
}
