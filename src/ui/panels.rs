use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::model::CategoryColumn;
use crate::state::{AppState, FILTER_COLUMNS};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: age range plus one collapsible checkbox
/// group per categorical filter column.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    age_range_controls(ui, state);
    ui.separator();

    // Clone snapshots so we can mutate state inside the loop.
    let distinct: Vec<(CategoryColumn, Vec<String>)> = FILTER_COLUMNS
        .iter()
        .map(|&col| {
            (
                col,
                state.dataset.distinct(col).iter().cloned().collect(),
            )
        })
        .collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (col, all_values) in &distinct {
                let col = *col;
                let n_selected = state.selections.get(&col).map_or(0, |s| s.len());
                let header_text =
                    format!("{}  ({}/{})", col.label(), n_selected, all_values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(col.label())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        // Select all / none buttons. "None" falls back to
                        // showing every row (empty selection = no filter).
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(col);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(col);
                            }
                        });

                        for val in all_values {
                            let mut checked = state
                                .selections
                                .get(&col)
                                .is_some_and(|s| s.contains(val));
                            if ui.checkbox(&mut checked, val.as_str()).changed() {
                                state.toggle_filter_value(col, val);
                            }
                        }
                    });
            }
        });
}

/// Age min/max sliders over the dataset's observed bounds.
fn age_range_controls(ui: &mut Ui, state: &mut AppState) {
    let (lo, hi) = state.dataset.age_bounds();
    let (mut min, mut max) = state.age_range;

    ui.strong("Age Range");
    let changed = ui
        .add(egui::Slider::new(&mut min, lo..=hi).text("Min age"))
        .changed()
        | ui.add(egui::Slider::new(&mut max, lo..=hi).text("Max age"))
            .changed();

    // An inverted range is allowed and simply matches no rows.
    if changed {
        state.set_age_range(min, max);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar: title and loaded/matching counts.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Post-COVID Health Outcomes Dashboard");
        ui.separator();
        ui.label(format!(
            "{} patients loaded, {} matching filters",
            state.dataset.len(),
            state.visible.len()
        ));
        if state.visible.is_empty() && !state.dataset.is_empty() {
            ui.separator();
            ui.label(
                RichText::new("No data for the selected filters")
                    .color(egui::Color32::YELLOW),
            );
        }
    });
}
