use eframe::egui::{ScrollArea, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot};

use crate::color::ColorMap;
use crate::data::model::SYMPTOM_COLUMNS;
use crate::data::summary::DashboardSummary;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – KPI row and charts
// ---------------------------------------------------------------------------

/// Render the dashboard body from the current summary.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let summary = &state.summary;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            kpi_row(ui, summary);
            ui.separator();

            ui.columns(2, |cols: &mut [Ui]| {
                cols[0].strong("COVID Severity vs Recovery Time");
                severity_recovery_chart(&mut cols[0], summary);

                cols[1].strong("Long COVID Risk Distribution");
                risk_distribution_chart(&mut cols[1], summary, &state.risk_colors);
            });
            ui.separator();

            ui.columns(2, |cols: &mut [Ui]| {
                cols[0].strong("Symptoms by Long COVID Risk");
                symptoms_chart(&mut cols[0], summary, &state.symptom_colors);

                cols[1].strong("Mental Health Impact vs Long COVID Risk");
                mental_health_chart(&mut cols[1], summary, &state.risk_colors);
            });
            ui.separator();

            ui.strong("Physical Activity vs Recovery Time");
            activity_box_plot(ui, summary);
        });
}

// ---------------------------------------------------------------------------
// KPI row
// ---------------------------------------------------------------------------

fn kpi_row(ui: &mut Ui, summary: &DashboardSummary) {
    ui.columns(4, |cols: &mut [Ui]| {
        kpi(&mut cols[0], "Total Patients", summary.total_patients.to_string());
        kpi(&mut cols[1], "Avg Recovery Days", format_days(summary.mean_recovery_days));
        kpi(
            &mut cols[2],
            "High Long COVID Risk %",
            format!("{}%", summary.pct_high_risk),
        );
        kpi(
            &mut cols[3],
            "Hospitalized %",
            format!("{}%", summary.pct_hospitalized),
        );
    });
}

fn kpi(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.small(label);
        ui.heading(value);
    });
}

/// "–" when the view is empty or every recovery value is missing.
fn format_days(mean: Option<f64>) -> String {
    match mean {
        Some(v) => format!("{v:.1}"),
        None => "–".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

fn severity_recovery_chart(ui: &mut Ui, summary: &DashboardSummary) {
    let entries: Vec<(String, f64)> = summary
        .recovery_by_severity
        .iter()
        .map(|(label, mean)| (label.clone(), mean.unwrap_or(0.0)))
        .collect();
    category_bar_chart(ui, "severity_recovery", "Avg Recovery Days", entries, None);
}

fn risk_distribution_chart(ui: &mut Ui, summary: &DashboardSummary, colors: &ColorMap) {
    let entries: Vec<(String, f64)> = summary
        .risk_distribution
        .iter()
        .map(|(label, count)| (label.clone(), *count as f64))
        .collect();
    category_bar_chart(ui, "risk_distribution", "Patients", entries, Some(colors));
}

fn mental_health_chart(ui: &mut Ui, summary: &DashboardSummary, colors: &ColorMap) {
    let entries: Vec<(String, f64)> = summary
        .mental_health_by_risk
        .iter()
        .map(|(label, mean)| (label.clone(), mean.unwrap_or(0.0)))
        .collect();
    category_bar_chart(
        ui,
        "mental_health_by_risk",
        "Mental Health Impact",
        entries,
        Some(colors),
    );
}

/// Stacked bars: one series per symptom column, one bar cluster per risk
/// level, stacked via accumulated base offsets.
fn symptoms_chart(ui: &mut Ui, summary: &DashboardSummary, colors: &ColorMap) {
    let labels: Vec<String> = summary.symptoms_by_risk.keys().cloned().collect();
    let mut offsets = vec![0.0f64; labels.len()];
    let mut charts: Vec<BarChart> = Vec::new();

    for (series, symptom) in SYMPTOM_COLUMNS.iter().enumerate() {
        let mut bars = Vec::new();
        for (i, means) in summary.symptoms_by_risk.values().enumerate() {
            let height = means[series].unwrap_or(0.0);
            bars.push(
                Bar::new(i as f64, height)
                    .width(0.6)
                    .base_offset(offsets[i])
                    .name(&labels[i]),
            );
            offsets[i] += height;
        }
        charts.push(
            BarChart::new(bars)
                .name(symptom.label())
                .color(colors.color_for(symptom.label())),
        );
    }

    show_bar_charts(ui, "symptoms_by_risk", labels, "Average Severity", charts);
}

fn activity_box_plot(ui: &mut Ui, summary: &DashboardSummary) {
    let labels: Vec<String> = summary.recovery_by_activity.keys().cloned().collect();
    let boxes: Vec<BoxElem> = summary
        .recovery_by_activity
        .values()
        .enumerate()
        .map(|(i, q)| {
            BoxElem::new(i as f64, BoxSpread::new(q.min, q.q1, q.median, q.q3, q.max))
                .name(&labels[i])
                .box_width(0.5)
        })
        .collect();
    let plot = BoxPlot::new(boxes).name("Days to Recovery");

    Plot::new("activity_recovery")
        .legend(Legend::default())
        .height(280.0)
        .y_axis_label("Days to Recovery")
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .show(ui, |plot_ui| plot_ui.box_plot(plot));
}

// ---------------------------------------------------------------------------
// Plot helpers
// ---------------------------------------------------------------------------

/// Single-series bar chart over category labels.
fn category_bar_chart(
    ui: &mut Ui,
    id: &str,
    series_name: &str,
    entries: Vec<(String, f64)>,
    colors: Option<&ColorMap>,
) {
    let labels: Vec<String> = entries.iter().map(|(label, _)| label.clone()).collect();
    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let mut bar = Bar::new(i as f64, *value).width(0.6).name(label);
            if let Some(cm) = colors {
                bar = bar.fill(cm.color_for(label));
            }
            bar
        })
        .collect();
    let chart = BarChart::new(bars).name(series_name);

    show_bar_charts(ui, id, labels, series_name, vec![chart]);
}

/// A bar plot with category labels on the x axis and interactions disabled;
/// charts here are pure read-outs of the current filter state.
fn show_bar_charts(
    ui: &mut Ui,
    id: &str,
    labels: Vec<String>,
    y_label: &str,
    charts: Vec<BarChart>,
) {
    Plot::new(id.to_string())
        .legend(Legend::default())
        .height(240.0)
        .y_axis_label(y_label.to_string())
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// Label for integer grid positions; fractional marks get no label.
fn category_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 0.05 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}
