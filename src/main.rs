mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui;

use app::LongviewApp;

/// The dataset is a fixed file in the working directory, read exactly once.
/// A missing file or missing column aborts startup with a clear message.
const DATA_FILE: &str = "post_covid_health_effects.csv";

fn main() -> Result<()> {
    env_logger::init();

    let dataset = data::loader::load_csv(Path::new(DATA_FILE))
        .with_context(|| format!("loading dataset '{DATA_FILE}'"))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Longview – Post-COVID Health Outcomes",
        options,
        Box::new(move |_cc| Ok(Box::new(LongviewApp::new(dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}
