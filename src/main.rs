mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::TrackboardApp;
use eframe::egui;

/// The dataset the dashboard loads at startup. Generate one with
/// `cargo run --bin generate_sample`.
const DATASET_PATH: &str = "tracks.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let dataset = match data::loader::load_file(Path::new(DATASET_PATH)) {
        Ok(dataset) => {
            log::info!(
                "loaded {} tracks from {DATASET_PATH} ({} rows dropped)",
                dataset.len(),
                dataset.dropped_rows
            );
            dataset
        }
        Err(e) => {
            log::error!("failed to load {DATASET_PATH}: {e}");
            eprintln!("trackboard: cannot start without {DATASET_PATH}: {e}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Trackboard – Music Track Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(TrackboardApp::new(dataset)))),
    )
}
