use std::collections::BTreeSet;

use anyhow::Context as _;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::GenreColorMap;
use crate::data::model::ALL_GENRES;
use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Left side panel – navigation
// ---------------------------------------------------------------------------

/// Render the sidebar navigation radio. Exactly one view is active.
pub fn nav_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.heading("🎵 Navigation");
    ui.separator();

    for view in View::ALL {
        ui.radio_value(&mut state.view, view, view.label());
    }
}

// ---------------------------------------------------------------------------
// Genre multi-select
// ---------------------------------------------------------------------------

/// Render the shared genre multi-select: a collapsible checkbox list over
/// the fixed catalog, with quick All / None buttons. "All" is a catalog
/// entry of its own and means "no genre filter applied".
pub fn genre_multiselect(
    ui: &mut Ui,
    id: &str,
    catalog: &[String],
    colors: &GenreColorMap,
    selected: &mut BTreeSet<String>,
) {
    let header_text = format!("Genres  ({}/{})", selected.len(), catalog.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(id)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    selected.clear();
                    selected.insert(ALL_GENRES.to_string());
                }
                if ui.small_button("None").clicked() {
                    selected.clear();
                }
            });

            ScrollArea::vertical()
                .id_salt(id)
                .max_height(220.0)
                .show(ui, |ui: &mut Ui| {
                    for genre in catalog {
                        let mut text = RichText::new(genre);
                        if genre != ALL_GENRES {
                            text = text.color(colors.color_for(genre));
                        }

                        let mut checked = selected.contains(genre);
                        if ui.checkbox(&mut checked, text).changed() {
                            if checked {
                                selected.insert(genre.clone());
                            } else {
                                selected.remove(genre);
                            }
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} tracks loaded, {} rows dropped",
            state.dataset.len(),
            state.dataset.dropped_rows
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Footer
// ---------------------------------------------------------------------------

/// Fixed footer, rendered every frame below whichever view is active.
pub fn footer(ui: &mut Ui) {
    ui.add_space(2.0);
    ui.horizontal(|ui: &mut Ui| {
        ui.with_layout(
            egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
            |ui: &mut Ui| {
                ui.horizontal(|ui: &mut Ui| {
                    ui.label("🎵 Trackboard");
                    ui.label("·");
                    ui.label("explore trends, recommendations and insights");
                    ui.label("·");
                    ui.hyperlink_to("made with egui", "https://github.com/emilk/egui");
                });
            },
        );
    });
    ui.add_space(2.0);
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Pick a new dataset file and swap it in. A failed load keeps the current
/// dataset and surfaces the error in the top bar.
pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open track data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        let loaded = crate::data::loader::load_file(&path)
            .with_context(|| format!("loading {}", path.display()));
        match loaded {
            Ok(dataset) => {
                log::info!(
                    "loaded {} tracks ({} rows dropped) from {}",
                    dataset.len(),
                    dataset.dropped_rows,
                    path.display()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
