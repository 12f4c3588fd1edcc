use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter;
use crate::data::model::{AudioFeature, TrendFeature};
use crate::state::{AppState, View, YEAR_MAX, YEAR_MIN};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// View dispatch
// ---------------------------------------------------------------------------

/// Render whichever view the sidebar currently selects.
pub fn active_view(ui: &mut Ui, state: &mut AppState) {
    match state.view {
        View::Trends => trends_view(ui, state),
        View::Recommender => recommender_view(ui, state),
        View::Insights => insights_view(ui, state),
        View::About => about_view(ui),
    }
}

// ---------------------------------------------------------------------------
// Trends
// ---------------------------------------------------------------------------

fn trends_view(ui: &mut Ui, state: &mut AppState) {
    let AppState {
        dataset,
        trends,
        genre_catalog,
        genre_colors,
        ..
    } = state;

    ui.heading("📊 Trends Over Time");
    ui.add_space(4.0);

    panels::genre_multiselect(ui, "trends_genres", genre_catalog, genre_colors, &mut trends.genres);

    egui::ComboBox::from_label("Feature to plot")
        .selected_text(trends.feature.label())
        .show_ui(ui, |ui: &mut Ui| {
            for feature in TrendFeature::ALL {
                ui.selectable_value(&mut trends.feature, feature, feature.label());
            }
        });

    ui.add(egui::Slider::new(&mut trends.year_start, YEAR_MIN..=YEAR_MAX).text("From year"));
    ui.add(egui::Slider::new(&mut trends.year_end, YEAR_MIN..=YEAR_MAX).text("To year"));

    // Splitting needs a genre column to group on.
    ui.add_enabled(
        dataset.has_genre,
        egui::Checkbox::new(&mut trends.split_by_genre, "Split by genre"),
    );

    ui.add_space(4.0);
    plot::trend_chart(ui, dataset, trends, genre_colors);
}

// ---------------------------------------------------------------------------
// Recommender
// ---------------------------------------------------------------------------

fn recommender_view(ui: &mut Ui, state: &mut AppState) {
    let AppState {
        dataset,
        recommender,
        genre_catalog,
        genre_colors,
        ..
    } = state;

    ui.heading("🎧 Song Recommender");
    ui.add_space(4.0);

    panels::genre_multiselect(
        ui,
        "recommender_genres",
        genre_catalog,
        genre_colors,
        &mut recommender.genres,
    );

    ui.add(egui::Slider::new(&mut recommender.danceability, 0.0..=1.0).text("Danceability"));
    ui.add(egui::Slider::new(&mut recommender.energy, 0.0..=1.0).text("Energy"));

    ui.add_space(8.0);
    ui.strong("Top 10 Recommended Songs");
    ui.add_space(4.0);

    let hits = filter::recommend(
        dataset,
        &recommender.genres,
        recommender.danceability,
        recommender.energy,
    );

    if hits.is_empty() {
        ui.label("No matching tracks. Widen the genre selection or move the sliders.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::remainder())
        .column(Column::remainder())
        .column(Column::auto())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Name");
            });
            header.col(|ui| {
                ui.strong("Artists");
            });
            header.col(|ui| {
                ui.strong("Popularity");
            });
        })
        .body(|mut body| {
            for track in hits {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&track.name);
                    });
                    row.col(|ui| {
                        ui.label(&track.artists);
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.0}", track.popularity));
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Insights
// ---------------------------------------------------------------------------

fn insights_view(ui: &mut Ui, state: &mut AppState) {
    let AppState {
        dataset, insights, ..
    } = state;

    ui.heading("📈 Data Insights");
    ui.label("Explore relationships between popularity and song features.");
    ui.add_space(4.0);

    // Both panels always run over the whole dataset; the other views'
    // filters do not apply here.
    let panel_height = ((ui.available_height() - 120.0) / 2.0).max(160.0);

    egui::ComboBox::from_label("Compare with popularity")
        .selected_text(insights.scatter_feature.label())
        .show_ui(ui, |ui: &mut Ui| {
            for feature in AudioFeature::ALL {
                ui.selectable_value(&mut insights.scatter_feature, feature, feature.label());
            }
        });
    plot::scatter_chart(ui, dataset, insights.scatter_feature, panel_height);

    ui.add_space(8.0);
    ui.strong("Feature Distribution");

    egui::ComboBox::from_label("Feature to view")
        .selected_text(insights.hist_feature.label())
        .show_ui(ui, |ui: &mut Ui| {
            for feature in AudioFeature::ALL {
                ui.selectable_value(&mut insights.hist_feature, feature, feature.label());
            }
        });
    plot::histogram_chart(ui, dataset, insights.hist_feature, panel_height);
}

// ---------------------------------------------------------------------------
// About
// ---------------------------------------------------------------------------

fn about_view(ui: &mut Ui) {
    ui.heading("📖 About This Dashboard");
    ui.add_space(8.0);

    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.strong("About this app");
        ui.add_space(4.0);
        ui.label(
            "Trackboard helps you explore music track data, inspect how song \
             characteristics evolve over time and get simple recommendations. \
             You can:",
        );
        ui.add_space(4.0);
        ui.label("  📊  View how features like popularity, energy and danceability change over time.");
        ui.label("  🎧  Filter songs by genre and get tailored recommendations.");
        ui.label("  📈  Analyze relationships between audio features and popularity.");
        ui.add_space(4.0);
        ui.horizontal(|ui: &mut Ui| {
            ui.label("🔗");
            ui.hyperlink_to("Built on egui", "https://github.com/emilk/egui");
        });
    });
}
