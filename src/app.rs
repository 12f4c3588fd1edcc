use eframe::egui;

use crate::data::model::TrackDataset;
use crate::state::AppState;
use crate::ui::{panels, views};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TrackboardApp {
    pub state: AppState,
}

impl TrackboardApp {
    pub fn new(dataset: TrackDataset) -> Self {
        Self {
            state: AppState::new(dataset),
        }
    }
}

impl eframe::App for TrackboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: footer, rendered for every view ----
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            panels::footer(ui);
        });

        // ---- Left side panel: view navigation ----
        egui::SidePanel::left("nav_panel")
            .default_width(170.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::nav_panel(ui, &mut self.state);
            });

        // ---- Central panel: the active view ----
        egui::CentralPanel::default().show(ctx, |ui| {
            views::active_view(ui, &mut self.state);
        });
    }
}
