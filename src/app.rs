use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GamesDashboardApp {
    pub state: AppState,
}

impl GamesDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for GamesDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, matching games ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::metric_cards(ui, &self.state.snapshot);
            ui.add_space(8.0);
            plot::charts(ui, &self.state);
            ui.add_space(8.0);
            egui::CollapsingHeader::new("Matching games")
                .default_open(false)
                .show(ui, |ui| {
                    table::games_table(ui, &self.state);
                });
        });
    }
}
