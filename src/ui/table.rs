use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Matching games table
// ---------------------------------------------------------------------------

/// One row per game passing the current filters.
pub fn games_table(ui: &mut Ui, state: &AppState) {
    let records = state.table.records();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::remainder().at_least(160.0))
        .columns(Column::auto().at_least(60.0), 6)
        .header(ROW_HEIGHT + 2.0, |mut header| {
            for title in ["Name", "Platform", "Year", "Genre", "User", "Critic", "Rating"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.visible_indices.len(), |mut row| {
                let rec = &records[state.visible_indices[row.index()]];
                row.col(|ui| {
                    ui.label(rec.name.as_str());
                });
                row.col(|ui| {
                    ui.label(rec.platform.as_str());
                });
                row.col(|ui| {
                    ui.label(rec.year_of_release.to_string());
                });
                row.col(|ui| {
                    ui.label(rec.genre.as_str());
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", rec.user_score));
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", rec.critic_score));
                });
                row.col(|ui| {
                    ui.label(rec.rating.code());
                });
            });
        });
}
