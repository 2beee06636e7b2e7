use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::ColorMap;
use crate::data::loader::{FIRST_YEAR, LAST_YEAR};
use crate::data::pipeline::DashboardSnapshot;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Which multi-select a checkbox list drives.
#[derive(Clone, Copy)]
enum Category {
    Platform,
    Genre,
}

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Filters");
        let reset = egui::Button::new("Reset").small();
        if ui
            .add_enabled(!state.selection.is_unrestricted(), reset)
            .clicked()
        {
            state.reset_filters();
        }
    });
    ui.separator();

    year_range(ui, state);
    ui.separator();

    // Clone what we need so we can mutate state inside the loop.
    let platforms = state.table.platforms().clone();
    let genres = state.table.genres().clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            category_filter(ui, state, Category::Platform, &platforms);
            category_filter(ui, state, Category::Genre, &genres);
        });
}

/// Two sliders bounded to the loaded year window.
fn year_range(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Year of release");
    let (mut first, mut last) = state.selection.year_range;
    let from = ui.add(egui::Slider::new(&mut first, FIRST_YEAR..=LAST_YEAR).text("from"));
    let to = ui.add(egui::Slider::new(&mut last, FIRST_YEAR..=LAST_YEAR).text("to"));
    if from.changed() || to.changed() {
        state.set_year_range(first, last);
    }
    if first > last {
        ui.label(RichText::new("Empty range").color(Color32::YELLOW));
    }
}

/// Collapsible checkbox list; nothing ticked means no restriction.
fn category_filter(ui: &mut Ui, state: &mut AppState, category: Category, all: &BTreeSet<String>) {
    let (title, selected) = match category {
        Category::Platform => ("Platform", &state.selection.platforms),
        Category::Genre => ("Genre", &state.selection.genres),
    };
    let header_text = if selected.is_empty() {
        format!("{title}  (all {})", all.len())
    } else {
        format!("{title}  ({}/{})", selected.len(), all.len())
    };
    let selected = selected.clone();

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            if ui.small_button("Clear").clicked() {
                state.update_selection(|s| match category {
                    Category::Platform => s.platforms.clear(),
                    Category::Genre => s.genres.clear(),
                });
            }

            for value in all {
                let colors: &ColorMap = match category {
                    Category::Platform => &state.platform_colors,
                    Category::Genre => &state.genre_colors,
                };
                let text = RichText::new(value).color(colors.color_for(value));

                let mut checked = selected.contains(value);
                if ui.checkbox(&mut checked, text).changed() {
                    match category {
                        Category::Platform => state.toggle_platform(value),
                        Category::Genre => state.toggle_genre(value),
                    }
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

/// The three headline numbers.
pub fn metric_cards(ui: &mut Ui, snapshot: &DashboardSnapshot) {
    ui.columns(3, |cols: &mut [Ui]| {
        metric_card(&mut cols[0], "Games", snapshot.total_games.to_string());
        metric_card(
            &mut cols[1],
            "Average user score",
            format_average(snapshot.average_user_score),
        );
        metric_card(
            &mut cols[2],
            "Average critic score",
            format_average(snapshot.average_critic_score),
        );
    });
}

fn metric_card(ui: &mut Ui, title: &str, value: String) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(title);
            ui.label(RichText::new(value).size(28.0).strong());
        });
    });
}

/// One decimal place, or a dash when nothing matched.
pub fn format_average(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}"),
        None => "—".to_string(),
    }
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
            if ui.button("Export snapshot…").clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} games loaded, {} matching",
            state.table.len(),
            state.snapshot.total_games
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open games dataset")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.load_path(&path) {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export dashboard snapshot")
        .add_filter("JSON", &["json"])
        .set_file_name("snapshot.json")
        .save_file();

    if let Some(path) = file {
        match state.export_snapshot(&path) {
            Ok(()) => log::info!("Exported snapshot to {}", path.display()),
            Err(e) => {
                log::error!("Failed to export snapshot: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_average() {
        assert_eq!(format_average(Some(7.5)), "7.5");
        assert_eq!(format_average(Some(8.0)), "8.0");
        assert_eq!(format_average(None), "—");
    }
}
