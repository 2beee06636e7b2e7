use std::collections::BTreeMap;

use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::data::pipeline::{DashboardSnapshot, StackedSeries};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Chart row (central panel)
// ---------------------------------------------------------------------------

/// Render the three charts side by side.
pub fn charts(ui: &mut Ui, state: &AppState) {
    ui.columns(3, |cols: &mut [Ui]| {
        cols[0].strong("Releases by year and platform");
        games_by_year_platform(&mut cols[0], state);
        cols[1].strong("User vs critic score");
        user_vs_critic(&mut cols[1], state);
        cols[2].strong("Average age rating by genre");
        average_rating_by_genre(&mut cols[2], state);
    });
}

/// Stacked area: one band per platform.
fn games_by_year_platform(ui: &mut Ui, state: &AppState) {
    let stacked = state.snapshot.stacked_series();
    let layers = stack_layers(&stacked);

    Plot::new("games_by_year_platform")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Year of release")
        .y_axis_label("Games")
        .include_y(0.0)
        .show(ui, |plot_ui| {
            // Top band first so each lower band paints over the one above.
            for (platform, tops) in layers.iter().rev() {
                let points: PlotPoints = stacked
                    .years
                    .iter()
                    .zip(tops)
                    .map(|(&year, &top)| [f64::from(year), top])
                    .collect();
                let line = Line::new(points)
                    .name(platform)
                    .color(state.platform_colors.color_for(platform))
                    .fill(0.0)
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}

/// Cumulative band tops, platforms in order.
fn stack_layers(stacked: &StackedSeries) -> Vec<(String, Vec<f64>)> {
    let mut running = vec![0.0; stacked.years.len()];
    stacked
        .series
        .iter()
        .map(|(platform, counts)| {
            for (acc, &count) in running.iter_mut().zip(counts) {
                *acc += count as f64;
            }
            (platform.clone(), running.clone())
        })
        .collect()
}

/// Scatter, one point series per genre.
fn user_vs_critic(ui: &mut Ui, state: &AppState) {
    let mut by_genre: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for p in &state.snapshot.user_vs_critic {
        by_genre
            .entry(p.genre.as_str())
            .or_default()
            .push([p.user_score, p.critic_score]);
    }

    Plot::new("user_vs_critic")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("User score")
        .y_axis_label("Critic score")
        .data_aspect(1.0)
        .show(ui, |plot_ui| {
            for (genre, points) in by_genre {
                let points = Points::new(PlotPoints::from(points))
                    .name(genre)
                    .color(state.genre_colors.color_for(genre))
                    .radius(2.5);
                plot_ui.points(points);
            }
        });
}

/// Bars in genre encounter order; the x axis shows genre names.
fn average_rating_by_genre(ui: &mut Ui, state: &AppState) {
    let snapshot: &DashboardSnapshot = &state.snapshot;
    let labels: Vec<String> = snapshot
        .average_rating_by_genre
        .iter()
        .map(|g| g.genre.clone())
        .collect();

    Plot::new("average_rating_by_genre")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .y_axis_label("Mean numeric rating")
        .include_y(0.0)
        .include_y(5.0)
        .x_axis_formatter(move |mark: GridMark, _range| genre_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            for (i, g) in snapshot.average_rating_by_genre.iter().enumerate() {
                let color = state.genre_colors.color_for(&g.genre);
                let bar = Bar::new(i as f64, g.average_rating)
                    .name(&g.genre)
                    .fill(color)
                    .width(0.7);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(&g.genre).color(color));
            }
        });
}

/// Genre name for an integral grid mark, empty elsewhere.
fn genre_label(labels: &[String], value: f64) -> String {
    if value.fract() != 0.0 || value < 0.0 {
        return String::new();
    }
    labels.get(value as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_layers_accumulate() {
        let stacked = StackedSeries {
            years: vec![2014, 2015],
            series: [
                ("PS4".to_string(), vec![1, 2]),
                ("XOne".to_string(), vec![3, 0]),
            ]
            .into_iter()
            .collect(),
        };
        let layers = stack_layers(&stacked);
        assert_eq!(layers[0], ("PS4".to_string(), vec![1.0, 2.0]));
        assert_eq!(layers[1], ("XOne".to_string(), vec![4.0, 2.0]));
    }

    #[test]
    fn test_genre_label() {
        let labels = vec!["Action".to_string(), "Sports".to_string()];
        assert_eq!(genre_label(&labels, 1.0), "Sports");
        assert_eq!(genre_label(&labels, 0.5), "");
        assert_eq!(genre_label(&labels, 2.0), "");
        assert_eq!(genre_label(&labels, -1.0), "");
    }
}
