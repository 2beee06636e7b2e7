use std::path::Path;

use anyhow::{Context, Result};

use crate::color::ColorMap;
use crate::data::filter::{self, filtered_indices, FilterSelection};
use crate::data::loader::{self, LoadReport};
use crate::data::model::GameTable;
use crate::data::pipeline::{evaluate, DashboardSnapshot};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Debug, Default)]
pub struct AppState {
    /// Loaded table; replaced wholesale, never mutated.
    pub table: GameTable,

    /// Current control values.
    pub selection: FilterSelection,

    /// Output of the pipeline for `selection` (cached).
    pub snapshot: DashboardSnapshot,

    /// Indices of games passing the current filters (cached, for the table view).
    pub visible_indices: Vec<usize>,

    /// Colours per platform (area chart) and per genre (scatter, bars).
    pub platform_colors: ColorMap,
    pub genre_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(table: GameTable, selection: FilterSelection) -> Self {
        let mut state = AppState {
            selection,
            ..Default::default()
        };
        state.set_table(table);
        state
    }

    /// Ingest a newly loaded table, rebuild colours and recompute.
    pub fn set_table(&mut self, table: GameTable) {
        self.platform_colors = ColorMap::new(table.platforms());
        self.genre_colors = ColorMap::new(table.genres());
        self.table = table;
        self.status_message = None;
        self.refresh();
    }

    /// Replace the table from a file. On failure the current table stays.
    pub fn load_path(&mut self, path: &Path) -> Result<LoadReport> {
        let (table, report) = loader::load_file(path)?;
        log::info!(
            "Loaded {} games ({} dropped) from {}: {} platforms, {} genres",
            table.len(),
            report.rows_dropped,
            path.display(),
            table.platforms().len(),
            table.genres().len()
        );
        self.set_table(table);
        Ok(report)
    }

    /// Re-run the pipeline for the current selection.
    pub fn refresh(&mut self) {
        self.snapshot = evaluate(&self.table, &self.selection);
        self.visible_indices = filtered_indices(&self.table, &self.selection);
    }

    /// Apply `update` to the selection and recompute only when it changed.
    pub fn update_selection(&mut self, update: impl FnOnce(&mut FilterSelection)) {
        let before = self.selection.clone();
        update(&mut self.selection);
        if self.selection != before {
            self.refresh();
        }
    }

    pub fn toggle_platform(&mut self, platform: &str) {
        self.update_selection(|s| filter::toggle(&mut s.platforms, platform));
    }

    pub fn toggle_genre(&mut self, genre: &str) {
        self.update_selection(|s| filter::toggle(&mut s.genres, genre));
    }

    pub fn set_year_range(&mut self, first: i32, last: i32) {
        self.update_selection(|s| s.year_range = (first, last));
    }

    pub fn reset_filters(&mut self) {
        self.update_selection(|s| *s = FilterSelection::default());
    }

    /// Write the current snapshot as pretty JSON.
    pub fn export_snapshot(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.snapshot)
            .context("serializing dashboard snapshot")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing snapshot to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{record, Rating};

    fn state() -> AppState {
        AppState::new(
            GameTable::from_records(vec![
                record("PS4", "Action", 2015, 8.0, 7.5, Rating::Mature),
                record("PS4", "Action", 2016, 6.0, 6.0, Rating::Teen),
                record("Wii", "Sports", 2006, 8.0, 7.6, Rating::Everyone),
            ]),
            FilterSelection::default(),
        )
    }

    #[test]
    fn test_new_state_evaluates_whole_table() {
        let state = state();
        assert_eq!(state.snapshot.total_games, 3);
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_toggles_refresh_snapshot() {
        let mut state = state();
        state.toggle_platform("Wii");
        assert_eq!(state.snapshot.total_games, 1);
        assert_eq!(state.visible_indices, vec![2]);

        state.toggle_platform("Wii");
        state.toggle_genre("Action");
        assert_eq!(state.snapshot.total_games, 2);

        state.set_year_range(2016, 2022);
        assert_eq!(state.snapshot.total_games, 1);
        assert_eq!(state.snapshot.average_user_score, Some(6.0));

        state.reset_filters();
        assert_eq!(state.snapshot.total_games, 3);
    }

    #[test]
    fn test_degenerate_year_range_is_empty_not_error() {
        let mut state = state();
        state.set_year_range(2020, 2010);
        assert_eq!(state.snapshot, DashboardSnapshot::default());
        assert!(state.visible_indices.is_empty());
    }

    #[test]
    fn test_failed_load_keeps_current_table() {
        let mut state = state();
        assert!(state.load_path(Path::new("no/such/games.csv")).is_err());
        assert_eq!(state.table.len(), 3);
        assert_eq!(state.snapshot.total_games, 3);
    }

    #[test]
    fn test_export_snapshot_writes_json() {
        let state = state();
        let path = std::env::temp_dir().join(format!(
            "games-dashboard-snapshot-{}.json",
            std::process::id()
        ));
        state.export_snapshot(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["total_games"], 3);
        assert_eq!(value["average_rating_by_genre"][0]["genre"], "Action");
    }
}
