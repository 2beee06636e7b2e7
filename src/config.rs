use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use crate::data::filter::FilterSelection;

/// Interactive dashboard over a video-game sales/ratings CSV.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Games CSV (columns: Name, Platform, Year_of_Release, Genre,
    /// User_Score, Critic_Score, Rating).
    #[arg(default_value = "games.csv")]
    pub data: PathBuf,

    /// Optional JSON file with window size and initial filters.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Settings read from `--config`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub window_width: f32,
    pub window_height: f32,
    /// Filters applied when the dashboard opens.
    #[serde(flatten)]
    pub initial_selection: FilterSelection,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            window_width: 1280.0,
            window_height: 860.0,
            initial_selection: FilterSelection::default(),
        }
    }
}

impl DashboardConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Resolve the config for this run: defaults unless `--config` is given.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        match &cli.config {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::from_json("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.initial_selection.year_range, (2000, 2022));
    }

    #[test]
    fn test_initial_selection_fields() {
        let config = DashboardConfig::from_json(
            r#"{"window_width": 900, "platforms": ["PS4", "XOne"], "year_range": [2010, 2015]}"#,
        )
        .unwrap();
        assert_eq!(config.window_width, 900.0);
        assert_eq!(config.window_height, 860.0);
        assert!(config.initial_selection.platforms.contains("XOne"));
        assert!(config.initial_selection.genres.is_empty());
        assert_eq!(config.initial_selection.year_range, (2010, 2015));
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(DashboardConfig::from_json(r#"{"year_range": "2010"}"#).is_err());
        assert!(DashboardConfig::load(Path::new("no/such/config.json")).is_err());
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["games-dashboard"]);
        assert_eq!(cli.data, PathBuf::from("games.csv"));
        assert!(cli.config.is_none());

        let cli = Cli::parse_from(["games-dashboard", "data/vg.csv", "--config", "dash.json"]);
        assert_eq!(cli.data, PathBuf::from("data/vg.csv"));
        assert_eq!(cli.config, Some(PathBuf::from("dash.json")));
    }
}
