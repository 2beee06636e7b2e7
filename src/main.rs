mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::Context;
use app::GamesDashboardApp;
use clap::Parser;
use config::{Cli, DashboardConfig};
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = DashboardConfig::from_cli(&cli)?;

    // No dashboard without data: a load failure aborts startup.
    let (table, report) = data::loader::load_file(&cli.data).inspect_err(|e| {
        log::error!("Failed to load dataset: {e:#}");
    })?;
    log::info!(
        "Loaded {} games ({} of {} rows dropped) from {}: {} platforms, {} genres",
        table.len(),
        report.rows_dropped,
        report.rows_read,
        cli.data.display(),
        table.platforms().len(),
        table.genres().len()
    );

    if table.is_empty() {
        log::warn!("No games left after cleaning; the dashboard will be empty");
    }

    let state = AppState::new(table, config.initial_selection);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Games Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(GamesDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running dashboard window")
}
