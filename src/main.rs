mod app;
mod chart;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::{bail, Context};
use app::FuelDashboardApp;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = config::load_config()?;

    // The dashboard cannot run without a valid dataset: fail before opening a window.
    let dataset = data::loader::load_file(&cfg.data_path)
        .with_context(|| format!("loading fuel prices from {}", cfg.data_path.display()))
        .inspect_err(|e| log::error!("{e:#}"))?;
    if dataset.is_empty() {
        bail!("{} contains no price rows", cfg.data_path.display());
    }

    let mut state = AppState::new(cfg.layout);
    state.set_dataset(Arc::new(dataset));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([cfg.window_width, cfg.window_height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        chart::DASHBOARD_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(FuelDashboardApp::new(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
