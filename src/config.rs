use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_DATA_PATH: &str = "data/precios_combustibles.csv";

/// Which panels the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Year selector and chart only.
    Basic,
    /// Chart plus the yearly-average cards.
    Extended,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub window_width: f32,
    pub window_height: f32,
    pub layout: Layout,
}

/// Defaults, then `config/dashboard.{toml,…}` if present, then
/// `FUEL_DASHBOARD_*` environment variables.
pub fn load_config() -> anyhow::Result<DashboardConfig> {
    build(config::Environment::with_prefix("FUEL_DASHBOARD"))
}

fn build(env: config::Environment) -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .set_default("data_path", DEFAULT_DATA_PATH)?
        .set_default("window_width", 1200.0)?
        .set_default("window_height", 800.0)?
        .set_default("layout", "extended")?
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(env)
        .build()
        .context("building dashboard configuration")?;

    settings
        .try_deserialize()
        .context("invalid dashboard configuration")
}
