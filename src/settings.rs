use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

const DEFAULT_DB_PATH: &str = "data/infotext.sqlite";

/// Runtime settings: defaults, then `infotext.toml`, then `INFOTEXT_*` env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub db_path: PathBuf,
    pub log_filter: String,
    pub batch_size: usize,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Config::builder()
            .set_default("db_path", DEFAULT_DB_PATH)?
            .set_default("log_filter", "info")?
            .set_default("batch_size", 500)?
            .add_source(File::with_name("infotext").required(false))
            .add_source(Environment::with_prefix("INFOTEXT"))
            .build()
            .context("Failed to load settings")?
            .try_deserialize()
            .context("Invalid settings")
    }
}
