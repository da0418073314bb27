use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://mfstaj.cs.bilkent.edu.tr/visitor/";
const DEFAULT_DELAY_MS: i64 = 100;
const DEFAULT_LISTING_PATH: &str = "data/first.csv";
const DEFAULT_DETAIL_PATH: &str = "data/second.csv";

/// Runtime settings, overridable through `MFSTAJ_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub base_url: String,
    pub delay_ms: u64,
    /// Written by `list`, read back by `details`.
    pub listing_path: PathBuf,
    pub detail_path: PathBuf,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_source(Environment::with_prefix("MFSTAJ").try_parsing(true))
    }

    fn from_source(env: Environment) -> Result<Self> {
        Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("delay_ms", DEFAULT_DELAY_MS)?
            .set_default("listing_path", DEFAULT_LISTING_PATH)?
            .set_default("detail_path", DEFAULT_DETAIL_PATH)?
            .add_source(env)
            .build()?
            .try_deserialize()
            .context("Invalid MFSTAJ_* settings")
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}
