use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;
use crate::extractor::Separators;

const CONFIG_FILE: &str = "wikidump";
const ENV_PREFIX: &str = "WIKIDUMP";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub separators: Separators,
    pub index: IndexSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndexSettings {
    /// Log a progress line every this many articles.
    pub progress_every: u64,
    /// Commit the index every this many articles.
    pub commit_every: u64,
    pub ignore_stubs: bool,
}

impl Default for IndexSettings {
    fn default() -> Self {
        IndexSettings {
            progress_every: 50_000,
            commit_every: 250_000,
            ignore_stubs: false,
        }
    }
}

impl Settings {
    /// Defaults, then `wikidump.{toml,json,yaml,..}` if present, then
    /// `WIKIDUMP_*` variables (`WIKIDUMP_SEPARATORS__TITLE`,
    /// `WIKIDUMP_INDEX__COMMIT_EVERY`, ...).
    pub fn load() -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
