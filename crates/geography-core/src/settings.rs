// crates/geography-core/src/settings.rs

//! Configuration file (`options.json`) and environment overrides.
//!
//! ```json
//! {
//!   "source": { "countries": "https://davidmegginson.github.io/ourairports-data/countries.csv" },
//!   "database": "data/geography.bin",
//!   "max-results": 250,
//!   "server": { "bind": "0.0.0.0:8090" }
//! }
//! ```
//!
//! Every key is optional. The legacy `*-url` source keys are accepted as
//! aliases. `GEOGRAPHY_DATABASE`, `GEOGRAPHY_MAX_RESULTS` and `GEOGRAPHY_BIND`
//! override the file.

use crate::error::{GeoError, Result};
use crate::import::Entity;
use crate::store::DEFAULT_MAX_RESULTS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const ENV_DATABASE: &str = "GEOGRAPHY_DATABASE";
pub const ENV_MAX_RESULTS: &str = "GEOGRAPHY_MAX_RESULTS";
pub const ENV_BIND: &str = "GEOGRAPHY_BIND";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub source: SourceSettings,
    /// Snapshot file.
    pub database: PathBuf,
    pub max_results: usize,
    pub server: ServerSettings,
}

/// Location of each CSV source: a local path or an `http(s)://` URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SourceSettings {
    #[serde(alias = "countries-url")]
    pub countries: String,
    #[serde(alias = "regions-url")]
    pub regions: String,
    #[serde(alias = "airports-url")]
    pub airports: String,
    #[serde(alias = "runways-url")]
    pub runways: String,
    #[serde(alias = "frequencies-url")]
    pub frequencies: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            source: SourceSettings::default(),
            database: PathBuf::from("data/geography.bin"),
            max_results: DEFAULT_MAX_RESULTS,
            server: ServerSettings::default(),
        }
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        SourceSettings {
            countries: "data/countries.csv".to_owned(),
            regions: "data/regions.csv".to_owned(),
            airports: "data/airports.csv".to_owned(),
            runways: "data/runways.csv".to_owned(),
            frequencies: "data/airport-frequencies.csv".to_owned(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            bind: "0.0.0.0:8090".to_owned(),
        }
    }
}

impl SourceSettings {
    pub fn location(&self, entity: Entity) -> &str {
        match entity {
            Entity::Country => &self.countries,
            Entity::Region => &self.regions,
            Entity::Airport => &self.airports,
            Entity::Runway => &self.runways,
            Entity::Frequency => &self.frequencies,
        }
    }
}

impl Settings {
    /// Reads `path`; a missing or malformed file is a `Config` error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| GeoError::Config(format!("cannot read {}: {e}", path.display())))?;
        let settings: Settings = serde_json::from_str(&text)
            .map_err(|e| GeoError::Config(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), "settings loaded");
        settings.with_env()
    }

    /// `path` if given, else `./options.json` when present, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None if Path::new("options.json").exists() => Self::load("options.json"),
            None => Settings::default().with_env(),
        }
    }

    /// Applies `GEOGRAPHY_*` environment overrides.
    pub fn with_env(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(db) = var(ENV_DATABASE) {
            self.database = PathBuf::from(db);
        }
        if let Some(max) = var(ENV_MAX_RESULTS) {
            self.max_results = max.trim().parse().map_err(|_| {
                GeoError::Config(format!("{ENV_MAX_RESULTS} must be a positive number, got '{max}'"))
            })?;
        }
        if let Some(bind) = var(ENV_BIND) {
            self.server.bind = bind;
        }
        if self.max_results == 0 {
            return Err(GeoError::Config("max-results must be at least 1".to_owned()));
        }
        Ok(self)
    }
}
