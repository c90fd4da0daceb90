//! Dashboard configuration (TOML).
//!
//! ```toml
//! base_url = "http://127.0.0.1:5000"
//! timeout_secs = 30
//! match_window_days = 180
//!
//! [csv]
//! prices = "Data/BrentOilPrices.csv"
//! events = "brent_oil_price_events.csv"
//! change_points = "cp_dates.csv"
//! ```
//!
//! When a `[csv]` table is present the dashboard reads local files instead of
//! calling the API.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::matching::DEFAULT_WINDOW_DAYS;
use crate::data::{CsvSource, DashboardSource, DataError, HttpSource};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Largest accepted `match_window_days` (100 years).
pub const MAX_WINDOW_DAYS: i64 = 36_500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Backend root; the `/api/...` paths are appended.
    pub base_url: String,
    pub timeout_secs: u64,
    /// Half-width of the change-point ↔ event window for the CSV source.
    pub match_window_days: i64,
    pub csv: Option<CsvConfig>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            match_window_days: DEFAULT_WINDOW_DAYS,
            csv: None,
        }
    }
}

/// Paths of the three local datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvConfig {
    pub prices: PathBuf,
    pub events: PathBuf,
    pub change_points: PathBuf,
}

impl CsvConfig {
    /// Default file names under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        use crate::data::csv_source::{DEFAULT_CHANGE_POINTS_FILE, DEFAULT_EVENTS_FILE, DEFAULT_PRICES_FILE};
        let dir = dir.as_ref();
        Self {
            prices: dir.join(DEFAULT_PRICES_FILE),
            events: dir.join(DEFAULT_EVENTS_FILE),
            change_points: dir.join(DEFAULT_CHANGE_POINTS_FILE),
        }
    }
}

impl DashboardConfig {
    /// `<config dir>/brentlab/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("brentlab").join("config.toml"))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, DataError> {
        let config: Self = toml::from_str(content).map_err(|e| DataError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DataError> {
        if !(0..=MAX_WINDOW_DAYS).contains(&self.match_window_days) {
            return Err(DataError::Config(format!(
                "match_window_days must be between 0 and {MAX_WINDOW_DAYS}, got {}",
                self.match_window_days
            )));
        }
        Ok(())
    }

    /// Load from an explicit file. The file must exist.
    pub fn from_file(path: &Path) -> Result<Self, DataError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DataError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content).map_err(|e| match e {
            DataError::Config(msg) => DataError::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Load `explicit` if given, else the default path if it exists, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, DataError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "loading config");
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Build the configured data source: CSV when a `[csv]` table is set, HTTP otherwise.
    pub fn build_source(&self) -> Result<Box<dyn DashboardSource>, DataError> {
        match &self.csv {
            Some(csv) => Ok(Box::new(CsvSource::from_config(csv, self.match_window_days))),
            None => Ok(Box::new(HttpSource::from_config(self)?)),
        }
    }
}
