//! Local CSV data source.
//!
//! Reads the same files the dashboard backend loads (price history, event
//! annotations, detected change-point dates) so the dashboard can run with
//! no backend at all. Change points are paired with events using the same
//! window rule the backend applies.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{info, warn};

use super::matching::{match_events, DEFAULT_WINDOW_DAYS};
use super::provider::{DashboardSource, DataError};
use super::wire::{decode_events, decode_prices, WireEvent, WirePrice};
use crate::config::CsvConfig;
use crate::dates::parse_date;
use crate::domain::{ChangePoint, EventRecord, PriceRecord};

pub const DEFAULT_PRICES_FILE: &str = "BrentOilPrices.csv";
pub const DEFAULT_EVENTS_FILE: &str = "brent_oil_price_events.csv";
pub const DEFAULT_CHANGE_POINTS_FILE: &str = "cp_dates.csv";

#[derive(Debug, Deserialize)]
struct ChangeDateRow {
    #[serde(rename = "Change_dates")]
    change_date: String,
}

/// Dashboard datasets read from CSV files on disk.
#[derive(Debug, Clone)]
pub struct CsvSource {
    prices: PathBuf,
    events: PathBuf,
    change_points: PathBuf,
    window_days: i64,
}

impl CsvSource {
    pub fn new(prices: impl Into<PathBuf>, events: impl Into<PathBuf>, change_points: impl Into<PathBuf>) -> Self {
        Self {
            prices: prices.into(),
            events: events.into(),
            change_points: change_points.into(),
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    /// All three files under one directory, with their default names.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(
            dir.join(DEFAULT_PRICES_FILE),
            dir.join(DEFAULT_EVENTS_FILE),
            dir.join(DEFAULT_CHANGE_POINTS_FILE),
        )
    }

    pub fn from_config(config: &CsvConfig, window_days: i64) -> Self {
        Self::new(&config.prices, &config.events, &config.change_points).with_window_days(window_days)
    }

    pub fn with_window_days(mut self, window_days: i64) -> Self {
        self.window_days = window_days;
        self
    }

    pub fn window_days(&self) -> i64 {
        self.window_days
    }
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| DataError::Csv(format!("{}: {e}", path.display())))?;

    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| DataError::Csv(format!("{}: {e}", path.display())))
}

impl DashboardSource for CsvSource {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch_prices(&self) -> Result<Vec<PriceRecord>, DataError> {
        let rows: Vec<WirePrice> = read_rows(&self.prices)?;
        let prices = decode_prices(rows);
        info!(count = prices.len(), path = %self.prices.display(), "loaded prices");
        Ok(prices)
    }

    fn fetch_change_points(&self) -> Result<Vec<ChangePoint>, DataError> {
        let rows: Vec<ChangeDateRow> = read_rows(&self.change_points)?;
        let dates: Vec<_> = rows
            .iter()
            .filter_map(|row| {
                let parsed = parse_date(&row.change_date);
                if parsed.is_none() {
                    warn!(change_date = %row.change_date, "dropping unreadable change-point date");
                }
                parsed
            })
            .collect();

        let events = self.fetch_events()?;
        let change_points = match_events(&dates, &events, self.window_days);
        info!(
            count = change_points.len(),
            matched = change_points.iter().filter(|cp| cp.event_date.is_some()).count(),
            "loaded change points"
        );
        Ok(change_points)
    }

    fn fetch_events(&self) -> Result<Vec<EventRecord>, DataError> {
        let rows: Vec<WireEvent> = read_rows(&self.events)?;
        let events = decode_events(rows);
        info!(count = events.len(), path = %self.events.display(), "loaded events");
        Ok(events)
    }
}
