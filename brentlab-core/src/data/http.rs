//! HTTP data source.
//!
//! Reads the three datasets from the dashboard backend with plain GETs: no
//! request body, no auth headers, no retries. Any failure is returned as-is
//! so the caller can abandon the whole batch.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::provider::{DashboardSource, DataError};
use super::wire::{decode_change_points, decode_events, decode_prices, WireChangePoint, WireEvent, WirePrice};
use crate::config::DashboardConfig;
use crate::domain::{ChangePoint, EventRecord, PriceRecord};

pub const PRICES_PATH: &str = "/api/prices";
pub const CHANGE_POINTS_PATH: &str = "/api/change-points";
pub const EVENTS_PATH: &str = "/api/events";

/// Dashboard backend reached over HTTP.
pub struct HttpSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DataError::Client(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self, DataError> {
        Self::new(config.base_url.clone(), Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DataError> {
        let url = self.endpoint(path);
        debug!(%url, "GET");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DataError::NetworkUnreachable(format!("{url}: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DataError::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        let body = resp
            .text()
            .map_err(|e| DataError::NetworkUnreachable(format!("{url}: {e}")))?;

        serde_json::from_str(&body).map_err(|e| DataError::ResponseFormat(format!("{url}: {e}")))
    }
}

impl DashboardSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch_prices(&self) -> Result<Vec<PriceRecord>, DataError> {
        let raw: Vec<WirePrice> = self.get_json(PRICES_PATH)?;
        let prices = decode_prices(raw);
        info!(count = prices.len(), "fetched prices");
        Ok(prices)
    }

    fn fetch_change_points(&self) -> Result<Vec<ChangePoint>, DataError> {
        let raw: Vec<WireChangePoint> = self.get_json(CHANGE_POINTS_PATH)?;
        let change_points = decode_change_points(raw);
        info!(count = change_points.len(), "fetched change points");
        Ok(change_points)
    }

    fn fetch_events(&self) -> Result<Vec<EventRecord>, DataError> {
        let raw: Vec<WireEvent> = self.get_json(EVENTS_PATH)?;
        let events = decode_events(raw);
        info!(count = events.len(), "fetched events");
        Ok(events)
    }
}
