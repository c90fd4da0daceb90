//! Wire records for the three API endpoints and their conversion to domain types.
//!
//! Dates arrive as strings in whatever format the backend produced. Records
//! whose date (or price) cannot be read are dropped here with a warning
//! rather than failing the whole batch.

use serde::Deserialize;
use tracing::warn;

use crate::dates::parse_date;
use crate::domain::{ChangePoint, EventRecord, PriceRecord};

/// `GET /api/prices` element.
#[derive(Debug, Clone, Deserialize)]
pub struct WirePrice {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Price")]
    pub price: Option<f64>,
}

/// `GET /api/change-points` element.
#[derive(Debug, Clone, Deserialize)]
pub struct WireChangePoint {
    pub change_point: String,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub event_description: String,
}

/// `GET /api/events` element.
#[derive(Debug, Clone, Deserialize)]
pub struct WireEvent {
    pub date: String,
    #[serde(default)]
    pub description: String,
}

pub fn decode_prices(raw: Vec<WirePrice>) -> Vec<PriceRecord> {
    let total = raw.len();
    let records: Vec<PriceRecord> = raw
        .into_iter()
        .filter_map(|w| match (parse_date(&w.date), w.price) {
            (Some(date), Some(price)) if price.is_finite() => Some(PriceRecord { date, price }),
            _ => {
                warn!(date = %w.date, price = ?w.price, "dropping unreadable price record");
                None
            }
        })
        .collect();
    log_dropped("price", total, records.len());
    records
}

pub fn decode_change_points(raw: Vec<WireChangePoint>) -> Vec<ChangePoint> {
    let total = raw.len();
    let records: Vec<ChangePoint> = raw
        .into_iter()
        .filter_map(|w| {
            let Some(change_point) = parse_date(&w.change_point) else {
                warn!(change_point = %w.change_point, "dropping change point with unreadable date");
                return None;
            };
            let event_date = w.event_date.as_deref().and_then(|s| {
                let parsed = parse_date(s);
                if parsed.is_none() {
                    warn!(event_date = %s, "ignoring unreadable event date on change point");
                }
                parsed
            });
            Some(ChangePoint {
                change_point,
                event_date,
                event_description: w.event_description,
            })
        })
        .collect();
    log_dropped("change point", total, records.len());
    records
}

pub fn decode_events(raw: Vec<WireEvent>) -> Vec<EventRecord> {
    let total = raw.len();
    let records: Vec<EventRecord> = raw
        .into_iter()
        .filter_map(|w| match parse_date(&w.date) {
            Some(date) => Some(EventRecord {
                date,
                description: w.description,
            }),
            None => {
                warn!(date = %w.date, "dropping event with unreadable date");
                None
            }
        })
        .collect();
    log_dropped("event", total, records.len());
    records
}

fn log_dropped(kind: &str, total: usize, kept: usize) {
    if kept < total {
        warn!(kind, total, kept, "some records were dropped during decoding");
    }
}
