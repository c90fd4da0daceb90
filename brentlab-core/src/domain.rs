//! Domain records shared by the pipeline, the data sources and the front ends.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub price: f64,
}

impl PriceRecord {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// A detected structural break in the price series, with the nearest annotated event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePoint {
    pub change_point: NaiveDate,
    /// `None` when no event lies inside the matching window.
    pub event_date: Option<NaiveDate>,
    pub event_description: String,
}

/// An entry on the independent event timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub date: NaiveDate,
    pub description: String,
}

/// User-selected date filter. Both bounds are inclusive; `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// The range with no bounds.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Inclusive membership test. An inverted range contains nothing.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let start = self
            .start
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "…".into());
        let end = self
            .end
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "…".into());
        write!(f, "{start} → {end}")
    }
}

/// Mean, population standard deviation and size of the filtered price set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub average: f64,
    pub volatility: f64,
    pub count: usize,
}

/// The three raw collections, fetched together and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub prices: Vec<PriceRecord>,
    pub change_points: Vec<ChangePoint>,
    pub events: Vec<EventRecord>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty() && self.change_points.is_empty() && self.events.is_empty()
    }
}
