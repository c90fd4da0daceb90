//! BrentLab Core — domain types, date normalisation, derived-data pipeline, data sources.
//!
//! This crate contains everything the dashboard front ends share:
//! - Domain records (prices, change points, events, date ranges, summary stats)
//! - Date normalisation for the mixed formats the backend emits
//! - The derived-data pipeline (range filter, change-point alignment, stats)
//! - Data sources behind the `DashboardSource` trait (HTTP API, local CSV)
//! - Configuration loading and series export

pub mod config;
pub mod data;
pub mod dates;
pub mod domain;
pub mod export;
pub mod pipeline;

pub use config::DashboardConfig;
pub use data::{fetch_snapshot, DashboardSource, DataError};
pub use domain::{ChangePoint, DateRange, EventRecord, PriceRecord, Snapshot, SummaryStats};
pub use pipeline::{align_change_points, compute_stats, filter_by_range, DerivedView};
