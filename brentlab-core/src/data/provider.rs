//! Data source trait and structured error types.
//!
//! The `DashboardSource` trait abstracts over where the three datasets come
//! from (the HTTP API or local CSV files) so front ends can swap sources and
//! tests can substitute mocks.

use thiserror::Error;

use crate::domain::{ChangePoint, EventRecord, PriceRecord};

/// Structured error types for data operations.
///
/// The TUI collapses all of these into a single empty-state rendering; the
/// CLI prints them.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("response format changed: {0}")]
    ResponseFormat(String),

    #[error("HTTP client setup failed: {0}")]
    Client(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// A provider of the three dashboard datasets.
///
/// Each read is independent; [`crate::data::fetch_snapshot`] runs them
/// concurrently and joins them.
pub trait DashboardSource: Send + Sync {
    /// Human-readable name of this source, for logs.
    fn name(&self) -> &str;

    fn fetch_prices(&self) -> Result<Vec<PriceRecord>, DataError>;

    fn fetch_change_points(&self) -> Result<Vec<ChangePoint>, DataError>;

    fn fetch_events(&self) -> Result<Vec<EventRecord>, DataError>;
}

impl<S: DashboardSource + ?Sized> DashboardSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch_prices(&self) -> Result<Vec<PriceRecord>, DataError> {
        (**self).fetch_prices()
    }

    fn fetch_change_points(&self) -> Result<Vec<ChangePoint>, DataError> {
        (**self).fetch_change_points()
    }

    fn fetch_events(&self) -> Result<Vec<EventRecord>, DataError> {
        (**self).fetch_events()
    }
}
