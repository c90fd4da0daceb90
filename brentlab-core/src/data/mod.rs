//! Data sources and the all-or-none snapshot fetch.

pub mod csv_source;
pub mod gateway;
pub mod http;
pub mod matching;
pub mod provider;
pub mod wire;

pub use csv_source::CsvSource;
pub use gateway::fetch_snapshot;
pub use http::HttpSource;
pub use matching::{match_events, NO_MATCH_DESCRIPTION};
pub use provider::{DashboardSource, DataError};
