//! All-or-none snapshot fetch.
//!
//! The three reads run concurrently on the rayon pool and are joined before
//! anything is returned. If any read fails the whole batch fails; callers
//! never see a partially populated snapshot.

use std::time::Instant;

use tracing::{error, info};

use super::provider::{DashboardSource, DataError};
use crate::domain::Snapshot;

pub fn fetch_snapshot<S: DashboardSource + ?Sized>(source: &S) -> Result<Snapshot, DataError> {
    let started = Instant::now();
    info!(source = source.name(), "fetching dashboard data");

    let (prices, (change_points, events)) = rayon::join(
        || source.fetch_prices(),
        || rayon::join(|| source.fetch_change_points(), || source.fetch_events()),
    );

    let snapshot = match (prices, change_points, events) {
        (Ok(prices), Ok(change_points), Ok(events)) => Snapshot {
            prices,
            change_points,
            events,
        },
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
            error!(source = source.name(), error = %e, "dashboard fetch failed");
            return Err(e);
        }
    };

    info!(
        prices = snapshot.prices.len(),
        change_points = snapshot.change_points.len(),
        events = snapshot.events.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "dashboard data ready"
    );
    Ok(snapshot)
}
