//! All-or-none semantics of the snapshot fetch, using in-memory sources.

use std::sync::atomic::{AtomicUsize, Ordering};

use brentlab_core::data::{fetch_snapshot, DashboardSource, DataError};
use brentlab_core::{ChangePoint, EventRecord, PriceRecord};
use chrono::NaiveDate;

#[derive(Clone, Copy, PartialEq)]
enum Failing {
    Nothing,
    Prices,
    ChangePoints,
    Events,
}

struct MockSource {
    failing: Failing,
    calls: AtomicUsize,
}

impl MockSource {
    fn new(failing: Failing) -> Self {
        Self {
            failing,
            calls: AtomicUsize::new(0),
        }
    }

    fn fail_if(&self, which: Failing) -> Result<(), DataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing == which {
            Err(DataError::NetworkUnreachable("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, day).unwrap()
}

impl DashboardSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    fn fetch_prices(&self) -> Result<Vec<PriceRecord>, DataError> {
        self.fail_if(Failing::Prices)?;
        Ok(vec![PriceRecord::new(d(1), 68.0), PriceRecord::new(d(2), 68.5)])
    }

    fn fetch_change_points(&self) -> Result<Vec<ChangePoint>, DataError> {
        self.fail_if(Failing::ChangePoints)?;
        Ok(vec![ChangePoint {
            change_point: d(2),
            event_date: Some(d(1)),
            event_description: "OPEC meeting".into(),
        }])
    }

    fn fetch_events(&self) -> Result<Vec<EventRecord>, DataError> {
        self.fail_if(Failing::Events)?;
        Ok(vec![EventRecord {
            date: d(1),
            description: "OPEC meeting".into(),
        }])
    }
}

#[test]
fn all_three_reads_populate_the_snapshot() {
    let source = MockSource::new(Failing::Nothing);
    let snapshot = fetch_snapshot(&source).unwrap();

    assert_eq!(snapshot.prices.len(), 2);
    assert_eq!(snapshot.change_points.len(), 1);
    assert_eq!(snapshot.events.len(), 1);
    assert_eq!(source.calls.load(Ordering::SeqCst), 3);
}

#[test]
fn any_single_failure_fails_the_batch() {
    for failing in [Failing::Prices, Failing::ChangePoints, Failing::Events] {
        let source = MockSource::new(failing);
        let result = fetch_snapshot(&source);
        assert!(matches!(result, Err(DataError::NetworkUnreachable(_))));
        // Every read is still issued; none are cancelled.
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }
}

#[test]
fn boxed_source_fetches_through_the_trait_object() {
    let source: Box<dyn DashboardSource> = Box::new(MockSource::new(Failing::Nothing));
    let snapshot = fetch_snapshot(&source).unwrap();
    assert_eq!(snapshot.events[0].description, "OPEC meeting");
}
