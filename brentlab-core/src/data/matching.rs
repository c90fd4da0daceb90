//! Change-point ↔ event matching.
//!
//! Each change point is paired with the first event (in timeline order as
//! given, not sorted) whose date lies within `window_days` on either side.

use chrono::{Duration, NaiveDate};

use crate::domain::{ChangePoint, EventRecord};

/// Description attached to a change point with no event inside the window.
pub const NO_MATCH_DESCRIPTION: &str = "No matching event found";

/// Default half-width of the matching window, in days.
pub const DEFAULT_WINDOW_DAYS: i64 = 180;

/// Pair each change date with its event. A negative window matches nothing;
/// a window reaching past the calendar limits is clamped to them.
pub fn match_events(change_dates: &[NaiveDate], events: &[EventRecord], window_days: i64) -> Vec<ChangePoint> {
    let window = if window_days < 0 {
        None
    } else {
        Some(Duration::try_days(window_days).unwrap_or(Duration::MAX))
    };
    change_dates
        .iter()
        .map(|&cp| {
            let nearby = window.and_then(|w| {
                let lo = cp.checked_sub_signed(w).unwrap_or(NaiveDate::MIN);
                let hi = cp.checked_add_signed(w).unwrap_or(NaiveDate::MAX);
                events.iter().find(|e| e.date >= lo && e.date <= hi)
            });
            match nearby {
                Some(event) => ChangePoint {
                    change_point: cp,
                    event_date: Some(event.date),
                    event_description: event.description.clone(),
                },
                None => ChangePoint {
                    change_point: cp,
                    event_date: None,
                    event_description: NO_MATCH_DESCRIPTION.to_string(),
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn event(date: NaiveDate, description: &str) -> EventRecord {
        EventRecord {
            date,
            description: description.into(),
        }
    }

    #[test]
    fn first_event_in_window_wins() {
        let events = vec![
            event(d(2008, 12, 1), "OPEC cut"),
            event(d(2008, 9, 15), "Lehman collapse"),
        ];
        let matched = match_events(&[d(2008, 10, 1)], &events, DEFAULT_WINDOW_DAYS);
        assert_eq!(matched[0].event_date, Some(d(2008, 12, 1)));
        assert_eq!(matched[0].event_description, "OPEC cut");
    }

    #[test]
    fn window_edges_are_inclusive() {
        let events = vec![event(d(2020, 1, 1) + Duration::days(180), "edge")];
        let matched = match_events(&[d(2020, 1, 1)], &events, 180);
        assert_eq!(matched[0].event_description, "edge");

        let matched = match_events(&[d(2020, 1, 1)], &events, 179);
        assert_eq!(matched[0].event_date, None);
    }

    #[test]
    fn no_event_yields_placeholder() {
        let events = vec![event(d(1990, 8, 2), "Gulf War")];
        let matched = match_events(&[d(2014, 6, 20)], &events, DEFAULT_WINDOW_DAYS);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].change_point, d(2014, 6, 20));
        assert_eq!(matched[0].event_date, None);
        assert_eq!(matched[0].event_description, NO_MATCH_DESCRIPTION);
    }

    #[test]
    fn huge_window_clamps_to_calendar_limits() {
        let events = vec![event(d(1990, 8, 2), "Gulf War")];
        for window in [1_000_000_000, i64::MAX] {
            let matched = match_events(&[d(2014, 6, 20)], &events, window);
            assert_eq!(matched[0].event_date, Some(d(1990, 8, 2)));
        }
    }

    #[test]
    fn negative_window_matches_nothing() {
        let events = vec![event(d(2020, 1, 1), "same day")];
        let matched = match_events(&[d(2020, 1, 1)], &events, -1);
        assert_eq!(matched[0].event_date, None);
        assert_eq!(matched[0].event_description, NO_MATCH_DESCRIPTION);
    }

    #[test]
    fn events_before_change_point_count() {
        let events = vec![event(d(2020, 3, 1), "pandemic")];
        let matched = match_events(&[d(2020, 4, 20)], &events, DEFAULT_WINDOW_DAYS);
        assert_eq!(matched[0].event_date, Some(d(2020, 3, 1)));
    }
}
