//! Derived-data pipeline: raw snapshot + date range → chart-ready view.
//!
//! Every function here is pure. The front ends call [`DerivedView::compute`]
//! whenever the snapshot or the range changes, so the statistics can never
//! describe a stale filter.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::dates::format_label;
use crate::domain::{ChangePoint, DateRange, PriceRecord, Snapshot, SummaryStats};

/// Keep the records whose date lies inside `range` (inclusive), preserving order.
pub fn filter_by_range(records: &[PriceRecord], range: &DateRange) -> Vec<PriceRecord> {
    records
        .iter()
        .filter(|r| range.contains(r.date))
        .copied()
        .collect()
}

/// Price at each record that coincides with a change point, `None` elsewhere.
///
/// The output is parallel to `records`.
pub fn align_change_points(records: &[PriceRecord], change_points: &[ChangePoint]) -> Vec<Option<f64>> {
    let marked: HashSet<NaiveDate> = change_points.iter().map(|cp| cp.change_point).collect();
    records
        .iter()
        .map(|r| marked.contains(&r.date).then_some(r.price))
        .collect()
}

/// Mean and population standard deviation. An empty slice yields all zeros.
pub fn compute_stats(values: &[f64]) -> SummaryStats {
    let count = values.len();
    let divisor = count.max(1) as f64;
    let average = values.iter().sum::<f64>() / divisor;
    let variance = values.iter().map(|v| (v - average).powi(2)).sum::<f64>() / divisor;
    SummaryStats {
        average,
        volatility: variance.sqrt(),
        count,
    }
}

/// Everything the chart and the key-indicator block need for one range.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DerivedView {
    pub range: DateRange,
    /// `YYYY-MM-DD` labels, one per filtered record.
    pub labels: Vec<String>,
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
    /// Sparse change-point series parallel to `values`.
    pub highlights: Vec<Option<f64>>,
    pub stats: SummaryStats,
}

impl DerivedView {
    pub fn compute(snapshot: &Snapshot, range: DateRange) -> Self {
        let filtered = filter_by_range(&snapshot.prices, &range);
        let highlights = align_change_points(&filtered, &snapshot.change_points);
        let dates: Vec<NaiveDate> = filtered.iter().map(|r| r.date).collect();
        let values: Vec<f64> = filtered.iter().map(|r| r.price).collect();
        let stats = compute_stats(&values);

        Self {
            range,
            labels: dates.iter().copied().map(format_label).collect(),
            dates,
            values,
            highlights,
            stats,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Label and price of the data point at `index` (the chart click handler).
    pub fn point(&self, index: usize) -> Option<(&str, f64)> {
        let label = self.labels.get(index)?;
        let value = self.values.get(index)?;
        Some((label.as_str(), *value))
    }

    /// Number of filtered records that carry a change-point marker.
    pub fn highlight_count(&self) -> usize {
        self.highlights.iter().filter(|h| h.is_some()).count()
    }

    /// Lowest and highest price in the view, `None` when empty.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        if self.values.is_empty() {
            return None;
        }
        let min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn three_days() -> Vec<PriceRecord> {
        vec![
            PriceRecord::new(d(2020, 1, 1), 61.0),
            PriceRecord::new(d(2020, 1, 2), 63.5),
            PriceRecord::new(d(2020, 1, 3), 62.25),
        ]
    }

    fn cp(date: NaiveDate) -> ChangePoint {
        ChangePoint {
            change_point: date,
            event_date: None,
            event_description: "No matching event found".into(),
        }
    }

    #[test]
    fn unbounded_filter_is_identity() {
        let records = three_days();
        assert_eq!(filter_by_range(&records, &DateRange::unbounded()), records);
    }

    #[test]
    fn start_only_filter() {
        let range = DateRange::new(Some(d(2020, 1, 2)), None);
        let filtered = filter_by_range(&three_days(), &range);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].date, d(2020, 1, 2));
        assert_eq!(filtered[1].date, d(2020, 1, 3));
    }

    #[test]
    fn inverted_range_yields_empty() {
        let range = DateRange::new(Some(d(2020, 1, 3)), Some(d(2020, 1, 1)));
        assert!(filter_by_range(&three_days(), &range).is_empty());
    }

    #[test]
    fn stats_of_empty_set_are_zero() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.average, 0.0);
        assert_eq!(stats.volatility, 0.0);
        assert_eq!(stats.count, 0);
    }

    #[test]
    fn stats_use_population_stddev() {
        let stats = compute_stats(&[10.0, 20.0, 30.0]);
        assert!((stats.average - 20.0).abs() < 1e-12);
        assert!((stats.volatility - 8.164_965_809_277_26).abs() < 1e-9);
        assert_eq!(stats.count, 3);
    }

    #[test]
    fn single_value_has_zero_volatility() {
        let stats = compute_stats(&[72.5]);
        assert_eq!(stats.average, 72.5);
        assert_eq!(stats.volatility, 0.0);
    }

    #[test]
    fn alignment_marks_matching_dates_only() {
        let records = vec![
            PriceRecord::new(d(2020, 1, 1), 61.0),
            PriceRecord::new(d(2020, 1, 2), 63.5),
        ];
        let aligned = align_change_points(&records, &[cp(d(2020, 1, 2))]);
        assert_eq!(aligned, vec![None, Some(63.5)]);
    }

    #[test]
    fn alignment_without_change_points_is_all_none() {
        let aligned = align_change_points(&three_days(), &[]);
        assert_eq!(aligned, vec![None, None, None]);
    }

    #[test]
    fn change_point_outside_filter_is_ignored() {
        let range = DateRange::new(Some(d(2020, 1, 2)), None);
        let filtered = filter_by_range(&three_days(), &range);
        let aligned = align_change_points(&filtered, &[cp(d(2020, 1, 1))]);
        assert_eq!(aligned, vec![None, None]);
    }

    #[test]
    fn derived_view_end_to_end() {
        let snapshot = Snapshot {
            prices: three_days(),
            change_points: vec![cp(d(2020, 1, 3))],
            events: vec![],
        };
        let view = DerivedView::compute(&snapshot, DateRange::new(Some(d(2020, 1, 2)), None));

        assert_eq!(view.len(), 2);
        assert_eq!(view.stats.count, 2);
        assert_eq!(view.labels, vec!["2020-01-02", "2020-01-03"]);
        assert_eq!(view.highlights, vec![None, Some(62.25)]);
        assert_eq!(view.highlight_count(), 1);
        assert!((view.stats.average - 62.875).abs() < 1e-12);
    }

    #[test]
    fn point_lookup() {
        let snapshot = Snapshot {
            prices: three_days(),
            ..Snapshot::default()
        };
        let view = DerivedView::compute(&snapshot, DateRange::unbounded());
        assert_eq!(view.point(1), Some(("2020-01-02", 63.5)));
        assert_eq!(view.point(3), None);
    }

    #[test]
    fn value_bounds() {
        let snapshot = Snapshot {
            prices: three_days(),
            ..Snapshot::default()
        };
        let view = DerivedView::compute(&snapshot, DateRange::unbounded());
        assert_eq!(view.value_bounds(), Some((61.0, 63.5)));
        assert_eq!(DerivedView::default().value_bounds(), None);
    }
}
