//! Panel 1 — Chart: price line, change-point markers, cursor and key indicators.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph};
use ratatui::Frame;

use brentlab_core::DerivedView;

use crate::app::AppState;
use crate::theme;

pub const LOADING_TEXT: &str = "Loading chart data...";
pub const PRICE_SERIES: &str = "Brent Oil Price";
pub const CHANGE_POINT_SERIES: &str = "Change Points";

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(5)])
        .split(area);

    if app.loading {
        render_loading(f, chunks[0]);
    } else if app.view.is_empty() {
        render_empty(f, chunks[0]);
    } else {
        render_chart(f, chunks[0], &app.view, app.cursor);
    }

    render_indicators(f, chunks[1], app);
}

fn render_loading(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(LOADING_TEXT, theme::neutral())),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("No price data in the selected range.", theme::muted())),
        Line::from(""),
        Line::from(Span::styled(
            "Press s / e to edit the start / end date, c to clear the range.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

/// Y-axis bounds with 5% padding; a flat series gets a fixed band.
fn y_bounds(view: &DerivedView) -> (f64, f64) {
    let (min_y, max_y) = view.value_bounds().unwrap_or((0.0, 1.0));
    let range = max_y - min_y;
    let pad = if range > 0.0 { range * 0.05 } else { 1.0 };
    (min_y - pad, max_y + pad)
}

fn render_chart(f: &mut Frame, area: Rect, view: &DerivedView, cursor: usize) {
    let price_data: Vec<(f64, f64)> = view
        .values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect();

    let marker_data: Vec<(f64, f64)> = view
        .highlights
        .iter()
        .enumerate()
        .filter_map(|(i, h)| h.map(|v| (i as f64, v)))
        .collect();

    let cursor_data: Vec<(f64, f64)> = view
        .point(cursor)
        .map(|(_, v)| vec![(cursor as f64, v)])
        .unwrap_or_default();

    let (y_min, y_max) = y_bounds(view);
    let x_max = view.len().saturating_sub(1) as f64;

    let datasets = vec![
        Dataset::default()
            .name(PRICE_SERIES)
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::ACCENT))
            .data(&price_data),
        Dataset::default()
            .name(CHANGE_POINT_SERIES)
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(theme::highlight())
            .data(&marker_data),
        Dataset::default()
            .marker(symbols::Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(theme::warning())
            .data(&cursor_data),
    ];

    let first = view.labels.first().map(String::as_str).unwrap_or("");
    let middle = view.labels.get(view.len() / 2).map(String::as_str).unwrap_or("");
    let last = view.labels.last().map(String::as_str).unwrap_or("");

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::NONE)
                .style(Style::default().bg(theme::BACKGROUND)),
        )
        .legend_position(Some(LegendPosition::TopLeft))
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::styled(first.to_string(), theme::muted()),
                    Span::styled(middle.to_string(), theme::muted()),
                    Span::styled(last.to_string(), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("USD", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("${:.0}", y_min), theme::muted()),
                    Span::styled(format!("${:.0}", (y_min + y_max) / 2.0), theme::muted()),
                    Span::styled(format!("${:.0}", y_max), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

fn render_indicators(f: &mut Frame, area: Rect, app: &AppState) {
    let stats = app.view.stats;
    let mut lines = vec![
        Line::from(Span::styled("Key Indicators", theme::accent_bold())),
        Line::from(vec![
            Span::styled("  Average Price: ", theme::muted()),
            Span::styled(format!("${:.2}", stats.average), theme::text()),
            Span::styled("   Volatility: ", theme::muted()),
            Span::styled(format!("{:.2}", stats.volatility), theme::text()),
            Span::styled("   Data Points: ", theme::muted()),
            Span::styled(stats.count.to_string(), theme::text()),
        ]),
        Line::from(vec![
            Span::styled("  Change points in range: ", theme::muted()),
            Span::styled(app.view.highlight_count().to_string(), theme::highlight()),
        ]),
    ];

    if let Some((label, price)) = app.selected_point() {
        let is_marker = app
            .view
            .highlights
            .get(app.cursor)
            .copied()
            .flatten()
            .is_some();
        let mut spans = vec![
            Span::styled("  Cursor: ", theme::muted()),
            Span::styled(label.to_string(), theme::warning()),
            Span::styled(format!("  ${price:.2}"), theme::text()),
        ];
        if is_marker {
            spans.push(Span::styled("  ◆ change point", theme::highlight()));
        }
        lines.push(Line::from(spans));
    }

    let block = Block::default().borders(Borders::TOP).border_style(theme::muted());
    f.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use brentlab_core::{DateRange, PriceRecord, Snapshot};
    use chrono::NaiveDate;

    fn view_of(prices: &[f64]) -> DerivedView {
        let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let snapshot = Snapshot {
            prices: prices
                .iter()
                .enumerate()
                .map(|(i, &p)| PriceRecord::new(base + chrono::Duration::days(i as i64), p))
                .collect(),
            ..Snapshot::default()
        };
        DerivedView::compute(&snapshot, DateRange::unbounded())
    }

    #[test]
    fn y_bounds_pad_five_percent() {
        let (lo, hi) = y_bounds(&view_of(&[50.0, 150.0]));
        assert!((lo - 45.0).abs() < 1e-9);
        assert!((hi - 155.0).abs() < 1e-9);
    }

    #[test]
    fn flat_series_gets_a_band() {
        let (lo, hi) = y_bounds(&view_of(&[70.0, 70.0]));
        assert_eq!((lo, hi), (69.0, 71.0));
    }
}
