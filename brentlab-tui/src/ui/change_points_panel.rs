//! Panel 2 — Change Points: detected change dates with their matched events.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use brentlab_core::dates::format_label;

use crate::app::AppState;
use crate::theme;
use crate::ui::visible_window;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let change_points = &app.snapshot.change_points;

    if app.loading {
        let para = Paragraph::new(Span::styled("Loading change points...", theme::neutral()));
        f.render_widget(para, area);
        return;
    }
    if change_points.is_empty() {
        let para = Paragraph::new(Span::styled("No change points.", theme::muted()));
        f.render_widget(para, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::with_capacity(area.height as usize);
    lines.push(Line::from(vec![
        Span::styled(format!("{:<12}", "Change"), theme::accent_bold()),
        Span::styled(format!("{:<12}", "Event"), theme::accent_bold()),
        Span::styled("Description", theme::accent_bold()),
    ]));

    let rows = (area.height as usize).saturating_sub(1);
    let (start, end) = visible_window(change_points.len(), app.change_point_scroll, rows);

    for (i, cp) in change_points.iter().enumerate().take(end).skip(start) {
        let selected = i == app.change_point_scroll;
        let row = theme::selected_row(selected);

        // Change points outside the active range are dimmed.
        let date_style = if app.range.contains(cp.change_point) {
            theme::positive()
        } else {
            theme::muted()
        };
        let event_date = cp
            .event_date
            .map(format_label)
            .unwrap_or_else(|| "—".to_string());

        lines.push(
            Line::from(vec![
                Span::styled(format!("{:<12}", format_label(cp.change_point)), date_style),
                Span::styled(format!("{event_date:<12}"), theme::neutral()),
                Span::styled(cp.event_description.clone(), theme::text()),
            ])
            .style(row),
        );
    }

    f.render_widget(Paragraph::new(lines), area);
}
