//! Panel 3 — Events: the timeline of dated geopolitical and economic events.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use brentlab_core::dates::format_label;

use crate::app::AppState;
use crate::theme;
use crate::ui::visible_window;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let events = &app.snapshot.events;

    if app.loading {
        let para = Paragraph::new(Span::styled("Loading events...", theme::neutral()));
        f.render_widget(para, area);
        return;
    }
    if events.is_empty() {
        let para = Paragraph::new(Span::styled("No events.", theme::muted()));
        f.render_widget(para, area);
        return;
    }

    let (start, end) = visible_window(events.len(), app.event_scroll, area.height as usize);
    let lines: Vec<Line> = events
        .iter()
        .enumerate()
        .take(end)
        .skip(start)
        .map(|(i, event)| {
            Line::from(vec![
                Span::styled(format_label(event.date), theme::neutral()),
                Span::styled(": ", theme::muted()),
                Span::styled(event.description.clone(), theme::text()),
            ])
            .style(theme::selected_row(i == app.event_scroll))
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}
