//! Overlay widgets — date range editor, point detail.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::{AppState, RangeEditor};
use crate::theme;
use crate::ui::centered_rect;

/// Date input popup for the start or end bound.
pub fn render_range_editor(f: &mut Frame, area: Rect, _app: &AppState, editor: &RangeEditor) {
    let popup = centered_rect(50, 40, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(format!(" {} ", editor.field.label()))
        .title_style(theme::accent_bold());

    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  > ", theme::accent()),
            Span::styled(editor.input.as_str(), theme::text()),
            Span::styled("_", theme::warning()),
        ]),
        Line::from(""),
        Line::from(Span::styled("  YYYY-MM-DD, leave empty to clear", theme::muted())),
        Line::from(Span::styled("  [Enter] apply  [Esc] cancel", theme::neutral())),
    ];

    f.render_widget(Paragraph::new(text).block(block), popup);
}

/// Date and price of the selected chart point.
pub fn render_point_detail(f: &mut Frame, area: Rect, app: &AppState, index: usize) {
    let Some((label, price)) = app.view.point(index) else {
        return;
    };
    let popup = centered_rect(50, 40, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::warning())
        .title(" Point Detail [Esc]close ")
        .title_style(theme::warning());

    let mut text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Clicked Date: ", theme::muted()),
            Span::styled(label.to_string(), theme::text()),
        ]),
        Line::from(vec![
            Span::styled("  Price: ", theme::muted()),
            Span::styled(format!("${price:.2}"), theme::text()),
        ]),
    ];

    if app.view.highlights.get(index).copied().flatten().is_some() {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled("  ◆ Change point", theme::highlight())));
        if let Some(cp) = app
            .snapshot
            .change_points
            .iter()
            .find(|cp| app.view.dates.get(index) == Some(&cp.change_point))
        {
            text.push(Line::from(Span::styled(
                format!("  {}", cp.event_description),
                theme::text_secondary(),
            )));
        }
    }

    f.render_widget(Paragraph::new(text).block(block), popup);
}
