//! Top-level UI layout — header, active panel, status bar, overlays.

pub mod change_points_panel;
pub mod chart_panel;
pub mod events_panel;
pub mod help_panel;
pub mod overlays;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Overlay, Panel};
use crate::theme;

pub const TITLE: &str = "Brent Oil Change Point Dashboard";

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: 1-line header + main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let header_area = chunks[0];
    let main_area = chunks[1];
    let status_area = chunks[2];

    draw_header(f, header_area, app);
    draw_panel(f, main_area, app);
    status_bar::render(f, status_area, app);

    match &app.overlay {
        Overlay::RangeEditor(editor) => overlays::render_range_editor(f, main_area, app, editor),
        Overlay::PointDetail(idx) => overlays::render_point_detail(f, main_area, app, *idx),
        Overlay::None => {}
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &AppState) {
    let line = Line::from(vec![
        Span::styled(format!(" {TITLE} "), theme::accent_bold()),
        Span::styled(" Range: ", theme::muted()),
        Span::styled(app.range.to_string(), theme::text()),
        Span::styled(format!("  [{}]", app.source_name), theme::text_secondary()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Draw the active panel with its border.
fn draw_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let panel = app.active_panel;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match panel {
        Panel::Chart => chart_panel::render(f, inner, app),
        Panel::ChangePoints => change_points_panel::render(f, inner, app),
        Panel::Events => events_panel::render(f, inner, app),
        Panel::Help => help_panel::render(f, inner, app),
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Visible window `[start, end)` of `len` rows that keeps `selected` on screen.
pub fn visible_window(len: usize, selected: usize, height: usize) -> (usize, usize) {
    if height == 0 || len == 0 {
        return (0, 0);
    }
    let start = if selected >= height { selected + 1 - height } else { 0 };
    (start, (start + height).min(len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_follows_selection() {
        assert_eq!(visible_window(100, 0, 10), (0, 10));
        assert_eq!(visible_window(100, 9, 10), (0, 10));
        assert_eq!(visible_window(100, 10, 10), (1, 11));
        assert_eq!(visible_window(5, 4, 10), (0, 5));
        assert_eq!(visible_window(0, 0, 10), (0, 0));
    }

    #[test]
    fn centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, area);
        assert!(popup.x >= area.x && popup.right() <= area.right());
        assert!(popup.y >= area.y && popup.bottom() <= area.bottom());
        assert_eq!(popup.width, 60);
    }
}
