//! Panel 4 — Help: keyboard shortcuts.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, _app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "1-4", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "q / Ctrl+c", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Date Range");
    key(&mut lines, "s", "Edit start date (YYYY-MM-DD, empty clears)");
    key(&mut lines, "e", "Edit end date (YYYY-MM-DD, empty clears)");
    key(&mut lines, "c", "Clear both bounds");
    key(&mut lines, "Enter / Esc", "Apply / cancel the edit");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1 — Chart");
    key(&mut lines, "h / l", "Move cursor one point left / right");
    key(&mut lines, "PgUp / PgDn", "Move cursor 20 points");
    key(&mut lines, "H / L", "Jump to first / last point");
    key(&mut lines, "n / p", "Jump to next / previous change point");
    key(&mut lines, "Enter", "Show date and price of the point");
    lines.push(Line::from(""));

    section(&mut lines, "Panels 2-3 — Change Points / Events");
    key(&mut lines, "j / k", "Scroll down / up");
    key(&mut lines, "g / G", "Jump to top / bottom");

    f.render_widget(Paragraph::new(lines), area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>16}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
