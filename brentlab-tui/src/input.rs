//! Keyboard input dispatch — overlays → global keys → panel-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use brentlab_core::dates::{format_label, parse_iso};

use crate::app::{AppState, Overlay, Panel, RangeEditor, RangeField, DATE_INPUT_LEN};

/// Points moved by PageUp / PageDown on the chart.
const PAGE_STEP: isize = 20;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::RangeEditor(_) => {
            handle_range_editor(app, key);
            return;
        }
        Overlay::PointDetail(_) => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => { app.active_panel = Panel::Chart; return; }
        KeyCode::Char('2') => { app.active_panel = Panel::ChangePoints; return; }
        KeyCode::Char('3') => { app.active_panel = Panel::Events; return; }
        KeyCode::Char('4') => { app.active_panel = Panel::Help; return; }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('s') => {
            open_range_editor(app, RangeField::Start);
            return;
        }
        KeyCode::Char('e') => {
            open_range_editor(app, RangeField::End);
            return;
        }
        KeyCode::Char('c') => {
            app.clear_range();
            app.set_status("Date range cleared");
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Chart => handle_chart_key(app, key),
        Panel::ChangePoints => {
            let len = app.snapshot.change_points.len();
            scroll(&mut app.change_point_scroll, len, key);
        }
        Panel::Events => {
            let len = app.snapshot.events.len();
            scroll(&mut app.event_scroll, len, key);
        }
        Panel::Help => {}
    }
}

fn open_range_editor(app: &mut AppState, field: RangeField) {
    let input = app.bound(field).map(format_label).unwrap_or_default();
    app.overlay = Overlay::RangeEditor(RangeEditor { field, input });
}

fn handle_range_editor(app: &mut AppState, key: KeyEvent) {
    let Overlay::RangeEditor(editor) = &mut app.overlay else {
        return;
    };

    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
        }
        KeyCode::Enter => {
            let field = editor.field;
            let input = editor.input.trim().to_string();
            app.overlay = Overlay::None;
            commit_bound(app, field, &input);
        }
        KeyCode::Backspace => {
            editor.input.pop();
        }
        KeyCode::Char(c) if (c.is_ascii_digit() || c == '-') && editor.input.len() < DATE_INPUT_LEN => {
            editor.input.push(c);
        }
        _ => {}
    }
}

/// Apply an edited bound. Empty clears it; an unparseable entry leaves it unchanged.
fn commit_bound(app: &mut AppState, field: RangeField, input: &str) {
    if input.is_empty() {
        app.set_bound(field, None);
        app.set_status(format!("{} cleared", field.label()));
        return;
    }
    match parse_iso(input) {
        Some(date) => {
            app.set_bound(field, Some(date));
            app.set_status(format!(
                "{} set to {} ({} points)",
                field.label(),
                format_label(date),
                app.view.stats.count
            ));
        }
        None => {
            app.set_warning(format!("Invalid date '{input}', expected YYYY-MM-DD"));
        }
    }
}

fn handle_chart_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.move_cursor(-1),
        KeyCode::Char('l') | KeyCode::Right => app.move_cursor(1),
        KeyCode::PageUp => app.move_cursor(-PAGE_STEP),
        KeyCode::PageDown => app.move_cursor(PAGE_STEP),
        KeyCode::Char('H') | KeyCode::Home => app.cursor_to_start(),
        KeyCode::Char('L') | KeyCode::End => app.cursor_to_end(),
        KeyCode::Char('n') => app.jump_to_change_point(true),
        KeyCode::Char('p') => app.jump_to_change_point(false),
        KeyCode::Enter => app.select_point(),
        _ => {}
    }
}

fn scroll(offset: &mut usize, len: usize, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if *offset + 1 < len {
                *offset += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            *offset = offset.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => *offset = 0,
        KeyCode::Char('G') | KeyCode::End => *offset = len.saturating_sub(1),
        _ => {}
    }
}
