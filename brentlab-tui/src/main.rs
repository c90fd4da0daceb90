//! BrentLab TUI entry point.
//!
//! Usage: `brentlab-tui [CONFIG_PATH]`. Without a path the platform config
//! file is used when present, otherwise the built-in defaults.

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use brentlab_tui::{AppState, input, logging, ui, worker};

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Logging first, so config and client-setup failures reach the log file.
    let log_path = logging::default_log_path();
    logging::init(&log_path)?;

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let source = worker::open_source(config_path.as_deref())?;
    info!(source = source.name(), "starting dashboard");

    // Fetch once, off the UI thread.
    let (resp_tx, resp_rx) = mpsc::channel();
    let mut app = AppState::new(resp_rx, source.name());
    let _fetch_handle = worker::spawn_fetch(source, resp_tx)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal. The fetch thread is not joined: a hung request must
    // not keep the process alive after quit.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("dashboard closed");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        app.drain_worker();

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
