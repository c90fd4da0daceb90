//! BrentLab TUI — terminal dashboard for Brent crude prices and their change points.
//!
//! Panels:
//! 1. Chart — price line with change-point markers and key indicators
//! 2. Change Points — detected change dates with matched events
//! 3. Events — event timeline
//! 4. Help — keyboard shortcuts

pub mod app;
pub mod input;
pub mod logging;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
pub use input::handle_key;
