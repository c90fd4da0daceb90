//! Application state — single-owner, main-thread only.
//!
//! Raw data, the selected range and the loading flag are independent cells.
//! Every setter that touches the snapshot or the range recomputes the derived
//! view before returning, so the chart and the key indicators always describe
//! the current filter.

use std::sync::mpsc::{Receiver, TryRecvError};

use chrono::NaiveDate;
use tracing::{error, info};

use brentlab_core::{DateRange, DerivedView, Snapshot};

use crate::worker::WorkerResponse;

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Chart,
    ChangePoints,
    Events,
    Help,
}

impl Panel {
    pub const COUNT: usize = 4;

    pub fn index(self) -> usize {
        match self {
            Panel::Chart => 0,
            Panel::ChangePoints => 1,
            Panel::Events => 2,
            Panel::Help => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Chart),
            1 => Some(Panel::ChangePoints),
            2 => Some(Panel::Events),
            3 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Chart => "Chart",
            Panel::ChangePoints => "Change Points",
            Panel::Events => "Events",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % Self::COUNT).unwrap_or(Panel::Chart)
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + Self::COUNT - 1) % Self::COUNT).unwrap_or(Panel::Chart)
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
}

/// Which end of the range the editor is changing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeField {
    Start,
    End,
}

impl RangeField {
    pub fn label(self) -> &'static str {
        match self {
            RangeField::Start => "Start Date",
            RangeField::End => "End Date",
        }
    }
}

/// Text-entry state for one range bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeEditor {
    pub field: RangeField,
    pub input: String,
}

/// Maximum length of a `YYYY-MM-DD` entry.
pub const DATE_INPUT_LEN: usize = 10;

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    RangeEditor(RangeEditor),
    /// Index into the derived view.
    PointDetail(usize),
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,
    pub overlay: Overlay,

    // Raw data, fetched once
    pub snapshot: Snapshot,
    pub loading: bool,

    // Selection and derived data
    pub range: DateRange,
    pub view: DerivedView,
    pub cursor: usize,

    // List scrolling
    pub change_point_scroll: usize,
    pub event_scroll: usize,

    pub status_message: Option<(String, StatusLevel)>,
    pub source_name: String,

    pub worker_rx: Receiver<WorkerResponse>,
}

impl AppState {
    pub fn new(worker_rx: Receiver<WorkerResponse>, source_name: impl Into<String>) -> Self {
        Self {
            active_panel: Panel::Chart,
            running: true,
            overlay: Overlay::None,
            snapshot: Snapshot::default(),
            loading: true,
            range: DateRange::unbounded(),
            view: DerivedView::default(),
            cursor: 0,
            change_point_scroll: 0,
            event_scroll: 0,
            status_message: None,
            source_name: source_name.into(),
            worker_rx,
        }
    }

    // ── Worker responses ─────────────────────────────────────────────

    /// Drain pending worker responses without blocking.
    pub fn drain_worker(&mut self) {
        loop {
            match self.worker_rx.try_recv() {
                Ok(resp) => self.apply_response(resp),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // The fetch thread died without answering.
                    if self.loading {
                        error!("fetch worker exited without a response");
                        self.set_snapshot(Snapshot::default());
                    }
                    break;
                }
            }
        }
    }

    pub fn apply_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::Loaded(snapshot) => {
                info!(
                    prices = snapshot.prices.len(),
                    change_points = snapshot.change_points.len(),
                    events = snapshot.events.len(),
                    "dashboard populated"
                );
                self.set_snapshot(*snapshot);
                self.set_status(format!("Loaded {} price points", self.snapshot.prices.len()));
            }
            WorkerResponse::FetchFailed { message } => {
                error!(error = %message, "data fetch failed");
                // All-or-none: nothing from the failed batch is kept.
                self.set_snapshot(Snapshot::default());
            }
        }
    }

    fn set_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
        self.loading = false;
        self.change_point_scroll = 0;
        self.event_scroll = 0;
        self.recompute();
    }

    // ── Range ────────────────────────────────────────────────────────

    pub fn set_range(&mut self, range: DateRange) {
        self.range = range;
        self.recompute();
    }

    pub fn set_start(&mut self, start: Option<NaiveDate>) {
        self.set_range(DateRange::new(start, self.range.end));
    }

    pub fn set_end(&mut self, end: Option<NaiveDate>) {
        self.set_range(DateRange::new(self.range.start, end));
    }

    pub fn clear_range(&mut self) {
        self.set_range(DateRange::unbounded());
    }

    pub fn bound(&self, field: RangeField) -> Option<NaiveDate> {
        match field {
            RangeField::Start => self.range.start,
            RangeField::End => self.range.end,
        }
    }

    pub fn set_bound(&mut self, field: RangeField, value: Option<NaiveDate>) {
        match field {
            RangeField::Start => self.set_start(value),
            RangeField::End => self.set_end(value),
        }
    }

    fn recompute(&mut self) {
        self.view = DerivedView::compute(&self.snapshot, self.range);
        self.cursor = self.cursor.min(self.view.len().saturating_sub(1));
        if let Overlay::PointDetail(i) = self.overlay {
            if i >= self.view.len() {
                self.overlay = Overlay::None;
            }
        }
    }

    // ── Cursor ───────────────────────────────────────────────────────

    pub fn move_cursor(&mut self, delta: isize) {
        if self.view.is_empty() {
            self.cursor = 0;
            return;
        }
        let last = self.view.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    pub fn cursor_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_to_end(&mut self) {
        self.cursor = self.view.len().saturating_sub(1);
    }

    /// Jump to the next (or previous) change-point marker from the cursor.
    pub fn jump_to_change_point(&mut self, forward: bool) {
        let found = if forward {
            self.view
                .highlights
                .iter()
                .enumerate()
                .skip(self.cursor + 1)
                .find(|(_, h)| h.is_some())
                .map(|(i, _)| i)
        } else {
            self.view.highlights[..self.cursor.min(self.view.len())]
                .iter()
                .rposition(|h| h.is_some())
        };
        if let Some(i) = found {
            self.cursor = i;
        }
    }

    /// Label and price under the cursor.
    pub fn selected_point(&self) -> Option<(&str, f64)> {
        self.view.point(self.cursor)
    }

    /// The chart click handler: open the detail overlay for the cursor point.
    pub fn select_point(&mut self) {
        if self.view.point(self.cursor).is_some() {
            self.overlay = Overlay::PointDetail(self.cursor);
        }
    }

    // ── Status ───────────────────────────────────────────────────────

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
