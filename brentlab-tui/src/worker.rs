//! Background fetch thread.
//!
//! The dashboard fetches its data exactly once per session. The worker runs
//! the all-or-none snapshot fetch off the UI thread and sends back a single
//! response; there is no cancellation and no retry.

use std::io;
use std::path::Path;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use brentlab_core::data::{fetch_snapshot, DashboardSource};
use brentlab_core::{DashboardConfig, Snapshot};
use tracing::{debug, error};

/// The one message the worker sends back.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    Loaded(Box<Snapshot>),
    FetchFailed { message: String },
}

/// Load the config and build its data source, logging any failure.
pub fn open_source(config_path: Option<&Path>) -> anyhow::Result<Box<dyn DashboardSource>> {
    let source = DashboardConfig::load(config_path).and_then(|config| config.build_source());
    source.map_err(|e| {
        error!(error = %e, "cannot start dashboard");
        e.into()
    })
}

/// Spawn the fetch thread for `source`.
pub fn spawn_fetch(source: Box<dyn DashboardSource>, tx: Sender<WorkerResponse>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("brentlab-fetch".into())
        .spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| fetch_snapshot(source.as_ref())));
            let response = match outcome {
                Ok(Ok(snapshot)) => WorkerResponse::Loaded(Box::new(snapshot)),
                Ok(Err(e)) => WorkerResponse::FetchFailed { message: e.to_string() },
                Err(_) => {
                    error!("data source panicked during fetch");
                    WorkerResponse::FetchFailed {
                        message: "data source panicked".into(),
                    }
                }
            };
            // The UI may already have quit; nobody to tell.
            if tx.send(response).is_err() {
                debug!("fetch finished after the UI closed");
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn config_failure_is_logged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "match_window_days = -5\n").unwrap();

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let result = tracing::subscriber::with_default(subscriber, || open_source(Some(&path)));
        assert!(result.is_err());

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("cannot start dashboard"));
        assert!(logs.contains("match_window_days"));
    }

    #[test]
    fn default_config_opens_http_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = \"http://127.0.0.1:5000\"\n").unwrap();
        let source = open_source(Some(&path)).unwrap();
        assert_eq!(source.name(), "http");
    }
}
