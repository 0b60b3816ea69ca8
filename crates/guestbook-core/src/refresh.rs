// Fixed-delay refresh loop.
//
// Reads the full list, renders it on success, then waits `interval` from the
// moment the request settled before reading again. Failures are swallowed and
// the loop carries on. Only one request is ever in flight.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::backend::GuestbookBackend;
use crate::surface::EntrySink;

struct Running {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// A restartable polling task.
///
/// `start` spawns the loop, `stop` signals it and waits for it to exit.
/// Dropping a running loop aborts its task.
pub struct RefreshLoop {
    backend: Arc<dyn GuestbookBackend>,
    sink: Arc<dyn EntrySink>,
    list_key: String,
    interval: Duration,
    running: Option<Running>,
}

impl RefreshLoop {
    pub fn new(
        backend: Arc<dyn GuestbookBackend>,
        sink: Arc<dyn EntrySink>,
        list_key: impl Into<String>,
        interval: Duration,
    ) -> Self {
        Self {
            backend,
            sink,
            list_key: list_key.into(),
            interval,
            running: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Spawn the loop. The first read is issued immediately.
    ///
    /// Returns `false` (and does nothing) if the loop is already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }

        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = tokio::spawn(poll(
            Arc::clone(&self.backend),
            Arc::clone(&self.sink),
            self.list_key.clone(),
            self.interval,
            stop_rx,
        ));
        self.running = Some(Running { stop_tx, handle });
        info!(
            "Refresh loop started (key: {}, interval: {:?})",
            self.list_key, self.interval
        );
        true
    }

    /// Signal the loop to stop and wait for it to exit. An in-flight read is
    /// dropped. No-op when the loop is not running.
    pub async fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };
        let _ = running.stop_tx.send(true);
        let _ = running.handle.await;
        info!("Refresh loop stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|running| !running.handle.is_finished())
    }
}

impl Drop for RefreshLoop {
    fn drop(&mut self) {
        if let Some(running) = self.running.take() {
            running.handle.abort();
        }
    }
}

/// The loop body. Exits when `stop_rx` sees a change or its sender is gone.
async fn poll(
    backend: Arc<dyn GuestbookBackend>,
    sink: Arc<dyn EntrySink>,
    list_key: String,
    interval: Duration,
    mut stop_rx: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            biased;
            _ = stop_rx.changed() => break,
            result = backend.read_all(&list_key) => match result {
                Ok(entries) => {
                    debug!(count = entries.len(), "refresh succeeded");
                    sink.replace_entries(entries).await;
                }
                Err(e) => {
                    debug!(error = %e, "refresh failed, retrying in {:?}", interval);
                }
            },
        }

        // Reschedule on both paths, measured from settlement.
        tokio::select! {
            biased;
            _ = stop_rx.changed() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }
}
