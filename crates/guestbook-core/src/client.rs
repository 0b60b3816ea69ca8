// GuestbookClient: the submit flow, the refresh loop and the host display,
// wired to one backend and one entry sink.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::backend::GuestbookBackend;
use crate::config::Config;
use crate::entry::EntryList;
use crate::refresh::RefreshLoop;
use crate::surface::{EntrySink, HostDisplay, InputSource, SubmitTrigger};

/// Result of a submission attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The input was empty; nothing happened.
    Ignored,
    /// A placeholder was shown and an append request is in flight. The
    /// handle completes once the response has been rendered (or dropped on
    /// failure).
    Submitted(JoinHandle<()>),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }
}

pub struct GuestbookClient {
    backend: Arc<dyn GuestbookBackend>,
    sink: Arc<dyn EntrySink>,
    list_key: String,
    pending_marker: String,
    page_url: String,
    refresh: RefreshLoop,
}

impl GuestbookClient {
    pub fn new(
        backend: Arc<dyn GuestbookBackend>,
        sink: Arc<dyn EntrySink>,
        config: &Config,
    ) -> Self {
        let refresh = RefreshLoop::new(
            Arc::clone(&backend),
            Arc::clone(&sink),
            config.backend.list_key.clone(),
            config.refresh.interval(),
        );
        Self {
            backend,
            sink,
            list_key: config.backend.list_key.clone(),
            pending_marker: config.display.pending_marker.clone(),
            page_url: config.backend.base_url.clone(),
            refresh,
        }
    }

    pub fn page_url(&self) -> &str {
        &self.page_url
    }

    /// Show the page URL in `host` and start the refresh loop.
    ///
    /// The host address is written here only; nothing updates it later.
    pub fn start<H: HostDisplay + ?Sized>(&mut self, host: &mut H) {
        host.set_host_address(&self.page_url);
        self.refresh.start();
        info!("Guestbook client started against {}", self.page_url);
    }

    /// Stop the refresh loop. In-flight submissions are left to finish.
    pub async fn stop(&mut self) {
        self.refresh.stop().await;
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_running()
    }

    /// Replace the displayed entries with `entries`.
    pub async fn render_entries(&self, entries: EntryList) {
        self.sink.replace_entries(entries).await;
    }

    /// Submit the current input text.
    ///
    /// Empty input is a no-op. Otherwise a placeholder is pushed, one append
    /// request is spawned, and the input is cleared without waiting for the
    /// response. A successful response replaces the whole display; a failed
    /// one leaves the placeholder for the next refresh to clean up.
    pub async fn submit_entry<I: InputSource + ?Sized>(
        &self,
        input: &mut I,
        trigger: SubmitTrigger,
    ) -> SubmitOutcome {
        if input.text().is_empty() {
            debug!(%trigger, "ignoring submit with empty input");
            return SubmitOutcome::Ignored;
        }
        let text = input.text().to_string();

        self.sink.push_placeholder(&self.pending_marker).await;

        let backend = Arc::clone(&self.backend);
        let sink = Arc::clone(&self.sink);
        let key = self.list_key.clone();
        let handle = tokio::spawn(async move {
            match backend.append(&key, &text).await {
                Ok(entries) => {
                    debug!(count = entries.len(), "append succeeded");
                    sink.replace_entries(entries).await;
                }
                Err(e) => {
                    warn!("Append to {} failed: {}", key, e);
                }
            }
        });

        input.clear();
        info!(%trigger, "Entry submitted");
        SubmitOutcome::Submitted(handle)
    }
}
