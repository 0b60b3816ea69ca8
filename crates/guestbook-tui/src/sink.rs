// EntrySink that forwards display mutations to the TUI over a channel.

use async_trait::async_trait;
use guestbook_core::entry::EntryList;
use guestbook_core::surface::EntrySink;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};

use crate::protocol::UiUpdate;

pub struct ChannelSink {
    tx: mpsc::Sender<UiUpdate>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<UiUpdate>) -> Self {
        Self { tx }
    }

    async fn send(&self, update: UiUpdate) {
        // A closed channel means the TUI is gone; nothing left to render to.
        if self.tx.send(update).await.is_err() {
            debug!("UI channel closed, dropping update");
        }
    }
}

#[async_trait]
impl EntrySink for ChannelSink {
    async fn replace_entries(&self, entries: EntryList) {
        self.send(UiUpdate::Entries(entries)).await;
    }

    /// Never waits: submissions run on the TUI task that drains this
    /// channel, so a full queue drops the placeholder instead.
    async fn push_placeholder(&self, marker: &str) {
        match self.tx.try_send(UiUpdate::Placeholder(marker.to_string())) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => warn!("UI channel full, dropping placeholder"),
            Err(TrySendError::Closed(_)) => debug!("UI channel closed, dropping update"),
        }
    }
}
