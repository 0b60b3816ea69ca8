// Shared test doubles: a scripted backend, a recording sink, and simple
// input/host stand-ins.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use guestbook_core::backend::{BackendError, GuestbookBackend};
use guestbook_core::entry::EntryList;
use guestbook_core::surface::{EntrySink, HostDisplay, InputSource};
use reqwest::StatusCode;
use tokio::sync::mpsc;
use tokio::time::Instant;

// ---------------------------------------------------------------------------
// ScriptedBackend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Append { key: String, value: String },
    ReadAll { key: String },
}

#[derive(Debug, Clone)]
pub struct Call {
    pub op: Op,
    pub started: Instant,
    pub settled: Option<Instant>,
}

/// Backend that answers from queued responses after a fixed latency and
/// records every call. An empty queue answers with HTTP 503.
pub struct ScriptedBackend {
    latency: Duration,
    reads: Mutex<VecDeque<Result<EntryList, BackendError>>>,
    appends: Mutex<VecDeque<Result<EntryList, BackendError>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            reads: Mutex::new(VecDeque::new()),
            appends: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn push_read(&self, response: Result<EntryList, BackendError>) {
        self.reads.lock().unwrap().push_back(response);
    }

    pub fn push_append(&self, response: Result<EntryList, BackendError>) {
        self.appends.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn read_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c.op, Op::ReadAll { .. }))
            .collect()
    }

    pub fn append_calls(&self) -> Vec<Op> {
        self.calls()
            .into_iter()
            .map(|c| c.op)
            .filter(|op| matches!(op, Op::Append { .. }))
            .collect()
    }

    async fn answer(
        &self,
        op: Op,
        queue: &Mutex<VecDeque<Result<EntryList, BackendError>>>,
    ) -> Result<EntryList, BackendError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(Call {
                op,
                started: Instant::now(),
                settled: None,
            });
            calls.len() - 1
        };

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let response = queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unavailable()));
        self.calls.lock().unwrap()[index].settled = Some(Instant::now());
        response
    }
}

#[async_trait]
impl GuestbookBackend for ScriptedBackend {
    async fn append(&self, key: &str, value: &str) -> Result<EntryList, BackendError> {
        let op = Op::Append {
            key: key.to_string(),
            value: value.to_string(),
        };
        self.answer(op, &self.appends).await
    }

    async fn read_all(&self, key: &str) -> Result<EntryList, BackendError> {
        let op = Op::ReadAll {
            key: key.to_string(),
        };
        self.answer(op, &self.reads).await
    }
}

pub fn unavailable() -> BackendError {
    BackendError::Status {
        url: "http://backend.test/".into(),
        status: StatusCode::SERVICE_UNAVAILABLE,
    }
}

// ---------------------------------------------------------------------------
// RecordingSink
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Replaced(Vec<String>),
    Placeholder(String),
}

/// Sink that keeps a model of the displayed nodes and reports every call
/// over a channel.
pub struct RecordingSink {
    display: Mutex<Vec<String>>,
    tx: mpsc::UnboundedSender<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<SinkEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let sink = Arc::new(Self {
            display: Mutex::new(Vec::new()),
            tx,
        });
        (sink, rx)
    }

    pub fn display(&self) -> Vec<String> {
        self.display.lock().unwrap().clone()
    }
}

#[async_trait]
impl EntrySink for RecordingSink {
    async fn replace_entries(&self, entries: EntryList) {
        let nodes: Vec<String> = entries.into_iter().map(|e| e.into_string()).collect();
        *self.display.lock().unwrap() = nodes.clone();
        let _ = self.tx.send(SinkEvent::Replaced(nodes));
    }

    async fn push_placeholder(&self, marker: &str) {
        self.display.lock().unwrap().push(marker.to_string());
        let _ = self.tx.send(SinkEvent::Placeholder(marker.to_string()));
    }
}

pub fn replaced(items: &[&str]) -> SinkEvent {
    SinkEvent::Replaced(items.iter().map(|s| s.to_string()).collect())
}

// ---------------------------------------------------------------------------
// Input and host stand-ins
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TextField {
    pub value: String,
}

impl TextField {
    pub fn with_text(text: &str) -> Self {
        Self {
            value: text.to_string(),
        }
    }
}

impl InputSource for TextField {
    fn text(&self) -> &str {
        &self.value
    }

    fn clear(&mut self) {
        self.value.clear();
    }
}

/// Records every address written to it.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub writes: Vec<String>,
}

impl HostDisplay for RecordingHost {
    fn set_host_address(&mut self, address: &str) {
        self.writes.push(address.to_string());
    }
}
