// GuestbookClient: startup, the submit flow, and how submit responses and
// refresh responses share the display.

mod support;

use std::sync::Arc;
use std::time::Duration;

use guestbook_core::client::{GuestbookClient, SubmitOutcome};
use guestbook_core::config::Config;
use guestbook_core::entry::entry_list;
use guestbook_core::surface::{InputSource, SubmitTrigger};

use support::{
    replaced, unavailable, Op, RecordingHost, RecordingSink, ScriptedBackend, SinkEvent,
    TextField,
};

fn client(backend: &Arc<ScriptedBackend>, sink: &Arc<RecordingSink>) -> GuestbookClient {
    GuestbookClient::new(backend.clone(), sink.clone(), &Config::default())
}

#[tokio::test]
async fn submit_shows_placeholder_appends_once_and_replaces_display() {
    let backend = Arc::new(ScriptedBackend::new());
    backend.push_append(Ok(entry_list(["earlier", "hello"])));
    let (sink, mut events) = RecordingSink::new();
    let client = client(&backend, &sink);

    client.render_entries(entry_list(["earlier"])).await;
    assert_eq!(events.recv().await.unwrap(), replaced(&["earlier"]));

    let mut input = TextField::with_text("hello");
    let outcome = client.submit_entry(&mut input, SubmitTrigger::Enter).await;

    // Placeholder and cleared input happen before the response arrives.
    assert_eq!(
        events.try_recv().unwrap(),
        SinkEvent::Placeholder("...".into())
    );
    assert!(input.text().is_empty());

    let SubmitOutcome::Submitted(handle) = outcome else {
        panic!("non-empty input should be submitted");
    };
    handle.await.unwrap();

    assert_eq!(events.recv().await.unwrap(), replaced(&["earlier", "hello"]));
    assert_eq!(sink.display(), vec!["earlier", "hello"]);
    assert_eq!(
        backend.append_calls(),
        vec![Op::Append {
            key: "guestbook".into(),
            value: "hello".into(),
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn input_is_cleared_before_the_response() {
    let backend = Arc::new(ScriptedBackend::with_latency(Duration::from_secs(5)));
    backend.push_append(Ok(entry_list(["slow"])));
    let (sink, _events) = RecordingSink::new();
    let client = client(&backend, &sink);

    let mut input = TextField::with_text("slow");
    let outcome = client.submit_entry(&mut input, SubmitTrigger::Click).await;
    assert!(outcome.is_submitted());
    assert!(input.text().is_empty());
    assert_eq!(sink.display(), vec!["..."]);

    if let SubmitOutcome::Submitted(handle) = outcome {
        handle.await.unwrap();
    }
    assert_eq!(sink.display(), vec!["slow"]);
}

#[tokio::test]
async fn empty_input_is_a_noop() {
    let backend = Arc::new(ScriptedBackend::new());
    let (sink, mut events) = RecordingSink::new();
    let client = client(&backend, &sink);

    let mut input = TextField::default();
    let outcome = client.submit_entry(&mut input, SubmitTrigger::Enter).await;

    assert!(matches!(outcome, SubmitOutcome::Ignored));
    assert!(backend.calls().is_empty());
    assert!(events.try_recv().is_err());
    assert!(sink.display().is_empty());
}

#[tokio::test]
async fn whitespace_is_not_empty() {
    let backend = Arc::new(ScriptedBackend::new());
    backend.push_append(Ok(entry_list([" "])));
    let (sink, _events) = RecordingSink::new();
    let client = client(&backend, &sink);

    let mut input = TextField::with_text(" ");
    let outcome = client.submit_entry(&mut input, SubmitTrigger::Enter).await;
    assert!(outcome.is_submitted());
}

#[tokio::test]
async fn click_and_enter_take_the_same_path() {
    let backend = Arc::new(ScriptedBackend::new());
    backend.push_append(Ok(entry_list(["a"])));
    backend.push_append(Ok(entry_list(["a", "b"])));
    let (sink, _events) = RecordingSink::new();
    let client = client(&backend, &sink);

    for (text, trigger) in [("a", SubmitTrigger::Click), ("b", SubmitTrigger::Enter)] {
        let mut input = TextField::with_text(text);
        if let SubmitOutcome::Submitted(handle) = client.submit_entry(&mut input, trigger).await {
            handle.await.unwrap();
        }
    }

    assert_eq!(backend.append_calls().len(), 2);
    assert_eq!(sink.display(), vec!["a", "b"]);
}

#[tokio::test]
async fn failed_append_leaves_placeholder() {
    let backend = Arc::new(ScriptedBackend::new());
    backend.push_append(Err(unavailable()));
    let (sink, _events) = RecordingSink::new();
    let client = client(&backend, &sink);

    client.render_entries(entry_list(["a"])).await;
    let mut input = TextField::with_text("lost");
    let outcome = client.submit_entry(&mut input, SubmitTrigger::Enter).await;
    if let SubmitOutcome::Submitted(handle) = outcome {
        handle.await.unwrap();
    }
    assert_eq!(sink.display(), vec!["a", "..."]);

    // The next snapshot drops the placeholder without the lost entry.
    client.render_entries(entry_list(["a"])).await;
    assert_eq!(sink.display(), vec!["a"]);
}

#[tokio::test]
async fn render_empty_list_clears_display() {
    let backend = Arc::new(ScriptedBackend::new());
    let (sink, _events) = RecordingSink::new();
    let client = client(&backend, &sink);

    client.render_entries(entry_list(["a", "b"])).await;
    client.render_entries(entry_list(Vec::<String>::new())).await;
    assert!(sink.display().is_empty());
}

#[tokio::test]
async fn render_keeps_order_and_duplicates() {
    let backend = Arc::new(ScriptedBackend::new());
    let (sink, _events) = RecordingSink::new();
    let client = client(&backend, &sink);

    client.render_entries(entry_list(["a", "b", "c", "a"])).await;
    assert_eq!(sink.display(), vec!["a", "b", "c", "a"]);
}

#[tokio::test(start_paused = true)]
async fn start_sets_host_once_and_polls() {
    let backend = Arc::new(ScriptedBackend::new());
    backend.push_read(Ok(entry_list(["x"])));
    backend.push_read(Ok(entry_list(["x", "y"])));
    let (sink, mut events) = RecordingSink::new();
    let mut client = client(&backend, &sink);

    let mut host = RecordingHost::default();
    client.start(&mut host);
    assert!(client.is_refreshing());

    assert_eq!(events.recv().await.unwrap(), replaced(&["x"]));
    assert_eq!(events.recv().await.unwrap(), replaced(&["x", "y"]));
    client.stop().await;
    assert!(!client.is_refreshing());

    assert_eq!(host.writes, vec!["http://localhost:3000/".to_string()]);
    assert_eq!(client.page_url(), "http://localhost:3000/");
}

#[tokio::test(start_paused = true)]
async fn last_response_wins_the_display() {
    // Every call takes 2.5s. The append response lands first, then a poll
    // that was issued before the append was stored overwrites it.
    let backend = Arc::new(ScriptedBackend::with_latency(Duration::from_millis(2500)));
    backend.push_read(Ok(entry_list(["old"])));
    backend.push_read(Ok(entry_list(["old"])));
    backend.push_append(Ok(entry_list(["old", "new"])));
    let (sink, mut events) = RecordingSink::new();
    let mut client = client(&backend, &sink);

    let mut host = RecordingHost::default();
    client.start(&mut host);
    // First poll: issued at 0, settles at 2.5s.
    assert_eq!(events.recv().await.unwrap(), replaced(&["old"]));

    // Second poll is issued at 3.5s. Submit at 2.5s + 0.5s = 3.0s.
    tokio::time::sleep(Duration::from_millis(500)).await;
    let mut input = TextField::with_text("new");
    let outcome = client.submit_entry(&mut input, SubmitTrigger::Enter).await;
    assert_eq!(events.recv().await.unwrap(), SinkEvent::Placeholder("...".into()));

    // Append settles at 5.5s, poll at 6.0s: the poll wins.
    assert_eq!(events.recv().await.unwrap(), replaced(&["old", "new"]));
    assert_eq!(events.recv().await.unwrap(), replaced(&["old"]));
    assert_eq!(sink.display(), vec!["old"]);

    if let SubmitOutcome::Submitted(handle) = outcome {
        handle.await.unwrap();
    }
    client.stop().await;
}
