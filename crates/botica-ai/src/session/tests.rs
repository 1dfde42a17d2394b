//! SessionManager behaviour against stub completion backends.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use botica_common::{Event, EventBus, NotificationLevel};
use tokio::sync::Notify;

use super::*;
use crate::{AiClient, AiError, AiResponse, Message, TokenUsage};

/// Replies with a fixed text and records every prompt it receives.
struct StubClient {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl StubClient {
    fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiClient for StubClient {
    async fn complete(&self, prompt: &str) -> Result<AiResponse, AiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(AiResponse {
            content: self.reply.clone(),
            model: "stub".into(),
            usage: TokenUsage {
                input_tokens: 2,
                output_tokens: 3,
            },
        })
    }
}

struct FailingClient;

#[async_trait]
impl AiClient for FailingClient {
    async fn complete(&self, _prompt: &str) -> Result<AiResponse, AiError> {
        Err(AiError::NetworkError("connection refused".into()))
    }
}

/// Blocks until the gate opens, then replies. `entered` fires once the
/// call has started.
struct GatedClient {
    entered: Arc<Notify>,
    gate: Arc<Notify>,
}

#[async_trait]
impl AiClient for GatedClient {
    async fn complete(&self, _prompt: &str) -> Result<AiResponse, AiError> {
        self.entered.notify_one();
        self.gate.notified().await;
        Ok(AiResponse {
            content: "late reply".into(),
            ..Default::default()
        })
    }
}

struct SlowClient;

#[async_trait]
impl AiClient for SlowClient {
    async fn complete(&self, _prompt: &str) -> Result<AiResponse, AiError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(AiResponse::default())
    }
}

/// Checks, at call time, that the user message is already stored.
struct ObservingClient {
    store: Arc<MemoryStore>,
    seen: Mutex<Option<Vec<Message>>>,
}

#[async_trait]
impl AiClient for ObservingClient {
    async fn complete(&self, _prompt: &str) -> Result<AiResponse, AiError> {
        let stored = self.store.contents().map(|s| restore(&s).unwrap());
        *self.seen.lock().unwrap() = stored;
        Ok(AiResponse {
            content: "ok".into(),
            ..Default::default()
        })
    }
}

fn manager(client: Arc<dyn AiClient>) -> (SessionManager, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (SessionManager::new(client, store.clone()), store)
}

#[tokio::test]
async fn successful_turn_appends_user_then_assistant() {
    let (session, _) = manager(StubClient::new("Hi there"));

    let reply = session.submit("Hello").await.unwrap();

    assert_eq!(reply, "Hi there");
    assert_eq!(
        session.snapshot(),
        vec![Message::user("Hello"), Message::assistant("Hi there")]
    );
    assert!(!session.is_pending());
    assert_eq!(session.last_assistant().as_deref(), Some("Hi there"));
}

#[tokio::test]
async fn failed_turn_keeps_only_user_message() {
    let (session, _) = manager(Arc::new(FailingClient));

    let err = session.submit("Hello").await.unwrap_err();

    assert!(matches!(err, SessionError::UpstreamFailure(AiError::NetworkError(_))));
    assert_eq!(session.snapshot(), vec![Message::user("Hello")]);
    assert!(!session.is_pending());
    assert_eq!(session.last_assistant(), None);
}

#[tokio::test]
async fn blank_input_is_rejected_without_side_effects() {
    let client = StubClient::new("unused");
    let (session, store) = manager(client.clone());

    for text in ["", "   ", "\n\t"] {
        let err = session.submit(text).await.unwrap_err();
        assert!(matches!(err, SessionError::EmptyInput));
    }

    assert!(session.is_empty());
    assert!(!session.is_pending());
    assert!(client.prompts().is_empty());
    assert_eq!(store.contents(), None);
}

#[tokio::test]
async fn second_submit_while_pending_is_busy() {
    let entered = Arc::new(Notify::new());
    let gate = Arc::new(Notify::new());
    let client = Arc::new(GatedClient {
        entered: entered.clone(),
        gate: gate.clone(),
    });
    let (session, _) = manager(client);
    let session = Arc::new(session);

    let first = {
        let session = session.clone();
        tokio::spawn(async move { session.submit("first").await })
    };
    entered.notified().await;
    assert!(session.is_pending());

    let err = session.submit("second").await.unwrap_err();
    assert!(matches!(err, SessionError::Busy));
    assert_eq!(session.snapshot(), vec![Message::user("first")]);
    assert!(session.is_pending());

    gate.notify_one();
    assert_eq!(first.await.unwrap().unwrap(), "late reply");
    assert!(!session.is_pending());
    assert_eq!(
        session.snapshot(),
        vec![Message::user("first"), Message::assistant("late reply")]
    );
}

#[tokio::test]
async fn dropped_submit_releases_pending_slot() {
    let entered = Arc::new(Notify::new());
    let client = Arc::new(GatedClient {
        entered: entered.clone(),
        gate: Arc::new(Notify::new()),
    });
    let (session, _) = manager(client);
    let session = Arc::new(session);

    let task = {
        let session = session.clone();
        tokio::spawn(async move { session.submit("abandoned").await })
    };
    entered.notified().await;
    assert!(session.is_pending());

    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());

    assert!(!session.is_pending());
    assert_eq!(session.snapshot(), vec![Message::user("abandoned")]);
}

#[tokio::test]
async fn begin_takes_the_slot_before_any_await() {
    let client = StubClient::new("Hi there");
    let (session, _) = manager(client.clone());
    let session = Arc::new(session);

    let turn = session.begin("first").unwrap();
    assert!(session.is_pending());
    assert_eq!(session.snapshot(), vec![Message::user("first")]);

    let err = session.begin("second").unwrap_err();
    assert!(matches!(err, SessionError::Busy));
    assert!(matches!(session.begin("  ").unwrap_err(), SessionError::EmptyInput));
    assert_eq!(session.snapshot(), vec![Message::user("first")]);

    assert_eq!(turn.text(), "first");
    assert_eq!(turn.run().await.unwrap(), "Hi there");
    assert!(!session.is_pending());
    assert_eq!(client.prompts(), vec!["first"]);
    assert_eq!(
        session.snapshot(),
        vec![Message::user("first"), Message::assistant("Hi there")]
    );
}

#[tokio::test]
async fn dropping_an_unrun_turn_releases_the_slot() {
    let (session, _) = manager(StubClient::new("unused"));
    let session = Arc::new(session);

    let turn = session.begin("never sent").unwrap();
    drop(turn);

    assert!(!session.is_pending());
    assert_eq!(session.snapshot(), vec![Message::user("never sent")]);
    assert!(session.begin("next").is_ok());
}

#[tokio::test]
async fn assistant_reply_by_number() {
    let (session, _) = manager(StubClient::new("Hi there"));
    session.submit("Hello").await.unwrap();

    assert_eq!(session.assistant_reply(2).as_deref(), Some("Hi there"));
    assert_eq!(session.assistant_reply(1), None);
    assert_eq!(session.assistant_reply(0), None);
    assert_eq!(session.assistant_reply(3), None);
}

#[tokio::test]
async fn only_latest_text_is_sent_upstream() {
    let client = StubClient::new("reply");
    let (session, _) = manager(client.clone());

    session.submit("one").await.unwrap();
    session.submit("two").await.unwrap();

    assert_eq!(client.prompts(), vec!["one".to_string(), "two".to_string()]);
    assert_eq!(session.len(), 4);
}

#[tokio::test]
async fn user_message_is_persisted_before_the_call() {
    let store = Arc::new(MemoryStore::new());
    let client = Arc::new(ObservingClient {
        store: store.clone(),
        seen: Mutex::new(None),
    });
    let session = SessionManager::new(client.clone(), store.clone());

    session.submit("Hello").await.unwrap();

    assert_eq!(
        *client.seen.lock().unwrap(),
        Some(vec![Message::user("Hello")])
    );
    let stored = restore(&store.contents().unwrap()).unwrap();
    assert_eq!(stored, session.snapshot());
}

#[tokio::test]
async fn open_restores_persisted_history() {
    let history = vec![Message::user("Hello"), Message::assistant("Hi there")];
    let store = Arc::new(MemoryStore::with_snapshot(serialize(&history).unwrap()));

    let session = SessionManager::open(StubClient::new("x"), store);

    assert_eq!(session.snapshot(), history);
}

#[tokio::test]
async fn corrupt_snapshot_falls_back_to_empty_history() {
    let bus = EventBus::new(16);
    let mut rx = bus.subscribe();
    let store = Arc::new(MemoryStore::with_snapshot("{not json"));

    let session = SessionManager::new(StubClient::new("x"), store)
        .with_events(bus)
        .restore_persisted();

    assert!(session.is_empty());
    match rx.recv().await.unwrap() {
        Event::Notification(n) => assert_eq!(n.level, NotificationLevel::Warning),
        other => panic!("unexpected event: {other:?}"),
    }
    assert!(matches!(rx.recv().await.unwrap(), Event::HistoryRestored(0)));
}

#[test]
fn restore_round_trips_and_rejects_malformed() {
    let history = vec![Message::user("a"), Message::assistant("b")];
    assert_eq!(restore(&serialize(&history).unwrap()).unwrap(), history);
    assert_eq!(restore(&serialize(&[]).unwrap()).unwrap(), Vec::<Message>::new());

    for bad in ["", "{}", r#"[{"role":"system","content":"x"}]"#, r#"[{"role":"user"}]"#] {
        assert!(matches!(
            SessionManager::restore(bad),
            Err(SessionError::CorruptSnapshot(_))
        ));
    }
}

#[tokio::test]
async fn turn_timeout_settles_as_upstream_failure() {
    let store = Arc::new(MemoryStore::new());
    let session = SessionManager::new(Arc::new(SlowClient), store)
        .with_turn_timeout(Duration::from_millis(20));

    let err = session.submit("Hello").await.unwrap_err();

    assert!(matches!(err, SessionError::UpstreamFailure(AiError::Timeout)));
    assert_eq!(session.snapshot(), vec![Message::user("Hello")]);
    assert!(!session.is_pending());
}

#[tokio::test]
async fn events_follow_the_turn() {
    let bus = EventBus::new(16);
    let mut rx = bus.subscribe();
    let store = Arc::new(MemoryStore::new());
    let session = SessionManager::new(StubClient::new("Hi"), store).with_events(bus);

    session.submit("Hello").await.unwrap();

    assert!(matches!(rx.recv().await.unwrap(), Event::MessageAppended(m) if m == Message::user("Hello")));
    assert!(matches!(rx.recv().await.unwrap(), Event::PendingChanged(true)));
    assert!(matches!(rx.recv().await.unwrap(), Event::MessageAppended(m) if m == Message::assistant("Hi")));
    assert!(matches!(rx.recv().await.unwrap(), Event::PendingChanged(false)));
}

#[tokio::test]
async fn usage_accumulates_across_turns() {
    let (session, _) = manager(StubClient::new("ok"));
    session.submit("a").await.unwrap();
    session.submit("b").await.unwrap();
    assert_eq!(session.usage().total_tokens(), 10);
}

#[tokio::test]
async fn transcript_goes_to_draft_not_history() {
    let (session, _) = manager(StubClient::new("ok"));
    let mut draft = Draft::new();
    draft.replace("foo");

    draft.append_transcript("bar");

    assert_eq!(draft.text(), "foo bar");
    assert!(session.is_empty());
}

#[test]
fn json_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("nested").join("chatHistory.json"));

    assert_eq!(store.load().unwrap(), None);
    store.save(r#"[{"role":"user","content":"hi"}]"#).unwrap();
    assert_eq!(
        store.load().unwrap().as_deref(),
        Some(r#"[{"role":"user","content":"hi"}]"#)
    );
}
