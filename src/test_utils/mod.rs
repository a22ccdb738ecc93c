//! Fakes and helpers shared by the unit tests.

use std::{
    io,
    sync::{Arc, Mutex},
};

use serde_json::Value;

use crate::{
    AppState, Error, FunctionResponse,
    notification::{AlertChannel, MessageId, Notification, Notifier},
    store::InMemoryStore,
};

pub(crate) const TEST_TOPIC: &str = "budget-alerts";

/// A notifier that remembers every message it was asked to publish.
#[derive(Debug, Default)]
pub(crate) struct RecordingNotifier {
    published: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub(crate) fn published(&self) -> Vec<Notification> {
        self.published.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn publish(&self, topic: &str, subject: &str, message: &str) -> Result<MessageId, Error> {
        let mut published = self.published.lock().unwrap();
        let id = format!("message-{}", published.len() + 1);

        published.push(Notification {
            id: id.clone(),
            topic: topic.to_owned(),
            subject: subject.to_owned(),
            message: message.to_owned(),
            published_at: "2025-10-05T00:00:00.000000Z".to_owned(),
        });

        Ok(id)
    }
}

/// A notifier whose channel is always down.
#[derive(Debug, Default)]
pub(crate) struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn publish(&self, _topic: &str, _subject: &str, _message: &str) -> Result<MessageId, Error> {
        Err(Error::NotificationFailed("channel unavailable".to_owned()))
    }
}

/// App state backed by in-memory stores, publishing through `notifier` to [TEST_TOPIC].
pub(crate) fn get_test_state(notifier: Arc<dyn Notifier>) -> AppState {
    AppState::new(
        Arc::new(InMemoryStore::new()),
        Arc::new(InMemoryStore::new()),
        AlertChannel::new(notifier, Some(TEST_TOPIC.to_owned()), true),
    )
}

#[track_caller]
pub(crate) fn assert_status(response: &FunctionResponse, want: u16) {
    assert_eq!(
        response.status_code, want,
        "got status {}, want {want}, body: {}",
        response.status_code, response.body
    );
}

#[track_caller]
pub(crate) fn parse_body(response: &FunctionResponse) -> Value {
    response
        .body_json()
        .expect("response body should be valid JSON")
}

/// Collects formatted log lines in memory.
#[derive(Debug, Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` and return everything it logged at `debug` level or above.
pub(crate) fn capture_logs(f: impl FnOnce()) -> String {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.0.lock().unwrap().clone();
    String::from_utf8_lossy(&bytes).into_owned()
}
