//! Publishing notifications to the alert channel.

use std::{fmt::Debug, sync::Arc};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Error,
    store::{DocumentStore, to_document},
    timestamp::now_timestamp,
};

/// The ID a notifier assigns to a published message.
pub type MessageId = String;

/// Sends messages to subscribers of a topic.
pub trait Notifier: Debug + Send + Sync {
    /// Publish `message` with `subject` to `topic`.
    ///
    /// # Errors
    /// Returns an error if the message could not be delivered to the channel.
    fn publish(&self, topic: &str, subject: &str, message: &str) -> Result<MessageId, Error>;
}

/// A published message, as written to the outbox by [StoreNotifier].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// The message ID.
    pub id: MessageId,
    /// The topic the message was published to.
    pub topic: String,
    /// The message subject.
    pub subject: String,
    /// The message text.
    pub message: String,
    /// When the message was published.
    pub published_at: String,
}

/// A notifier that appends every message to an outbox collection.
///
/// Whatever delivers the messages to subscribers reads them from the outbox.
#[derive(Debug, Clone)]
pub struct StoreNotifier {
    outbox: Arc<dyn DocumentStore>,
}

impl StoreNotifier {
    /// Create a notifier that writes to `outbox`.
    pub fn new(outbox: Arc<dyn DocumentStore>) -> Self {
        Self { outbox }
    }
}

impl Notifier for StoreNotifier {
    fn publish(&self, topic: &str, subject: &str, message: &str) -> Result<MessageId, Error> {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            topic: topic.to_owned(),
            subject: subject.to_owned(),
            message: message.to_owned(),
            published_at: now_timestamp()?,
        };

        self.outbox
            .put(to_document(&notification)?)
            .map_err(|error| Error::NotificationFailed(error.to_string()))?;

        tracing::info!(
            message_id = %notification.id,
            topic,
            subject,
            "published notification"
        );

        Ok(notification.id)
    }
}

/// A notifier that only writes messages to the log.
///
/// Used when there is nowhere durable to keep an outbox.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn publish(&self, topic: &str, subject: &str, message: &str) -> Result<MessageId, Error> {
        let message_id = Uuid::new_v4().to_string();

        tracing::info!(%message_id, topic, subject, message, "published notification");

        Ok(message_id)
    }
}

/// The single channel that alerts are published to.
#[derive(Debug, Clone)]
pub struct AlertChannel {
    notifier: Arc<dyn Notifier>,
    topic: Option<String>,
    enabled: bool,
}

impl AlertChannel {
    /// Create a channel that publishes to `topic` through `notifier`.
    ///
    /// `enabled` gates the standalone send-alert function only.
    pub fn new(notifier: Arc<dyn Notifier>, topic: Option<String>, enabled: bool) -> Self {
        Self {
            notifier,
            topic: topic.filter(|topic| !topic.trim().is_empty()),
            enabled,
        }
    }

    /// The configured topic, if any.
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Whether the send-alert function may publish.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Publish a message to the configured topic.
    ///
    /// # Errors
    /// Returns [Error::NotificationTopicMissing] if no topic is configured, or
    /// the error from the notifier.
    pub fn publish(&self, subject: &str, message: &str) -> Result<MessageId, Error> {
        let topic = self.topic().ok_or(Error::NotificationTopicMissing)?;

        self.notifier.publish(topic, subject, message)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        Error,
        notification::{AlertChannel, LogNotifier, Notification, Notifier, StoreNotifier},
        store::{DocumentStore, InMemoryStore, from_document},
        test_utils::RecordingNotifier,
    };

    #[test]
    fn store_notifier_writes_to_outbox() {
        let outbox = Arc::new(InMemoryStore::new());
        let notifier = StoreNotifier::new(outbox.clone());

        let message_id = notifier
            .publish("budget-alerts", "Budget Alert", "hello")
            .unwrap();

        let documents = outbox.scan().unwrap();
        assert_eq!(documents.len(), 1);
        let notification: Notification = from_document(documents[0].clone()).unwrap();
        assert_eq!(notification.id, message_id);
        assert_eq!(notification.topic, "budget-alerts");
        assert_eq!(notification.subject, "Budget Alert");
        assert_eq!(notification.message, "hello");
        assert!(!notification.published_at.is_empty());
    }

    #[test]
    fn log_notifier_assigns_unique_ids() {
        let notifier = LogNotifier;

        let first = notifier.publish("budget-alerts", "Budget Alert", "one").unwrap();
        let second = notifier.publish("budget-alerts", "Budget Alert", "two").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn channel_publishes_to_configured_topic() {
        let notifier = Arc::new(RecordingNotifier::default());
        let channel = AlertChannel::new(notifier.clone(), Some("alerts".to_owned()), true);

        channel.publish("subject", "message").unwrap();

        let published = notifier.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].topic, "alerts");
        assert_eq!(published[0].subject, "subject");
        assert_eq!(published[0].message, "message");
    }

    #[test]
    fn channel_without_topic_refuses_to_publish() {
        let notifier = Arc::new(RecordingNotifier::default());
        let channel = AlertChannel::new(notifier.clone(), Some("  ".to_owned()), true);

        let result = channel.publish("subject", "message");

        assert_eq!(result, Err(Error::NotificationTopicMissing));
        assert!(notifier.published().is_empty());
    }
}
