//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Config, Error,
    notification::{AlertChannel, LogNotifier, Notifier, StoreNotifier},
    store::{DocumentStore, InMemoryStore, SQLiteStore},
};

/// The state of the REST server.
///
/// The stores and alert channel are created once at start-up and shared by every request.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The store for budget transactions.
    pub transaction_store: Arc<dyn DocumentStore>,

    /// The store for knowledge base notes.
    pub note_store: Arc<dyn DocumentStore>,

    /// Where budget alerts are published.
    pub alert_channel: AlertChannel,
}

impl AppState {
    /// Create a new [AppState] from already constructed stores and alert channel.
    pub fn new(
        transaction_store: Arc<dyn DocumentStore>,
        note_store: Arc<dyn DocumentStore>,
        alert_channel: AlertChannel,
    ) -> Self {
        Self {
            transaction_store,
            note_store,
            alert_channel,
        }
    }

    /// Create the stores and alert channel described by `config`.
    ///
    /// If `config` names a database file, every collection is a table in that
    /// database and alerts are written to the notifications table. Otherwise
    /// records are kept in memory and alerts are only logged.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or its tables cannot be created.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let (transaction_store, note_store, notifier): (
            Arc<dyn DocumentStore>,
            Arc<dyn DocumentStore>,
            Arc<dyn Notifier>,
        ) = match &config.db_path {
            Some(db_path) => {
                tracing::info!("opening database {}", db_path.display());
                let connection = Arc::new(Mutex::new(Connection::open(db_path)?));
                let outbox = SQLiteStore::new(
                    connection.clone(),
                    config.notifications_table_name.clone(),
                )?;

                (
                    Arc::new(SQLiteStore::new(
                        connection.clone(),
                        config.table_name.clone(),
                    )?),
                    Arc::new(SQLiteStore::new(
                        connection,
                        config.knowledge_base_table_name.clone(),
                    )?),
                    Arc::new(StoreNotifier::new(Arc::new(outbox))),
                )
            }
            None => {
                tracing::warn!("no database path given, records will not be saved to disk");

                (
                    Arc::new(InMemoryStore::new()),
                    Arc::new(InMemoryStore::new()),
                    Arc::new(LogNotifier),
                )
            }
        };

        if config.sns_topic_arn.is_none() {
            tracing::warn!("no alert topic is configured, low-balance alerts are disabled");
        }

        let alert_channel = AlertChannel::new(
            notifier,
            config.sns_topic_arn.clone(),
            config.sns_enabled,
        );

        Ok(Self::new(transaction_store, note_store, alert_channel))
    }
}
