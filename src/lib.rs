//! Request handlers for a personal budget tracker and a personal knowledge base.
//!
//! Every handler ("function") takes a JSON request envelope and returns a JSON
//! response envelope, see [FunctionRequest] and [FunctionResponse]. The budget
//! tracker records income and expenses, reports the running balance and sends
//! a low-balance alert when an expense pushes the balance below zero. The
//! knowledge base creates, lists and deletes notes.
//!
//! Records live in a [DocumentStore] and alerts go out through a [Notifier].
//! Both are injected through [AppState], so the same handlers run against
//! SQLite in production and an in-memory store in tests.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::http::StatusCode;
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod config;
pub mod endpoints;
mod envelope;
mod function;
mod logging;
mod not_found;
mod note;
mod notification;
mod routing;
mod store;
mod timestamp;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use config::Config;
pub use envelope::{FunctionRequest, FunctionResponse};
pub use function::{Function, invoke};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use note::Note;
pub use notification::{
    AlertChannel, LogNotifier, MessageId, Notification, Notifier, StoreNotifier,
};
pub use routing::build_router;
pub use store::{Document, DocumentStore, InMemoryStore, SQLiteStore, ScanPage, TableName};
pub use transaction::{Transaction, TransactionBuilder, TransactionType, compute_balance};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required field was missing from the request body.
    ///
    /// The string is the message shown to the client.
    #[error("{0}")]
    MissingFields(String),

    /// A field in the request body had a value outside of the accepted set.
    #[error("{0}")]
    InvalidField(String),

    /// The delete request did not include the ID of the item to delete.
    #[error("Missing item ID")]
    MissingItemId,

    /// The requested resource was not found.
    #[error("Item not found")]
    NotFound,

    /// No function is registered under the given name.
    #[error("unknown function \"{0}\"")]
    UnknownFunction(String),

    /// The transaction amount could not be read as a decimal number.
    #[error("invalid amount {0:?}: expected a decimal number")]
    InvalidAmount(String),

    /// The request body was not valid JSON or did not have the expected shape.
    #[error("could not parse request body: {0}")]
    InvalidRequestBody(String),

    /// Summing transaction amounts exceeded the range of a decimal number.
    #[error("the balance is too large to represent")]
    BalanceOverflow,

    /// A table name did not satisfy the naming rules.
    #[error("invalid table name \"{0}\": use 3 to 255 letters, digits, '_', '-' or '.'")]
    InvalidTableName(String),

    /// A document was written without a non-empty string `id` attribute.
    #[error("document is missing a non-empty string \"id\" attribute")]
    MissingDocumentKey,

    /// A stored document could not be read back as the expected record.
    #[error("stored document is corrupt: {0}")]
    CorruptDocument(String),

    /// The send-alert function was called but no notification topic is configured.
    #[error("no notification topic is configured")]
    NotificationTopicMissing,

    /// The notifier could not publish a message.
    #[error("could not publish notification: {0}")]
    NotificationFailed(String),

    /// A timestamp could not be formatted.
    #[error("could not format timestamp: {0}")]
    TimestampFormat(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl Error {
    /// The HTTP status code that a response carrying this error should use.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingFields(_) | Error::InvalidField(_) | Error::MissingItemId => {
                StatusCode::BAD_REQUEST
            }
            Error::NotFound | Error::UnknownFunction(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}

#[cfg(test)]
mod error_tests {
    use axum::http::StatusCode;

    use crate::Error;

    #[test]
    fn validation_errors_are_bad_requests() {
        assert_eq!(
            Error::MissingFields("Missing required fields: title and content".to_owned())
                .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(Error::MissingItemId.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            Error::InvalidField("bad type".to_owned()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn missing_records_are_not_found() {
        assert_eq!(Error::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            Error::UnknownFunction("foo".to_owned()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn malformed_input_is_an_internal_error() {
        assert_eq!(
            Error::InvalidAmount("abc".to_owned()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::InvalidRequestBody("EOF".to_owned()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::DatabaseLockError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        assert_eq!(
            Error::from(rusqlite::Error::QueryReturnedNoRows),
            Error::NotFound
        );
    }
}
