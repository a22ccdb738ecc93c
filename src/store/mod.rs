//! The document store that holds transactions, notes and sent notifications.
//!
//! A store is a collection of JSON documents keyed by their `id` attribute. The
//! handlers only ever put a document, delete one by key, or scan the whole
//! collection, so that is all [DocumentStore] asks of an implementation.

mod memory;
mod sqlite;
mod table_name;

use std::fmt::Debug;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::Error;

pub use memory::InMemoryStore;
pub use sqlite::SQLiteStore;
pub use table_name::TableName;

/// A JSON object stored in a [DocumentStore].
pub type Document = serde_json::Map<String, Value>;

/// The attribute that holds the key of every document.
pub const KEY_ATTRIBUTE: &str = "id";

/// The number of documents fetched per page by [DocumentStore::scan].
pub const SCAN_PAGE_SIZE: usize = 100;

/// One page of a scan.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanPage {
    /// The documents in this page, in key order.
    pub documents: Vec<Document>,
    /// The key to continue the scan from, or `None` if this is the last page.
    pub last_evaluated_key: Option<String>,
}

/// A key-value collection of JSON documents.
pub trait DocumentStore: Debug + Send + Sync {
    /// Insert `document`, replacing any document with the same key.
    ///
    /// # Errors
    /// Returns [Error::MissingDocumentKey] if `document` has no string `id`,
    /// or an error from the underlying storage.
    fn put(&self, document: Document) -> Result<(), Error>;

    /// Fetch up to `limit` documents with keys after `exclusive_start_key`.
    ///
    /// # Errors
    /// Returns an error from the underlying storage.
    fn scan_page(
        &self,
        exclusive_start_key: Option<&str>,
        limit: usize,
    ) -> Result<ScanPage, Error>;

    /// Delete the document with `key`, returning it if it existed.
    ///
    /// # Errors
    /// Returns an error from the underlying storage.
    fn delete(&self, key: &str) -> Result<Option<Document>, Error>;

    /// Fetch every document in the store.
    ///
    /// Follows continuation keys until the last page, so callers never see a
    /// truncated result.
    ///
    /// # Errors
    /// Returns the first error from [DocumentStore::scan_page].
    fn scan(&self) -> Result<Vec<Document>, Error> {
        let mut documents = Vec::new();
        let mut start_key: Option<String> = None;

        loop {
            let page = self.scan_page(start_key.as_deref(), SCAN_PAGE_SIZE)?;
            documents.extend(page.documents);

            match page.last_evaluated_key {
                Some(key) => start_key = Some(key),
                None => return Ok(documents),
            }
        }
    }
}

/// Get the key of `document`.
///
/// # Errors
/// Returns [Error::MissingDocumentKey] if the `id` attribute is absent, empty
/// or not a string.
pub fn document_key(document: &Document) -> Result<&str, Error> {
    match document.get(KEY_ATTRIBUTE) {
        Some(Value::String(key)) if !key.is_empty() => Ok(key),
        _ => Err(Error::MissingDocumentKey),
    }
}

/// Convert a record into a document.
///
/// # Errors
/// Returns [Error::JSONSerializationError] if `record` does not serialize to a JSON object.
pub fn to_document<T: Serialize>(record: &T) -> Result<Document, Error> {
    match serde_json::to_value(record)? {
        Value::Object(document) => Ok(document),
        other => Err(Error::JSONSerializationError(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

/// Convert a document back into a record.
///
/// # Errors
/// Returns [Error::CorruptDocument] if the document does not have the fields of `T`.
pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, Error> {
    serde_json::from_value(Value::Object(document))
        .map_err(|error| Error::CorruptDocument(error.to_string()))
}
