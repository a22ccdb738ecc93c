//! A document store that lives in process memory.

use std::{
    collections::BTreeMap,
    ops::Bound,
    sync::{Mutex, MutexGuard},
};

use crate::{
    Error,
    store::{Document, DocumentStore, ScanPage, document_key},
};

/// Stores documents in a sorted map, used for tests and for running the
/// server without a database file.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    documents: Mutex<BTreeMap<String, Document>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, Document>>, Error> {
        self.documents.lock().map_err(|error| {
            tracing::error!("could not acquire in-memory store lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl DocumentStore for InMemoryStore {
    fn put(&self, document: Document) -> Result<(), Error> {
        let key = document_key(&document)?.to_owned();
        self.lock()?.insert(key, document);

        Ok(())
    }

    fn scan_page(
        &self,
        exclusive_start_key: Option<&str>,
        limit: usize,
    ) -> Result<ScanPage, Error> {
        let documents = self.lock()?;
        let lower = match exclusive_start_key {
            Some(key) => Bound::Excluded(key),
            None => Bound::Unbounded,
        };

        let mut page: Vec<(&String, &Document)> = documents
            .range::<str, _>((lower, Bound::Unbounded))
            .take(limit.max(1) + 1)
            .collect();

        let has_more = page.len() > limit.max(1);
        if has_more {
            page.pop();
        }

        let last_evaluated_key = match (has_more, page.last()) {
            (true, Some((key, _))) => Some((*key).clone()),
            _ => None,
        };

        Ok(ScanPage {
            documents: page.into_iter().map(|(_, doc)| doc.clone()).collect(),
            last_evaluated_key,
        })
    }

    fn delete(&self, key: &str) -> Result<Option<Document>, Error> {
        Ok(self.lock()?.remove(key))
    }
}
