//! Defines the note model and its store queries.

use std::sync::Arc;

use axum::extract::FromRef;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    AppState, Error,
    store::{DocumentStore, from_document, to_document},
};

/// The type given to notes that do not name one.
pub const DEFAULT_NOTE_TYPE: &str = "note";

/// An entry in the knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// A UUID assigned when the note is created.
    pub id: String,
    /// A short title, required.
    pub title: String,
    /// The body of the note, required.
    pub content: String,
    /// A free-form kind, e.g. "note", "link" or "snippet".
    #[serde(rename = "type")]
    pub note_type: String,
    /// Labels for finding the note later. Omitted when the note has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// When the note was created.
    pub created_at: String,
    /// Equal to `created_at`, since notes are never edited.
    pub updated_at: String,
}

/// The request body for creating a note.
#[derive(Debug, Default, Deserialize)]
pub struct NoteForm {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, rename = "type")]
    pub note_type: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl NoteForm {
    /// Validate the form and create a [Note] with a new ID, stamped with `timestamp`.
    ///
    /// # Errors
    /// Returns [Error::MissingFields] if the title or content is missing.
    pub fn into_note(self, timestamp: String) -> Result<Note, Error> {
        let (Some(title), Some(content)) = (self.title, self.content) else {
            return Err(Error::MissingFields(
                "Missing required fields: title and content".to_owned(),
            ));
        };

        Ok(Note {
            id: Uuid::new_v4().to_string(),
            title,
            content,
            note_type: self
                .note_type
                .unwrap_or_else(|| DEFAULT_NOTE_TYPE.to_owned()),
            tags: self.tags,
            created_at: timestamp.clone(),
            updated_at: timestamp,
        })
    }
}

/// The state shared by the knowledge base functions.
#[derive(Debug, Clone)]
pub struct KnowledgeBaseState {
    /// The store for notes.
    pub note_store: Arc<dyn DocumentStore>,
}

impl FromRef<AppState> for KnowledgeBaseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            note_store: state.note_store.clone(),
        }
    }
}

/// Save `note` to `store`.
///
/// # Errors
/// Returns an error from the store.
pub fn put_note(note: &Note, store: &dyn DocumentStore) -> Result<(), Error> {
    store.put(to_document(note)?)
}

/// Get every note in `store`.
///
/// # Errors
/// Returns an error from the store, or [Error::CorruptDocument] if a stored
/// document is not a note.
pub fn get_all_notes(store: &dyn DocumentStore) -> Result<Vec<Note>, Error> {
    store.scan()?.into_iter().map(from_document).collect()
}

/// Delete the note with `id`, returning it if it existed.
///
/// # Errors
/// Returns an error from the store.
pub fn delete_note(id: &str, store: &dyn DocumentStore) -> Result<Option<Note>, Error> {
    store.delete(id)?.map(from_document).transpose()
}
