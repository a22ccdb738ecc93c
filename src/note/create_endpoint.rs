//! Defines the create-item function for the knowledge base.

use axum::extract::State;
use serde::Serialize;

use crate::{
    Error, FunctionRequest, FunctionResponse,
    note::core::{KnowledgeBaseState, Note, NoteForm, put_note},
    timestamp::now_timestamp,
};

#[derive(Debug, Serialize)]
struct CreateItemResponse<'a> {
    message: &'a str,
    item: Note,
}

/// Create a note from the request body and respond with the stored note.
pub fn create_item(request: &FunctionRequest, state: &KnowledgeBaseState) -> FunctionResponse {
    match try_create_item(request, state) {
        Ok(note) => FunctionResponse::created(&CreateItemResponse {
            message: "Item created successfully",
            item: note,
        }),
        Err(error) => error.into(),
    }
}

fn try_create_item(request: &FunctionRequest, state: &KnowledgeBaseState) -> Result<Note, Error> {
    let form: NoteForm = request.json_body()?;
    let note = form.into_note(now_timestamp()?)?;

    put_note(&note, state.note_store.as_ref())?;
    tracing::info!("created {} {}", note.note_type, note.id);

    Ok(note)
}

/// A route handler for creating a note from a JSON body.
pub async fn create_item_endpoint(
    State(state): State<KnowledgeBaseState>,
    body: String,
) -> FunctionResponse {
    create_item(&FunctionRequest::with_body(body), &state)
}
