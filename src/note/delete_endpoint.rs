//! Defines the delete-item function for the knowledge base.

use axum::extract::{Path, State};
use serde::Serialize;

use crate::{
    Error, FunctionRequest, FunctionResponse,
    note::core::{KnowledgeBaseState, Note, delete_note},
};

/// The path parameter that names the note to delete.
pub const ITEM_ID_PARAMETER: &str = "id";

#[derive(Debug, Serialize)]
struct DeleteItemResponse<'a> {
    message: &'a str,
    deleted_item: Note,
}

/// Delete the note named by the `id` path parameter and respond with the removed note.
pub fn delete_item(
    request: &FunctionRequest,
    state: &KnowledgeBaseState,
) -> FunctionResponse {
    match try_delete_item(request, state) {
        Ok(note) => FunctionResponse::ok(&DeleteItemResponse {
            message: "Item deleted successfully",
            deleted_item: note,
        }),
        Err(error) => error.into(),
    }
}

fn try_delete_item(request: &FunctionRequest, state: &KnowledgeBaseState) -> Result<Note, Error> {
    let id = request
        .path_parameter(ITEM_ID_PARAMETER)
        .ok_or(Error::MissingItemId)?;

    let note = delete_note(id, state.note_store.as_ref())?.ok_or(Error::NotFound)?;
    tracing::info!("deleted {} {}", note.note_type, note.id);

    Ok(note)
}

/// A route handler for deleting the note with the ID in the path.
pub async fn delete_item_endpoint(
    State(state): State<KnowledgeBaseState>,
    Path(id): Path<String>,
) -> FunctionResponse {
    delete_item(
        &FunctionRequest::with_path_parameter(ITEM_ID_PARAMETER, &id),
        &state,
    )
}
