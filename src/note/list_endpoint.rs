//! Defines the get-items function for the knowledge base.

use axum::extract::State;
use serde::Serialize;

use crate::{
    FunctionResponse,
    note::core::{KnowledgeBaseState, Note, get_all_notes},
};

#[derive(Debug, Serialize)]
struct GetItemsResponse {
    items: Vec<Note>,
    count: usize,
}

/// Respond with every note and how many there are.
pub fn get_items(state: &KnowledgeBaseState) -> FunctionResponse {
    match get_all_notes(state.note_store.as_ref()) {
        Ok(items) => FunctionResponse::ok(&GetItemsResponse {
            count: items.len(),
            items,
        }),
        Err(error) => error.into(),
    }
}

/// A route handler for listing notes.
pub async fn get_items_endpoint(State(state): State<KnowledgeBaseState>) -> FunctionResponse {
    get_items(&state)
}
