//! The response for requests that match no route.

use axum::http::{StatusCode, Uri};
use serde_json::json;

use crate::FunctionResponse;

/// A route handler for unknown paths.
pub async fn get_404_not_found(uri: Uri) -> FunctionResponse {
    tracing::debug!("no route for {uri}");

    get_404_not_found_response()
}

/// The JSON 404 response, in the same envelope the functions use.
pub fn get_404_not_found_response() -> FunctionResponse {
    FunctionResponse::json(StatusCode::NOT_FOUND, &json!({ "error": "Not found" }))
}
