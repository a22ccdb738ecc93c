//! The JSON request and response envelopes that every function consumes and produces.

use std::collections::{BTreeMap, HashMap};

use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};

use crate::Error;

/// The input to a function.
///
/// `body` may hold the JSON payload either as an encoded string (the usual
/// case for requests relayed by an API gateway) or as an inline JSON value.
/// A missing or empty body is read as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRequest {
    /// The request payload.
    #[serde(default)]
    pub body: Option<Value>,
    /// Parameters captured from the request path, e.g. the `id` in `/items/{id}`.
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,
}

impl FunctionRequest {
    /// Create a request whose body is the encoded JSON string `body`.
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: Some(Value::String(body.into())),
            path_parameters: None,
        }
    }

    /// Create a request with a single path parameter and no body.
    pub fn with_path_parameter(name: &str, value: &str) -> Self {
        Self {
            body: None,
            path_parameters: Some(HashMap::from([(name.to_owned(), value.to_owned())])),
        }
    }

    /// Decode the body into `T`.
    ///
    /// # Errors
    /// Returns [Error::InvalidRequestBody] if the body is not valid JSON or
    /// does not match the shape of `T`.
    pub fn json_body<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let parsed = match &self.body {
            None | Some(Value::Null) => serde_json::from_str("{}"),
            Some(Value::String(text)) if text.trim().is_empty() => serde_json::from_str("{}"),
            Some(Value::String(text)) => serde_json::from_str(text),
            Some(value) => T::deserialize(value),
        };

        parsed.map_err(|error| Error::InvalidRequestBody(error.to_string()))
    }

    /// Get the path parameter `name`, ignoring empty values.
    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|parameters| parameters.get(name))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// The output of a function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    /// The HTTP status code.
    pub status_code: u16,
    /// Response headers. Always includes the CORS and content type headers.
    pub headers: BTreeMap<String, String>,
    /// The JSON encoded response payload.
    pub body: String,
}

impl FunctionResponse {
    /// Create a response with `status` and `payload` encoded as the body.
    pub fn json<T: Serialize>(status: StatusCode, payload: &T) -> Self {
        match serde_json::to_string(payload) {
            Ok(body) => Self {
                status_code: status.as_u16(),
                headers: default_headers(),
                body,
            },
            Err(error) => {
                tracing::error!("could not serialize response body: {error}");
                Self {
                    status_code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                    headers: default_headers(),
                    body: json!({ "error": "could not serialize response body" }).to_string(),
                }
            }
        }
    }

    /// A 200 OK response.
    pub fn ok<T: Serialize>(payload: &T) -> Self {
        Self::json(StatusCode::OK, payload)
    }

    /// A 201 Created response.
    pub fn created<T: Serialize>(payload: &T) -> Self {
        Self::json(StatusCode::CREATED, payload)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    /// Returns [Error::JSONSerializationError] if the body is not valid JSON.
    pub fn body_json(&self) -> Result<Value, Error> {
        serde_json::from_str(&self.body).map_err(Error::from)
    }
}

impl From<Error> for FunctionResponse {
    fn from(error: Error) -> Self {
        let status = error.status_code();

        if status.is_server_error() {
            tracing::error!("function failed: {error}");
        } else {
            tracing::debug!("rejected request: {error}");
        }

        Self::json(status, &json!({ "error": error.to_string() }))
    }
}

impl IntoResponse for FunctionResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();

        for (name, value) in &self.headers {
            match (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                (Ok(name), Ok(value)) => {
                    response.headers_mut().insert(name, value);
                }
                _ => tracing::warn!("dropping invalid response header {name}: {value}"),
            }
        }

        response
    }
}

fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Access-Control-Allow-Origin".to_owned(), "*".to_owned()),
        ("Content-Type".to_owned(), "application/json".to_owned()),
    ])
}

#[cfg(test)]
mod function_request_tests {
    use serde_json::{Value, json};

    use crate::{Error, FunctionRequest};

    #[test]
    fn missing_body_reads_as_empty_object() {
        let body: Value = FunctionRequest::default().json_body().unwrap();

        assert_eq!(body, json!({}));
    }

    #[test]
    fn empty_string_body_reads_as_empty_object() {
        let body: Value = FunctionRequest::with_body("").json_body().unwrap();

        assert_eq!(body, json!({}));
    }

    #[test]
    fn decodes_string_body() {
        let body: Value = FunctionRequest::with_body(r#"{"title": "foo"}"#)
            .json_body()
            .unwrap();

        assert_eq!(body, json!({"title": "foo"}));
    }

    #[test]
    fn decodes_inline_object_body() {
        let request = FunctionRequest {
            body: Some(json!({"title": "foo"})),
            path_parameters: None,
        };

        let body: Value = request.json_body().unwrap();

        assert_eq!(body, json!({"title": "foo"}));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let result: Result<Value, Error> = FunctionRequest::with_body("{not json").json_body();

        assert!(matches!(result, Err(Error::InvalidRequestBody(_))));
    }

    #[test]
    fn parses_gateway_envelope() {
        let request: FunctionRequest = serde_json::from_value(json!({
            "body": null,
            "pathParameters": {"id": "abc"}
        }))
        .unwrap();

        assert_eq!(request.path_parameter("id"), Some("abc"));
        assert_eq!(request.path_parameter("other"), None);
    }

    #[test]
    fn empty_path_parameter_is_ignored() {
        let request = FunctionRequest::with_path_parameter("id", "");

        assert_eq!(request.path_parameter("id"), None);
    }
}
