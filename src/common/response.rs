use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of every error response
///
/// # Example
/// ```json
/// {
///   "statusCode": 400,
///   "error": "ClientInputError",
///   "message": "Malformed request body: expected value at line 1 column 1",
///   "timestamp": "2026-10-19T08:00:00+00:00"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,

    /// Failure class, see [`crate::exception::ErrorKind`]
    pub error: String,

    pub message: String,

    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(status_code: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status_code,
            error: error.into(),
            message: message.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Body of a `DELETE` response: `{"ok": true}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub ok: bool,
}

/// Wraps an element under its id: `{"<id>": element}`
pub(crate) fn keyed(id: String, element: Value) -> Value {
    let mut body = Map::with_capacity(1);
    body.insert(id, element);
    Value::Object(body)
}
