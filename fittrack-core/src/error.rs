//! API error types.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Fields consulted, in order, before falling back to the first field error.
const MESSAGE_FIELDS: &[&str] = &["detail", "error", "non_field_errors"];

/// Errors that can occur while talking to the REST backend.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure (connection refused, timeout, invalid body, ...)
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{message}")]
    Status {
        status: StatusCode,
        message: String,
        body: Value,
    },

    /// Response decoded but did not have the expected shape
    #[error("Invalid response format from server: {0}")]
    Decode(String),

    /// Request was aborted because its owning scope went away
    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Builds a status error, extracting a display message from the body.
    pub fn from_status(status: StatusCode, body: Value) -> Self {
        let message = extract_message(&body)
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
        ApiError::Status {
            status,
            message,
            body,
        }
    }

    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Error body returned by the server, if any.
    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiError::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Message taken from the first of `fields` present in the error body,
    /// or `fallback` when none is (including transport failures).
    pub fn message_from(&self, fields: &[&str], fallback: &str) -> String {
        self.body()
            .and_then(|body| fields.iter().find_map(|field| first_error(body, field)))
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Returns the first error string stored under `field`.
///
/// The backend reports errors either as a plain string (`{"error": "..."}`)
/// or as a list of strings per field (`{"email": ["..."]}`).
pub fn first_error(body: &Value, field: &str) -> Option<String> {
    match body.get(field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(|item| match item {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }),
        _ => None,
    }
}

/// Extracts a human-readable message from an error body.
///
/// Looks at `detail`, `error` and `non_field_errors` first, then at the
/// first field (in key order) that carries an error string.
pub fn extract_message(body: &Value) -> Option<String> {
    if let Some(message) = MESSAGE_FIELDS
        .iter()
        .find_map(|field| first_error(body, field))
    {
        return Some(message);
    }

    body.as_object()?
        .keys()
        .find_map(|field| first_error(body, field).map(|msg| format!("{}: {}", field, msg)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_error_string_and_list() {
        let body = json!({"error": "Invalid credentials", "email": ["Enter a valid email."]});
        assert_eq!(
            first_error(&body, "error"),
            Some("Invalid credentials".to_string())
        );
        assert_eq!(
            first_error(&body, "email"),
            Some("Enter a valid email.".to_string())
        );
        assert_eq!(first_error(&body, "username"), None);
    }

    #[test]
    fn test_extract_message_precedence() {
        let body = json!({"detail": "Not found.", "error": "other"});
        assert_eq!(extract_message(&body), Some("Not found.".to_string()));

        let body = json!({"non_field_errors": ["Bad pair"]});
        assert_eq!(extract_message(&body), Some("Bad pair".to_string()));
    }

    #[test]
    fn test_extract_message_falls_back_to_field() {
        let body = json!({"name": ["This field may not be blank."]});
        assert_eq!(
            extract_message(&body),
            Some("name: This field may not be blank.".to_string())
        );
        assert_eq!(extract_message(&json!({})), None);
        assert_eq!(extract_message(&Value::Null), None);
    }

    #[test]
    fn test_from_status_generic_message() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, Value::Null);
        assert_eq!(err.to_string(), "Request failed with status 500");
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn test_message_from_uses_field_order() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            json!({"password": ["Too short."], "username": ["Taken."]}),
        );
        assert_eq!(
            err.message_from(&["email", "username", "password"], "Registration failed"),
            "Taken."
        );
        assert_eq!(
            ApiError::Cancelled.message_from(&["email"], "Registration failed"),
            "Registration failed"
        );
    }
}
