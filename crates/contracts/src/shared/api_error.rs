//! Error taxonomy for every call to the inbound backend.
//!
//! Statuses map onto variants once, here; pages only decide how loudly to
//! report each kind.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Rejected before any request was sent.
    #[error("{0}")]
    Validation(String),

    #[error("session expired, sign in again")]
    Unauthorized,

    /// 403 with the server's explanation.
    #[error("{0}")]
    Permission(String),

    #[error("not found")]
    NotFound,

    /// 409. The raw body is kept so the caller can decode the conflicting record.
    #[error("{message}")]
    Conflict { message: String, body: String },

    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("network error: {0}")]
    Transport(String),

    #[error("failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classifies a non-success response.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = server_message(body);
        match status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Permission(
                message.unwrap_or_else(|| "You do not have permission for this action".to_string()),
            ),
            404 => ApiError::NotFound,
            409 => ApiError::Conflict {
                message: message.unwrap_or_else(|| "Record already exists".to_string()),
                body: body.to_string(),
            },
            _ => ApiError::Server {
                status,
                message: message.unwrap_or_else(|| format!("HTTP {}", status)),
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }

    /// Text for a transient notice.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } => format!("Request failed: {}", message),
            ApiError::Transport(_) => "Network error, please retry".to_string(),
            ApiError::Decode(_) => "Unexpected response from server".to_string(),
            other => other.to_string(),
        }
    }
}

/// Extracts `message` (or `error`) from a JSON error body.
pub fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|k| value.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::from_status(401, ""), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(404, "{}"), ApiError::NotFound);
        assert_eq!(
            ApiError::from_status(403, r#"{"message":"Only managers can delete batches"}"#),
            ApiError::Permission("Only managers can delete batches".to_string())
        );
        assert_eq!(
            ApiError::from_status(500, "<html>oops</html>"),
            ApiError::Server {
                status: 500,
                message: "HTTP 500".to_string()
            }
        );
    }

    #[test]
    fn test_conflict_keeps_body() {
        let body = r#"{"error":"WSN exists","existing":{"id":1}}"#;
        match ApiError::from_status(409, body) {
            ApiError::Conflict { message, body: kept } => {
                assert_eq!(message, "WSN exists");
                assert_eq!(kept, body);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_server_message_prefers_message_field() {
        assert_eq!(
            server_message(r#"{"message":" first ","error":"second"}"#).as_deref(),
            Some("first")
        );
        assert_eq!(server_message(r#"{"message":"","error":"second"}"#).as_deref(), Some("second"));
        assert_eq!(server_message("not json"), None);
    }

    #[test]
    fn test_user_message() {
        assert_eq!(
            ApiError::Transport("timeout".into()).user_message(),
            "Network error, please retry"
        );
        assert_eq!(
            ApiError::Permission("denied".into()).user_message(),
            "denied"
        );
    }
}
