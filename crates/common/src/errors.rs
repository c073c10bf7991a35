use domain::DomainError;
use thiserror::Error;

/// Text shown for any transport-level failure
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Unable to connect to the server. Please check your internet connection and try again.";

/// Errors crossing the API boundary of the Code Insight client
#[derive(Error, Debug)]
pub enum InsightError {
    // === Transport ===
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response; `message` is the server's `message`/`detail` field
    /// or a generic text when the body carried none
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Not authenticated")]
    Unauthenticated,

    // === Client-side rules ===
    #[error(transparent)]
    Domain(#[from] DomainError),

    // === Local ===
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type InsightResult<T> = Result<T, InsightError>;

impl From<serde_json::Error> for InsightError {
    fn from(err: serde_json::Error) -> Self {
        InsightError::Serialization(err.to_string())
    }
}

impl InsightError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        InsightError::Http {
            status,
            message: message.into(),
        }
    }

    /// HTTP status, when the error came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            InsightError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(s) if (500..600).contains(&s))
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// One human-readable line for the transient notice.
    pub fn user_message(&self) -> String {
        match self {
            InsightError::Network(_) => CONNECTION_ERROR_MESSAGE.to_string(),
            InsightError::Http { message, .. } => message.clone(),
            InsightError::Unauthenticated => "Please log in to continue.".to_string(),
            InsightError::Domain(err) => err.to_string(),
            InsightError::Configuration(msg) => msg.clone(),
            InsightError::Serialization(_) => {
                "Received an unexpected response from the server.".to_string()
            }
            InsightError::Io(err) => err.to_string(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            InsightError::Network(_) => "NET_ERROR",
            InsightError::Http { .. } => "HTTP_ERROR",
            InsightError::Unauthenticated => "UNAUTHENTICATED",
            InsightError::Domain(_) => "VALIDATION_ERROR",
            InsightError::Configuration(_) => "CONFIG_ERROR",
            InsightError::Serialization(_) => "SERIALIZATION_ERROR",
            InsightError::Io(_) => "IO_ERROR",
        }
    }
}

/// Pull a human-readable message out of an error response body.
///
/// Looks for a string `message` field first, then `detail`. A `detail`
/// object is searched for its own `message`; a `detail` list (request
/// validation errors) yields the first entry's `msg`.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    if let Some(msg) = value.get("message").and_then(|m| m.as_str()) {
        return Some(msg.to_string());
    }
    match value.get("detail")? {
        serde_json::Value::String(detail) => Some(detail.clone()),
        serde_json::Value::Object(detail) => detail
            .get("message")
            .and_then(|msg| msg.as_str())
            .map(str::to_string),
        serde_json::Value::Array(items) => items
            .first()
            .and_then(|item| item.get("msg"))
            .and_then(|msg| msg.as_str())
            .map(str::to_string),
        _ => None,
    }
}

/// Build an error for a failed response from its status and body text
pub fn error_from_response(status: u16, body: &str, fallback: &str) -> InsightError {
    let message = extract_error_message(body).unwrap_or_else(|| fallback.to_string());
    InsightError::http(status, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_field_preferred() {
        let body = r#"{"message": "Project not found", "detail": "ignored"}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("Project not found"));
    }

    #[test]
    fn test_detail_field() {
        assert_eq!(
            extract_error_message(r#"{"detail": "Invalid token"}"#).as_deref(),
            Some("Invalid token")
        );
        assert_eq!(
            extract_error_message(r#"{"detail": [{"loc": ["body"], "msg": "field required"}]}"#)
                .as_deref(),
            Some("field required")
        );
        assert_eq!(
            extract_error_message(
                r#"{"detail": {"message": "Generation task not found", "progress_key": "k"}}"#
            )
            .as_deref(),
            Some("Generation task not found")
        );
    }

    #[test]
    fn test_non_json_body_uses_fallback() {
        let err = error_from_response(502, "<html>Bad gateway</html>", "Failed to generate documentation");
        assert_eq!(err.status(), Some(502));
        assert!(err.is_server_error());
        assert_eq!(err.user_message(), "Failed to generate documentation");
    }

    #[test]
    fn test_network_error_normalized() {
        let err = InsightError::Network("connection refused".into());
        assert_eq!(err.user_message(), CONNECTION_ERROR_MESSAGE);
        assert!(!err.is_server_error());
        assert_eq!(err.error_code(), "NET_ERROR");
    }

    #[test]
    fn test_domain_error_passthrough() {
        let err: InsightError = DomainError::EmptySelection.into();
        assert_eq!(err.user_message(), "No files selected");
        assert_eq!(err.status(), None);
    }
}
