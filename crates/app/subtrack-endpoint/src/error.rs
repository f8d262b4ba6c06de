use serde_json::Value;
use subtrack_notify::ErrorDetail;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server responded with status {status}")]
    Status { status: u16, detail: Option<String> },

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    /// Builds a status error, lifting the `error` field of the body into
    /// the user-facing detail.
    pub fn from_status(status: u16, body: &Value) -> Self {
        let detail = match body.get("error") {
            None | Some(Value::Null) => None,
            Some(Value::String(message)) => Some(message.clone()),
            Some(other) => Some(other.to_string()),
        };
        ApiError::Status { status, detail }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

impl ErrorDetail for ApiError {
    fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_error_carries_server_message() {
        let err = ApiError::from_status(400, &json!({"error": "Plan already added to your subscriptions."}));
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.detail(), Some("Plan already added to your subscriptions."));
        assert_eq!(err.to_string(), "Server responded with status 400");
    }

    #[test]
    fn status_error_without_error_field_has_no_detail() {
        let err = ApiError::from_status(500, &json!({"detail": "boom"}));
        assert_eq!(err.detail(), None);

        let err = ApiError::from_status(404, &Value::Null);
        assert_eq!(err.detail(), None);
    }

    #[test]
    fn structured_error_field_is_rendered() {
        let err = ApiError::from_status(400, &json!({"error": ["bad", "worse"]}));
        assert_eq!(err.detail(), Some(r#"["bad","worse"]"#));
    }

    #[test]
    fn unauthorized_statuses() {
        assert!(ApiError::from_status(401, &Value::Null).is_unauthorized());
        assert!(ApiError::from_status(403, &Value::Null).is_unauthorized());
        assert!(!ApiError::from_status(400, &Value::Null).is_unauthorized());
        assert!(!ApiError::Network("refused".into()).is_unauthorized());
    }
}
