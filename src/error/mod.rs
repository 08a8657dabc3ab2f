//! Error handling module

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Non-200 HTTP response from the SwitchBot API
    #[error("API error: HTTP {status}, {body}")]
    Api { status: u16, body: String },

    /// HTTP 200 with a non-success `statusCode` in the response envelope
    #[error("SwitchBot error: statusCode {code}, {message}")]
    Vendor { code: i64, message: String },

    #[error("Request failed: {0}")]
    Request(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Signing error: {0}")]
    Signing(String),
}

impl AppError {
    /// True for errors that came back from the SwitchBot API itself
    pub fn is_api_error(&self) -> bool {
        matches!(self, AppError::Api { .. } | AppError::Vendor { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_carries_status_and_body() {
        let err = AppError::Api {
            status: 401,
            body: r#"{"message":"Unauthorized"}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"API error: HTTP 401, {"message":"Unauthorized"}"#
        );
        assert!(err.is_api_error());
    }

    #[test]
    fn test_request_error_is_not_api_error() {
        let err = AppError::Request("connection refused".to_string());
        assert!(!err.is_api_error());
    }
}
