//! Error types for moocnotify
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Errors raised while fetching course data from the MOOC platform
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} from MOOC API")]
    Http { status: u16 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Empty response body")]
    EmptyBody,

    #[error("MOOC API returned error code {code}")]
    Api { code: i64 },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by a mail transport while delivering one message
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// A sender or recipient address could not be parsed
    #[error("Invalid address: {0}")]
    Address(String),

    /// The message could not be assembled
    #[error("Message build error: {0}")]
    Build(String),

    /// The transport refused or failed to send
    #[error("Transport error: {0}")]
    Transport(String),
}

/// All error types that can occur in moocnotify
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Invalid or incomplete configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Course data could not be fetched
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// A reminder message could not be delivered
    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for moocnotify operations
pub type Result<T> = std::result::Result<T, NotifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = NotifyError::Config("smtp.host is required".to_string());
        assert_eq!(err.to_string(), "Config error: smtp.host is required");
    }

    #[test]
    fn test_fetch_error_http() {
        let err = FetchError::Http { status: 403 };
        assert_eq!(err.to_string(), "HTTP 403 from MOOC API");
    }

    #[test]
    fn test_fetch_error_api_code() {
        let err: NotifyError = FetchError::Api { code: -1 }.into();
        assert!(matches!(err, NotifyError::Fetch(FetchError::Api { code: -1 })));
        assert_eq!(err.to_string(), "Fetch error: MOOC API returned error code -1");
    }

    #[test]
    fn test_delivery_error_conversion() {
        let err: NotifyError = DeliveryError::Transport("connection refused".to_string()).into();
        assert!(matches!(err, NotifyError::Delivery(_)));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: NotifyError = io_err.into();
        assert!(matches!(err, NotifyError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: FetchError = json_err.into();
        assert!(matches!(err, FetchError::Json(_)));
    }
}
