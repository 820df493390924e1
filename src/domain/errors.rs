//! Domain error types
//!
//! This module defines the error hierarchy for the push pipeline.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main push pipeline error type
///
/// This is the primary error type used throughout the crate.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum PushError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Board collaborator errors (layer rendering, drill/netlist generation)
    #[error("Board error: {0}")]
    Board(String),

    /// AISLER service errors
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// Package assembly errors (scratch area, archive creation)
    #[error("Packaging error: {0}")]
    Packaging(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// The caller asserted the cancellation signal
    #[error("Push cancelled by caller")]
    Cancelled,
}

/// AISLER service-specific errors
///
/// Errors that occur when talking to the fabrication service.
/// These errors don't expose the underlying HTTP client types.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Failed to reach the service at all
    #[error("Failed to connect to the AISLER service: {0}")]
    ConnectionFailed(String),

    /// Response body did not parse into the expected shape
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },
}

// Conversion from std::io::Error
impl From<std::io::Error> for PushError {
    fn from(err: std::io::Error) -> Self {
        PushError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for PushError {
    fn from(err: serde_json::Error) -> Self {
        PushError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for PushError {
    fn from(err: toml::de::Error) -> Self {
        PushError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from zip archive errors
impl From<zip::result::ZipError> for PushError {
    fn from(err: zip::result::ZipError) -> Self {
        PushError::Packaging(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_error_display() {
        let err = PushError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_service_error_conversion() {
        let service_err = ServiceError::ConnectionFailed("Network error".to_string());
        let push_err: PushError = service_err.into();
        assert!(matches!(push_err, PushError::Service(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let push_err: PushError = io_err.into();
        assert!(matches!(push_err, PushError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let push_err: PushError = json_err.into();
        assert!(matches!(push_err, PushError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let push_err: PushError = toml_err.into();
        assert!(matches!(push_err, PushError::Configuration(_)));
        assert!(push_err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_cancelled_display() {
        let err = PushError::Cancelled;
        assert_eq!(err.to_string(), "Push cancelled by caller");
    }

    #[test]
    fn test_push_error_implements_std_error() {
        let err = PushError::Board("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_service_error_implements_std_error() {
        let err = ServiceError::ServerError {
            status: 503,
            message: "unavailable".to_string(),
        };
        let _: &dyn std::error::Error = &err;
    }
}
