//! Error types and error handling for as-client.
//!
//! Every failure is handed straight back to the caller. Nothing in the crate
//! retries or recovers, so a call either yields an envelope or an error.

use std::fmt;
use thiserror::Error;

/// Stable identifiers for each class of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Only GET and HEAD go through the read helper.
    UnsupportedMethod,
    /// The request could not be built (usually a malformed URL).
    RequestConstruction,
    /// The request body could not be serialized to JSON.
    Encode,
    /// The network call failed or timed out.
    Transport,
    /// The response body did not match the envelope shape.
    Decode,
    /// The transport or logging setup failed.
    Config,
}

impl ErrorKind {
    /// Returns the kind as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::UnsupportedMethod => "unsupported_method",
            ErrorKind::RequestConstruction => "request_construction",
            ErrorKind::Encode => "encode",
            ErrorKind::Transport => "transport",
            ErrorKind::Decode => "decode",
            ErrorKind::Config => "config",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The main error type for as-client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A method other than GET or HEAD reached the read helper.
    #[error("Method {method} not currently supported by library (only HEAD and GET)")]
    UnsupportedMethod { method: String },

    /// Building the HTTP request failed.
    #[error("Create request: {message}")]
    RequestConstruction {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serializing the request body failed.
    #[error("Encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Performing the HTTP round trip failed.
    #[error("Request: {target}: {source}")]
    Transport {
        target: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body is not a valid envelope.
    #[error("Decode response (status {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// Building the transport or installing logging failed.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ClientError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::UnsupportedMethod { .. } => ErrorKind::UnsupportedMethod,
            ClientError::RequestConstruction { .. } => ErrorKind::RequestConstruction,
            ClientError::Encode(_) => ErrorKind::Encode,
            ClientError::Transport { .. } => ErrorKind::Transport,
            ClientError::Decode { .. } => ErrorKind::Decode,
            ClientError::Config { .. } => ErrorKind::Config,
        }
    }

    /// Returns true when the transport gave up because the timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Transport { source, .. } if source.is_timeout())
    }

    /// Creates an unsupported-method error.
    pub fn unsupported_method(method: impl Into<String>) -> Self {
        ClientError::UnsupportedMethod {
            method: method.into(),
        }
    }

    /// Creates a request construction error with a source.
    pub fn request_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ClientError::RequestConstruction {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a transport error for the given target URL.
    pub fn transport(target: impl Into<String>, source: reqwest::Error) -> Self {
        ClientError::Transport {
            target: target.into(),
            source,
        }
    }

    /// Creates a configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        ClientError::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a configuration error with a message and source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ClientError::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Result type alias for as-client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_kind_as_str() {
        assert_eq!(ErrorKind::UnsupportedMethod.as_str(), "unsupported_method");
        assert_eq!(
            ErrorKind::RequestConstruction.as_str(),
            "request_construction"
        );
        assert_eq!(ErrorKind::Encode.as_str(), "encode");
        assert_eq!(ErrorKind::Transport.as_str(), "transport");
        assert_eq!(ErrorKind::Decode.as_str(), "decode");
        assert_eq!(ErrorKind::Config.as_str(), "config");
    }

    #[test]
    fn test_client_error_kind() {
        let err = ClientError::unsupported_method("POST");
        assert_eq!(err.kind(), ErrorKind::UnsupportedMethod);

        let err = ClientError::config("Failed to create HTTP client");
        assert_eq!(err.kind(), ErrorKind::Config);

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ClientError::Decode {
            status: 200,
            source: json_err,
        };
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_error_display() {
        let err = ClientError::unsupported_method("POST");
        assert_eq!(
            format!("{}", err),
            "Method POST not currently supported by library (only HEAD and GET)"
        );

        let err = ClientError::config("Unknown log level: loud");
        assert_eq!(format!("{}", err), "Configuration error: Unknown log level: loud");
    }

    #[test]
    fn test_error_source_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = ClientError::config_with_source("Failed to create HTTP client", io_err);
        assert!(err.source().is_some());

        let err = ClientError::config("plain");
        assert!(err.source().is_none());
    }
}
