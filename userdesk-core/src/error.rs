/// Structured error types for userdesk-core.
///
/// Uses `thiserror` so the binary can match on kinds where it cares,
/// while every failure still renders to a single human-readable message.

use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a request against the remote collection
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection, TLS or timeout failure before a response arrived
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("{status}: {message}")]
    Status { status: StatusCode, message: String },

    /// The response body did not match the expected shape
    #[error("invalid response body: {reason}")]
    Decode { reason: String },

    /// The configured endpoint cannot address single records
    #[error("invalid endpoint '{endpoint}': {reason}")]
    Endpoint { endpoint: String, reason: String },
}

impl ApiError {
    /// Create a status error
    pub fn status(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }

    /// Create an endpoint error
    pub fn endpoint(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Endpoint {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }
}

/// Form submission rejected before any request was issued
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("'{value}' is not a valid email address")]
    InvalidEmail { value: String },

    #[error("the record being edited has no id")]
    MissingId,
}

/// Configuration file problems
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to write config file {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config already exists at {path:?}")]
    AlreadyExists { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ApiError::status(StatusCode::NOT_FOUND, "user not found");
        assert_eq!(err.to_string(), "404 Not Found: user not found");
    }

    #[test]
    fn test_form_error_display() {
        let err = FormError::Required { field: "Email" };
        assert_eq!(err.to_string(), "Email is required");

        let err = FormError::InvalidEmail {
            value: "nope".to_string(),
        };
        assert!(err.to_string().contains("nope"));
    }
}
