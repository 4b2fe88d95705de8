// Error types for the submission workflow.
//
// `ValidationError` is raised before any work starts and never reaches the
// error panel; `SubmitError` covers everything that can go wrong once the
// controller has entered the loading state.

use std::path::PathBuf;
use thiserror::Error;

/// Shown when a submission fails without any usable server-supplied text.
pub const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Pre-flight failure: the submission is blocked entirely.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload a resume and paste a job description.")]
    MissingInput,
}

/// A failure that ends a submission attempt in the error state.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The resume could not be read (or was empty).
    #[error("Failed to read resume '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No response was obtained from the endpoint.
    #[error("Request to '{url}' failed: {reason}")]
    Network { url: String, reason: String },

    /// The endpoint answered with a non-success status.
    #[error("Server rejected the submission with status {status}")]
    Server { status: u16, message: Option<String> },

    /// A success response whose body was not a valid match result.
    #[error("Could not parse response body: {0}")]
    Parse(String),
}

impl SubmitError {
    /// Text for the error panel: server text first, then a synthesized
    /// status line, then the generic message.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Server {
                message: Some(msg), ..
            } if !msg.is_empty() => msg.clone(),
            SubmitError::Server { status, .. } => format!("Server error: {status}"),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    /// HTTP status, when a response was obtained.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            SubmitError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Invalid configuration value from the config file, environment or flags.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    FileParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },

    #[error("Endpoint URL must not be empty")]
    EmptyEndpoint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_text_takes_precedence() {
        let e = SubmitError::Server {
            status: 400,
            message: Some("Unsupported file type".into()),
        };
        assert_eq!(e.user_message(), "Unsupported file type");
        assert_eq!(e.http_status(), Some(400));
    }

    #[test]
    fn status_is_synthesized_without_server_text() {
        let e = SubmitError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(e.user_message(), "Server error: 500");

        let blank = SubmitError::Server {
            status: 502,
            message: Some(String::new()),
        };
        assert_eq!(blank.user_message(), "Server error: 502");
    }

    #[test]
    fn transport_failures_use_generic_message() {
        let network = SubmitError::Network {
            url: "http://localhost:1".into(),
            reason: "connection refused".into(),
        };
        assert_eq!(network.user_message(), GENERIC_FAILURE_MESSAGE);
        assert_eq!(network.http_status(), None);

        let parse = SubmitError::Parse("expected value".into());
        assert_eq!(parse.user_message(), GENERIC_FAILURE_MESSAGE);

        let read = SubmitError::Read {
            path: PathBuf::from("cv.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(read.user_message(), GENERIC_FAILURE_MESSAGE);
        assert!(read.to_string().contains("cv.pdf"));
    }
}
