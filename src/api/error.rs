//! API Errors
//!
//! Tagged transport result. Whether a failure is a connectivity problem is
//! decided by the variant, never by inspecting messages.

use thiserror::Error;

/// Why no interpretable response arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityCause {
    /// Aborted by the per-request timeout
    Timeout,
    /// The transport refused or could not open the connection
    Refused,
    /// A response object with status 0 (nothing reached the server)
    ZeroStatus,
}

impl std::fmt::Display for ConnectivityCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectivityCause::Timeout => write!(f, "request timed out"),
            ConnectivityCause::Refused => write!(f, "connection refused"),
            ConnectivityCause::ZeroStatus => write!(f, "no response"),
        }
    }
}

/// The two failure classes every error falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    Connectivity,
    Request,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("cannot reach server: {0}")]
    Connectivity(ConnectivityCause),

    #[error("request failed with status {status}: {message}")]
    Request { status: u16, message: String },

    #[error("unexpected response payload: {0}")]
    Decode(String),

    /// The request could not be built, usually a malformed base URL
    #[error("invalid request: {0}")]
    Invalid(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Classify a received HTTP status that was not a success
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        if status == 0 {
            ApiError::Connectivity(ConnectivityCause::ZeroStatus)
        } else {
            ApiError::Request {
                status,
                message: message.into(),
            }
        }
    }

    pub fn class(&self) -> FailureClass {
        match self {
            ApiError::Connectivity(_) => FailureClass::Connectivity,
            ApiError::Request { .. } | ApiError::Decode(_) | ApiError::Invalid(_) => FailureClass::Request,
        }
    }

    pub fn is_connectivity(&self) -> bool {
        self.class() == FailureClass::Connectivity
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message shown to the user for this failure
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Connectivity(ConnectivityCause::Timeout) => {
                "The server took too long to respond. Check your connection.".to_string()
            }
            ApiError::Connectivity(_) => "Cannot reach the server. Check your connection.".to_string(),
            ApiError::Request { status, message } => {
                let category = match status {
                    400 => "The request was rejected. Check the submitted details.".to_string(),
                    401 | 403 => "You are not authorized to do that.".to_string(),
                    404 => "The requested record was not found.".to_string(),
                    409 => "That record conflicts with an existing one.".to_string(),
                    422 => "The server could not accept the submitted details.".to_string(),
                    500..=599 => "Server error. Please try again later.".to_string(),
                    other => format!("Request failed (status {}).", other),
                };
                if message.is_empty() {
                    category
                } else {
                    format!("{} ({})", category, message)
                }
            }
            ApiError::Decode(_) => "Unexpected response from the server.".to_string(),
            ApiError::Invalid(detail) => {
                format!("The request could not be sent. Check the API address setting. ({})", detail)
            }
        }
    }
}

/// Pull a human-readable detail out of an error body.
///
/// Accepts `{"detail": ..}`, `{"message": ..}` or `{"error": ..}`; plain
/// text bodies are used as-is.
pub fn error_detail(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return String::new();
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => ["detail", "message", "error"]
            .iter()
            .find_map(|key| value.get(*key))
            .map(|detail| match detail.as_str() {
                Some(text) => text.to_string(),
                None => detail.to_string(),
            })
            .unwrap_or_default(),
        Err(_) => body.chars().take(200).collect(),
    }
}
