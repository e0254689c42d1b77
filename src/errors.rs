use axum::http::StatusCode;
use std::fmt;

/// Application-specific error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The name to look up contained no tokens.
    EmptyInput,
    /// Network failure or non-success status from the CCB API.
    RemoteTransport(String),
    /// The CCB response body could not be parsed into an envelope.
    MalformedResponse(String),
    /// Internal error (e.g. HTTP client construction).
    Internal(String),
}

impl AppError {
    /// Conventional HTTP status for this error.
    ///
    /// Only used when strict status codes are enabled; by default every
    /// lookup outcome is reported with `200 OK`.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::EmptyInput => StatusCode::BAD_REQUEST,
            AppError::RemoteTransport(_) | AppError::MalformedResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Logs the error at a level matching its severity.
    pub fn log(&self) {
        match self {
            AppError::EmptyInput => tracing::debug!("Lookup rejected: {}", self),
            AppError::RemoteTransport(msg) => tracing::error!("CCB request failed: {}", msg),
            AppError::MalformedResponse(msg) => {
                tracing::error!("CCB response could not be parsed: {}", msg)
            }
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
        }
    }
}

impl fmt::Display for AppError {
    /// Formats the error for display.
    ///
    /// `EmptyInput` renders as `empty string`, which is what chat clients
    /// already match on.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::EmptyInput => write!(f, "empty string"),
            AppError::RemoteTransport(msg) => write!(f, "remote service error: {}", msg),
            AppError::MalformedResponse(msg) => write!(f, "malformed remote response: {}", msg),
            AppError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    /// Converts a `reqwest::Error` into an `AppError`.
    fn from(err: reqwest::Error) -> Self {
        AppError::RemoteTransport(err.to_string())
    }
}

impl From<quick_xml::DeError> for AppError {
    /// Converts a `quick_xml::DeError` into an `AppError`.
    fn from(err: quick_xml::DeError) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_display() {
        assert_eq!(AppError::EmptyInput.to_string(), "empty string");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::EmptyInput.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::RemoteTransport("timeout".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::MalformedResponse("eof".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_remote_errors_keep_detail() {
        let err = AppError::RemoteTransport("CCB returned 401 Unauthorized".to_string());
        assert!(err.to_string().contains("401"));
    }
}
