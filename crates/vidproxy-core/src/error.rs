//! Request-level failures.
//!
//! A request can fail in five ways: the client sent something unusable, the
//! body was over the size cap, the key does not exist, the bucket call failed,
//! or something inside the service broke. How each one is shown to a client
//! is described by [`ErrorMetadata`].

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Warn,
    Error,
}

/// How an error is presented over HTTP.
pub trait ErrorMetadata {
    fn http_status_code(&self) -> u16;

    /// Machine-readable code, e.g. `STORAGE_ERROR`
    fn error_code(&self) -> &'static str;

    /// Whether the same request may succeed if retried later
    fn is_recoverable(&self) -> bool;

    fn suggested_action(&self) -> Option<&'static str>;

    /// Message safe to show to the caller
    fn client_message(&self) -> String;

    /// Whether the internal message must stay out of responses
    fn is_sensitive(&self) -> bool;

    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Unusable request: not a form, no file, malformed key.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The bucket rejected or failed a write, head or signing call.
    #[error("Storage failure: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

struct Presentation {
    status: u16,
    code: &'static str,
    recoverable: bool,
    hint: Option<&'static str>,
    sensitive: bool,
    level: LogLevel,
}

impl AppError {
    fn presentation(&self) -> Presentation {
        match self {
            AppError::BadRequest(_) => Presentation {
                status: 400,
                code: "BAD_REQUEST",
                recoverable: false,
                hint: Some("Send a multipart form with a non-empty 'file' part"),
                sensitive: false,
                level: LogLevel::Debug,
            },
            AppError::PayloadTooLarge(_) => Presentation {
                status: 413,
                code: "PAYLOAD_TOO_LARGE",
                recoverable: false,
                hint: Some("Upload a smaller file"),
                sensitive: false,
                level: LogLevel::Warn,
            },
            AppError::NotFound(_) => Presentation {
                status: 404,
                code: "NOT_FOUND",
                recoverable: false,
                hint: Some("Use the VideoKey returned by the upload"),
                sensitive: false,
                level: LogLevel::Debug,
            },
            AppError::Storage(_) => Presentation {
                status: 500,
                code: "STORAGE_ERROR",
                recoverable: true,
                hint: Some("Retry after a short delay"),
                sensitive: true,
                level: LogLevel::Error,
            },
            AppError::Internal(_) => Presentation {
                status: 500,
                code: "INTERNAL_ERROR",
                recoverable: false,
                hint: None,
                sensitive: true,
                level: LogLevel::Error,
            },
        }
    }

    /// Variant name, reported as `error_type` when details are shown.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "BadRequest",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::NotFound(_) => "NotFound",
            AppError::Storage(_) => "Storage",
            AppError::Internal(_) => "Internal",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        self.presentation().status
    }

    fn error_code(&self) -> &'static str {
        self.presentation().code
    }

    fn is_recoverable(&self) -> bool {
        self.presentation().recoverable
    }

    fn suggested_action(&self) -> Option<&'static str> {
        self.presentation().hint
    }

    fn client_message(&self) -> String {
        match self {
            AppError::BadRequest(msg)
            | AppError::PayloadTooLarge(msg)
            | AppError::NotFound(msg) => msg.clone(),
            AppError::Storage(_) => "Failed to access storage".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    fn is_sensitive(&self) -> bool {
        self.presentation().sensitive
    }

    fn log_level(&self) -> LogLevel {
        self.presentation().level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_failures_are_hidden_and_retryable() {
        let err = AppError::Storage("AccessDenied".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "STORAGE_ERROR");
        assert!(err.is_recoverable());
        assert!(err.is_sensitive());
        assert_eq!(err.client_message(), "Failed to access storage");
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn not_found_passes_message_through() {
        let err = AppError::NotFound("Video not found".to_string());
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(!err.is_sensitive());
        assert_eq!(err.client_message(), "Video not found");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn client_errors_keep_reason_verbatim() {
        let err = AppError::BadRequest("No file uploaded.".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.client_message(), "No file uploaded.");

        let err = AppError::PayloadTooLarge("File too large.".to_string());
        assert_eq!(err.http_status_code(), 413);
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn internal_errors_do_not_leak() {
        let err = AppError::Internal("no region".to_string());
        assert_eq!(err.client_message(), "Internal server error");
        assert!(err.is_sensitive());
        assert_eq!(err.suggested_action(), None);
        assert_eq!(err.to_string(), "Internal error: no region");
    }
}
