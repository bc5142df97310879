//! Error Classifier
//!
//! Maps an arbitrary fetch failure into a typed, retryability-tagged
//! [`ClassifiedError`]. Retryability is decided over the taxonomy here and
//! nowhere else; the retry engine only reads `retryable`.

use std::fmt;
use std::sync::Arc;

use crate::error::Error;

/// Failure taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Network,
    Server,
    Timeout,
    Validation,
    Unknown,
}

impl ErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Network => "network",
            ErrorKind::Server => "server",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Validation => "validation",
            ErrorKind::Unknown => "unknown",
        }
    }

    /// Validation errors can never succeed on retry
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ErrorKind::Validation)
    }

    fn user_message(&self) -> &'static str {
        match self {
            ErrorKind::Network => "Network error. Please check your connection and try again.",
            ErrorKind::Server => "Server error. Please try again later.",
            ErrorKind::Timeout => "Request timed out. Please try again.",
            ErrorKind::Validation => "Invalid request. Please check your filters.",
            ErrorKind::Unknown => "An unexpected error occurred.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A load failure after classification
#[derive(Debug, Clone)]
pub struct ClassifiedError {
    /// Failure category
    pub kind: ErrorKind,
    /// User-facing message
    pub message: String,
    /// Whether a retry may succeed
    pub retryable: bool,
    /// Original failure, if any
    pub cause: Option<Arc<anyhow::Error>>,
}

impl ClassifiedError {
    /// Build an error of `kind` with its default message and retryability
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.user_message().to_string(),
            retryable: kind.is_retryable(),
            cause: None,
        }
    }

    fn with_cause(mut self, cause: anyhow::Error) -> Self {
        self.cause = Some(Arc::new(cause));
        self
    }

    pub fn is_network(&self) -> bool {
        self.kind == ErrorKind::Network
    }
}

impl fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error: {}", self.kind, self.message)
    }
}

/// Classify a fetch failure. Total: never panics, unknown shapes map to
/// `Unknown` (retryable).
pub fn classify(error: anyhow::Error) -> ClassifiedError {
    if let Some(kind) = kind_from_types(&error) {
        return ClassifiedError::new(kind).with_cause(error);
    }

    let text = format!("{error:#}");
    // a status outside the table is judged by the body the server sent
    let message = status_body(&error).unwrap_or(&text).to_lowercase();

    let kind = if contains_any(&message, &["network", "offline", "failed to fetch"]) {
        ErrorKind::Network
    } else if contains_any(&message, &["timeout", "timed out"]) {
        ErrorKind::Timeout
    } else if contains_any(&message, &["500", "server"]) {
        ErrorKind::Server
    } else if contains_any(&message, &["validation", "invalid"]) {
        ErrorKind::Validation
    } else {
        ErrorKind::Unknown
    };

    let mut classified = ClassifiedError::new(kind);
    if kind == ErrorKind::Unknown && !text.trim().is_empty() {
        classified.message = text;
    }
    classified.with_cause(error)
}

/// Type-level rules: transport faults and HTTP statuses
fn kind_from_types(error: &anyhow::Error) -> Option<ErrorKind> {
    for cause in error.chain() {
        if let Some(err) = cause.downcast_ref::<reqwest::Error>() {
            if err.is_timeout() {
                return Some(ErrorKind::Timeout);
            }
            if err.is_connect() || err.is_request() {
                return Some(ErrorKind::Network);
            }
            if let Some(kind) = err.status().and_then(|status| kind_from_status(status.as_u16())) {
                return Some(kind);
            }
        }
        if cause.downcast_ref::<std::io::Error>().is_some() {
            return Some(ErrorKind::Network);
        }
        if cause.downcast_ref::<tokio::time::error::Elapsed>().is_some() {
            return Some(ErrorKind::Timeout);
        }
        if let Some(err) = cause.downcast_ref::<Error>() {
            match err {
                Error::Transport { .. } | Error::Io { .. } => return Some(ErrorKind::Network),
                Error::Timeout { .. } => return Some(ErrorKind::Timeout),
                Error::Status { status, .. } => {
                    if let Some(kind) = kind_from_status(*status) {
                        return Some(kind);
                    }
                }
                Error::Invalid { .. } => return Some(ErrorKind::Validation),
                _ => {}
            }
        }
    }
    None
}

fn kind_from_status(status: u16) -> Option<ErrorKind> {
    match status {
        408 | 504 => Some(ErrorKind::Timeout),
        400 | 422 => Some(ErrorKind::Validation),
        500..=599 => Some(ErrorKind::Server),
        _ => None,
    }
}

/// Body of the first `Status` failure in the chain
fn status_body(error: &anyhow::Error) -> Option<&str> {
    error.chain().find_map(|cause| match cause.downcast_ref::<Error>() {
        Some(Error::Status { message, .. }) => Some(message.as_str()),
        _ => None,
    })
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(message: &str) -> ErrorKind {
        classify(anyhow::anyhow!(message.to_string())).kind
    }

    #[test]
    fn test_failed_to_fetch_is_network() {
        let err = classify(anyhow::anyhow!("TypeError: Failed to fetch"));
        assert_eq!(err.kind, ErrorKind::Network);
        assert!(err.retryable);
        assert!(err.cause.is_some());
    }

    #[test]
    fn test_message_rules_in_order() {
        assert_eq!(kind_of("device is offline"), ErrorKind::Network);
        assert_eq!(kind_of("Request Timed Out"), ErrorKind::Timeout);
        assert_eq!(kind_of("HTTP 500"), ErrorKind::Server);
        assert_eq!(kind_of("internal server fault"), ErrorKind::Server);
        assert_eq!(kind_of("validation failed for field grad_year"), ErrorKind::Validation);
        assert_eq!(kind_of("Invalid filter"), ErrorKind::Validation);
        // network wins over timeout when both appear
        assert_eq!(kind_of("network timeout"), ErrorKind::Network);
        // server wins over validation
        assert_eq!(kind_of("server says invalid"), ErrorKind::Server);
    }

    #[test]
    fn test_validation_never_retryable() {
        let err = classify(anyhow::anyhow!("invalid sort field"));
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(!err.retryable);
        assert_eq!(err.message, "Invalid request. Please check your filters.");
    }

    #[test]
    fn test_unknown_keeps_original_message() {
        let err = classify(anyhow::anyhow!("quota exceeded"));
        assert_eq!(err.kind, ErrorKind::Unknown);
        assert!(err.retryable);
        assert_eq!(err.message, "quota exceeded");

        let blank = classify(anyhow::anyhow!(""));
        assert_eq!(blank.kind, ErrorKind::Unknown);
        assert_eq!(blank.message, "An unexpected error occurred.");
    }

    #[test]
    fn test_typed_failures() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert_eq!(classify(anyhow::Error::new(io)).kind, ErrorKind::Network);

        let transport = Error::Transport {
            message: "socket closed".to_string(),
        };
        assert_eq!(classify(anyhow::Error::new(transport)).kind, ErrorKind::Network);

        let unprocessable = Error::Status {
            status: 422,
            message: "unprocessable".to_string(),
        };
        let classified = classify(anyhow::Error::new(unprocessable));
        assert_eq!(classified.kind, ErrorKind::Validation);
        assert!(!classified.retryable);

        let bad_gateway = Error::Status {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(classify(anyhow::Error::new(bad_gateway)).kind, ErrorKind::Server);
    }

    #[test]
    fn test_unlisted_status_keeps_its_text() {
        let not_found = Error::Status {
            status: 404,
            message: "no such roster".to_string(),
        };
        let classified = classify(anyhow::Error::new(not_found));
        assert_eq!(classified.kind, ErrorKind::Unknown);
        assert!(classified.retryable);
        assert!(classified.message.contains("no such roster"), "{}", classified.message);

        // the body still goes through the message rules
        let offline = Error::Status {
            status: 409,
            message: "upstream offline".to_string(),
        };
        assert_eq!(classify(anyhow::Error::new(offline)).kind, ErrorKind::Network);
    }

    #[test]
    fn test_context_chain_is_searched() {
        let err = anyhow::anyhow!("connection reset").context("loading players page 2: network");
        assert_eq!(classify(err).kind, ErrorKind::Network);
    }

    #[test]
    fn test_only_validation_is_not_retryable() {
        for kind in [
            ErrorKind::Network,
            ErrorKind::Server,
            ErrorKind::Timeout,
            ErrorKind::Unknown,
        ] {
            assert!(ClassifiedError::new(kind).retryable, "{kind} should retry");
        }
        assert!(!ClassifiedError::new(ErrorKind::Validation).retryable);
    }
}
