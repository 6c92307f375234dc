//! Result and error types for flowcheck.
//!
//! Every failure category surfaces immediately and aborts the remaining
//! steps of a run. There is no local recovery or retry; a smoke test is
//! supposed to fail loudly on the first regression.

use thiserror::Error;

/// Result type for flow operations
pub type FlowResult<T> = Result<T, FlowError>;

/// Errors that can occur while driving a flow
#[derive(Debug, Error)]
pub enum FlowError {
    /// Browser process could not start (fatal, unrecoverable)
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Page-level error (element missing, tab gone, etc.)
    #[error("Page error: {message}")]
    Page {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// JavaScript evaluation error
    #[error("Script evaluation failed: {message}")]
    Evaluation {
        /// Error message
        message: String,
    },

    /// A bounded wait elapsed without its condition becoming true
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Credentials rejected or the dashboard landmark never appeared
    #[error("Login did not complete: {message}")]
    Login {
        /// Error message
        message: String,
    },

    /// A page's expected marker element never became visible
    #[error("{label} page failed: expected element never became visible")]
    PageAssertion {
        /// Label of the navigation case that failed
        label: String,
    },

    /// User menu or logout landmark never appeared
    #[error("Logout failed: {message}")]
    Logout {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FlowError {
    /// Create a page error
    #[must_use]
    pub fn page(message: impl Into<String>) -> Self {
        Self::Page {
            message: message.into(),
        }
    }

    /// Create a login error
    #[must_use]
    pub fn login(message: impl Into<String>) -> Self {
        Self::Login {
            message: message.into(),
        }
    }

    /// Create a logout error
    #[must_use]
    pub fn logout(message: impl Into<String>) -> Self {
        Self::Logout {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_error_display() {
        let err = FlowError::login("dashboard landmark never became visible");
        assert!(err.to_string().contains("Login did not complete"));
        assert!(err.to_string().contains("dashboard landmark"));
    }

    #[test]
    fn test_page_assertion_names_the_case() {
        let err = FlowError::PageAssertion {
            label: "Reports".to_string(),
        };
        assert!(err.to_string().contains("Reports"));
        assert!(err.to_string().contains("never became visible"));
    }

    #[test]
    fn test_timeout_display() {
        let err = FlowError::Timeout { ms: 10_000 };
        assert_eq!(err.to_string(), "Operation timed out after 10000ms");
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "chromium not found");
        let err: FlowError = io_err.into();
        assert!(err.to_string().contains("I/O"));
    }
}
