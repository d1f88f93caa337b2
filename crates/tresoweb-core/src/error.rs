//! Error types for tresoweb-core
//!
//! Filtering itself is a total function and has no error cases; the
//! errors here belong to the snapshot bookkeeping around it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::EntityKind;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Snapshot not loaded for the requested entity kind
    NotLoaded,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::NotLoaded => write!(f, "NOT_LOADED"),
        }
    }
}

/// Severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Debug => write!(f, "debug"),
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Detailed error information for diagnostics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            suggestions: vec![],
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("No snapshot loaded for entity kind: {kind}")]
    NotLoaded { kind: EntityKind },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::NotLoaded { .. } => ErrorCode::NotLoaded,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::NotLoaded { .. } => ErrorSeverity::Warning,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::NotLoaded { kind } => details
                .with_suggestion(format!("Load the {} snapshot before opening its listing.", kind))
                .with_suggestion("Check the data section of the configuration.".to_string()),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::NotLoaded.to_string(), "NOT_LOADED");
    }

    #[test]
    fn test_not_loaded_code_and_severity() {
        let error = CoreError::NotLoaded { kind: EntityKind::Tiers };
        assert_eq!(error.code(), ErrorCode::NotLoaded);
        assert_eq!(error.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_not_loaded_details() {
        let error = CoreError::NotLoaded { kind: EntityKind::Purchases };
        let details = error.to_details();

        assert_eq!(details.code, ErrorCode::NotLoaded);
        assert!(details.message.contains("purchases"));
        assert!(!details.suggestions.is_empty());
    }
}
