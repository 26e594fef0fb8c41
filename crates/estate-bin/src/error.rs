// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for the estate binary.

use thiserror::Error;

use estate_auth::AuthError;
use estate_client::{ClientError, ConsoleError};
use estate_config::ConfigError;

/// Result type alias for estate-bin operations.
pub type BinResult<T> = Result<T, BinError>;

/// Errors that can occur in the estate binary.
#[derive(Debug, Error)]
pub enum BinError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid command input.
    #[error("Invalid input: {0}")]
    Input(String),

    /// Runtime error.
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Config loading error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Console operation error.
    #[error("{0}")]
    Console(#[from] ConsoleError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        /// The context description.
        context: String,
        /// The underlying error.
        #[source]
        source: Box<BinError>,
    },
}

impl BinError {
    /// Creates a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates an input error.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Creates a runtime error.
    pub fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    /// Creates an I/O error.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Adds context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Returns the exit code for this error.
    ///
    /// | Code | Meaning |
    /// |------|---------|
    /// | 1 | configuration |
    /// | 2 | authentication (not signed in, unusable token, HTTP 401) |
    /// | 3 | backend or transport failure |
    /// | 4 | invalid input |
    /// | 5 | I/O or token storage |
    /// | 6 | other runtime failure |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) | Self::Config(_) => 1,
            Self::Console(e) => console_exit_code(e),
            Self::Input(_) => 4,
            Self::Io(_) => 5,
            Self::Runtime(_) => 6,
            Self::WithContext { source, .. } => source.exit_code(),
        }
    }
}

fn console_exit_code(error: &ConsoleError) -> i32 {
    match error {
        ConsoleError::NotAuthenticated => 2,
        ConsoleError::Auth(AuthError::Storage { .. }) => 5,
        ConsoleError::Auth(_) => 2,
        ConsoleError::Client(ClientError::Unauthorized { .. }) => 2,
        ConsoleError::Client(ClientError::Configuration { .. }) => 1,
        ConsoleError::Client(_) => 3,
        ConsoleError::UnknownModule { .. } | ConsoleError::UnknownAction { .. } => 4,
        ConsoleError::StaleResponse => 6,
    }
}

impl From<AuthError> for BinError {
    fn from(err: AuthError) -> Self {
        Self::Console(ConsoleError::Auth(err))
    }
}

impl From<std::io::Error> for BinError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<anyhow::Error> for BinError {
    fn from(err: anyhow::Error) -> Self {
        Self::Runtime(format!("{:#}", err))
    }
}

impl From<serde_json::Error> for BinError {
    fn from(err: serde_json::Error) -> Self {
        Self::Runtime(format!("failed to render JSON: {}", err))
    }
}

// =============================================================================
// Error Reporting
// =============================================================================

/// Reports an error with its cause chain on stderr.
pub fn report_error(error: &BinError) {
    eprintln!("Error: {}", error);

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("  Caused by: {}", cause);
        source = cause.source();
    }
}

/// Reports an error and exits with the appropriate code.
pub fn report_error_and_exit(error: BinError) -> ! {
    report_error(&error);
    std::process::exit(error.exit_code())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = BinError::config("test error");
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_error_with_context() {
        let err = BinError::input("inner error").with_context("outer context");
        assert_eq!(err.to_string(), "outer context: Invalid input: inner error");
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(BinError::config("test").exit_code(), 1);
        assert_eq!(BinError::from(ConsoleError::NotAuthenticated).exit_code(), 2);
        assert_eq!(BinError::from(AuthError::invalid_token("bad")).exit_code(), 2);
        assert_eq!(BinError::from(AuthError::storage("disk")).exit_code(), 5);
        assert_eq!(
            BinError::from(ConsoleError::from(ClientError::status(401, "expired"))).exit_code(),
            2
        );
        assert_eq!(
            BinError::from(ConsoleError::from(ClientError::status(500, "boom"))).exit_code(),
            3
        );
        assert_eq!(BinError::io("test").exit_code(), 5);
        assert_eq!(BinError::runtime("test").exit_code(), 6);
    }

    #[test]
    fn test_anyhow_conversion_keeps_context() {
        let err: BinError = anyhow::anyhow!("root").context("reading password").into();
        assert_eq!(err.to_string(), "Runtime error: reading password: root");
    }
}
