// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Client and console error types.

use thiserror::Error;

use estate_auth::AuthError;
use estate_core::{ActionId, ModuleId};

/// Result type alias for backend calls.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for console operations.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

// =============================================================================
// ClientError
// =============================================================================

/// Backend call failures.
///
/// None of these end the session; the caller decides what to show.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend rejected the bearer token (HTTP 401).
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Message from the response body, or the generic message.
        message: String,
    },

    /// The backend answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message from the response body, or the generic message.
        message: String,
    },

    /// The request never got a response.
    #[error("Transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("Failed to decode response: {message}")]
    Decode {
        /// Error message.
        message: String,
    },

    /// The client could not be built from its configuration.
    #[error("Invalid client configuration: {message}")]
    Configuration {
        /// Error message.
        message: String,
    },
}

impl ClientError {
    /// Creates an error for a non-success status.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        if status == 401 {
            Self::Unauthorized { message }
        } else {
            Self::Status { status, message }
        }
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns the HTTP status, if the backend answered.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for a 401.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

// =============================================================================
// ConsoleError
// =============================================================================

/// Console operation failures.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Token decoding or session persistence failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A backend call failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The operation needs a signed-in user.
    #[error("Not signed in")]
    NotAuthenticated,

    /// The session changed while the request was in flight; the result was
    /// discarded.
    #[error("Session changed while the request was in flight")]
    StaleResponse,

    /// The module is not in the catalog.
    #[error("Unknown module: {module_id}")]
    UnknownModule {
        /// Requested module.
        module_id: ModuleId,
    },

    /// The module has no such action.
    #[error("Module {module_id} has no action {action_id}")]
    UnknownAction {
        /// Module searched.
        module_id: ModuleId,
        /// Requested action.
        action_id: ActionId,
    },
}

impl ConsoleError {
    /// Returns `true` if the result was dropped because the session changed.
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleResponse)
    }

    /// Returns `true` if the failure is a token decode failure.
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, Self::Auth(e) if e.is_invalid_token())
    }
}
