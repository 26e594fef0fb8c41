// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication error types.

use thiserror::Error;

/// Result type alias for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication and session errors.
///
/// An identity with no module claims is not an error: it yields
/// [`ModuleAccess::EmptyAccess`](crate::ModuleAccess::EmptyAccess).
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token could not be decoded into a claims object.
    #[error("Invalid token: {reason}")]
    InvalidToken {
        /// Why decoding failed.
        reason: String,
    },

    /// The operation needs an authenticated session.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The persisted token could not be read or written.
    #[error("Token storage error: {message}")]
    Storage {
        /// Error message.
        message: String,
    },
}

impl AuthError {
    /// Creates an invalid token error.
    pub fn invalid_token(reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            reason: reason.into(),
        }
    }

    /// Creates a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a token decode failure.
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, Self::InvalidToken { .. })
    }
}
