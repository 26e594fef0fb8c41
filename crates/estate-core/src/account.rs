// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Login payloads and the user profile.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Body of `POST /Auth/login`.
///
/// The tenant identifier is also sent as the `X-TenantId` header.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Tenant the user belongs to.
    pub tenant_id: String,
    /// Login email.
    pub email: String,
    /// Password.
    pub password: String,
}

impl LoginRequest {
    /// Creates a new login request.
    pub fn new(
        tenant_id: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("tenant_id", &self.tenant_id)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Successful login response.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token.
    pub token: String,
    /// Refresh token.
    #[serde(default)]
    pub refresh_token: String,
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &"***")
            .field("refresh_token", &"***")
            .finish()
    }
}

/// Profile of the signed-in user, as returned by `GET /Profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// User identifier.
    pub id: String,
    /// First name.
    #[serde(default)]
    pub first_name: String,
    /// Last name.
    #[serde(default)]
    pub last_name: String,
    /// Email.
    #[serde(default)]
    pub email: String,
    /// Role names.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Actions granted per module name.
    #[serde(default)]
    pub module_permissions: BTreeMap<String, Vec<String>>,
}

impl Profile {
    /// Returns the display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
