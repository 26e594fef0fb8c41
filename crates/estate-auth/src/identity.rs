// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Signed-in user identity.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::claims::{ModuleClaims, TokenClaims};
use crate::permission::PermissionMapping;

/// The signed-in user as described by the bearer token.
///
/// Permissions are not stored: [`Identity::permissions`] derives them from
/// the module claims on every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// User identifier (`nameid`). Empty when the token has none.
    pub id: String,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Primary role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// All role claim values.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    /// Tenant the token was issued for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    /// Token expiry, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Module claims, in payload order.
    pub claims: ModuleClaims,
}

impl Identity {
    /// Builds an identity from classified claims.
    pub fn from_claims(claims: TokenClaims) -> Self {
        let id = match claims.name_id {
            Some(id) => id,
            None => {
                tracing::warn!("Token has no nameid claim; using an empty user id");
                String::new()
            }
        };

        let role = claims.roles.first().cloned();
        let expires_at = claims
            .expires_at
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single());

        Self {
            id,
            email: claims.email,
            name: claims.name,
            role,
            roles: claims.roles,
            tenant_id: claims.tenant_id,
            expires_at,
            claims: claims.module_claims,
        }
    }

    /// Derives the per-module permission mapping.
    pub fn permissions(&self) -> PermissionMapping {
        PermissionMapping::from_claims(&self.claims)
    }

    /// Returns `true` if the user holds the role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Returns `true` if the token carries an expiry in the past.
    ///
    /// Informational only; sessions are not ended because of it.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }

    /// Returns the display label for the user.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(self.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::ROLE_CLAIM;
    use serde_json::json;

    fn identity(payload: serde_json::Value) -> Identity {
        let raw = match payload {
            serde_json::Value::Object(map) => map,
            _ => panic!("payload must be an object"),
        };
        Identity::from_claims(TokenClaims::from_raw(raw))
    }

    #[test]
    fn test_identity_fields() {
        let id = identity(json!({
            "nameid": "42",
            "email": "a@x.io",
            "name": "Ann",
            ROLE_CLAIM: "Admin",
            "TenantId": "t-1",
            "Permissions-UserManagement": ["Read"],
        }));

        assert_eq!(id.id, "42");
        assert_eq!(id.email.as_deref(), Some("a@x.io"));
        assert_eq!(id.name.as_deref(), Some("Ann"));
        assert_eq!(id.role.as_deref(), Some("Admin"));
        assert!(id.has_role("Admin"));
        assert_eq!(id.claims.len(), 1);
        assert!(id.permissions().can_read("UserManagement"));
        assert_eq!(id.display_name(), "Ann");
    }

    #[test]
    fn test_identity_role_array() {
        let id = identity(json!({"nameid": "1", ROLE_CLAIM: ["Manager", "Auditor"]}));
        assert_eq!(id.role.as_deref(), Some("Manager"));
        assert_eq!(id.roles.len(), 2);
    }

    #[test]
    fn test_identity_missing_nameid() {
        let id = identity(json!({"email": "b@x.io"}));
        assert_eq!(id.id, "");
        assert_eq!(id.display_name(), "b@x.io");
        assert!(id.role.is_none());
    }

    #[test]
    fn test_identity_expiry() {
        let id = identity(json!({"nameid": "1", "exp": 1_000}));
        let exp = id.expires_at.unwrap();
        assert_eq!(exp.timestamp(), 1_000);
        assert!(id.is_expired(Utc::now()));

        let id = identity(json!({"nameid": "1"}));
        assert!(!id.is_expired(Utc::now()));
    }

    #[test]
    fn test_identity_serialize() {
        let id = identity(json!({"nameid": "7", "Permissions-Billing": ["Read"]}));
        let value = serde_json::to_value(&id).unwrap();
        assert_eq!(value["id"], "7");
        assert_eq!(value["claims"]["Permissions-Billing"], json!(["Read"]));
        assert!(value.get("email").is_none());
    }
}
