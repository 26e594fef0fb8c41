// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Fixtures
//!
//! Pre-built tokens, module catalogs and roles shared by the suites.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header};
use serde_json::{json, Value};

use estate_auth::ROLE_CLAIM;
use estate_core::{
    ActionId, Module, ModuleAction, ModuleId, Profile, Role, RoleDetails, RoleId,
    RoleModulePermission,
};

/// Tenant used throughout the suites.
pub const TEST_TENANT: &str = "tenant-a";

/// Shared secret for signed tokens.
pub const TEST_SECRET: &str = "integration-test-secret";

// =============================================================================
// Token Fixtures
// =============================================================================

/// Fixture providing bearer tokens.
pub struct TokenFixtures;

impl TokenFixtures {
    /// Encodes a payload into a token with a dummy signature.
    pub fn unsigned(payload: &Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{}.{}.signature", header, body)
    }

    /// Signs a payload with HS256.
    pub fn signed(payload: &Value, secret: &str) -> String {
        jsonwebtoken::encode(
            &Header::default(),
            payload,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to sign token")
    }

    /// Claims of a manager who may read UserManagement but not Billing.
    pub fn manager_payload() -> Value {
        json!({
            "nameid": "42",
            "email": "ann@estate.test",
            "name": "Ann Manager",
            (ROLE_CLAIM): "Manager",
            "TenantId": TEST_TENANT,
            "exp": (Utc::now() + Duration::hours(1)).timestamp(),
            "Permissions-UserManagement": ["Read", "Create"],
            "Permissions-Billing": ["Create"],
        })
    }

    /// Claims of a user with read access to every catalog module.
    pub fn admin_payload() -> Value {
        json!({
            "nameid": "1",
            "email": "root@estate.test",
            (ROLE_CLAIM): ["Admin", "Manager"],
            "TenantId": TEST_TENANT,
            "Permissions-UserManagement": ["Read", "Create", "Update", "Delete"],
            "Permissions-Billing": ["Read"],
            "Permissions-Reports": ["Read"],
        })
    }

    /// Claims without any module claims.
    pub fn no_permissions_payload() -> Value {
        json!({
            "nameid": "7",
            "email": "guest@estate.test",
        })
    }

    /// Unsigned manager token.
    pub fn manager() -> String {
        Self::unsigned(&Self::manager_payload())
    }

    /// Unsigned admin token.
    pub fn admin() -> String {
        Self::unsigned(&Self::admin_payload())
    }

    /// A string that is not a token.
    pub fn malformed() -> String {
        "definitely-not-a-token".to_string()
    }
}

// =============================================================================
// Catalog Fixtures
// =============================================================================

/// Fixture providing module catalogs.
pub struct CatalogFixtures;

impl CatalogFixtures {
    /// Read action id shared by every catalog module.
    pub const READ: ActionId = ActionId::new(2);
    /// Create action id.
    pub const CREATE: ActionId = ActionId::new(3);

    /// UserManagement, Billing, Reports in server order.
    pub fn standard() -> Vec<Module> {
        vec![
            Self::module(1, "UserManagement"),
            Self::module(2, "Billing"),
            Self::module(3, "Reports"),
        ]
    }

    /// A catalog module with Read and Create actions.
    pub fn module(id: i64, name: &str) -> Module {
        Module::new(ModuleId::new(id), name)
            .with_action(ModuleAction::new(Self::READ, "Read"))
            .with_action(ModuleAction::new(Self::CREATE, "Create"))
    }
}

// =============================================================================
// Role Fixtures
// =============================================================================

/// Fixture providing roles.
pub struct RoleFixtures;

impl RoleFixtures {
    /// Role id of [`RoleFixtures::manager`].
    pub const MANAGER_ID: RoleId = RoleId::new(5);

    /// A role holding Read on UserManagement only.
    pub fn manager() -> RoleDetails {
        RoleDetails {
            id: Self::MANAGER_ID,
            name: "Manager".to_string(),
            role_module_permissions: vec![RoleModulePermission {
                role_id: Self::MANAGER_ID,
                module_id: ModuleId::new(1),
                action_id: CatalogFixtures::READ,
                module_name: Some("UserManagement".to_string()),
            }],
        }
    }

    /// Role list entries.
    pub fn listing() -> Vec<Role> {
        vec![
            Role {
                id: RoleId::new(1),
                name: "Admin".to_string(),
            },
            Role {
                id: Self::MANAGER_ID,
                name: "Manager".to_string(),
            },
        ]
    }
}

// =============================================================================
// Profile Fixtures
// =============================================================================

/// Fixture providing profiles.
pub struct ProfileFixtures;

impl ProfileFixtures {
    /// Profile matching [`TokenFixtures::manager_payload`].
    pub fn manager() -> Profile {
        Profile {
            id: "42".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Manager".to_string(),
            email: "ann@estate.test".to_string(),
            roles: vec!["Manager".to_string()],
            module_permissions: [(
                "UserManagement".to_string(),
                vec!["Read".to_string(), "Create".to_string()],
            )]
            .into_iter()
            .collect(),
        }
    }
}
