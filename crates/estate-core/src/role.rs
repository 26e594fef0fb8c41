// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Roles and their module/action grants.

use serde::{Deserialize, Serialize};

use crate::types::{ActionId, ModuleId, RoleId};

/// A role as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role identifier.
    pub id: RoleId,
    /// Role name.
    pub name: String,
}

/// A single (module, action) grant held by a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleModulePermission {
    /// Role holding the grant.
    pub role_id: RoleId,
    /// Module of the grant.
    pub module_id: ModuleId,
    /// Action of the grant.
    pub action_id: ActionId,
    /// Module name, when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
}

impl RoleModulePermission {
    /// Returns `true` if this grant is for the given module/action pair.
    pub fn matches(&self, module_id: ModuleId, action_id: ActionId) -> bool {
        self.module_id == module_id && self.action_id == action_id
    }
}

/// A role together with every grant it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDetails {
    /// Role identifier.
    pub id: RoleId,
    /// Role name.
    pub name: String,
    /// Grants held by the role.
    #[serde(default)]
    pub role_module_permissions: Vec<RoleModulePermission>,
}

impl RoleDetails {
    /// Returns `true` if the role holds the given module/action pair.
    pub fn holds(&self, module_id: ModuleId, action_id: ActionId) -> bool {
        self.role_module_permissions
            .iter()
            .any(|p| p.matches(module_id, action_id))
    }
}

/// Body of `POST /RoleManagement/AssignPermissionToRole`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignPermissionRequest {
    /// Target role.
    pub role_id: RoleId,
    /// Module of the grant.
    pub module_id: ModuleId,
    /// Action of the grant.
    pub action_id: ActionId,
    /// Module name; the backend records it alongside the grant.
    pub module_name: String,
}

/// Body of `DELETE /RoleManagement/RemovePermissionFromRole`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovePermissionRequest {
    /// Target role.
    pub role_id: RoleId,
    /// Module of the grant.
    pub module_id: ModuleId,
    /// Action of the grant.
    pub action_id: ActionId,
}

/// Body of `POST /RoleManagement/CreateRole`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoleRequest {
    /// Name of the new role.
    pub name: String,
}

/// Body of `POST /RoleManagement/AssignRoleToUser` and
/// `DELETE /RoleManagement/RemoveRoleFromUser`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRoleRequest {
    /// User receiving or losing the role.
    pub user_id: String,
    /// Role.
    pub role_id: RoleId,
}

impl UserRoleRequest {
    /// Creates a new user/role request.
    pub fn new(user_id: impl Into<String>, role_id: RoleId) -> Self {
        Self {
            user_id: user_id.into(),
            role_id,
        }
    }
}
