// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Mock Implementations
//!
//! An in-memory backend that records every call.
//!
//! - Configurable responses per endpoint
//! - Role grants change when permissions are assigned or removed
//! - Error injection by HTTP status
//! - A gate that holds the module catalog request in flight

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use estate_client::{AdminApi, ClientError, ClientResult};
use estate_core::{
    AssignPermissionRequest, CreateRoleRequest, LoginRequest, LoginResponse, Module, Profile,
    RemovePermissionRequest, Role, RoleDetails, RoleId, RoleModulePermission, UserRoleRequest,
};

use super::fixtures::{CatalogFixtures, ProfileFixtures, RoleFixtures, TokenFixtures};

// =============================================================================
// ApiCall
// =============================================================================

/// A recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    /// `POST /Auth/login`.
    Login {
        /// Tenant of the request.
        tenant_id: String,
        /// Email of the request.
        email: String,
    },
    /// `GET /RoleManagement/modules`.
    Modules,
    /// `GET /Profile`.
    Profile,
    /// `GET /RoleManagement/GetRoles`.
    Roles,
    /// `GET /RoleManagement/GetRole/{id}`.
    Role(RoleId),
    /// `POST /RoleManagement/AssignPermissionToRole`.
    Assign(AssignPermissionRequest),
    /// `DELETE /RoleManagement/RemovePermissionFromRole`.
    Remove(RemovePermissionRequest),
    /// `POST /RoleManagement/CreateRole`.
    CreateRole {
        /// Requested role name.
        name: String,
    },
    /// `POST /RoleManagement/AssignRoleToUser`.
    AssignRole(UserRoleRequest),
    /// `DELETE /RoleManagement/RemoveRoleFromUser`.
    RemoveRole(UserRoleRequest),
}

impl ApiCall {
    /// Returns `true` for calls that change backend state.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Self::Assign(_)
                | Self::Remove(_)
                | Self::CreateRole { .. }
                | Self::AssignRole(_)
                | Self::RemoveRole(_)
        )
    }
}

// =============================================================================
// MockAdminApi
// =============================================================================

/// A recording in-memory backend.
#[derive(Debug)]
pub struct MockAdminApi {
    login_token: Mutex<String>,
    catalog: Mutex<Vec<Module>>,
    profile: Mutex<Profile>,
    roles: Mutex<HashMap<RoleId, RoleDetails>>,
    user_roles: Mutex<Vec<(String, RoleId)>>,
    tenant: Mutex<Option<String>>,
    calls: Mutex<Vec<ApiCall>>,
    fail_next: Mutex<Option<(u16, String)>>,
    modules_gate: Mutex<Option<Arc<Notify>>>,
}

impl Default for MockAdminApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAdminApi {
    /// Creates a backend serving the standard fixtures.
    pub fn new() -> Self {
        let manager = RoleFixtures::manager();
        Self {
            login_token: Mutex::new(TokenFixtures::manager()),
            catalog: Mutex::new(CatalogFixtures::standard()),
            profile: Mutex::new(ProfileFixtures::manager()),
            roles: Mutex::new(HashMap::from([(manager.id, manager)])),
            user_roles: Mutex::new(Vec::new()),
            tenant: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            fail_next: Mutex::new(None),
            modules_gate: Mutex::new(None),
        }
    }

    /// Sets the token returned by login.
    pub fn set_login_token(&self, token: impl Into<String>) {
        *self.login_token.lock() = token.into();
    }

    /// Replaces the module catalog.
    pub fn set_catalog(&self, catalog: Vec<Module>) {
        *self.catalog.lock() = catalog;
    }

    /// Adds or replaces a role.
    pub fn insert_role(&self, role: RoleDetails) {
        self.roles.lock().insert(role.id, role);
    }

    /// Returns the current state of a role.
    pub fn role_state(&self, id: RoleId) -> Option<RoleDetails> {
        self.roles.lock().get(&id).cloned()
    }

    /// Returns the roles held by a user, in assignment order.
    pub fn roles_of(&self, user_id: &str) -> Vec<RoleId> {
        self.user_roles
            .lock()
            .iter()
            .filter(|(user, _)| user == user_id)
            .map(|(_, role)| *role)
            .collect()
    }

    /// Returns the tenant selected after the last established sign-in.
    pub fn selected_tenant(&self) -> Option<String> {
        self.tenant.lock().clone()
    }

    /// Fails the next call with the given HTTP status.
    pub fn fail_next(&self, status: u16, message: impl Into<String>) {
        *self.fail_next.lock() = Some((status, message.into()));
    }

    /// Holds module catalog requests until the returned gate is notified.
    pub fn hold_modules(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.modules_gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    /// Lets module catalog requests through again.
    pub fn release_modules(&self) {
        self.modules_gate.lock().take();
    }

    /// Returns every recorded call.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().clone()
    }

    /// Returns recorded calls that change backend state.
    pub fn writes(&self) -> Vec<ApiCall> {
        self.calls.lock().iter().filter(|c| c.is_write()).cloned().collect()
    }

    /// Counts recorded calls matching the predicate.
    pub fn count(&self, predicate: impl Fn(&ApiCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|c| predicate(c)).count()
    }

    /// Counts module catalog requests.
    pub fn modules_requests(&self) -> usize {
        self.count(|c| matches!(c, ApiCall::Modules))
    }

    /// Clears recorded calls.
    pub fn reset_calls(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, call: ApiCall) -> ClientResult<()> {
        self.calls.lock().push(call);
        match self.fail_next.lock().take() {
            Some((status, message)) => Err(ClientError::status(status, message)),
            None => Ok(()),
        }
    }

    fn role_or_404(&self, id: RoleId) -> ClientResult<RoleDetails> {
        self.role_state(id)
            .ok_or_else(|| ClientError::status(404, format!("Role {} not found", id)))
    }
}

#[async_trait]
impl AdminApi for MockAdminApi {
    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        self.record(ApiCall::Login {
            tenant_id: request.tenant_id.clone(),
            email: request.email.clone(),
        })?;
        Ok(LoginResponse {
            token: self.login_token.lock().clone(),
            refresh_token: "refresh".to_string(),
        })
    }

    async fn modules(&self) -> ClientResult<Vec<Module>> {
        self.record(ApiCall::Modules)?;
        let gate = self.modules_gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(self.catalog.lock().clone())
    }

    async fn profile(&self) -> ClientResult<Profile> {
        self.record(ApiCall::Profile)?;
        Ok(self.profile.lock().clone())
    }

    async fn roles(&self) -> ClientResult<Vec<Role>> {
        self.record(ApiCall::Roles)?;
        let mut roles: Vec<Role> = self
            .roles
            .lock()
            .values()
            .map(|r| Role {
                id: r.id,
                name: r.name.clone(),
            })
            .collect();
        roles.sort_by_key(|r| r.id.get());
        Ok(roles)
    }

    async fn role(&self, id: RoleId) -> ClientResult<RoleDetails> {
        self.record(ApiCall::Role(id))?;
        self.role_or_404(id)
    }

    async fn assign_permission(&self, request: &AssignPermissionRequest) -> ClientResult<()> {
        self.record(ApiCall::Assign(request.clone()))?;
        let mut roles = self.roles.lock();
        let role = roles
            .get_mut(&request.role_id)
            .ok_or_else(|| ClientError::status(404, "Role not found"))?;
        role.role_module_permissions.push(RoleModulePermission {
            role_id: request.role_id,
            module_id: request.module_id,
            action_id: request.action_id,
            module_name: Some(request.module_name.clone()),
        });
        Ok(())
    }

    async fn remove_permission(&self, request: &RemovePermissionRequest) -> ClientResult<()> {
        self.record(ApiCall::Remove(request.clone()))?;
        let mut roles = self.roles.lock();
        let role = roles
            .get_mut(&request.role_id)
            .ok_or_else(|| ClientError::status(404, "Role not found"))?;
        role.role_module_permissions
            .retain(|p| !p.matches(request.module_id, request.action_id));
        Ok(())
    }

    async fn create_role(&self, request: &CreateRoleRequest) -> ClientResult<Role> {
        self.record(ApiCall::CreateRole {
            name: request.name.clone(),
        })?;
        let mut roles = self.roles.lock();
        if roles.values().any(|r| r.name == request.name) {
            return Err(ClientError::status(409, format!("Role {} already exists", request.name)));
        }
        let next = roles.keys().map(|id| id.get()).max().unwrap_or(0) + 1;
        let role = RoleDetails {
            id: RoleId::new(next),
            name: request.name.clone(),
            role_module_permissions: Vec::new(),
        };
        roles.insert(role.id, role.clone());
        Ok(Role {
            id: role.id,
            name: role.name,
        })
    }

    async fn assign_role_to_user(&self, request: &UserRoleRequest) -> ClientResult<()> {
        self.record(ApiCall::AssignRole(request.clone()))?;
        self.role_or_404(request.role_id)?;
        let mut user_roles = self.user_roles.lock();
        let entry = (request.user_id.clone(), request.role_id);
        if !user_roles.contains(&entry) {
            user_roles.push(entry);
        }
        Ok(())
    }

    async fn remove_role_from_user(&self, request: &UserRoleRequest) -> ClientResult<()> {
        self.record(ApiCall::RemoveRole(request.clone()))?;
        self.user_roles
            .lock()
            .retain(|(user, role)| !(user == &request.user_id && *role == request.role_id));
        Ok(())
    }

    fn select_tenant(&self, tenant_id: &str) {
        *self.tenant.lock() = Some(tenant_id.to_string());
    }
}
