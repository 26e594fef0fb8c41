// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Backend endpoints used by the console.

use async_trait::async_trait;
use reqwest::Method;

use estate_core::{
    AssignPermissionRequest, CreateRoleRequest, LoginRequest, LoginResponse, Module, Profile,
    RemovePermissionRequest, Role, RoleDetails, RoleId, UserRoleRequest,
};

use crate::error::ClientResult;
use crate::http::RestClient;

// =============================================================================
// Endpoint paths
// =============================================================================

/// Sign-in endpoint.
pub const LOGIN_PATH: &str = "/Auth/login";
/// Module catalog endpoint.
pub const MODULES_PATH: &str = "/RoleManagement/modules";
/// Current user profile endpoint.
pub const PROFILE_PATH: &str = "/Profile";
/// Role list endpoint.
pub const ROLES_PATH: &str = "/RoleManagement/GetRoles";
/// Role detail endpoint prefix; the role id is appended.
pub const ROLE_PATH: &str = "/RoleManagement/GetRole";
/// Grant endpoint.
pub const ASSIGN_PERMISSION_PATH: &str = "/RoleManagement/AssignPermissionToRole";
/// Revoke endpoint.
pub const REMOVE_PERMISSION_PATH: &str = "/RoleManagement/RemovePermissionFromRole";
/// Role creation endpoint.
pub const CREATE_ROLE_PATH: &str = "/RoleManagement/CreateRole";
/// User role assignment endpoint.
pub const ASSIGN_ROLE_PATH: &str = "/RoleManagement/AssignRoleToUser";
/// User role removal endpoint.
pub const REMOVE_ROLE_PATH: &str = "/RoleManagement/RemoveRoleFromUser";

// =============================================================================
// AdminApi
// =============================================================================

/// The backend operations the console relies on.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Exchanges credentials for a bearer token.
    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse>;

    /// Fetches the module catalog in server order.
    async fn modules(&self) -> ClientResult<Vec<Module>>;

    /// Fetches the signed-in user's profile.
    async fn profile(&self) -> ClientResult<Profile>;

    /// Lists roles.
    async fn roles(&self) -> ClientResult<Vec<Role>>;

    /// Fetches a role with its grants.
    async fn role(&self, id: RoleId) -> ClientResult<RoleDetails>;

    /// Grants a (module, action) pair to a role.
    async fn assign_permission(&self, request: &AssignPermissionRequest) -> ClientResult<()>;

    /// Revokes a (module, action) pair from a role.
    async fn remove_permission(&self, request: &RemovePermissionRequest) -> ClientResult<()>;

    /// Creates a role without grants.
    async fn create_role(&self, request: &CreateRoleRequest) -> ClientResult<Role>;

    /// Gives a user a role.
    async fn assign_role_to_user(&self, request: &UserRoleRequest) -> ClientResult<()>;

    /// Takes a role away from a user.
    async fn remove_role_from_user(&self, request: &UserRoleRequest) -> ClientResult<()>;

    /// Switches the tenant sent with later requests.
    ///
    /// Called once a sign-in has been established.
    fn select_tenant(&self, tenant_id: &str);
}

#[async_trait]
impl AdminApi for RestClient {
    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        let builder = self
            .request_for_tenant(Method::POST, LOGIN_PATH, Some(request.tenant_id.clone()))
            .json(request);
        self.send_json(builder, LOGIN_PATH).await
    }

    async fn modules(&self) -> ClientResult<Vec<Module>> {
        self.send_json(self.request(Method::GET, MODULES_PATH), MODULES_PATH)
            .await
    }

    async fn profile(&self) -> ClientResult<Profile> {
        self.send_json(self.request(Method::GET, PROFILE_PATH), PROFILE_PATH)
            .await
    }

    async fn roles(&self) -> ClientResult<Vec<Role>> {
        self.send_json(self.request(Method::GET, ROLES_PATH), ROLES_PATH)
            .await
    }

    async fn role(&self, id: RoleId) -> ClientResult<RoleDetails> {
        let path = format!("{}/{}", ROLE_PATH, id);
        self.send_json(self.request(Method::GET, &path), ROLE_PATH)
            .await
    }

    async fn assign_permission(&self, request: &AssignPermissionRequest) -> ClientResult<()> {
        let builder = self
            .request(Method::POST, ASSIGN_PERMISSION_PATH)
            .json(request);
        self.send_empty(builder, ASSIGN_PERMISSION_PATH).await
    }

    async fn remove_permission(&self, request: &RemovePermissionRequest) -> ClientResult<()> {
        // The backend reads the triple from the DELETE body.
        let builder = self
            .request(Method::DELETE, REMOVE_PERMISSION_PATH)
            .json(request);
        self.send_empty(builder, REMOVE_PERMISSION_PATH).await
    }

    async fn create_role(&self, request: &CreateRoleRequest) -> ClientResult<Role> {
        let builder = self.request(Method::POST, CREATE_ROLE_PATH).json(request);
        self.send_json(builder, CREATE_ROLE_PATH).await
    }

    async fn assign_role_to_user(&self, request: &UserRoleRequest) -> ClientResult<()> {
        let builder = self.request(Method::POST, ASSIGN_ROLE_PATH).json(request);
        self.send_empty(builder, ASSIGN_ROLE_PATH).await
    }

    async fn remove_role_from_user(&self, request: &UserRoleRequest) -> ClientResult<()> {
        let builder = self.request(Method::DELETE, REMOVE_ROLE_PATH).json(request);
        self.send_empty(builder, REMOVE_ROLE_PATH).await
    }

    fn select_tenant(&self, tenant_id: &str) {
        self.set_tenant(tenant_id);
    }
}
