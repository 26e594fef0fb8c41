// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Console orchestration.
//!
//! [`AdminConsole`] ties the session to the backend: sign-in and sign-out,
//! the filtered navigation, the profile, and role permission toggles.
//!
//! Reads capture the session generation before awaiting the backend and
//! fail with [`ConsoleError::StaleResponse`] if a sign-in or sign-out
//! happened meanwhile. Stale results are never cached.

use std::future::Future;
use std::sync::Arc;

use jsonwebtoken::Algorithm;

use estate_auth::{
    AuthSession, FileTokenStore, Identity, ModuleAccess, PermissionChange, PermissionMatrix,
    PermissionToggle, SessionGeneration, TokenDecoder, TokenStore, TokenVerification,
};
use estate_config::{CacheConfig, ConsoleConfig, JwtAlgorithm, SessionConfig};
use estate_core::{
    ActionId, CreateRoleRequest, LoginRequest, Module, ModuleId, Profile, Role, RoleId,
    UserRoleRequest,
};

use crate::api::AdminApi;
use crate::cache::QueryCache;
use crate::error::{ClientResult, ConsoleError, ConsoleResult};
use crate::http::RestClient;

// =============================================================================
// AdminConsole
// =============================================================================

/// Session-aware front for the backend.
pub struct AdminConsole {
    api: Arc<dyn AdminApi>,
    session: Arc<AuthSession>,
    catalog: QueryCache<Vec<Module>>,
    profile: QueryCache<Profile>,
}

impl AdminConsole {
    /// Creates a console over an API and a session.
    pub fn new(api: Arc<dyn AdminApi>, session: Arc<AuthSession>, cache: &CacheConfig) -> Self {
        Self {
            api,
            session,
            catalog: QueryCache::new(cache.module_catalog_ttl()),
            profile: QueryCache::new(cache.profile_ttl()),
        }
    }

    /// Builds the session, REST client and console from configuration.
    pub fn from_config(config: &ConsoleConfig) -> ConsoleResult<Self> {
        let session = Arc::new(open_session(&config.session));
        let client = RestClient::new(&config.api, Arc::clone(&session))?;
        Ok(Self::new(Arc::new(client), session, &config.cache))
    }

    /// Returns the session.
    pub fn session(&self) -> &Arc<AuthSession> {
        &self.session
    }

    // =========================================================================
    // Session transitions
    // =========================================================================

    /// Signs in.
    ///
    /// Later requests go to the request's tenant once the token is accepted.
    /// A token that fails to decode is reported as
    /// [`AuthError::InvalidToken`](estate_auth::AuthError::InvalidToken) and
    /// nothing is persisted.
    pub async fn login(&self, request: LoginRequest) -> ConsoleResult<Arc<Identity>> {
        let response = self.api.login(&request).await?;
        let identity = self.session.establish(&response.token).map_err(|e| {
            tracing::warn!(error = %e, "Login returned a token that could not be used");
            e
        })?;
        self.api.select_tenant(&request.tenant_id);
        self.invalidate_queries();

        tracing::info!(user = %identity.id, tenant = %request.tenant_id, "Signed in");
        Ok(identity)
    }

    /// Signs out and drops everything cached for the previous identity.
    pub fn logout(&self) -> ConsoleResult<()> {
        let result = self.session.logout();
        self.invalidate_queries();
        result.map_err(ConsoleError::from)
    }

    /// Drops all cached query results.
    pub fn invalidate_queries(&self) {
        self.catalog.invalidate();
        self.profile.invalidate();
        tracing::debug!("Query cache invalidated");
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Returns the modules the signed-in user may see.
    ///
    /// The filter runs against the current identity on every call; only the
    /// catalog is cached.
    pub async fn navigation(&self) -> ConsoleResult<ModuleAccess> {
        let catalog = self.module_catalog().await?;
        Ok(self.session.module_access(&catalog))
    }

    /// Returns the module catalog, from cache when fresh.
    pub async fn module_catalog(&self) -> ConsoleResult<Arc<Vec<Module>>> {
        let generation = self.require_session()?;
        if let Some(catalog) = self.catalog.get(generation) {
            tracing::trace!("Module catalog served from cache");
            return Ok(catalog);
        }

        let modules = self.guarded(generation, "modules", self.api.modules()).await?;
        Ok(self.catalog.put(generation, modules))
    }

    /// Returns the signed-in user's profile, from cache when fresh.
    pub async fn profile(&self) -> ConsoleResult<Arc<Profile>> {
        let generation = self.require_session()?;
        if let Some(profile) = self.profile.get(generation) {
            return Ok(profile);
        }

        let profile = self.guarded(generation, "profile", self.api.profile()).await?;
        Ok(self.profile.put(generation, profile))
    }

    /// Lists roles.
    pub async fn roles(&self) -> ConsoleResult<Vec<Role>> {
        let generation = self.require_session()?;
        self.guarded(generation, "roles", self.api.roles()).await
    }

    /// Lays a role's grants out over the module catalog.
    pub async fn role_matrix(&self, role_id: RoleId) -> ConsoleResult<PermissionMatrix> {
        let generation = self.require_session()?;
        let role = self.guarded(generation, "role", self.api.role(role_id)).await?;
        let catalog = self.module_catalog().await?;
        Ok(PermissionMatrix::build(&role, &catalog))
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Toggles a (module, action) grant on a role.
    ///
    /// Fetches the role's current grants, then dispatches exactly one assign
    /// or remove. Returns the dispatched change.
    pub async fn toggle_permission(
        &self,
        role_id: RoleId,
        module_id: ModuleId,
        action_id: ActionId,
    ) -> ConsoleResult<PermissionChange> {
        let generation = self.require_session()?;
        let role = self.guarded(generation, "role", self.api.role(role_id)).await?;
        let catalog = self.module_catalog().await?;

        let module = catalog
            .iter()
            .find(|m| m.id == module_id)
            .ok_or(ConsoleError::UnknownModule { module_id })?;
        if module.action(action_id).is_none() {
            return Err(ConsoleError::UnknownAction {
                module_id,
                action_id,
            });
        }

        let change = PermissionToggle::resolve(&role, module, action_id);
        if !self.session.is_current(generation) {
            return Err(ConsoleError::StaleResponse);
        }

        match &change {
            PermissionChange::Assign(request) => self.api.assign_permission(request).await?,
            PermissionChange::Remove(request) => self.api.remove_permission(request).await?,
        }

        tracing::info!(%change, "Permission toggled");
        Ok(change)
    }

    /// Creates a role without grants.
    pub async fn create_role(&self, name: &str) -> ConsoleResult<Role> {
        let generation = self.require_session()?;
        let request = CreateRoleRequest {
            name: name.trim().to_string(),
        };
        let role = self
            .guarded(generation, "create_role", self.api.create_role(&request))
            .await?;

        tracing::info!(role = %role.id, name = %role.name, "Role created");
        Ok(role)
    }

    /// Gives a user a role.
    pub async fn assign_role_to_user(&self, user_id: &str, role_id: RoleId) -> ConsoleResult<()> {
        let generation = self.require_session()?;
        let request = UserRoleRequest::new(user_id, role_id);
        self.guarded(generation, "assign_role", self.api.assign_role_to_user(&request))
            .await?;

        tracing::info!(user = user_id, role = %role_id, "Role assigned to user");
        Ok(())
    }

    /// Takes a role away from a user.
    pub async fn remove_role_from_user(&self, user_id: &str, role_id: RoleId) -> ConsoleResult<()> {
        let generation = self.require_session()?;
        let request = UserRoleRequest::new(user_id, role_id);
        self.guarded(generation, "remove_role", self.api.remove_role_from_user(&request))
            .await?;

        tracing::info!(user = user_id, role = %role_id, "Role removed from user");
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn require_session(&self) -> ConsoleResult<SessionGeneration> {
        let snapshot = self.session.snapshot();
        if snapshot.is_authenticated() {
            Ok(snapshot.generation)
        } else {
            Err(ConsoleError::NotAuthenticated)
        }
    }

    async fn guarded<T>(
        &self,
        generation: SessionGeneration,
        query: &'static str,
        fetch: impl Future<Output = ClientResult<T>>,
    ) -> ConsoleResult<T> {
        let value = fetch.await?;
        if self.session.is_current(generation) {
            Ok(value)
        } else {
            tracing::warn!(query, "Discarding response from a previous session");
            Err(ConsoleError::StaleResponse)
        }
    }
}

impl std::fmt::Debug for AdminConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConsole")
            .field("session", &self.session)
            .field("catalog", &self.catalog)
            .field("profile", &self.profile)
            .finish()
    }
}

// =============================================================================
// Bootstrap
// =============================================================================

/// Opens the session described by configuration, restoring a persisted
/// token when one decodes.
pub fn open_session(config: &SessionConfig) -> AuthSession {
    let store: Arc<dyn TokenStore> =
        Arc::new(FileTokenStore::with_key(&config.state_dir, &config.token_key));
    AuthSession::initialize(store, token_decoder(config))
}

/// Builds the token decoder for the configured verification.
pub fn token_decoder(config: &SessionConfig) -> TokenDecoder {
    match &config.verification {
        Some(verification) => TokenDecoder::verified(
            TokenVerification::new(verification.secret.expose())
                .with_algorithm(algorithm(verification.algorithm))
                .with_expiry_check(verification.validate_exp),
        ),
        None => TokenDecoder::new(),
    }
}

fn algorithm(algorithm: JwtAlgorithm) -> Algorithm {
    match algorithm {
        JwtAlgorithm::HS256 => Algorithm::HS256,
        JwtAlgorithm::HS384 => Algorithm::HS384,
        JwtAlgorithm::HS512 => Algorithm::HS512,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_config::{SecretValue, VerificationConfig};

    #[test]
    fn test_token_decoder_from_config() {
        let mut config = SessionConfig::default();
        assert!(!token_decoder(&config).verifies_signature());

        config.verification = Some(VerificationConfig {
            secret: SecretValue::new("secret"),
            algorithm: JwtAlgorithm::HS384,
            validate_exp: true,
        });
        assert!(token_decoder(&config).verifies_signature());
        assert_eq!(algorithm(JwtAlgorithm::HS384), Algorithm::HS384);
    }

    #[test]
    fn test_open_session_discards_bad_token() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("auth_token"), "not-a-token").unwrap();

        let config = SessionConfig {
            state_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let session = open_session(&config);
        assert!(!session.is_authenticated());
        assert!(!dir.path().join("auth_token").exists());
    }
}
