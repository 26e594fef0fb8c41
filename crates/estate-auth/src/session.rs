// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication session state.
//!
//! One [`AuthSession`] exists per process and is passed explicitly to
//! whatever needs it. The session is the only writer of the persisted token.
//!
//! # Lifecycle
//!
//! ```text
//!            initialize (valid stored token)
//!   ┌───────────────┐ ─────────────────────────► ┌───────────────┐
//!   │ Unauthenticated│        set_auth/establish  │ Authenticated │
//!   └───────────────┘ ─────────────────────────► └───────────────┘
//!           ▲                                            │
//!           └──────────────────── logout ────────────────┘
//! ```
//!
//! Every transition bumps the [`SessionGeneration`]. Async callers capture
//! the generation before awaiting and drop their result if
//! [`AuthSession::is_current`] no longer holds.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use estate_core::Module;

use crate::access::{accessible_modules, ModuleAccess};
use crate::claims::TokenClaims;
use crate::error::{AuthError, AuthResult};
use crate::identity::Identity;
use crate::store::TokenStore;
use crate::token::TokenDecoder;

// =============================================================================
// SessionGeneration
// =============================================================================

/// Monotonic counter identifying one authentication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionGeneration(u64);

impl SessionGeneration {
    /// Returns the raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for SessionGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen-{}", self.0)
    }
}

// =============================================================================
// SessionSnapshot
// =============================================================================

/// Point-in-time copy of the session state.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// Signed-in identity, if any.
    pub identity: Option<Arc<Identity>>,
    /// Bearer token, if any.
    pub token: Option<String>,
    /// Generation the snapshot was taken at.
    pub generation: SessionGeneration,
}

impl SessionSnapshot {
    /// Returns `true` if both identity and token are present.
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some() && self.token.is_some()
    }
}

// =============================================================================
// AuthSession
// =============================================================================

struct SessionState {
    authenticated: Option<(Arc<Identity>, String)>,
    generation: SessionGeneration,
}

/// Process-wide authentication state.
pub struct AuthSession {
    store: Arc<dyn TokenStore>,
    decoder: TokenDecoder,
    state: RwLock<SessionState>,
}

impl AuthSession {
    /// Creates the session, restoring a persisted token when it decodes.
    ///
    /// A stored token that fails to decode is cleared and the session
    /// starts signed out. A store read failure is treated as no token.
    pub fn initialize(store: Arc<dyn TokenStore>, decoder: TokenDecoder) -> Self {
        let restored = match store.load() {
            Ok(Some(token)) => match Self::identity_from_token(&decoder, &token) {
                Ok(identity) => {
                    tracing::info!(user = %identity.id, "Restored persisted session");
                    Some((Arc::new(identity), token))
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding persisted token that failed to decode");
                    if let Err(e) = store.clear() {
                        tracing::warn!(error = %e, "Failed to clear persisted token");
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read persisted token");
                None
            }
        };

        Self {
            store,
            decoder,
            state: RwLock::new(SessionState {
                authenticated: restored,
                generation: SessionGeneration(0),
            }),
        }
    }

    /// Decodes and classifies a token without touching the session.
    pub fn decode(&self, token: &str) -> AuthResult<Identity> {
        Self::identity_from_token(&self.decoder, token)
    }

    /// Signs in with a token.
    ///
    /// A token that fails to decode leaves the session and the persisted
    /// token unchanged.
    pub fn establish(&self, token: &str) -> AuthResult<Arc<Identity>> {
        let identity = self.decode(token)?;
        self.set_auth(identity, token)
    }

    /// Stores the token and marks the session authenticated.
    ///
    /// The token is persisted first; if that fails the state is unchanged.
    pub fn set_auth(&self, identity: Identity, token: impl Into<String>) -> AuthResult<Arc<Identity>> {
        let token = token.into();
        let identity = Arc::new(identity);

        let mut state = self.state.write();
        self.store.save(&token)?;
        state.authenticated = Some((Arc::clone(&identity), token));
        state.generation = state.generation.next();

        tracing::info!(
            user = %identity.id,
            role = identity.role.as_deref().unwrap_or(""),
            generation = %state.generation,
            "Session authenticated"
        );
        Ok(identity)
    }

    /// Signs out.
    ///
    /// The in-memory state is always cleared. A failure to remove the
    /// persisted token is returned after that.
    pub fn logout(&self) -> AuthResult<()> {
        let mut state = self.state.write();
        let was_authenticated = state.authenticated.take().is_some();
        state.generation = state.generation.next();
        let generation = state.generation;
        let cleared = self.store.clear();
        drop(state);

        if was_authenticated {
            tracing::info!(generation = %generation, "Session logged out");
        }
        cleared
    }

    /// Returns the signed-in identity.
    pub fn identity(&self) -> Option<Arc<Identity>> {
        self.state
            .read()
            .authenticated
            .as_ref()
            .map(|(identity, _)| Arc::clone(identity))
    }

    /// Returns the signed-in identity or [`AuthError::NotAuthenticated`].
    pub fn require_identity(&self) -> AuthResult<Arc<Identity>> {
        self.identity().ok_or(AuthError::NotAuthenticated)
    }

    /// Returns the bearer token.
    pub fn token(&self) -> Option<String> {
        self.state
            .read()
            .authenticated
            .as_ref()
            .map(|(_, token)| token.clone())
    }

    /// Returns `true` if an identity and token are held.
    pub fn is_authenticated(&self) -> bool {
        self.state.read().authenticated.is_some()
    }

    /// Returns the current generation.
    pub fn generation(&self) -> SessionGeneration {
        self.state.read().generation
    }

    /// Returns `true` if no transition happened since `generation`.
    pub fn is_current(&self, generation: SessionGeneration) -> bool {
        self.generation() == generation
    }

    /// Returns a consistent copy of the state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read();
        let (identity, token) = match &state.authenticated {
            Some((identity, token)) => (Some(Arc::clone(identity)), Some(token.clone())),
            None => (None, None),
        };
        SessionSnapshot {
            identity,
            token,
            generation: state.generation,
        }
    }

    /// Filters the catalog against the current identity's claims.
    pub fn accessible_modules(&self, catalog: &[Module]) -> Vec<Module> {
        let identity = self.identity();
        accessible_modules(catalog, identity.as_deref().map(|i| &i.claims))
    }

    /// Evaluates module access for the current identity.
    pub fn module_access(&self, catalog: &[Module]) -> ModuleAccess {
        let identity = self.identity();
        ModuleAccess::evaluate(catalog, identity.as_deref().map(|i| &i.claims))
    }

    /// Returns the token decoder.
    pub fn decoder(&self) -> &TokenDecoder {
        &self.decoder
    }

    fn identity_from_token(decoder: &TokenDecoder, token: &str) -> AuthResult<Identity> {
        let raw = decoder.decode(token)?;
        Ok(Identity::from_claims(TokenClaims::from_raw(raw)))
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("AuthSession")
            .field("store", &self.store)
            .field(
                "user",
                &state.authenticated.as_ref().map(|(identity, _)| identity.id.as_str()),
            )
            .field("generation", &state.generation)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;
    use crate::store::MemoryTokenStore;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use estate_core::ModuleId;
    use serde_json::json;

    fn token(payload: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{}.{}.sig", header, body)
    }

    fn user_token() -> String {
        token(json!({
            "nameid": "42",
            "email": "a@x.io",
            "name": "Ann",
            "Permissions-UserManagement": ["Read", "Create"],
            "Permissions-Billing": ["Create"],
        }))
    }

    fn catalog() -> Vec<Module> {
        vec![
            Module::new(ModuleId::new(1), "UserManagement"),
            Module::new(ModuleId::new(2), "Billing"),
            Module::new(ModuleId::new(3), "Reports"),
        ]
    }

    fn session(store: &Arc<MemoryTokenStore>) -> AuthSession {
        AuthSession::initialize(store.clone(), TokenDecoder::new())
    }

    #[test]
    fn test_initialize_empty() {
        let store = Arc::new(MemoryTokenStore::new());
        let session = session(&store);
        assert!(!session.is_authenticated());
        assert!(session.identity().is_none());
        assert!(session.token().is_none());
        assert!(matches!(session.require_identity(), Err(AuthError::NotAuthenticated)));
    }

    #[test]
    fn test_initialize_restores_token() {
        let store = Arc::new(MemoryTokenStore::with_token(user_token()));
        let session = session(&store);
        assert!(session.is_authenticated());
        assert_eq!(session.identity().unwrap().id, "42");
        assert_eq!(session.token(), Some(user_token()));
    }

    #[test]
    fn test_initialize_discards_bad_token() {
        let store = Arc::new(MemoryTokenStore::with_token("garbage"));
        let session = session(&store);
        assert!(!session.is_authenticated());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_establish_and_logout() {
        let store = Arc::new(MemoryTokenStore::new());
        let session = session(&store);
        let start = session.generation();

        let identity = session.establish(&user_token()).unwrap();
        assert_eq!(identity.name.as_deref(), Some("Ann"));
        assert!(session.is_authenticated());
        assert_eq!(store.load().unwrap(), Some(user_token()));
        assert!(!session.is_current(start));

        let visible = session.accessible_modules(&catalog());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "UserManagement");

        let signed_in = session.generation();
        session.logout().unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(store.load().unwrap(), None);
        assert!(!session.is_current(signed_in));
        assert!(session.accessible_modules(&catalog()).is_empty());
        assert_eq!(session.module_access(&catalog()), ModuleAccess::EmptyAccess);
    }

    #[test]
    fn test_establish_invalid_token_keeps_state() {
        let store = Arc::new(MemoryTokenStore::new());
        let session = session(&store);
        session.establish(&user_token()).unwrap();
        let generation = session.generation();

        let err = session.establish("a.b").unwrap_err();
        assert!(err.is_invalid_token());
        assert!(session.is_current(generation));
        assert_eq!(session.identity().unwrap().id, "42");
        assert_eq!(store.load().unwrap(), Some(user_token()));
    }

    #[test]
    fn test_establish_invalid_token_from_signed_out() {
        let store = Arc::new(MemoryTokenStore::new());
        let session = session(&store);

        for bad in ["", "one.two", "a.b.c.d", "h.!!!.s", "h.bm90LWpzb24.s"] {
            assert!(session.establish(bad).unwrap_err().is_invalid_token());
        }
        assert!(!session.is_authenticated());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_snapshot() {
        let store = Arc::new(MemoryTokenStore::new());
        let session = session(&store);
        assert!(!session.snapshot().is_authenticated());

        session.establish(&user_token()).unwrap();
        let snapshot = session.snapshot();
        assert!(snapshot.is_authenticated());
        assert_eq!(snapshot.generation, session.generation());
    }

    #[test]
    fn test_logout_when_signed_out() {
        let store = Arc::new(MemoryTokenStore::new());
        let session = session(&store);
        session.logout().unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_relogin_replaces_identity() {
        let store = Arc::new(MemoryTokenStore::new());
        let session = session(&store);
        session.establish(&user_token()).unwrap();
        session.logout().unwrap();

        let other = token(json!({"nameid": "7", "Permissions-Reports": ["Read"]}));
        session.establish(&other).unwrap();

        let visible = session.accessible_modules(&catalog());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Reports");
    }
}
