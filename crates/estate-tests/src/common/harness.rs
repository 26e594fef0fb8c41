// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Harness
//!
//! A console wired to [`MockAdminApi`] over an in-memory or file-backed
//! token store.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use estate_auth::{
    AuthSession, FileTokenStore, Identity, MemoryTokenStore, TokenDecoder, TokenStore,
};
use estate_client::{AdminApi, AdminConsole};
use estate_config::CacheConfig;
use estate_core::LoginRequest;

use super::fixtures::TEST_TENANT;
use super::init_test_logging;
use super::mocks::MockAdminApi;

/// Default timeout for harness-driven tests.
pub const DEFAULT_TEST_TIMEOUT: Duration = Duration::from_secs(10);

// =============================================================================
// Console Harness
// =============================================================================

/// A console, its session and the mock backend behind it.
#[derive(Debug)]
pub struct ConsoleHarness {
    /// The mock backend.
    pub api: Arc<MockAdminApi>,
    /// The token store backing the session.
    pub store: Arc<dyn TokenStore>,
    /// The session shared with the console.
    pub session: Arc<AuthSession>,
    /// The console under test.
    pub console: AdminConsole,
}

impl Default for ConsoleHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleHarness {
    /// Builds a harness over an empty in-memory store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryTokenStore::new()), TokenDecoder::new())
    }

    /// Builds a harness persisting its token under `dir`.
    pub fn with_state_dir(dir: &Path) -> Self {
        Self::with_store(Arc::new(FileTokenStore::new(dir)), TokenDecoder::new())
    }

    /// Builds a harness over the given store and decoder.
    pub fn with_store(store: Arc<dyn TokenStore>, decoder: TokenDecoder) -> Self {
        Self::build(store, decoder, &CacheConfig::default())
    }

    /// Builds a harness with the given cache settings.
    pub fn with_cache(cache: &CacheConfig) -> Self {
        Self::build(Arc::new(MemoryTokenStore::new()), TokenDecoder::new(), cache)
    }

    fn build(store: Arc<dyn TokenStore>, decoder: TokenDecoder, cache: &CacheConfig) -> Self {
        init_test_logging();

        let api = Arc::new(MockAdminApi::new());
        let session = Arc::new(AuthSession::initialize(Arc::clone(&store), decoder));
        let backend: Arc<dyn AdminApi> = api.clone();
        let console = AdminConsole::new(backend, Arc::clone(&session), cache);

        Self {
            api,
            store,
            session,
            console,
        }
    }

    /// Login request for the fixture tenant.
    pub fn login_request() -> LoginRequest {
        LoginRequest::new(TEST_TENANT, "ann@estate.test", "correct horse")
    }

    /// Signs in with the backend's current login token.
    pub async fn sign_in(&self) -> Arc<Identity> {
        self.console
            .login(Self::login_request())
            .await
            .expect("Sign-in failed")
    }

    /// Returns the persisted token, if any.
    pub fn persisted_token(&self) -> Option<String> {
        self.store.load().expect("Failed to read token store")
    }
}

/// Runs a test body under [`DEFAULT_TEST_TIMEOUT`].
pub async fn with_timeout<F, T>(future: F) -> T
where
    F: Future<Output = T>,
{
    tokio::time::timeout(DEFAULT_TEST_TIMEOUT, future)
        .await
        .expect("Test timed out")
}
