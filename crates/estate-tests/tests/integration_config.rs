// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Configuration Integration Tests
//!
//! Integration tests for estate-config and the bootstrap that builds a
//! console from it:
//!
//! - File loading and placeholders
//! - Environment overrides
//! - Session bootstrap from configuration
//!
//! ## Test Categories
//!
//! - `test_config_*`: Loading and validation
//! - `test_bootstrap_*`: Console and session construction

use std::fs;

use estate_auth::{FileTokenStore, TokenStore};
use estate_client::{open_session, token_decoder, AdminConsole};
use estate_config::{
    ConfigError, ConfigLoader, ConsoleConfig, JwtAlgorithm, LogFormat, LogLevel, SecretValue,
    VerificationConfig,
};
use estate_tests::prelude::*;

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_config_yaml_file_with_placeholders() {
    let dir = temp_test_dir("estate-config");
    let path = dir.path().join("estate.yaml");
    fs::write(
        &path,
        r#"
api:
  base_url: ${ESTATE_IT_UNSET_BASE_URL:https://backend.test/api}
  timeout_secs: 12
  tenant_id: tenant-a
session:
  state_dir: state
  token_key: bearer
  verification:
    secret: integration-test-secret
    algorithm: HS384
cache:
  module_catalog_ttl_secs: 30
logging:
  level: debug
  format: json
"#,
    )
    .unwrap();

    let config = ConfigLoader::new().load(&path).unwrap();

    assert_eq!(config.api.base_url, "https://backend.test/api");
    assert_eq!(config.api.timeout_secs, 12);
    assert_eq!(config.api.tenant_id.as_deref(), Some(TEST_TENANT));
    assert_eq!(config.session.state_dir, dir.path().join("state"));
    assert_eq!(config.session.token_key, "bearer");
    assert_eq!(config.cache.module_catalog_ttl_secs, 30);
    assert_eq!(config.cache.profile_ttl_secs, 300);
    assert_eq!(config.logging.level, LogLevel::Debug);
    assert_eq!(config.logging.format, LogFormat::Json);

    let verification = config.session.verification.unwrap();
    assert_eq!(verification.algorithm, JwtAlgorithm::HS384);
    assert_eq!(format!("{:?}", verification.secret), "SecretValue(***)");
}

#[test]
fn test_config_env_overrides_with_prefix() {
    std::env::set_var("ESTATE_IT_ENV_API_BASE_URL", "https://override.test/api");
    std::env::set_var("ESTATE_IT_ENV_TENANT_ID", "tenant-env");

    let config = ConfigLoader::new()
        .with_env_prefix("ESTATE_IT_ENV")
        .defaults()
        .unwrap();

    assert_eq!(config.api.base_url, "https://override.test/api");
    assert_eq!(config.api.tenant_id.as_deref(), Some("tenant-env"));
}

#[test]
fn test_config_bad_env_timeout() {
    std::env::set_var("ESTATE_IT_BAD_API_TIMEOUT_SECS", "soon");

    let err = ConfigLoader::new()
        .with_env_prefix("ESTATE_IT_BAD")
        .defaults()
        .unwrap_err();

    assert!(matches!(err, ConfigError::InvalidEnvVar { .. }));
}

#[test]
fn test_config_missing_file_uses_defaults() {
    let dir = temp_test_dir("estate-config");
    let path = dir.path().join("absent.yaml");

    let loader = ConfigLoader::new().with_env_vars(false);
    assert!(loader.load(&path).unwrap_err().is_not_found());

    let config = loader.load_or_default(&path).unwrap();
    assert_eq!(config.api.base_url, ConsoleConfig::default().api.base_url);
}

#[test]
fn test_config_rejects_bad_file() {
    let dir = temp_test_dir("estate-config");
    let path = dir.path().join("estate.toml");
    fs::write(&path, "[api]\nbase_url = \"\"\n").unwrap();

    let err = ConfigLoader::new().with_env_vars(false).load(&path).unwrap_err();
    assert_eq!(err.error_type(), "validation");
}

// =============================================================================
// Bootstrap Tests
// =============================================================================

#[test]
fn test_bootstrap_session_restores_from_state_dir() {
    let dir = temp_test_dir("estate-bootstrap");
    let token = TokenFixtures::manager();
    FileTokenStore::with_key(dir.path(), "bearer").save(&token).unwrap();

    let mut config = ConsoleConfig::default();
    config.session.state_dir = dir.path().to_path_buf();
    config.session.token_key = "bearer".to_string();

    let session = open_session(&config.session);
    assert_eq!(session.token(), Some(token));
    assert_eq!(session.require_identity().unwrap().id, "42");
}

#[test]
fn test_bootstrap_verified_session_drops_unsigned_token() {
    let dir = temp_test_dir("estate-bootstrap");
    let store = FileTokenStore::new(dir.path());
    store.save(&TokenFixtures::manager()).unwrap();

    let mut config = ConsoleConfig::default();
    config.session.state_dir = dir.path().to_path_buf();
    config.session.verification = Some(VerificationConfig {
        secret: SecretValue::new(TEST_SECRET),
        algorithm: JwtAlgorithm::HS256,
        validate_exp: true,
    });

    assert!(token_decoder(&config.session).verifies_signature());
    let session = open_session(&config.session);
    assert!(!session.is_authenticated());
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn test_bootstrap_console_from_config() {
    let dir = temp_test_dir("estate-bootstrap");
    let mut config = ConsoleConfig::default();
    config.session.state_dir = dir.path().to_path_buf();
    config.api.tenant_id = Some(TEST_TENANT.to_string());

    let console = AdminConsole::from_config(&config).unwrap();
    assert!(!console.session().is_authenticated());
    assert!(console.navigation().await.is_err());
}
