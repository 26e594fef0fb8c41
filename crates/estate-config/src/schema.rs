// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration schema for the estate console.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Constants
// =============================================================================

/// Default backend base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default key the bearer token is persisted under.
pub const DEFAULT_TOKEN_KEY: &str = "auth_token";

/// Default freshness window for cached backend data (5 minutes).
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Application directory name under the platform data directory.
pub const APP_DIR_NAME: &str = "estate-console";

// =============================================================================
// Top-Level Configuration
// =============================================================================

/// The root configuration structure for the console.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Backend API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Session persistence and token handling.
    #[serde(default)]
    pub session: SessionConfig,

    /// Query cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConsoleConfig {
    /// Validates the entire configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.api.validate()?;
        self.session.validate()?;
        self.cache.validate()?;
        Ok(())
    }
}

// =============================================================================
// API Configuration
// =============================================================================

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL all endpoint paths are appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Tenant sent as `X-TenantId` when none is given at login.
    #[serde(default)]
    pub tenant_id: Option<String>,

    /// Headers added to every request.
    #[serde(default)]
    pub default_headers: BTreeMap<String, String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ApiConfig {
    /// Validates the API configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::validation("api.base_url", "cannot be empty"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::validation(
                "api.base_url",
                "must start with http:// or https://",
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::validation("api.timeout_secs", "cannot be zero"));
        }
        for name in self.default_headers.keys() {
            if name.trim().is_empty() {
                return Err(ConfigError::validation(
                    "api.default_headers",
                    "header names cannot be empty",
                ));
            }
        }
        Ok(())
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            tenant_id: None,
            default_headers: BTreeMap::new(),
        }
    }
}

// =============================================================================
// Session Configuration
// =============================================================================

/// Session persistence and token handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Directory holding persisted session state.
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    /// File name the bearer token is stored under.
    #[serde(default = "default_token_key")]
    pub token_key: String,

    /// Signature verification. Tokens are decoded without verification
    /// when absent.
    #[serde(default)]
    pub verification: Option<VerificationConfig>,
}

/// Returns the default state directory.
///
/// Uses the platform data directory when one exists, else `./.estate`.
pub fn default_state_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".estate"))
}

fn default_token_key() -> String {
    DEFAULT_TOKEN_KEY.to_string()
}

impl SessionConfig {
    /// Validates the session configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.token_key.trim().is_empty() {
            return Err(ConfigError::validation("session.token_key", "cannot be empty"));
        }
        if self.token_key.contains(['/', '\\']) || self.token_key == ".." {
            return Err(ConfigError::validation(
                "session.token_key",
                "must be a plain file name",
            ));
        }
        if let Some(ref verification) = self.verification {
            verification.validate()?;
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            token_key: default_token_key(),
            verification: None,
        }
    }
}

/// Shared-secret token verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerificationConfig {
    /// Shared signing secret.
    pub secret: SecretValue,

    /// Signing algorithm.
    #[serde(default)]
    pub algorithm: JwtAlgorithm,

    /// Reject expired tokens.
    #[serde(default)]
    pub validate_exp: bool,
}

impl VerificationConfig {
    /// Validates the verification configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.secret.expose().is_empty() {
            return Err(ConfigError::validation(
                "session.verification.secret",
                "cannot be empty",
            ));
        }
        Ok(())
    }
}

/// Shared-secret signing algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JwtAlgorithm {
    /// HMAC using SHA-256.
    #[default]
    HS256,
    /// HMAC using SHA-384.
    HS384,
    /// HMAC using SHA-512.
    HS512,
}

// =============================================================================
// Cache Configuration
// =============================================================================

/// Query cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// How long a fetched module catalog stays fresh. Zero disables caching.
    #[serde(default = "default_cache_ttl")]
    pub module_catalog_ttl_secs: u64,

    /// How long a fetched profile stays fresh. Zero disables caching.
    #[serde(default = "default_cache_ttl")]
    pub profile_ttl_secs: u64,
}

fn default_cache_ttl() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}

impl CacheConfig {
    /// Validates the cache configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }

    /// Returns the module catalog freshness window.
    pub fn module_catalog_ttl(&self) -> Duration {
        Duration::from_secs(self.module_catalog_ttl_secs)
    }

    /// Returns the profile freshness window.
    pub fn profile_ttl(&self) -> Duration {
        Duration::from_secs(self.profile_ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            module_catalog_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            profile_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

// =============================================================================
// Logging Configuration
// =============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Log format.
    #[serde(default)]
    pub format: LogFormat,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Returns the level as a filter directive.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Parses a level name.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Compact single-line text.
    Compact,
    /// JSON lines.
    Json,
}

// =============================================================================
// Secret Value
// =============================================================================

/// A secret that is never printed.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretValue(String);

impl SecretValue {
    /// Creates a new secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the secret.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretValue(***)")
    }
}

impl std::fmt::Display for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "***")
    }
}
