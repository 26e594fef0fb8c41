// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration loading for the estate console.
//!
//! # Loading Pipeline
//!
//! 1. Read the file and pick the format from its extension
//! 2. Resolve `${VAR}` / `${VAR:default}` placeholders
//! 3. Parse YAML/TOML/JSON into [`ConsoleConfig`]
//! 4. Apply environment overrides
//! 5. Resolve a relative state directory against the file's directory
//! 6. Validate
//!
//! # Environment Variable Override
//!
//! ```text
//! ESTATE_API_BASE_URL=https://api.example.com/api
//! ESTATE_TENANT_ID=tenant-1
//! ESTATE_STATE_DIR=/var/lib/estate
//! ESTATE_LOG_LEVEL=debug
//! ```

use crate::error::{ConfigError, ConfigResult};
use crate::schema::{ConsoleConfig, LogLevel};
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default environment variable prefix.
pub const DEFAULT_ENV_PREFIX: &str = "ESTATE";

// =============================================================================
// ConfigLoader
// =============================================================================

/// Configuration loader for the console.
///
/// # Examples
///
/// ```no_run
/// use estate_config::loader::ConfigLoader;
///
/// let config = ConfigLoader::new().load("estate.yaml").unwrap();
/// println!("Backend: {}", config.api.base_url);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Environment variable prefix.
    env_prefix: String,

    /// Whether to resolve environment variables.
    resolve_env_vars: bool,
}

impl ConfigLoader {
    /// Creates a new configuration loader with default settings.
    pub fn new() -> Self {
        Self {
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            resolve_env_vars: true,
        }
    }

    /// Sets the environment variable prefix.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Enables or disables placeholder resolution and env overrides.
    pub fn with_env_vars(mut self, enabled: bool) -> Self {
        self.resolve_env_vars = enabled;
        self
    }

    /// Loads configuration from a file.
    ///
    /// The format is chosen by extension: `.yaml`/`.yml`, `.toml` or `.json`.
    pub fn load(&self, path: impl AsRef<Path>) -> ConfigResult<ConsoleConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        let content = self.read_file(path)?;
        let format = ConfigFormat::from_path(path)?;

        let content = self.resolve_placeholders(&content);
        let mut config: ConsoleConfig = parse_str(&content, format).map_err(|e| match e {
            ConfigError::Serialization { message } => ConfigError::parse(path, message),
            other => other,
        })?;

        if self.resolve_env_vars {
            self.apply_env_overrides(&mut config)?;
        }

        if config.session.state_dir.is_relative() {
            let base = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            config.session.state_dir = base.join(&config.session.state_dir);
        }

        config.validate()?;
        debug!(
            base_url = %config.api.base_url,
            state_dir = %config.session.state_dir.display(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Loads configuration from a file, falling back to defaults when the
    /// file does not exist. Environment overrides still apply.
    pub fn load_or_default(&self, path: impl AsRef<Path>) -> ConfigResult<ConsoleConfig> {
        match self.load(path.as_ref()) {
            Err(e) if e.is_not_found() => {
                info!(
                    "No configuration at {}; using defaults",
                    path.as_ref().display()
                );
                self.defaults()
            }
            other => other,
        }
    }

    /// Returns the default configuration with environment overrides applied.
    pub fn defaults(&self) -> ConfigResult<ConsoleConfig> {
        let mut config = ConsoleConfig::default();
        if self.resolve_env_vars {
            self.apply_env_overrides(&mut config)?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a string.
    pub fn load_from_str(&self, content: &str, format: ConfigFormat) -> ConfigResult<ConsoleConfig> {
        let content = self.resolve_placeholders(content);
        let mut config: ConsoleConfig = parse_str(&content, format)?;

        if self.resolve_env_vars {
            self.apply_env_overrides(&mut config)?;
        }

        config.validate()?;
        Ok(config)
    }

    fn read_file(&self, path: &Path) -> ConfigResult<String> {
        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))
    }

    fn resolve_placeholders(&self, content: &str) -> String {
        if self.resolve_env_vars {
            resolve_env_placeholders(content)
        } else {
            content.to_string()
        }
    }

    fn env_var(&self, suffix: &str) -> Option<(String, String)> {
        let name = format!("{}_{}", self.env_prefix, suffix);
        env::var(&name).ok().map(|value| (name, value))
    }

    fn apply_env_overrides(&self, config: &mut ConsoleConfig) -> ConfigResult<()> {
        if let Some((name, value)) = self.env_var("API_BASE_URL") {
            debug!("Overriding api.base_url from {}", name);
            config.api.base_url = value;
        }
        if let Some((name, value)) = self.env_var("API_TIMEOUT_SECS") {
            config.api.timeout_secs = value
                .parse()
                .map_err(|_| ConfigError::invalid_env_var(name, "expected a number of seconds"))?;
        }
        if let Some((_, value)) = self.env_var("TENANT_ID") {
            config.api.tenant_id = Some(value).filter(|v| !v.is_empty());
        }
        if let Some((_, value)) = self.env_var("STATE_DIR") {
            config.session.state_dir = PathBuf::from(value);
        }
        if let Some((name, value)) = self.env_var("LOG_LEVEL") {
            match LogLevel::parse(&value) {
                Some(level) => config.logging.level = level,
                None => warn!("Ignoring {}: unknown log level '{}'", name, value),
            }
        }
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// ConfigFormat
// =============================================================================

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format.
    Yaml,
    /// TOML format.
    Toml,
    /// JSON format.
    Json,
}

impl ConfigFormat {
    /// Determines the format from a file path.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            Some(other) => Err(ConfigError::unsupported_format(other)),
            None => Err(ConfigError::unsupported_format("(no extension)")),
        }
    }

    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Yaml => "yaml",
            ConfigFormat::Toml => "toml",
            ConfigFormat::Json => "json",
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn parse_str<T: DeserializeOwned>(content: &str, format: ConfigFormat) -> ConfigResult<T> {
    match format {
        ConfigFormat::Yaml => parse_yaml(content),
        ConfigFormat::Toml => {
            toml::from_str(content).map_err(|e| ConfigError::serialization(e.to_string()))
        }
        ConfigFormat::Json => {
            serde_json::from_str(content).map_err(|e| ConfigError::serialization(e.to_string()))
        }
    }
}

/// YAML goes through the `config` crate.
fn parse_yaml<T: DeserializeOwned>(content: &str) -> ConfigResult<T> {
    let config = config::Config::builder()
        .add_source(config::File::from_str(content, config::FileFormat::Yaml))
        .build()
        .map_err(|e| ConfigError::serialization(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| ConfigError::serialization(e.to_string()))
}

/// Replaces `${VAR}` and `${VAR:default}` with environment values.
///
/// An unset variable without a default is left as written.
pub fn resolve_env_placeholders(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find('}') else {
            result.push_str(&rest[start..]);
            return result;
        };

        let inner = &after[..end];
        let (name, default) = match inner.split_once(':') {
            Some((name, default)) => (name, Some(default)),
            None => (inner, None),
        };

        match (env::var(name), default) {
            (Ok(value), _) => result.push_str(&value),
            (Err(_), Some(default)) => result.push_str(default),
            (Err(_), None) => {
                warn!("Environment variable '{}' not found", name);
                result.push_str(&rest[start..start + 2 + end + 1]);
            }
        }

        rest = &after[end + 1..];
    }

    result.push_str(rest);
    result
}

// =============================================================================
// Convenience Functions
// =============================================================================

/// Loads configuration from a file with default settings.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<ConsoleConfig> {
    ConfigLoader::new().load(path)
}

/// Loads configuration from a string with the specified format.
pub fn load_config_str(content: &str, format: ConfigFormat) -> ConfigResult<ConsoleConfig> {
    ConfigLoader::new().load_from_str(content, format)
}

// =============================================================================
// Tests
// =============================================================================
