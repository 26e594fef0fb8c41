// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # estate-config
//!
//! Configuration management for the estate administration console.
//!
//! ## Features
//!
//! - **Schema Definition**: backend, session, cache and logging sections with
//!   defaults and validation
//! - **Multi-Format Support**: YAML, TOML, and JSON configuration files
//! - **Environment Overrides**: `ESTATE_*` variables win over file values
//! - **Placeholders**: `${VAR}` and `${VAR:default}` inside files
//!
//! ## Quick Start
//!
//! ```no_run
//! use estate_config::loader::load_config;
//!
//! let config = load_config("estate.yaml").unwrap();
//! println!("Backend: {}", config.api.base_url);
//! ```
//!
//! ## Example File
//!
//! ```yaml
//! api:
//!   base_url: "${ESTATE_BACKEND:https://backend.example.com/api}"
//!   tenant_id: tenant-1
//!   default_headers:
//!     ngrok-skip-browser-warning: "true"
//! session:
//!   state_dir: ./state
//! cache:
//!   module_catalog_ttl_secs: 300
//! logging:
//!   level: info
//!   format: text
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod error;
pub mod loader;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ConfigError, ConfigResult};
pub use loader::{
    load_config, load_config_str, resolve_env_placeholders, ConfigFormat, ConfigLoader,
    DEFAULT_ENV_PREFIX,
};
pub use schema::{
    default_state_dir, ApiConfig, CacheConfig, ConsoleConfig, JwtAlgorithm, LogFormat, LogLevel,
    LoggingConfig, SecretValue, SessionConfig, VerificationConfig,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
