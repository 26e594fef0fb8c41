// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # estate-client
//!
//! Backend access for the estate administration console.
//!
//! This crate provides:
//! - [`RestClient`]: bearer and tenant aware HTTP client over `reqwest`
//! - [`AdminApi`]: the backend endpoints the console uses
//! - [`AdminConsole`]: sign-in/sign-out, filtered navigation, profile and
//!   role permission toggles with a per-session query cache
//!
//! ## Example
//!
//! ```no_run
//! use estate_client::AdminConsole;
//! use estate_config::ConsoleConfig;
//! use estate_core::LoginRequest;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let console = AdminConsole::from_config(&ConsoleConfig::default())?;
//! console
//!     .login(LoginRequest::new("tenant-1", "admin@example.com", "secret"))
//!     .await?;
//!
//! for module in console.navigation().await?.modules() {
//!     println!("{}", module.name);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod cache;
pub mod console;
pub mod error;
pub mod http;

pub use api::AdminApi;
pub use cache::QueryCache;
pub use console::{open_session, token_decoder, AdminConsole};
pub use error::{ClientError, ClientResult, ConsoleError, ConsoleResult};
pub use http::{error_message, RestClient, TENANT_HEADER};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
