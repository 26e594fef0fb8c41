// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # estate-bin
//!
//! Command-line console for the estate administration backend.
//!
//! ## Architecture
//!
//! ```text
//!              main.rs
//!                 │
//!          ┌──────▼──────┐
//!          │    cli.rs   │  clap argument parsing
//!          └──────┬──────┘
//!                 │
//!        ┌────────┼─────────┐
//!        ▼        ▼         ▼
//!   commands   logging   error
//!        │
//!   estate-client (AdminConsole) ──► estate-auth (AuthSession)
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Sign in (password from ESTATE_PASSWORD or --password-stdin)
//! estate login -e admin@example.com -t tenant-1
//!
//! # Modules the signed-in user may open
//! estate modules
//!
//! # Toggle action 3 of module 1 on role 5
//! estate roles toggle 5 1 3
//!
//! # Sign out
//! estate logout
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

// =============================================================================
// Re-exports
// =============================================================================

pub use cli::{Cli, Commands};
pub use error::{BinError, BinResult};
pub use logging::init_logging;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
