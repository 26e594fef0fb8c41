// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # estate-auth
//!
//! Authentication and authorization for the estate administration console.
//!
//! This crate provides:
//! - Bearer token decoding into raw claims (optionally signature-verified)
//! - Classification of raw claims into identity, module permission and
//!   unrecognized buckets
//! - The signed-in [`Identity`] and its [`PermissionMapping`]
//! - Module access filtering for navigation
//! - Role permission toggling (assign vs. remove)
//! - The process-wide [`AuthSession`] and token persistence
//!
//! ## Data flow
//!
//! ```text
//! login token ──► TokenDecoder ──► TokenClaims ──► Identity ──► AuthSession
//!                                                     │
//!                      module catalog ──► accessible_modules(catalog, claims)
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use estate_auth::{AuthSession, MemoryTokenStore, TokenDecoder};
//!
//! let session = AuthSession::initialize(Arc::new(MemoryTokenStore::new()), TokenDecoder::new());
//! assert!(!session.is_authenticated());
//! assert!(session.establish("not-a-token").is_err());
//! assert!(!session.is_authenticated());
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod access;
mod claims;
mod error;
mod identity;
mod permission;
mod session;
mod store;
mod toggle;
mod token;

pub use access::{accessible_modules, ModuleAccess};
pub use claims::{ClaimValue, ModuleClaims, TokenClaims, ROLE_CLAIM};
pub use error::{AuthError, AuthResult};
pub use identity::Identity;
pub use permission::{module_name_from_claim_key, PermissionMapping, READ_ACTION};
pub use session::{AuthSession, SessionGeneration, SessionSnapshot};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore, DEFAULT_TOKEN_KEY};
pub use toggle::{MatrixCell, PermissionChange, PermissionMatrix, PermissionToggle};
pub use token::{RawClaims, TokenDecoder, TokenVerification};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
