// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # estate-core
//!
//! Shared types for the estate administration console.
//!
//! These types mirror the payloads exchanged with the property management
//! backend and are used by every other crate in the workspace:
//!
//! - **Types**: identifiers plus the module catalog (`Module`, `ModuleAction`)
//! - **Role**: roles, their module/action grants and the grant requests
//! - **Account**: login payloads and the user profile
//!
//! ## Example
//!
//! ```
//! use estate_core::{ActionId, Module, ModuleAction, ModuleId};
//!
//! let module = Module::new(ModuleId::new(1), "UserManagement")
//!     .with_action(ModuleAction::new(ActionId::new(2), "Read"));
//!
//! assert!(module.action_named("Read").is_some());
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod account;
pub mod role;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

pub use account::{LoginRequest, LoginResponse, Profile};
pub use role::{
    AssignPermissionRequest, CreateRoleRequest, RemovePermissionRequest, Role, RoleDetails,
    RoleModulePermission, UserRoleRequest,
};
pub use types::{ActionId, Module, ModuleAction, ModuleId, RoleId};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
