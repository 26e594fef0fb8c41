// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Estate Integration Tests
//!
//! Integration tests for the estate console crates, plus the fixtures,
//! mocks and harness they share.
//!
//! ## Module Structure
//!
//! - [`common`]: Shared test utilities
//!   - `fixtures`: Tokens, module catalogs and roles
//!   - `mocks`: A recording in-memory backend
//!   - `harness`: A console wired to the mock backend
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all integration tests
//! cargo test -p estate-tests
//!
//! # Run a specific suite
//! cargo test -p estate-tests --test integration_auth
//! cargo test -p estate-tests --test integration_console
//! cargo test -p estate-tests --test integration_config
//! ```
//!
//! ## Test Categories
//!
//! ### Auth Tests (`integration_auth.rs`)
//! - Token decoding and claim classification
//! - Module filtering against claims
//! - Session transitions and persistence
//! - Permission toggle resolution
//!
//! ### Console Tests (`integration_console.rs`)
//! - Login and logout through the backend
//! - Navigation, caching and invalidation
//! - Responses discarded after a session change
//! - Permission toggles dispatching one call each
//!
//! ### Config Tests (`integration_config.rs`)
//! - File loading, placeholders and validation
//!
//! ## Writing New Tests
//!
//! ```rust,ignore
//! use estate_tests::prelude::*;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let harness = ConsoleHarness::new();
//!     harness.sign_in().await;
//!     let access = harness.console.navigation().await.unwrap();
//!     // ... test logic
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod common;

/// Re-export commonly used items for convenience.
pub mod prelude {
    pub use crate::common::fixtures::*;
    pub use crate::common::harness::*;
    pub use crate::common::mocks::*;
    pub use crate::common::{init_test_logging, temp_test_dir};
}
