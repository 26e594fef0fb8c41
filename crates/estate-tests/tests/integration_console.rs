// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Console Integration Tests
//!
//! Integration tests for estate-client's console against the mock backend:
//!
//! - Login and logout
//! - Navigation filtering and query caching
//! - Responses discarded after a session change
//! - Permission toggles
//! - Role creation and user role assignment
//!
//! ## Test Categories
//!
//! - `test_login_*`: Sign-in through the backend
//! - `test_navigation_*`: Filtered catalog and caching
//! - `test_stale_*`: Session changes while a request is in flight
//! - `test_toggle_*`: Permission toggles
//! - `test_roles_*`: Role creation and user assignment

use std::sync::Arc;

use estate_auth::PermissionChange;
use estate_client::{ClientError, ConsoleError};
use estate_config::CacheConfig;
use estate_core::{ActionId, ModuleId, RoleId, UserRoleRequest};
use estate_tests::prelude::*;

fn visible_names(access: &estate_auth::ModuleAccess) -> Vec<String> {
    access.modules().iter().map(|m| m.name.clone()).collect()
}

// =============================================================================
// Login Tests
// =============================================================================

#[tokio::test]
async fn test_login_establishes_and_persists() {
    let harness = ConsoleHarness::new();

    let identity = harness.sign_in().await;

    assert_eq!(identity.id, "42");
    assert!(harness.session.is_authenticated());
    assert_eq!(harness.persisted_token(), harness.session.token());
    assert_eq!(
        harness.api.calls(),
        vec![ApiCall::Login {
            tenant_id: TEST_TENANT.to_string(),
            email: "ann@estate.test".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_login_malformed_token_persists_nothing() {
    let harness = ConsoleHarness::new();
    harness.api.set_login_token(TokenFixtures::malformed());

    let err = harness
        .console
        .login(ConsoleHarness::login_request())
        .await
        .unwrap_err();

    assert!(err.is_invalid_token());
    assert!(!harness.session.is_authenticated());
    assert_eq!(harness.persisted_token(), None);
}

#[tokio::test]
async fn test_login_selects_tenant_only_once_established() {
    let harness = ConsoleHarness::new();
    harness.api.set_login_token(TokenFixtures::malformed());

    let err = harness
        .console
        .login(ConsoleHarness::login_request())
        .await
        .unwrap_err();
    assert!(err.is_invalid_token());
    assert_eq!(harness.api.selected_tenant(), None);

    harness.api.set_login_token(TokenFixtures::manager());
    harness.sign_in().await;
    assert_eq!(harness.api.selected_tenant().as_deref(), Some(TEST_TENANT));
}

#[tokio::test]
async fn test_login_rejected_keeps_tenant() {
    let harness = ConsoleHarness::new();
    harness.api.fail_next(401, "Invalid credentials");

    assert!(harness
        .console
        .login(ConsoleHarness::login_request())
        .await
        .is_err());
    assert_eq!(harness.api.selected_tenant(), None);
}

#[tokio::test]
async fn test_login_rejected_credentials() {
    let harness = ConsoleHarness::new();
    harness.api.fail_next(401, "Invalid credentials");

    let err = harness
        .console
        .login(ConsoleHarness::login_request())
        .await
        .unwrap_err();

    assert!(matches!(err, ConsoleError::Client(ClientError::Unauthorized { .. })));
    assert!(!harness.session.is_authenticated());
}

#[tokio::test]
async fn test_login_restored_from_state_dir() {
    let dir = temp_test_dir("estate-console");
    {
        let harness = ConsoleHarness::with_state_dir(dir.path());
        harness.sign_in().await;
    }

    let harness = ConsoleHarness::with_state_dir(dir.path());
    assert!(harness.session.is_authenticated());

    let access = harness.console.navigation().await.unwrap();
    assert_eq!(visible_names(&access), vec!["UserManagement"]);
    assert!(harness.api.calls().iter().all(|c| !matches!(c, ApiCall::Login { .. })));
}

// =============================================================================
// Navigation Tests
// =============================================================================

#[tokio::test]
async fn test_navigation_filters_by_read_claim() {
    let harness = ConsoleHarness::new();
    harness.sign_in().await;

    let access = harness.console.navigation().await.unwrap();

    assert_eq!(visible_names(&access), vec!["UserManagement"]);
}

#[tokio::test]
async fn test_navigation_requires_session() {
    let harness = ConsoleHarness::new();

    let err = harness.console.navigation().await.unwrap_err();

    assert!(matches!(err, ConsoleError::NotAuthenticated));
    assert!(harness.api.calls().is_empty());
}

#[tokio::test]
async fn test_navigation_catalog_cached() {
    let harness = ConsoleHarness::new();
    harness.sign_in().await;

    harness.console.navigation().await.unwrap();
    harness.console.navigation().await.unwrap();

    assert_eq!(harness.api.modules_requests(), 1);
}

#[tokio::test]
async fn test_navigation_zero_ttl_always_fetches() {
    let harness = ConsoleHarness::with_cache(&CacheConfig {
        module_catalog_ttl_secs: 0,
        profile_ttl_secs: 0,
    });
    harness.sign_in().await;

    harness.console.navigation().await.unwrap();
    harness.console.navigation().await.unwrap();

    assert_eq!(harness.api.modules_requests(), 2);
}

#[tokio::test]
async fn test_navigation_logout_clears_everything() {
    let harness = ConsoleHarness::new();
    harness.sign_in().await;
    harness.console.navigation().await.unwrap();

    harness.console.logout().unwrap();

    assert_eq!(harness.persisted_token(), None);
    assert!(harness
        .session
        .accessible_modules(&CatalogFixtures::standard())
        .is_empty());
    assert!(matches!(
        harness.console.navigation().await,
        Err(ConsoleError::NotAuthenticated)
    ));

    // The next user starts from a fresh catalog.
    harness.sign_in().await;
    harness.console.navigation().await.unwrap();
    assert_eq!(harness.api.modules_requests(), 2);
}

#[tokio::test]
async fn test_navigation_follows_new_identity() {
    let harness = ConsoleHarness::new();
    harness.sign_in().await;
    let first = harness.console.navigation().await.unwrap();

    harness.api.set_login_token(TokenFixtures::admin());
    harness.sign_in().await;
    let second = harness.console.navigation().await.unwrap();

    assert_eq!(visible_names(&first), vec!["UserManagement"]);
    assert_eq!(
        visible_names(&second),
        vec!["UserManagement", "Billing", "Reports"]
    );
}

#[tokio::test]
async fn test_navigation_unauthorized_keeps_session() {
    let harness = ConsoleHarness::new();
    harness.sign_in().await;
    harness.api.fail_next(401, "Token expired");

    let err = harness.console.profile().await.unwrap_err();

    assert!(matches!(err, ConsoleError::Client(ref e) if e.is_unauthorized()));
    assert!(harness.session.is_authenticated());
    assert!(harness.persisted_token().is_some());
}

#[tokio::test]
async fn test_navigation_profile() {
    let harness = ConsoleHarness::new();
    harness.sign_in().await;

    let profile = harness.console.profile().await.unwrap();

    assert_eq!(profile.full_name(), "Ann Manager");
    assert_eq!(profile.roles, vec!["Manager".to_string()]);
}

// =============================================================================
// Stale Response Tests
// =============================================================================

#[tokio::test]
async fn test_stale_logout_during_fetch() {
    let harness = Arc::new(ConsoleHarness::new());
    harness.sign_in().await;
    let gate = harness.api.hold_modules();

    let inflight = {
        let harness = Arc::clone(&harness);
        tokio::spawn(async move { harness.console.module_catalog().await })
    };
    while harness.api.modules_requests() == 0 {
        tokio::task::yield_now().await;
    }

    harness.console.logout().unwrap();
    gate.notify_one();

    let result = with_timeout(inflight).await.unwrap();
    assert!(result.unwrap_err().is_stale());
}

#[tokio::test]
async fn test_stale_relogin_during_fetch_not_cached() {
    let harness = Arc::new(ConsoleHarness::new());
    harness.sign_in().await;
    let gate = harness.api.hold_modules();

    let inflight = {
        let harness = Arc::clone(&harness);
        tokio::spawn(async move { harness.console.navigation().await })
    };
    while harness.api.modules_requests() == 0 {
        tokio::task::yield_now().await;
    }

    harness.api.set_login_token(TokenFixtures::admin());
    harness.sign_in().await;
    gate.notify_one();

    let result = with_timeout(inflight).await.unwrap();
    assert!(matches!(result, Err(ConsoleError::StaleResponse)));

    harness.api.release_modules();
    let access = harness.console.navigation().await.unwrap();
    assert_eq!(access.modules().len(), 3);
    assert_eq!(harness.api.modules_requests(), 2);
}

// =============================================================================
// Toggle Tests
// =============================================================================

#[tokio::test]
async fn test_toggle_held_pair_dispatches_remove() {
    let harness = ConsoleHarness::new();
    harness.sign_in().await;

    let change = harness
        .console
        .toggle_permission(RoleFixtures::MANAGER_ID, ModuleId::new(1), ActionId::new(2))
        .await
        .unwrap();

    assert!(change.is_remove());
    assert_eq!(harness.api.writes().len(), 1);
    assert!(matches!(harness.api.writes()[0], ApiCall::Remove(_)));
}

#[tokio::test]
async fn test_toggle_missing_pair_dispatches_assign() {
    let harness = ConsoleHarness::new();
    harness.sign_in().await;

    let change = harness
        .console
        .toggle_permission(RoleFixtures::MANAGER_ID, ModuleId::new(1), ActionId::new(3))
        .await
        .unwrap();

    match change {
        PermissionChange::Assign(request) => {
            assert_eq!(request.module_name, "UserManagement");
            assert_eq!(harness.api.writes(), vec![ApiCall::Assign(request)]);
        }
        other => panic!("expected assign, got {:?}", other),
    }
}

#[tokio::test]
async fn test_toggle_twice_restores_grants() {
    let harness = ConsoleHarness::new();
    harness.sign_in().await;
    let before = harness.api.role_state(RoleFixtures::MANAGER_ID).unwrap();

    let first = harness
        .console
        .toggle_permission(RoleFixtures::MANAGER_ID, ModuleId::new(2), ActionId::new(2))
        .await
        .unwrap();
    let second = harness
        .console
        .toggle_permission(RoleFixtures::MANAGER_ID, ModuleId::new(2), ActionId::new(2))
        .await
        .unwrap();

    assert!(first.is_assign());
    assert!(second.is_remove());
    assert_eq!(harness.api.writes().len(), 2);
    let after = harness.api.role_state(RoleFixtures::MANAGER_ID).unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_toggle_unknown_pair_dispatches_nothing() {
    let harness = ConsoleHarness::new();
    harness.sign_in().await;

    let unknown_module = harness
        .console
        .toggle_permission(RoleFixtures::MANAGER_ID, ModuleId::new(99), ActionId::new(2))
        .await
        .unwrap_err();
    let unknown_action = harness
        .console
        .toggle_permission(RoleFixtures::MANAGER_ID, ModuleId::new(1), ActionId::new(99))
        .await
        .unwrap_err();

    assert!(matches!(unknown_module, ConsoleError::UnknownModule { .. }));
    assert!(matches!(unknown_action, ConsoleError::UnknownAction { .. }));
    assert!(harness.api.writes().is_empty());
}

#[tokio::test]
async fn test_toggle_unknown_role_is_backend_error() {
    let harness = ConsoleHarness::new();
    harness.sign_in().await;

    let err = harness
        .console
        .toggle_permission(RoleId::new(404), ModuleId::new(1), ActionId::new(2))
        .await
        .unwrap_err();

    assert!(matches!(err, ConsoleError::Client(ref e) if e.http_status() == Some(404)));
    assert!(harness.api.writes().is_empty());
}

#[tokio::test]
async fn test_toggle_role_matrix_and_listing() {
    let harness = ConsoleHarness::new();
    harness.sign_in().await;

    let roles = harness.console.roles().await.unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].name, "Manager");

    let matrix = harness
        .console
        .role_matrix(RoleFixtures::MANAGER_ID)
        .await
        .unwrap();
    assert_eq!(matrix.granted_count(), 1);
    assert!(matrix.cell(ModuleId::new(1), ActionId::new(2)).unwrap().granted);
    assert!(!matrix.cell(ModuleId::new(1), ActionId::new(3)).unwrap().granted);
}

// =============================================================================
// Role Management Tests
// =============================================================================

#[tokio::test]
async fn test_roles_create_lists_new_role() {
    let harness = ConsoleHarness::new();
    harness.sign_in().await;

    let role = harness.console.create_role("  Auditor ").await.unwrap();

    assert_eq!(role.name, "Auditor");
    assert_ne!(role.id, RoleFixtures::MANAGER_ID);
    assert_eq!(
        harness.api.writes(),
        vec![ApiCall::CreateRole {
            name: "Auditor".to_string()
        }]
    );

    let names: Vec<String> = harness
        .console
        .roles()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["Manager", "Auditor"]);

    let matrix = harness.console.role_matrix(role.id).await.unwrap();
    assert_eq!(matrix.granted_count(), 0);
}

#[tokio::test]
async fn test_roles_create_duplicate_is_backend_error() {
    let harness = ConsoleHarness::new();
    harness.sign_in().await;

    let err = harness.console.create_role("Manager").await.unwrap_err();

    assert!(matches!(err, ConsoleError::Client(ref e) if e.http_status() == Some(409)));
}

#[tokio::test]
async fn test_roles_assign_and_remove_user() {
    let harness = ConsoleHarness::new();
    harness.sign_in().await;

    harness
        .console
        .assign_role_to_user("u-17", RoleFixtures::MANAGER_ID)
        .await
        .unwrap();
    assert_eq!(harness.api.roles_of("u-17"), vec![RoleFixtures::MANAGER_ID]);

    harness
        .console
        .remove_role_from_user("u-17", RoleFixtures::MANAGER_ID)
        .await
        .unwrap();
    assert!(harness.api.roles_of("u-17").is_empty());

    let request = UserRoleRequest::new("u-17", RoleFixtures::MANAGER_ID);
    assert_eq!(
        harness.api.writes(),
        vec![
            ApiCall::AssignRole(request.clone()),
            ApiCall::RemoveRole(request)
        ]
    );
}

#[tokio::test]
async fn test_roles_assign_unknown_role_is_backend_error() {
    let harness = ConsoleHarness::new();
    harness.sign_in().await;

    let err = harness
        .console
        .assign_role_to_user("u-17", RoleId::new(404))
        .await
        .unwrap_err();

    assert!(matches!(err, ConsoleError::Client(ref e) if e.http_status() == Some(404)));
    assert!(harness.api.roles_of("u-17").is_empty());
}

#[tokio::test]
async fn test_roles_require_session() {
    let harness = ConsoleHarness::new();

    let create = harness.console.create_role("Auditor").await.unwrap_err();
    let assign = harness
        .console
        .assign_role_to_user("u-17", RoleFixtures::MANAGER_ID)
        .await
        .unwrap_err();
    let remove = harness
        .console
        .remove_role_from_user("u-17", RoleFixtures::MANAGER_ID)
        .await
        .unwrap_err();

    assert!(matches!(create, ConsoleError::NotAuthenticated));
    assert!(matches!(assign, ConsoleError::NotAuthenticated));
    assert!(matches!(remove, ConsoleError::NotAuthenticated));
    assert!(harness.api.calls().is_empty());
}
