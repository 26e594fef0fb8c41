// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Role permission toggling.
//!
//! A toggle on a (module, action) pair removes the grant when the role
//! already holds it and assigns it otherwise. Each toggle is an independent
//! decision; nothing is batched or ordered.

use serde::Serialize;

use estate_core::{
    ActionId, AssignPermissionRequest, Module, ModuleId, RemovePermissionRequest, RoleDetails,
    RoleId,
};

// =============================================================================
// PermissionChange
// =============================================================================

/// The single backend operation a toggle dispatches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "operation", content = "request", rename_all = "lowercase")]
pub enum PermissionChange {
    /// Grant the pair to the role.
    Assign(AssignPermissionRequest),
    /// Revoke the pair from the role.
    Remove(RemovePermissionRequest),
}

impl PermissionChange {
    /// Returns `true` for an assign operation.
    pub fn is_assign(&self) -> bool {
        matches!(self, Self::Assign(_))
    }

    /// Returns `true` for a remove operation.
    pub fn is_remove(&self) -> bool {
        matches!(self, Self::Remove(_))
    }

    /// Returns the targeted `(role, module, action)` triple.
    pub fn target(&self) -> (RoleId, ModuleId, ActionId) {
        match self {
            Self::Assign(r) => (r.role_id, r.module_id, r.action_id),
            Self::Remove(r) => (r.role_id, r.module_id, r.action_id),
        }
    }
}

impl std::fmt::Display for PermissionChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (role, module, action) = self.target();
        let verb = if self.is_assign() { "assign" } else { "remove" };
        write!(f, "{} action {} on module {} for role {}", verb, action, module, role)
    }
}

// =============================================================================
// PermissionToggle
// =============================================================================

/// Decides between assign and remove for a toggle.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionToggle;

impl PermissionToggle {
    /// Resolves a toggle of `action` on `module` for `role`.
    pub fn resolve(role: &RoleDetails, module: &Module, action: ActionId) -> PermissionChange {
        let change = if role.holds(module.id, action) {
            PermissionChange::Remove(RemovePermissionRequest {
                role_id: role.id,
                module_id: module.id,
                action_id: action,
            })
        } else {
            PermissionChange::Assign(AssignPermissionRequest {
                role_id: role.id,
                module_id: module.id,
                action_id: action,
                module_name: module.name.clone(),
            })
        };

        tracing::debug!(
            role = %role.id,
            module = %module.id,
            action = %action,
            assign = change.is_assign(),
            "Resolved permission toggle"
        );
        change
    }
}

// =============================================================================
// PermissionMatrix
// =============================================================================

/// One module/action cell of a role's permission grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixCell {
    /// Module identifier.
    pub module_id: ModuleId,
    /// Module name.
    pub module_name: String,
    /// Action identifier.
    pub action_id: ActionId,
    /// Action name.
    pub action_name: String,
    /// Whether the role currently holds the pair.
    pub granted: bool,
}

/// A role's permissions laid out over the module catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionMatrix {
    /// Role identifier.
    pub role_id: RoleId,
    /// Role name.
    pub role_name: String,
    /// Cells in catalog order, then action order.
    pub cells: Vec<MatrixCell>,
}

impl PermissionMatrix {
    /// Builds the grid for a role over a catalog.
    pub fn build(role: &RoleDetails, catalog: &[Module]) -> Self {
        let cells = catalog
            .iter()
            .flat_map(|module| {
                module.actions.iter().map(move |action| MatrixCell {
                    module_id: module.id,
                    module_name: module.name.clone(),
                    action_id: action.id,
                    action_name: action.name.clone(),
                    granted: role.holds(module.id, action.id),
                })
            })
            .collect();

        Self {
            role_id: role.id,
            role_name: role.name.clone(),
            cells,
        }
    }

    /// Returns the cell for a pair.
    pub fn cell(&self, module_id: ModuleId, action_id: ActionId) -> Option<&MatrixCell> {
        self.cells
            .iter()
            .find(|c| c.module_id == module_id && c.action_id == action_id)
    }

    /// Returns the number of granted cells.
    pub fn granted_count(&self) -> usize {
        self.cells.iter().filter(|c| c.granted).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_core::{ModuleAction, RoleModulePermission};

    fn role() -> RoleDetails {
        RoleDetails {
            id: RoleId::new(5),
            name: "Manager".to_string(),
            role_module_permissions: vec![RoleModulePermission {
                role_id: RoleId::new(5),
                module_id: ModuleId::new(1),
                action_id: ActionId::new(2),
                module_name: Some("UserManagement".to_string()),
            }],
        }
    }

    fn module() -> Module {
        Module::new(ModuleId::new(1), "UserManagement")
            .with_action(ModuleAction::new(ActionId::new(2), "Read"))
            .with_action(ModuleAction::new(ActionId::new(3), "Create"))
    }

    #[test]
    fn test_toggle_held_pair_removes() {
        let change = PermissionToggle::resolve(&role(), &module(), ActionId::new(2));
        assert_eq!(
            change,
            PermissionChange::Remove(RemovePermissionRequest {
                role_id: RoleId::new(5),
                module_id: ModuleId::new(1),
                action_id: ActionId::new(2),
            })
        );
    }

    #[test]
    fn test_toggle_missing_pair_assigns() {
        let change = PermissionToggle::resolve(&role(), &module(), ActionId::new(3));
        match change {
            PermissionChange::Assign(req) => {
                assert_eq!(req.action_id, ActionId::new(3));
                assert_eq!(req.module_name, "UserManagement");
            }
            other => panic!("expected assign, got {:?}", other),
        }
    }

    #[test]
    fn test_toggle_is_pure() {
        let role = role();
        let a = PermissionToggle::resolve(&role, &module(), ActionId::new(2));
        let b = PermissionToggle::resolve(&role, &module(), ActionId::new(2));
        assert_eq!(a, b);
    }

    #[test]
    fn test_change_display() {
        let change = PermissionToggle::resolve(&role(), &module(), ActionId::new(3));
        assert_eq!(change.to_string(), "assign action 3 on module 1 for role 5");
        assert_eq!(change.target(), (RoleId::new(5), ModuleId::new(1), ActionId::new(3)));
    }

    #[test]
    fn test_matrix_build() {
        let matrix = PermissionMatrix::build(&role(), &[module()]);
        assert_eq!(matrix.cells.len(), 2);
        assert_eq!(matrix.granted_count(), 1);
        assert!(matrix.cell(ModuleId::new(1), ActionId::new(2)).unwrap().granted);
        assert!(!matrix.cell(ModuleId::new(1), ActionId::new(3)).unwrap().granted);
        assert!(matrix.cell(ModuleId::new(9), ActionId::new(2)).is_none());
    }
}
