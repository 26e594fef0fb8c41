// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Identifiers and the module catalog.
//!
//! The module catalog is owned by the backend. The console only reads it,
//! so these types carry no mutation beyond the builders used in tests.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Identifiers
// =============================================================================

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates a new identifier.
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw numeric value.
            #[inline]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

numeric_id!(
    /// Backend identifier of a module (a top-level feature area).
    ///
    /// # Examples
    ///
    /// ```
    /// use estate_core::ModuleId;
    ///
    /// let id = ModuleId::new(3);
    /// assert_eq!(id.get(), 3);
    /// ```
    ModuleId
);

numeric_id!(
    /// Backend identifier of an action within a module.
    ActionId
);

numeric_id!(
    /// Backend identifier of a role.
    RoleId
);

// =============================================================================
// Module Catalog
// =============================================================================

/// A named capability within a module (`Create`, `Read`, `Update`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleAction {
    /// Action identifier.
    pub id: ActionId,
    /// Action name as used in permission claims.
    pub name: String,
}

impl ModuleAction {
    /// Creates a new action.
    pub fn new(id: ActionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A top-level feature area together with the actions it supports.
///
/// Catalog order is decided by the backend and is preserved by every
/// consumer in this workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Module identifier.
    pub id: ModuleId,
    /// Module name. Permission claims refer to modules by this name.
    pub name: String,
    /// Actions defined for this module.
    #[serde(default)]
    pub actions: Vec<ModuleAction>,
}

impl Module {
    /// Creates a module with no actions.
    pub fn new(id: ModuleId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            actions: Vec::new(),
        }
    }

    /// Adds an action.
    pub fn with_action(mut self, action: ModuleAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Returns the action with the given identifier.
    pub fn action(&self, id: ActionId) -> Option<&ModuleAction> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// Returns the action with the given name (exact match).
    pub fn action_named(&self, name: &str) -> Option<&ModuleAction> {
        self.actions.iter().find(|a| a.name == name)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_deserialize_backend_shape() {
        let json = r#"{"id":4,"name":"UserManagement","actions":[{"id":1,"name":"Create"},{"id":2,"name":"Read"}]}"#;
        let module: Module = serde_json::from_str(json).unwrap();

        assert_eq!(module.id, ModuleId::new(4));
        assert_eq!(module.name, "UserManagement");
        assert_eq!(module.actions.len(), 2);
        assert_eq!(module.action(ActionId::new(2)).unwrap().name, "Read");
    }

    #[test]
    fn test_module_without_actions_field() {
        let module: Module = serde_json::from_str(r#"{"id":1,"name":"Reports"}"#).unwrap();
        assert!(module.actions.is_empty());
    }

    #[test]
    fn test_action_lookup_is_case_sensitive() {
        let module = Module::new(ModuleId::new(1), "Billing")
            .with_action(ModuleAction::new(ActionId::new(7), "Read"));

        assert!(module.action_named("Read").is_some());
        assert!(module.action_named("read").is_none());
        assert!(module.action(ActionId::new(8)).is_none());
    }

    #[test]
    fn test_id_display() {
        assert_eq!(RoleId::new(12).to_string(), "12");
        assert_eq!(Module::new(ModuleId::new(3), "Units").to_string(), "Units (#3)");
    }
}
