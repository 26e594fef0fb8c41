// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Per-module permission mapping derived from module claims.

use std::collections::HashMap;

use serde::Serialize;

use crate::claims::{ModuleClaims, MODULE_CLAIM_SEPARATOR};

/// Action that makes a module visible in navigation.
pub const READ_ACTION: &str = "Read";

/// Extracts the module name from a module claim key.
///
/// The module name is the second `-`-separated segment:
/// `Permissions-UserManagement` yields `UserManagement`, and
/// `Permissions-User-Management` yields `User`.
pub fn module_name_from_claim_key(key: &str) -> Option<&str> {
    key.split(MODULE_CLAIM_SEPARATOR).nth(1)
}

/// Mapping of module name to granted action names.
///
/// Always built from [`ModuleClaims`]; it is never stored or updated on its
/// own. Lookups are exact and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PermissionMapping {
    modules: HashMap<String, Vec<String>>,
}

impl PermissionMapping {
    /// Builds the mapping from module claims.
    ///
    /// When two claim keys name the same module, the later one in payload
    /// order wins.
    pub fn from_claims(claims: &ModuleClaims) -> Self {
        let mut modules = HashMap::with_capacity(claims.len());

        for (key, value) in claims.iter() {
            if let Some(module) = module_name_from_claim_key(key) {
                modules.insert(module.to_string(), value.actions().to_vec());
            }
        }

        Self { modules }
    }

    /// Returns the actions granted on a module.
    pub fn actions(&self, module: &str) -> Option<&[String]> {
        self.modules.get(module).map(|a| a.as_slice())
    }

    /// Returns `true` if the action is granted on the module.
    pub fn allows(&self, module: &str, action: &str) -> bool {
        self.actions(module)
            .is_some_and(|actions| actions.iter().any(|a| a == action))
    }

    /// Returns `true` if the module may be shown.
    pub fn can_read(&self, module: &str) -> bool {
        self.allows(module, READ_ACTION)
    }

    /// Returns the module names in the mapping, sorted.
    pub fn modules(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.modules.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of modules in the mapping.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` if no module has any claim.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
