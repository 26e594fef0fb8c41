// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Module access filtering for navigation.

use estate_core::Module;

use crate::claims::ModuleClaims;
use crate::permission::PermissionMapping;

/// Returns the catalog modules the claims grant `Read` on.
///
/// Catalog order is kept and duplicates are not removed. With no claims
/// (signed out, or a token without module claims) nothing is visible.
pub fn accessible_modules(catalog: &[Module], claims: Option<&ModuleClaims>) -> Vec<Module> {
    let Some(claims) = claims else {
        return Vec::new();
    };
    if claims.is_empty() {
        return Vec::new();
    }

    let mapping = PermissionMapping::from_claims(claims);
    let visible: Vec<Module> = catalog
        .iter()
        .filter(|module| mapping.can_read(&module.name))
        .cloned()
        .collect();

    tracing::debug!(
        catalog = catalog.len(),
        visible = visible.len(),
        "Filtered module catalog"
    );
    visible
}

/// Outcome of filtering the catalog for the current identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleAccess {
    /// Modules to show, in catalog order. May be empty when no claim grants
    /// `Read` on a catalog module.
    Visible(Vec<Module>),
    /// No identity, or an identity without module claims.
    EmptyAccess,
}

impl ModuleAccess {
    /// Filters the catalog against optional claims.
    pub fn evaluate(catalog: &[Module], claims: Option<&ModuleClaims>) -> Self {
        match claims {
            Some(claims) if !claims.is_empty() => {
                Self::Visible(accessible_modules(catalog, Some(claims)))
            }
            _ => Self::EmptyAccess,
        }
    }

    /// Returns the visible modules.
    pub fn modules(&self) -> &[Module] {
        match self {
            Self::Visible(modules) => modules,
            Self::EmptyAccess => &[],
        }
    }

    /// Consumes the outcome, returning the visible modules.
    pub fn into_modules(self) -> Vec<Module> {
        match self {
            Self::Visible(modules) => modules,
            Self::EmptyAccess => Vec::new(),
        }
    }

    /// Returns `true` if nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.modules().is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
