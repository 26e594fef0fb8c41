// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Classification of raw token claims.
//!
//! Every payload entry lands in exactly one bucket:
//!
//! 1. keys containing `-` are module permission claims
//!    (`Permissions-UserManagement`, ...);
//! 2. well-known identity keys (`nameid`, `email`, the role URI, ...);
//! 3. everything else is kept as unrecognized.
//!
//! The `-` rule is checked first and is purely lexical: a standard claim
//! whose name contains a hyphen is classified as a module claim.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::token::RawClaims;

/// Claim key carrying the user's role(s).
pub const ROLE_CLAIM: &str = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";

/// Character that marks a claim key as a module permission claim.
pub const MODULE_CLAIM_SEPARATOR: char = '-';

const NAME_ID_CLAIM: &str = "nameid";
const SUBJECT_CLAIM: &str = "sub";
const EMAIL_CLAIM: &str = "email";
const NAME_CLAIM: &str = "name";
const TENANT_CLAIM: &str = "TenantId";
const EXPIRES_CLAIM: &str = "exp";
const ISSUED_AT_CLAIM: &str = "iat";

// =============================================================================
// ClaimValue
// =============================================================================

/// Value of a module permission claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimValue {
    /// List of action names.
    ///
    /// A claim holding a single string is read as a one-element list.
    /// Non-string entries of an array are dropped.
    Actions(Vec<String>),
    /// Any other JSON value. Grants no actions.
    Opaque(Value),
}

impl ClaimValue {
    /// Classifies a JSON claim value.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(action) => ClaimValue::Actions(vec![action]),
            Value::Array(items) => ClaimValue::Actions(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            other => ClaimValue::Opaque(other),
        }
    }

    /// Returns the action names, empty for opaque values.
    pub fn actions(&self) -> &[String] {
        match self {
            ClaimValue::Actions(actions) => actions,
            ClaimValue::Opaque(_) => &[],
        }
    }

    /// Returns `true` if the value lists the given action (exact match).
    pub fn contains(&self, action: &str) -> bool {
        self.actions().iter().any(|a| a == action)
    }

    /// Converts back to JSON.
    pub fn to_value(&self) -> Value {
        match self {
            ClaimValue::Actions(actions) => {
                Value::Array(actions.iter().cloned().map(Value::String).collect())
            }
            ClaimValue::Opaque(value) => value.clone(),
        }
    }
}

impl Serialize for ClaimValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

// =============================================================================
// ModuleClaims
// =============================================================================

/// Module permission claims in payload order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleClaims {
    entries: Vec<(String, ClaimValue)>,
}

impl ModuleClaims {
    /// Creates an empty set of claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a claim, replacing an existing one with the same key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: ClaimValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Adds a claim (builder style).
    pub fn with(mut self, key: impl Into<String>, value: ClaimValue) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the claim with the given key.
    pub fn get(&self, key: &str) -> Option<&ClaimValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterates over claims in payload order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClaimValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the claim keys in payload order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Returns the number of claims.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no claims.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ModuleClaims {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>> FromIterator<(K, ClaimValue)> for ModuleClaims {
    fn from_iter<I: IntoIterator<Item = (K, ClaimValue)>>(iter: I) -> Self {
        let mut claims = ModuleClaims::new();
        for (key, value) in iter {
            claims.insert(key, value);
        }
        claims
    }
}

// =============================================================================
// TokenClaims
// =============================================================================

/// Raw claims sorted into identity fields, module claims and leftovers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenClaims {
    /// `nameid`: the user identifier.
    pub name_id: Option<String>,
    /// `sub`.
    pub subject: Option<String>,
    /// `email`.
    pub email: Option<String>,
    /// `name`: display name.
    pub name: Option<String>,
    /// Role claim values; the first one is the primary role.
    pub roles: Vec<String>,
    /// `TenantId`.
    pub tenant_id: Option<String>,
    /// `exp` (Unix timestamp).
    pub expires_at: Option<i64>,
    /// `iat` (Unix timestamp).
    pub issued_at: Option<i64>,
    /// Claims whose key contains `-`.
    pub module_claims: ModuleClaims,
    /// Everything else, including well-known keys with unexpected types.
    pub unrecognized: RawClaims,
}

impl TokenClaims {
    /// Classifies a decoded payload.
    pub fn from_raw(raw: RawClaims) -> Self {
        let mut claims = TokenClaims::default();

        for (key, value) in raw {
            if key.contains(MODULE_CLAIM_SEPARATOR) {
                claims
                    .module_claims
                    .insert(key, ClaimValue::from_value(value));
                continue;
            }

            let leftover = match key.as_str() {
                NAME_ID_CLAIM => assign_text(&mut claims.name_id, value),
                SUBJECT_CLAIM => assign_text(&mut claims.subject, value),
                EMAIL_CLAIM => assign_text(&mut claims.email, value),
                NAME_CLAIM => assign_text(&mut claims.name, value),
                TENANT_CLAIM => assign_text(&mut claims.tenant_id, value),
                EXPIRES_CLAIM => assign_timestamp(&mut claims.expires_at, value),
                ISSUED_AT_CLAIM => assign_timestamp(&mut claims.issued_at, value),
                ROLE_CLAIM => assign_roles(&mut claims.roles, value),
                _ => Some(value),
            };

            if let Some(value) = leftover {
                claims.unrecognized.insert(key, value);
            }
        }

        tracing::trace!(
            module_claims = claims.module_claims.len(),
            unrecognized = claims.unrecognized.len(),
            "Classified token claims"
        );
        claims
    }

    /// Returns the primary role.
    pub fn primary_role(&self) -> Option<&str> {
        self.roles.first().map(|r| r.as_str())
    }
}

/// Stores string or numeric values; hands anything else back.
fn assign_text(slot: &mut Option<String>, value: Value) -> Option<Value> {
    match value {
        Value::String(s) => {
            *slot = Some(s);
            None
        }
        Value::Number(n) => {
            *slot = Some(n.to_string());
            None
        }
        other => Some(other),
    }
}

fn assign_timestamp(slot: &mut Option<i64>, value: Value) -> Option<Value> {
    match value.as_i64() {
        Some(ts) => {
            *slot = Some(ts);
            None
        }
        None => Some(value),
    }
}

fn assign_roles(slot: &mut Vec<String>, value: Value) -> Option<Value> {
    match value {
        Value::String(role) => {
            *slot = vec![role];
            None
        }
        Value::Array(items) if items.iter().all(Value::is_string) => {
            *slot = items
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
            None
        }
        other => Some(other),
    }
}

// =============================================================================
// Tests
// =============================================================================
