// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Bearer token decoding.
//!
//! The console receives an opaque signed token from the backend. It only
//! needs the payload: three `.`-separated segments, the middle one being a
//! base64url encoded JSON object. Signature verification is optional and
//! only possible when the deployment shares the signing secret.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::error::{AuthError, AuthResult};

/// Untyped claims object decoded from a token payload.
///
/// Key order follows the payload.
pub type RawClaims = serde_json::Map<String, serde_json::Value>;

/// base64url, padding optional on input.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const SEGMENT_COUNT: usize = 3;

// =============================================================================
// TokenVerification
// =============================================================================

/// Shared-secret signature verification settings.
#[derive(Clone)]
pub struct TokenVerification {
    key: DecodingKey,
    algorithm: Algorithm,
    validate_exp: bool,
    leeway_secs: u64,
}

impl TokenVerification {
    /// Creates HS256 verification with the given secret.
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_ref()),
            algorithm: Algorithm::HS256,
            validate_exp: false,
            leeway_secs: 60,
        }
    }

    /// Sets the expected algorithm. Only HMAC algorithms can succeed.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Enables or disables the `exp` check.
    pub fn with_expiry_check(mut self, enabled: bool) -> Self {
        self.validate_exp = enabled;
        self
    }

    /// Sets the clock skew tolerance.
    pub fn with_leeway(mut self, leeway_secs: u64) -> Self {
        self.leeway_secs = leeway_secs;
        self
    }

    /// Verifies the token signature (and expiry, when enabled).
    pub fn verify(&self, token: &str) -> AuthResult<()> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_aud = false;
        validation.validate_exp = self.validate_exp;
        validation.leeway = self.leeway_secs;
        validation.required_spec_claims.clear();
        if self.validate_exp {
            validation.required_spec_claims.insert("exp".to_string());
        }

        decode::<serde_json::Value>(token, &self.key, &validation)
            .map(|_| ())
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AuthError::invalid_token("token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AuthError::invalid_token("invalid token signature")
                }
                jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => {
                    AuthError::invalid_token("unexpected token algorithm")
                }
                _ => AuthError::invalid_token(format!("token verification failed: {}", e)),
            })
    }
}

impl std::fmt::Debug for TokenVerification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerification")
            .field("algorithm", &self.algorithm)
            .field("validate_exp", &self.validate_exp)
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}

// =============================================================================
// TokenDecoder
// =============================================================================

/// Decodes bearer tokens into [`RawClaims`].
///
/// Decoding is a pure function of the token; nothing is cached.
#[derive(Debug, Clone, Default)]
pub struct TokenDecoder {
    verification: Option<TokenVerification>,
}

impl TokenDecoder {
    /// Creates a decoder that reads the payload without verifying it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder that also verifies the signature.
    pub fn verified(verification: TokenVerification) -> Self {
        Self {
            verification: Some(verification),
        }
    }

    /// Returns `true` if signatures are verified.
    pub fn verifies_signature(&self) -> bool {
        self.verification.is_some()
    }

    /// Decodes the token payload.
    ///
    /// Fails with [`AuthError::InvalidToken`] when the token does not have
    /// exactly three segments, the payload is not base64url, or it does not
    /// decode to a JSON object.
    pub fn decode(&self, token: &str) -> AuthResult<RawClaims> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != SEGMENT_COUNT {
            return Err(AuthError::invalid_token(format!(
                "expected {} segments, found {}",
                SEGMENT_COUNT,
                segments.len()
            )));
        }

        let bytes = PAYLOAD_ENGINE
            .decode(segments[1])
            .map_err(|e| AuthError::invalid_token(format!("payload is not base64url: {}", e)))?;

        let payload: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| AuthError::invalid_token(format!("payload is not JSON: {}", e)))?;

        let claims = match payload {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(AuthError::invalid_token(format!(
                    "payload is not a JSON object (found {})",
                    json_kind(&other)
                )))
            }
        };

        if let Some(ref verification) = self.verification {
            verification.verify(token)?;
        }

        tracing::debug!(claims = claims.len(), "Decoded token payload");
        Ok(claims)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// =============================================================================
// Tests
// =============================================================================
