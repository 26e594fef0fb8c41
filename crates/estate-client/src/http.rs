// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! REST client for the estate backend.
//!
//! Every request carries:
//! - the configured default headers
//! - `Authorization: Bearer <token>` while the session holds a token
//! - `X-TenantId` once a tenant is known (configuration or last login)

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use estate_auth::AuthSession;
use estate_config::ApiConfig;

use crate::error::{ClientError, ClientResult};

/// Header carrying the tenant identifier.
pub const TENANT_HEADER: &str = "X-TenantId";

// =============================================================================
// RestClient
// =============================================================================

/// HTTP client bound to one backend and one session.
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
    session: Arc<AuthSession>,
    tenant_id: RwLock<Option<String>>,
}

impl RestClient {
    /// Creates a client from API settings.
    pub fn new(config: &ApiConfig, session: Arc<AuthSession>) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ClientError::configuration(format!("invalid header name '{}': {}", name, e))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                ClientError::configuration(format!("invalid value for header '{}': {}", name, e))
            })?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
            tenant_id: RwLock::new(config.tenant_id.clone()),
        })
    }

    /// Returns the backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the tenant sent with requests.
    pub fn tenant_id(&self) -> Option<String> {
        self.tenant_id.read().clone()
    }

    /// Sets the tenant sent with later requests.
    pub fn set_tenant(&self, tenant_id: impl Into<String>) {
        *self.tenant_id.write() = Some(tenant_id.into());
    }

    /// Builds the absolute URL for an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Starts a request with the session bearer and tenant headers.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.request_for_tenant(method, path, self.tenant_id())
    }

    /// Starts a request for an explicit tenant.
    pub(crate) fn request_for_tenant(
        &self,
        method: Method,
        path: &str,
        tenant: Option<String>,
    ) -> RequestBuilder {
        let mut request = self.client.request(method, self.url(path));
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        if let Some(tenant) = tenant {
            request = request.header(TENANT_HEADER, tenant);
        }
        request
    }

    /// Sends a request and decodes a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> ClientResult<T> {
        let response = self.execute(request, endpoint).await?;
        response.json::<T>().await.map_err(|e| {
            let err = ClientError::decode(e.to_string());
            tracing::warn!(endpoint, error = %err, "Backend response could not be decoded");
            err
        })
    }

    /// Sends a request and ignores the body.
    pub(crate) async fn send_empty(&self, request: RequestBuilder, endpoint: &str) -> ClientResult<()> {
        self.execute(request, endpoint).await.map(|_| ())
    }

    async fn execute(&self, request: RequestBuilder, endpoint: &str) -> ClientResult<Response> {
        let response = request.send().await.map_err(|e| {
            let err = ClientError::transport(e.to_string());
            tracing::warn!(endpoint, error = %err, "Backend request failed");
            err
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(endpoint, status = status.as_u16(), "Backend request succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ClientError::status(status.as_u16(), error_message(status, &body));
        tracing::warn!(endpoint, status = status.as_u16(), error = %err, "Backend request rejected");
        Err(err)
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .field("tenant_id", &*self.tenant_id.read())
            .finish()
    }
}

/// Picks the message shown for a failed response.
///
/// Uses the body's `message` field when it is a non-empty string, else a
/// generic message naming the status code.
pub fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_auth::{Identity, MemoryTokenStore, TokenClaims, TokenDecoder};
    use reqwest::header::AUTHORIZATION;

    fn session() -> Arc<AuthSession> {
        Arc::new(AuthSession::initialize(
            Arc::new(MemoryTokenStore::new()),
            TokenDecoder::new(),
        ))
    }

    #[test]
    fn test_url_joining() {
        let config = ApiConfig {
            base_url: "https://backend.example.com/api/".to_string(),
            ..Default::default()
        };
        let client = RestClient::new(&config, session()).unwrap();
        assert_eq!(client.base_url(), "https://backend.example.com/api");
        assert_eq!(
            client.url("/RoleManagement/modules"),
            "https://backend.example.com/api/RoleManagement/modules"
        );
        assert_eq!(client.url("Profile"), "https://backend.example.com/api/Profile");
    }

    #[test]
    fn test_tenant() {
        let config = ApiConfig {
            tenant_id: Some("t-1".to_string()),
            ..Default::default()
        };
        let client = RestClient::new(&config, session()).unwrap();
        assert_eq!(client.tenant_id().as_deref(), Some("t-1"));
        client.set_tenant("t-2");
        assert_eq!(client.tenant_id().as_deref(), Some("t-2"));
    }

    #[test]
    fn test_signed_out_request_has_no_bearer() {
        let client = RestClient::new(&ApiConfig::default(), session()).unwrap();

        let request = client.request(Method::GET, "/Profile").build().unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
        assert!(request.headers().get(TENANT_HEADER).is_none());

        let login = client
            .request_for_tenant(Method::POST, "/Auth/login", Some("t-1".to_string()))
            .build()
            .unwrap();
        assert!(login.headers().get(AUTHORIZATION).is_none());
        assert_eq!(login.headers()[TENANT_HEADER], "t-1");
    }

    #[test]
    fn test_signed_in_request_headers() {
        let config = ApiConfig {
            base_url: "https://backend.example.com/api".to_string(),
            ..Default::default()
        };
        let session = session();
        let client = RestClient::new(&config, Arc::clone(&session)).unwrap();
        session
            .set_auth(Identity::from_claims(TokenClaims::default()), "h.p.s")
            .unwrap();
        client.set_tenant("t-9");

        let request = client
            .request(Method::DELETE, "/RoleManagement/RemoveRoleFromUser")
            .build()
            .unwrap();
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer h.p.s");
        assert_eq!(request.headers()[TENANT_HEADER], "t-9");
        assert_eq!(
            request.url().as_str(),
            "https://backend.example.com/api/RoleManagement/RemoveRoleFromUser"
        );

        // An explicit tenant replaces the stored one.
        let login = client
            .request_for_tenant(Method::POST, "/Auth/login", Some("t-1".to_string()))
            .build()
            .unwrap();
        let tenants: Vec<_> = login.headers().get_all(TENANT_HEADER).iter().collect();
        assert_eq!(tenants, vec!["t-1"]);
        assert_eq!(login.headers()[AUTHORIZATION], "Bearer h.p.s");

        session.logout().unwrap();
        let request = client.request(Method::GET, "/Profile").build().unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_invalid_default_header() {
        let mut config = ApiConfig::default();
        config
            .default_headers
            .insert("bad header".to_string(), "x".to_string());
        let err = RestClient::new(&config, session()).unwrap_err();
        assert!(matches!(err, ClientError::Configuration { .. }));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"message":"Role already has permission"}"#),
            "Role already has permission"
        );
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
            "Request failed with status code 500"
        );
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, r#"{"message":""}"#),
            "Request failed with status code 404"
        );
        assert_eq!(
            error_message(StatusCode::CONFLICT, r#"{"message":42}"#),
            "Request failed with status code 409"
        );
    }
}
