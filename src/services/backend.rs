//! Backend client service
//!
//! HTTP client for the hosted backend: the identity API mounted under
//! `/auth/v1` and the row-store API mounted under `/rest/v1`.

use std::error::Error as StdError;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde_json::{json, Value};
use tracing::{debug, error, info};

use crate::config::BackendConfig;
use crate::services::remote::{
    classify_identity, classify_rows, Credentials, IdentityProvider, RemoteFailure, RemoteResult,
    RowStore,
};

/// Backend API client
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    anon_key: String,
    service_role_key: Option<String>,
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(config: &BackendConfig) -> Result<Self> {
        info!("Initializing backend client for {}", config.url);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("org-portal/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build backend HTTP client")?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            service_role_key: config.service_role_key.clone(),
        })
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn rest_url(&self, table: &str, filter: Option<(&str, &str)>) -> RemoteResult<Url> {
        let mut url = Url::parse(&format!("{}/rest/v1/{}", self.base_url, table))
            .map_err(|e| RemoteFailure::unavailable(format!("Invalid backend URL: {}", e)))?;
        if let Some((column, value)) = filter {
            url.query_pairs_mut()
                .append_pair(column, &format!("eq.{}", value));
        }
        Ok(url)
    }

    fn with_key(builder: RequestBuilder, key: &str) -> RequestBuilder {
        builder.header("apikey", key).bearer_auth(key)
    }

    /// Send a request and decode the body as JSON
    ///
    /// Empty bodies decode to `null`; bodies that are not JSON are kept as a
    /// string so they can still be echoed to the caller.
    async fn send(&self, builder: RequestBuilder) -> RemoteResult<(StatusCode, Value)> {
        let response = builder.send().await.map_err(|e| {
            error!(
                "Backend ERROR: request failed: {} (is_connect: {}, is_timeout: {})",
                e,
                e.is_connect(),
                e.is_timeout()
            );
            if let Some(source) = e.source() {
                error!("Backend ERROR: Underlying cause: {}", source);
            }
            if e.is_timeout() {
                RemoteFailure::unavailable("Backend request timed out")
            } else if e.is_connect() {
                RemoteFailure::unavailable("Failed to connect to backend")
            } else {
                RemoteFailure::unavailable(e.to_string())
            }
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RemoteFailure::unavailable(format!("Failed to read response body: {}", e)))?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        debug!(status = status.as_u16(), "Backend: response received");
        Ok((status, body))
    }

    async fn identity_call(&self, builder: RequestBuilder) -> RemoteResult<Value> {
        let (status, body) = self.send(builder).await?;
        classify_identity(status, body)
    }

    async fn rows_call(&self, expected: StatusCode, builder: RequestBuilder) -> RemoteResult<Vec<Value>> {
        let (status, body) = self
            .send(builder.header("Prefer", "return=representation"))
            .await?;
        classify_rows(expected, status, body)
    }
}

#[async_trait]
impl IdentityProvider for BackendClient {
    async fn sign_in_with_password(&self, credentials: &Credentials) -> RemoteResult<Value> {
        debug!("Backend: password sign-in");
        let request = self
            .client
            .post(self.auth_url("token?grant_type=password"))
            .json(credentials);
        self.identity_call(Self::with_key(request, &self.anon_key))
            .await
    }

    async fn sign_up(&self, credentials: &Credentials) -> RemoteResult<Value> {
        debug!("Backend: sign-up");
        let request = self.client.post(self.auth_url("signup")).json(credentials);
        self.identity_call(Self::with_key(request, &self.anon_key))
            .await
    }

    async fn reset_password_for_email(&self, email: &str) -> RemoteResult<Value> {
        debug!("Backend: password recovery");
        let request = self
            .client
            .post(self.auth_url("recover"))
            .json(&json!({ "email": email }));
        self.identity_call(Self::with_key(request, &self.anon_key))
            .await
    }

    async fn delete_user(&self, user_id: &str) -> RemoteResult<()> {
        let key = self.service_role_key.as_deref().ok_or_else(|| {
            RemoteFailure::unavailable("Service role key not configured; cannot delete users")
        })?;
        debug!(user_id, "Backend: deleting user");
        let url = self.auth_url(&format!("admin/users/{}", urlencoding::encode(user_id)));
        let request = self.client.delete(url);
        self.identity_call(Self::with_key(request, key))
            .await
            .map(|_| ())
    }

    async fn health(&self) -> RemoteResult<()> {
        let request = self.client.get(self.auth_url("health"));
        self.identity_call(Self::with_key(request, &self.anon_key))
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl RowStore for BackendClient {
    async fn insert(&self, table: &str, row: Value) -> RemoteResult<Vec<Value>> {
        debug!(table, "Backend: insert");
        let request = self.client.post(self.rest_url(table, None)?).json(&row);
        self.rows_call(StatusCode::CREATED, Self::with_key(request, &self.anon_key))
            .await
    }

    async fn update_eq(
        &self,
        table: &str,
        column: &str,
        value: &str,
        changes: Value,
    ) -> RemoteResult<Vec<Value>> {
        debug!(table, column, value, "Backend: update");
        let request = self
            .client
            .patch(self.rest_url(table, Some((column, value)))?)
            .json(&changes);
        self.rows_call(StatusCode::OK, Self::with_key(request, &self.anon_key))
            .await
    }

    async fn delete_eq(&self, table: &str, column: &str, value: &str) -> RemoteResult<Vec<Value>> {
        debug!(table, column, value, "Backend: delete");
        let request = self.client.delete(self.rest_url(table, Some((column, value)))?);
        self.rows_call(StatusCode::OK, Self::with_key(request, &self.anon_key))
            .await
    }
}
