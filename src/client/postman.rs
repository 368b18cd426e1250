//! Postman REST client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use super::{AssetRef, PostmanApi, Workspace};
use crate::error::{ApiError, Result};

/// Postman API base URL
pub const API_BASE_URL: &str = "https://api.postman.com";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Postman allows 300 requests per minute per key; stay below it
const RATE_LIMIT_PER_SECOND: u32 = 4;

/// Postman API client
pub struct PostmanClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl PostmanClient {
    /// Create a client against the public Postman API
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_options(api_key, API_BASE_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with a custom base URL and timeout
    pub fn with_options(
        api_key: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(concat!("postgen/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_second(NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN));

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    /// Send one request and return the JSON body.
    ///
    /// Non-2xx answers become `ApiError::Http` carrying the status and the
    /// body (pretty-printed when it is JSON). An empty or 204 answer yields
    /// an empty object.
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Value> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, &url)
            .header("X-Api-Key", &self.api_key)
            .header("Accept", "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                body: pretty_body(&text),
            }
            .into());
        }

        if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
            return Ok(Value::Object(Default::default()));
        }

        serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}. Body was: {}", e, text))
                .into()
        })
    }

    async fn write_asset(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        envelope: &str,
        payload: &Value,
    ) -> Result<AssetRef> {
        let response = self.send(method, path, query, Some(payload)).await?;
        Ok(response
            .get(envelope)
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default())
    }
}

fn pretty_body(text: &str) -> String {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|v| serde_json::to_string_pretty(&v).ok())
        .unwrap_or_else(|| text.to_string())
}

/// Take the object under `key`, or fail with the response shape
fn unwrap_envelope(mut response: Value, key: &str) -> Result<Value> {
    match response.get_mut(key).map(Value::take) {
        Some(inner) if inner.is_object() => Ok(inner),
        _ => Err(ApiError::InvalidResponse(format!("Response has no `{}` object", key)).into()),
    }
}

#[async_trait]
impl PostmanApi for PostmanClient {
    async fn get_workspace(&self, workspace_id: &str) -> Result<Workspace> {
        #[derive(Deserialize)]
        struct WorkspaceResponse {
            workspace: Workspace,
        }

        let path = format!("/workspaces/{}", workspace_id);
        let response = self.send(Method::GET, &path, &[], None).await?;
        let parsed: WorkspaceResponse = serde_json::from_value(response).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse workspace: {}", e))
        })?;
        Ok(parsed.workspace)
    }

    async fn get_collection(&self, uid: &str) -> Result<Value> {
        let path = format!("/collections/{}", uid);
        let response = self.send(Method::GET, &path, &[], None).await?;
        unwrap_envelope(response, "collection")
    }

    async fn get_environment(&self, uid: &str) -> Result<Value> {
        let path = format!("/environments/{}", uid);
        let response = self.send(Method::GET, &path, &[], None).await?;
        unwrap_envelope(response, "environment")
    }

    async fn create_collection(&self, workspace_id: &str, payload: &Value) -> Result<AssetRef> {
        self.write_asset(
            Method::POST,
            "/collections",
            &[("workspace", workspace_id)],
            "collection",
            payload,
        )
        .await
    }

    async fn update_collection(&self, uid: &str, payload: &Value) -> Result<AssetRef> {
        let path = format!("/collections/{}", uid);
        self.write_asset(Method::PUT, &path, &[], "collection", payload)
            .await
    }

    async fn delete_collection(&self, uid: &str) -> Result<()> {
        let path = format!("/collections/{}", uid);
        self.send(Method::DELETE, &path, &[], None).await?;
        Ok(())
    }

    async fn create_environment(&self, workspace_id: &str, payload: &Value) -> Result<AssetRef> {
        self.write_asset(
            Method::POST,
            "/environments",
            &[("workspace", workspace_id)],
            "environment",
            payload,
        )
        .await
    }

    async fn update_environment(&self, uid: &str, payload: &Value) -> Result<AssetRef> {
        let path = format!("/environments/{}", uid);
        self.write_asset(Method::PUT, &path, &[], "environment", payload)
            .await
    }

    async fn delete_environment(&self, uid: &str) -> Result<()> {
        let path = format!("/environments/{}", uid);
        self.send(Method::DELETE, &path, &[], None).await?;
        Ok(())
    }
}
