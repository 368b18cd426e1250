//! Mock Postman API client for testing
//!
//! Holds an in-memory workspace and records every write so sync logic can be
//! tested without HTTP.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use super::{AssetRef, PostmanApi, Workspace, WorkspaceItem};
use crate::error::{ApiError, Result};

/// A recorded write call
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRequest {
    /// Trait method name, e.g. "update_collection"
    pub method: String,
    /// Workspace id for creates, uid for updates and deletes
    pub target: String,
    pub payload: Option<Value>,
}

/// Mock API client for testing.
///
/// ```ignore
/// let mock = MockPostmanClient::new()
///     .with_collection("uid-1", "My API v1-rev0", Some("my-api"))
///     .await;
/// ```
#[derive(Default)]
pub struct MockPostmanClient {
    workspace: Arc<Mutex<Workspace>>,
    /// Full documents returned by get_collection / get_environment
    documents: Arc<Mutex<HashMap<String, Value>>>,
    /// Uids whose writes fail with a 500
    failing: Arc<Mutex<HashSet<String>>>,
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
    next_id: Arc<Mutex<usize>>,
}

impl MockPostmanClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collection to the workspace listing.
    pub async fn with_collection(self, uid: &str, name: &str, api_id: Option<&str>) -> Self {
        self.workspace.lock().await.collections.push(item(uid, name));
        let mut info = serde_json::json!({ "name": name });
        if let Some(api_id) = api_id {
            info["x-api-id"] = Value::String(api_id.to_string());
        }
        self.documents
            .lock()
            .await
            .insert(uid.to_string(), serde_json::json!({ "info": info, "item": [] }));
        self
    }

    /// Add an environment to the workspace listing.
    pub async fn with_environment(self, uid: &str, name: &str, api_id: Option<&str>) -> Self {
        self.workspace.lock().await.environments.push(item(uid, name));
        let mut doc = serde_json::json!({ "name": name, "values": [] });
        if let Some(api_id) = api_id {
            doc["x-api-id"] = Value::String(api_id.to_string());
        }
        self.documents.lock().await.insert(uid.to_string(), doc);
        self
    }

    /// Add a raw listing entry without a fetchable document.
    pub async fn with_listing_entry(self, entry: WorkspaceItem, is_collection: bool) -> Self {
        let mut ws = self.workspace.lock().await;
        if is_collection {
            ws.collections.push(entry);
        } else {
            ws.environments.push(entry);
        }
        drop(ws);
        self
    }

    /// Make every write against `uid` fail with a server error.
    pub async fn failing_on(self, uid: &str) -> Self {
        self.failing.lock().await.insert(uid.to_string());
        self
    }

    /// Get all recorded write calls.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    async fn record(&self, method: &str, target: &str, payload: Option<&Value>) -> Result<()> {
        self.captured_requests.lock().await.push(CapturedRequest {
            method: method.to_string(),
            target: target.to_string(),
            payload: payload.cloned(),
        });
        if self.failing.lock().await.contains(target) {
            return Err(ApiError::Http {
                status: 500,
                body: format!("{} failed for {}", method, target),
            }
            .into());
        }
        Ok(())
    }

    async fn new_uid(&self, prefix: &str) -> String {
        let mut next = self.next_id.lock().await;
        *next += 1;
        format!("{}-new-{}", prefix, next)
    }

    async fn document(&self, uid: &str) -> Result<Value> {
        self.documents.lock().await.get(uid).cloned().ok_or_else(|| {
            ApiError::Http {
                status: 404,
                body: format!("{} not found", uid),
            }
            .into()
        })
    }
}

fn item(uid: &str, name: &str) -> WorkspaceItem {
    WorkspaceItem {
        id: Some(uid.to_string()),
        uid: Some(uid.to_string()),
        name: Some(name.to_string()),
    }
}

fn asset_ref(uid: &str, payload: &Value, envelope: &str) -> AssetRef {
    let name = payload
        .get(envelope)
        .and_then(|inner| inner.get("info").unwrap_or(inner).get("name"))
        .and_then(Value::as_str)
        .map(str::to_string);
    AssetRef {
        id: Some(uid.to_string()),
        uid: Some(uid.to_string()),
        name,
    }
}

#[async_trait]
impl PostmanApi for MockPostmanClient {
    async fn get_workspace(&self, workspace_id: &str) -> Result<Workspace> {
        let mut ws = self.workspace.lock().await.clone();
        ws.id = workspace_id.to_string();
        Ok(ws)
    }

    async fn get_collection(&self, uid: &str) -> Result<Value> {
        self.document(uid).await
    }

    async fn get_environment(&self, uid: &str) -> Result<Value> {
        self.document(uid).await
    }

    async fn create_collection(&self, workspace_id: &str, payload: &Value) -> Result<AssetRef> {
        self.record("create_collection", workspace_id, Some(payload))
            .await?;
        let uid = self.new_uid("col").await;
        Ok(asset_ref(&uid, payload, "collection"))
    }

    async fn update_collection(&self, uid: &str, payload: &Value) -> Result<AssetRef> {
        self.record("update_collection", uid, Some(payload)).await?;
        Ok(asset_ref(uid, payload, "collection"))
    }

    async fn delete_collection(&self, uid: &str) -> Result<()> {
        self.record("delete_collection", uid, None).await
    }

    async fn create_environment(&self, workspace_id: &str, payload: &Value) -> Result<AssetRef> {
        self.record("create_environment", workspace_id, Some(payload))
            .await?;
        let uid = self.new_uid("env").await;
        Ok(asset_ref(&uid, payload, "environment"))
    }

    async fn update_environment(&self, uid: &str, payload: &Value) -> Result<AssetRef> {
        self.record("update_environment", uid, Some(payload)).await?;
        Ok(asset_ref(uid, payload, "environment"))
    }

    async fn delete_environment(&self, uid: &str) -> Result<()> {
        self.record("delete_environment", uid, None).await
    }
}
