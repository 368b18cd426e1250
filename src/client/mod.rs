//! Postman API client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

#[cfg(test)]
pub mod mock;
pub mod postman;

#[cfg(test)]
pub use mock::MockPostmanClient;
pub use postman::PostmanClient;

/// Postman API client trait
///
/// Covers the workspace listing and the collection/environment CRUD calls used
/// by deploy and delete. Asset bodies stay raw JSON since they are forwarded
/// as-is.
#[async_trait]
pub trait PostmanApi: Send + Sync {
    /// Get a workspace with its collection and environment listings
    async fn get_workspace(&self, workspace_id: &str) -> Result<Workspace>;

    /// Get the full collection document (the inner `collection` object)
    async fn get_collection(&self, uid: &str) -> Result<Value>;

    /// Get the full environment document (the inner `environment` object)
    async fn get_environment(&self, uid: &str) -> Result<Value>;

    /// Create a collection in a workspace; `payload` is `{"collection": ...}`
    async fn create_collection(&self, workspace_id: &str, payload: &Value) -> Result<AssetRef>;

    /// Replace an existing collection
    async fn update_collection(&self, uid: &str, payload: &Value) -> Result<AssetRef>;

    async fn delete_collection(&self, uid: &str) -> Result<()>;

    /// Create an environment in a workspace; `payload` is `{"environment": ...}`
    async fn create_environment(&self, workspace_id: &str, payload: &Value) -> Result<AssetRef>;

    /// Replace an existing environment
    async fn update_environment(&self, uid: &str, payload: &Value) -> Result<AssetRef>;

    async fn delete_environment(&self, uid: &str) -> Result<()>;
}

/// Workspace with its asset listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub collections: Vec<WorkspaceItem>,

    #[serde(default)]
    pub environments: Vec<WorkspaceItem>,
}

/// Collection or environment entry of a workspace listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceItem {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub uid: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}

impl WorkspaceItem {
    /// `uid`, falling back to `id`
    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref().or(self.id.as_deref())
    }
}

/// Identity returned by create and update calls
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetRef {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub uid: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}

impl AssetRef {
    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref().or(self.id.as_deref())
    }
}
