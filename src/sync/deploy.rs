//! Create-or-update of collections and environments in a workspace

use std::fmt;

use log::{debug, info};
use serde::Serialize;

use super::assets::{AssetKind, WorkspaceAssets, get_workspace_assets, resolve_existing};
use super::export::{CollectionExport, EnvironmentExport};
use crate::client::PostmanApi;
use crate::error::{Error, Result};

/// What an upsert did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncAction {
    Created,
    Updated,
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncAction::Created => write!(f, "created"),
            SyncAction::Updated => write!(f, "updated"),
        }
    }
}

/// Result of one successful upsert
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    pub kind: AssetKind,
    pub action: SyncAction,
    pub name: String,
    /// Empty when a create response carried no identity
    pub uid: String,
}

/// One deploy item: its name and either the outcome or the error that stopped it
#[derive(Debug)]
pub struct DeployItem {
    pub kind: AssetKind,
    pub name: String,
    pub result: Result<SyncOutcome>,
}

/// Per-item results of a deploy run
#[derive(Debug, Default)]
pub struct DeployReport {
    pub items: Vec<DeployItem>,
}

impl DeployReport {
    pub fn failures(&self) -> impl Iterator<Item = (&DeployItem, &Error)> {
        self.items
            .iter()
            .filter_map(|item| item.result.as_ref().err().map(|e| (item, e)))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.result.is_ok()).count()
    }
}

/// Create the collection, or overwrite the workspace collection it resolves to.
pub async fn upsert_collection(
    client: &dyn PostmanApi,
    workspace_id: &str,
    assets: &WorkspaceAssets,
    export: &CollectionExport,
) -> Result<SyncOutcome> {
    let existing = resolve_existing(&assets.collections, &export.api_id, &export.name)?;
    let payload = export.payload();

    let (action, uid) = match existing {
        Some(uid) => {
            debug!("Updating collection {} ({})", export.name, uid);
            client.update_collection(&uid, &payload).await?;
            (SyncAction::Updated, uid)
        }
        None => {
            debug!("Creating collection {} in {}", export.name, workspace_id);
            let created = client.create_collection(workspace_id, &payload).await?;
            (SyncAction::Created, created.uid().unwrap_or_default().to_string())
        }
    };

    Ok(SyncOutcome {
        kind: AssetKind::Collection,
        action,
        name: export.name.clone(),
        uid,
    })
}

/// Create the environment, or overwrite the workspace environment it resolves to.
pub async fn upsert_environment(
    client: &dyn PostmanApi,
    workspace_id: &str,
    assets: &WorkspaceAssets,
    export: &EnvironmentExport,
) -> Result<SyncOutcome> {
    let existing = resolve_existing(&assets.environments, &export.api_id, &export.name)?;
    let payload = export.payload();

    let (action, uid) = match existing {
        Some(uid) => {
            debug!("Updating environment {} ({})", export.name, uid);
            client.update_environment(&uid, &payload).await?;
            (SyncAction::Updated, uid)
        }
        None => {
            debug!("Creating environment {} in {}", export.name, workspace_id);
            let created = client.create_environment(workspace_id, &payload).await?;
            (SyncAction::Created, created.uid().unwrap_or_default().to_string())
        }
    };

    Ok(SyncOutcome {
        kind: AssetKind::Environment,
        action,
        name: export.name.clone(),
        uid,
    })
}

/// Deploy a collection and its environments to a workspace.
///
/// The workspace is indexed once up front; failing to read it fails the run.
/// After that each item is attempted in turn and its error, if any, is kept in
/// the report while the remaining items continue.
pub async fn deploy(
    client: &dyn PostmanApi,
    workspace_id: &str,
    collection: Option<&CollectionExport>,
    environments: &[EnvironmentExport],
) -> Result<DeployReport> {
    let assets = get_workspace_assets(client, workspace_id).await?;
    info!(
        "Indexed {} collections and {} environments in workspace {}",
        assets.collections.len(),
        assets.environments.len(),
        workspace_id
    );

    let mut report = DeployReport::default();

    if let Some(export) = collection {
        report.items.push(DeployItem {
            kind: AssetKind::Collection,
            name: export.name.clone(),
            result: upsert_collection(client, workspace_id, &assets, export).await,
        });
    }

    for export in environments {
        report.items.push(DeployItem {
            kind: AssetKind::Environment,
            name: export.name.clone(),
            result: upsert_environment(client, workspace_id, &assets, export).await,
        });
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockPostmanClient;
    use crate::error::ApiError;
    use serde_json::json;

    fn collection(name: &str, api_id: Option<&str>) -> CollectionExport {
        let mut info = json!({"name": name});
        if let Some(id) = api_id {
            info["x-api-id"] = json!(id);
        }
        CollectionExport::from_value(json!({"info": info, "item": []}), "test").unwrap()
    }

    fn environment(name: &str) -> EnvironmentExport {
        EnvironmentExport::from_value(json!({"id": "local", "name": name, "values": []}), "test")
            .unwrap()
    }

    fn api_environment(name: &str, api_id: &str) -> EnvironmentExport {
        EnvironmentExport::from_value(
            json!({"id": "local", "name": name, "x-api-id": api_id, "values": []}),
            "test",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_redeploy_environments_sharing_api_id() {
        let mock = MockPostmanClient::new()
            .with_environment("env-dev", "Orders API v1.0.0 - Dev", Some("orders-api"))
            .await
            .with_environment("env-prod", "Orders API v1.0.0 - Prod", Some("orders-api"))
            .await;

        let envs = vec![
            api_environment("Orders API v1.1.0 - Dev", "orders-api"),
            api_environment("Orders API v1.1.0 - Prod", "orders-api"),
            api_environment("Orders API v1.1.0 - Staging", "orders-api"),
        ];
        let report = deploy(&mock, "ws", None, &envs).await.unwrap();

        assert!(!report.has_failures());
        let outcomes: Vec<(SyncAction, String)> = report
            .items
            .iter()
            .map(|item| {
                let outcome = item.result.as_ref().unwrap();
                (outcome.action, outcome.uid.clone())
            })
            .collect();
        assert_eq!(outcomes[0], (SyncAction::Updated, "env-dev".to_string()));
        assert_eq!(outcomes[1], (SyncAction::Updated, "env-prod".to_string()));
        assert_eq!(outcomes[2].0, SyncAction::Created);

        let calls = mock.captured_requests().await;
        assert_eq!(calls[0].target, "env-dev");
        assert_eq!(calls[1].target, "env-prod");
        assert_eq!(calls[2].method, "create_environment");
    }

    #[tokio::test]
    async fn test_upsert_collection_updates_base_name_match() {
        let mock = MockPostmanClient::new()
            .with_collection("uid-1", "My API v1-rev0", None)
            .await;
        let assets = get_workspace_assets(&mock, "ws").await.unwrap();

        let outcome = upsert_collection(&mock, "ws", &assets, &collection("My API v2-rev0", None))
            .await
            .unwrap();

        assert_eq!(outcome.action, SyncAction::Updated);
        assert_eq!(outcome.uid, "uid-1");
        let calls = mock.captured_requests().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "update_collection");
        assert_eq!(calls[0].target, "uid-1");
    }

    #[tokio::test]
    async fn test_upsert_collection_creates_when_unknown() {
        let mock = MockPostmanClient::new()
            .with_collection("uid-1", "Billing v1", None)
            .await;
        let assets = get_workspace_assets(&mock, "ws").await.unwrap();

        let outcome = upsert_collection(&mock, "ws", &assets, &collection("Orders v1", Some("orders")))
            .await
            .unwrap();

        assert_eq!(outcome.action, SyncAction::Created);
        assert!(!outcome.uid.is_empty());
        let calls = mock.captured_requests().await;
        assert_eq!(calls[0].method, "create_collection");
        assert_eq!(calls[0].target, "ws");
        assert_eq!(
            calls[0].payload.as_ref().unwrap()["collection"]["info"]["x-api-id"],
            "orders"
        );
    }

    #[tokio::test]
    async fn test_upsert_environment_strips_id() {
        let mock = MockPostmanClient::new()
            .with_environment("env-1", "My API v1 - Dev", Some("my-api"))
            .await;
        let assets = get_workspace_assets(&mock, "ws").await.unwrap();

        let outcome = upsert_environment(&mock, "ws", &assets, &environment("My API v2 - Dev"))
            .await
            .unwrap();

        assert_eq!(outcome.action, SyncAction::Updated);
        assert_eq!(outcome.uid, "env-1");
        let calls = mock.captured_requests().await;
        assert!(calls[0].payload.as_ref().unwrap()["environment"].get("id").is_none());
    }

    #[tokio::test]
    async fn test_ambiguous_match_writes_nothing() {
        let mock = MockPostmanClient::new()
            .with_collection("uid-1", "Orders v1", None)
            .await
            .with_collection("uid-2", "Orders v2", None)
            .await;
        let assets = get_workspace_assets(&mock, "ws").await.unwrap();

        let err = upsert_collection(&mock, "ws", &assets, &collection("Orders v3", None))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::AmbiguousMatch { .. })));
        assert!(mock.captured_requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_deploy_continues_past_failures() {
        let mock = MockPostmanClient::new()
            .with_collection("uid-1", "My API v1", None)
            .await
            .with_environment("env-dev", "My API v1 - Dev", None)
            .await
            .failing_on("env-dev")
            .await;

        let envs = vec![environment("My API v2 - Dev"), environment("My API v2 - Prod")];
        let report = deploy(&mock, "ws", Some(&collection("My API v2", None)), &envs)
            .await
            .unwrap();

        assert_eq!(report.items.len(), 3);
        assert_eq!(report.succeeded(), 2);
        assert!(report.has_failures());
        let (failed, _) = report.failures().next().unwrap();
        assert_eq!(failed.name, "My API v2 - Dev");

        let methods: Vec<String> = mock
            .captured_requests()
            .await
            .into_iter()
            .map(|c| c.method)
            .collect();
        assert_eq!(
            methods,
            vec!["update_collection", "update_environment", "create_environment"]
        );
    }
}
