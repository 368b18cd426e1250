//! Delete every workspace asset belonging to one API

use log::{debug, info};
use serde::Serialize;

use super::assets::{Asset, AssetKind, WorkspaceAssets, get_workspace_assets};
use crate::client::PostmanApi;
use crate::error::Result;
use crate::postman::naming::{collection_base_name, display_name_from_api_id, environment_base_name};

/// What happened to one matched asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteStatus {
    WouldDelete,
    Deleted,
    Failed(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteItem {
    #[serde(flatten)]
    pub asset: Asset,
    pub status: DeleteStatus,
}

/// Outcome of a delete run
#[derive(Debug, Clone, Serialize)]
pub struct DeleteReport {
    pub api_id: String,
    /// Display name the asset names were matched against
    pub display_name: String,
    pub dry_run: bool,
    pub items: Vec<DeleteItem>,
}

impl DeleteReport {
    pub fn count(&self, kind: AssetKind, status: &DeleteStatus) -> usize {
        self.items
            .iter()
            .filter(|i| i.asset.kind == kind && &i.status == status)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i.status, DeleteStatus::Failed(_)))
            .count()
    }
}

/// Assets that belong to `api_id`.
///
/// Collections match when their name minus a trailing version equals the
/// display name derived from the id; environments additionally drop a
/// trailing ` - Label`. Assets whose own x-api-id equals `api_id` match too.
pub fn find_deletion_candidates(assets: &WorkspaceAssets, api_id: &str) -> Vec<Asset> {
    let display_name = display_name_from_api_id(api_id);
    debug!("Matching workspace assets against '{}'", display_name);

    let owns = |asset: &Asset| asset.api_id.as_deref() == Some(api_id);

    let collections = assets
        .collections
        .assets
        .iter()
        .filter(|a| collection_base_name(&a.name) == display_name || owns(a));
    let environments = assets
        .environments
        .assets
        .iter()
        .filter(|a| environment_base_name(&a.name) == display_name || owns(a));

    collections.chain(environments).cloned().collect()
}

/// Delete (or, on a dry run, only list) the given assets.
///
/// A failed delete is recorded and the batch carries on.
pub async fn delete_assets(
    client: &dyn PostmanApi,
    api_id: &str,
    candidates: Vec<Asset>,
    dry_run: bool,
) -> DeleteReport {
    let mut items = Vec::with_capacity(candidates.len());

    for asset in candidates {
        let status = if dry_run {
            DeleteStatus::WouldDelete
        } else {
            let result = match asset.kind {
                AssetKind::Collection => client.delete_collection(&asset.uid).await,
                AssetKind::Environment => client.delete_environment(&asset.uid).await,
            };
            match result {
                Ok(()) => {
                    info!("Deleted {} {} ({})", asset.kind, asset.name, asset.uid);
                    DeleteStatus::Deleted
                }
                Err(e) => DeleteStatus::Failed(e.to_string()),
            }
        };
        items.push(DeleteItem { asset, status });
    }

    DeleteReport {
        api_id: api_id.to_string(),
        display_name: display_name_from_api_id(api_id),
        dry_run,
        items,
    }
}

/// Index the workspace, then delete every asset belonging to `api_id`.
pub async fn delete_by_api_id(
    client: &dyn PostmanApi,
    workspace_id: &str,
    api_id: &str,
    dry_run: bool,
) -> Result<DeleteReport> {
    let assets = get_workspace_assets(client, workspace_id).await?;
    let candidates = find_deletion_candidates(&assets, api_id);
    Ok(delete_assets(client, api_id, candidates, dry_run).await)
}
