//! Workspace asset index and fuzzy resolution

use std::fmt;

use indexmap::IndexMap;
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

use crate::client::{PostmanApi, WorkspaceItem};
use crate::error::{ApiError, Result};
use crate::postman::naming::strip_version_from_name;

/// Kind of workspace asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Collection,
    Environment,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Collection => write!(f, "collection"),
            AssetKind::Environment => write!(f, "environment"),
        }
    }
}

/// One collection or environment found in the workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    pub kind: AssetKind,
    pub uid: String,
    pub name: String,
    pub api_id: Option<String>,
}

/// Lookup tables for one asset kind.
///
/// Names and ids map to every uid carrying them so duplicates can be reported
/// instead of silently picking one.
#[derive(Debug, Clone, Default)]
pub struct AssetIndex {
    pub assets: Vec<Asset>,
    pub by_name: IndexMap<String, Vec<String>>,
    pub by_api_id: IndexMap<String, Vec<String>>,
}

impl AssetIndex {
    pub fn insert(&mut self, asset: Asset) {
        push_unique(self.by_name.entry(asset.name.clone()).or_default(), &asset.uid);
        if let Some(api_id) = &asset.api_id {
            push_unique(self.by_api_id.entry(api_id.clone()).or_default(), &asset.uid);
        }
        self.assets.push(asset);
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }
}

impl AssetIndex {
    fn base_name_of(&self, uid: &str) -> Option<String> {
        self.assets
            .iter()
            .find(|a| a.uid == uid)
            .map(|a| strip_version_from_name(&a.name))
    }

    fn holds_environments(&self) -> bool {
        self.assets.iter().any(|a| a.kind == AssetKind::Environment)
    }
}

fn push_unique(uids: &mut Vec<String>, uid: &str) {
    if !uids.iter().any(|u| u == uid) {
        uids.push(uid.to_string());
    }
}

/// Collections and environments of a workspace, indexed by name and x-api-id
#[derive(Debug, Clone, Default)]
pub struct WorkspaceAssets {
    pub collections: AssetIndex,
    pub environments: AssetIndex,
}

impl WorkspaceAssets {
    /// All assets, collections first
    pub fn all(&self) -> impl Iterator<Item = &Asset> {
        self.collections
            .assets
            .iter()
            .chain(self.environments.assets.iter())
    }
}

/// Fetch the workspace listing and build the asset indices.
///
/// Each asset is fetched once more to read its `x-api-id`. Failures there are
/// logged and the asset is indexed by name only.
pub async fn get_workspace_assets(
    client: &dyn PostmanApi,
    workspace_id: &str,
) -> Result<WorkspaceAssets> {
    let workspace = client.get_workspace(workspace_id).await?;
    debug!(
        "Workspace {} lists {} collections and {} environments",
        workspace_id,
        workspace.collections.len(),
        workspace.environments.len()
    );

    let mut assets = WorkspaceAssets::default();

    for item in &workspace.collections {
        let Some((uid, name)) = listing_identity(item) else {
            continue;
        };
        let api_id = match client.get_collection(uid).await {
            Ok(doc) => read_api_id(&doc, "/info/x-api-id"),
            Err(e) => {
                warn!("Could not read collection {} ({}): {}", name, uid, e);
                None
            }
        };
        assets.collections.insert(Asset {
            kind: AssetKind::Collection,
            uid: uid.to_string(),
            name: name.to_string(),
            api_id,
        });
    }

    for item in &workspace.environments {
        let Some((uid, name)) = listing_identity(item) else {
            continue;
        };
        let api_id = match client.get_environment(uid).await {
            Ok(doc) => read_api_id(&doc, "/x-api-id"),
            Err(e) => {
                warn!("Could not read environment {} ({}): {}", name, uid, e);
                None
            }
        };
        assets.environments.insert(Asset {
            kind: AssetKind::Environment,
            uid: uid.to_string(),
            name: name.to_string(),
            api_id,
        });
    }

    Ok(assets)
}

fn listing_identity(item: &WorkspaceItem) -> Option<(&str, &str)> {
    let uid = item.uid().filter(|u| !u.is_empty());
    let name = item.name.as_deref().filter(|n| !n.is_empty());
    match (uid, name) {
        (Some(uid), Some(name)) => Some((uid, name)),
        _ => {
            debug!("Skipping listing entry without name or uid: {:?}", item);
            None
        }
    }
}

fn read_api_id(doc: &Value, pointer: &str) -> Option<String> {
    doc.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Find the uid an incoming asset should overwrite.
///
/// Tries, in order: exact x-api-id, exact name, then name with version
/// suffixes stripped on both sides. The first step with any match decides;
/// more than one distinct uid at that step is an `AmbiguousMatch`.
///
/// Every environment of an API shares its x-api-id, so environments matched
/// by id are narrowed to those with the same base name (which keeps the
/// ` - Label` suffix). Collections sharing an id are narrowed the same way.
pub fn resolve_existing(index: &AssetIndex, api_id: &str, name: &str) -> Result<Option<String>> {
    let base = strip_version_from_name(name);

    if let Some(uids) = index.by_api_id.get(api_id) {
        let same_base: Vec<String> = uids
            .iter()
            .filter(|uid| index.base_name_of(uid).as_deref() == Some(base.as_str()))
            .cloned()
            .collect();

        let narrow = index.holds_environments() || (uids.len() > 1 && !same_base.is_empty());
        let candidates = if narrow { same_base } else { uids.clone() };

        if !candidates.is_empty() {
            return single(candidates, name);
        }
        debug!("{} shares x-api-id {} with no asset of the same base name", name, api_id);
    }
    if let Some(uids) = index.by_name.get(name) {
        return single(uids.clone(), name);
    }

    let mut uids: Vec<String> = Vec::new();
    for asset in &index.assets {
        if strip_version_from_name(&asset.name) == base && !uids.contains(&asset.uid) {
            uids.push(asset.uid.clone());
        }
    }
    if uids.is_empty() {
        return Ok(None);
    }
    debug!("{} matched by base name '{}'", name, base);
    single(uids, name)
}

fn single(mut uids: Vec<String>, name: &str) -> Result<Option<String>> {
    if uids.len() == 1 {
        Ok(uids.pop())
    } else {
        Err(ApiError::AmbiguousMatch {
            name: name.to_string(),
            uids,
        }
        .into())
    }
}
