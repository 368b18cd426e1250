//! Workspace sync: deploy generated assets to a Postman workspace and remove them again
//!
//! Assets are matched across releases by x-api-id first, then by name, then by
//! name with version suffixes stripped.

pub mod assets;
pub mod delete;
pub mod deploy;
pub mod export;

pub use assets::{Asset, AssetKind, get_workspace_assets};
pub use delete::{
    DeleteItem, DeleteReport, DeleteStatus, delete_assets, delete_by_api_id, find_deletion_candidates,
};
pub use deploy::{DeployItem, deploy};
pub use export::{CollectionExport, EnvironmentExport};
