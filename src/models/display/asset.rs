//! Workspace asset display model

use serde::Serialize;
use tabled::Tabled;

use super::common::EMPTY_CELL;
use crate::output::Row;
use crate::sync::Asset;

/// Workspace asset display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AssetDisplay {
    #[tabled(rename = "KIND")]
    pub kind: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "UID")]
    pub uid: String,

    /// Owning API, `--` when the asset carries none
    #[tabled(rename = "X-API-ID")]
    #[serde(rename = "x_api_id")]
    pub api_id: String,
}

impl Row for AssetDisplay {
    const KIND: &'static str = "assets";
    const NOUN: &'static str = "asset";
    const EMPTY: &'static str = "No collections or environments in this workspace.";
}

impl From<&Asset> for AssetDisplay {
    fn from(asset: &Asset) -> Self {
        Self {
            kind: asset.kind.to_string(),
            name: asset.name.clone(),
            uid: asset.uid.clone(),
            api_id: asset.api_id.clone().unwrap_or_else(|| EMPTY_CELL.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::table::format_table;
    use crate::sync::AssetKind;

    #[test]
    fn test_asset_display_without_api_id() {
        let asset = Asset {
            kind: AssetKind::Environment,
            uid: "env-1".to_string(),
            name: "Orders API v1 - Dev".to_string(),
            api_id: None,
        };

        let row = AssetDisplay::from(&asset);
        assert_eq!(row.kind, "environment");

        let table = format_table(&[row.clone()], AssetDisplay::EMPTY, AssetDisplay::NOUN);
        assert!(table.contains("X-API-ID"));
        assert!(table.contains("--"));
        assert!(table.contains("1 asset"));

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["x_api_id"], "--");
    }
}
