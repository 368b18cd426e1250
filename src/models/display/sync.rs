//! Deploy and delete result display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{EMPTY_CELL, first_line, truncate_string};
use crate::output::Row;
use crate::sync::{DeleteItem, DeleteStatus, DeployItem};

const MAX_ERROR_WIDTH: usize = 80;

/// One deployed collection or environment
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct DeployDisplay {
    #[tabled(rename = "KIND")]
    pub kind: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    /// created, updated or failed
    #[tabled(rename = "RESULT")]
    pub result: String,

    #[tabled(rename = "UID")]
    pub uid: String,

    /// First line of the error, empty on success
    #[tabled(rename = "ERROR")]
    pub error: String,
}

fn short_error(error: &str) -> String {
    truncate_string(first_line(error), MAX_ERROR_WIDTH)
}

impl Row for DeployDisplay {
    const KIND: &'static str = "deploy";
    const NOUN: &'static str = "item";
    const EMPTY: &'static str = "Nothing to deploy.";
}

impl From<&DeployItem> for DeployDisplay {
    fn from(item: &DeployItem) -> Self {
        match &item.result {
            Ok(outcome) => Self {
                kind: item.kind.to_string(),
                name: item.name.clone(),
                result: outcome.action.to_string(),
                uid: if outcome.uid.is_empty() {
                    EMPTY_CELL.to_string()
                } else {
                    outcome.uid.clone()
                },
                error: String::new(),
            },
            Err(e) => Self {
                kind: item.kind.to_string(),
                name: item.name.clone(),
                result: "failed".to_string(),
                uid: EMPTY_CELL.to_string(),
                error: short_error(&e.to_string()),
            },
        }
    }
}

/// One asset matched by `delete`
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct DeleteDisplay {
    #[tabled(rename = "KIND")]
    pub kind: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "UID")]
    pub uid: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "ERROR")]
    pub error: String,
}

impl Row for DeleteDisplay {
    const KIND: &'static str = "delete";
    const NOUN: &'static str = "asset";
    const EMPTY: &'static str = "Nothing to delete.";
}

impl From<&DeleteItem> for DeleteDisplay {
    fn from(item: &DeleteItem) -> Self {
        let (status, error) = match &item.status {
            DeleteStatus::WouldDelete => ("would delete", String::new()),
            DeleteStatus::Deleted => ("deleted", String::new()),
            DeleteStatus::Failed(e) => ("failed", short_error(e)),
        };

        Self {
            kind: item.asset.kind.to_string(),
            name: item.asset.name.clone(),
            uid: item.asset.uid.clone(),
            status: status.to_string(),
            error,
        }
    }
}
