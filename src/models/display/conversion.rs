//! Generated file display model

use serde::Serialize;
use tabled::Tabled;

use crate::convert::ConversionResult;
use crate::output::Row;

/// One generated file
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ConversionDisplay {
    #[tabled(rename = "TYPE")]
    pub kind: String,

    #[tabled(rename = "FILE")]
    pub path: String,
}

impl Row for ConversionDisplay {
    const KIND: &'static str = "conversion";
    const NOUN: &'static str = "file";
}

impl ConversionDisplay {
    /// Collection row first, then one row per environment
    pub fn rows(result: &ConversionResult) -> Vec<Self> {
        let collection = Self {
            kind: "collection".to_string(),
            path: result.collection.display().to_string(),
        };
        let environments = result.environments.iter().map(|p| Self {
            kind: "environment".to_string(),
            path: p.display().to_string(),
        });

        std::iter::once(collection).chain(environments).collect()
    }
}
