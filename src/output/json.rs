//! JSON envelope shared by every `--format json` result

use chrono::Utc;
use serde::Serialize;

/// `{"data": ..., "meta": {...}}`
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    /// What `data` holds: `assets`, `deploy`, `delete` or `conversion`
    pub kind: String,

    /// Row count, only for list results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    /// RFC 3339, UTC
    pub timestamp: String,

    /// postgen version that produced the output
    pub version: String,
}

impl<T> JsonOutput<T> {
    pub fn new(kind: &str, data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                kind: kind.to_string(),
                count: None,
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.meta.count = Some(count);
        self
    }
}

/// Wrap a single result, pretty-printed
pub fn format_json<T: Serialize + ?Sized>(kind: &str, data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(kind, data))
}

/// Wrap a list of rows and record how many there are
pub fn format_json_list<T: Serialize>(kind: &str, rows: &[T]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(kind, rows).with_count(rows.len()))
}
