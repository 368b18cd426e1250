//! Postman Collection v2.1 and environment document types
//!
//! These are the generated artifacts. Optional fields are skipped when empty so
//! the written JSON stays close to what Postman itself exports.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Postman Collection v2.1 schema URL
pub const COLLECTION_SCHEMA: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Root of a Postman Collection v2.1 document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub info: CollectionInfo,

    #[serde(default)]
    pub item: Vec<Item>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable: Vec<Variable>,
}

/// Collection metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub schema: String,

    /// Stable API identifier used to find this collection again in a workspace
    #[serde(rename = "x-api-id", default, skip_serializing_if = "Option::is_none")]
    pub api_id: Option<String>,
}

/// A folder (with `item`) or a request (with `request`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Vec<Item>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<Request>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Vec<SavedResponse>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event: Vec<Event>,
}

impl Item {
    /// Create a folder item
    pub fn folder(name: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            name: name.into(),
            description: None,
            item: Some(items),
            request: None,
            response: None,
            event: Vec::new(),
        }
    }

    /// Create a request item
    pub fn request(name: impl Into<String>, request: Request) -> Self {
        Self {
            name: name.into(),
            description: None,
            item: None,
            request: Some(request),
            response: Some(Vec::new()),
            event: Vec::new(),
        }
    }

    /// Sub-items of a folder, empty for requests
    pub fn children(&self) -> &[Item] {
        self.item.as_deref().unwrap_or_default()
    }
}

/// Request definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub method: String,

    #[serde(default)]
    pub header: Vec<Header>,

    pub url: Url,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,

    #[serde(default)]
    pub description: String,
}

/// Structured request URL
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Url {
    pub raw: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    #[serde(default)]
    pub host: Vec<String>,

    #[serde(default)]
    pub path: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<QueryParam>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable: Vec<PathVariable>,
}

/// Query parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub disabled: bool,
}

/// Path variable for `:name` URL segments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathVariable {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub description: String,
}

/// Request header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            description: String::new(),
            disabled: false,
        }
    }
}

/// Body encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyMode {
    Raw,
    Urlencoded,
    Formdata,
}

/// Request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub mode: BodyMode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urlencoded: Option<Vec<FormParam>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formdata: Option<Vec<FormParam>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<BodyOptions>,
}

impl Body {
    /// Raw JSON body
    pub fn json(raw: String) -> Self {
        Self {
            mode: BodyMode::Raw,
            raw: Some(raw),
            urlencoded: None,
            formdata: None,
            options: Some(BodyOptions {
                raw: RawOptions {
                    language: "json".to_string(),
                },
            }),
        }
    }

    /// URL-encoded form body
    pub fn urlencoded(params: Vec<FormParam>) -> Self {
        Self {
            mode: BodyMode::Urlencoded,
            raw: None,
            urlencoded: Some(params),
            formdata: None,
            options: None,
        }
    }

    /// Multipart form body
    pub fn formdata(params: Vec<FormParam>) -> Self {
        Self {
            mode: BodyMode::Formdata,
            raw: None,
            urlencoded: None,
            formdata: Some(params),
            options: None,
        }
    }
}

/// Form field (urlencoded or form-data)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormParam {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub param_type: String,
}

impl FormParam {
    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            param_type: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyOptions {
    pub raw: RawOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawOptions {
    pub language: String,
}

/// Saved example response attached to a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedResponse {
    pub name: String,
    pub code: u16,
    pub status: String,
    #[serde(rename = "_postman_previewlanguage")]
    pub preview_language: String,
    pub header: Vec<Header>,
    pub body: String,
}

/// Script event (pre-request or test)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub listen: String,
    pub script: Script,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    #[serde(rename = "type")]
    pub script_type: String,
    pub exec: Vec<String>,
}

impl Event {
    /// A `test` script, which runs after the response arrives
    pub fn test_script(lines: &[&str]) -> Self {
        Self {
            listen: "test".to_string(),
            script: Script {
                script_type: "text/javascript".to_string(),
                exec: lines.iter().map(|l| l.to_string()).collect(),
            },
        }
    }
}

/// Collection-level variable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub var_type: String,
}

impl Variable {
    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            var_type: "string".to_string(),
        }
    }
}

/// Postman environment document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    pub id: String,

    pub name: String,

    #[serde(rename = "x-api-id", default, skip_serializing_if = "Option::is_none")]
    pub api_id: Option<String>,

    pub values: Vec<EnvironmentValue>,

    #[serde(rename = "_postman_variable_scope")]
    pub scope: String,
}

/// Environment variable type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    Default,
    Secret,
}

/// Environment variable record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentValue {
    pub key: String,
    pub value: Value,
    #[serde(rename = "type")]
    pub var_type: VariableType,
    pub enabled: bool,
}

impl EnvironmentValue {
    pub fn new(key: impl Into<String>, value: impl Into<Value>, var_type: VariableType) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            var_type,
            enabled: true,
        }
    }
}
