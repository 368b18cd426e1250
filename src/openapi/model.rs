//! Typed OpenAPI 3.x document model
//!
//! Only the parts of the document the generator reads are modelled. Schemas and
//! examples stay as raw JSON values since they are copied, not interpreted.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

/// Default API title when `info.title` is missing
pub const DEFAULT_API_TITLE: &str = "API";

/// Default API version when `info.version` is missing
pub const DEFAULT_API_VERSION: &str = "1.0.0";

/// OpenAPI document root
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenApiDocument {
    /// OpenAPI version string (e.g. "3.0.3")
    #[serde(default, deserialize_with = "scalar_string")]
    pub openapi: Option<String>,

    /// Swagger 2.0 marker, only kept to report a helpful version error
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub swagger: Option<String>,

    #[serde(default)]
    pub info: Info,

    #[serde(default)]
    pub servers: Vec<Server>,

    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    #[serde(default)]
    pub components: Components,

    /// Document-level security requirements
    #[serde(default)]
    pub security: Vec<SecurityRequirement>,

    /// Raw `x-postman-environments` section, validated by the environment resolver
    #[serde(rename = "x-postman-environments", default, skip_serializing_if = "Option::is_none")]
    pub postman_environments: Option<Value>,
}

impl OpenApiDocument {
    /// API title, defaulting to "API"
    pub fn title(&self) -> &str {
        self.info
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_API_TITLE)
    }

    /// API version, defaulting to "1.0.0"
    pub fn version(&self) -> &str {
        self.info
            .version
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(DEFAULT_API_VERSION)
    }

    /// Look up a security scheme declared under `components.securitySchemes`
    pub fn security_scheme(&self, name: &str) -> Option<&SecurityScheme> {
        self.components.security_schemes.get(name)
    }

    /// Follow a parameter's `$ref` into `components.parameters`.
    ///
    /// Inline parameters come back as-is. `None` for references that point
    /// elsewhere, are missing, or loop.
    pub fn resolve_parameter<'a>(&'a self, param: &'a Parameter) -> Option<&'a Parameter> {
        let mut current = param;
        for _ in 0..MAX_REF_HOPS {
            let Some(reference) = current.reference.as_deref() else {
                return Some(current);
            };
            let name = reference.strip_prefix(PARAMETER_REF_PREFIX)?;
            current = self.components.parameters.get(name)?;
        }
        None
    }
}

const PARAMETER_REF_PREFIX: &str = "#/components/parameters/";
const MAX_REF_HOPS: usize = 8;

/// Accept any YAML/JSON scalar as a string; `version: 1.0` in YAML is a float.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a scalar version string, found {}",
            other
        ))),
    }
}

/// `info` object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "scalar_string")]
    pub version: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Stable identifier used to match deployed assets across versions
    #[serde(rename = "x-api-id", default, skip_serializing_if = "Option::is_none")]
    pub api_id: Option<String>,
}

/// `servers[]` entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Server {
    pub url: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Path item: path-level parameters plus one optional operation per method
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    pub parameters: Vec<Parameter>,

    #[serde(default)]
    pub get: Option<Operation>,
    #[serde(default)]
    pub put: Option<Operation>,
    #[serde(default)]
    pub post: Option<Operation>,
    #[serde(default)]
    pub delete: Option<Operation>,
    #[serde(default)]
    pub options: Option<Operation>,
    #[serde(default)]
    pub head: Option<Operation>,
    #[serde(default)]
    pub patch: Option<Operation>,
    #[serde(default)]
    pub trace: Option<Operation>,
}

impl PathItem {
    /// Defined operations in a fixed method order
    pub fn operations(&self) -> Vec<(&'static str, &Operation)> {
        [
            ("get", &self.get),
            ("put", &self.put),
            ("post", &self.post),
            ("delete", &self.delete),
            ("options", &self.options),
            ("head", &self.head),
            ("patch", &self.patch),
            ("trace", &self.trace),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
        .collect()
    }
}

/// Operation object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub parameters: Vec<Parameter>,

    #[serde(default)]
    pub request_body: Option<RequestBody>,

    #[serde(default)]
    pub responses: IndexMap<String, Response>,

    /// Operation-level security; `Some(vec![])` explicitly disables security
    #[serde(default)]
    pub security: Option<Vec<SecurityRequirement>>,
}

/// Where a parameter lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    #[default]
    Query,
    Header,
    Path,
    Cookie,
}

/// Parameter object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Parameter {
    /// `#/components/parameters/...` pointer; the other fields are empty when set
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "in", default)]
    pub location: ParameterLocation,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub schema: Option<Value>,

    #[serde(default)]
    pub example: Option<Value>,
}

impl Parameter {
    /// Best example value: `example`, then `schema.example`, then `schema.default`
    pub fn example_value(&self) -> Option<&Value> {
        self.example.as_ref().or_else(|| {
            self.schema
                .as_ref()
                .and_then(|s| s.get("example").or_else(|| s.get("default")))
        })
    }
}

/// Request body object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// Response object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// Media type object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Option<Value>,

    #[serde(default)]
    pub example: Option<Value>,

    #[serde(default)]
    pub examples: IndexMap<String, Example>,
}

impl MediaType {
    /// Explicit `example`, else the value of the first named example
    pub fn first_example(&self) -> Option<&Value> {
        self.example
            .as_ref()
            .or_else(|| self.examples.values().find_map(|e| e.value.as_ref()))
    }
}

/// Named example object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Example {
    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub value: Option<Value>,
}

/// `components` object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    #[serde(default)]
    pub parameters: IndexMap<String, Parameter>,

    #[serde(default)]
    pub security_schemes: IndexMap<String, SecurityScheme>,
}

/// Security requirement: scheme name → scopes
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Security scheme object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityScheme {
    #[serde(rename = "type", default)]
    pub scheme_type: String,

    /// Location of an apiKey scheme (header, query, cookie)
    #[serde(rename = "in", default)]
    pub location: Option<String>,

    /// Parameter name of an apiKey scheme
    #[serde(default)]
    pub name: Option<String>,

    /// HTTP auth scheme (bearer, basic)
    #[serde(default)]
    pub scheme: Option<String>,

    #[serde(default)]
    pub flows: Option<OAuthFlows>,
}

/// OAuth2 flows; only client credentials is used
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlows {
    #[serde(default)]
    pub client_credentials: Option<OAuthFlow>,
}

/// OAuth2 flow
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlow {
    #[serde(default)]
    pub token_url: Option<String>,

    #[serde(default)]
    pub scopes: IndexMap<String, String>,
}
