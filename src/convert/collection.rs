//! Build a Postman collection from an OpenAPI document

use indexmap::IndexMap;
use log::{debug, warn};
use serde_json::Value;

use crate::openapi::model::{MediaType, Response};
use crate::openapi::{
    OpenApiDocument, Operation, Parameter, ParameterLocation, RequestBody, SecurityScheme,
};
use crate::postman::models::{
    Body, BodyMode, COLLECTION_SCHEMA, Collection, CollectionInfo, Event, FormParam, Header, Item,
    PathVariable, QueryParam, Request, SavedResponse, Url, Variable,
};
use crate::postman::naming::{
    api_id_from_title, convert_path_to_postman, extract_path_variables, normalize_version,
    sanitize_filename, variable_name_for,
};

/// Folder that always comes first and holds the token request
pub const AUTH_FOLDER: &str = "Authentication";

/// Folder for operations without tags
pub const DEFAULT_FOLDER: &str = "Default";

/// Token endpoint used when no oauth2 client-credentials flow is declared
pub const AZURE_AD_TOKEN_URL: &str =
    "https://login.microsoftonline.com/{{tenantId}}/oauth2/v2.0/token";

const BASE_URL_VAR: &str = "{{baseUrl}}";

/// Success codes searched, in order, for a response example
const EXAMPLE_STATUS_CODES: [&str; 4] = ["200", "201", "202", "204"];

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART_FORM: &str = "multipart/form-data";

/// Generate the whole collection document.
pub fn generate_collection(doc: &OpenApiDocument) -> Collection {
    let mut folders: IndexMap<String, Vec<Item>> = IndexMap::new();

    for (path, path_item) in &doc.paths {
        for (method, operation) in path_item.operations() {
            let folder = operation
                .tags
                .first()
                .map(String::as_str)
                .unwrap_or(DEFAULT_FOLDER);
            let item = build_request_item(doc, path, method, operation, &path_item.parameters);
            folders.entry(folder.to_string()).or_default().push(item);
        }
    }

    debug!(
        "Generated {} folders for {} paths",
        folders.len(),
        doc.paths.len()
    );

    let mut items = vec![auth_folder(doc)];
    items.extend(
        folders
            .into_iter()
            .map(|(name, requests)| Item::folder(name, requests)),
    );

    Collection {
        info: CollectionInfo {
            name: collection_name(doc),
            description: doc.info.description.clone().unwrap_or_default(),
            schema: COLLECTION_SCHEMA.to_string(),
            api_id: Some(api_id(doc)),
        },
        item: items,
        variable: vec![
            Variable::string("baseUrl", base_url(doc)),
            Variable::string("tenantId", ""),
            Variable::string("clientId", ""),
            Variable::string("clientSecret", ""),
            Variable::string("scope", ""),
        ],
    }
}

/// `<title> <normalized version>`
pub fn collection_name(doc: &OpenApiDocument) -> String {
    format!("{} {}", doc.title(), normalize_version(doc.version()))
}

/// `info.x-api-id` of the document, or the kebab-cased title.
pub fn api_id(doc: &OpenApiDocument) -> String {
    doc.info
        .api_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| api_id_from_title(doc.title()))
}

/// File name for the collection of one generation run.
pub fn collection_file_name(doc: &OpenApiDocument, timestamp: &str) -> String {
    format!(
        "{}_{}_{}_collection.json",
        sanitize_filename(doc.title()),
        normalize_version(doc.version()),
        timestamp
    )
}

/// First server URL, or the `{{baseUrl}}` placeholder.
fn base_url(doc: &OpenApiDocument) -> String {
    doc.servers
        .first()
        .map(|s| s.url.clone())
        .unwrap_or_else(|| BASE_URL_VAR.to_string())
}

/// Inline every `$ref` parameter, dropping the ones that cannot be used.
pub fn resolve_parameters(doc: &OpenApiDocument, params: &[Parameter], context: &str) -> Vec<Parameter> {
    params
        .iter()
        .filter_map(|param| {
            let Some(resolved) = doc.resolve_parameter(param) else {
                warn!(
                    "{}: cannot resolve parameter {}, skipping",
                    context,
                    param.reference.as_deref().unwrap_or_default()
                );
                return None;
            };
            if resolved.name.is_empty() {
                warn!("{}: parameter without a name, skipping", context);
                return None;
            }
            Some(resolved.clone())
        })
        .collect()
}

/// Merge path-level and operation-level parameters.
///
/// Operation parameters replace path parameters with the same name in place;
/// new ones are appended.
pub fn merge_parameters(path_params: &[Parameter], operation_params: &[Parameter]) -> Vec<Parameter> {
    let mut merged: IndexMap<&str, &Parameter> =
        path_params.iter().map(|p| (p.name.as_str(), p)).collect();
    for param in operation_params {
        merged.insert(param.name.as_str(), param);
    }
    merged.into_values().cloned().collect()
}

fn build_request_item(
    doc: &OpenApiDocument,
    path: &str,
    method: &str,
    operation: &Operation,
    path_params: &[Parameter],
) -> Item {
    let name = operation
        .summary
        .as_deref()
        .or(operation.operation_id.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} {}", method.to_uppercase(), path));

    let postman_path = convert_path_to_postman(path);
    let mut url = Url {
        raw: format!("{}{}", BASE_URL_VAR, postman_path),
        host: vec![BASE_URL_VAR.to_string()],
        path: postman_path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        ..Default::default()
    };

    let context = format!("{} {}", method.to_uppercase(), path);
    let path_params = resolve_parameters(doc, path_params, &context);
    let operation_params = resolve_parameters(doc, &operation.parameters, &context);

    let mut headers = Vec::new();
    for param in merge_parameters(&path_params, &operation_params) {
        let value = param.example_value().map(render_value).unwrap_or_default();
        let description = param.description.clone().unwrap_or_default();
        match param.location {
            ParameterLocation::Query => url.query.push(QueryParam {
                key: param.name,
                value,
                description,
                disabled: !param.required,
            }),
            ParameterLocation::Header => headers.push(Header {
                key: param.name,
                value,
                description,
                disabled: !param.required,
            }),
            ParameterLocation::Path => url.variable.push(PathVariable {
                key: param.name,
                value,
                description,
            }),
            ParameterLocation::Cookie => {}
        }
    }

    // Template segments with no declared parameter still need a variable
    for key in extract_path_variables(path) {
        if !url.variable.iter().any(|v| v.key == key) {
            url.variable.push(PathVariable {
                key,
                value: String::new(),
                description: String::new(),
            });
        }
    }

    for header in security_headers(doc, operation) {
        if !headers.iter().any(|h| h.key.eq_ignore_ascii_case(&header.key)) {
            headers.push(header);
        }
    }

    let body = operation.request_body.as_ref().and_then(build_body);
    if let Some(body) = &body {
        let content_type = match body.mode {
            BodyMode::Raw => "application/json",
            BodyMode::Urlencoded => FORM_URLENCODED,
            BodyMode::Formdata => MULTIPART_FORM,
        };
        if !headers.iter().any(|h| h.key.eq_ignore_ascii_case("Content-Type")) {
            headers.push(Header::new("Content-Type", content_type));
        }
    }

    let request = Request {
        method: method.to_uppercase(),
        header: headers,
        url,
        body,
        description: operation.description.clone().unwrap_or_default(),
    };

    let mut item = Item::request(name, request);
    if let Some(example) = saved_response(&operation.responses) {
        item.response = Some(vec![example]);
    }
    item
}

/// Headers implied by the security requirements of an operation.
///
/// Operation-level `security` wins over the document level, and an explicit
/// empty list disables security for the operation.
fn security_headers(doc: &OpenApiDocument, operation: &Operation) -> Vec<Header> {
    let requirements = operation.security.as_ref().unwrap_or(&doc.security);

    let mut headers: Vec<Header> = Vec::new();
    for scheme_name in requirements.iter().flat_map(|r| r.keys()) {
        let Some(scheme) = doc.security_scheme(scheme_name) else {
            debug!("Security scheme {} is not declared, skipping", scheme_name);
            continue;
        };
        if let Some(header) = header_for_scheme(scheme) {
            if !headers.iter().any(|h| h.key.eq_ignore_ascii_case(&header.key)) {
                headers.push(header);
            }
        }
    }
    headers
}

fn header_for_scheme(scheme: &SecurityScheme) -> Option<Header> {
    match scheme.scheme_type.as_str() {
        "apiKey" if scheme.location.as_deref() == Some("header") => {
            let name = scheme.name.as_deref()?;
            Some(Header::new(name, format!("{{{{{}}}}}", variable_name_for(name))))
        }
        "oauth2" | "openIdConnect" => Some(bearer_header()),
        "http" if scheme
            .scheme
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("bearer")) =>
        {
            Some(bearer_header())
        }
        _ => None,
    }
}

fn bearer_header() -> Header {
    Header::new("Authorization", "Bearer {{accessToken}}")
}

/// Lower-cased media type without parameters: `Application/JSON; charset=utf-8` → `application/json`
fn media_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn is_json_media(content_type: &str) -> bool {
    let essence = media_essence(content_type);
    essence == "application/json" || essence.ends_with("+json")
}

fn find_media<'a>(
    content: &'a IndexMap<String, MediaType>,
    matches: impl Fn(&str) -> bool,
) -> Option<&'a MediaType> {
    content
        .iter()
        .find(|(content_type, _)| matches(content_type))
        .map(|(_, media)| media)
}

fn build_body(request_body: &RequestBody) -> Option<Body> {
    let content = &request_body.content;

    if let Some(media) = find_media(content, is_json_media) {
        let example = media
            .first_example()
            .cloned()
            .unwrap_or_else(|| Value::Object(Default::default()));
        return Some(Body::json(pretty_json(&example)));
    }
    if let Some(media) = find_media(content, |ct| media_essence(ct) == FORM_URLENCODED) {
        return Some(Body::urlencoded(form_params(media)));
    }
    if let Some(media) = find_media(content, |ct| media_essence(ct) == MULTIPART_FORM) {
        return Some(Body::formdata(form_params(media)));
    }
    None
}

/// One text field per schema property
fn form_params(media: &MediaType) -> Vec<FormParam> {
    let Some(properties) = media
        .schema
        .as_ref()
        .and_then(|s| s.get("properties"))
        .and_then(Value::as_object)
    else {
        return Vec::new();
    };

    properties
        .iter()
        .map(|(key, schema)| {
            let value = schema
                .get("example")
                .or_else(|| schema.get("default"))
                .map(render_value)
                .unwrap_or_default();
            FormParam::text(key.clone(), value)
        })
        .collect()
}

/// First JSON example among the success responses.
pub fn response_example(responses: &IndexMap<String, Response>) -> Option<(u16, &Value)> {
    EXAMPLE_STATUS_CODES.iter().find_map(|code| {
        let response = responses.get(*code)?;
        let example = find_media(&response.content, is_json_media)?.first_example()?;
        Some((code.parse().ok()?, example))
    })
}

fn saved_response(responses: &IndexMap<String, Response>) -> Option<SavedResponse> {
    let (code, example) = response_example(responses)?;
    let status = reqwest::StatusCode::from_u16(code)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("OK")
        .to_string();

    Some(SavedResponse {
        name: format!("{} {}", code, status),
        code,
        status,
        preview_language: "json".to_string(),
        header: vec![Header::new("Content-Type", "application/json")],
        body: pretty_json(example),
    })
}

fn auth_folder(doc: &OpenApiDocument) -> Item {
    let request = Request {
        method: "POST".to_string(),
        header: vec![Header::new("Content-Type", FORM_URLENCODED)],
        url: split_raw_url(&token_url(doc)),
        body: Some(Body::urlencoded(vec![
            FormParam::text("grant_type", "client_credentials"),
            FormParam::text("client_id", "{{clientId}}"),
            FormParam::text("client_secret", "{{clientSecret}}"),
            FormParam::text("scope", "{{scope}}"),
        ])),
        description: "Request an access token with the client credentials flow".to_string(),
    };

    let mut token = Item::request("Get Access Token", request);
    token.event.push(Event::test_script(&[
        "if (pm.response.code === 200) {",
        "    const body = pm.response.json();",
        "    pm.environment.set(\"accessToken\", body.access_token);",
        "}",
    ]));

    let mut folder = Item::folder(AUTH_FOLDER, vec![token]);
    folder.description = Some("Authentication endpoints".to_string());
    folder
}

/// Token URL of the first oauth2 client-credentials flow, else Azure AD.
fn token_url(doc: &OpenApiDocument) -> String {
    doc.components
        .security_schemes
        .values()
        .filter(|s| s.scheme_type == "oauth2")
        .find_map(|s| {
            s.flows
                .as_ref()?
                .client_credentials
                .as_ref()?
                .token_url
                .clone()
        })
        .unwrap_or_else(|| AZURE_AD_TOKEN_URL.to_string())
}

/// Split a possibly templated URL into Postman parts.
///
/// Done by hand because `{{var}}` segments are not valid URL syntax.
fn split_raw_url(raw: &str) -> Url {
    let (protocol, rest) = match raw.split_once("://") {
        Some((protocol, rest)) => (Some(protocol.to_string()), rest),
        None => (None, raw),
    };
    let mut segments = rest.split('/');
    let host = segments
        .next()
        .map(|h| h.split('.').map(str::to_string).collect())
        .unwrap_or_default();

    Url {
        raw: raw.to_string(),
        protocol,
        host,
        path: segments
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        ..Default::default()
    }
}

/// Strings as-is, anything else as compact JSON
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::parse_str;
    use serde_json::json;

    const SPEC: &str = r#"{
        "openapi": "3.0.3",
        "info": {"title": "Pet Store", "version": "2.1.0", "description": "Pets"},
        "servers": [{"url": "https://pets.example.com/v2"}],
        "security": [{"subscription": []}],
        "components": {
            "securitySchemes": {
                "subscription": {"type": "apiKey", "in": "header", "name": "Ocp-Apim-Subscription-Key"},
                "aad": {
                    "type": "oauth2",
                    "flows": {"clientCredentials": {"tokenUrl": "https://auth.example.com/token", "scopes": {}}}
                }
            }
        },
        "paths": {
            "/pets/{petId}": {
                "parameters": [
                    {"name": "petId", "in": "path", "required": true, "schema": {"type": "string", "example": "p-1"}},
                    {"name": "verbose", "in": "query", "schema": {"type": "boolean"}}
                ],
                "get": {
                    "summary": "Get pet",
                    "tags": ["Pets"],
                    "parameters": [
                        {"name": "verbose", "in": "query", "required": true, "schema": {"type": "boolean", "default": false}},
                        {"name": "X-Trace", "in": "header", "schema": {"type": "string"}}
                    ],
                    "security": [{"aad": []}],
                    "responses": {
                        "200": {"content": {"application/json": {"example": {"id": "p-1"}}}}
                    }
                },
                "delete": {"operationId": "deletePet", "tags": ["Pets"], "responses": {"204": {}}}
            },
            "/health": {
                "get": {"responses": {"200": {}}}
            },
            "/pets": {
                "post": {
                    "summary": "Create pet",
                    "tags": ["Pets", "Admin"],
                    "requestBody": {
                        "content": {"application/json": {"examples": {"min": {"value": {"name": "Rex"}}}}}
                    },
                    "responses": {"201": {}}
                }
            },
            "/login": {
                "post": {
                    "tags": ["Auth"],
                    "security": [],
                    "requestBody": {
                        "content": {
                            "application/x-www-form-urlencoded": {
                                "schema": {"properties": {"user": {"type": "string"}, "pass": {"type": "string"}}}
                            }
                        }
                    },
                    "responses": {"200": {}}
                }
            }
        }
    }"#;

    fn collection() -> Collection {
        generate_collection(&parse_str(SPEC, "test").unwrap())
    }

    fn find<'a>(items: &'a [Item], name: &str) -> &'a Item {
        items
            .iter()
            .find(|i| i.name == name)
            .unwrap_or_else(|| panic!("no item named {name}"))
    }

    #[test]
    fn test_info_and_variables() {
        let c = collection();
        assert_eq!(c.info.name, "Pet Store v2.1.0");
        assert_eq!(c.info.api_id.as_deref(), Some("pet-store"));
        assert_eq!(c.info.description, "Pets");
        assert_eq!(c.variable[0].key, "baseUrl");
        assert_eq!(c.variable[0].value, "https://pets.example.com/v2");
        let keys: Vec<&str> = c.variable.iter().map(|v| v.key.as_str()).collect();
        assert_eq!(keys, vec!["baseUrl", "tenantId", "clientId", "clientSecret", "scope"]);
    }

    #[test]
    fn test_folders_grouped_by_first_tag() {
        let c = collection();
        let names: Vec<&str> = c.item.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Authentication", "Pets", "Default", "Auth"]);

        let pets = find(&c.item, "Pets");
        let requests: Vec<&str> = pets.children().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(requests, vec!["Get pet", "deletePet", "Create pet"]);

        let default = find(&c.item, "Default");
        assert_eq!(default.children()[0].name, "GET /health");
    }

    #[test]
    fn test_request_url_and_parameters() {
        let c = collection();
        let get = &find(&c.item, "Pets").children()[0];
        let request = get.request.as_ref().unwrap();

        assert_eq!(request.method, "GET");
        assert_eq!(request.url.raw, "{{baseUrl}}/pets/:petId");
        assert_eq!(request.url.host, vec!["{{baseUrl}}"]);
        assert_eq!(request.url.path, vec!["pets", ":petId"]);
        assert_eq!(request.url.variable[0].key, "petId");
        assert_eq!(request.url.variable[0].value, "p-1");

        // operation-level `verbose` overrides the path-level one
        assert_eq!(request.url.query.len(), 1);
        assert!(!request.url.query[0].disabled);
        assert_eq!(request.url.query[0].value, "false");

        let trace = request.header.iter().find(|h| h.key == "X-Trace").unwrap();
        assert!(trace.disabled);
    }

    #[test]
    fn test_security_headers() {
        let c = collection();
        let pets = find(&c.item, "Pets");

        // operation security overrides the document-level api key
        let get = pets.children()[0].request.as_ref().unwrap();
        assert!(get
            .header
            .iter()
            .any(|h| h.key == "Authorization" && h.value == "Bearer {{accessToken}}"));
        assert!(!get.header.iter().any(|h| h.key == "Ocp-Apim-Subscription-Key"));

        let delete = pets.children()[1].request.as_ref().unwrap();
        let key = delete
            .header
            .iter()
            .find(|h| h.key == "Ocp-Apim-Subscription-Key")
            .unwrap();
        assert_eq!(key.value, "{{ocpApimSubscriptionKey}}");

        // explicit empty security
        let login = find(&c.item, "Auth").children()[0].request.as_ref().unwrap();
        assert!(!login.header.iter().any(|h| h.key == "Ocp-Apim-Subscription-Key"));
    }

    #[test]
    fn test_json_body_uses_first_named_example() {
        let c = collection();
        let create = &find(&c.item, "Pets").children()[2];
        let body = create.request.as_ref().unwrap().body.as_ref().unwrap();
        assert_eq!(body.mode, BodyMode::Raw);
        let raw: Value = serde_json::from_str(body.raw.as_deref().unwrap()).unwrap();
        assert_eq!(raw, json!({"name": "Rex"}));
    }

    #[test]
    fn test_urlencoded_body_lists_schema_properties() {
        let c = collection();
        let login = &find(&c.item, "Auth").children()[0];
        let body = login.request.as_ref().unwrap().body.as_ref().unwrap();
        assert_eq!(body.mode, BodyMode::Urlencoded);
        let keys: Vec<&str> = body
            .urlencoded
            .as_ref()
            .unwrap()
            .iter()
            .map(|p| p.key.as_str())
            .collect();
        assert_eq!(keys, vec!["user", "pass"]);
    }

    #[test]
    fn test_explicit_example_wins_over_named_examples() {
        let body: RequestBody = serde_json::from_value(json!({
            "content": {"application/json": {
                "example": {"name": "Test"},
                "examples": {"other": {"value": {"name": "Other"}}}
            }}
        }))
        .unwrap();
        let body = build_body(&body).unwrap();
        let raw: Value = serde_json::from_str(body.raw.as_deref().unwrap()).unwrap();
        assert_eq!(raw, json!({"name": "Test"}));
    }

    #[test]
    fn test_form_content_types_ignore_case() {
        let body: RequestBody = serde_json::from_value(json!({
            "content": {"Application/X-WWW-Form-Urlencoded; charset=UTF-8": {
                "schema": {"properties": {"grant_type": {"type": "string", "default": "password"}}}
            }}
        }))
        .unwrap();
        let body = build_body(&body).unwrap();
        assert_eq!(body.mode, BodyMode::Urlencoded);
        let params = body.urlencoded.as_ref().unwrap();
        assert_eq!(params[0].key, "grant_type");
        assert_eq!(params[0].value, "password");

        let body: RequestBody = serde_json::from_value(json!({
            "content": {"Multipart/Form-Data": {"schema": {"properties": {"file": {}}}}}
        }))
        .unwrap();
        assert_eq!(build_body(&body).unwrap().mode, BodyMode::Formdata);
    }

    #[test]
    fn test_referenced_parameters_are_resolved() {
        let doc = parse_str(
            r##"{
                "openapi": "3.0.0",
                "components": {"parameters": {
                    "Limit": {"name": "limit", "in": "query", "schema": {"type": "integer", "default": 20}},
                    "Trace": {"name": "X-Trace", "in": "header", "required": true}
                }},
                "paths": {"/items": {
                    "parameters": [{"$ref": "#/components/parameters/Trace"}],
                    "get": {"parameters": [
                        {"$ref": "#/components/parameters/Limit"},
                        {"$ref": "#/components/parameters/Missing"}
                    ]}
                }}
            }"##,
            "test",
        )
        .unwrap();
        let c = generate_collection(&doc);
        let request = find(&c.item, "Default").children()[0].request.as_ref().unwrap();

        assert_eq!(request.url.query.len(), 1);
        assert_eq!(request.url.query[0].key, "limit");
        assert_eq!(request.url.query[0].value, "20");
        let trace = request.header.iter().find(|h| h.key == "X-Trace").unwrap();
        assert!(!trace.disabled);
    }

    #[test]
    fn test_undeclared_path_segments_get_variables() {
        let doc = parse_str(
            r#"{
                "openapi": "3.0.0",
                "paths": {"/tenants/{tenantId}/items/{id}": {"get": {"parameters": [
                    {"name": "id", "in": "path", "required": true, "example": "i-1"}
                ]}}}
            }"#,
            "test",
        )
        .unwrap();
        let c = generate_collection(&doc);
        let request = find(&c.item, "Default").children()[0].request.as_ref().unwrap();

        let vars: Vec<(&str, &str)> = request
            .url
            .variable
            .iter()
            .map(|v| (v.key.as_str(), v.value.as_str()))
            .collect();
        assert_eq!(vars, vec![("id", "i-1"), ("tenantId", "")]);
    }

    #[test]
    fn test_json_body_without_example_is_empty_object() {
        let body: RequestBody = serde_json::from_value(json!({
            "content": {"application/vnd.api+json": {"schema": {"type": "object"}}}
        }))
        .unwrap();
        let body = build_body(&body).unwrap();
        assert_eq!(body.raw.as_deref(), Some("{}"));
    }

    #[test]
    fn test_unknown_body_type_is_skipped() {
        let body: RequestBody =
            serde_json::from_value(json!({"content": {"application/octet-stream": {}}})).unwrap();
        assert!(build_body(&body).is_none());
    }

    #[test]
    fn test_saved_response_example() {
        let c = collection();
        let get = &find(&c.item, "Pets").children()[0];
        let saved = &get.response.as_ref().unwrap()[0];
        assert_eq!(saved.code, 200);
        assert_eq!(saved.status, "OK");
        let body: Value = serde_json::from_str(&saved.body).unwrap();
        assert_eq!(body, json!({"id": "p-1"}));

        let delete = &find(&c.item, "Pets").children()[1];
        assert!(delete.response.as_ref().unwrap().is_empty());
    }

    #[test]
    fn test_auth_folder_uses_declared_token_url() {
        let c = collection();
        let auth = &c.item[0];
        assert_eq!(auth.name, "Authentication");
        let token = &auth.children()[0];
        let request = token.request.as_ref().unwrap();
        assert_eq!(request.method, "POST");
        assert_eq!(request.url.raw, "https://auth.example.com/token");
        assert_eq!(request.url.host, vec!["auth", "example", "com"]);
        assert_eq!(token.event[0].listen, "test");
        assert!(token.event[0].script.exec.iter().any(|l| l.contains("accessToken")));
    }

    #[test]
    fn test_auth_folder_defaults_to_azure_ad() {
        let doc = parse_str(r#"{"openapi": "3.0.0", "paths": {}}"#, "test").unwrap();
        let c = generate_collection(&doc);
        let request = c.item[0].children()[0].request.as_ref().unwrap();
        assert_eq!(request.url.raw, AZURE_AD_TOKEN_URL);
        assert_eq!(request.url.protocol.as_deref(), Some("https"));
        assert_eq!(request.url.path, vec!["{{tenantId}}", "oauth2", "v2.0", "token"]);
        assert_eq!(c.variable[0].value, "{{baseUrl}}");
        assert_eq!(c.info.name, "API v1.0.0");
    }

    #[test]
    fn test_merge_parameters_override_keeps_position() {
        let p = |name: &str, required: bool| Parameter {
            name: name.to_string(),
            required,
            ..Default::default()
        };
        let merged = merge_parameters(&[p("a", false), p("b", false)], &[p("a", true), p("c", false)]);
        let names: Vec<&str> = merged.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert!(merged[0].required);
    }

    #[test]
    fn test_collection_file_name() {
        let doc = parse_str(SPEC, "test").unwrap();
        assert_eq!(
            collection_file_name(&doc, "20250101_120000"),
            "Pet_Store_v2.1.0_20250101_120000_collection.json"
        );
    }
}
