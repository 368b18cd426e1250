//! Build Postman environment documents for resolved environments

use crate::convert::collection::api_id;
use crate::convert::environments::ResolvedEnvironment;
use crate::openapi::{OpenApiDocument, Server};
use crate::postman::models::{Environment, EnvironmentValue, VariableType};
use crate::postman::naming::{capitalize, normalize_version, sanitize_filename};

/// Scope used when the environment does not override `scope`
pub const DEFAULT_SCOPE: &str = "api://.default";

const STAGING_MARKERS: [&str; 2] = ["stg", "staging"];
const SECRET_MARKERS: [&str; 4] = ["secret", "password", "token", "key"];

/// Variables every environment carries, in output order
const FIXED_VARIABLES: [(&str, VariableType); 7] = [
    ("baseUrl", VariableType::Default),
    ("environment", VariableType::Default),
    ("tenantId", VariableType::Secret),
    ("clientId", VariableType::Secret),
    ("clientSecret", VariableType::Secret),
    ("scope", VariableType::Default),
    ("accessToken", VariableType::Secret),
];

/// Pick the server URL for an environment.
///
/// Staging-like environments (`stg`, `stag...`) prefer a server whose URL or
/// description mentions staging; every other environment prefers one that does
/// not. Falls back to the first server, or to a placeholder host when the
/// document declares none.
pub fn select_base_url(servers: &[Server], env_name: &str) -> String {
    let env = env_name.to_lowercase();
    let wants_staging = env.contains("stg") || env.contains("stag");

    let is_staging = |server: &&Server| {
        let haystack = format!(
            "{} {}",
            server.url.to_lowercase(),
            server.description.as_deref().unwrap_or_default().to_lowercase()
        );
        STAGING_MARKERS.iter().any(|m| haystack.contains(m))
    };

    servers
        .iter()
        .find(|s| is_staging(s) == wants_staging)
        .or_else(|| servers.first())
        .map(|s| s.url.clone())
        .unwrap_or_else(|| format!("https://api-{}.example.com", env))
}

/// Whether a variable holds a credential
pub fn is_secret_key(key: &str) -> bool {
    let key = key.to_lowercase();
    SECRET_MARKERS.iter().any(|m| key.contains(m))
}

/// Generate the environment document for one resolved environment.
pub fn generate_environment(
    doc: &OpenApiDocument,
    env: &ResolvedEnvironment,
    timestamp: &str,
) -> Environment {
    let mut values: Vec<EnvironmentValue> = FIXED_VARIABLES
        .iter()
        .map(|(key, var_type)| {
            let value = match *key {
                "baseUrl" => env
                    .get("baseUrl")
                    .map(str::to_string)
                    .unwrap_or_else(|| select_base_url(&doc.servers, &env.name)),
                "environment" => env.get("environment").unwrap_or(env.name.as_str()).to_string(),
                "scope" => env.get("scope").unwrap_or(DEFAULT_SCOPE).to_string(),
                other => env.get(other).unwrap_or_default().to_string(),
            };
            EnvironmentValue::new(*key, value, *var_type)
        })
        .collect();

    for (key, value) in &env.variables {
        if FIXED_VARIABLES.iter().any(|(fixed, _)| *fixed == key.as_str()) {
            continue;
        }
        let var_type = if is_secret_key(key) {
            VariableType::Secret
        } else {
            VariableType::Default
        };
        values.push(EnvironmentValue::new(key.clone(), value.clone(), var_type));
    }

    Environment {
        id: format!("{}-{}", env.name, timestamp),
        name: environment_name(doc, &env.name),
        api_id: Some(api_id(doc)),
        values,
        scope: "environment".to_string(),
    }
}

/// `<title> <version> - <Env>`
pub fn environment_name(doc: &OpenApiDocument, env_name: &str) -> String {
    format!(
        "{} {} - {}",
        doc.title(),
        normalize_version(doc.version()),
        capitalize(env_name)
    )
}

/// File name of an environment document for one generation run.
pub fn environment_file_name(doc: &OpenApiDocument, env_name: &str, timestamp: &str) -> String {
    format!(
        "{}_{}_{}_{}_environment.json",
        sanitize_filename(doc.title()),
        normalize_version(doc.version()),
        timestamp,
        sanitize_filename(env_name)
    )
}
