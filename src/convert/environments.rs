//! Resolve target environments from `x-postman-environments`
//!
//! The extension maps environment names to string variables. The reserved
//! `_global` block supplies defaults that each environment may override.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::debug;
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::openapi::OpenApiDocument;
use crate::postman::naming::sanitize_filename;

/// Reserved block holding variables shared by every environment
pub const GLOBAL_ENVIRONMENT: &str = "_global";

/// Variables of one block, in declaration order
pub type Variables = IndexMap<String, String>;

/// An environment with its `_global` defaults already merged in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEnvironment {
    pub name: String,
    pub variables: Variables,
}

impl ResolvedEnvironment {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }
}

/// Decide which environments to generate.
///
/// Explicit names are taken as given, with no consistency check. Otherwise the
/// document must declare at least one environment besides `_global`, and all
/// declared environments must define the same variables.
pub fn resolve_environments(
    doc: &OpenApiDocument,
    explicit: &[String],
) -> Result<Vec<ResolvedEnvironment>> {
    let declared = match &doc.postman_environments {
        Some(value) => Some(parse_extension(value)?),
        None => None,
    };

    if !explicit.is_empty() {
        debug!("Using explicit environments: {}", explicit.join(", "));
        let blocks = declared.unwrap_or_default();
        let global = blocks.get(GLOBAL_ENVIRONMENT);
        let resolved: Vec<ResolvedEnvironment> = explicit
            .iter()
            .map(|name| merge(name, global, blocks.get(name)))
            .collect();
        ensure_distinct_names(&resolved)?;
        return Ok(resolved);
    }

    let blocks = declared.ok_or(ConfigError::MissingEnvironments)?;
    let global = blocks.get(GLOBAL_ENVIRONMENT);

    let resolved: Vec<ResolvedEnvironment> = blocks
        .iter()
        .filter(|(name, _)| name.as_str() != GLOBAL_ENVIRONMENT)
        .map(|(name, own)| merge(name, global, Some(own)))
        .collect();

    if resolved.is_empty() {
        return Err(ConfigError::NoEnvironments.into());
    }

    ensure_distinct_names(&resolved)?;
    validate_environment_consistency(&resolved)?;

    debug!(
        "Resolved {} environments from x-postman-environments: {}",
        resolved.len(),
        resolved.iter().map(|e| e.name.as_str()).collect::<Vec<_>>().join(", ")
    );
    Ok(resolved)
}

/// Check that every environment defines the same variable keys.
///
/// On mismatch the error lists, per environment, the keys it lacks relative
/// to the union of all environments.
pub fn validate_environment_consistency(envs: &[ResolvedEnvironment]) -> Result<()> {
    let mut union: Vec<&str> = Vec::new();
    let mut seen = HashSet::new();
    for env in envs {
        for key in env.variables.keys() {
            if seen.insert(key.as_str()) {
                union.push(key);
            }
        }
    }

    let missing: Vec<(String, Vec<String>)> = envs
        .iter()
        .filter_map(|env| {
            let lacking: Vec<String> = union
                .iter()
                .filter(|key| !env.variables.contains_key(**key))
                .map(|key| key.to_string())
                .collect();
            (!lacking.is_empty()).then(|| (env.name.clone(), lacking))
        })
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::InconsistentEnvironments(missing).into())
    }
}

/// Reject environments whose file and display names would collide.
///
/// Names are compared after file-name sanitizing and case folding, so `a/b`
/// and `ab`, or `dev` and `Dev`, count as the same environment.
fn ensure_distinct_names(envs: &[ResolvedEnvironment]) -> Result<()> {
    let mut seen: IndexMap<String, &str> = IndexMap::new();
    for env in envs {
        let key = sanitize_filename(&env.name).to_lowercase();
        if let Some(first) = seen.insert(key, &env.name) {
            return Err(ConfigError::DuplicateEnvironment {
                first: first.to_string(),
                second: env.name.clone(),
            }
            .into());
        }
    }
    Ok(())
}

fn merge(name: &str, global: Option<&Variables>, own: Option<&Variables>) -> ResolvedEnvironment {
    let mut variables = global.cloned().unwrap_or_default();
    if let Some(own) = own {
        for (key, value) in own {
            variables.insert(key.clone(), value.clone());
        }
    }
    ResolvedEnvironment {
        name: name.to_string(),
        variables,
    }
}

fn parse_extension(value: &Value) -> Result<IndexMap<String, Variables>> {
    let Value::Object(blocks) = value else {
        return Err(ConfigError::MalformedEnvironments(
            "expected a mapping of environment names".to_string(),
        )
        .into());
    };

    let mut parsed = IndexMap::new();
    for (env, block) in blocks {
        let variables = match block {
            // `staging:` with nothing under it
            Value::Null => Variables::new(),
            Value::Object(entries) => {
                let mut variables = Variables::new();
                for (key, value) in entries {
                    let Value::String(s) = value else {
                        return Err(ConfigError::MalformedEnvironments(format!(
                            "{env}.{key} must be a string, found {value}"
                        ))
                        .into());
                    };
                    variables.insert(key.clone(), s.clone());
                }
                variables
            }
            other => {
                return Err(ConfigError::MalformedEnvironments(format!(
                    "{env} must be a mapping of variables, found {other}"
                ))
                .into());
            }
        };
        parsed.insert(env.clone(), variables);
    }

    Ok(parsed)
}
