//! Read Postman exports and shape them into API payloads

use std::fs;
use std::path::Path;

use serde_json::{Map, Value, json};

use crate::error::{InputError, Result};

/// A collection export ready to deploy
#[derive(Debug, Clone)]
pub struct CollectionExport {
    pub name: String,
    /// `info.x-api-id`, falling back to the name
    pub api_id: String,
    document: Map<String, Value>,
}

impl CollectionExport {
    /// Accepts a bare v2.1 export or one wrapped in `{"collection": ...}`.
    pub fn from_value(value: Value, source: &str) -> Result<Self> {
        let document = unwrap_object(value, "collection", source)?;
        let info = document.get("info").and_then(Value::as_object);

        let name = info
            .and_then(|i| i.get("name"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| invalid(source, "collection export is missing info.name"))?
            .to_string();
        let api_id = info
            .and_then(|i| i.get("x-api-id"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map_or_else(|| name.clone(), str::to_string);

        Ok(Self {
            name,
            api_id,
            document,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_value(read_json(path)?, &path.display().to_string())
    }

    /// `{"collection": <export without id/uid>}`
    pub fn payload(&self) -> Value {
        json!({ "collection": strip_ids(&self.document) })
    }
}

/// An environment export ready to deploy
#[derive(Debug, Clone)]
pub struct EnvironmentExport {
    pub name: String,
    /// `x-api-id`, falling back to the name
    pub api_id: String,
    document: Map<String, Value>,
}

impl EnvironmentExport {
    /// Accepts a bare export or one wrapped in `{"environment": ...}`.
    pub fn from_value(value: Value, source: &str) -> Result<Self> {
        let document = unwrap_object(value, "environment", source)?;

        let name = document
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| invalid(source, "environment export is missing name"))?
            .to_string();
        let api_id = document
            .get("x-api-id")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map_or_else(|| name.clone(), str::to_string);

        Ok(Self {
            name,
            api_id,
            document,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_value(read_json(path)?, &path.display().to_string())
    }

    /// `{"environment": <export without id/uid>}`
    pub fn payload(&self) -> Value {
        json!({ "environment": strip_ids(&self.document) })
    }
}

fn read_json(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(InputError::FileNotFound(path.display().to_string()).into());
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| invalid(&path.display().to_string(), &e.to_string()).into())
}

fn unwrap_object(value: Value, envelope: &str, source: &str) -> Result<Map<String, Value>> {
    let Value::Object(mut outer) = value else {
        return Err(invalid(source, "expected a JSON object").into());
    };
    match outer.remove(envelope) {
        Some(Value::Object(inner)) => Ok(inner),
        Some(other) => {
            outer.insert(envelope.to_string(), other);
            Ok(outer)
        }
        None => Ok(outer),
    }
}

fn strip_ids(document: &Map<String, Value>) -> Map<String, Value> {
    let mut cleaned = document.clone();
    cleaned.remove("id");
    cleaned.remove("uid");
    cleaned
}

fn invalid(source: &str, reason: &str) -> InputError {
    InputError::InvalidExport {
        path: source.to_string(),
        reason: reason.to_string(),
    }
}
