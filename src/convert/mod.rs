//! OpenAPI to Postman conversion pipeline
//!
//! Load the document, resolve environments, then write one collection and one
//! environment file per environment. Environment validation happens before
//! anything touches the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::debug;
use serde::Serialize;

use crate::error::Result;
use crate::openapi::{OpenApiDocument, load_spec};

pub mod collection;
pub mod environment_file;
pub mod environments;

use collection::generate_collection;
use environment_file::generate_environment;
use environments::resolve_environments;

/// Timestamp format shared by every artifact of one run
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Files written by one conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResult {
    pub title: String,
    pub version: String,
    pub api_id: String,
    pub collection: PathBuf,
    pub environments: Vec<PathBuf>,
}

/// Converts one OpenAPI source into Postman artifacts on disk
#[derive(Debug, Clone)]
pub struct Converter {
    source: String,
    output_dir: PathBuf,
    environments: Vec<String>,
}

impl Converter {
    /// `environments` empty means "read them from `x-postman-environments`".
    pub fn new(source: impl Into<String>, output_dir: impl Into<PathBuf>, environments: Vec<String>) -> Self {
        Self {
            source: source.into(),
            output_dir: output_dir.into(),
            environments,
        }
    }

    /// Run the full pipeline.
    pub async fn convert(&self) -> Result<ConversionResult> {
        let doc = load_spec(&self.source).await?;
        write_artifacts(&doc, &self.environments, &self.output_dir, Local::now())
    }
}

/// Generate and write every artifact for an already loaded document.
pub fn write_artifacts(
    doc: &OpenApiDocument,
    explicit_envs: &[String],
    output_dir: &Path,
    generated_at: DateTime<Local>,
) -> Result<ConversionResult> {
    let envs = resolve_environments(doc, explicit_envs)?;
    let timestamp = generated_at.format(TIMESTAMP_FORMAT).to_string();

    fs::create_dir_all(output_dir)?;

    let collection = generate_collection(doc);
    let collection_path = output_dir.join(collection::collection_file_name(doc, &timestamp));
    write_json(&collection_path, &collection)?;
    debug!(
        "Wrote collection {} ({} requests)",
        collection_path.display(),
        collection.item.iter().map(|folder| folder.children().len()).sum::<usize>()
    );

    let mut environment_paths = Vec::with_capacity(envs.len());
    for env in &envs {
        let environment = generate_environment(doc, env, &timestamp);
        let path = output_dir.join(environment_file::environment_file_name(
            doc, &env.name, &timestamp,
        ));
        write_json(&path, &environment)?;
        debug!("Wrote environment {}", path.display());
        environment_paths.push(path);
    }

    Ok(ConversionResult {
        title: doc.title().to_string(),
        version: doc.version().to_string(),
        api_id: collection::api_id(doc),
        collection: collection_path,
        environments: environment_paths,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    fs::write(path, json)?;
    Ok(())
}
