//! Load OpenAPI documents from a local file or a URL

use std::path::Path;

use log::debug;
use serde::de::DeserializeOwned;

use super::model::OpenApiDocument;
use super::validate_openapi_version;
use crate::error::{InputError, Result};

/// Document encoding detected from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
    /// Unknown extension or remote content: JSON first, YAML second
    Auto,
}

impl Format {
    fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => Format::Yaml,
            Some("json") => Format::Json,
            _ => Format::Auto,
        }
    }
}

/// Check whether a string is an absolute URL with scheme and host.
pub fn is_url(candidate: &str) -> bool {
    match url::Url::parse(candidate) {
        Ok(parsed) => parsed.has_host() && !parsed.scheme().is_empty(),
        Err(_) => false,
    }
}

/// Load and validate an OpenAPI document from a path or URL.
pub async fn load_spec(source: &str) -> Result<OpenApiDocument> {
    let (content, format) = if is_url(source) {
        debug!("Downloading OpenAPI spec from {}", source);
        (fetch(source).await?, Format::Auto)
    } else {
        let path = Path::new(source);
        if !path.exists() {
            return Err(InputError::FileNotFound(source.to_string()).into());
        }
        debug!("Reading OpenAPI spec from {}", path.display());
        (std::fs::read_to_string(path)?, Format::from_path(path))
    };

    let doc: OpenApiDocument = parse_document(&content, format, source)?;
    validate_document(&doc)?;

    debug!("Loaded OpenAPI spec: {} {}", doc.title(), doc.version());
    Ok(doc)
}

/// Parse document text as JSON or YAML.
#[cfg(test)]
pub fn parse_str(content: &str, source_name: &str) -> Result<OpenApiDocument> {
    let doc = parse_document(content, Format::Auto, source_name)?;
    validate_document(&doc)?;
    Ok(doc)
}

async fn fetch(url: &str) -> Result<String> {
    let to_fetch_error = |e: reqwest::Error| InputError::Fetch {
        url: url.to_string(),
        reason: e.to_string(),
    };

    let response = reqwest::get(url).await.map_err(to_fetch_error)?;
    let status = response.status();
    if !status.is_success() {
        return Err(InputError::Fetch {
            url: url.to_string(),
            reason: format!("HTTP {}", status),
        }
        .into());
    }

    Ok(response.text().await.map_err(to_fetch_error)?)
}

fn parse_document<T: DeserializeOwned>(content: &str, format: Format, source: &str) -> Result<T> {
    let parse_error = |reason: String| InputError::Parse {
        source_name: source.to_string(),
        reason,
    };

    let parsed = match format {
        Format::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
        Format::Yaml => serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string())),
        Format::Auto => serde_json::from_str(content).or_else(|json_err| {
            debug!("{} is not JSON ({}), trying YAML", source, json_err);
            serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))
        }),
    };

    Ok(parsed?)
}

fn validate_document(doc: &OpenApiDocument) -> Result<()> {
    match (&doc.openapi, &doc.swagger) {
        (Some(version), _) if validate_openapi_version(version) => Ok(()),
        (Some(version), _) => Err(InputError::UnsupportedVersion(version.clone()).into()),
        (None, Some(swagger)) => Err(InputError::UnsupportedVersion(swagger.clone()).into()),
        (None, None) => Err(InputError::MissingField("openapi".to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;
    use tempfile::tempdir;

    const JSON_SPEC: &str = r#"{
        "openapi": "3.0.0",
        "info": {"title": "Test API", "version": "1.0.0"},
        "servers": [{"url": "https://api.example.com/v1"}],
        "paths": {}
    }"#;

    const YAML_SPEC: &str = "openapi: 3.1.0\ninfo:\n  title: Yaml API\n  version: 2.0.0\npaths:\n  /pets:\n    get:\n      summary: List pets\n      responses:\n        200:\n          description: ok\n";

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/api"));
        assert!(is_url("http://localhost:8080"));
        assert!(!is_url("/local/path/file.json"));
        assert!(!is_url("file.json"));
    }

    #[tokio::test]
    async fn test_load_json_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("spec.json");
        fs::write(&path, JSON_SPEC).unwrap();

        let doc = load_spec(path.to_str().unwrap()).await.unwrap();
        assert_eq!(doc.title(), "Test API");
        assert_eq!(doc.version(), "1.0.0");
        assert_eq!(doc.servers[0].url, "https://api.example.com/v1");
    }

    #[tokio::test]
    async fn test_load_yaml_file_with_numeric_response_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("spec.yml");
        fs::write(&path, YAML_SPEC).unwrap();

        let doc = load_spec(path.to_str().unwrap()).await.unwrap();
        assert_eq!(doc.title(), "Yaml API");
        let get = doc.paths["/pets"].get.as_ref().unwrap();
        assert!(get.responses.contains_key("200"));
    }

    #[tokio::test]
    async fn test_load_unknown_extension_falls_back_to_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("spec.txt");
        fs::write(&path, YAML_SPEC).unwrap();

        let doc = load_spec(path.to_str().unwrap()).await.unwrap();
        assert_eq!(doc.version(), "2.0.0");
    }

    #[tokio::test]
    async fn test_missing_file_is_file_not_found() {
        let err = load_spec("/definitely/not/here.yaml").await.unwrap_err();
        assert!(matches!(err, Error::Input(InputError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_garbage_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("spec.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_spec(path.to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, Error::Input(InputError::Parse { .. })));
    }

    #[test]
    fn test_swagger_two_is_rejected() {
        let err = parse_str(r#"{"swagger": "2.0", "paths": {}}"#, "inline").unwrap_err();
        assert!(matches!(
            err,
            Error::Input(InputError::UnsupportedVersion(ref v)) if v == "2.0"
        ));
    }

    #[test]
    fn test_missing_openapi_field() {
        let err = parse_str(r#"{"info": {"title": "x"}}"#, "inline").unwrap_err();
        assert!(matches!(err, Error::Input(InputError::MissingField(_))));
    }

    #[tokio::test]
    async fn test_load_from_url_yaml_body() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/openapi.yaml")
            .with_status(200)
            .with_header("content-type", "text/plain")
            .with_body(YAML_SPEC)
            .create_async()
            .await;

        let url = format!("{}/openapi.yaml", server.url());
        let doc = load_spec(&url).await.unwrap();
        assert_eq!(doc.title(), "Yaml API");
    }

    #[tokio::test]
    async fn test_load_from_url_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/missing.json")
            .with_status(404)
            .create_async()
            .await;

        let url = format!("{}/missing.json", server.url());
        let err = load_spec(&url).await.unwrap_err();
        assert!(matches!(err, Error::Input(InputError::Fetch { .. })));
    }
}
