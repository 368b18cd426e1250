//! Error types for postgen

use thiserror::Error;

/// Result type alias for postgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation cancelled by user")]
    Interrupted,

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Postman API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Postman API error {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Ambiguous match for {name}: {} workspace assets share its base name ({})", .uids.len(), .uids.join(", "))]
    AmbiguousMatch { name: String, uids: Vec<String> },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration errors: credentials, config file and the environment vendor extension
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `postgen init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Missing API key. Provide --api-key, set POSTMAN_API_KEY, or run `postgen init`.")]
    MissingApiKey,

    #[error("Missing workspace ID. Provide --workspace-id or run `postgen init`.")]
    MissingWorkspaceId,

    #[error(
        "No environments given and the OpenAPI document has no `x-postman-environments` section. \
         Pass --environment or declare them in the document."
    )]
    MissingEnvironments,

    #[error("`x-postman-environments` declares no environments besides `_global`")]
    NoEnvironments,

    #[error("Malformed `x-postman-environments`: {0}")]
    MalformedEnvironments(String),

    #[error("Environments in `x-postman-environments` define different variables:\n{}", format_missing(.0))]
    InconsistentEnvironments(Vec<(String, Vec<String>)>),

    #[error("Environments '{first}' and '{second}' map to the same file and workspace name")]
    DuplicateEnvironment { first: String, second: String },
}

fn format_missing(missing: &[(String, Vec<String>)]) -> String {
    missing
        .iter()
        .map(|(env, keys)| format!("  - {env} is missing: {}", keys.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Input errors: OpenAPI documents and Postman exports read from disk or URL
#[derive(Debug, Error)]
pub enum InputError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Failed to parse {source_name} as JSON or YAML: {reason}")]
    Parse { source_name: String, reason: String },

    #[error("Unsupported OpenAPI version: {0} (supported: 3.0.0-3.0.3, 3.1.0)")]
    UnsupportedVersion(String),

    #[error("Missing required field in OpenAPI spec: {0}")]
    MissingField(String),

    #[error("Invalid Postman export {path}: {reason}")]
    InvalidExport { path: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_http_message() {
        let err = ApiError::Http {
            status: 404,
            body: "collection not found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("collection not found"));
    }

    #[test]
    fn test_api_error_network_message() {
        let err = ApiError::Network("Connection refused".to_string());
        assert!(err.to_string().contains("Connection refused"));
    }

    #[test]
    fn test_api_error_ambiguous_lists_uids() {
        let err = ApiError::AmbiguousMatch {
            name: "My API v3".to_string(),
            uids: vec!["uid-1".to_string(), "uid-2".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("My API v3"));
        assert!(msg.contains("2 workspace assets"));
        assert!(msg.contains("uid-1, uid-2"));
    }

    #[test]
    fn test_config_error_missing_api_key() {
        let err = ConfigError::MissingApiKey;
        assert!(err.to_string().contains("POSTMAN_API_KEY"));
    }

    #[test]
    fn test_config_error_inconsistent_lists_each_env() {
        let err = ConfigError::InconsistentEnvironments(vec![
            ("production".to_string(), vec!["b".to_string()]),
            ("dev".to_string(), vec!["a".to_string(), "c".to_string()]),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("production is missing: b"));
        assert!(msg.contains("dev is missing: a, c"));
    }

    #[test]
    fn test_input_error_file_not_found() {
        let err = InputError::FileNotFound("spec.yaml".to_string());
        assert!(err.to_string().contains("spec.yaml"));
    }

    #[test]
    fn test_input_error_unsupported_version() {
        let err = InputError::UnsupportedVersion("2.0".to_string());
        assert!(err.to_string().contains("2.0"));
    }

    #[test]
    fn test_error_from_config_error() {
        let err: Error = ConfigError::NoEnvironments.into();

        match err {
            Error::Config(ConfigError::NoEnvironments) => (),
            _ => panic!("Expected Error::Config(ConfigError::NoEnvironments)"),
        }
    }

    #[test]
    fn test_error_from_api_error() {
        let err: Error = ApiError::Network("down".to_string()).into();

        match err {
            Error::Api(ApiError::Network(_)) => (),
            _ => panic!("Expected Error::Api(ApiError::Network)"),
        }
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_str = "invalid: [yaml: content";
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }
}
