//! OpenAPI document loading and model

use std::sync::LazyLock;

use regex::Regex;

mod loader;
pub mod model;

pub use loader::load_spec;
#[cfg(test)]
pub use loader::parse_str;
pub use model::{
    OpenApiDocument, Operation, Parameter, ParameterLocation, RequestBody, SecurityScheme, Server,
};

/// OpenAPI versions the generator understands
pub const SUPPORTED_OPENAPI_VERSIONS: [&str; 5] = ["3.0.0", "3.0.1", "3.0.2", "3.0.3", "3.1.0"];

static SEMVER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.\d+\.\d+)").expect("valid regex"));

/// Check whether an OpenAPI version string is supported.
///
/// Only the leading `major.minor.patch` is compared, so `3.0.3-rc1` counts as `3.0.3`.
pub fn validate_openapi_version(version: &str) -> bool {
    let version = version.trim();
    let core = SEMVER_PREFIX
        .captures(version)
        .and_then(|c| c.get(1))
        .map_or(version, |m| m.as_str());

    SUPPORTED_OPENAPI_VERSIONS.contains(&core)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_openapi_version() {
        assert!(validate_openapi_version("3.0.0"));
        assert!(validate_openapi_version("3.0.1"));
        assert!(validate_openapi_version("3.1.0"));
        assert!(!validate_openapi_version("2.0.0"));
        assert!(!validate_openapi_version("4.0.0"));
    }

    #[test]
    fn test_validate_openapi_version_with_suffix() {
        assert!(validate_openapi_version("3.0.3-rc1"));
        assert!(!validate_openapi_version("3.2"));
        assert!(!validate_openapi_version(""));
    }
}
