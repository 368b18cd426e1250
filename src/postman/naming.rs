//! Naming rules shared by generation and workspace sync
//!
//! Generated names embed a version (`My API v1.2.0`, `My API v1.2.0 - Staging`);
//! sync strips those suffixes again to match assets across releases.

use std::sync::LazyLock;

use regex::Regex;

static PATH_TEMPLATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^}]+)\}").expect("valid regex"));

static INVALID_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("valid regex"));

static UNDERSCORE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("valid regex"));

/// Version suffix anywhere in a name: " v1-rev0", " v1.0.0", " v1-rev0 v1.0.0"
static VERSION_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+v\d+([-.]\w+)*(\s+v?\d+(\.\d+)*)?").expect("valid regex")
});

/// Version suffix at the end of a collection name
static TRAILING_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+v\d+([-.]\w+)*(\s+v?\d+(\.\d+)*)?$").expect("valid regex")
});

/// Version suffix plus an optional " - Label" at the end of an environment name
static TRAILING_VERSION_AND_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+v\d+([-.]\w+)*(\s+v?\d+(\.\d+)*)?(\s+-\s+\w+)?$").expect("valid regex")
});

/// Words upper-cased when rebuilding a display name from a kebab-case id
const ACRONYMS: [&str; 10] = [
    "api", "ai", "ui", "id", "url", "http", "https", "rest", "json", "xml",
];

/// Convert an OpenAPI path template to Postman form.
///
/// `/users/{userId}/posts/{postId}` becomes `/users/:userId/posts/:postId`.
pub fn convert_path_to_postman(path: &str) -> String {
    PATH_TEMPLATE.replace_all(path, ":$1").into_owned()
}

/// Variable names of an OpenAPI path template, in order.
pub fn extract_path_variables(path: &str) -> Vec<String> {
    PATH_TEMPLATE
        .captures_iter(path)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Make a string safe to use as a file name.
pub fn sanitize_filename(name: &str) -> String {
    let name = name.replace(' ', "_");
    let name = INVALID_FILENAME_CHARS.replace_all(&name, "");
    UNDERSCORE_RUNS.replace_all(&name, "_").into_owned()
}

/// Prefix a version with `v` unless it already has one.
pub fn normalize_version(version: &str) -> String {
    let version = version.trim();
    if version.starts_with('v') || version.starts_with('V') {
        version.to_string()
    } else {
        format!("v{}", version)
    }
}

/// Remove every version suffix from a resource name.
///
/// `Test API v2-rev1 v2.5.0 - Development` becomes `Test API - Development`.
pub fn strip_version_from_name(name: &str) -> String {
    VERSION_SUFFIX.replace_all(name, "").trim().to_string()
}

/// Base name of a collection for deletion matching (trailing version removed).
pub fn collection_base_name(name: &str) -> String {
    TRAILING_VERSION.replace(name, "").trim().to_string()
}

/// Base name of an environment for deletion matching (trailing version and label removed).
pub fn environment_base_name(name: &str) -> String {
    TRAILING_VERSION_AND_LABEL
        .replace(name, "")
        .trim()
        .to_string()
}

/// Rebuild a display name from a kebab-case API id.
///
/// `ai-personal-assistant-api` becomes `AI Personal Assistant API`.
pub fn display_name_from_api_id(api_id: &str) -> String {
    api_id
        .split('-')
        .filter(|w| !w.is_empty())
        .map(|word| {
            if ACRONYMS.contains(&word.to_lowercase().as_str()) {
                word.to_uppercase()
            } else {
                capitalize(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Kebab-case identifier derived from a title: `My Pet API` becomes `my-pet-api`.
pub fn api_id_from_title(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Postman variable name for a header: `Ocp-Apim-Subscription-Key` becomes
/// `ocpApimSubscriptionKey`.
pub fn variable_name_for(header: &str) -> String {
    let mut words = header
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty());

    let mut name = words.next().map(str::to_lowercase).unwrap_or_default();
    for word in words {
        name.push_str(&capitalize(&word.to_lowercase()));
    }
    name
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
