use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Project configuration loaded from `.apigen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApigenConfig {
    pub input: String,
    pub output: String,
    pub languages: Vec<String>,
    pub package_name: String,
    pub include_tests: bool,
    pub include_docs: bool,
}

impl Default for ApigenConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            output: "generated".to_string(),
            languages: vec!["python".to_string()],
            package_name: "api_client".to_string(),
            include_tests: false,
            include_docs: true,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".apigen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<ApigenConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: ApigenConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# apigen configuration — https://github.com/apigen-dev/apigen
input: openapi.yaml
output: generated

# Target languages: python | javascript | go | rust | csharp | java | php
languages:
  - python

package_name: api_client
include_tests: false
include_docs: true
"#
}
