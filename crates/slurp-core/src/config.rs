use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::parse::ParseOptions;
use crate::transform::TypeMap;

/// Top-level project configuration loaded from `.slurp.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SlurpConfig {
    pub api: ApiConfig,
    /// Extra documented type names, layered over the built-in table.
    pub types: IndexMap<String, String>,
    pub store: StoreConfig,
    pub client: ClientConfig,
}

impl SlurpConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            host: self.api.host.clone(),
            base_prefix: self.api.base_prefix.clone(),
            types: TypeMap::with_overrides(&self.types),
        }
    }
}

/// The API whose documentation is being read.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Every definition line must mention this host (case-insensitive).
    pub host: String,
    /// Stripped from the front of every endpoint path.
    pub base_prefix: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "https://api.clubhouse.io/".to_string(),
            base_prefix: "https://api.clubhouse.io/api/v3".to_string(),
        }
    }
}

/// Where parsed descriptors are kept.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: "api_def".to_string(),
        }
    }
}

/// Names the generated client code relies on.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Default value of optional arguments.
    pub omitted_sentinel: String,
    /// Function that drops omitted entries from a body mapping.
    pub body_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            omitted_sentinel: "NotProvided".to_string(),
            body_filter: "PrepareLocals".to_string(),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".slurp.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<SlurpConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: SlurpConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# slurp configuration
api:
  host: https://api.clubhouse.io/
  base_prefix: https://api.clubhouse.io/api/v3

# Documented type name → generated type name, on top of the built-in table
types: {}
  # Float: float

store:
  dir: api_def

client:
  omitted_sentinel: NotProvided
  body_filter: PrepareLocals
"#
}
