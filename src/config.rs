use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use std::path::Path;
use thiserror::Error;

/// The conventional configuration file name, relative to the project root.
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// Contents of `config.yml`.
///
/// Every field is optional at the deserialization layer so that a missing key
/// can be reported by its dotted path when the replacement table is built,
/// rather than as a generic parse error. Groups that are only consulted when
/// enabled (analytics details, funding texts) may be absent entirely.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ReviewConfig {
    pub organization: Option<Organization>,
    pub template: Option<TemplateInfo>,
    pub standards: Option<Standards>,
    pub analytics: Option<Analytics>,
    pub funding: Option<Funding>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Organization {
    pub name: Option<Value>,
    pub github_url: Option<Value>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TemplateInfo {
    pub package: Option<Value>,
    pub citation_function: Option<Value>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Standards {
    pub license: Option<Value>,
    pub style_guide: Option<Value>,
    pub indent_size: Option<Value>,
    pub max_line_length: Option<Value>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Analytics {
    #[serde(default, deserialize_with = "present_flag")]
    pub enabled: Option<Value>,
    #[serde(rename = "type")]
    pub analytics_type: Option<Value>,
    pub domain: Option<Value>,
    pub script: Option<Value>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Funding {
    #[serde(default, deserialize_with = "present_flag")]
    pub enabled: Option<Value>,
    #[serde(default, deserialize_with = "present_flag")]
    pub use_default: Option<Value>,
    pub default_text: Option<Value>,
    pub custom_text: Option<Value>,
}

/// Keeps a present flag key as `Some` even when its value is empty, so that
/// `enabled:` reads as false instead of missing. An absent key stays `None`.
fn present_flag<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Missing required config key: {path}")]
    MissingKey { path: String },
    #[error("Invalid value for config key {path}: {reason}")]
    InvalidValue { path: String, reason: String },
}

impl ReviewConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: ReviewConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }
}

/// Returns the value of a required key, or `MissingKey` naming `path`.
pub fn require<'a>(value: Option<&'a Value>, path: &str) -> Result<&'a Value, ConfigError> {
    value.ok_or_else(|| ConfigError::MissingKey {
        path: path.to_string(),
    })
}

/// Returns a required group, or `MissingKey` naming the group.
pub fn require_group<'a, T>(group: Option<&'a T>, path: &str) -> Result<&'a T, ConfigError> {
    group.ok_or_else(|| ConfigError::MissingKey {
        path: path.to_string(),
    })
}

/// YAML truthiness: false, null, zero, and empty strings or collections are false.
///
/// The YAML 1.1 boolean words (`yes`/`no`, `on`/`off`, `y`/`n`, any case)
/// arrive as strings from a YAML 1.2 parser and are read as booleans here.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => yaml11_bool(s).unwrap_or(!s.is_empty()),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

fn yaml11_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "y" | "yes" | "on" | "true" => Some(true),
        "n" | "no" | "off" | "false" => Some(false),
        _ => None,
    }
}

/// Converts a scalar config value to the string placed in the replacement table.
pub fn scalar_to_string(value: &Value, path: &str) -> Result<String, ConfigError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value, path),
        Value::Sequence(_) | Value::Mapping(_) => Err(ConfigError::InvalidValue {
            path: path.to_string(),
            reason: "expected a scalar, found a collection".to_string(),
        }),
    }
}
