//! Core configuration types
//!
//! This module defines the data structures that represent a runx.yml configuration file.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Application name (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Application usage description (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,

    /// Scripts defined in the configuration, in file order
    #[serde(default)]
    pub scripts: IndexMap<String, ScriptEntry>,

    /// Interpreter for shell-mode commands (e.g., ["bash", "-c"])
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<Vec<String>>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    /// Allow commands the dangerous-command guard would reject
    #[serde(default)]
    pub dangerous_commands: bool,
}

/// A script entry - either a bare command string or a detailed mapping
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ScriptEntry {
    /// `name: command`
    Command(String),

    /// `name: { command: ..., depends: ... }`
    Detailed(ScriptDetail),
}

impl<'de> Deserialize<'de> for ScriptEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;
        use serde_yaml::Value;

        // Dispatch on shape so field errors keep their own message
        match Value::deserialize(deserializer)? {
            Value::String(command) => Ok(ScriptEntry::Command(command)),
            Value::Null => Ok(ScriptEntry::Detailed(ScriptDetail::default())),
            value @ Value::Mapping(_) => ScriptDetail::deserialize(value)
                .map(ScriptEntry::Detailed)
                .map_err(D::Error::custom),
            _ => Err(D::Error::custom("script must be a command string or a mapping")),
        }
    }
}

/// Detailed script specification
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScriptDetail {
    /// Command template; a script without one is skipped at load time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Description for listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Scripts that must run first
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_depends"
    )]
    pub depends: Vec<String>,

    /// Working directory, relative to the config file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,

    /// Environment overrides
    #[serde(
        default,
        skip_serializing_if = "IndexMap::is_empty",
        deserialize_with = "deserialize_env"
    )]
    pub env: IndexMap<String, String>,

    /// Dotenv file loaded beneath `env`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_file: Option<String>,
}

/// Custom deserializer for depends that handles both a single name and a list
fn deserialize_depends<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    let value = Value::deserialize(deserializer)?;

    match value {
        // Single script name
        Value::String(s) => Ok(vec![s]),
        // List of script names
        Value::Sequence(seq) => seq
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(D::Error::custom(format!(
                    "depends entries must be script names, got {:?}",
                    other
                ))),
            })
            .collect(),
        // Null or not present
        Value::Null => Ok(Vec::new()),
        _ => Err(D::Error::custom("depends must be a string or array")),
    }
}

/// Custom deserializer for env that accepts numbers and booleans as values
fn deserialize_env<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    fn scalar(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null => Some(String::new()),
            _ => None,
        }
    }

    match Value::deserialize(deserializer)? {
        Value::Mapping(map) => map
            .into_iter()
            .map(|(key, value)| {
                let key = scalar(key)
                    .ok_or_else(|| D::Error::custom("env names must be strings"))?;
                let value = scalar(value).ok_or_else(|| {
                    D::Error::custom(format!(
                        "env value for '{}' must be a string, number or boolean",
                        key
                    ))
                })?;
                Ok((key, value))
            })
            .collect(),
        Value::Null => Ok(IndexMap::new()),
        _ => Err(D::Error::custom("env must be a mapping of names to values")),
    }
}
