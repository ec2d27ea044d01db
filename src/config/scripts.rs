//! Script normalization
//!
//! Turns the raw `scripts:` entries of a config file into [`ScriptDefinition`]s.

use crate::config::types::{Config, ScriptDetail, ScriptEntry};
use crate::runner::DiagnosticSink;
use indexmap::IndexMap;

/// Names taken by built-in CLI commands
pub const RESERVED_NAMES: &[&str] = &["run", "list", "validate", "init", "completions", "help"];

/// All scripts of a run, keyed by name in file order
pub type Scripts = IndexMap<String, ScriptDefinition>;

/// A normalized script
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScriptDefinition {
    pub name: String,
    pub command: String,
    pub description: String,
    pub depends: Vec<String>,
    pub cwd: Option<String>,
    pub env: IndexMap<String, String>,
    pub env_file: Option<String>,
}

impl ScriptDefinition {
    /// Script with just a command and dependencies
    pub fn new(name: &str, command: &str, depends: &[&str]) -> Self {
        ScriptDefinition {
            name: name.to_string(),
            command: command.to_string(),
            description: format!("Run {} script", name),
            depends: depends.iter().map(|d| d.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Normalize a config entry; `None` if the entry has no command
    pub fn from_entry(name: &str, entry: &ScriptEntry) -> Option<Self> {
        match entry {
            ScriptEntry::Command(command) => Some(ScriptDefinition {
                name: name.to_string(),
                command: command.clone(),
                description: format!("Run: {}", command),
                ..Default::default()
            }),
            ScriptEntry::Detailed(detail) => Self::from_detail(name, detail),
        }
    }

    fn from_detail(name: &str, detail: &ScriptDetail) -> Option<Self> {
        let command = detail.command.clone()?;
        Some(ScriptDefinition {
            name: name.to_string(),
            command,
            description: detail
                .description
                .clone()
                .unwrap_or_else(|| format!("Run {} script", name)),
            depends: detail.depends.clone(),
            cwd: detail.cwd.clone(),
            env: detail.env.clone(),
            env_file: detail.env_file.clone(),
        })
    }
}

/// Check if a script name collides with a built-in command
pub fn is_reserved_name(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}

/// Normalize all script entries, skipping reserved names and entries
/// without a command (each skip is reported to `sink`)
pub fn load_scripts(config: &Config, sink: &dyn DiagnosticSink) -> Scripts {
    let mut scripts = Scripts::new();

    for (name, entry) in &config.scripts {
        if is_reserved_name(name) {
            sink.warn(&format!(
                "Script '{}' conflicts with built-in command. Skipping.",
                name
            ));
            continue;
        }

        match ScriptDefinition::from_entry(name, entry) {
            Some(script) => {
                scripts.insert(name.clone(), script);
            }
            None => sink.warn(&format!(
                "Script '{}' missing required 'command' field. Skipping.",
                name
            )),
        }
    }

    scripts
}

/// Script entries whose names collide with built-in commands
pub fn conflicting_scripts(config: &Config) -> Vec<&str> {
    config
        .scripts
        .keys()
        .map(String::as_str)
        .filter(|name| is_reserved_name(name))
        .collect()
}
