//! Error types for runx

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for runx operations
pub type Result<T> = std::result::Result<T, RunxError>;

/// Main error type for runx
#[derive(Error, Debug)]
pub enum RunxError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Dependency resolution errors
    #[error("Dependency error: {0}")]
    Dependency(#[from] DependencyError),

    /// Placeholder substitution and command assembly errors
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Script execution errors
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl RunxError {
    /// Process exit code to report for this error.
    ///
    /// A script that exited non-zero passes its own code through.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunxError::Execution(ExecutionError::CommandFailed {
                code: Some(code), ..
            }) if *code != 0 => *code,
            _ => 1,
        }
    }
}

/// Configuration discovery and parsing errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find config file (searched: {0})")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to read env file '{path}': {error}")]
    EnvFile { path: PathBuf, error: String },

    #[error("Config file '{0}' already exists (use --force to overwrite)")]
    AlreadyExists(PathBuf),
}

/// A dependency problem found by validation.
///
/// These are findings, not failures: validation collects all of them so
/// the caller can report everything at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyIssue {
    SelfDependency { script: String },
    UnknownDependency { script: String, missing: String },
}

impl fmt::Display for DependencyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyIssue::SelfDependency { script } => {
                write!(f, "Script '{}' cannot depend on itself", script)
            }
            DependencyIssue::UnknownDependency { script, missing } => write!(
                f,
                "Script '{}' depends on non-existent script '{}'",
                script, missing
            ),
        }
    }
}

/// A dependency loop, as the ordered names forming it.
///
/// The first name is repeated at the end: `a → b → a`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cycle(pub Vec<String>);

impl Cycle {
    /// Names in the loop, without the closing repeat
    pub fn members(&self) -> &[String] {
        match self.0.split_last() {
            Some((_, rest)) if !rest.is_empty() => rest,
            _ => &self.0,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" → "))
    }
}

/// Execution planning errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DependencyError {
    #[error("Script '{0}' is not defined")]
    UnknownScript(String),

    #[error("Circular dependency detected: {0}")]
    CircularDependency(Cycle),

    #[error("Script '{script}' depends on non-existent script '{missing}'")]
    MissingDependency { script: String, missing: String },
}

/// Placeholder substitution and command assembly errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Placeholder '{placeholder}' has no type (expected ${{{placeholder}:string|raw|number|args}})")]
    MissingType { placeholder: String },

    #[error("Placeholder '{placeholder}' has invalid type '{kind}' (expected string, raw, number or args)")]
    InvalidType { placeholder: String, kind: String },

    #[error("Placeholder '{placeholder}' expects a number, got '{value}'")]
    InvalidNumber { placeholder: String, value: String },

    #[error("No input provided for placeholder '{placeholder}'")]
    MissingInput { placeholder: String },

    #[error("Invalid shell syntax in '{input}': {error}")]
    MalformedShellSyntax { input: String, error: String },
}

/// Script execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Script '{script}' failed with exit code {code:?}")]
    CommandFailed { script: String, code: Option<i32> },

    #[error("Failed to start '{program}': {error}")]
    Spawn { program: String, error: String },

    #[error("Script '{0}' has an empty command")]
    EmptyCommand(String),

    #[error("Refusing to run dangerous command '{command}' ({reason}); set settings.dangerous_commands to allow it")]
    DangerousCommand { command: String, reason: String },
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for dependency resolution
pub type DependencyResult<T> = std::result::Result<T, DependencyError>;

/// Specialized result type for substitution and assembly
pub type TemplateResult<T> = std::result::Result<T, TemplateError>;

/// Specialized result type for execution operations
pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;
