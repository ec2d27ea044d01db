//! Configuration file parsing and discovery

use crate::config::types::Config;
use crate::error::{ConfigError, ConfigResult, RunxError};
use directories::ProjectDirs;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file names to search for, in priority order
pub const CONFIG_FILE_NAMES: &[&str] = &["runx.yml", "runx.yaml", ".runx.yml", ".runx.yaml"];

/// Find the configuration file by searching current and parent directories,
/// then the per-user config directory
pub fn find_config_file() -> ConfigResult<PathBuf> {
    let current_dir = env::current_dir().map_err(|e| {
        ConfigError::Invalid(format!("Failed to get current directory: {}", e))
    })?;

    match find_config_file_from(current_dir) {
        Ok(path) => Ok(path),
        Err(ConfigError::NotFound(searched)) => match user_config_dir() {
            Some(dir) => find_in_dir(&dir).ok_or_else(|| {
                ConfigError::NotFound(format!("{}, {}", searched, dir.display()))
            }),
            None => Err(ConfigError::NotFound(searched)),
        },
        Err(e) => Err(e),
    }
}

/// Find the configuration file starting from a specific directory
pub fn find_config_file_from(start_dir: PathBuf) -> ConfigResult<PathBuf> {
    let mut current_dir = start_dir;
    let mut searched_dirs = Vec::new();

    loop {
        if let Some(found) = find_in_dir(&current_dir) {
            return Ok(found);
        }
        searched_dirs.push(current_dir.display().to_string());

        // Try parent directory
        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => {
                // Reached root without finding config
                return Err(ConfigError::NotFound(searched_dirs.join(", ")));
            }
        }
    }
}

/// First config file present in `dir`, by priority
fn find_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Per-user configuration directory (e.g. ~/.config/runx)
pub fn user_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "runx").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Parse a configuration file from a path
pub fn parse_config_file(path: &Path) -> Result<Config, RunxError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| ConfigError::Invalid(format!("Failed to read {}: {}", path.display(), e)))?;

    parse_config(&contents)
}

/// Parse configuration from a string
pub fn parse_config(yaml: &str) -> Result<Config, RunxError> {
    // An empty file is an empty config, not an error
    if yaml.trim().is_empty() {
        return Ok(Config::default());
    }

    let config: Config = serde_yaml::from_str(yaml)?;

    if let Some(interpreter) = &config.interpreter {
        if interpreter.is_empty() {
            return Err(ConfigError::Invalid("interpreter must not be empty".to_string()).into());
        }
    }

    Ok(config)
}

/// Sample configuration written by `runx init`
pub const SAMPLE_CONFIG: &str = r#"# runx configuration
#
# Placeholders take input from the command line:
#   ${name:string}  quoted string
#   ${name:raw}     inserted verbatim
#   ${name:number}  validated number
#   ${name:args}    shell-quoted word list

scripts:
  hello: echo "Hello from runx"

  fmt:
    command: cargo fmt --all
    description: Format the code

  lint:
    command: cargo clippy --all-targets
    description: Lint the code
    depends: fmt

  test:
    command: cargo test
    description: Run the test suite
    depends: [lint]

  commit:
    command: git commit -m ${message:string}
    description: Commit with a message
"#;

/// Write the sample configuration into `dir`
pub fn write_sample_config(dir: &Path, force: bool) -> Result<PathBuf, RunxError> {
    let path = dir.join(CONFIG_FILE_NAMES[0]);
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path).into());
    }
    fs::write(&path, SAMPLE_CONFIG)?;
    Ok(path)
}
