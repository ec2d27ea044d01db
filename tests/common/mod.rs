//! Common test utilities

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temporary directory with a runx.yml file
pub fn create_test_config(content: &str) -> (TempDir, PathBuf) {
    create_named_config("runx.yml", content)
}

/// Create a temporary directory with a config file of the given name
pub fn create_named_config(file_name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join(file_name);
    fs::write(&config_path, content).unwrap();
    (temp_dir, config_path)
}

/// Create a test config in a subdirectory
pub fn create_test_config_in_subdir(content: &str) -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("runx.yml");
    let sub_dir = temp_dir.path().join("subdir").join("deeper");

    fs::write(&config_path, content).unwrap();
    fs::create_dir_all(&sub_dir).unwrap();

    (temp_dir, config_path, sub_dir)
}

/// Read a file written by a script, empty if it does not exist
pub fn read_output(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap_or_default()
}
