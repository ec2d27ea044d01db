//! Configuration parsing and normalization
//!
//! This module handles discovery and parsing of runx.yml configuration files
//! and normalization of script entries.

pub mod parse;
pub mod scripts;
pub mod types;

// Re-export main types
pub use parse::*;
pub use scripts::*;
pub use types::*;
