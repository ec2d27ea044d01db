//! runx - a YAML-based script runner
//!
//! Scripts are named command templates defined in a `runx.yml` file. runx
//! orders a script after its dependencies, fills its typed `${name:type}`
//! placeholders from command-line input, and runs the result either through
//! a shell or as a direct argument vector.

// Public modules
pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use error::{Result, RunxError};

/// Current version of runx
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
