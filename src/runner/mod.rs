//! Script execution engine
//!
//! This module handles dependency resolution, placeholder substitution,
//! command assembly and the execution of whole plans.

pub mod command;
pub mod context;
pub mod dependencies;
pub mod guard;
pub mod interpolate;
pub mod placeholder;
pub mod plan;
pub mod shell;
pub mod task;

// Re-export main types
pub use command::*;
pub use context::*;
pub use dependencies::{detect_cycles, validate_dependencies};
pub use guard::*;
pub use interpolate::{substitute, Substitution};
pub use placeholder::*;
pub use plan::*;
pub use shell::*;
pub use task::*;
