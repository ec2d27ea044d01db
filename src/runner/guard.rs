//! Guard against obviously destructive commands

use crate::error::{ExecutionError, ExecutionResult};
use regex::Regex;
use std::sync::OnceLock;

fn dangerous_patterns() -> &'static [(Regex, &'static str)] {
    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (
                r"\brm\s+(-[a-zA-Z]*\s+)*-[a-zA-Z]*[rR][a-zA-Z]*\s+(-[a-zA-Z]*\s+)*(/|~|\$HOME)(\s|$|\*)",
                "recursive delete of root or home",
            ),
            (r"\bmkfs(\.\w+)?\b", "filesystem format"),
            (r"\bdd\b.*\bof=/dev/", "raw write to a device"),
            (r">\s*/dev/[sh]d[a-z]", "redirect onto a disk device"),
            (r":\(\)\s*\{\s*:\s*\|\s*:\s*&\s*\}\s*;\s*:", "fork bomb"),
            (r"\bchmod\s+(-[a-zA-Z]+\s+)*777\s+/(\s|$)", "world-writable root"),
        ]
        .into_iter()
        .map(|(pattern, reason)| {
            (
                Regex::new(pattern).expect("dangerous command pattern is valid"),
                reason,
            )
        })
        .collect()
    })
}

/// Reject a command matching a known destructive pattern
pub fn check_command(command: &str) -> ExecutionResult<()> {
    match dangerous_patterns()
        .iter()
        .find(|(pattern, _)| pattern.is_match(command))
    {
        Some((_, reason)) => Err(ExecutionError::DangerousCommand {
            command: command.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
