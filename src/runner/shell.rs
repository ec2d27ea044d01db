//! Shell-mode detection
//!
//! Decides whether a rendered command has to go through the interpreter or
//! can be spawned directly as an argument vector. A heuristic, not a parser.

use regex::Regex;
use std::sync::OnceLock;

/// Operators that only a shell understands
pub const SHELL_OPERATORS: &[&str] = &["&&", "||", ";", "|", ">", "<", "&", "$(", "`"];

/// Builtins that have no executable of their own
pub const SHELL_BUILTINS: &[&str] = &[
    "cd", "export", "set", "unset", "alias", "source", ".", "eval", "exec", "exit",
];

/// Splits a command line into operator-delimited sub-commands
fn separator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"&&|\|\||[;|&\n]").expect("separator regex is valid"))
}

/// Whether `command` needs a shell to run
pub fn needs_shell(command: &str) -> bool {
    if SHELL_OPERATORS.iter().any(|op| command.contains(op)) {
        return true;
    }

    leading_words(command).any(|word| SHELL_BUILTINS.contains(&word))
}

/// First word of every sub-command
fn leading_words(command: &str) -> impl Iterator<Item = &str> {
    separator_regex()
        .split(command)
        .filter_map(|part| part.split_whitespace().next())
}
