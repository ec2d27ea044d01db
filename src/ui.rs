//! Terminal output for the built-in commands

use crate::config::Scripts;
use crate::runner::{check_template, detect_cycles, validate_dependencies};
use colored::Colorize;

/// Every problem in the script set, one message per line
///
/// `conflicts` names config entries that were skipped for shadowing a
/// built-in command. Empty when the scripts are valid.
pub fn validation_problems(scripts: &Scripts, conflicts: &[&str]) -> Vec<String> {
    let mut problems: Vec<String> = conflicts
        .iter()
        .map(|name| format!("Script '{}' conflicts with built-in command", name))
        .collect();

    problems.extend(validate_dependencies(scripts).iter().map(ToString::to_string));

    problems.extend(
        detect_cycles(scripts)
            .iter()
            .map(|cycle| format!("Circular dependency: {}", cycle)),
    );

    for (name, script) in scripts {
        problems.extend(
            check_template(&script.command)
                .iter()
                .map(|err| format!("Script '{}': {}", name, err)),
        );
    }

    problems
}

/// Print the validation result; returns whether the scripts are valid
pub fn print_validation(scripts: &Scripts, conflicts: &[&str]) -> bool {
    let problems = validation_problems(scripts, conflicts);

    if problems.is_empty() {
        println!(
            "{} {} script(s), no problems found",
            "✓".green().bold(),
            scripts.len()
        );
        return true;
    }

    println!("{} {} problem(s) found:", "✗".red().bold(), problems.len());
    for problem in &problems {
        println!("  - {}", problem);
    }
    false
}

/// One line per script: name, description, dependencies
pub fn script_lines(scripts: &Scripts) -> Vec<String> {
    let width = scripts.keys().map(|n| n.len()).max().unwrap_or(0);

    scripts
        .values()
        .map(|script| {
            let mut line = format!("{:width$}  {}", script.name, script.description, width = width);
            if !script.depends.is_empty() {
                line.push_str(&format!(" (depends: {})", script.depends.join(", ")));
            }
            line
        })
        .collect()
}

/// Print the script listing
pub fn print_script_list(scripts: &Scripts) {
    if scripts.is_empty() {
        println!("{}", "No scripts defined.".yellow());
        return;
    }

    println!("{}", "Available scripts:".bold());
    for line in script_lines(scripts) {
        println!("  {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScriptDefinition;

    fn scripts(defs: &[(&str, &str, &[&str])]) -> Scripts {
        defs.iter()
            .map(|(name, cmd, deps)| (name.to_string(), ScriptDefinition::new(name, cmd, deps)))
            .collect()
    }

    #[test]
    fn test_clean_scripts_have_no_problems() {
        let s = scripts(&[("fmt", "cargo fmt", &[]), ("test", "cargo test ${f:raw}", &["fmt"])]);
        assert!(validation_problems(&s, &[]).is_empty());
    }

    #[test]
    fn test_all_problem_kinds_reported() {
        let s = scripts(&[
            ("a", "echo a", &["b"]),
            ("b", "echo b", &["a", "ghost"]),
            ("c", "echo ${msg}", &[]),
        ]);
        let problems = validation_problems(&s, &[]);
        assert_eq!(problems.len(), 3);
        assert!(problems[0].contains("non-existent script 'ghost'"));
        assert_eq!(problems[1], "Circular dependency: a → b → a");
        assert!(problems[2].starts_with("Script 'c':"));
    }

    #[test]
    fn test_conflicting_names_reported_first() {
        let s = scripts(&[("a", "echo a", &["ghost"])]);
        let problems = validation_problems(&s, &["run", "list"]);
        assert_eq!(
            problems,
            vec![
                "Script 'run' conflicts with built-in command",
                "Script 'list' conflicts with built-in command",
                "Script 'a' depends on non-existent script 'ghost'",
            ]
        );
    }

    #[test]
    fn test_script_lines() {
        let s = scripts(&[("fmt", "cargo fmt", &[]), ("test", "cargo test", &["fmt"])]);
        let lines = script_lines(&s);
        assert_eq!(lines[0], "fmt   Run fmt script");
        assert_eq!(lines[1], "test  Run test script (depends: fmt)");
    }
}
