//! Dependency graph validation
//!
//! The graph is the script mapping itself: an edge runs from a script to
//! each name in its `depends`. Both checks here are collectors; they report
//! every finding instead of stopping at the first.

use crate::config::Scripts;
use crate::error::{Cycle, DependencyIssue};
use std::collections::{HashMap, HashSet};

/// DFS marking for a script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mark {
    InProgress,
    Done,
}

/// Find self-dependencies and references to undefined scripts
pub fn validate_dependencies(scripts: &Scripts) -> Vec<DependencyIssue> {
    let mut issues = Vec::new();

    for (name, script) in scripts {
        for dep in &script.depends {
            if dep == name {
                issues.push(DependencyIssue::SelfDependency {
                    script: name.clone(),
                });
            } else if !scripts.contains_key(dep) {
                issues.push(DependencyIssue::UnknownDependency {
                    script: name.clone(),
                    missing: dep.clone(),
                });
            }
        }
    }

    issues
}

/// Find every distinct dependency cycle
///
/// Edges to undefined scripts are skipped; [`validate_dependencies`]
/// reports those.
pub fn detect_cycles(scripts: &Scripts) -> Vec<Cycle> {
    let mut marks: HashMap<&str, Mark> = HashMap::new();
    let mut path: Vec<&str> = Vec::new();
    let mut cycles = Vec::new();
    let mut seen: HashSet<Vec<String>> = HashSet::new();

    for name in scripts.keys() {
        if !marks.contains_key(name.as_str()) {
            visit(scripts, name, &mut marks, &mut path, &mut cycles, &mut seen);
        }
    }

    cycles
}

fn visit<'a>(
    scripts: &'a Scripts,
    name: &'a str,
    marks: &mut HashMap<&'a str, Mark>,
    path: &mut Vec<&'a str>,
    cycles: &mut Vec<Cycle>,
    seen: &mut HashSet<Vec<String>>,
) {
    marks.insert(name, Mark::InProgress);
    path.push(name);

    if let Some(script) = scripts.get(name) {
        for dep in &script.depends {
            let Some((dep_name, _)) = scripts.get_key_value(dep.as_str()) else {
                continue;
            };
            match marks.get(dep_name.as_str()) {
                Some(Mark::InProgress) => {
                    let cycle = cycle_from_path(path, dep_name);
                    if seen.insert(canonical(cycle.members())) {
                        cycles.push(cycle);
                    }
                }
                Some(Mark::Done) => {}
                None => visit(scripts, dep_name, marks, path, cycles, seen),
            }
        }
    }

    path.pop();
    marks.insert(name, Mark::Done);
}

/// Close the loop from the first occurrence of `closing` on the DFS path
pub(crate) fn cycle_from_path(path: &[&str], closing: &str) -> Cycle {
    let start = path.iter().position(|n| *n == closing).unwrap_or(0);
    let mut names: Vec<String> = path[start..].iter().map(|n| n.to_string()).collect();
    names.push(closing.to_string());
    Cycle(names)
}

/// Rotation of the loop starting at its smallest name, for deduplication
fn canonical(members: &[String]) -> Vec<String> {
    let Some(min_at) = members
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.cmp(b.1))
        .map(|(i, _)| i)
    else {
        return Vec::new();
    };
    members[min_at..]
        .iter()
        .chain(members[..min_at].iter())
        .cloned()
        .collect()
}
