//! Execution planning
//!
//! Linearizes the dependencies of a target script into the order they run.

use crate::config::Scripts;
use crate::error::{DependencyError, DependencyResult};
use crate::runner::dependencies::{cycle_from_path, Mark};
use std::collections::HashMap;

/// Resolve the order scripts run in to execute `target`
///
/// Post-order depth-first traversal: each dependency (in `depends` order)
/// is emitted before the script that needs it, and every reachable script
/// appears exactly once. The target is always last.
pub fn resolve_execution_order(scripts: &Scripts, target: &str) -> DependencyResult<Vec<String>> {
    let (target, _) = scripts
        .get_key_value(target)
        .ok_or_else(|| DependencyError::UnknownScript(target.to_string()))?;

    let mut planner = Planner {
        scripts,
        marks: HashMap::new(),
        path: Vec::new(),
        order: Vec::new(),
    };
    planner.visit(target)?;

    Ok(planner.order)
}

struct Planner<'a> {
    scripts: &'a Scripts,
    marks: HashMap<&'a str, Mark>,
    path: Vec<&'a str>,
    order: Vec<String>,
}

impl<'a> Planner<'a> {
    fn visit(&mut self, name: &'a str) -> DependencyResult<()> {
        let Some(script) = self.scripts.get(name) else {
            return Err(DependencyError::UnknownScript(name.to_string()));
        };

        self.marks.insert(name, Mark::InProgress);
        self.path.push(name);

        for dep in &script.depends {
            let Some((dep_name, _)) = self.scripts.get_key_value(dep.as_str()) else {
                return Err(DependencyError::MissingDependency {
                    script: name.to_string(),
                    missing: dep.clone(),
                });
            };

            match self.marks.get(dep_name.as_str()) {
                Some(Mark::InProgress) => {
                    return Err(DependencyError::CircularDependency(cycle_from_path(
                        &self.path, dep_name,
                    )));
                }
                Some(Mark::Done) => {}
                None => self.visit(dep_name)?,
            }
        }

        self.path.pop();
        self.marks.insert(name, Mark::Done);
        self.order.push(name.to_string());

        Ok(())
    }
}
