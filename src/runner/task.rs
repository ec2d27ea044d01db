//! Plan execution
//!
//! Runs a target script and its dependencies one at a time, in plan order,
//! stopping at the first failure.

use crate::config::{ScriptDefinition, Scripts};
use crate::error::{ConfigError, ExecutionError, RunxError};
use crate::runner::{
    assemble, check_command, needs_shell, resolve_execution_order, substitute, Context,
    ProcessRunner, RunRequest,
};
use crate::utils::format_duration;
use indexmap::IndexMap;
use std::time::Instant;

/// Render and assemble one script's command
///
/// Only the target of a plan receives the user's extra input; dependencies
/// get an empty string.
pub fn prepare_script(
    script: &ScriptDefinition,
    extra: &str,
    ctx: &Context,
) -> Result<RunRequest, RunxError> {
    let substitution = substitute(&script.command, extra, ctx)?;
    let shell = needs_shell(&substitution.command);
    let command = assemble(
        &substitution.command,
        extra,
        substitution.had_placeholders,
        shell,
    )?;

    if !ctx.allow_dangerous {
        check_command(&command.display)?;
    }

    let base_dir = ctx.config_dir();
    let cwd = match &script.cwd {
        Some(dir) => base_dir.join(dir),
        None => base_dir.clone(),
    };

    let mut env = IndexMap::new();
    if let Some(env_file) = &script.env_file {
        let path = base_dir.join(env_file);
        let entries = dotenvy::from_path_iter(&path).map_err(|e| ConfigError::EnvFile {
            path: path.clone(),
            error: e.to_string(),
        })?;
        for entry in entries {
            let (key, value) = entry.map_err(|e| ConfigError::EnvFile {
                path: path.clone(),
                error: e.to_string(),
            })?;
            env.insert(key, value);
        }
    }
    for (key, value) in &script.env {
        env.insert(key.clone(), value.clone());
    }

    Ok(RunRequest {
        script: script.name.clone(),
        command,
        cwd,
        env,
    })
}

/// Run `target` after all of its dependencies
///
/// Every command of the plan is prepared before anything is spawned, so a
/// bad template anywhere in the plan fails without side effects.
pub fn run_script(
    scripts: &Scripts,
    target: &str,
    extra: &str,
    ctx: &Context,
    runner: &dyn ProcessRunner,
) -> Result<(), RunxError> {
    let plan = resolve_execution_order(scripts, target)?;
    let multi = plan.len() > 1;

    if multi && ctx.is_verbose() {
        ctx.print_info(&format!("Execution plan: {}", plan.join(" → ")));
    }

    let mut requests = Vec::with_capacity(plan.len());
    for name in &plan {
        let script = &scripts[name.as_str()];
        let input = if name == target { extra } else { "" };
        requests.push(prepare_script(script, input, ctx)?);
    }

    for (i, request) in requests.iter().enumerate() {
        let script = &scripts[request.script.as_str()];

        if multi && ctx.is_verbose() {
            ctx.print_info(&format!("[{}/{}] Running: {}", i + 1, plan.len(), script.name));
        }
        ctx.print_debug(&format!("Script: {}", script.name));
        ctx.print_debug(&format!("Description: {}", script.description));
        ctx.print_debug(&format!("Working directory: {}", request.cwd.display()));
        ctx.print_debug(&format!(
            "Shell mode: {}",
            if request.command.executable.is_shell() { "Yes" } else { "No" }
        ));
        ctx.print_command(&request.command.display);

        if ctx.dry_run {
            ctx.print_info("Dry run - command not executed");
            continue;
        }

        let start = Instant::now();
        let outcome = runner.run(request, ctx)?;
        let elapsed = format_duration(start.elapsed());

        if !outcome.success() {
            ctx.print_failure(&format!(
                "Script '{}' failed after {}",
                script.name, elapsed
            ));
            return Err(ExecutionError::CommandFailed {
                script: script.name.clone(),
                code: outcome.code,
            }
            .into());
        }

        ctx.print_success(&format!("Script completed successfully in {}", elapsed));
    }

    if ctx.dry_run {
        ctx.print_info("Dry run - no scripts executed");
    } else if multi {
        ctx.print_success("All scripts completed successfully");
    }

    Ok(())
}
