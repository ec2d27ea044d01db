//! Command assembly and execution
//!
//! Turns a substituted template into something spawnable and runs it.

use crate::error::{ExecutionError, ExecutionResult, TemplateResult};
use crate::runner::interpolate::split_words;
use crate::runner::Context;
use indexmap::IndexMap;
use std::path::PathBuf;
use std::process::{Command as StdCommand, Stdio};

/// How a command is handed to the OS
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Executable {
    /// Passed to the interpreter as one string
    Shell(String),
    /// Spawned directly: program then arguments
    Argv(Vec<String>),
}

impl Executable {
    pub fn is_shell(&self) -> bool {
        matches!(self, Executable::Shell(_))
    }
}

/// A command ready to run, with its one-line display form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledCommand {
    pub executable: Executable,
    pub display: String,
}

/// Build the final command
///
/// When the template had placeholders, `extra` was already consumed by
/// substitution. Otherwise it is appended: as raw text for the shell, as
/// extra words for direct execution.
pub fn assemble(
    substituted: &str,
    extra: &str,
    had_placeholders: bool,
    needs_shell: bool,
) -> TemplateResult<AssembledCommand> {
    let extra = extra.trim();
    let display = if had_placeholders || extra.is_empty() {
        substituted.to_string()
    } else {
        format!("{} {}", substituted, extra)
    };

    let executable = if needs_shell {
        Executable::Shell(display.clone())
    } else {
        Executable::Argv(split_words(&display)?)
    };

    Ok(AssembledCommand {
        executable,
        display,
    })
}

/// Everything the process runner needs for one script
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub script: String,
    pub command: AssembledCommand,
    pub cwd: PathBuf,
    pub env: IndexMap<String, String>,
}

/// Exit status of a finished script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// `None` when the process was killed by a signal
    pub code: Option<i32>,
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Spawns assembled commands
pub trait ProcessRunner {
    fn run(&self, request: &RunRequest, ctx: &Context) -> ExecutionResult<RunOutcome>;
}

/// Runs commands as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, request: &RunRequest, ctx: &Context) -> ExecutionResult<RunOutcome> {
        let mut command = build_command(&request.command.executable, &ctx.interpreter)
            .ok_or_else(|| ExecutionError::EmptyCommand(request.script.clone()))?;
        let program = command.get_program().to_string_lossy().into_owned();

        command.current_dir(&request.cwd);
        command.envs(&request.env);

        if ctx.streaming {
            command.stdin(Stdio::inherit());
            command.stdout(Stdio::inherit());
            command.stderr(Stdio::inherit());

            let status = command.status().map_err(|e| ExecutionError::Spawn {
                program,
                error: e.to_string(),
            })?;
            return Ok(RunOutcome {
                code: status.code(),
            });
        }

        let output = command.output().map_err(|e| ExecutionError::Spawn {
            program,
            error: e.to_string(),
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if output.status.success() {
            if !stdout.is_empty() {
                print!("{}", stdout);
            }
        } else if !stderr.is_empty() {
            ctx.print_error("Error output:");
            eprint!("{}", stderr);
        } else if !stdout.is_empty() {
            ctx.print_error("Output:");
            eprint!("{}", stdout);
        }

        Ok(RunOutcome {
            code: output.status.code(),
        })
    }
}

/// Build the std command for an executable; `None` for an empty argv
fn build_command(executable: &Executable, interpreter: &[String]) -> Option<StdCommand> {
    match executable {
        Executable::Shell(line) => {
            let (program, args) = interpreter.split_first()?;
            let mut command = StdCommand::new(program);
            command.args(args);
            command.arg(line);
            Some(command)
        }
        Executable::Argv(argv) => {
            let (program, args) = argv.split_first()?;
            let mut command = StdCommand::new(program);
            command.args(args);
            Some(command)
        }
    }
}
