//! Main CLI application

use crate::config::{
    conflicting_scripts, find_config_file, load_scripts, parse_config_file, write_sample_config,
    Config, Scripts,
};
use crate::error::{ConfigError, RunxError};
use crate::runner::{run_script, Context, RecordingSink, SystemRunner, Verbosity};
use crate::ui::{print_script_list, print_validation};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use clap_complete::Shell;
use std::env;
use std::io;
use std::path::PathBuf;

/// Built-in subcommands that scripts may not shadow
const BUILTIN_RUN: &str = "run";
const BUILTIN_LIST: &str = "list";
const BUILTIN_VALIDATE: &str = "validate";
const BUILTIN_INIT: &str = "init";
const BUILTIN_COMPLETIONS: &str = "completions";

/// CLI application
pub struct App {
    /// The clap command
    command: Command,
    /// Parsed configuration (empty when none was found)
    config: Config,
    /// Config file path
    config_path: Option<PathBuf>,
    /// Why the config could not be loaded, reported once a command needs it
    load_error: Option<RunxError>,
    /// Normalized scripts
    scripts: Scripts,
    /// Warnings raised while normalizing scripts
    load_warnings: Vec<String>,
}

impl App {
    /// Create a new app, discovering the configuration file
    pub fn new() -> Self {
        let loaded = find_config_file()
            .map_err(RunxError::from)
            .and_then(|path| parse_config_file(&path).map(|config| (config, path)));
        Self::from_loaded(loaded)
    }

    /// Create app with a specific config file
    pub fn with_config_file(path: PathBuf) -> Self {
        let loaded = parse_config_file(&path).map(|config| (config, path));
        Self::from_loaded(loaded)
    }

    fn from_loaded(loaded: Result<(Config, PathBuf), RunxError>) -> Self {
        let (config, config_path, load_error) = match loaded {
            Ok((config, path)) => (config, Some(path), None),
            Err(e) => (Config::default(), None, Some(e)),
        };

        let sink = RecordingSink::default();
        let scripts = load_scripts(&config, &sink);
        let command = build_command(&config, &scripts);

        App {
            command,
            config,
            config_path,
            load_error,
            scripts,
            load_warnings: sink.messages(),
        }
    }

    /// Run the application with command line arguments
    pub fn run(self) -> Result<(), RunxError> {
        let matches = self.command.clone().get_matches();
        self.dispatch(&matches)
    }

    fn dispatch(mut self, matches: &ArgMatches) -> Result<(), RunxError> {
        let verbosity = get_verbosity(matches);

        let (name, sub_matches) = match matches.subcommand() {
            Some(found) => found,
            None => {
                // No script specified, show help
                self.command.print_help()?;
                println!();
                return Ok(());
            }
        };

        match name {
            BUILTIN_INIT => {
                let dir = env::current_dir()?;
                let path = write_sample_config(&dir, sub_matches.get_flag("force"))?;
                println!("Created {}", path.display());
                return Ok(());
            }
            BUILTIN_COMPLETIONS => {
                if let Some(shell) = sub_matches.get_one::<Shell>("shell").copied() {
                    let bin_name = self.command.get_name().to_string();
                    clap_complete::generate(shell, &mut self.command, bin_name, &mut io::stdout());
                }
                return Ok(());
            }
            _ => {}
        }

        if let Some(e) = self.load_error.take() {
            return Err(e);
        }

        let ctx = self.context(verbosity, sub_matches);
        for warning in &self.load_warnings {
            ctx.print_warn(warning);
        }

        match name {
            BUILTIN_LIST => {
                print_script_list(&self.scripts);
                Ok(())
            }
            BUILTIN_VALIDATE => {
                if print_validation(&self.scripts, &conflicting_scripts(&self.config)) {
                    Ok(())
                } else {
                    Err(ConfigError::Invalid("validation failed".to_string()).into())
                }
            }
            BUILTIN_RUN => {
                let target = sub_matches
                    .get_one::<String>("script")
                    .cloned()
                    .unwrap_or_default();
                self.run_target(&target, sub_matches, &ctx)
            }
            script => self.run_target(script, sub_matches, &ctx),
        }
    }

    /// Build the execution context from config and flags
    fn context(&self, verbosity: Verbosity, matches: &ArgMatches) -> Context {
        let mut ctx = Context::new()
            .with_verbosity(verbosity)
            .with_allow_dangerous(self.config.settings.dangerous_commands);

        if let Some(path) = &self.config_path {
            ctx = ctx.with_config_path(path.clone());
        }

        // Set interpreter if specified in config
        if let Some(interpreter) = &self.config.interpreter {
            ctx = ctx.with_interpreter(interpreter.clone());
        }

        if has_run_flags(matches) {
            ctx = ctx
                .with_dry_run(matches.get_flag("dry-run"))
                .with_streaming(!matches.get_flag("capture"));
        }

        ctx
    }

    fn run_target(
        &self,
        target: &str,
        matches: &ArgMatches,
        ctx: &Context,
    ) -> Result<(), RunxError> {
        let extra = extra_input(matches);
        ctx.print_debug(&format!("Extra input: {:?}", extra));
        run_script(&self.scripts, target, &extra, ctx, &SystemRunner)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the clap command from configuration
fn build_command(config: &Config, scripts: &Scripts) -> Command {
    let mut cmd = Command::new("runx")
        .version(crate::VERSION)
        .about(config.usage.clone().unwrap_or_else(|| match &config.name {
            Some(name) => format!("Scripts for {}", name),
            None => "A YAML-based script runner".to_string(),
        }))
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Path to runx.yml config file")
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print command output and errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Print no output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(with_run_args(
            Command::new(BUILTIN_RUN).about("Run a script by name").arg(
                Arg::new("script")
                    .value_name("SCRIPT")
                    .help("Script to run")
                    .required(true),
            ),
        ))
        .subcommand(Command::new(BUILTIN_LIST).about("List all available scripts"))
        .subcommand(
            Command::new(BUILTIN_VALIDATE)
                .about("Check dependencies and placeholders of all scripts"),
        )
        .subcommand(
            Command::new(BUILTIN_INIT)
                .about("Create a sample runx.yml in the current directory")
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help("Overwrite an existing runx.yml")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new(BUILTIN_COMPLETIONS)
                .about("Print a shell completion script")
                .arg(
                    Arg::new("shell")
                        .value_name("SHELL")
                        .required(true)
                        .value_parser(value_parser!(Shell)),
                ),
        );

    // Add subcommands for each script
    for script in scripts.values() {
        cmd = cmd.subcommand(with_run_args(
            Command::new(script.name.clone()).about(script.description.clone()),
        ));
    }

    cmd
}

/// Flags and trailing input shared by `run` and script subcommands
fn with_run_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("dry-run")
            .long("dry-run")
            .help("Show what would run without running it")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("capture")
            .long("capture")
            .help("Capture output and print it when the script finishes")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("extra")
            .value_name("ARGS")
            .help("Input for the script's placeholders, or extra arguments")
            .num_args(0..)
            .trailing_var_arg(true)
            .allow_hyphen_values(true),
    )
}

fn has_run_flags(matches: &ArgMatches) -> bool {
    matches!(matches.try_contains_id("dry-run"), Ok(true))
        || matches!(matches.try_contains_id("capture"), Ok(true))
}

/// Re-join trailing arguments so words the invoking shell grouped stay grouped
fn extra_input(matches: &ArgMatches) -> String {
    match matches.get_many::<String>("extra") {
        Some(values) => shell_words::join(values),
        None => String::new(),
    }
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Run the CLI application
pub fn run() -> Result<(), RunxError> {
    // Check if --file flag is provided first
    let args: Vec<String> = std::env::args().collect();

    let app = match extract_file_arg(&args) {
        Some(path) => App::with_config_file(path),
        None => App::new(),
    };

    app.run()
}

/// Extract --file argument before clap parsing
fn extract_file_arg(args: &[String]) -> Option<PathBuf> {
    for (i, arg) in args.iter().enumerate() {
        if arg == "--" {
            break;
        }
        if (arg == "--file" || arg == "-f") && i + 1 < args.len() {
            return Some(PathBuf::from(&args[i + 1]));
        }
        if let Some(path) = arg.strip_prefix("--file=") {
            return Some(PathBuf::from(path));
        }
    }
    None
}
