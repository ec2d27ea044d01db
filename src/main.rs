use colored::Colorize;
use std::process;

fn main() {
    if let Err(e) = runx::cli::run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(e.exit_code());
    }
}
