//! Help text generation and utilities

use crate::cli::args::Cli;
use clap::CommandFactory;

/// Generate comprehensive help text for the CLI
pub fn generate_help() -> String {
    Cli::command().render_help().to_string()
}

/// Get the log filter for a verbosity level. `fallback` (from `ECOSCI_LOG` or
/// the config file) is used when no `-v` flag was given.
pub fn get_log_level(verbose: u8, fallback: Option<&str>) -> String {
    match verbose {
        0 => fallback.unwrap_or("info").to_string(),
        1 => "debug".to_string(),
        2 => "trace".to_string(),
        _ => "trace,hyper=debug,tower=debug,reqwest=debug".to_string(), // -vvv shows everything including dependencies
    }
}
