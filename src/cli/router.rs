//! Command routing and execution
//!
//! This module handles routing CLI commands to their respective implementations.

use crate::cli::args::Commands;
use crate::cli::commands::*;
use crate::cli::help::generate_help;
use crate::config::Config;
use crate::curriculum::CurriculumStore;
use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Execute a CLI command against the resolved configuration
pub async fn execute_command(command: Option<Commands>, config: &Config) -> Result<()> {
    let Some(command) = command else {
        print!("{}", generate_help());
        return Ok(());
    };

    let store = CurriculumStore::load_or_builtin(config.data_file.as_deref())
        .context("Failed to load curriculum data")?;
    debug!(
        "Curriculum loaded: {} units, {} issues, {} mappings",
        store.units().len(),
        store.issues().len(),
        store.mappings().len()
    );

    match command {
        Commands::Units { grade, subject } => run_units_command(&store, grade, subject),
        Commands::Issues => run_issues_command(&store),
        Commands::Mappings { unit_id } => run_mappings_command(&store, &unit_id),
        Commands::Prompt(args) => run_prompt_command(&store, &args),
        Commands::Generate(args) => {
            if !config.has_api_key() {
                warn!("No API key configured (set ECOSCI_API_KEY or GEMINI_API_KEY)");
            }
            run_generate_command(&store, &config.backend, &args).await
        }
        Commands::Check => run_check_command(&store),
    }
}
