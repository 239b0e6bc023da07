//! CLI argument structures
//!
//! This module defines the command-line interface used by EcoSci.

use crate::config::Config;
use crate::curriculum::GradeLevel;
use crate::prompt::TaskType;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Plan science lessons around environmental education issues
#[derive(Parser)]
#[command(name = "ecosci")]
#[command(about = "ecosci - Match science units with environmental issues and draft teaching material", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Curriculum data file (YAML) to use instead of the built-in set
    #[arg(long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Model used for generation
    #[arg(long, global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(data) = &self.data {
            config.data_file = Some(data.clone());
        }
        if let Some(model) = &self.model {
            config.backend.model = model.clone();
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List science units
    #[command(name = "units")]
    Units {
        /// Only units of this stage (elementary, junior-high, senior-high)
        #[arg(long)]
        grade: Option<GradeLevel>,

        /// Only units whose subject contains this text
        #[arg(long)]
        subject: Option<String>,
    },

    /// List environmental education issues
    #[command(name = "issues")]
    Issues,

    /// Show the issues mapped to a science unit
    #[command(name = "mappings")]
    Mappings {
        /// Science unit id (e.g. PB-01)
        unit_id: String,
    },

    /// Print the generation prompt without calling the model
    #[command(name = "prompt")]
    Prompt(GenerationArgs),

    /// Generate teaching material for a unit/issue pair
    #[command(name = "generate")]
    Generate(GenerationArgs),

    /// Check the curriculum data for dangling references and duplicate ids
    #[command(name = "check")]
    Check,
}

#[derive(Args, Debug, Clone)]
pub struct GenerationArgs {
    /// Science unit id (e.g. PB-01)
    pub unit_id: String,

    /// Environmental issue id (e.g. E002)
    pub issue_id: String,

    /// What to produce: lesson-plan, material, assessment, ppt-outline or any other label
    #[arg(short, long, default_value = "lesson-plan")]
    pub task: TaskType,

    /// Extra requirements appended to the prompt
    #[arg(short, long, value_name = "TEXT")]
    pub extra: Option<String>,
}
