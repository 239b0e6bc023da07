//! Command implementation modules
//!
//! Each command is implemented in its own module.

pub mod browse;
pub mod check;
pub mod generate;

// Re-export command execution functions
pub use browse::{run_issues_command, run_mappings_command, run_units_command};
pub use check::run_check_command;
pub use generate::{run_generate_command, run_prompt_command};
