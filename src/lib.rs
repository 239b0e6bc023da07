//! # EcoSci
//!
//! Matches natural-science curriculum units with environmental education
//! issues and drafts teaching material for a chosen pair through a
//! generative text model.
//!
//! ## Usage
//!
//! ```bash
//! ecosci mappings PB-01
//! ecosci generate PB-01 E002 [--task lesson-plan] [--extra "text"]
//! ```
//!
//! ## Modules
//!
//! - `curriculum` - Curriculum records, the data store and mapping lookups
//! - `prompt` - Task types and deterministic prompt construction
//! - `generation` - Text-generation client with the Gemini backend
//! - `session` - Selection and request/result state machine
//! - `config` - Configuration management for the tool
//! - `cli` - Command-line interface
//! - `testing` - Testing utilities and fixtures
pub mod cli;
pub mod config;
pub mod curriculum;
pub mod error;
pub mod generation;
pub mod prompt;
pub mod session;

pub mod testing;
