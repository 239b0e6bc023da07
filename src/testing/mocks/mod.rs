//! Mock implementations for testing
//!
//! This module provides mock implementations for external dependencies.

pub mod generator;

pub use generator::{MockTextGenerator, MockTextGeneratorBuilder};
