//! CLI support for objective-json
//!
//! Provides programmatic access to the `ojson` commands so they can be
//! driven from other tools and from tests.

mod check;

pub use check::{CheckOptions, CheckResult, Input, execute_check};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// The document is not valid JSON
    #[error("{0}")]
    Parse(#[from] crate::ParseError),

    /// Pretty printing failed
    #[error("Could not format output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,
}
