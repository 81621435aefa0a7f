// src/error.rs

//! Error types for selection, resolution, and install operations

use thiserror::Error;

/// Errors surfaced by the selection/install pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed matcher selector, rejected at construction time
    #[error("Invalid selector '{input}': {reason}")]
    Validation { input: String, reason: String },

    /// A query pattern matched zero known artifact names
    #[error("No definition matching '{0}'")]
    NotFound(String),

    /// Filesystem failure during install or manifest IO
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest parse or serialize failure
    #[error("Config error: {0}")]
    Config(String),

    /// Install path escaped the target directory
    #[error("Path traversal attempt: {0}")]
    PathTraversal(String),
}

impl Error {
    /// Shorthand for a validation failure naming the offending input
    pub fn validation(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Validation {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
