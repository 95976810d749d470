//! Error types for the chordal CLI.

use std::{io, path::PathBuf};

use thiserror::Error;

use chordal::ChordError;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),
}

/// The error type for CLI runs.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse diagram {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid diagram: {0}")]
    Diagram(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Layout error: {0}")]
    Layout(#[from] ChordError),

    #[error("Failed to serialize layout: {0}")]
    Serialize(#[from] toml::ser::Error),
}
