//! Error adapter for converting CliError to miette diagnostics.
//!
//! This module provides the bridge between the CLI's error type and miette's
//! rich diagnostic formatting.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use chordal::ChordError;

use crate::error::{CliError, ConfigError};

/// Adapter presenting a [`CliError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CliError::Io(_) => "chordal::io",
            CliError::Parse { .. } => "chordal::parse",
            CliError::Diagram(_) => "chordal::diagram",
            CliError::Config(_) => "chordal::config",
            CliError::Layout(_) => "chordal::layout",
            CliError::Serialize(_) => "chordal::serialize",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            CliError::Layout(ChordError::PaddingExceedsCircle { .. }) => {
                "reduce `padding` in the [layout] configuration section or --padding"
            }
            CliError::Layout(ChordError::InvalidGroupIndex { .. }) => {
                "relationship `source` and `target` must be dense group indices"
            }
            CliError::Layout(ChordError::WeightOutOfRange { .. }) => {
                "rescale the weights; their total must be a normal, finite number"
            }
            CliError::Layout(_) | CliError::Parse { .. } => {
                "matrices must be square and every weight finite and non-negative"
            }
            CliError::Diagram(_) => "define either `matrix = [[...]]` or `[[relationships]]`",
            CliError::Config(ConfigError::MissingFile(_)) => {
                "check the path passed to --config"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}
