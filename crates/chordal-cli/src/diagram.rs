//! Diagram description files.
//!
//! A diagram file is TOML holding exactly one of the two input forms:
//!
//! ```toml
//! matrix = [[0, 2], [1, 0]]
//! ```
//!
//! or
//!
//! ```toml
//! [[relationships]]
//! source = 0
//! target = 1
//! value = 2.5
//! ```

use std::path::Path;

use serde::Deserialize;

use chordal::input::{Input, Relationship, WeightMatrix};

use crate::error::CliError;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DiagramFile {
    matrix: Option<WeightMatrix>,
    relationships: Option<Vec<Relationship>>,
}

/// Parses a diagram description into the engine's input.
///
/// # Errors
///
/// Returns [`CliError::Parse`] for malformed TOML or invalid weights, and
/// [`CliError::Diagram`] unless exactly one input form is present.
pub fn parse_diagram(source: &str, path: &Path) -> Result<Input, CliError> {
    let file: DiagramFile = toml::from_str(source).map_err(|err| CliError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    match (file.matrix, file.relationships) {
        (Some(matrix), None) => Ok(Input::Matrix(matrix)),
        (None, Some(relationships)) => Ok(Input::Relationships(relationships)),
        (Some(_), Some(_)) => Err(CliError::Diagram(
            "both `matrix` and `relationships` are present; choose one".to_string(),
        )),
        (None, None) => Err(CliError::Diagram(
            "expected a `matrix` or a `relationships` list".to_string(),
        )),
    }
}
