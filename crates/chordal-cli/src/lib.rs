//! CLI logic for the chordal layout tool.
//!
//! Reads a diagram description, lays it out with [`ChordLayout`] and writes
//! the resulting angles as TOML.

pub mod config;
pub mod error;
pub mod error_adapter;

mod args;
mod diagram;

pub use args::Args;
pub use error::CliError;

use std::{fs, path::Path};

use log::{debug, info, trace};

use chordal::ChordLayout;

/// Run the chordal CLI application
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed diagram files
/// - Invalid weights or padding
/// - Serialization errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    trace!(config:? = app_config; "Loaded configuration");

    let source = fs::read_to_string(&args.input)?;
    let input = diagram::parse_diagram(&source, Path::new(&args.input))?;

    let layout_config = args.layout_config(app_config.layout());
    let mut engine = ChordLayout::from_config(&layout_config)?;
    engine.set_input(input)?;
    let layout = engine.take_layout()?;
    debug!(
        groups = layout.groups().len(),
        chords = layout.chords().len();
        "Layout calculated"
    );

    let output = toml::to_string_pretty(&layout)?;
    fs::write(&args.output, output)?;

    info!(output_file = args.output; "Layout exported successfully");

    Ok(())
}
