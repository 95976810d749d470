//! Command-line arguments for the chordal CLI.
//!
//! Besides the input, output and config paths, the layout settings can be
//! given directly on the command line. Flags take precedence over the
//! `[layout]` section of the configuration file.

use clap::Parser;

use chordal::{config::LayoutConfig, order::SortOrder};

/// Computes chord diagram angles from a matrix or relationship list
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Diagram file holding a `matrix` or a `[[relationships]]` list (TOML)
    pub input: String,

    /// Where to write the computed layout (TOML)
    #[arg(short, long, default_value = "layout.toml")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Gap in radians after each group arc
    #[arg(short, long)]
    pub padding: Option<f64>,

    /// Order groups around the circle by their total weight
    #[arg(long, value_name = "ORDER")]
    pub sort_groups: Option<SortOrder>,

    /// Order slices within each group by their weight
    #[arg(long, value_name = "ORDER")]
    pub sort_subgroups: Option<SortOrder>,

    /// Order the chord list by mean endpoint weight
    #[arg(long, value_name = "ORDER")]
    pub sort_chords: Option<SortOrder>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Applies the layout flags given on the command line over `config`.
    pub fn layout_config(&self, config: &LayoutConfig) -> LayoutConfig {
        let mut config = config.clone();
        if let Some(padding) = self.padding {
            config = config.with_padding(padding);
        }
        if let Some(order) = self.sort_groups {
            config = config.with_sort_groups(order);
        }
        if let Some(order) = self.sort_subgroups {
            config = config.with_sort_subgroups(order);
        }
        if let Some(order) = self.sort_chords {
            config = config.with_sort_chords(order);
        }
        config
    }
}
