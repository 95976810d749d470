//! Configuration types for chord layouts.
//!
//! [`LayoutConfig`] implements [`serde::Deserialize`] so it can be loaded
//! from external sources such as TOML files. Arbitrary comparators cannot be
//! expressed in a file; configuration only carries the named
//! [`SortOrder`]s, which the engine turns into [`ValueOrder`]s.
//!
//! # Example
//!
//! ```
//! # use chordal::config::LayoutConfig;
//! let config: LayoutConfig = toml::from_str(r#"
//!     padding = 0.05
//!     sort_groups = "descending"
//! "#).unwrap();
//! assert_eq!(config.padding(), 0.05);
//! ```
//!
//! [`ValueOrder`]: crate::order::ValueOrder

use serde::{Deserialize, Serialize};

use crate::order::SortOrder;

/// Padding and ordering settings for a chord layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Gap in radians after each non-empty group arc.
    #[serde(default)]
    padding: f64,

    /// Order of groups around the circle, by group sum.
    #[serde(default)]
    sort_groups: Option<SortOrder>,

    /// Order of slices within a group, by slice value.
    #[serde(default)]
    sort_subgroups: Option<SortOrder>,

    /// Order of the chord list, by mean endpoint value.
    #[serde(default)]
    sort_chords: Option<SortOrder>,
}

impl LayoutConfig {
    /// Creates a configuration with the given padding and natural ordering.
    pub fn new(padding: f64) -> Self {
        Self {
            padding,
            ..Self::default()
        }
    }

    /// Sets the padding (builder style).
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the group order (builder style).
    pub fn with_sort_groups(mut self, order: SortOrder) -> Self {
        self.sort_groups = Some(order);
        self
    }

    /// Sets the subgroup order (builder style).
    pub fn with_sort_subgroups(mut self, order: SortOrder) -> Self {
        self.sort_subgroups = Some(order);
        self
    }

    /// Sets the chord order (builder style).
    pub fn with_sort_chords(mut self, order: SortOrder) -> Self {
        self.sort_chords = Some(order);
        self
    }

    /// Returns the padding in radians.
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Returns the configured group order.
    pub fn sort_groups(&self) -> Option<SortOrder> {
        self.sort_groups
    }

    /// Returns the configured subgroup order.
    pub fn sort_subgroups(&self) -> Option<SortOrder> {
        self.sort_subgroups
    }

    /// Returns the configured chord order.
    pub fn sort_chords(&self) -> Option<SortOrder> {
        self.sort_chords
    }
}
