//! Ordering comparators for groups, subgroups and chords.
//!
//! A [`ValueOrder`] compares two magnitudes (group sums, cell values or chord
//! mean values). The engine sorts stably, so elements that compare equal keep
//! their natural index order.

use std::{cmp::Ordering, fmt, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};

/// A total order over layout magnitudes.
///
/// Cloning is cheap; the comparator is shared.
#[derive(Clone)]
pub struct ValueOrder {
    compare: Arc<dyn Fn(f64, f64) -> Ordering + Send + Sync>,
}

impl ValueOrder {
    /// Wraps an arbitrary comparator.
    pub fn new<F>(compare: F) -> Self
    where
        F: Fn(f64, f64) -> Ordering + Send + Sync + 'static,
    {
        Self {
            compare: Arc::new(compare),
        }
    }

    /// Smallest magnitudes first.
    pub fn ascending() -> Self {
        Self::new(|a, b| a.total_cmp(&b))
    }

    /// Largest magnitudes first.
    pub fn descending() -> Self {
        Self::new(|a, b| b.total_cmp(&a))
    }

    /// Compares two magnitudes.
    pub fn compare(&self, a: f64, b: f64) -> Ordering {
        (self.compare)(a, b)
    }
}

impl fmt::Debug for ValueOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueOrder").finish_non_exhaustive()
    }
}

impl From<SortOrder> for ValueOrder {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Ascending => Self::ascending(),
            SortOrder::Descending => Self::descending(),
        }
    }
}

/// Named sort directions usable from configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascending" | "asc" => Ok(Self::Ascending),
            "descending" | "desc" => Ok(Self::Descending),
            _ => Err(format!(
                "invalid sort order `{s}`, valid values: ascending, descending"
            )),
        }
    }
}

/// Returns `0..len` stably sorted by `key` under `order`, or in natural
/// order when no comparator is set.
pub(crate) fn sorted_indices<K>(len: usize, order: Option<&ValueOrder>, key: K) -> Vec<usize>
where
    K: Fn(usize) -> f64,
{
    let mut indices: Vec<usize> = (0..len).collect();
    if let Some(order) = order {
        indices.sort_by(|&a, &b| order.compare(key(a), key(b)));
    }
    indices
}
