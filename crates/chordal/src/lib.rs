//! Chordal - angular layout for chord diagrams.
//!
//! Given weighted relationships between `n` groups, the engine splits a full
//! turn into one arc per group and one pair of slices per relationship, each
//! proportional to its weight. The crate only computes angles in radians;
//! radii, paths and colors belong to the renderer.
//!
//! - **Input**: a dense [`WeightMatrix`](input::WeightMatrix) or a list of
//!   [`Relationship`](input::Relationship)s ([`input`] module)
//! - **Engine**: the cached [`ChordLayout`]
//! - **Results**: [`GroupArc`](layout::GroupArc), [`Chord`](layout::Chord)
//!   and [`Subgroup`](layout::Subgroup) ([`layout`] module)
//! - **Ordering**: [`ValueOrder`](order::ValueOrder) comparators ([`order`] module)
//! - **Configuration**: file-loadable [`LayoutConfig`](config::LayoutConfig)
//!
//! # Example
//!
//! ```
//! use chordal::{ChordLayout, input::Relationship};
//!
//! let mut chord = ChordLayout::new();
//! chord
//!     .set_padding(0.05)?
//!     .set_relationships(vec![
//!         Relationship::new(0, 1, 3.0),
//!         Relationship::new(1, 2, 1.0),
//!         Relationship::new(2, 2, 2.0),
//!     ])?;
//!
//! for group in chord.groups()? {
//!     println!("group {} spans {:.3} rad", group.index(), group.span());
//! }
//! assert_eq!(chord.chords()?.len(), 3);
//! # Ok::<(), chordal::ChordError>(())
//! ```

pub mod config;
pub mod input;
pub mod layout;
pub mod order;

mod engine;
mod error;

pub use engine::ChordLayout;
pub use error::ChordError;
