//! The cached chord layout engine.
//!
//! [`ChordLayout`] stores the active input and configuration and computes the
//! [`Layout`] lazily: setters mark the cache stale, and the next call to an
//! accessor recomputes it through [`ChordLayout::layout`].

use log::{debug, trace};

use crate::{
    config::LayoutConfig,
    error::ChordError,
    input::{Input, Relationship, WeightMatrix},
    layout::{Chord, GroupArc, Layout, LayoutParams, dense, sparse},
    order::ValueOrder,
};

/// Computes and caches the angular layout of a chord diagram.
///
/// # Examples
///
/// ```
/// use chordal::ChordLayout;
///
/// let mut chord = ChordLayout::new();
/// chord.set_matrix(vec![vec![0.0, 2.0], vec![1.0, 0.0]])?;
///
/// let chords = chord.chords()?;
/// assert_eq!(chords.len(), 1);
/// assert_eq!(chords[0].source().value(), 2.0);
/// # Ok::<(), chordal::ChordError>(())
/// ```
#[derive(Debug, Default)]
pub struct ChordLayout {
    input: Option<Input>,
    group_count: usize,
    padding: f64,
    sort_groups: Option<ValueOrder>,
    sort_subgroups: Option<ValueOrder>,
    sort_chords: Option<ValueOrder>,
    /// The computed layout; `None` while stale.
    cache: Option<Layout>,
}

impl ChordLayout {
    /// Creates an engine with no input, no padding and natural ordering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ChordError::InvalidPadding`] if the configured padding is
    /// negative or not finite.
    pub fn from_config(config: &LayoutConfig) -> Result<Self, ChordError> {
        let mut engine = Self::new();
        engine
            .set_padding(config.padding())?
            .set_sort_groups(config.sort_groups().map(ValueOrder::from))
            .set_sort_subgroups(config.sort_subgroups().map(ValueOrder::from))
            .set_sort_chords(config.sort_chords().map(ValueOrder::from));
        Ok(engine)
    }

    /// Replaces the active input.
    ///
    /// # Errors
    ///
    /// Returns [`ChordError::InvalidRelationshipWeight`] if a relationship
    /// carries a negative or non-finite value.
    pub fn set_input(&mut self, input: Input) -> Result<&mut Self, ChordError> {
        match input {
            Input::Matrix(matrix) => Ok(self.set_weight_matrix(matrix)),
            Input::Relationships(list) => self.set_relationships(list),
        }
    }

    /// Removes the active input; the next layout is empty.
    pub fn clear_input(&mut self) -> &mut Self {
        self.input = None;
        self.group_count = 0;
        self.invalidate()
    }

    /// Lays out a dense matrix given as rows, replacing the active input.
    ///
    /// An empty matrix clears the input.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is not square or holds a negative or
    /// non-finite weight. The engine is left unchanged in that case.
    pub fn set_matrix(&mut self, rows: Vec<Vec<f64>>) -> Result<&mut Self, ChordError> {
        let matrix = WeightMatrix::new(rows)?;
        Ok(self.set_weight_matrix(matrix))
    }

    /// Lays out an already validated matrix, replacing the active input.
    pub fn set_weight_matrix(&mut self, matrix: WeightMatrix) -> &mut Self {
        if matrix.is_empty() {
            return self.clear_input();
        }

        debug!(groups = matrix.size(); "Setting weight matrix");
        self.group_count = matrix.size();
        self.input = Some(Input::Matrix(matrix));
        self.invalidate()
    }

    /// Lays out a list of relationships, replacing the active input.
    ///
    /// The group count only ever grows: it becomes the larger of its current
    /// value and the count the relationships require.
    ///
    /// # Errors
    ///
    /// Returns [`ChordError::InvalidRelationshipWeight`] for a negative or
    /// non-finite value. The engine is left unchanged in that case.
    pub fn set_relationships(
        &mut self,
        relationships: Vec<Relationship>,
    ) -> Result<&mut Self, ChordError> {
        let count = relationships.len();
        let input = Input::relationships(relationships)?;

        self.group_count = self.group_count.max(input.group_count());
        debug!(
            groups = self.group_count,
            relationships = count;
            "Setting relationships"
        );
        self.input = Some(input);
        Ok(self.invalidate())
    }

    /// Appends one relationship.
    ///
    /// If the active input is a matrix, it is replaced by a relationship list
    /// holding only the new entry.
    ///
    /// # Errors
    ///
    /// Returns [`ChordError::InvalidRelationshipWeight`] for a negative or
    /// non-finite value.
    pub fn add_relationship(
        &mut self,
        source: usize,
        target: usize,
        value: f64,
    ) -> Result<&mut Self, ChordError> {
        let relationship = Relationship::new(source, target, value);
        relationship.validate()?;

        match &mut self.input {
            Some(Input::Relationships(list)) => list.push(relationship),
            input => {
                if matches!(input, Some(Input::Matrix(_))) {
                    debug!("Replacing matrix input with relationship list");
                }
                *input = Some(Input::Relationships(vec![relationship]));
            }
        }
        self.group_count = self.group_count.max(relationship.required_groups());
        trace!(from = source, to = target, value; "Added relationship");

        Ok(self.invalidate())
    }

    /// Sets the gap, in radians, after each non-empty group arc.
    ///
    /// # Errors
    ///
    /// Returns [`ChordError::InvalidPadding`] if `radians` is negative or not
    /// finite.
    pub fn set_padding(&mut self, radians: f64) -> Result<&mut Self, ChordError> {
        if !radians.is_finite() || radians < 0.0 {
            return Err(ChordError::InvalidPadding(radians));
        }
        self.padding = radians;
        Ok(self.invalidate())
    }

    /// Sets the order of groups around the circle, compared by group sum.
    pub fn set_sort_groups(&mut self, order: Option<ValueOrder>) -> &mut Self {
        self.sort_groups = order;
        self.invalidate()
    }

    /// Sets the order of slices within each group, compared by slice value.
    pub fn set_sort_subgroups(&mut self, order: Option<ValueOrder>) -> &mut Self {
        self.sort_subgroups = order;
        self.invalidate()
    }

    /// Sets the order of the chord list, compared by mean endpoint value.
    ///
    /// A computed layout is re-sorted in place. Clearing the order marks the
    /// layout stale so the next read restores the natural chord order.
    pub fn set_sort_chords(&mut self, order: Option<ValueOrder>) -> &mut Self {
        self.sort_chords = order;
        if let Some(layout) = &mut self.cache {
            match &self.sort_chords {
                Some(order) => {
                    trace!("Re-sorting cached chords");
                    layout.sort_chords(order);
                }
                None => return self.invalidate(),
            }
        }
        self
    }

    /// Returns the active input, if any.
    pub fn input(&self) -> Option<&Input> {
        self.input.as_ref()
    }

    /// Returns the number of groups in the index space.
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Returns the padding in radians.
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Returns `true` if a computed layout is cached.
    pub fn is_fresh(&self) -> bool {
        self.cache.is_some()
    }

    /// Returns the group arcs, computing the layout if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ChordError::PaddingExceedsCircle`] if the padding leaves no
    /// room for the groups.
    pub fn groups(&mut self) -> Result<&[GroupArc], ChordError> {
        Ok(self.layout()?.groups())
    }

    /// Returns the chords, computing the layout if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ChordError::PaddingExceedsCircle`] if the padding leaves no
    /// room for the groups.
    pub fn chords(&mut self) -> Result<&[Chord], ChordError> {
        Ok(self.layout()?.chords())
    }

    /// Returns the full layout, computing it if the cache is stale.
    ///
    /// # Errors
    ///
    /// Returns [`ChordError::PaddingExceedsCircle`] if the padding leaves no
    /// room for the groups. The cache stays stale in that case.
    pub fn layout(&mut self) -> Result<&Layout, ChordError> {
        let layout = match self.cache.take() {
            Some(layout) => layout,
            None => self.relayout()?,
        };
        let layout: &Layout = self.cache.insert(layout);
        Ok(layout)
    }

    /// Consumes the cached layout, computing it first if needed. The cache
    /// is stale afterwards.
    ///
    /// # Errors
    ///
    /// See [`ChordLayout::layout`].
    pub fn take_layout(&mut self) -> Result<Layout, ChordError> {
        match self.cache.take() {
            Some(layout) => Ok(layout),
            None => self.relayout(),
        }
    }

    fn invalidate(&mut self) -> &mut Self {
        self.cache = None;
        self
    }

    fn relayout(&self) -> Result<Layout, ChordError> {
        let params = LayoutParams {
            padding: self.padding,
            sort_groups: self.sort_groups.as_ref(),
            sort_subgroups: self.sort_subgroups.as_ref(),
        };

        let mut layout = match &self.input {
            None => {
                debug!("No input set, producing empty layout");
                Layout::default()
            }
            Some(Input::Matrix(matrix)) => dense::layout(matrix, &params)?,
            Some(Input::Relationships(list)) => sparse::layout(list, &params)?,
        };

        if let Some(order) = &self.sort_chords {
            layout.sort_chords(order);
        }

        Ok(layout)
    }
}
