//! Which tuples the network reads from a board, and in which orientations.
//!
//! A `SamplingPlan` declares one [`TupleShape`] per weight table and a list
//! of [`Sample`]s. Each sample reads its table's shape from the board after
//! transforming the board by the sample's [`Symmetry`]. Several samples
//! normally share a table: the outer row read under each of the 4 rotations
//! visits all four border lines with the same weights.

use crate::core::{Board, PlanPreset, Symmetry};

use super::pattern::TupleShape;

/// Orientations a table is sampled under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymmetrySet {
    /// The 4 rotations.
    Rotations,
    /// Rotations and their horizontal reflections.
    All,
}

impl SymmetrySet {
    #[must_use]
    pub fn symmetries(self) -> &'static [Symmetry] {
        match self {
            SymmetrySet::Rotations => &Symmetry::ROTATIONS,
            SymmetrySet::All => &Symmetry::ALL,
        }
    }
}

/// One lookup: read table `table`'s shape from the board in `symmetry`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Sample {
    pub table: usize,
    pub symmetry: Symmetry,
}

/// Tables and the samples that address them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SamplingPlan {
    shapes: Vec<TupleShape>,
    samples: Vec<Sample>,
}

impl SamplingPlan {
    /// An empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a table for `shape`, sampled under every symmetry in `set`.
    /// Returns the table id.
    pub fn add_table(&mut self, shape: TupleShape, set: SymmetrySet) -> usize {
        let table = self.declare_table(shape);
        for &symmetry in set.symmetries() {
            self.samples.push(Sample { table, symmetry });
        }
        table
    }

    /// Declare a table with no samples yet; add them with
    /// [`SamplingPlan::add_sample`].
    pub fn declare_table(&mut self, shape: TupleShape) -> usize {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    /// Add one more lookup into an existing table.
    pub fn add_sample(&mut self, table: usize, symmetry: Symmetry) {
        assert!(table < self.shapes.len(), "sample refers to undeclared table {table}");
        self.samples.push(Sample { table, symmetry });
    }

    /// Builder form of [`SamplingPlan::add_table`].
    #[must_use]
    pub fn with_table(mut self, shape: TupleShape, set: SymmetrySet) -> Self {
        self.add_table(shape, set);
        self
    }

    /// Outer and inner rows, 4 rotations each: 8 samples over 2 tables.
    ///
    /// The row policy already folds reflections, so rotations cover every
    /// line on the board exactly once.
    pub fn rows() -> Self {
        Self::new()
            .with_table(TupleShape::OUTER_ROW, SymmetrySet::Rotations)
            .with_table(TupleShape::INNER_ROW, SymmetrySet::Rotations)
    }

    /// Rows plus outer and inner axes under all 8 symmetries: 24 samples.
    pub fn rows_and_axes() -> Self {
        Self::rows()
            .with_table(TupleShape::OUTER_AXE, SymmetrySet::All)
            .with_table(TupleShape::INNER_AXE, SymmetrySet::All)
    }

    /// Rows plus the six-cell blocks: 20 samples.
    ///
    /// The inner block folds its own mirror image, so it only needs the
    /// rotations.
    pub fn rows_and_sixes() -> Self {
        Self::rows()
            .with_table(TupleShape::OUTER_SIX, SymmetrySet::All)
            .with_table(TupleShape::INNER_SIX, SymmetrySet::Rotations)
    }

    /// Rows, axes and blocks: 36 samples over 6 tables.
    pub fn full() -> Self {
        Self::rows_and_axes()
            .with_table(TupleShape::OUTER_SIX, SymmetrySet::All)
            .with_table(TupleShape::INNER_SIX, SymmetrySet::Rotations)
    }

    pub fn from_preset(preset: PlanPreset) -> Self {
        match preset {
            PlanPreset::Rows => Self::rows(),
            PlanPreset::RowsAndAxes => Self::rows_and_axes(),
            PlanPreset::RowsAndSixes => Self::rows_and_sixes(),
            PlanPreset::Full => Self::full(),
        }
    }

    /// Shape of each table, by table id.
    #[must_use]
    pub fn shapes(&self) -> &[TupleShape] {
        &self.shapes
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn table_count(&self) -> usize {
        self.shapes.len()
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// `(table, packed index)` for every sample, in declaration order. The
    /// index is `None` when a rank does not fit in `alphabet`.
    pub fn indices<'a>(
        &'a self,
        board: &Board,
        alphabet: usize,
    ) -> impl Iterator<Item = (usize, Option<usize>)> + 'a {
        let oriented = Symmetry::ALL.map(|symmetry| board.transformed(symmetry));
        self.samples.iter().map(move |sample| {
            let view = &oriented[sample.symmetry.index()];
            (sample.table, self.shapes[sample.table].pack(view, alphabet))
        })
    }
}
