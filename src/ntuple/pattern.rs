//! Tuple shapes and the packed weight-table index.
//!
//! A tuple shape is a fixed list of cells. Reading those cells from a board
//! gives a short sequence of ranks; the sequence is canonicalized according
//! to the shape's [`Policy`] and then packed in mixed radix:
//!
//! ```text
//! index = ((r0 * A + r1) * A + r2) * A + ...
//! ```
//!
//! where `A` is the alphabet size (number of distinct ranks a table can
//! hold). Canonicalization lets two cell orderings that are mirror images of
//! each other share one table entry.
//!
//! ```
//! use rust_2584::core::Board;
//! use rust_2584::ntuple::TupleShape;
//!
//! let a = Board::from_ranks([[1, 2, 3, 4], [0; 4], [0; 4], [0; 4]]);
//! let b = Board::from_ranks([[4, 3, 2, 1], [0; 4], [0; 4], [0; 4]]);
//! let row = TupleShape::OUTER_ROW;
//! assert_eq!(row.pack(&a, 16), row.pack(&b, 16));
//! ```

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Board;

/// Longest supported tuple.
pub const MAX_TUPLE_LEN: usize = 6;

/// Ranks read from a tuple's cells.
pub type TupleValues = SmallVec<[u8; MAX_TUPLE_LEN]>;

/// How a tuple's values are ordered before packing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
    /// Encode the larger of the sequence and its reverse. For four cells
    /// this compares `a[0]` with `a[3]`, then `a[1]` with `a[2]`.
    Reversible,
    /// Encode as read.
    Forward,
    /// Cells form consecutive pairs `(a,b) (c,d) (e,f)`. Encode the larger of
    /// the sequence and `(b,a,d,c,f,e)`, deciding on the first unequal pair.
    PairSwap,
}

impl Policy {
    /// Reorder `values` in place into canonical form.
    pub fn canonicalize(self, values: &mut [u8]) {
        match self {
            Policy::Forward => {}
            Policy::Reversible => {
                if values.iter().rev().cmp(values.iter()) == Ordering::Greater {
                    values.reverse();
                }
            }
            Policy::PairSwap => {
                let swapped_larger = values
                    .chunks_exact(2)
                    .map(|pair| pair[1].cmp(&pair[0]))
                    .find(|ordering| ordering.is_ne())
                    == Some(Ordering::Greater);
                if swapped_larger {
                    for pair in values.chunks_exact_mut(2) {
                        pair.swap(0, 1);
                    }
                }
            }
        }
    }
}

/// A named pattern of board cells with its canonicalization policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TupleShape {
    pub name: &'static str,
    pub cells: &'static [usize],
    pub policy: Policy,
}

impl TupleShape {
    /// Top row.
    pub const OUTER_ROW: TupleShape = TupleShape::new("outer-row", &[0, 1, 2, 3], Policy::Reversible);
    /// Second row.
    pub const INNER_ROW: TupleShape = TupleShape::new("inner-row", &[4, 5, 6, 7], Policy::Reversible);
    /// Top row plus the first two cells of the second row.
    pub const OUTER_AXE: TupleShape = TupleShape::new("outer-axe", &[0, 1, 2, 3, 4, 5], Policy::Forward);
    /// Second row plus the first two cells of the third row.
    pub const INNER_AXE: TupleShape = TupleShape::new("inner-axe", &[4, 5, 6, 7, 8, 9], Policy::Forward);
    /// 3×2 block against the left edge.
    pub const OUTER_SIX: TupleShape = TupleShape::new("outer-six", &[0, 1, 4, 5, 8, 9], Policy::Forward);
    /// 3×2 block in the middle columns; a horizontal mirror maps it onto
    /// itself, pair by pair.
    pub const INNER_SIX: TupleShape = TupleShape::new("inner-six", &[1, 2, 5, 6, 9, 10], Policy::PairSwap);

    /// Create a shape. `cells` must be 1 to `MAX_TUPLE_LEN` flat indices in
    /// `0..16`; `PairSwap` needs an even count.
    #[must_use]
    pub const fn new(name: &'static str, cells: &'static [usize], policy: Policy) -> Self {
        assert!(!cells.is_empty() && cells.len() <= MAX_TUPLE_LEN, "tuple must have 1 to 6 cells");
        assert!(
            !matches!(policy, Policy::PairSwap) || cells.len() % 2 == 0,
            "pair-swap tuples need an even number of cells"
        );
        let mut i = 0;
        while i < cells.len() {
            assert!(cells[i] < 16, "tuple cell out of range");
            i += 1;
        }
        Self { name, cells, policy }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Entries needed for this shape: `alphabet ^ len`, or `None` if that
    /// overflows `usize`.
    #[must_use]
    pub fn table_size(&self, alphabet: usize) -> Option<usize> {
        u32::try_from(self.cells.len())
            .ok()
            .and_then(|len| alphabet.checked_pow(len))
    }

    /// Ranks at this shape's cells, canonicalized.
    #[must_use]
    pub fn read(&self, board: &Board) -> TupleValues {
        let mut values: TupleValues = self.cells.iter().map(|&cell| board.get(cell)).collect();
        self.policy.canonicalize(&mut values);
        values
    }

    /// Packed table index for `board`, or `None` if some rank does not fit
    /// in `alphabet`.
    #[must_use]
    pub fn pack(&self, board: &Board, alphabet: usize) -> Option<usize> {
        pack_values(&self.read(board), alphabet)
    }
}

/// Mixed-radix packing. `None` when a value is `>= alphabet`.
#[must_use]
pub fn pack_values(values: &[u8], alphabet: usize) -> Option<usize> {
    values.iter().try_fold(0usize, |index, &rank| {
        let rank = usize::from(rank);
        (rank < alphabet).then(|| index * alphabet + rank)
    })
}
