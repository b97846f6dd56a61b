//! The n-tuple network: weight tables addressed through a sampling plan.
//!
//! The value of a board is the sum, over every sample in the plan, of the
//! weight its packed index selects. There is no other parameter.
//!
//! ## Skipped samples
//!
//! A rank that does not fit the table alphabet cannot be packed. Such a
//! sample contributes nothing to `value` and receives nothing in `update`.
//! This is counted (see [`NTupleNetwork::skipped_samples`]) and logged, never
//! treated as an error: a long game can legitimately grow a tile larger than
//! the tables were sized for.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::core::Board;
use crate::error::ConfigError;

use super::sampling::SamplingPlan;

/// Dense weights for one tuple shape, indexed by packed index.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightTable {
    weights: Vec<f32>,
}

impl WeightTable {
    /// A zero-filled table.
    pub fn zeros(len: usize) -> Self {
        Self {
            weights: vec![0.0; len],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.weights.get(index).copied()
    }

    /// Add `delta` at `index`. Returns `false` if out of range.
    pub fn add(&mut self, index: usize, delta: f32) -> bool {
        match self.weights.get_mut(index) {
            Some(weight) => {
                *weight += delta;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.weights
    }

    /// Entries that are not exactly zero.
    #[must_use]
    pub fn nonzero(&self) -> usize {
        self.weights.iter().filter(|&&w| w != 0.0).count()
    }
}

impl From<Vec<f32>> for WeightTable {
    fn from(weights: Vec<f32>) -> Self {
        Self { weights }
    }
}

/// Table-based value function over boards.
#[derive(Debug)]
pub struct NTupleNetwork {
    plan: SamplingPlan,
    alphabet: usize,
    tables: Vec<WeightTable>,
    skipped: AtomicU64,
}

impl NTupleNetwork {
    /// Zero-initialized tables for `plan`, each sized `alphabet ^ len`.
    ///
    /// # Panics
    ///
    /// If a table size overflows `usize`. Use [`NTupleNetwork::try_new`] to
    /// get an error instead.
    pub fn new(plan: SamplingPlan, alphabet: usize) -> Self {
        match Self::try_new(plan, alphabet) {
            Ok(network) => network,
            Err(err) => panic!("{err}"),
        }
    }

    /// Like [`NTupleNetwork::new`], but rejects an alphabet whose tables
    /// cannot be addressed.
    pub fn try_new(plan: SamplingPlan, alphabet: usize) -> Result<Self, ConfigError> {
        // Size every table before allocating any of them.
        let sizes = plan
            .shapes()
            .iter()
            .map(|shape| {
                shape.table_size(alphabet).ok_or_else(|| {
                    ConfigError::Validation(format!(
                        "alphabet {alphabet} is too large for the {}-cell {} table",
                        shape.len(),
                        shape.name
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let tables = sizes.into_iter().map(WeightTable::zeros).collect();

        Ok(Self {
            plan,
            alphabet,
            tables,
            skipped: AtomicU64::new(0),
        })
    }

    #[must_use]
    pub fn plan(&self) -> &SamplingPlan {
        &self.plan
    }

    #[must_use]
    pub fn alphabet(&self) -> usize {
        self.alphabet
    }

    #[must_use]
    pub fn tables(&self) -> &[WeightTable] {
        &self.tables
    }

    #[must_use]
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Samples skipped so far because a rank exceeded the alphabet.
    #[must_use]
    pub fn skipped_samples(&self) -> u64 {
        self.skipped.load(Ordering::Relaxed)
    }

    /// Estimated value of `board`.
    #[must_use]
    pub fn value(&self, board: &Board) -> f32 {
        let mut sum = 0.0;
        for (table, index) in self.plan.indices(board, self.alphabet) {
            match index.and_then(|index| self.tables[table].get(index)) {
                Some(weight) => sum += weight,
                None => note_skipped(&self.skipped, table, board),
            }
        }
        sum
    }

    /// Add `delta` to every weight `board` samples, then return `value(board)`
    /// as it stands after all the additions.
    ///
    /// A weight reached by `k` samples receives `k * delta` and is then
    /// counted `k` times in the returned value.
    pub fn update(&mut self, board: &Board, delta: f32) -> f32 {
        for (table, index) in self.plan.indices(board, self.alphabet) {
            let applied = index.is_some_and(|index| self.tables[table].add(index, delta));
            if !applied {
                note_skipped(&self.skipped, table, board);
            }
        }
        self.lookup(board)
    }

    /// Sum of the weights `board` samples, with skipped samples left uncounted.
    fn lookup(&self, board: &Board) -> f32 {
        self.plan
            .indices(board, self.alphabet)
            .filter_map(|(table, index)| index.and_then(|index| self.tables[table].get(index)))
            .sum()
    }

    /// Replace every table at once. The caller has already checked the
    /// count and sizes.
    pub(crate) fn replace_tables(&mut self, tables: Vec<WeightTable>) {
        debug_assert_eq!(tables.len(), self.tables.len());
        self.tables = tables;
    }
}

fn note_skipped(counter: &AtomicU64, table: usize, board: &Board) {
    if counter.fetch_add(1, Ordering::Relaxed) == 0 {
        log::warn!(
            "tile rank {} exceeds the table alphabet (table {table}); skipping such samples",
            board.max_rank()
        );
    } else {
        log::trace!("skipped sample in table {table}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Symmetry;
    use crate::ntuple::{SymmetrySet, TupleShape};

    fn identity_plan() -> SamplingPlan {
        let mut plan = SamplingPlan::new();
        let table = plan.declare_table(TupleShape::OUTER_ROW);
        plan.add_sample(table, Symmetry::IDENTITY);
        plan
    }

    #[test]
    fn test_new_allocates_zero_tables() {
        let network = NTupleNetwork::new(SamplingPlan::rows(), 16);
        assert_eq!(network.table_count(), 2);
        assert!(network.tables().iter().all(|t| t.len() == 65_536));
        assert!(network.tables().iter().all(|t| t.nonzero() == 0));
        assert_eq!(network.value(&Board::default()), 0.0);
    }

    #[test]
    fn test_update_single_sample() {
        let mut network = NTupleNetwork::new(identity_plan(), 16);
        let board = Board::from_ranks([[1, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);

        let refreshed = network.update(&board, 0.5);
        assert_eq!(refreshed, 0.5);
        assert_eq!(network.value(&board), 0.5);
        assert_eq!(network.tables()[0].nonzero(), 1);
    }

    #[test]
    fn test_update_counts_shared_entries_repeatedly() {
        // An empty board hits the all-zero entry from all 4 rotations.
        let plan = SamplingPlan::new().with_table(TupleShape::OUTER_ROW, SymmetrySet::Rotations);
        let mut network = NTupleNetwork::new(plan, 16);
        let refreshed = network.update(&Board::default(), 1.0);

        assert_eq!(network.tables()[0].get(0), Some(4.0));
        assert_eq!(refreshed, 16.0);
    }

    #[test]
    fn test_out_of_alphabet_is_skipped() {
        let mut network = NTupleNetwork::new(identity_plan(), 4);
        let board = Board::from_ranks([[5, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);

        assert_eq!(network.value(&board), 0.0);
        assert_eq!(network.skipped_samples(), 1);

        assert_eq!(network.update(&board, 1.0), 0.0);
        assert_eq!(network.tables()[0].nonzero(), 0);
        // The refreshed value does not count the same sample again.
        assert_eq!(network.skipped_samples(), 2);
    }

    #[test]
    fn test_try_new_rejects_overflowing_alphabet() {
        // Six-cell tables overflow before anything is allocated.
        let err = NTupleNetwork::try_new(SamplingPlan::rows_and_sixes(), 1 << 11).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let network = NTupleNetwork::try_new(SamplingPlan::rows(), 4).unwrap();
        assert_eq!(network.tables()[0].len(), 256);
    }

    #[test]
    #[should_panic(expected = "too large")]
    fn test_new_panics_on_overflowing_alphabet() {
        let _ = NTupleNetwork::new(SamplingPlan::rows(), usize::MAX);
    }

    #[test]
    fn test_weight_table_add_out_of_range() {
        let mut table = WeightTable::zeros(3);
        assert!(table.add(2, 1.5));
        assert!(!table.add(3, 1.5));
        assert_eq!(table.as_slice(), &[0.0, 0.0, 1.5]);
    }

    #[test]
    fn test_weight_table_from_vec() {
        let table = WeightTable::from(vec![1.0, 0.0]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.nonzero(), 1);
        assert!(!table.is_empty());
    }
}
