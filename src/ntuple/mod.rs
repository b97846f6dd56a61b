//! N-tuple network value function.
//!
//! ## Overview
//!
//! - **Pattern**: `TupleShape` and its canonicalization `Policy`, mixed-radix
//!   packing of the ranks a shape reads
//! - **Sampling**: `SamplingPlan`, the (table, shape, symmetry) lookups made
//!   for each board
//! - **Network**: `NTupleNetwork` with `value` and `update`
//! - **Persistence**: binary weight files
//!
//! ## Usage
//!
//! ```
//! use rust_2584::core::Board;
//! use rust_2584::ntuple::{NTupleNetwork, SamplingPlan};
//!
//! let mut network = NTupleNetwork::new(SamplingPlan::rows(), 16);
//! let board = Board::from_ranks([[1, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
//!
//! assert_eq!(network.value(&board), 0.0);
//! let refreshed = network.update(&board, 0.1);
//! assert!(refreshed > 0.0);
//! ```

pub mod pattern;
pub mod sampling;
pub mod network;
pub mod persist;

pub use pattern::{pack_values, Policy, TupleShape, TupleValues, MAX_TUPLE_LEN};
pub use sampling::{Sample, SamplingPlan, SymmetrySet};
pub use network::{NTupleNetwork, WeightTable};
pub use persist::{read_tables, write_tables};
