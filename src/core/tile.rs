//! Tile-rank codec: the mapping between the rank stored in a board cell and
//! the number printed on the tile.
//!
//! Boards never store displayed values. Moves operate purely on ranks and the
//! codec is consulted only for scoring and rendering.
//!
//! ## Sequences
//!
//! - **Fibonacci** (2584 game): `0, 1, 2, 3, 5, 8, 13, ...`
//! - **Power of two** (classic 2048): `0, 2, 4, 8, 16, ...`
//!
//! ```
//! use rust_2584::core::Codec;
//!
//! assert_eq!(Codec::Fibonacci.displayed_value(4), 5);
//! assert_eq!(Codec::PowerOfTwo.displayed_value(11), 2048);
//! assert_eq!(Codec::Fibonacci.rank_of(2584), Some(17));
//! ```

use serde::{Deserialize, Serialize};

/// Highest rank covered by the lookup tables.
pub const MAX_RANK: u8 = 32;

const TABLE_LEN: usize = MAX_RANK as usize + 1;

static FIBONACCI: [u64; TABLE_LEN] = fibonacci_table();
static POWER_OF_TWO: [u64; TABLE_LEN] = power_of_two_table();

const fn fibonacci_table() -> [u64; TABLE_LEN] {
    let mut table = [0u64; TABLE_LEN];
    table[1] = 1;
    table[2] = 2;
    let mut rank = 3;
    while rank < TABLE_LEN {
        table[rank] = table[rank - 1] + table[rank - 2];
        rank += 1;
    }
    table
}

const fn power_of_two_table() -> [u64; TABLE_LEN] {
    let mut table = [0u64; TABLE_LEN];
    let mut rank = 1;
    while rank < TABLE_LEN {
        table[rank] = 1 << rank;
        rank += 1;
    }
    table
}

/// Which displayed-value sequence a game uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Codec {
    /// `f(0)=0, f(1)=1, f(2)=2, f(n)=f(n-1)+f(n-2)`.
    #[default]
    Fibonacci,
    /// `f(0)=0, f(n)=2^n`.
    PowerOfTwo,
}

impl Codec {
    /// The lookup table for ranks `0..=MAX_RANK`.
    #[must_use]
    pub fn table(self) -> &'static [u64] {
        match self {
            Codec::Fibonacci => &FIBONACCI,
            Codec::PowerOfTwo => &POWER_OF_TWO,
        }
    }

    /// Displayed value of a rank.
    ///
    /// Ranks above `MAX_RANK` continue the closed form, saturating at
    /// `u64::MAX`, so the function is total over `u8`.
    #[must_use]
    pub fn displayed_value(self, rank: u8) -> u64 {
        if let Some(&value) = self.table().get(usize::from(rank)) {
            return value;
        }
        match self {
            Codec::Fibonacci => {
                let (mut prev, mut curr) = (FIBONACCI[TABLE_LEN - 2], FIBONACCI[TABLE_LEN - 1]);
                for _ in MAX_RANK..rank {
                    (prev, curr) = (curr, prev.saturating_add(curr));
                }
                curr
            }
            Codec::PowerOfTwo => 1u64.checked_shl(u32::from(rank)).unwrap_or(u64::MAX),
        }
    }

    /// Rank whose displayed value is `value`, if `value` belongs to the
    /// sequence within `0..=MAX_RANK`.
    #[must_use]
    pub fn rank_of(self, value: u64) -> Option<u8> {
        // Both tables are strictly increasing.
        self.table()
            .binary_search(&value)
            .ok()
            .and_then(|rank| u8::try_from(rank).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fibonacci_prefix() {
        let expected = [0, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144];
        for (rank, &value) in expected.iter().enumerate() {
            assert_eq!(Codec::Fibonacci.displayed_value(rank as u8), value);
        }
    }

    #[test]
    fn test_fibonacci_last_table_entry() {
        assert_eq!(Codec::Fibonacci.displayed_value(MAX_RANK), 3_524_578);
        assert_eq!(Codec::Fibonacci.displayed_value(17), 2584);
    }

    #[test]
    fn test_power_of_two_prefix() {
        assert_eq!(Codec::PowerOfTwo.displayed_value(0), 0);
        assert_eq!(Codec::PowerOfTwo.displayed_value(1), 2);
        assert_eq!(Codec::PowerOfTwo.displayed_value(2), 4);
        assert_eq!(Codec::PowerOfTwo.displayed_value(11), 2048);
        assert_eq!(Codec::PowerOfTwo.displayed_value(MAX_RANK), 1 << 32);
    }

    #[test]
    fn test_round_trip_all_ranks() {
        for codec in [Codec::Fibonacci, Codec::PowerOfTwo] {
            for rank in 0..=MAX_RANK {
                assert_eq!(codec.rank_of(codec.displayed_value(rank)), Some(rank));
            }
        }
    }

    #[test]
    fn test_closed_form_matches_recurrence() {
        // Recompute without the table.
        let (mut a, mut b) = (1u64, 2u64);
        for rank in 3..=MAX_RANK {
            (a, b) = (b, a + b);
            assert_eq!(Codec::Fibonacci.displayed_value(rank), b);
        }
    }

    #[test]
    fn test_beyond_table_continues_sequence() {
        let f31 = Codec::Fibonacci.displayed_value(31);
        let f32 = Codec::Fibonacci.displayed_value(32);
        assert_eq!(Codec::Fibonacci.displayed_value(33), f31 + f32);
        assert_eq!(Codec::PowerOfTwo.displayed_value(40), 1 << 40);
        assert_eq!(Codec::PowerOfTwo.displayed_value(200), u64::MAX);
        assert_eq!(Codec::Fibonacci.displayed_value(255), u64::MAX);
    }

    #[test]
    fn test_rank_of_rejects_non_members() {
        assert_eq!(Codec::Fibonacci.rank_of(4), None);
        assert_eq!(Codec::Fibonacci.rank_of(3), Some(3));
        assert_eq!(Codec::PowerOfTwo.rank_of(3), None);
        assert_eq!(Codec::PowerOfTwo.rank_of(1), None);
        assert_eq!(Codec::PowerOfTwo.rank_of(0), Some(0));
    }

    #[test]
    fn test_default_is_fibonacci() {
        assert_eq!(Codec::default(), Codec::Fibonacci);
    }
}
