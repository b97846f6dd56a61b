//! The 4×4 board: tile ranks, sliding, merging and the symmetry transforms.
//!
//! Cells hold ranks, not displayed values (see [`Codec`]). Cell indices:
//!
//! ```text
//!  (0)  (1)  (2)  (3)
//!  (4)  (5)  (6)  (7)
//!  (8)  (9) (10) (11)
//! (12) (13) (14) (15)
//! ```
//!
//! Every slide is computed as a single left slide of a reoriented board.
//!
//! ```
//! use rust_2584::core::{Board, Direction, Variant};
//!
//! let mut board = Board::from_ranks([
//!     [1, 1, 0, 0],
//!     [0, 0, 0, 0],
//!     [0, 0, 0, 0],
//!     [0, 0, 0, 0],
//! ]);
//! assert_eq!(board.slide(Direction::Left, Variant::Fibonacci), Some(2));
//! assert_eq!(board.row(0), [2, 0, 0, 0]);
//! assert_eq!(board.slide(Direction::Left, Variant::Fibonacci), None);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::tile::Codec;

/// Numeric stand-in for an illegal move, for callers that keep rewards as
/// signed integers. [`Board::slide`] itself returns `None`.
pub const ILLEGAL_REWARD: i64 = -1;

/// Number of cells on the board.
pub const CELLS: usize = 16;

/// Slide direction, in the order agents try them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    /// All directions in opcode order.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// Direction for an opcode in `0..4`.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Opcode of this direction.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        };
        f.write_str(name)
    }
}

/// When two adjacent tiles combine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MergeRule {
    /// 1 merges with 1; otherwise ranks one apart merge. Equal ranks above 1
    /// do not.
    Fibonacci,
    /// Equal non-zero ranks merge.
    Classic,
}

impl MergeRule {
    /// Whether ranks `a` and `b` combine.
    #[must_use]
    pub fn merges(self, a: u8, b: u8) -> bool {
        if a == 0 || b == 0 {
            return false;
        }
        match self {
            MergeRule::Fibonacci => (a == 1 && b == 1) || a.abs_diff(b) == 1,
            MergeRule::Classic => a == b,
        }
    }
}

/// Game variant: a merge rule paired with the codec used for scoring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Fibonacci tiles, adjacent-rank merges (the 2584 game).
    #[default]
    Fibonacci,
    /// Power-of-two tiles, equal-rank merges (classic 2048).
    Classic,
}

impl Variant {
    #[must_use]
    pub const fn merge_rule(self) -> MergeRule {
        match self {
            Variant::Fibonacci => MergeRule::Fibonacci,
            Variant::Classic => MergeRule::Classic,
        }
    }

    #[must_use]
    pub const fn codec(self) -> Codec {
        match self {
            Variant::Fibonacci => Codec::Fibonacci,
            Variant::Classic => Codec::PowerOfTwo,
        }
    }
}

/// One of the 8 orientations of the square: a clockwise rotation optionally
/// followed by a horizontal reflection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symmetry {
    /// Clockwise quarter turns, `0..4`.
    pub rotation: u8,
    /// Reflect horizontally after rotating.
    pub reflected: bool,
}

impl Symmetry {
    pub const IDENTITY: Symmetry = Symmetry::new(0, false);

    /// The 4 rotations.
    pub const ROTATIONS: [Symmetry; 4] = [
        Symmetry::new(0, false),
        Symmetry::new(1, false),
        Symmetry::new(2, false),
        Symmetry::new(3, false),
    ];

    /// All 8 orientations: each rotation, then its reflection.
    pub const ALL: [Symmetry; 8] = [
        Symmetry::new(0, false),
        Symmetry::new(1, false),
        Symmetry::new(2, false),
        Symmetry::new(3, false),
        Symmetry::new(0, true),
        Symmetry::new(1, true),
        Symmetry::new(2, true),
        Symmetry::new(3, true),
    ];

    #[must_use]
    pub const fn new(rotation: u8, reflected: bool) -> Self {
        Self {
            rotation: rotation % 4,
            reflected,
        }
    }

    /// Position of this symmetry in [`Symmetry::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        (self.rotation % 4) as usize + if self.reflected { 4 } else { 0 }
    }
}

/// A 4×4 grid of tile ranks. Rank 0 is an empty cell.
///
/// Ordering is lexicographic over the cells in row-major order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[u8; 4]; 4],
}

impl Board {
    /// Build a board from rows of ranks.
    #[must_use]
    pub const fn from_ranks(cells: [[u8; 4]; 4]) -> Self {
        Self { cells }
    }

    /// Rows of ranks.
    #[must_use]
    pub const fn ranks(&self) -> &[[u8; 4]; 4] {
        &self.cells
    }

    #[must_use]
    pub const fn row(&self, row: usize) -> [u8; 4] {
        self.cells[row]
    }

    /// Rank at flat cell index `0..16`.
    #[must_use]
    pub const fn get(&self, cell: usize) -> u8 {
        self.cells[cell / 4][cell % 4]
    }

    /// Set the rank at flat cell index `0..16`.
    pub fn set(&mut self, cell: usize, rank: u8) {
        self.cells[cell / 4][cell % 4] = rank;
    }

    /// Flat indices of empty cells, ascending.
    #[must_use]
    pub fn empty_cells(&self) -> SmallVec<[usize; CELLS]> {
        (0..CELLS).filter(|&cell| self.get(cell) == 0).collect()
    }

    #[must_use]
    pub fn count_empty(&self) -> usize {
        self.cells.iter().flatten().filter(|&&rank| rank == 0).count()
    }

    /// Largest rank on the board.
    #[must_use]
    pub fn max_rank(&self) -> u8 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Slide in `direction` under `variant`'s merge rule.
    ///
    /// Returns the reward (sum of displayed values of merged tiles), or `None`
    /// if nothing moved. An illegal slide leaves the board unchanged.
    pub fn slide(&mut self, direction: Direction, variant: Variant) -> Option<u64> {
        match direction {
            Direction::Left => self.slide_left(variant),
            Direction::Right => {
                self.reflect_horizontal();
                let reward = self.slide_left(variant);
                self.reflect_horizontal();
                reward
            }
            Direction::Up => {
                self.rotate_right();
                let reward = self.slide(Direction::Right, variant);
                self.rotate_left();
                reward
            }
            Direction::Down => {
                self.rotate_right();
                let reward = self.slide_left(variant);
                self.rotate_left();
                reward
            }
        }
    }

    /// [`Board::slide`] with an illegal move reported as [`ILLEGAL_REWARD`].
    pub fn slide_signed(&mut self, direction: Direction, variant: Variant) -> i64 {
        self.slide(direction, variant)
            .map_or(ILLEGAL_REWARD, |reward| i64::try_from(reward).unwrap_or(i64::MAX))
    }

    /// Copy of the board after sliding, with the reward, if legal.
    #[must_use]
    pub fn after(&self, direction: Direction, variant: Variant) -> Option<(Board, u64)> {
        let mut after = *self;
        after.slide(direction, variant).map(|reward| (after, reward))
    }

    /// Whether any direction is legal.
    #[must_use]
    pub fn can_move(&self, variant: Variant) -> bool {
        Direction::ALL
            .iter()
            .any(|&direction| self.after(direction, variant).is_some())
    }

    fn slide_left(&mut self, variant: Variant) -> Option<u64> {
        let rule = variant.merge_rule();
        let codec = variant.codec();
        let prev = *self;
        let mut reward = 0u64;

        for row in &mut self.cells {
            let mut top = 0;
            let mut hold = 0u8;
            for col in 0..4 {
                let tile = row[col];
                if tile == 0 {
                    continue;
                }
                row[col] = 0;
                if hold == 0 {
                    hold = tile;
                } else if rule.merges(tile, hold) {
                    let merged = tile.max(hold).saturating_add(1);
                    row[top] = merged;
                    top += 1;
                    reward = reward.saturating_add(codec.displayed_value(merged));
                    hold = 0;
                } else {
                    row[top] = hold;
                    top += 1;
                    hold = tile;
                }
            }
            if hold != 0 {
                row[top] = hold;
            }
        }

        (*self != prev).then_some(reward)
    }

    pub fn transpose(&mut self) {
        for r in 0..4 {
            for c in (r + 1)..4 {
                let tmp = self.cells[r][c];
                self.cells[r][c] = self.cells[c][r];
                self.cells[c][r] = tmp;
            }
        }
    }

    /// Mirror left-right.
    pub fn reflect_horizontal(&mut self) {
        for row in &mut self.cells {
            row.reverse();
        }
    }

    /// Mirror top-bottom.
    pub fn reflect_vertical(&mut self) {
        self.cells.reverse();
    }

    /// Clockwise quarter turn.
    pub fn rotate_right(&mut self) {
        self.transpose();
        self.reflect_horizontal();
    }

    /// Counter-clockwise quarter turn.
    pub fn rotate_left(&mut self) {
        self.transpose();
        self.reflect_vertical();
    }

    /// Half turn.
    pub fn reverse(&mut self) {
        self.reflect_horizontal();
        self.reflect_vertical();
    }

    /// Rotate clockwise by `turns` quarter turns (negative turns go
    /// counter-clockwise).
    pub fn rotate(&mut self, turns: i32) {
        match turns.rem_euclid(4) {
            1 => self.rotate_right(),
            2 => self.reverse(),
            3 => self.rotate_left(),
            _ => {}
        }
    }

    /// Copy of the board in the given orientation.
    #[must_use]
    pub fn transformed(&self, symmetry: Symmetry) -> Board {
        let mut board = *self;
        board.rotate(i32::from(symmetry.rotation));
        if symmetry.reflected {
            board.reflect_horizontal();
        }
        board
    }

    /// Display adaptor printing tile values under `codec`.
    #[must_use]
    pub fn view(&self, codec: Codec) -> BoardView<'_> {
        BoardView { board: self, codec }
    }
}

/// Renders a board with displayed tile values.
pub struct BoardView<'a> {
    board: &'a Board,
    codec: Codec,
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+------------------------+")?;
        for row in self.board.ranks() {
            write!(f, "|")?;
            for &rank in row {
                write!(f, "{:>6}", self.codec.displayed_value(rank))?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "+------------------------+")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            writeln!(f, "{:>3}{:>3}{:>3}{:>3}", row[0], row[1], row[2], row[3])?;
        }
        Ok(())
    }
}
