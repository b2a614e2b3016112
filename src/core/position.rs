//! Validated board coordinates.
//!
//! The board is a fixed 8-row by 6-column grid. `Position` is the only way
//! to name a cell, and it cannot hold an out-of-range coordinate: `new`
//! checks bounds, and deserialization goes through the same check, so
//! untrusted snapshots are range-validated at the boundary.
//!
//! ## Usage
//!
//! ```
//! use raise_and_rage::core::Position;
//!
//! let center = Position::new(3, 2).unwrap();
//! assert_eq!(center.row(), 3);
//! assert_eq!(center.col(), 2);
//!
//! // Rows run 0..8, columns 0..6.
//! assert!(Position::new(8, 0).is_err());
//! assert!(Position::new(0, 6).is_err());
//!
//! // Neighbor arithmetic is bounds-checked.
//! assert_eq!(center.offset(-1, 0), Position::new(2, 2).ok());
//! assert_eq!(Position::new(0, 0).unwrap().offset(-1, 0), None);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// Number of board rows.
pub const ROWS: u8 = 8;

/// Number of board columns.
pub const COLS: u8 = 6;

/// The four orthogonal direction offsets (up, down, left, right).
pub(crate) const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// The four diagonal direction offsets.
pub(crate) const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// A coordinate outside the 8x6 grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("position ({row}, {col}) is outside the 8x6 board")]
pub struct PositionError {
    pub row: u8,
    pub col: u8,
}

/// A cell on the 8x6 board.
///
/// Immutable value type with value equality and hashing; the board indexes
/// by it directly. Row 0 is PLAYER_ONE's home row, row 7 is PLAYER_TWO's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    row: u8,
    col: u8,
}

/// Wire shape of a position before bounds validation.
#[derive(Deserialize)]
struct RawPosition {
    row: u8,
    col: u8,
}

impl TryFrom<RawPosition> for Position {
    type Error = PositionError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Self::new(raw.row, raw.col)
    }
}

impl Position {
    /// Create a position, checking both coordinates against the grid.
    pub const fn new(row: u8, col: u8) -> Result<Self, PositionError> {
        if row < ROWS && col < COLS {
            Ok(Self { row, col })
        } else {
            Err(PositionError { row, col })
        }
    }

    /// Row index, 0..8.
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Column index, 0..6.
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// The position displaced by `(dr, dc)`, or `None` if that leaves the
    /// board.
    #[must_use]
    pub const fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i16 + dr as i16;
        let col = self.col as i16 + dc as i16;
        if row >= 0 && row < ROWS as i16 && col >= 0 && col < COLS as i16 {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// The up-to-4 orthogonally adjacent cells, clipped to the board.
    #[must_use]
    pub fn orthogonal_neighbors(self) -> SmallVec<[Position; 4]> {
        ORTHOGONAL
            .iter()
            .filter_map(|&(dr, dc)| self.offset(dr, dc))
            .collect()
    }

    /// The up-to-4 diagonally adjacent cells, clipped to the board.
    #[must_use]
    pub fn diagonal_neighbors(self) -> SmallVec<[Position; 4]> {
        DIAGONAL
            .iter()
            .filter_map(|&(dr, dc)| self.offset(dr, dc))
            .collect()
    }

    /// All up-to-8 adjacent cells (orthogonal + diagonal), clipped to the
    /// board. A cell is never its own neighbor.
    #[must_use]
    pub fn neighbors(self) -> SmallVec<[Position; 8]> {
        ORTHOGONAL
            .iter()
            .chain(DIAGONAL.iter())
            .filter_map(|&(dr, dc)| self.offset(dr, dc))
            .collect()
    }

    /// Checkerboard parity of this cell: `(row + col) % 2`.
    ///
    /// Diagonal steps preserve parity, so a Master's diagonal search can
    /// only ever reach cells of its starting parity.
    #[must_use]
    pub const fn parity(self) -> u8 {
        (self.row + self.col) % 2
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
