//! Array-backed spatial index over the 8x6 grid.
//!
//! The board maps occupied cells to piece ids; the pieces themselves live
//! in the engine's canonical list. Direct 2D-array indexing keeps every
//! lookup O(1), which is what the hot paths (ray scans, neighbor scans
//! during capture sweeps) do almost exclusively.
//!
//! The board trusts its caller: the engine validates snapshots before
//! placing, so placing onto an occupied cell or relocating from an empty
//! one is a programmer error and panics rather than returning an error.

use crate::core::{Position, COLS, ROWS};
use crate::pieces::PieceId;

/// Occupancy index: at most one piece id per cell.
///
/// Invariant: a cell holds an id exactly when the corresponding piece's
/// `position` equals that cell. The engine maintains this on every
/// placement, move, and removal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<PieceId>; COLS as usize]; ROWS as usize],
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a piece id at a cell.
    ///
    /// Panics if the cell is already occupied.
    pub fn place(&mut self, id: PieceId, position: Position) {
        let cell = &mut self.cells[position.row() as usize][position.col() as usize];
        if let Some(existing) = cell {
            panic!("cell {position} already holds piece {existing}");
        }
        *cell = Some(id);
    }

    /// Clear a cell, returning the id that occupied it.
    pub fn remove(&mut self, position: Position) -> Option<PieceId> {
        self.cells[position.row() as usize][position.col() as usize].take()
    }

    /// Move the occupant of `from` to `to`.
    ///
    /// Panics if `from` is empty or `to` is occupied.
    pub fn relocate(&mut self, from: Position, to: Position) {
        let Some(id) = self.remove(from) else {
            panic!("no piece at {from} to relocate");
        };
        self.place(id, to);
    }

    /// The id occupying a cell, if any.
    #[must_use]
    pub fn piece_at(&self, position: Position) -> Option<&PieceId> {
        self.cells[position.row() as usize][position.col() as usize].as_ref()
    }

    /// Whether a cell is occupied.
    #[must_use]
    pub fn is_occupied(&self, position: Position) -> bool {
        self.piece_at(position).is_some()
    }

    /// Iterate over occupied cells in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (Position, &PieceId)> {
        self.cells.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter().enumerate().filter_map(move |(col, cell)| {
                let id = cell.as_ref()?;
                let position = Position::new(row as u8, col as u8).ok()?;
                Some((position, id))
            })
        })
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.occupied_cells().count()
    }

    /// Whether no cell is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Display for Board {
    /// Occupancy map, row 0 at the top: `#` occupied, `.` empty.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for cell in row {
                f.write_str(if cell.is_some() { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
