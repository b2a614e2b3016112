//! Movement and surround rules, dispatched over the closed piece kinds.
//!
//! ## Dancer
//!
//! Slides any distance along one orthogonal direction. Each of the four
//! rays is scanned independently outward from the current cell; empty
//! cells are collected in order of increasing distance and the ray stops
//! at the first occupied cell or the board edge. The blocking cell itself
//! is never a destination - capture is by surrounding, not by landing.
//!
//! A Dancer is surrounded when all four orthogonal neighbors are blocked
//! (off-board or occupied, friend or foe).
//!
//! ## Master
//!
//! Two independent move classes, unioned:
//! - a single orthogonal step into an empty cell;
//! - unlimited diagonal travel through empty cells, with direction changes
//!   allowed at every intermediate cell. This is a breadth-first search
//!   over the four diagonal offsets rather than four straight rays,
//!   because the piece may bend at any empty square.
//!
//! A Master is surrounded when all eight neighbors are blocked.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::board::Board;
use crate::core::position::ORTHOGONAL;
use crate::core::Position;

use super::piece::{Piece, PieceType};

impl Piece {
    /// Every legal destination for this piece on the given board.
    ///
    /// Empty when the piece is boxed in. The result never contains an
    /// occupied cell or the piece's own cell.
    #[must_use]
    pub fn possible_destinations(&self, board: &Board) -> Vec<Position> {
        let destinations = match self.piece_type {
            PieceType::Dancer => dancer_destinations(self.position, board),
            PieceType::Master => master_destinations(self.position, board),
        };
        trace!(piece = %self.id, count = destinations.len(), "computed destinations");
        destinations
    }

    /// Whether this piece is capture-eligible: every cell in its required
    /// neighbor set (4 orthogonal for a Dancer, all 8 for a Master) is
    /// off-board or occupied.
    ///
    /// Off-board neighbors count as blocked, so only the on-board ones
    /// need checking.
    #[must_use]
    pub fn is_surrounded(&self, board: &Board) -> bool {
        match self.piece_type {
            PieceType::Dancer => self
                .position
                .orthogonal_neighbors()
                .iter()
                .all(|&cell| board.is_occupied(cell)),
            PieceType::Master => self
                .position
                .neighbors()
                .iter()
                .all(|&cell| board.is_occupied(cell)),
        }
    }
}

/// Four independent orthogonal ray scans, stopping at the first obstacle.
fn dancer_destinations(from: Position, board: &Board) -> Vec<Position> {
    let mut destinations = Vec::new();
    for &(dr, dc) in &ORTHOGONAL {
        let mut cursor = from;
        while let Some(next) = cursor.offset(dr, dc) {
            if board.is_occupied(next) {
                break;
            }
            destinations.push(next);
            cursor = next;
        }
    }
    destinations
}

/// One-step orthogonal moves plus diagonal reachability by BFS.
fn master_destinations(from: Position, board: &Board) -> Vec<Position> {
    let mut destinations = Vec::new();

    for step in from.orthogonal_neighbors() {
        if !board.is_occupied(step) {
            destinations.push(step);
        }
    }

    // Diagonal travel preserves checkerboard parity and an orthogonal step
    // flips it, so the two move classes can never produce the same cell.
    let mut visited: FxHashSet<Position> = FxHashSet::default();
    let mut frontier = VecDeque::new();
    visited.insert(from);
    frontier.push_back(from);
    while let Some(current) = frontier.pop_front() {
        for next in current.diagonal_neighbors() {
            if board.is_occupied(next) || !visited.insert(next) {
                continue;
            }
            destinations.push(next);
            frontier.push_back(next);
        }
    }

    destinations
}
