//! Board occupancy grid.
//!
//! The board is a fixed 8x6 array of cells, each holding at most one
//! piece id. It answers occupancy questions in constant time and knows
//! nothing about piece types, ownership, or rules.

pub mod grid;

pub use grid::Board;
