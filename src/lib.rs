//! # raise-and-rage
//!
//! Rules engine for Raise and Rage, a two-player abstract strategy game
//! on an 8x6 board. Each player fields ten dancers, two of them masters
//! and one a hidden spy; pieces capture by surrounding, and the game ends
//! when a spy is captured or walks into the enemy home row.
//!
//! ## Design Principles
//!
//! 1. **Stateless Operations**: The engine is rebuilt from a piece
//!    snapshot for every operation. Callers own persistence; the library
//!    owns rules.
//!
//! 2. **All-Or-Nothing Mutation**: Every operation validates completely
//!    before touching state. An `Err` guarantees the input state is
//!    unchanged.
//!
//! 3. **Closed Dispatch**: Piece behavior is a `match` over `PieceType`,
//!    not a trait object. The board is a fixed array, not a map.
//!
//! 4. **Configuration Over Convention**: Setup quotas are `SetupLimits`
//!    values, not hard-coded counts.
//!
//! ## Modules
//!
//! - `core`: Positions, players, and the persisted `GameRecord`
//! - `board`: Fixed-size occupancy grid
//! - `pieces`: Piece data, movement generation, surround detection
//! - `setup`: Batch validation of starting formations
//! - `rules`: Victory evaluation
//! - `engine`: The operation layer tying it all together

pub mod board;
pub mod core;
pub mod engine;
pub mod pieces;
pub mod rules;
pub mod setup;

// Re-export commonly used types
pub use crate::core::{
    GameRecord, Movement, Player, Position, PositionError, Stage, COLS, ROWS,
};

pub use crate::board::Board;

pub use crate::pieces::{Marking, Piece, PieceId, PieceType};

pub use crate::setup::{SetupError, SetupLimits, SetupValidator};

pub use crate::rules::{VictoryState, VictoryType};

pub use crate::engine::{GameEngine, GameError, InitializeOutcome, MoveOutcome, SnapshotError};
