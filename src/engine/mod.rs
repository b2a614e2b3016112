//! The game engine: validation, mutation, and capture resolution.
//!
//! [`GameEngine`] is a working set rebuilt from a piece snapshot per
//! operation. It holds no turn counter and no winner - callers pass the
//! turn in and read victory out - so the same engine serves live games,
//! replays, and tests without carrying session state.
//!
//! Every operation validates completely before mutating anything; an
//! error means the working set is exactly as it was.

pub mod error;
pub mod game;

pub use error::{GameError, SnapshotError};
pub use game::{GameEngine, InitializeOutcome, MoveOutcome};
