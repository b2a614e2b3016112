//! Core identity types shared by every other module.
//!
//! Coordinates, player identity, and the persisted game record live here.
//! Everything is a plain value type; the record's operations delegate to
//! [`crate::engine`] for the actual rules.

pub mod player;
pub mod position;
pub mod record;

pub use player::Player;
pub use position::{Position, PositionError, COLS, ROWS};
pub use record::{GameRecord, Movement, Stage};
