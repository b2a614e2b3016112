//! Pieces and their movement rules.
//!
//! [`Piece`] is the unit of game state: identity, kind, owner, position,
//! and annotations. Movement and surround detection live in
//! [`movement`], dispatched over the closed [`PieceType`] enum - adding
//! a piece kind means adding a variant and its match arms, not a trait
//! object.

pub mod movement;
pub mod piece;

pub use piece::{Marking, Piece, PieceId, PieceType};
