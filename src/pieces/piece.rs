//! Piece identity and runtime state.
//!
//! A `Piece` is the unit of game state: an opaque caller-supplied id, a
//! kind (Dancer or Master), an owner, a board position, a cosmetic marking,
//! and the spy flag. Only `position` (via moves) and `marking` (via
//! toggles) ever change after creation; the id is stable for the piece's
//! lifetime, including after capture.
//!
//! ## Spies
//!
//! Each player fields exactly one spy, always a Dancer. The spy flag is
//! what the victory rules look at: losing your spy loses the game, walking
//! it onto the opponent's home row wins it.

use serde::{Deserialize, Serialize};

use crate::core::{Player, Position};

/// Opaque unique piece identifier.
///
/// The engine never generates ids; the caller supplies them (UUID strings
/// in practice) and the engine only compares them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(String);

impl PieceId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PieceId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for PieceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two piece kinds. Closed set; movement and surround rules dispatch
/// exhaustively on this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    Dancer,
    Master,
}

impl std::fmt::Display for PieceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dancer => f.write_str("dancer"),
            Self::Master => f.write_str("master"),
        }
    }
}

/// Spy-guess annotation a player keeps on pieces.
///
/// Pure bookkeeping for the client: no movement, capture, or victory rule
/// reads it. Toggling is legal in any game stage and idempotent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marking {
    #[default]
    None,
    Marked,
    Captured,
}

/// A piece on (or captured from) the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    /// Caller-supplied unique id, immutable for the piece's lifetime.
    pub id: PieceId,

    /// Dancer or Master.
    pub piece_type: PieceType,

    /// Owning player.
    pub player: Player,

    /// Current cell. Captured pieces keep the cell they were removed from.
    pub position: Position,

    /// Cosmetic spy-guess annotation.
    #[serde(default)]
    pub marking: Marking,

    /// Whether this piece is its owner's spy. Meaningful only for Dancers.
    pub is_spy: bool,
}

impl Piece {
    /// Create a non-spy piece of the given kind.
    #[must_use]
    pub fn new(id: impl Into<PieceId>, piece_type: PieceType, player: Player, position: Position) -> Self {
        Self {
            id: id.into(),
            piece_type,
            player,
            position,
            marking: Marking::None,
            is_spy: false,
        }
    }

    /// Create a non-spy Dancer.
    #[must_use]
    pub fn dancer(id: impl Into<PieceId>, player: Player, position: Position) -> Self {
        Self::new(id, PieceType::Dancer, player, position)
    }

    /// Create a Master.
    #[must_use]
    pub fn master(id: impl Into<PieceId>, player: Player, position: Position) -> Self {
        Self::new(id, PieceType::Master, player, position)
    }

    /// Create the player's spy: a Dancer with the spy flag set.
    #[must_use]
    pub fn spy(id: impl Into<PieceId>, player: Player, position: Position) -> Self {
        Self {
            is_spy: true,
            ..Self::new(id, PieceType::Dancer, player, position)
        }
    }

    /// Relocate the piece unconditionally.
    ///
    /// Legality is the engine's responsibility, not the piece's; callers
    /// other than the engine should not use this during play.
    pub fn move_to(&mut self, position: Position) {
        self.position = position;
    }

    /// Set the marking annotation. Idempotent.
    pub fn set_marking(&mut self, marking: Marking) {
        self.marking = marking;
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} at {}", self.player, self.piece_type, self.position)?;
        if self.is_spy {
            f.write_str(" (spy)")?;
        }
        Ok(())
    }
}
