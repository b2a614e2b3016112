//! Initial-placement validation.
//!
//! A player submits their entire starting force as one batch. The batch is
//! checked against that player's quota and setup zone, and against itself
//! for collisions and pre-surrounded placements, before anything is merged
//! into game state. Cross-player effects (a batch that surrounds opponent
//! pieces, or gets surrounded by them) are deliberately not checked here;
//! the activation capture sweep resolves those once both players are in.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::board::Board;
use crate::core::{Player, Position};
use crate::pieces::{Piece, PieceId, PieceType};

/// Per-player piece quota for one setup batch.
///
/// `dancers` counts non-spy Dancers only; the spy is quota'd separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupLimits {
    pub dancers: usize,
    pub spies: usize,
    pub masters: usize,
}

impl Default for SetupLimits {
    /// The standard game: 7 Dancers, 1 spy, 2 Masters per player.
    fn default() -> Self {
        Self {
            dancers: 7,
            spies: 1,
            masters: 2,
        }
    }
}

impl SetupLimits {
    /// Total batch size the quota implies.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.dancers + self.spies + self.masters
    }
}

impl std::fmt::Display for SetupLimits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} dancers + {} spies + {} masters",
            self.dancers, self.spies, self.masters
        )
    }
}

/// Why a setup batch was rejected. Nothing is merged when any of these
/// fire.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("setup batch is empty")]
    EmptyBatch,

    #[error("setup batch mixes pieces of both players")]
    MixedPlayers,

    #[error("piece {id} is a spy-flagged master; only a dancer can be the spy")]
    SpyMustBeDancer { id: PieceId },

    #[error("piece at {position} is outside {player}'s setup zone")]
    OutsideZone { player: Player, position: Position },

    #[error("piece counts do not match: batch has {observed}, setup requires {required}")]
    WrongCounts {
        observed: SetupLimits,
        required: SetupLimits,
    },

    #[error("two pieces in the batch share cell {position}")]
    DuplicatePosition { position: Position },

    #[error("piece at {position} would start surrounded")]
    PlacedSurrounded { position: Position },

    #[error("{player} has already placed their pieces")]
    AlreadyPlaced { player: Player },

    #[error("cell {position} is already occupied")]
    PositionOccupied { position: Position },
}

/// Validates one player's setup batch against a quota.
#[derive(Clone, Debug, Default)]
pub struct SetupValidator {
    limits: SetupLimits,
}

impl SetupValidator {
    /// Validator with a custom quota.
    #[must_use]
    pub const fn new(limits: SetupLimits) -> Self {
        Self { limits }
    }

    /// The quota this validator enforces.
    #[must_use]
    pub const fn limits(&self) -> SetupLimits {
        self.limits
    }

    /// Check a batch, returning the submitting player on success.
    ///
    /// The batch is validated against itself only: single player, spy is a
    /// Dancer, every cell inside the player's zone, exact quota, no two
    /// pieces on one cell, nobody placed pre-surrounded.
    pub fn validate(&self, batch: &[Piece]) -> Result<Player, SetupError> {
        let Some(first) = batch.first() else {
            return Err(SetupError::EmptyBatch);
        };
        let player = first.player;

        if batch.iter().any(|piece| piece.player != player) {
            return Err(SetupError::MixedPlayers);
        }

        for piece in batch {
            if piece.is_spy && piece.piece_type == PieceType::Master {
                return Err(SetupError::SpyMustBeDancer {
                    id: piece.id.clone(),
                });
            }
            if !player.setup_rows().contains(&piece.position.row()) {
                return Err(SetupError::OutsideZone {
                    player,
                    position: piece.position,
                });
            }
        }

        let observed = SetupLimits {
            dancers: batch
                .iter()
                .filter(|piece| piece.piece_type == PieceType::Dancer && !piece.is_spy)
                .count(),
            spies: batch.iter().filter(|piece| piece.is_spy).count(),
            masters: batch
                .iter()
                .filter(|piece| piece.piece_type == PieceType::Master)
                .count(),
        };
        if observed != self.limits {
            return Err(SetupError::WrongCounts {
                observed,
                required: self.limits,
            });
        }

        let mut cells: FxHashSet<Position> = FxHashSet::default();
        for piece in batch {
            if !cells.insert(piece.position) {
                return Err(SetupError::DuplicatePosition {
                    position: piece.position,
                });
            }
        }

        // Surround check against the batch alone on an otherwise empty
        // board.
        let mut board = Board::new();
        for piece in batch {
            board.place(piece.id.clone(), piece.position);
        }
        for piece in batch {
            if piece.is_surrounded(&board) {
                return Err(SetupError::PlacedSurrounded {
                    position: piece.position,
                });
            }
        }

        debug!(%player, pieces = batch.len(), "setup batch validated");
        Ok(player)
    }
}
