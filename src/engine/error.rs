//! Operation rejection and snapshot integrity errors.
//!
//! Everything user-facing carries the failing constraint's detail (which
//! player, which position) so the transport layer can show it. Snapshot
//! errors signal caller-side inconsistency - a stale or forged snapshot -
//! and should be surfaced upstream as server faults, not user rejections.
//!
//! All operations are all-or-nothing: any error here means no board, piece
//! list, or turn counter mutation happened.

use thiserror::Error;

use crate::core::record::Stage;
use crate::core::{Player, Position};
use crate::pieces::PieceId;
use crate::setup::SetupError;

/// A structurally invalid piece snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("pieces {first} and {second} both claim cell {position}")]
    PositionCollision {
        position: Position,
        first: PieceId,
        second: PieceId,
    },

    #[error("piece id {id} appears more than once")]
    DuplicateId { id: PieceId },

    #[error("{player} has more than one spy")]
    DuplicateSpy { player: Player },
}

/// Why a game operation was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// The submitted setup batch failed validation; nothing was merged.
    #[error("invalid setup: {0}")]
    InvalidSetup(#[from] SetupError),

    /// The moving piece's owner does not hold the current turn parity.
    #[error("it is not {player}'s turn (turn counter {turn})")]
    NotPlayerTurn { player: Player, turn: u32 },

    /// The target cell is not among the piece's legal destinations.
    #[error("piece at {from} cannot reach {to}")]
    InvalidMove { from: Position, to: Position },

    /// The referenced id is not in the current snapshot. Indicates a stale
    /// snapshot or forged id, not a normal rejection.
    #[error("no piece with id {0} in the current snapshot")]
    PieceNotFound(PieceId),

    /// The externally supplied state is structurally invalid.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(#[from] SnapshotError),

    /// The operation needs an active game (both players placed, no winner
    /// yet).
    #[error("operation requires an active game, but the game is {0}")]
    NotActive(Stage),
}
