//! Game orchestration: moves, setup merges, capture sweeps, victory.
//!
//! A `GameEngine` is the working set for one operation: the caller's
//! canonical piece list plus a board indexing it. It is constructed fresh
//! from a snapshot, mutated in memory by exactly one operation, and read
//! back; it holds nothing across calls and shares nothing between
//! instances, so independent games can run through it concurrently.
//!
//! ## Capture sweeps
//!
//! Captures are simultaneous. A sweep first collects every capture-
//! eligible piece against the pre-removal state, then removes them
//! together - removal never happens inside the scan, so taking one piece
//! cannot free or doom another within the same sweep.
//!
//! - The activation sweep (run when the second player's setup merges)
//!   scans every piece on the board.
//! - The post-move sweep scans only the eight cells around the mover's
//!   destination: a move can newly surround pieces there and nowhere
//!   else. Any surrounded occupant is taken, friend or foe; the mover's
//!   own cell is not part of its neighborhood, so a move never captures
//!   the mover.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, instrument};

use crate::board::Board;
use crate::core::record::Movement;
use crate::core::{Player, Position};
use crate::pieces::{Marking, Piece, PieceId};
use crate::rules::victory::{self, VictoryState};
use crate::setup::{SetupError, SetupValidator};

use super::error::{GameError, SnapshotError};

/// Result of a successful move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Where the piece came from and where it landed.
    pub movement: Movement,

    /// Pieces captured by the post-move sweep, removed from the board.
    pub captured: Vec<Piece>,

    /// The advanced turn counter.
    pub turn: u32,

    /// Set when this move ended the game.
    pub victory: Option<VictoryState>,
}

/// Result of a successful setup merge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializeOutcome {
    /// The player whose batch was merged.
    pub player: Player,

    /// Whether this merge completed setup (both players now present).
    pub activated: bool,

    /// Pieces captured by the activation sweep. Empty until activation.
    pub captured: Vec<Piece>,

    /// Set when the activation sweep ended the game on the spot.
    pub victory: Option<VictoryState>,
}

/// One operation's working set: the canonical piece list plus its board
/// index.
#[derive(Clone, Debug)]
pub struct GameEngine {
    board: Board,
    pieces: Vec<Piece>,
}

impl GameEngine {
    /// Build the working set from a piece snapshot.
    ///
    /// Rejects structurally invalid snapshots: duplicate ids, two pieces
    /// claiming one cell, or a player with more than one spy.
    pub fn new(pieces: Vec<Piece>) -> Result<Self, SnapshotError> {
        let mut ids: FxHashSet<&PieceId> = FxHashSet::default();
        let mut cells: FxHashMap<Position, &PieceId> = FxHashMap::default();
        let mut spy_owners: FxHashSet<Player> = FxHashSet::default();

        for piece in &pieces {
            if !ids.insert(&piece.id) {
                return Err(SnapshotError::DuplicateId {
                    id: piece.id.clone(),
                });
            }
            if let Some(first) = cells.insert(piece.position, &piece.id) {
                return Err(SnapshotError::PositionCollision {
                    position: piece.position,
                    first: first.clone(),
                    second: piece.id.clone(),
                });
            }
            if piece.is_spy && !spy_owners.insert(piece.player) {
                return Err(SnapshotError::DuplicateSpy {
                    player: piece.player,
                });
            }
        }

        let mut board = Board::new();
        for piece in &pieces {
            board.place(piece.id.clone(), piece.position);
        }

        Ok(Self { board, pieces })
    }

    /// The live pieces, in canonical (caller) order.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Consume the engine, yielding the updated piece list.
    #[must_use]
    pub fn into_pieces(self) -> Vec<Piece> {
        self.pieces
    }

    /// The board index over the live pieces.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Look up a piece by id.
    pub fn piece(&self, piece_id: &PieceId) -> Result<&Piece, GameError> {
        self.index_of(piece_id).map(|index| &self.pieces[index])
    }

    /// Whether the player has at least one live piece.
    #[must_use]
    pub fn has_pieces(&self, player: Player) -> bool {
        self.pieces.iter().any(|piece| piece.player == player)
    }

    /// Legal destinations for the identified piece.
    pub fn possible_destinations(&self, piece_id: &PieceId) -> Result<Vec<Position>, GameError> {
        Ok(self.piece(piece_id)?.possible_destinations(&self.board))
    }

    /// Execute one move for the player holding `turn`.
    ///
    /// Validates everything before touching state: the piece must exist,
    /// its owner must hold the turn parity, and the target must be among
    /// its legal destinations. On success the piece is relocated, the
    /// post-move sweep runs, the turn counter advances, and victory is
    /// evaluated.
    #[instrument(skip(self), fields(piece = %piece_id, to = %to, turn))]
    pub fn move_piece(
        &mut self,
        piece_id: &PieceId,
        to: Position,
        turn: u32,
    ) -> Result<MoveOutcome, GameError> {
        let index = self.index_of(piece_id)?;
        let player = self.pieces[index].player;
        let from = self.pieces[index].position;

        if !player.is_turn(turn) {
            return Err(GameError::NotPlayerTurn { player, turn });
        }
        if !self.pieces[index]
            .possible_destinations(&self.board)
            .contains(&to)
        {
            return Err(GameError::InvalidMove { from, to });
        }

        self.board.relocate(from, to);
        self.pieces[index].move_to(to);

        let captured = self.sweep_around(to);
        let victory = victory::evaluate(&self.pieces);
        debug!(%player, %from, %to, captured = captured.len(), "move applied");

        Ok(MoveOutcome {
            movement: Movement {
                previous_position: from,
                new_position: to,
            },
            captured,
            turn: turn.saturating_add(1),
            victory,
        })
    }

    /// Merge one player's validated setup batch into the working set.
    ///
    /// The batch must pass the validator, the player must not already have
    /// pieces, and every batch cell must be free on the merged board. When
    /// the merge brings the second player in, the game activates: the
    /// activation sweep runs over the whole board and victory is
    /// evaluated.
    #[instrument(skip(self, batch, validator), fields(batch_size = batch.len()))]
    pub fn initialize(
        &mut self,
        batch: Vec<Piece>,
        validator: &SetupValidator,
    ) -> Result<InitializeOutcome, GameError> {
        let player = validator.validate(&batch)?;

        if self.has_pieces(player) {
            return Err(SetupError::AlreadyPlaced { player }.into());
        }
        for piece in &batch {
            if self.board.is_occupied(piece.position) {
                return Err(SetupError::PositionOccupied {
                    position: piece.position,
                }
                .into());
            }
            if self.index_of(&piece.id).is_ok() {
                return Err(SnapshotError::DuplicateId {
                    id: piece.id.clone(),
                }
                .into());
            }
        }

        for piece in batch {
            self.board.place(piece.id.clone(), piece.position);
            self.pieces.push(piece);
        }

        let activated = self.has_pieces(player.opponent());
        let (captured, victory) = if activated {
            let captured = self.sweep_all();
            (captured, victory::evaluate(&self.pieces))
        } else {
            (Vec::new(), None)
        };
        debug!(%player, activated, captured = captured.len(), "setup batch merged");

        Ok(InitializeOutcome {
            player,
            activated,
            captured,
            victory,
        })
    }

    /// Set a piece's marking annotation. No gameplay side effects;
    /// applying the same marking twice is a no-op.
    pub fn toggle_marking(
        &mut self,
        piece_id: &PieceId,
        marking: Marking,
    ) -> Result<(), GameError> {
        let index = self.index_of(piece_id)?;
        self.pieces[index].set_marking(marking);
        Ok(())
    }

    /// Evaluate the victory conditions over the current pieces.
    #[must_use]
    pub fn evaluate_victory(&self) -> Option<VictoryState> {
        victory::evaluate(&self.pieces)
    }

    fn index_of(&self, piece_id: &PieceId) -> Result<usize, GameError> {
        self.pieces
            .iter()
            .position(|piece| &piece.id == piece_id)
            .ok_or_else(|| GameError::PieceNotFound(piece_id.clone()))
    }

    /// Activation sweep: capture every surrounded piece on the board.
    fn sweep_all(&mut self) -> Vec<Piece> {
        let doomed: SmallVec<[PieceId; 8]> = self
            .pieces
            .iter()
            .filter(|piece| piece.is_surrounded(&self.board))
            .map(|piece| piece.id.clone())
            .collect();
        self.remove_all(&doomed)
    }

    /// Post-move sweep: capture every surrounded piece in the eight cells
    /// around the destination.
    fn sweep_around(&mut self, center: Position) -> Vec<Piece> {
        let neighborhood = center.neighbors();
        let doomed: SmallVec<[PieceId; 8]> = self
            .pieces
            .iter()
            .filter(|piece| neighborhood.contains(&piece.position))
            .filter(|piece| piece.is_surrounded(&self.board))
            .map(|piece| piece.id.clone())
            .collect();
        self.remove_all(&doomed)
    }

    /// Remove the already-selected capture set, board and list together.
    fn remove_all(&mut self, doomed: &[PieceId]) -> Vec<Piece> {
        let mut captured = Vec::with_capacity(doomed.len());
        for id in doomed {
            if let Some(index) = self.pieces.iter().position(|piece| &piece.id == id) {
                let piece = self.pieces.remove(index);
                self.board.remove(piece.position);
                debug!(piece = %piece.id, at = %piece.position, "captured");
                captured.push(piece);
            }
        }
        captured
    }
}
