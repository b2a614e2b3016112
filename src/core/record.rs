//! The persisted game record and the operations the transport layer calls.
//!
//! `GameRecord` is exactly what the external store keeps per game: live
//! pieces, captured pieces, the turn counter, winner info, and the last
//! movement. The lifecycle stage is derived from those fields, never
//! stored.
//!
//! Each record operation rebuilds a fresh engine working set from the
//! stored pieces, applies a single operation, and commits the result back
//! only on success - a rejected operation leaves the record untouched.
//! The record itself is plain data; callers own the read-validate-persist
//! cycle and must serialize it per game id (two writers racing on the
//! same stale record will silently diverge, and that race is theirs to
//! prevent, not this crate's).

use serde::{Deserialize, Deserializer, Serialize};
use tracing::instrument;

use crate::engine::{GameEngine, GameError, InitializeOutcome, MoveOutcome};
use crate::pieces::{Marking, Piece, PieceId};
use crate::rules::{VictoryState, VictoryType};
use crate::setup::SetupValidator;

use super::{Player, Position};

/// Audit record of the last successful move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub previous_position: Position,
    pub new_position: Position,
}

/// Derived lifecycle stage of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Both players have not placed pieces yet.
    Setup,
    /// Both players placed, no winner yet.
    Active,
    /// A winner is recorded.
    Completed,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Setup => f.write_str("in setup"),
            Self::Active => f.write_str("active"),
            Self::Completed => f.write_str("completed"),
        }
    }
}

/// Passthrough deserializer that turns off the derive's missing-key
/// handling for `Option` fields: an absent key errors instead of
/// becoming `None`. Explicit nulls still parse as `None`.
fn required<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer)
}

/// One game's persisted state.
///
/// `winner`, `victory_type`, and `movement` are null until the game
/// produces them, but every key must be present on the wire: a record
/// missing any field is rejected at deserialization, never defaulted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Live pieces, the canonical list every operation works from.
    pub pieces: Vec<Piece>,

    /// Pieces removed by capture sweeps, in capture order.
    pub captured_pieces: Vec<Piece>,

    /// Move-count turn counter. Even: Player One to move; odd: Player Two.
    pub turn: u32,

    /// The winning player, once the game is decided.
    #[serde(deserialize_with = "required")]
    pub winner: Option<Player>,

    /// Why the winner won.
    #[serde(deserialize_with = "required")]
    pub victory_type: Option<VictoryType>,

    /// The last successful move.
    #[serde(deserialize_with = "required")]
    pub movement: Option<Movement>,
}

impl GameRecord {
    /// A new game: empty board, turn 0, no winner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the lifecycle stage from the stored fields.
    #[must_use]
    pub fn stage(&self) -> Stage {
        if self.winner.is_some() {
            Stage::Completed
        } else if Player::both()
            .into_iter()
            .all(|player| self.pieces.iter().any(|piece| piece.player == player))
        {
            Stage::Active
        } else {
            Stage::Setup
        }
    }

    /// Winner and reason, once both are recorded.
    #[must_use]
    pub fn victory_state(&self) -> Option<VictoryState> {
        Some(VictoryState::new(self.winner?, self.victory_type?))
    }

    /// Merge one player's setup batch under the standard piece quota.
    pub fn initialize(&mut self, batch: Vec<Piece>) -> Result<InitializeOutcome, GameError> {
        self.initialize_with(batch, &SetupValidator::default())
    }

    /// Merge one player's setup batch under a custom quota.
    ///
    /// Rejected once the game is completed. Activation (both players in)
    /// triggers the board-wide capture sweep and a victory check; captures
    /// and any immediate victory are committed to the record.
    #[instrument(skip(self, batch, validator), fields(batch_size = batch.len()))]
    pub fn initialize_with(
        &mut self,
        batch: Vec<Piece>,
        validator: &SetupValidator,
    ) -> Result<InitializeOutcome, GameError> {
        if self.stage() == Stage::Completed {
            return Err(GameError::NotActive(Stage::Completed));
        }

        let mut engine = GameEngine::new(self.pieces.clone())?;
        let outcome = engine.initialize(batch, validator)?;

        self.pieces = engine.into_pieces();
        self.captured_pieces.extend(outcome.captured.iter().cloned());
        if let Some(victory) = outcome.victory {
            self.set_victory(victory);
        }
        Ok(outcome)
    }

    /// Execute one move for the player holding the current turn.
    ///
    /// Only legal while the game is active. On success the piece list,
    /// captured list, turn counter, movement audit, and any victory are
    /// committed to the record.
    #[instrument(skip(self), fields(piece = %piece_id, to = %to, turn = self.turn))]
    pub fn move_piece(
        &mut self,
        piece_id: &PieceId,
        to: Position,
    ) -> Result<MoveOutcome, GameError> {
        let stage = self.stage();
        if stage != Stage::Active {
            return Err(GameError::NotActive(stage));
        }

        let mut engine = GameEngine::new(self.pieces.clone())?;
        let outcome = engine.move_piece(piece_id, to, self.turn)?;

        self.pieces = engine.into_pieces();
        self.captured_pieces.extend(outcome.captured.iter().cloned());
        self.turn = outcome.turn;
        self.movement = Some(outcome.movement);
        if let Some(victory) = outcome.victory {
            self.set_victory(victory);
        }
        Ok(outcome)
    }

    /// Set a piece's marking annotation. Legal in every stage; no capture
    /// or turn side effects.
    pub fn toggle_marking(
        &mut self,
        piece_id: &PieceId,
        marking: Marking,
    ) -> Result<(), GameError> {
        let mut engine = GameEngine::new(self.pieces.clone())?;
        engine.toggle_marking(piece_id, marking)?;
        self.pieces = engine.into_pieces();
        Ok(())
    }

    /// Compact byte encoding for the persistence layer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode a record previously produced by [`GameRecord::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }

    fn set_victory(&mut self, victory: VictoryState) {
        self.winner = Some(victory.player);
        self.victory_type = Some(victory.victory_type);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::SetupLimits;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    fn pid(s: &str) -> PieceId {
        PieceId::from(s)
    }

    /// The standard 7/1/2 formation for either player, mirrored across
    /// the board's center line.
    fn standard_batch(player: Player) -> Vec<Piece> {
        let prefix = match player {
            Player::One => "p1",
            Player::Two => "p2",
        };
        let row = |r: u8| match player {
            Player::One => r,
            Player::Two => 7 - r,
        };
        let mut batch: Vec<Piece> = (0..6)
            .map(|col| Piece::dancer(format!("{prefix}-d{col}"), player, pos(row(1), col)))
            .collect();
        batch.push(Piece::dancer(format!("{prefix}-d6"), player, pos(row(2), 0)));
        batch.push(Piece::spy(format!("{prefix}-spy"), player, pos(row(0), 2)));
        batch.push(Piece::master(format!("{prefix}-m0"), player, pos(row(3), 0)));
        batch.push(Piece::master(format!("{prefix}-m1"), player, pos(row(3), 1)));
        batch
    }

    fn active_record() -> GameRecord {
        let mut record = GameRecord::new();
        record.initialize(standard_batch(Player::One)).unwrap();
        record.initialize(standard_batch(Player::Two)).unwrap();
        record
    }

    #[test]
    fn test_new_record_is_in_setup() {
        let record = GameRecord::new();
        assert_eq!(record.stage(), Stage::Setup);
        assert_eq!(record.turn, 0);
        assert_eq!(record.victory_state(), None);
    }

    #[test]
    fn test_setup_flow_activates_after_both_batches() {
        let mut record = GameRecord::new();

        let first = record.initialize(standard_batch(Player::One)).unwrap();
        assert!(!first.activated);
        assert_eq!(record.stage(), Stage::Setup);

        let second = record.initialize(standard_batch(Player::Two)).unwrap();
        assert!(second.activated);
        assert!(second.captured.is_empty());
        assert_eq!(record.stage(), Stage::Active);
        assert_eq!(record.pieces.len(), 20);
        assert_eq!(record.turn, 0);
    }

    #[test]
    fn test_rejected_initialize_leaves_record_untouched() {
        let mut record = GameRecord::new();
        record.initialize(standard_batch(Player::One)).unwrap();
        let before = record.clone();

        let mut short = standard_batch(Player::Two);
        short.pop();
        assert!(record.initialize(short).is_err());
        assert_eq!(record, before);
    }

    #[test]
    fn test_move_flow() {
        let mut record = active_record();

        let outcome = record.move_piece(&pid("p1-d0"), pos(0, 0)).unwrap();

        assert_eq!(record.turn, 1);
        assert_eq!(outcome.turn, 1);
        assert_eq!(
            record.movement,
            Some(Movement {
                previous_position: pos(1, 0),
                new_position: pos(0, 0),
            })
        );
        assert_eq!(record.stage(), Stage::Active);
    }

    #[test]
    fn test_move_rejected_before_activation() {
        let mut record = GameRecord::new();
        record.initialize(standard_batch(Player::One)).unwrap();

        assert_eq!(
            record.move_piece(&pid("p1-d0"), pos(0, 0)).unwrap_err(),
            GameError::NotActive(Stage::Setup)
        );
        assert_eq!(record.turn, 0);
        assert_eq!(record.movement, None);
    }

    #[test]
    fn test_rejected_move_leaves_record_untouched() {
        let mut record = active_record();
        let before = record.clone();

        // Player Two cannot move on an even turn.
        assert!(record.move_piece(&pid("p2-d0"), pos(5, 1)).is_err());
        assert_eq!(record, before);
    }

    #[test]
    fn test_completed_game_rejects_moves_and_setup() {
        let mut record = active_record();
        record.winner = Some(Player::One);
        record.victory_type = Some(VictoryType::EnemySpyCaptured);

        assert_eq!(record.stage(), Stage::Completed);
        assert_eq!(
            record.move_piece(&pid("p1-d0"), pos(0, 0)).unwrap_err(),
            GameError::NotActive(Stage::Completed)
        );
        assert_eq!(
            record.initialize(standard_batch(Player::One)).unwrap_err(),
            GameError::NotActive(Stage::Completed)
        );
    }

    #[test]
    fn test_toggle_marking_any_stage() {
        let mut record = GameRecord::new();
        record.initialize(standard_batch(Player::One)).unwrap();

        record.toggle_marking(&pid("p1-d0"), Marking::Marked).unwrap();
        assert_eq!(record.pieces[0].marking, Marking::Marked);

        record.winner = Some(Player::Two);
        record.victory_type = Some(VictoryType::AllySpyInfiltrated);
        record
            .toggle_marking(&pid("p1-d0"), Marking::Captured)
            .unwrap();
        assert_eq!(record.pieces[0].marking, Marking::Captured);
    }

    #[test]
    fn test_captures_accumulate_on_record() {
        // Small quota to keep the arrangement readable: Player Two's
        // activation batch seals (3, 2) from across the border.
        let validator = SetupValidator::new(SetupLimits {
            dancers: 4,
            spies: 1,
            masters: 0,
        });
        let mut record = GameRecord::new();

        record
            .initialize_with(
                vec![
                    Piece::dancer("victim", Player::One, pos(3, 2)),
                    Piece::dancer("p1-a", Player::One, pos(2, 2)),
                    Piece::dancer("p1-b", Player::One, pos(3, 1)),
                    Piece::dancer("p1-c", Player::One, pos(3, 3)),
                    Piece::spy("p1-spy", Player::One, pos(0, 0)),
                ],
                &validator,
            )
            .unwrap();
        let outcome = record
            .initialize_with(
                vec![
                    Piece::dancer("p2-a", Player::Two, pos(4, 2)),
                    Piece::dancer("p2-b", Player::Two, pos(6, 0)),
                    Piece::dancer("p2-c", Player::Two, pos(6, 1)),
                    Piece::dancer("p2-d", Player::Two, pos(6, 2)),
                    Piece::spy("p2-spy", Player::Two, pos(7, 5)),
                ],
                &validator,
            )
            .unwrap();

        assert_eq!(outcome.captured.len(), 1);
        assert_eq!(record.captured_pieces.len(), 1);
        assert_eq!(record.captured_pieces[0].id, pid("victim"));
        assert_eq!(record.pieces.len(), 9);
    }

    #[test]
    fn test_serialization_wire_shape() {
        let mut record = GameRecord::new();
        record.pieces.push(Piece::spy("s", Player::One, pos(0, 2)));

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"pieces":[{"id":"s","piece_type":"dancer","player":"player_one","position":{"row":0,"col":2},"marking":"none","is_spy":true}],"captured_pieces":[],"turn":0,"winner":null,"victory_type":null,"movement":null}"#
        );

        let deserialized: GameRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }

    #[test]
    fn test_deserialization_requires_core_fields() {
        // Structurally invalid records must error, not coerce.
        let missing_pieces =
            r#"{"captured_pieces":[],"turn":0,"winner":null,"victory_type":null,"movement":null}"#;
        assert!(serde_json::from_str::<GameRecord>(missing_pieces).is_err());

        let missing_turn =
            r#"{"pieces":[],"captured_pieces":[],"winner":null,"victory_type":null,"movement":null}"#;
        assert!(serde_json::from_str::<GameRecord>(missing_turn).is_err());
    }

    #[test]
    fn test_deserialization_requires_nullable_fields_present() {
        // The nullable keys may hold null but may never be absent.
        let complete =
            r#"{"pieces":[],"captured_pieces":[],"turn":0,"winner":null,"victory_type":null,"movement":null}"#;
        assert!(serde_json::from_str::<GameRecord>(complete).is_ok());

        let each_missing_one = [
            r#"{"pieces":[],"captured_pieces":[],"turn":0,"victory_type":null,"movement":null}"#,
            r#"{"pieces":[],"captured_pieces":[],"turn":0,"winner":null,"movement":null}"#,
            r#"{"pieces":[],"captured_pieces":[],"turn":0,"winner":null,"victory_type":null}"#,
        ];
        for snapshot in each_missing_one {
            assert!(serde_json::from_str::<GameRecord>(snapshot).is_err());
        }
    }

    #[test]
    fn test_bincode_round_trip() {
        let mut record = active_record();
        record.move_piece(&pid("p1-d0"), pos(0, 0)).unwrap();

        let bytes = record.to_bytes().unwrap();
        let decoded = GameRecord::from_bytes(&bytes).unwrap();
        assert_eq!(record, decoded);
    }
}
