//! Victory conditions.
//!
//! Two ways to win: capture the opposing spy, or walk your own spy onto
//! the opponent's home row. Capture defeat is checked first, so a result
//! that would satisfy both conditions at once resolves as a capture win
//! for the opponent, never as an infiltration.

use serde::{Deserialize, Serialize};

use crate::core::Player;
use crate::pieces::Piece;

/// How a game was won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VictoryType {
    /// The winner's own spy reached the opponent's home row.
    AllySpyInfiltrated,
    /// The opponent's spy was captured.
    EnemySpyCaptured,
}

impl std::fmt::Display for VictoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllySpyInfiltrated => f.write_str("ally spy infiltrated"),
            Self::EnemySpyCaptured => f.write_str("enemy spy captured"),
        }
    }
}

/// The winning player and why they won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VictoryState {
    pub player: Player,
    pub victory_type: VictoryType,
}

impl VictoryState {
    #[must_use]
    pub const fn new(player: Player, victory_type: VictoryType) -> Self {
        Self {
            player,
            victory_type,
        }
    }

    /// Whether the given player is the winner.
    #[must_use]
    pub const fn is_win_for(&self, player: Player) -> bool {
        matches!(
            (self.player, player),
            (Player::One, Player::One) | (Player::Two, Player::Two)
        )
    }
}

impl std::fmt::Display for VictoryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} wins ({})", self.player, self.victory_type)
    }
}

/// Evaluate the victory conditions over the live pieces.
///
/// Assumes both players have completed setup (each fielded a spy); the
/// engine only calls this after an activation sweep or a move. Checks in
/// order:
///
/// 1. Player One's spy missing, then Player Two's: the opponent wins with
///    [`VictoryType::EnemySpyCaptured`].
/// 2. Player Two's spy on row 0, then Player One's spy on row 7: the
///    spy's owner wins with [`VictoryType::AllySpyInfiltrated`].
#[must_use]
pub fn evaluate(pieces: &[Piece]) -> Option<VictoryState> {
    let spy_of = |player: Player| {
        pieces
            .iter()
            .find(|piece| piece.player == player && piece.is_spy)
    };

    for player in Player::both() {
        if spy_of(player).is_none() {
            return Some(VictoryState::new(
                player.opponent(),
                VictoryType::EnemySpyCaptured,
            ));
        }
    }

    for player in [Player::Two, Player::One] {
        if let Some(spy) = spy_of(player) {
            if spy.position.row() == player.infiltration_row() {
                return Some(VictoryState::new(player, VictoryType::AllySpyInfiltrated));
            }
        }
    }

    None
}
