//! Player identity, setup zones, and turn ownership.
//!
//! Exactly two players. Each owns half the board as a setup zone (rows 0-3
//! for Player One, rows 4-7 for Player Two) and a home row at their edge of
//! the grid. Turn ownership is pure parity over the externally stored turn
//! counter: even counters belong to Player One, odd to Player Two.
//!
//! ## Usage
//!
//! ```
//! use raise_and_rage::core::Player;
//!
//! assert_eq!(Player::One.opponent(), Player::Two);
//! assert!(Player::One.is_turn(0));
//! assert!(Player::Two.is_turn(1));
//! assert_eq!(Player::to_move(4), Player::One);
//! ```

use serde::{Deserialize, Serialize};

use super::position::ROWS;

/// One of the two players.
///
/// Serializes as `"player_one"` / `"player_two"`, the wire form the
/// transport layer exchanges with clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    #[serde(rename = "player_one")]
    One,
    #[serde(rename = "player_two")]
    Two,
}

impl Player {
    /// Both players, in canonical order.
    #[must_use]
    pub const fn both() -> [Self; 2] {
        [Self::One, Self::Two]
    }

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Rows this player may place pieces on during setup.
    #[must_use]
    pub const fn setup_rows(self) -> std::ops::RangeInclusive<u8> {
        match self {
            Self::One => 0..=3,
            Self::Two => 4..=ROWS - 1,
        }
    }

    /// This player's home row: row 0 for Player One, row 7 for Player Two.
    #[must_use]
    pub const fn home_row(self) -> u8 {
        match self {
            Self::One => 0,
            Self::Two => ROWS - 1,
        }
    }

    /// The row this player's spy must reach to win by infiltration: the
    /// opponent's home row.
    #[must_use]
    pub const fn infiltration_row(self) -> u8 {
        self.opponent().home_row()
    }

    /// Whether this player holds the turn for the given counter value.
    #[must_use]
    pub const fn is_turn(self, turn: u32) -> bool {
        match self {
            Self::One => turn % 2 == 0,
            Self::Two => turn % 2 == 1,
        }
    }

    /// The player who holds the turn for the given counter value.
    #[must_use]
    pub const fn to_move(turn: u32) -> Self {
        if turn % 2 == 0 {
            Self::One
        } else {
            Self::Two
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One => write!(f, "Player One"),
            Self::Two => write!(f, "Player Two"),
        }
    }
}
