//! Win-condition rules.
//!
//! Victory evaluation is a pure function over a piece list: no board, no
//! turn counter, no stored flags. The engine calls it after every
//! state-changing sweep and the record commits whatever it reports.

pub mod victory;

pub use victory::{VictoryState, VictoryType};
