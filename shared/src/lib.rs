//! Shared vocabulary for the hold'em table engine.
//!
//! Everything here is plain data: identifiers, cards, actions, the typed event
//! history and the read-only table snapshot. The engine in `native_holdem`
//! owns all behaviour.

pub mod cards;
pub mod game;
pub mod hand;
pub mod player;
pub mod snapshot;

pub use cards::{Card, CardRank, CardSuit, DECK_SIZE};
pub use game::{ActionEvent, ActionKind, BlindKind, GameAction, PlayerAction, RemovalReason, Stage};
pub use hand::{HandRank, HandRankCategory, HandResult};
pub use player::{PlayerId, PlayerStatus};
pub use snapshot::{SeatSnapshot, SidePotSnapshot, TableSnapshot};
