//! Player identifiers and per-hand status.

use serde::{Deserialize, Serialize};

/// Opaque identifier for a seated player.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(pub usize);

impl From<usize> for PlayerId {
    fn from(v: usize) -> Self {
        PlayerId(v)
    }
}

impl From<PlayerId> for usize {
    fn from(player_id: PlayerId) -> Self {
        player_id.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Where a player stands in the current betting round.
///
/// `Active` still owes an action, `Called` has matched the current call
/// amount, `Folded` is terminal until the next hand.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    #[default]
    Active,
    Folded,
    Called,
}
