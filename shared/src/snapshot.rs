//! Read-only view of a table, for consoles and clients.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::{ActionEvent, Stage};
use crate::player::{PlayerId, PlayerStatus};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatSnapshot {
    pub id: PlayerId,
    pub status: PlayerStatus,
    pub balance: u32,
    pub committed_this_round: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePotSnapshot {
    pub number: usize,
    pub contributors: Vec<PlayerId>,
    pub amount: u32,
}

/// Complete public view of the table between (or during) hands.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub hand: u64,
    pub stage: Stage,
    pub seats: Vec<SeatSnapshot>,
    pub community: Vec<Card>,
    pub pot: u32,
    #[serde(default)]
    pub side_pots: Vec<SidePotSnapshot>,
    #[serde(default)]
    pub amount_to_call: u32,
    #[serde(default)]
    pub min_raise: u32,
    #[serde(default)]
    pub small_blind: u32,
    #[serde(default)]
    pub action_log: Vec<ActionEvent>,
}
