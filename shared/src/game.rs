//! Hand stages, player actions and the typed event history.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::HandResult;
use crate::player::PlayerId;

/// Where a hand currently is. The four betting rounds sit between dealing
/// and showdown.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Stage {
    #[default]
    Seating,
    Blinds,
    Dealing,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Cleanup,
}

impl Stage {
    /// Betting stage for a zero-based round number, `None` past the river.
    pub fn from_round(round: u8) -> Option<Self> {
        match round {
            0 => Some(Stage::Preflop),
            1 => Some(Stage::Flop),
            2 => Some(Stage::Turn),
            3 => Some(Stage::River),
            _ => None,
        }
    }

    pub fn is_betting(self) -> bool {
        matches!(self, Stage::Preflop | Stage::Flop | Stage::Turn | Stage::River)
    }
}

/// What a controller answers when asked for a decision.
///
/// `Bet` carries the number of chips the player adds this action, not the
/// total they want to have committed.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerAction {
    Fold,
    CheckCall,
    Bet(u32),
}

/// Player-side action kinds used in the history.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionKind {
    Fold,
    Check,
    Call(u32),
    Bet(u32),
    Raise { to: u32, by: u32 },
    PostBlind { kind: BlindKind, amount: u32 },
    InvalidBet { amount: u32 },
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RemovalReason {
    Broke,
    Disconnected,
}

/// Dealer/table level events.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameAction {
    HandStarted { hand: u64, seed: u64 },
    PlayerSeated { player_id: PlayerId, stack: u32 },
    PlayerRemoved { player_id: PlayerId, reason: RemovalReason },
    StageChanged(Stage),
    DealtHole { player_id: PlayerId },
    DealtCommunity { cards: Vec<Card> },
    SidePotOpened { side_pot: usize },
    Showdown { hand_results: Vec<HandResult> },
    PotAwarded { side_pot: usize, winners: Vec<PlayerId>, amount: u32 },
}

/// A single recorded action/event in the hand. Player-initiated actions and
/// dealer events share one ordered history.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionEvent {
    PlayerAction {
        player_id: PlayerId,
        action: ActionKind,
    },
    GameAction(GameAction),
}

impl ActionEvent {
    pub fn player(player_id: PlayerId, action: ActionKind) -> Self {
        ActionEvent::PlayerAction { player_id, action }
    }

    pub fn game(action: GameAction) -> Self {
        ActionEvent::GameAction(action)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlindKind {
    SmallBlind,
    BigBlind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_map_to_betting_stages() {
        assert_eq!(Stage::from_round(0), Some(Stage::Preflop));
        assert_eq!(Stage::from_round(3), Some(Stage::River));
        assert_eq!(Stage::from_round(4), None);
        assert!(Stage::Turn.is_betting());
        assert!(!Stage::Showdown.is_betting());
    }

    #[test]
    fn events_serialize_as_tagged_json() {
        let ev = ActionEvent::player(PlayerId(3), ActionKind::Call(20));
        let json = serde_json::to_string(&ev).unwrap();
        assert!(json.contains("Call"));
        let back: ActionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ev);
    }
}
