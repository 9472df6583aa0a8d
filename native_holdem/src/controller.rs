//! The seam between the engine and whoever supplies players and decisions.
//!
//! A network host, a console prompt and the bundled bots all implement
//! [`Controller`]. The engine only ever talks to one player at a time.

use async_trait::async_trait;
use holdem_shared::{PlayerAction, PlayerId, Stage};

use crate::game::ControllerError;

/// Everything a decision maker needs to know about the pending decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionRequest {
    pub player: PlayerId,
    pub stage: Stage,
    pub balance: u32,
    /// Chips already committed by this player in the current round.
    pub committed: u32,
    pub amount_to_call: u32,
    pub min_raise: u32,
    pub big_blind: u32,
}

impl ActionRequest {
    /// Chips a call costs right now, capped at the balance.
    pub fn call_amount(&self) -> u32 {
        self.amount_to_call
            .saturating_sub(self.committed)
            .min(self.balance)
    }
}

#[async_trait]
pub trait Controller: Send {
    /// Up to `needed` new players waiting for a seat. May return fewer.
    async fn source_new_players(&mut self, needed: usize) -> Vec<PlayerId>;

    /// The player left the table, broke or disconnected.
    fn release_player(&mut self, id: PlayerId);

    /// Block until the player decides. The implementation bounds the wait;
    /// an `Err` folds the player and frees their seat.
    async fn request_action(
        &mut self,
        request: &ActionRequest,
    ) -> Result<PlayerAction, ControllerError>;

    /// Informational: the player's bet was refused and they were folded.
    fn report_invalid_action(&mut self, id: PlayerId, amount: u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_amount_is_capped_by_balance() {
        let req = ActionRequest {
            player: PlayerId(1),
            stage: Stage::Flop,
            balance: 15,
            committed: 5,
            amount_to_call: 40,
            min_raise: 40,
            big_blind: 20,
        };
        assert_eq!(req.call_amount(), 15);
        let covered = ActionRequest { balance: 100, ..req };
        assert_eq!(covered.call_amount(), 35);
    }
}
