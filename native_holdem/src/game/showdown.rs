//! Showdown: best hand per seat, then each side pot paid to its winners.

use holdem_shared::{ActionEvent, Card, GameAction, HandResult, PlayerId};

use super::dealing::DealAssignment;
use super::engine::Game;
use super::error::EngineError;
use crate::controller::Controller;
use crate::poker::{Evaluator, Hand};

/// Cards a player must see at showdown: two hole and five board.
const SHOWDOWN_CARDS: usize = 7;

/// Chips paid from one side pot to one winner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payout {
    pub side_pot: usize,
    pub player: PlayerId,
    pub amount: u32,
}

/// Every five-card combination of `cards`, 21 for a seven-card set.
pub fn five_card_hands(cards: &[Card]) -> Vec<Hand> {
    let n = cards.len();
    let mut hands = Vec::new();
    if n < 5 {
        return hands;
    }
    for a in 0..n - 4 {
        for b in a + 1..n - 3 {
            for c in b + 1..n - 2 {
                for d in c + 1..n - 1 {
                    for e in d + 1..n {
                        hands.push([cards[a], cards[b], cards[c], cards[d], cards[e]]);
                    }
                }
            }
        }
    }
    hands
}

/// `amount` split as evenly as possible, the remainder one chip at a time
/// from the front of `winners`.
fn split_evenly(amount: u32, winners: &[PlayerId]) -> Vec<(PlayerId, u32)> {
    let count = winners.len() as u32;
    if count == 0 {
        return Vec::new();
    }
    let share = amount / count;
    let remainder = (amount % count) as usize;
    winners
        .iter()
        .enumerate()
        .map(|(i, &id)| (id, share + u32::from(i < remainder)))
        .collect()
}

impl<C: Controller, E: Evaluator> Game<C, E> {
    /// Pay out every side pot and return what went to whom.
    pub(crate) fn resolve_bets(
        &mut self,
        deal: &DealAssignment,
    ) -> Result<Vec<Payout>, EngineError> {
        let mut best: Vec<(PlayerId, Hand)> = Vec::with_capacity(self.table.len());
        for id in self.table.ids() {
            let visible = deal.visible_to(id);
            if visible.len() != SHOWDOWN_CARDS {
                return Err(EngineError::CardCount {
                    player: id,
                    count: visible.len(),
                });
            }
            let candidates = five_card_hands(&visible);
            let hand = self
                .evaluator
                .best_hands(&candidates)
                .first()
                .copied()
                .ok_or(EngineError::NoBestHand { player: id })?;
            best.push((id, hand));
        }
        self.log(ActionEvent::game(GameAction::Showdown {
            hand_results: best
                .iter()
                .map(|&(player_id, best_five)| HandResult {
                    player_id,
                    best_five,
                })
                .collect(),
        }));

        let survivors: Vec<PlayerId> = self.table.not_folded().map(|p| p.id).collect();
        let mut payouts = Vec::new();
        for pot in self.pot.side_pots() {
            if pot.amount == 0 {
                continue;
            }
            let mut eligible: Vec<PlayerId> = survivors
                .iter()
                .copied()
                .filter(|id| pot.contributors.contains(id))
                .collect();
            if eligible.is_empty() {
                // every contributor folded or left
                tracing::debug!(side_pot = pot.number, "orphaned side pot goes to survivors");
                eligible = survivors.clone();
            }
            let winners = self.side_pot_winners(&eligible, &best);
            if winners.is_empty() {
                return Err(EngineError::NoWinner {
                    side_pot: pot.number,
                });
            }

            for (player, amount) in split_evenly(pot.amount, &winners) {
                if amount == 0 {
                    continue;
                }
                if let Some(p) = self.table.player_mut(player) {
                    p.balance += amount;
                }
                payouts.push(Payout {
                    side_pot: pot.number,
                    player,
                    amount,
                });
            }
            tracing::info!(
                side_pot = pot.number,
                amount = pot.amount,
                winners = ?winners.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "pot awarded"
            );
            self.log(ActionEvent::game(GameAction::PotAwarded {
                side_pot: pot.number,
                winners,
                amount: pot.amount,
            }));
        }
        Ok(payouts)
    }

    /// Eligible players whose recorded hand is among the best of the group,
    /// in seat order.
    fn side_pot_winners(&self, eligible: &[PlayerId], best: &[(PlayerId, Hand)]) -> Vec<PlayerId> {
        let contenders: Vec<(PlayerId, Hand)> = best
            .iter()
            .copied()
            .filter(|(id, _)| eligible.contains(id))
            .collect();
        if let [(only, _)] = contenders.as_slice() {
            return vec![*only];
        }
        let hands: Vec<Hand> = contenders.iter().map(|&(_, h)| h).collect();
        let top = self.evaluator.best_hands(&hands);
        contenders
            .into_iter()
            .filter(|(_, h)| top.iter().any(|t| self.evaluator.hands_equal(h, t)))
            .map(|(id, _)| id)
            .collect()
    }
}
