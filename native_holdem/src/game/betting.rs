//! Betting round state machine and action handling for Game.

use holdem_shared::{ActionEvent, ActionKind, PlayerAction, PlayerId, PlayerStatus, RemovalReason};

use super::engine::Game;
use super::error::{EngineError, InvalidBet};
use crate::controller::{ActionRequest, Controller};
use crate::poker::Evaluator;

/// Legality of adding `amount` chips for a player holding `balance` with
/// `committed` already in this round.
///
/// Calls and short all-in calls are always allowed. Anything that raises
/// the call target must add at least `min_raise` chips, all-in or not.
pub fn validate_bet(
    balance: u32,
    committed: u32,
    amount_to_call: u32,
    min_raise: u32,
    amount: u32,
) -> Result<(), InvalidBet> {
    if amount > balance {
        return Err(InvalidBet::ExceedsBalance { amount, balance });
    }
    let total = committed.saturating_add(amount);
    if total > amount_to_call && amount < min_raise {
        return Err(InvalidBet::BelowMinRaise { amount, min_raise });
    }
    if total < amount_to_call && amount < balance {
        return Err(InvalidBet::ShortOfCall {
            committed: total,
            to_call: amount_to_call,
        });
    }
    Ok(())
}

impl<C: Controller, E: Evaluator> Game<C, E> {
    /// Ask players in rotation order until the round closes.
    pub(crate) async fn run_betting_round(&mut self) -> Result<(), EngineError> {
        while self.betting_needed() {
            let Some(id) = self.table.next() else {
                break;
            };
            let Some(player) = self.table.player(id) else {
                continue;
            };
            if player.status != PlayerStatus::Active {
                continue;
            }
            if player.is_all_in() {
                self.set_status(id, PlayerStatus::Called);
                continue;
            }

            let request = self.action_request(id)?;
            match self.controller.request_action(&request).await {
                Ok(action) => self.apply_action(id, action)?,
                Err(e) => {
                    tracing::warn!(player = %id, error = %e, "no action from player, removing");
                    self.set_status(id, PlayerStatus::Folded);
                    self.log(ActionEvent::player(id, ActionKind::Fold));
                    self.unseat(id, RemovalReason::Disconnected);
                }
            }
        }
        Ok(())
    }

    /// The round stays open while two or more players are contesting and
    /// some player with chips has not yet matched the call target.
    pub(crate) fn betting_needed(&self) -> bool {
        if !self.hand_contested() {
            return false;
        }
        let able: Vec<_> = self.table.not_folded().filter(|p| p.balance > 0).collect();
        if !able.iter().any(|p| p.status == PlayerStatus::Active) {
            return false;
        }
        match able.as_slice() {
            // nobody left to bet against
            [last] => self.pot.total_committed_this_round(last.id) < self.pot.amount_to_call(),
            _ => true,
        }
    }

    fn action_request(&self, id: PlayerId) -> Result<ActionRequest, EngineError> {
        Ok(ActionRequest {
            player: id,
            stage: self.stage,
            balance: self.balance_of(id)?,
            committed: self.pot.total_committed_this_round(id),
            amount_to_call: self.pot.amount_to_call(),
            min_raise: self.pot.min_raise(),
            big_blind: self.settings.big_blind(),
        })
    }

    pub(crate) fn apply_action(
        &mut self,
        id: PlayerId,
        action: PlayerAction,
    ) -> Result<(), EngineError> {
        let balance = self.balance_of(id)?;
        let committed = self.pot.total_committed_this_round(id);
        let to_call = self.pot.amount_to_call();
        match action {
            PlayerAction::Fold => self.execute_fold(id),
            PlayerAction::CheckCall => {
                let pay = to_call.saturating_sub(committed).min(balance);
                self.execute_call(id, pay)?;
            }
            PlayerAction::Bet(amount) => {
                match validate_bet(balance, committed, to_call, self.pot.min_raise(), amount) {
                    Err(reason) => {
                        tracing::warn!(
                            player = %id,
                            amount,
                            %reason,
                            "invalid bet, folding player"
                        );
                        self.controller.report_invalid_action(id, amount);
                        self.log(ActionEvent::player(id, ActionKind::InvalidBet { amount }));
                        self.execute_fold(id);
                    }
                    Ok(()) if committed + amount > to_call => {
                        self.execute_raise(id, amount, committed, to_call)?;
                    }
                    Ok(()) => self.execute_call(id, amount)?,
                }
            }
        }
        Ok(())
    }

    fn execute_fold(&mut self, id: PlayerId) {
        self.set_status(id, PlayerStatus::Folded);
        self.log(ActionEvent::player(id, ActionKind::Fold));
        tracing::info!(player = %id, "fold");
    }

    /// Check when `pay` is zero, otherwise call (possibly all-in for less).
    fn execute_call(&mut self, id: PlayerId, pay: u32) -> Result<(), EngineError> {
        if pay == 0 {
            self.log(ActionEvent::player(id, ActionKind::Check));
            tracing::info!(player = %id, "check");
        } else {
            self.commit_bet(id, pay)?;
            self.log(ActionEvent::player(id, ActionKind::Call(pay)));
            tracing::info!(player = %id, amount = pay, "call");
        }
        self.set_status(id, PlayerStatus::Called);
        Ok(())
    }

    fn execute_raise(
        &mut self,
        id: PlayerId,
        amount: u32,
        committed: u32,
        to_call: u32,
    ) -> Result<(), EngineError> {
        self.table.reopen_action(id);
        self.commit_bet(id, amount)?;
        self.set_status(id, PlayerStatus::Called);
        let to = committed + amount;
        let kind = if to_call == 0 {
            ActionKind::Bet(amount)
        } else {
            ActionKind::Raise {
                to,
                by: to - to_call,
            }
        };
        tracing::info!(player = %id, amount, to, min_raise = self.pot.min_raise(), "raise");
        self.log(ActionEvent::player(id, kind));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calling_exactly_is_always_legal() {
        // small blind completing to the big blind while min raise is 20
        assert_eq!(validate_bet(490, 10, 20, 20, 10), Ok(()));
    }

    #[test]
    fn over_balance_is_refused() {
        assert_eq!(
            validate_bet(50, 0, 20, 20, 60),
            Err(InvalidBet::ExceedsBalance {
                amount: 60,
                balance: 50
            })
        );
    }

    #[test]
    fn small_raise_is_refused_even_all_in() {
        assert_eq!(
            validate_bet(25, 0, 20, 40, 25),
            Err(InvalidBet::BelowMinRaise {
                amount: 25,
                min_raise: 40
            })
        );
        assert_eq!(validate_bet(500, 0, 20, 40, 40), Ok(()));
    }

    #[test]
    fn short_call_only_when_all_in() {
        assert_eq!(
            validate_bet(100, 0, 20, 20, 5),
            Err(InvalidBet::ShortOfCall {
                committed: 5,
                to_call: 20
            })
        );
        assert_eq!(validate_bet(15, 0, 20, 20, 15), Ok(()));
    }

    #[test]
    fn zero_bet_is_a_check_when_nothing_is_owed() {
        assert_eq!(validate_bet(100, 20, 20, 20, 0), Ok(()));
        assert!(validate_bet(100, 0, 20, 20, 0).is_err());
    }
}
