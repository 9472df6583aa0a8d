//! Hand orchestration: seating, blinds, dealing, four betting rounds,
//! showdown and cleanup, repeated for as long as the table can be filled.

use holdem_shared::{
    ActionEvent, ActionKind, BlindKind, GameAction, PlayerId, PlayerStatus, RemovalReason,
    SeatSnapshot, Stage, TableSnapshot,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::dealing::DealAssignment;
use super::error::{EngineError, TableError};
use super::pot::Pot;
use super::showdown::Payout;
use super::table::{Player, Table};
use crate::controller::Controller;
use crate::poker::Evaluator;

/// Number of betting rounds in a hand: pre-flop, flop, turn, river.
pub const BETTING_ROUNDS: u8 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameSettings {
    pub small_blind: u32,
    pub starting_stack: u32,
    /// Seeds the per-hand deal seeds. `None` draws from entropy.
    pub seed: Option<u64>,
}

impl GameSettings {
    pub fn big_blind(&self) -> u32 {
        self.small_blind.saturating_mul(2)
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            small_blind: 10,
            starting_stack: 500,
            seed: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandSummary {
    pub hand: u64,
    pub seed: u64,
    pub rounds_played: u8,
    pub pot_total: u32,
    pub payouts: Vec<Payout>,
    /// Players unseated mid-hand, with the balance they left with.
    pub departed: Vec<Player>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandOutcome {
    /// Fewer than two players could be seated.
    Skipped { seated: usize },
    Played(HandSummary),
}

pub struct Game<C, E> {
    pub table: Table,
    pub pot: Pot,
    pub deal: Option<DealAssignment>,
    pub stage: Stage,
    pub hand_number: u64,
    // canonical in-memory store of typed events
    pub recent_actions: Vec<ActionEvent>,
    pub(crate) departed: Vec<Player>,
    pub(crate) settings: GameSettings,
    pub(crate) controller: C,
    pub(crate) evaluator: E,
    rng: StdRng,
}

impl<C: Controller, E: Evaluator> Game<C, E> {
    pub fn new(settings: GameSettings, controller: C, evaluator: E) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        tracing::debug!(seed, "table rng seeded");
        Self {
            table: Table::new(),
            pot: Pot::new(),
            deal: None,
            stage: Stage::Seating,
            hand_number: 0,
            recent_actions: Vec::new(),
            departed: Vec::new(),
            settings,
            controller,
            evaluator,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Play hands until `max_hands` is reached or the table cannot seat two
    /// players.
    pub async fn run(&mut self, max_hands: Option<usize>) -> Result<Vec<HandSummary>, EngineError> {
        let mut played = Vec::new();
        while max_hands.is_none_or(|max| played.len() < max) {
            match self.play_hand().await? {
                HandOutcome::Played(summary) => played.push(summary),
                HandOutcome::Skipped { seated } => {
                    tracing::info!(seated, "not enough players for a hand, stopping");
                    break;
                }
            }
        }
        Ok(played)
    }

    pub async fn play_hand(&mut self) -> Result<HandOutcome, EngineError> {
        self.set_stage(Stage::Seating);
        self.remove_broke_players();
        self.seat_waiting_players().await?;
        if self.table.len() < 2 {
            return Ok(HandOutcome::Skipped {
                seated: self.table.len(),
            });
        }

        self.hand_number += 1;
        let seed: u64 = self.rng.random();
        self.pot = Pot::new();
        self.departed.clear();
        self.log(ActionEvent::game(GameAction::HandStarted {
            hand: self.hand_number,
            seed,
        }));
        tracing::info!(hand = self.hand_number, seed, players = self.table.len(), "hand started");

        self.set_stage(Stage::Blinds);
        self.post_blinds()?;

        self.set_stage(Stage::Dealing);
        let deal = self.deal_cards(seed)?;

        let mut rounds_played = 0;
        for round in 0..BETTING_ROUNDS {
            if !self.hand_contested() {
                break;
            }
            let Some(stage) = Stage::from_round(round) else {
                break;
            };
            self.set_stage(stage);
            if round > 0 {
                self.log(ActionEvent::game(GameAction::DealtCommunity {
                    cards: deal.community_through(round as usize),
                }));
            }
            self.run_betting_round().await?;
            self.table.reset_for_new_round();
            self.close_round();
            rounds_played += 1;
        }

        self.set_stage(Stage::Showdown);
        let pot_total = self.pot.total();
        let payouts = self.resolve_bets(&deal)?;

        self.set_stage(Stage::Cleanup);
        self.table.advance_button();
        self.table.reset_for_new_hand();
        self.pot = Pot::new();
        self.deal = None;

        Ok(HandOutcome::Played(HandSummary {
            hand: self.hand_number,
            seed,
            rounds_played,
            pot_total,
            payouts,
            departed: std::mem::take(&mut self.departed),
        }))
    }

    /// More than one player has not folded.
    pub fn hand_contested(&self) -> bool {
        self.table.not_folded().count() > 1
    }

    fn remove_broke_players(&mut self) {
        let broke: Vec<PlayerId> = self
            .table
            .players()
            .iter()
            .filter(|p| p.balance == 0)
            .map(|p| p.id)
            .collect();
        for id in broke {
            if let Some(p) = self.table.player_mut(id) {
                p.status = PlayerStatus::Folded;
            }
            self.unseat(id, RemovalReason::Broke);
        }
    }

    async fn seat_waiting_players(&mut self) -> Result<(), EngineError> {
        let free = self.table.free_seats();
        if free == 0 {
            return Ok(());
        }
        let newcomers = self.controller.source_new_players(free).await;
        if newcomers.len() > free {
            return Err(EngineError::SeatOverflow {
                supplied: newcomers.len(),
                free,
            });
        }
        let stack = self.settings.starting_stack;
        for id in newcomers {
            match self.table.add_player(id, stack) {
                Ok(()) => {
                    tracing::info!(player = %id, stack, "player seated");
                    self.log(ActionEvent::game(GameAction::PlayerSeated {
                        player_id: id,
                        stack,
                    }));
                }
                Err(TableError::AlreadySeated(id)) => {
                    tracing::warn!(player = %id, "ignoring duplicate seat request");
                }
                Err(TableError::Full) => {
                    tracing::warn!(player = %id, "table full, player not seated");
                    self.controller.release_player(id);
                }
            }
        }
        Ok(())
    }

    /// The next two seats in rotation post small and big blind, capped at
    /// what they hold.
    fn post_blinds(&mut self) -> Result<(), EngineError> {
        let blinds = [
            (BlindKind::SmallBlind, self.settings.small_blind),
            (BlindKind::BigBlind, self.settings.big_blind()),
        ];
        for (kind, amount) in blinds {
            let Some(id) = self.table.next() else {
                break;
            };
            let balance = self.balance_of(id)?;
            let posted = amount.min(balance);
            if posted > 0 {
                self.commit_bet(id, posted)?;
            }
            self.log(ActionEvent::player(
                id,
                ActionKind::PostBlind {
                    kind,
                    amount: posted,
                },
            ));
            tracing::info!(
                player = %id,
                kind = ?kind,
                amount = posted,
                stack = balance - posted,
                "posted blind"
            );
        }
        Ok(())
    }

    fn deal_cards(&mut self, seed: u64) -> Result<DealAssignment, EngineError> {
        let deal = DealAssignment::deal(&self.table.ids(), seed)?;
        for id in self.table.ids() {
            let hole = deal.hole_cards(id);
            let cards: Vec<String> = hole.iter().map(|c| c.to_string()).collect();
            tracing::debug!(player = %id, cards = ?cards, "dealt hole cards");
            self.log(ActionEvent::game(GameAction::DealtHole { player_id: id }));
        }
        tracing::trace!(seed = deal.seed(), "{deal}");
        self.deal = Some(deal.clone());
        Ok(deal)
    }

    fn close_round(&mut self) {
        for side_pot in self.pot.begin_new_round() {
            tracing::info!(hand = self.hand_number, side_pot, "side pot opened");
            self.log(ActionEvent::game(GameAction::SidePotOpened { side_pot }));
        }
    }

    /// The only path by which chips leave a balance.
    pub(crate) fn commit_bet(&mut self, id: PlayerId, amount: u32) -> Result<(), EngineError> {
        if amount == 0 {
            return Err(EngineError::ZeroBet { player: id });
        }
        let player = self
            .table
            .player_mut(id)
            .ok_or(EngineError::UnknownPlayer { player: id })?;
        player.balance = player
            .balance
            .checked_sub(amount)
            .ok_or(EngineError::BalanceUnderflow {
                player: id,
                balance: player.balance,
                amount,
            })?;
        self.pot.receive_bet(id, amount);
        Ok(())
    }

    pub(crate) fn balance_of(&self, id: PlayerId) -> Result<u32, EngineError> {
        self.table
            .player(id)
            .map(|p| p.balance)
            .ok_or(EngineError::UnknownPlayer { player: id })
    }

    pub(crate) fn set_status(&mut self, id: PlayerId, status: PlayerStatus) {
        if let Some(p) = self.table.player_mut(id) {
            p.status = status;
        }
    }

    /// Take a player off the table and tell the controller. Chips already
    /// in the pot stay there.
    pub(crate) fn unseat(&mut self, id: PlayerId, reason: RemovalReason) {
        if let Some(player) = self.table.remove_player(id) {
            tracing::info!(
                player = %id,
                reason = ?reason,
                balance = player.balance,
                "player removed"
            );
            self.departed.push(player);
            self.controller.release_player(id);
            self.log(ActionEvent::game(GameAction::PlayerRemoved {
                player_id: id,
                reason,
            }));
        }
    }

    fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
        tracing::debug!(hand = self.hand_number, stage = ?stage, "stage changed");
        self.log(ActionEvent::game(GameAction::StageChanged(stage)));
    }

    pub fn snapshot(&self) -> TableSnapshot {
        let seats = self
            .table
            .players()
            .iter()
            .map(|p| SeatSnapshot {
                id: p.id,
                status: p.status,
                balance: p.balance,
                committed_this_round: self.pot.total_committed_this_round(p.id),
            })
            .collect();
        let streets = match self.stage {
            Stage::Flop => 1,
            Stage::Turn => 2,
            Stage::River | Stage::Showdown => 3,
            _ => 0,
        };
        TableSnapshot {
            hand: self.hand_number,
            stage: self.stage,
            seats,
            community: self
                .deal
                .as_ref()
                .map(|d| d.community_through(streets))
                .unwrap_or_default(),
            pot: self.pot.total(),
            side_pots: self.pot.side_pots().iter().map(Into::into).collect(),
            amount_to_call: self.pot.amount_to_call(),
            min_raise: self.pot.min_raise(),
            small_blind: self.settings.small_blind,
            action_log: self.recent_actions.clone(),
        }
    }

    pub(crate) fn log(&mut self, ev: ActionEvent) {
        self.recent_actions.push(ev);
        super::utils::cap_logs(&mut self.recent_actions);
    }
}
