//! Whole hands driven by scripted players.

use std::collections::{HashMap, VecDeque};

use anyhow::Result;
use async_trait::async_trait;
use holdem_shared::{
    ActionEvent, ActionKind, GameAction, PlayerAction, PlayerId, RemovalReason, Stage,
};
use native_holdem::game::{ControllerError, EngineError, Payout};
use native_holdem::poker::{Evaluator, Hand};
use native_holdem::{
    ActionRequest, Controller, Game, GameSettings, HandOutcome, HandRanker, HandSummary,
};

const P0: PlayerId = PlayerId(0);
const P1: PlayerId = PlayerId(1);
const P2: PlayerId = PlayerId(2);
const P3: PlayerId = PlayerId(3);

/// Plays from a per-player queue of answers; an empty queue checks or calls.
#[derive(Default)]
struct Scripted {
    waiting: VecDeque<PlayerId>,
    script: HashMap<PlayerId, VecDeque<Result<PlayerAction, ControllerError>>>,
    oversupply: bool,
    asked: Vec<ActionRequest>,
    released: Vec<PlayerId>,
    invalid: Vec<(PlayerId, u32)>,
}

impl Scripted {
    fn seating(n: usize) -> Self {
        Self {
            waiting: (0..n).map(PlayerId).collect(),
            ..Self::default()
        }
    }

    fn then(mut self, id: PlayerId, action: PlayerAction) -> Self {
        self.script.entry(id).or_default().push_back(Ok(action));
        self
    }

    fn then_fail(mut self, id: PlayerId, err: ControllerError) -> Self {
        self.script.entry(id).or_default().push_back(Err(err));
        self
    }

    fn asked_in(&self, stage: Stage) -> Vec<PlayerId> {
        self.asked
            .iter()
            .filter(|r| r.stage == stage)
            .map(|r| r.player)
            .collect()
    }
}

#[async_trait]
impl Controller for Scripted {
    async fn source_new_players(&mut self, needed: usize) -> Vec<PlayerId> {
        let take = if self.oversupply {
            self.waiting.len()
        } else {
            needed.min(self.waiting.len())
        };
        self.waiting.drain(..take).collect()
    }

    fn release_player(&mut self, id: PlayerId) {
        self.released.push(id);
    }

    async fn request_action(
        &mut self,
        request: &ActionRequest,
    ) -> Result<PlayerAction, ControllerError> {
        self.asked.push(*request);
        self.script
            .get_mut(&request.player)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Ok(PlayerAction::CheckCall))
    }

    fn report_invalid_action(&mut self, id: PlayerId, amount: u32) {
        self.invalid.push((id, amount));
    }
}

/// Every hand ties, so pots split evenly among whoever is eligible.
struct AllTie;

impl Evaluator for AllTie {
    fn best_hands(&self, candidates: &[Hand]) -> Vec<Hand> {
        candidates.to_vec()
    }

    fn hands_equal(&self, _a: &Hand, _b: &Hand) -> bool {
        true
    }
}

/// Never finds a best hand.
struct NoHands;

impl Evaluator for NoHands {
    fn best_hands(&self, _candidates: &[Hand]) -> Vec<Hand> {
        Vec::new()
    }

    fn hands_equal(&self, _a: &Hand, _b: &Hand) -> bool {
        true
    }
}

/// Picks hands but never matches one against another.
struct NeverEqual;

impl Evaluator for NeverEqual {
    fn best_hands(&self, candidates: &[Hand]) -> Vec<Hand> {
        candidates.to_vec()
    }

    fn hands_equal(&self, _a: &Hand, _b: &Hand) -> bool {
        false
    }
}

fn settings() -> GameSettings {
    GameSettings {
        small_blind: 10,
        starting_stack: 500,
        seed: Some(42),
    }
}

fn played(outcome: HandOutcome) -> HandSummary {
    match outcome {
        HandOutcome::Played(summary) => summary,
        HandOutcome::Skipped { seated } => panic!("hand skipped with {seated} seated"),
    }
}

fn balance<C: Controller, E: Evaluator>(game: &Game<C, E>, id: PlayerId) -> u32 {
    game.table.player(id).map(|p| p.balance).unwrap_or(0)
}

fn logged(game: &Game<Scripted, AllTie>, wanted: &ActionEvent) -> bool {
    game.recent_actions.iter().any(|ev| ev == wanted)
}

#[tokio::test]
async fn heads_up_limped_pot() -> Result<()> {
    let mut game = Game::new(settings(), Scripted::seating(2), AllTie);
    let summary = played(game.play_hand().await?);

    assert_eq!(summary.pot_total, 40);
    assert_eq!(summary.rounds_played, 4);
    let ctl = game.controller();
    assert_eq!(ctl.asked_in(Stage::Preflop), vec![P0, P1]);
    // both at 480 once the pre-flop round has closed
    let first_flop = ctl.asked.iter().find(|r| r.stage == Stage::Flop).unwrap();
    assert_eq!(first_flop.balance, 480);
    assert_eq!(first_flop.amount_to_call, 0);

    assert!(logged(&game, &ActionEvent::player(P0, ActionKind::Call(10))));
    assert!(logged(&game, &ActionEvent::player(P1, ActionKind::Check)));
    assert!(!game
        .recent_actions
        .iter()
        .any(|ev| matches!(ev, ActionEvent::GameAction(GameAction::SidePotOpened { .. }))));

    assert_eq!(
        summary.payouts,
        vec![
            Payout { side_pot: 0, player: P0, amount: 20 },
            Payout { side_pot: 0, player: P1, amount: 20 },
        ]
    );
    assert_eq!(game.table.total_balance(), 1000);
    Ok(())
}

#[tokio::test]
async fn short_stack_all_in_opens_a_side_pot() -> Result<()> {
    let ctl = Scripted::default().then(P0, PlayerAction::Bet(40));
    let mut game = Game::new(settings(), ctl, AllTie);
    game.table.add_player(P0, 500)?;
    game.table.add_player(P1, 15)?;

    let summary = played(game.play_hand().await?);

    // the big blind is capped at 15 and the short stack is never asked
    assert!(logged(
        &game,
        &ActionEvent::player(
            P1,
            ActionKind::PostBlind {
                kind: holdem_shared::BlindKind::BigBlind,
                amount: 15
            }
        )
    ));
    assert!(game.controller().asked.iter().all(|r| r.player == P0));
    assert!(logged(&game, &ActionEvent::game(GameAction::SidePotOpened { side_pot: 1 })));

    assert_eq!(summary.pot_total, 65);
    assert_eq!(
        summary.payouts,
        vec![
            Payout { side_pot: 0, player: P0, amount: 15 },
            Payout { side_pot: 0, player: P1, amount: 15 },
            Payout { side_pot: 1, player: P0, amount: 35 },
        ]
    );
    assert_eq!(balance(&game, P0), 500);
    assert_eq!(balance(&game, P1), 15);
    Ok(())
}

#[tokio::test]
async fn raise_reopens_action_for_callers() -> Result<()> {
    let ctl = Scripted::seating(3).then(P1, PlayerAction::Bet(40));
    let mut game = Game::new(settings(), ctl, AllTie);
    let summary = played(game.play_hand().await?);

    let ctl = game.controller();
    assert_eq!(ctl.asked_in(Stage::Preflop), vec![P2, P0, P1, P2, P0]);
    let second = &ctl.asked[3];
    assert_eq!(second.amount_to_call, 60);
    assert_eq!(second.committed, 20);
    assert_eq!(second.min_raise, 80);
    assert!(logged(&game, &ActionEvent::player(P1, ActionKind::Raise { to: 60, by: 40 })));
    assert_eq!(summary.pot_total, 180);
    assert_eq!(game.table.total_balance(), 1500);
    Ok(())
}

#[tokio::test]
async fn every_street_closes_after_one_call_each() -> Result<()> {
    let mut game = Game::new(settings(), Scripted::seating(4), AllTie);
    played(game.play_hand().await?);

    let ctl = game.controller();
    for stage in [Stage::Preflop, Stage::Flop, Stage::Turn, Stage::River] {
        assert_eq!(ctl.asked_in(stage).len(), 4, "{stage:?}");
    }
    assert_eq!(ctl.asked.len(), 16);
    Ok(())
}

#[tokio::test]
async fn raiser_wins_when_everyone_folds_to_them() -> Result<()> {
    // the raiser is never asked again once the others fold
    let ctl = Scripted::seating(3)
        .then(P1, PlayerAction::Bet(40))
        .then(P2, PlayerAction::CheckCall)
        .then(P2, PlayerAction::Fold)
        .then(P0, PlayerAction::CheckCall)
        .then(P0, PlayerAction::Fold);
    let mut game = Game::new(settings(), ctl, AllTie);
    let summary = played(game.play_hand().await?);

    assert_eq!(game.controller().asked.len(), 5);
    assert_eq!(summary.rounds_played, 1);
    assert_eq!(summary.pot_total, 100);
    assert_eq!(balance(&game, P1), 540);
    assert_eq!(balance(&game, P0), 480);
    assert_eq!(balance(&game, P2), 480);
    Ok(())
}

#[tokio::test]
async fn re_raise_with_a_fold_leaves_dead_money_in_the_main_pot() -> Result<()> {
    let ctl = Scripted::seating(3)
        .then(P2, PlayerAction::Bet(60))
        .then(P0, PlayerAction::CheckCall)
        .then(P1, PlayerAction::Bet(120))
        .then(P2, PlayerAction::Fold);
    let mut game = Game::new(settings(), ctl, AllTie);
    let summary = played(game.play_hand().await?);

    assert_eq!(game.controller().asked_in(Stage::Preflop), vec![P2, P0, P1, P2, P0]);
    assert_eq!(summary.pot_total, 340);
    let main: u32 = summary.payouts.iter().filter(|p| p.side_pot == 0).map(|p| p.amount).sum();
    assert_eq!(main, 180);
    assert!(summary.payouts.iter().all(|p| p.player != P2));
    assert_eq!(balance(&game, P2), 440);
    assert_eq!(game.table.total_balance(), 1500);
    Ok(())
}

#[tokio::test]
async fn disconnect_forfeits_the_seat() -> Result<()> {
    let ctl = Scripted::seating(3).then_fail(P2, ControllerError::Disconnected(P2));
    let mut game = Game::new(settings(), ctl, AllTie);
    let summary = played(game.play_hand().await?);

    assert_eq!(game.table.ids(), vec![P1, P0]);
    assert_eq!(game.controller().released, vec![P2]);
    assert_eq!(summary.departed.len(), 1);
    assert_eq!(summary.departed[0].id, P2);
    assert_eq!(summary.departed[0].balance, 500);
    assert!(logged(
        &game,
        &ActionEvent::game(GameAction::PlayerRemoved {
            player_id: P2,
            reason: RemovalReason::Disconnected
        })
    ));
    // the hand carried on without them
    assert_eq!(summary.rounds_played, 4);
    assert_eq!(game.table.total_balance(), 1000);
    Ok(())
}

#[tokio::test]
async fn short_bet_is_reported_and_folded() -> Result<()> {
    let ctl = Scripted::seating(2).then(P0, PlayerAction::Bet(5));
    let mut game = Game::new(settings(), ctl, AllTie);
    let summary = played(game.play_hand().await?);

    assert_eq!(game.controller().invalid, vec![(P0, 5)]);
    assert!(logged(&game, &ActionEvent::player(P0, ActionKind::InvalidBet { amount: 5 })));
    assert_eq!(game.controller().asked.len(), 1);
    assert_eq!(summary.rounds_played, 1);
    assert_eq!(balance(&game, P0), 490);
    assert_eq!(balance(&game, P1), 510);
    Ok(())
}

#[tokio::test]
async fn lone_player_skips_the_hand() -> Result<()> {
    let mut game = Game::new(settings(), Scripted::seating(1), AllTie);
    assert_eq!(game.play_hand().await?, HandOutcome::Skipped { seated: 1 });
    assert!(game.run(Some(5)).await?.is_empty());
    assert_eq!(game.hand_number, 0);
    Ok(())
}

#[tokio::test]
async fn oversupplied_seats_are_fatal() {
    let ctl = Scripted {
        oversupply: true,
        ..Scripted::seating(12)
    };
    let mut game = Game::new(settings(), ctl, AllTie);
    let err = game.play_hand().await.unwrap_err();
    assert_eq!(err, EngineError::SeatOverflow { supplied: 12, free: 10 });
}

#[tokio::test]
async fn button_moves_each_hand() -> Result<()> {
    let mut game = Game::new(settings(), Scripted::seating(3), AllTie);
    played(game.play_hand().await?);
    assert_eq!(game.table.ids(), vec![P1, P2, P0]);
    played(game.play_hand().await?);
    // P1 posted the small blind this time, so P0 acted first
    assert_eq!(game.controller().asked_in(Stage::Preflop)[3], P0);
    assert_eq!(game.table.ids(), vec![P2, P0, P1]);
    Ok(())
}

#[tokio::test]
async fn chips_are_conserved_over_many_real_hands() -> Result<()> {
    let ctl = Scripted::seating(4)
        .then(P2, PlayerAction::Bet(480))
        .then(P3, PlayerAction::CheckCall)
        .then(P0, PlayerAction::Bet(100))
        .then(P1, PlayerAction::Fold);
    let mut game = Game::new(settings(), ctl, HandRanker);

    for _ in 0..6 {
        let before = game.table.total_balance();
        match game.play_hand().await? {
            HandOutcome::Played(summary) => {
                let left: u64 = summary.departed.iter().map(|p| p.balance as u64).sum();
                let paid: u32 = summary.payouts.iter().map(|p| p.amount).sum();
                assert_eq!(paid, summary.pot_total);
                assert_eq!(game.table.total_balance() + left, before);
            }
            HandOutcome::Skipped { .. } => break,
        }
    }
    Ok(())
}

#[tokio::test]
async fn evaluator_without_a_best_hand_is_fatal() {
    let mut game = Game::new(settings(), Scripted::seating(2), NoHands);
    let err = game.play_hand().await.unwrap_err();
    assert_eq!(err, EngineError::NoBestHand { player: P0 });
    // nothing was paid out
    assert_eq!(game.table.total_balance(), 960);
}

#[tokio::test]
async fn unmatched_best_hands_leave_the_pot_without_a_winner() {
    let mut game = Game::new(settings(), Scripted::seating(2), NeverEqual);
    let err = game.play_hand().await.unwrap_err();
    assert_eq!(err, EngineError::NoWinner { side_pot: 0 });
    assert_eq!(game.table.total_balance(), 960);
}
