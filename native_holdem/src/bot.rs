//! Bot players and the controller that seats them.
//!
//! [`SimpleBot`] picks an action from an [`ActionRequest`]; [`BotController`]
//! owns the waiting pool, simulates think time and bounds every decision by
//! the action timeout.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use holdem_shared::{PlayerAction, PlayerId, Stage};
use rand::random;

use crate::controller::{ActionRequest, Controller};
use crate::game::ControllerError;

/// Information about a bot player's current situation needed for decision making.
#[derive(Debug, Clone)]
pub struct BotContext {
    /// The bot's current stack
    pub stack: u32,
    /// Amount needed to call the current bet
    pub call_amount: u32,
    /// Current bet in the round
    pub current_bet: u32,
    /// Fewest chips a bet or raise may add
    pub min_raise: u32,
    /// Big blind amount
    pub big_blind: u32,
    /// Current stage of the game
    pub stage: Stage,
}

impl From<&ActionRequest> for BotContext {
    fn from(req: &ActionRequest) -> Self {
        Self {
            stack: req.balance,
            call_amount: req.call_amount(),
            current_bet: req.amount_to_call,
            min_raise: req.min_raise,
            big_blind: req.big_blind,
            stage: req.stage,
        }
    }
}

/// Simple bot implementation using basic probabilistic decision making.
#[derive(Debug, Clone)]
pub struct SimpleBot {
    /// Base probability of folding (0.0 to 1.0)
    pub base_fold_chance: f64,
    /// Maximum fold probability cap (0.0 to 1.0)
    pub max_fold_chance: f64,
}

impl Default for SimpleBot {
    fn default() -> Self {
        Self {
            base_fold_chance: 0.10,
            max_fold_chance: 0.95,
        }
    }
}

impl SimpleBot {
    /// Decide what action the bot should take given the current context.
    ///
    /// Bets never go below the minimum raise; when the stack cannot cover
    /// one the bot checks or calls instead.
    pub fn decide_action(&self, context: &BotContext) -> PlayerAction {
        let min_bet = context.min_raise.max(context.big_blind);
        if context.call_amount == 0 {
            if random::<f64>() < 0.3 {
                return PlayerAction::CheckCall;
            }
            let bet_options = [
                min_bet,
                context.big_blind * 2,
                context.big_blind * 3,
                (context.big_blind as f64 * 2.5) as u32,
            ];
            let bet = pick(&bet_options).max(min_bet);
            if bet > context.stack {
                PlayerAction::CheckCall
            } else {
                PlayerAction::Bet(bet)
            }
        } else if context.call_amount >= context.stack {
            // calling puts the bot all-in
            PlayerAction::CheckCall
        } else {
            // higher relative bet size, more likely to fold
            let relative_bet =
                context.call_amount as f64 / (context.stack + context.current_bet) as f64;
            let fold_chance = (self.base_fold_chance
                + relative_bet * (1.0 - self.base_fold_chance))
                .min(self.max_fold_chance);

            if random::<f64>() < fold_chance {
                return PlayerAction::Fold;
            }
            if random::<f64>() >= 0.2 {
                return PlayerAction::CheckCall;
            }
            let remaining_after_call = context.stack - context.call_amount;
            let raise_options = [
                context.big_blind,
                context.current_bet.max(context.big_blind),
                (context.current_bet as f64 * 1.5) as u32,
                remaining_after_call / 2,
                remaining_after_call,
            ];
            let amount = (context.call_amount + pick(&raise_options)).max(min_bet);
            if amount > context.stack {
                PlayerAction::CheckCall
            } else {
                PlayerAction::Bet(amount)
            }
        }
    }
}

fn pick(options: &[u32]) -> u32 {
    let idx = (random::<f32>() * options.len() as f32) as usize;
    options[idx.min(options.len() - 1)]
}

/// Seats bots from a fixed waiting pool and answers for them.
#[derive(Debug)]
pub struct BotController {
    bot: SimpleBot,
    waiting: VecDeque<PlayerId>,
    delay_ms: (u64, u64),
    timeout: Duration,
    released: Vec<PlayerId>,
    invalid_actions: usize,
}

impl BotController {
    pub fn new(bots: usize, delay_ms: (u64, u64), timeout_ms: u64) -> Self {
        Self {
            bot: SimpleBot::default(),
            waiting: (0..bots).map(PlayerId).collect(),
            delay_ms,
            timeout: Duration::from_millis(timeout_ms),
            released: Vec::new(),
            invalid_actions: 0,
        }
    }

    pub fn from_config(cfg: &crate::config::Config) -> Self {
        Self::new(cfg.bots, cfg.bot_delay_ms, cfg.action_timeout_ms)
    }

    /// Players that have left the table, in the order they left.
    pub fn released(&self) -> &[PlayerId] {
        &self.released
    }

    pub fn invalid_actions(&self) -> usize {
        self.invalid_actions
    }

    fn think_time(&self) -> Duration {
        let (lo, hi) = self.delay_ms;
        let ms = if hi > lo { rand::random_range(lo..=hi) } else { lo };
        Duration::from_millis(ms)
    }
}

#[async_trait]
impl Controller for BotController {
    async fn source_new_players(&mut self, needed: usize) -> Vec<PlayerId> {
        let take = needed.min(self.waiting.len());
        self.waiting.drain(..take).collect()
    }

    fn release_player(&mut self, id: PlayerId) {
        self.released.push(id);
    }

    async fn request_action(
        &mut self,
        request: &ActionRequest,
    ) -> Result<PlayerAction, ControllerError> {
        let context = BotContext::from(request);
        let delay = self.think_time();
        let bot = &self.bot;
        let decision = async move {
            tokio::time::sleep(delay).await;
            bot.decide_action(&context)
        };
        let action = tokio::time::timeout(self.timeout, decision)
            .await
            .map_err(|_| ControllerError::Timeout(request.player))?;
        tracing::debug!(
            player = %request.player,
            action = ?action,
            call_amount = request.call_amount(),
            stack = request.balance,
            stage = ?request.stage,
            "bot decision"
        );
        Ok(action)
    }

    fn report_invalid_action(&mut self, id: PlayerId, amount: u32) {
        self.invalid_actions += 1;
        tracing::debug!(player = %id, amount, "bot action refused");
    }
}
