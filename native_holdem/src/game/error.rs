//! Error taxonomy for the table engine.
//!
//! `EngineError` is fatal: the chip ledger can no longer be trusted and the
//! hand must not continue. The other enums are player-level problems that
//! the betting loop resolves by folding or unseating the player.

use holdem_shared::PlayerId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("player {player} cannot pay {amount} from a balance of {balance}")]
    BalanceUnderflow {
        player: PlayerId,
        balance: u32,
        amount: u32,
    },
    #[error("player {player} tried to commit a zero-chip bet")]
    ZeroBet { player: PlayerId },
    #[error("player {player} should see 7 cards at showdown, has {count}")]
    CardCount { player: PlayerId, count: usize },
    #[error("evaluator returned no best hand for player {player}")]
    NoBestHand { player: PlayerId },
    #[error("no winner could be matched for side pot {side_pot}")]
    NoWinner { side_pot: usize },
    #[error("controller supplied {supplied} players for {free} free seats")]
    SeatOverflow { supplied: usize, free: usize },
    #[error("player {player} is not seated")]
    UnknownPlayer { player: PlayerId },
    #[error("cannot deal to {seats} seats")]
    DealSize { seats: usize },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    #[error("table is full")]
    Full,
    #[error("player {0} is already seated")]
    AlreadySeated(PlayerId),
}

/// Why a bet was refused. The player is folded and the controller told.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidBet {
    #[error("bet of {amount} exceeds balance {balance}")]
    ExceedsBalance { amount: u32, balance: u32 },
    #[error("raise of {amount} is below the minimum raise {min_raise}")]
    BelowMinRaise { amount: u32, min_raise: u32 },
    #[error("bet leaves {committed} committed, {to_call} needed to call")]
    ShortOfCall { committed: u32, to_call: u32 },
}

/// Failure to obtain a decision from a player.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ControllerError {
    #[error("player {0} timed out")]
    Timeout(PlayerId),
    #[error("player {0} disconnected")]
    Disconnected(PlayerId),
}
