//! The table engine, split by concern. The leaf components come first;
//! `engine` drives them and `betting`/`showdown` extend `Game` with the
//! per-round and end-of-hand logic.

mod betting;
pub mod dealing;
mod engine;
mod error;
pub mod pot;
mod showdown;
pub mod table;
mod utils;

pub use betting::validate_bet;
pub use dealing::{DealAssignment, Location};
pub use engine::{Game, GameSettings, HandOutcome, HandSummary};
pub use error::{ControllerError, EngineError, InvalidBet, TableError};
pub use pot::{Bet, Pot, SidePot};
pub use showdown::{five_card_hands, Payout};
pub use table::{Player, Table, MAX_SEATS};
