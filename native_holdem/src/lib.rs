pub mod bot;
pub mod cli;
pub mod config;
pub mod controller;
pub mod game;
pub mod poker;
pub mod pretty;

pub use controller::{ActionRequest, Controller};
pub use game::{EngineError, Game, GameSettings, HandOutcome, HandSummary};
pub use poker::{Evaluator, Hand, HandRanker};
