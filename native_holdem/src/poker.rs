//! Hand strength: a rank-based evaluator behind the [`Evaluator`] seam.

pub mod evaluation;
pub mod hand_ranking;

pub use hand_ranking::{Evaluator, Hand, HandRanker};
