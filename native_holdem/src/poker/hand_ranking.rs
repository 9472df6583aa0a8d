use holdem_shared::{Card, HandRank};

use super::evaluation::rank_cards;

/// Exactly five cards, the unit the evaluator compares.
pub type Hand = [Card; 5];

/// Showdown collaborator: picks the best of a set of five-card hands.
pub trait Evaluator: Send + Sync {
    /// The subset of `candidates` that tie for best. Empty only if
    /// `candidates` is empty.
    fn best_hands(&self, candidates: &[Hand]) -> Vec<Hand>;

    /// Rank equivalence, ignoring suits that do not matter.
    fn hands_equal(&self, a: &Hand, b: &Hand) -> bool;
}

/// Hand ranking utilities and comparisons
#[derive(Clone, Copy, Debug, Default)]
pub struct HandRanker;

impl HandRanker {
    pub fn rank(hand: &Hand) -> HandRank {
        rank_cards(hand)
    }

    /// Compare two hand ranks and return the winner
    pub fn compare_hands(rank1: &HandRank, rank2: &HandRank) -> std::cmp::Ordering {
        rank1.cmp(rank2)
    }
}

impl Evaluator for HandRanker {
    fn best_hands(&self, candidates: &[Hand]) -> Vec<Hand> {
        let ranked: Vec<(HandRank, Hand)> =
            candidates.iter().map(|h| (Self::rank(h), *h)).collect();
        let Some(best) = ranked.iter().map(|(r, _)| r).max().cloned() else {
            return Vec::new();
        };
        ranked
            .into_iter()
            .filter(|(r, _)| Self::compare_hands(r, &best).is_eq())
            .map(|(_, h)| h)
            .collect()
    }

    fn hands_equal(&self, a: &Hand, b: &Hand) -> bool {
        Self::compare_hands(&Self::rank(a), &Self::rank(b)).is_eq()
    }
}
