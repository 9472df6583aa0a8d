//! Showdown hand selection with the rank-based evaluator.

use holdem_shared::{Card, CardRank, CardSuit, HandRankCategory};
use native_holdem::game::{five_card_hands, DealAssignment};
use native_holdem::poker::evaluation::{evaluate_best_hand, rank_cards};
use native_holdem::{Evaluator, HandRanker};

#[test]
fn best_of_twenty_one_matches_seven_card_rank() {
    // Hole: K♣, 4♠
    // Board: K♥, T♠, 9♥, 9♣, 4♣
    let hole = [
        Card::new(CardRank::King, CardSuit::Clubs),
        Card::new(CardRank::Four, CardSuit::Spades),
    ];
    let board = [
        Card::new(CardRank::King, CardSuit::Hearts),
        Card::new(CardRank::Ten, CardSuit::Spades),
        Card::new(CardRank::Nine, CardSuit::Hearts),
        Card::new(CardRank::Nine, CardSuit::Clubs),
        Card::new(CardRank::Four, CardSuit::Clubs),
    ];
    let mut seven = hole.to_vec();
    seven.extend_from_slice(&board);

    let best = HandRanker.best_hands(&five_card_hands(&seven));
    assert!(!best.is_empty());
    let rank = rank_cards(&best[0]);
    assert_eq!(rank, evaluate_best_hand(hole, &board));
    assert_eq!(rank.category, HandRankCategory::TwoPair);
    assert_eq!(rank.tiebreakers, vec![13, 9, 10]);
}

#[test]
fn board_plays_for_everyone_is_a_tie() {
    // royal flush on the board
    let board = [
        Card::new(CardRank::Ace, CardSuit::Spades),
        Card::new(CardRank::King, CardSuit::Spades),
        Card::new(CardRank::Queen, CardSuit::Spades),
        Card::new(CardRank::Jack, CardSuit::Spades),
        Card::new(CardRank::Ten, CardSuit::Spades),
    ];
    let a = [
        Card::new(CardRank::Two, CardSuit::Hearts),
        Card::new(CardRank::Three, CardSuit::Clubs),
    ];
    let b = [
        Card::new(CardRank::Ace, CardSuit::Hearts),
        Card::new(CardRank::Ace, CardSuit::Clubs),
    ];
    let best_of = |hole: [Card; 2]| {
        let mut seven = hole.to_vec();
        seven.extend_from_slice(&board);
        HandRanker.best_hands(&five_card_hands(&seven))[0]
    };
    let (ha, hb) = (best_of(a), best_of(b));
    assert!(HandRanker.hands_equal(&ha, &hb));
    assert_eq!(HandRanker.best_hands(&[ha, hb]).len(), 2);
}

#[test]
fn dealt_hands_always_evaluate() {
    let seats: Vec<_> = (0..6).map(holdem_shared::PlayerId).collect();
    for seed in 0..20u64 {
        let deal = DealAssignment::deal(&seats, seed).unwrap();
        for &id in &seats {
            let hands = five_card_hands(&deal.visible_to(id));
            assert_eq!(hands.len(), 21);
            assert!(!HandRanker.best_hands(&hands).is_empty());
        }
    }
}
