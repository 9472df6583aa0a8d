use holdem_shared::{Card, HandRank, HandRankCategory};

const NUM_SUITS: usize = 4;
// indices 0..=14 so that high values (2..=14) and the low ace (1) fit
const RANK_SLOTS: usize = 15;

/// Evaluate the best 5-card hand from 2 hole + up to 5 community cards.
pub fn evaluate_best_hand(hole: [Card; 2], community: &[Card]) -> HandRank {
    let mut cards = Vec::with_capacity(7);
    cards.extend_from_slice(&hole);
    cards.extend_from_slice(community);
    rank_cards(&cards)
}

/// Rank a set of five to seven cards by the best hand they contain.
pub fn rank_cards(cards: &[Card]) -> HandRank {
    let flush_suit = flush_suit(cards);

    if let Some(sflush) = check_straight_flush(cards, flush_suit) {
        return sflush;
    }

    let (counts, all_values) = analyze_card_values(cards);

    if let Some(quads) = find_n_of_a_kind(&counts, 4, &all_values, 1) {
        return with_kickers(HandRankCategory::FourKind, quads);
    }
    if let Some((trip, pair)) = find_full_house(&counts) {
        return HandRank {
            category: HandRankCategory::FullHouse,
            tiebreakers: vec![trip, pair],
        };
    }
    if let Some(flush) = check_flush(cards, flush_suit) {
        return flush;
    }
    if let Some(high) = straight_high(&unique_values(cards)) {
        return HandRank {
            category: HandRankCategory::Straight,
            tiebreakers: vec![high],
        };
    }
    if let Some(trips) = find_n_of_a_kind(&counts, 3, &all_values, 2) {
        return with_kickers(HandRankCategory::ThreeKind, trips);
    }
    if let Some((high, low, kicker)) = find_two_pair(&counts, &all_values) {
        return HandRank {
            category: HandRankCategory::TwoPair,
            tiebreakers: vec![high, low, kicker],
        };
    }
    if let Some(pair) = find_n_of_a_kind(&counts, 2, &all_values, 3) {
        return with_kickers(HandRankCategory::Pair, pair);
    }

    let mut highs = all_values;
    highs.sort_unstable_by(|a, b| b.cmp(a));
    highs.truncate(5);
    HandRank {
        category: HandRankCategory::HighCard,
        tiebreakers: highs,
    }
}

fn with_kickers(category: HandRankCategory, (rank, kickers): (u8, Vec<u8>)) -> HandRank {
    let mut tiebreakers = vec![rank];
    tiebreakers.extend(kickers);
    HandRank {
        category,
        tiebreakers,
    }
}

fn cards_by_suit(cards: &[Card]) -> [Vec<Card>; NUM_SUITS] {
    let mut by_suit: [Vec<Card>; NUM_SUITS] = Default::default();
    for &c in cards {
        by_suit[c.suit().as_usize()].push(c);
    }
    by_suit
}

fn flush_suit(cards: &[Card]) -> Option<usize> {
    let by_suit = cards_by_suit(cards);
    (0..NUM_SUITS).find(|&s| by_suit[s].len() >= 5)
}

fn analyze_card_values(cards: &[Card]) -> ([u8; RANK_SLOTS], Vec<u8>) {
    let mut counts = [0u8; RANK_SLOTS];
    let mut all_values = Vec::with_capacity(cards.len());
    for &c in cards {
        let v = c.rank().high_value();
        counts[v as usize] += 1;
        all_values.push(v);
    }
    (counts, all_values)
}

fn check_straight_flush(cards: &[Card], flush_suit: Option<usize>) -> Option<HandRank> {
    let fs = flush_suit?;
    let by_suit = cards_by_suit(cards);
    straight_high(&unique_values(&by_suit[fs])).map(|high| HandRank {
        category: HandRankCategory::StraightFlush,
        tiebreakers: vec![high],
    })
}

fn check_flush(cards: &[Card], flush_suit: Option<usize>) -> Option<HandRank> {
    let fs = flush_suit?;
    let by_suit = cards_by_suit(cards);
    let mut vs = by_suit[fs]
        .iter()
        .map(|c| c.rank().high_value())
        .collect::<Vec<u8>>();
    vs.sort_unstable_by(|a, b| b.cmp(a));
    vs.truncate(5);
    Some(HandRank {
        category: HandRankCategory::Flush,
        tiebreakers: vs,
    })
}

fn unique_values(cards: &[Card]) -> Vec<u8> {
    let mut v = cards
        .iter()
        .map(|c| c.rank().high_value())
        .collect::<Vec<u8>>();
    v.sort_unstable();
    v.dedup();
    v
}

fn straight_high(values: &[u8]) -> Option<u8> {
    let mut present = [false; RANK_SLOTS];
    for &v in values {
        present[v as usize] = true;
    }
    // wheel: the ace also plays low
    present[1] = present[14];

    // descending scan, so the first run of five is the highest
    let mut run_len = 0usize;
    for v in (1..=14).rev() {
        if present[v] {
            run_len += 1;
            if run_len == 5 {
                return Some((v + 4) as u8);
            }
        } else {
            run_len = 0;
        }
    }
    None
}

/// Highest rank appearing exactly `n` times, plus the top distinct kickers.
fn find_n_of_a_kind(
    counts: &[u8; RANK_SLOTS],
    n: u8,
    all_values: &[u8],
    kicker_count: usize,
) -> Option<(u8, Vec<u8>)> {
    let rank = (2..=14).rev().find(|&v| counts[v] == n)? as u8;
    let mut kickers = all_values
        .iter()
        .copied()
        .filter(|&v| v != rank)
        .collect::<Vec<u8>>();
    kickers.sort_unstable_by(|a, b| b.cmp(a));
    kickers.dedup();
    kickers.truncate(kicker_count);
    Some((rank, kickers))
}

fn find_full_house(counts: &[u8; RANK_SLOTS]) -> Option<(u8, u8)> {
    let mut trips = vec![];
    let mut pairs = vec![];
    for v in (2..=14).rev() {
        if counts[v] >= 3 {
            trips.push(v as u8);
        } else if counts[v] >= 2 {
            pairs.push(v as u8);
        }
    }
    let trip = *trips.first()?;
    // a second set of trips plays as the pair
    let pair = pairs.first().copied().or_else(|| trips.get(1).copied());
    pair.map(|p| (trip, p))
}

fn find_two_pair(counts: &[u8; RANK_SLOTS], all_values: &[u8]) -> Option<(u8, u8, u8)> {
    let pairs: Vec<u8> = (2..=14u8).rev().filter(|&v| counts[v as usize] >= 2).collect();
    if pairs.len() < 2 {
        return None;
    }
    let (p_high, p_low) = (pairs[0], pairs[1]);
    let kicker = all_values
        .iter()
        .copied()
        .filter(|&v| v != p_high && v != p_low)
        .max()
        .unwrap_or(0);
    Some((p_high, p_low, kicker))
}
