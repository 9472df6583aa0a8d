//! Deal assignment: which seat or board slot owns each of the 52 cards.
//!
//! A deal is a pure function of the seated players and a seed, so any hand
//! can be replayed from the seed logged when it started.

use std::fmt;

use holdem_shared::{Card, PlayerId, DECK_SIZE};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::error::EngineError;
use super::table::MAX_SEATS;

pub const HOLE_CARDS: usize = 2;
pub const COMMUNITY_CARDS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Location {
    Unassigned,
    Player(PlayerId),
    Flop,
    Turn,
    River,
}

impl Location {
    pub fn is_community(self) -> bool {
        matches!(self, Location::Flop | Location::Turn | Location::River)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Unassigned => write!(f, "DECK"),
            Location::Player(id) => write!(f, "{id}"),
            Location::Flop => write!(f, "FLOP"),
            Location::Turn => write!(f, "TURN"),
            Location::River => write!(f, "RIVER"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DealAssignment {
    seed: u64,
    owners: [Location; DECK_SIZE],
}

/// A seeded permutation of the deck indices.
pub fn shuffled_deck_with_seed(seed: u64) -> Vec<Card> {
    let mut deck: Vec<Card> = Card::all().collect();
    let mut rng = StdRng::seed_from_u64(seed);
    deck.shuffle(&mut rng);
    deck
}

impl DealAssignment {
    /// Two cards per seat in seat order, then three flop cards, the turn
    /// and the river, all drawn from one permutation of the deck.
    pub fn deal(seats: &[PlayerId], seed: u64) -> Result<Self, EngineError> {
        if seats.len() > MAX_SEATS {
            return Err(EngineError::DealSize { seats: seats.len() });
        }
        let order = shuffled_deck_with_seed(seed);
        let mut owners = [Location::Unassigned; DECK_SIZE];
        let mut draw = order.into_iter();
        let mut assign = |loc: Location| {
            // 10 seats * 2 + 5 is well inside the deck
            if let Some(card) = draw.next() {
                owners[card.0 as usize] = loc;
            }
        };
        for &id in seats {
            for _ in 0..HOLE_CARDS {
                assign(Location::Player(id));
            }
        }
        for _ in 0..3 {
            assign(Location::Flop);
        }
        assign(Location::Turn);
        assign(Location::River);
        Ok(Self { seed, owners })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn owner(&self, card: Card) -> Location {
        self.owners[card.0 as usize]
    }

    pub fn cards_at(&self, loc: Location) -> Vec<Card> {
        Card::all().filter(|&c| self.owner(c) == loc).collect()
    }

    pub fn hole_cards(&self, id: PlayerId) -> Vec<Card> {
        self.cards_at(Location::Player(id))
    }

    /// Board cards in dealing order: flop, turn, river.
    pub fn community(&self) -> Vec<Card> {
        let mut board = self.cards_at(Location::Flop);
        board.extend(self.cards_at(Location::Turn));
        board.extend(self.cards_at(Location::River));
        board
    }

    /// Board cards exposed once `streets` board streets (flop, turn, river)
    /// have been turned.
    pub fn community_through(&self, streets: usize) -> Vec<Card> {
        let mut board = Vec::new();
        if streets >= 1 {
            board.extend(self.cards_at(Location::Flop));
        }
        if streets >= 2 {
            board.extend(self.cards_at(Location::Turn));
        }
        if streets >= 3 {
            board.extend(self.cards_at(Location::River));
        }
        board
    }

    /// The hole cards of `id` plus the whole board.
    pub fn visible_to(&self, id: PlayerId) -> Vec<Card> {
        Card::all()
            .filter(|&c| {
                let loc = self.owner(c);
                loc == Location::Player(id) || loc.is_community()
            })
            .collect()
    }

    pub fn count_at(&self, loc: Location) -> usize {
        self.owners.iter().filter(|&&l| l == loc).count()
    }
}

/// Debug listing of `location:card` pairs, sorted by location.
impl fmt::Display for DealAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines: Vec<String> = Card::all()
            .map(|c| format!("{}:{}", self.owner(c), c))
            .collect();
        lines.sort();
        writeln!(f, "deal (seed {}) [", self.seed)?;
        for line in lines {
            writeln!(f, "  {line}")?;
        }
        write!(f, "]")
    }
}
