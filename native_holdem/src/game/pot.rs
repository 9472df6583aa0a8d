//! Pot ledger: the append-only bet history of one hand.
//!
//! Side pots are only materialized at the end of a betting round, when the
//! open side pot holds unequal totals. Until then every bet simply lands in
//! the open side pot.

use holdem_shared::{PlayerId, SidePotSnapshot};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bet {
    pub side_pot: usize,
    pub round: u8,
    pub player: PlayerId,
    pub amount: u32,
}

/// One side pot as seen at showdown: who put chips in and how many.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidePot {
    pub number: usize,
    pub contributors: Vec<PlayerId>,
    pub amount: u32,
}

impl From<&SidePot> for SidePotSnapshot {
    fn from(p: &SidePot) -> Self {
        SidePotSnapshot {
            number: p.number,
            contributors: p.contributors.clone(),
            amount: p.amount,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Pot {
    side_pot: usize,
    round: u8,
    min_raise: u32,
    amount_to_call: u32,
    bets: Vec<Bet>,
}

impl Pot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn side_pot_number(&self) -> usize {
        self.side_pot
    }

    pub fn round(&self) -> u8 {
        self.round
    }

    pub fn min_raise(&self) -> u32 {
        self.min_raise
    }

    pub fn amount_to_call(&self) -> u32 {
        self.amount_to_call
    }

    pub fn bets(&self) -> &[Bet] {
        &self.bets
    }

    /// Record a bet in the open side pot and move the call target and the
    /// minimum raise accordingly.
    pub fn receive_bet(&mut self, player: PlayerId, amount: u32) {
        self.bets.push(Bet {
            side_pot: self.side_pot,
            round: self.round,
            player,
            amount,
        });
        let total = self.total_committed_this_round(player);
        let previous = self.amount_to_call;
        if total > previous {
            self.amount_to_call = total;
            let raise = total - previous;
            if raise > self.min_raise {
                self.min_raise = raise.saturating_mul(2);
            }
        }
    }

    pub fn total_committed_this_round(&self, player: PlayerId) -> u32 {
        self.bets
            .iter()
            .filter(|b| b.player == player && b.side_pot == self.side_pot && b.round == self.round)
            .map(|b| b.amount)
            .sum()
    }

    /// Everything the player has put in this hand, across side pots.
    pub fn total_committed(&self, player: PlayerId) -> u32 {
        self.bets
            .iter()
            .filter(|b| b.player == player)
            .map(|b| b.amount)
            .sum()
    }

    pub fn total(&self) -> u32 {
        self.bets.iter().map(|b| b.amount).sum()
    }

    /// Close the current betting round: consolidate, split unequal stakes
    /// into side pots, and clear the per-round call state. Returns the
    /// numbers of any side pots opened.
    pub fn begin_new_round(&mut self) -> Vec<usize> {
        self.condense();
        let opened = self.split_side_pots();
        self.min_raise = 0;
        self.amount_to_call = 0;
        self.round = self.round.saturating_add(1);
        opened
    }

    /// One record per player in the open side pot.
    fn condense(&mut self) {
        let open = self.side_pot;
        let mut totals: Vec<(PlayerId, u32)> = Vec::new();
        let mut kept = Vec::with_capacity(self.bets.len());
        for bet in self.bets.drain(..) {
            if bet.side_pot != open {
                kept.push(bet);
                continue;
            }
            match totals.iter_mut().find(|(p, _)| *p == bet.player) {
                Some((_, sum)) => *sum += bet.amount,
                None => totals.push((bet.player, bet.amount)),
            }
        }
        kept.extend(totals.into_iter().map(|(player, amount)| Bet {
            side_pot: open,
            round: self.round,
            player,
            amount,
        }));
        self.bets = kept;
    }

    /// Peel the excess over the smallest stake into a fresh side pot until
    /// every stake in the open side pot is equal.
    fn split_side_pots(&mut self) -> Vec<usize> {
        let mut opened = Vec::new();
        loop {
            let open = self.side_pot;
            let stakes = self.bets.iter().filter(|b| b.side_pot == open).map(|b| b.amount);
            let (min, max) = stakes.fold((u32::MAX, 0), |(lo, hi), a| (lo.min(a), hi.max(a)));
            if max == 0 || min == max {
                break;
            }
            let next = open + 1;
            let mut excess = Vec::new();
            for bet in self.bets.iter_mut().filter(|b| b.side_pot == open && b.amount > min) {
                excess.push(Bet {
                    side_pot: next,
                    round: bet.round,
                    player: bet.player,
                    amount: bet.amount - min,
                });
                bet.amount = min;
            }
            self.bets.extend(excess);
            self.side_pot = next;
            opened.push(next);
        }
        opened
    }

    /// Aggregate the ledger per side pot, main pot first. Contributors are
    /// listed in the order they first bet.
    pub fn side_pots(&self) -> Vec<SidePot> {
        let mut pots: Vec<SidePot> = Vec::new();
        for bet in &self.bets {
            let idx = match pots.iter().position(|p| p.number == bet.side_pot) {
                Some(idx) => idx,
                None => {
                    pots.push(SidePot {
                        number: bet.side_pot,
                        contributors: Vec::new(),
                        amount: 0,
                    });
                    pots.len() - 1
                }
            };
            let pot = &mut pots[idx];
            pot.amount += bet.amount;
            if !pot.contributors.contains(&bet.player) {
                pot.contributors.push(bet.player);
            }
        }
        pots.sort_by_key(|p| p.number);
        pots
    }
}
