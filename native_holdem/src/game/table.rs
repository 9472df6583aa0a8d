//! Seat rotation: who sits where, who acts next, and where the button is.
//!
//! Seating order is acting order. After `advance_button` the first two seats
//! post the blinds, so moving the button is a left rotation of the seats.

use holdem_shared::{PlayerId, PlayerStatus};

use super::error::TableError;

pub const MAX_SEATS: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub status: PlayerStatus,
    pub balance: u32,
}

impl Player {
    pub fn new(id: PlayerId, balance: u32) -> Self {
        Self {
            id,
            status: PlayerStatus::Active,
            balance,
        }
    }

    pub fn has_folded(&self) -> bool {
        self.status == PlayerStatus::Folded
    }

    /// Still in the hand with nothing left to bet.
    pub fn is_all_in(&self) -> bool {
        !self.has_folded() && self.balance == 0
    }
}

#[derive(Clone, Debug, Default)]
pub struct Table {
    players: Vec<Player>,
    cursor: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn free_seats(&self) -> usize {
        MAX_SEATS - self.players.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.iter().any(|p| p.id == id)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }

    pub fn add_player(&mut self, id: PlayerId, balance: u32) -> Result<(), TableError> {
        if self.players.len() >= MAX_SEATS {
            return Err(TableError::Full);
        }
        if self.contains(id) {
            return Err(TableError::AlreadySeated(id));
        }
        self.players.push(Player::new(id, balance));
        Ok(())
    }

    /// Unseat a player, keeping the relative order of everyone else and
    /// keeping the cursor on the same upcoming player.
    pub fn remove_player(&mut self, id: PlayerId) -> Option<Player> {
        let idx = self.players.iter().position(|p| p.id == id)?;
        let removed = self.players.remove(idx);
        if idx < self.cursor {
            self.cursor -= 1;
        }
        if self.cursor >= self.players.len() {
            self.cursor = 0;
        }
        Some(removed)
    }

    /// The player at the cursor; the cursor then moves one seat on.
    pub fn next(&mut self) -> Option<PlayerId> {
        if self.players.is_empty() {
            return None;
        }
        let id = self.players[self.cursor].id;
        self.cursor = (self.cursor + 1) % self.players.len();
        Some(id)
    }

    /// A raise changed the call target: everyone who had matched the old one
    /// and can still put chips in owes another decision.
    pub fn reopen_action(&mut self, raiser: PlayerId) {
        for p in &mut self.players {
            if p.id != raiser && p.status == PlayerStatus::Called && p.balance > 0 {
                p.status = PlayerStatus::Active;
            }
        }
    }

    pub fn reset_for_new_round(&mut self) {
        self.cursor = 0;
        for p in &mut self.players {
            if p.status == PlayerStatus::Called {
                p.status = PlayerStatus::Active;
            }
        }
    }

    pub fn reset_for_new_hand(&mut self) {
        self.cursor = 0;
        for p in &mut self.players {
            p.status = PlayerStatus::Active;
        }
    }

    pub fn advance_button(&mut self) {
        if !self.players.is_empty() {
            self.players.rotate_left(1);
        }
    }

    pub fn count_status(&self, status: PlayerStatus) -> usize {
        self.players.iter().filter(|p| p.status == status).count()
    }

    pub fn not_folded(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.has_folded())
    }

    pub fn total_balance(&self) -> u64 {
        self.players.iter().map(|p| p.balance as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_of(n: usize) -> Table {
        let mut t = Table::new();
        for i in 0..n {
            t.add_player(PlayerId(i), 100).unwrap();
        }
        t
    }

    #[test]
    fn next_wraps_around_the_table() {
        let mut t = table_of(3);
        let order: Vec<_> = (0..4).filter_map(|_| t.next()).collect();
        assert_eq!(order, vec![PlayerId(0), PlayerId(1), PlayerId(2), PlayerId(0)]);
    }

    #[test]
    fn eleventh_player_is_refused() {
        let mut t = table_of(MAX_SEATS);
        assert_eq!(t.add_player(PlayerId(99), 100), Err(TableError::Full));
        assert_eq!(t.len(), MAX_SEATS);
    }

    #[test]
    fn duplicate_seat_is_refused() {
        let mut t = table_of(2);
        assert_eq!(
            t.add_player(PlayerId(1), 100),
            Err(TableError::AlreadySeated(PlayerId(1)))
        );
    }

    #[test]
    fn removal_keeps_order_and_next_actor() {
        let mut t = table_of(4);
        t.next();
        t.next();
        // cursor on seat 2 (PlayerId(2)); remove someone before it
        t.remove_player(PlayerId(0)).unwrap();
        assert_eq!(t.ids(), vec![PlayerId(1), PlayerId(2), PlayerId(3)]);
        assert_eq!(t.next(), Some(PlayerId(2)));
    }

    #[test]
    fn removing_the_last_seat_wraps_cursor() {
        let mut t = table_of(3);
        t.next();
        t.next();
        t.remove_player(PlayerId(2)).unwrap();
        assert_eq!(t.next(), Some(PlayerId(0)));
    }

    #[test]
    fn advance_button_rotates_seats() {
        let mut t = table_of(3);
        t.advance_button();
        assert_eq!(t.ids(), vec![PlayerId(1), PlayerId(2), PlayerId(0)]);
    }

    #[test]
    fn round_reset_keeps_folds_hand_reset_clears_them() {
        let mut t = table_of(3);
        t.player_mut(PlayerId(0)).unwrap().status = PlayerStatus::Called;
        t.player_mut(PlayerId(1)).unwrap().status = PlayerStatus::Folded;
        t.next();

        t.reset_for_new_round();
        assert_eq!(t.cursor(), 0);
        assert_eq!(t.player(PlayerId(0)).unwrap().status, PlayerStatus::Active);
        assert_eq!(t.player(PlayerId(1)).unwrap().status, PlayerStatus::Folded);

        t.reset_for_new_hand();
        assert_eq!(t.count_status(PlayerStatus::Active), 3);
    }

    #[test]
    fn reopen_skips_raiser_and_all_in_players() {
        let mut t = table_of(3);
        for i in 0..3 {
            t.player_mut(PlayerId(i)).unwrap().status = PlayerStatus::Called;
        }
        t.player_mut(PlayerId(2)).unwrap().balance = 0;
        t.reopen_action(PlayerId(1));
        assert_eq!(t.player(PlayerId(0)).unwrap().status, PlayerStatus::Active);
        assert_eq!(t.player(PlayerId(1)).unwrap().status, PlayerStatus::Called);
        assert_eq!(t.player(PlayerId(2)).unwrap().status, PlayerStatus::Called);
    }
}
