use super::action::{Action, LimitConfig};
use poker::Card;
use rand::seq::SliceRandom;
use rand::Rng;

pub const STREET_COUNT: usize = 4;
pub const MAX_BOARD_CARDS: usize = 5;

#[derive(Clone, Debug)]
pub struct StateData {
    pub config: LimitConfig,
    pub player_count: u32,
    pub dealer: u32,
    pub deck: Vec<Card>,
    pub board: Vec<Card>,
    pub hands: Vec<Vec<Card>>,
    /// Chips each player put in during the hand.
    pub bets: Vec<u32>,
    /// Chips each player put in during the current betting round.
    pub street_bets: Vec<u32>,
    pub player_to_move: u32,
    pub is_player_in: Vec<bool>,
    /// 0 before the deal, then 1 = preflop .. 4 = river.
    pub street: u8,
    pub raise_count: u8,
    pub not_raise_count: u32,
    pub raise_nums: [u8; STREET_COUNT],
    pub rewards: Vec<f32>,
    pub history: Vec<Action>,
}

impl StateData {
    pub fn new<R: Rng>(config: LimitConfig, dealer: u32, rng: &mut R) -> StateData {
        let player_count = config.player_count;

        // Shuffle and deal the hole cards, the board is dealt by chance nodes
        let mut deck: Vec<Card> = Card::generate_deck().collect();
        deck.shuffle(rng);
        let mut hands = Vec::with_capacity(player_count as usize);
        for _ in 0..player_count {
            hands.push(deck.drain(..2).collect());
        }

        StateData {
            config,
            player_count,
            dealer,
            deck,
            board: Vec::new(),
            hands,
            bets: vec![0; player_count as usize],
            street_bets: vec![0; player_count as usize],
            player_to_move: dealer,
            is_player_in: vec![true; player_count as usize],
            street: 0,
            raise_count: 0,
            not_raise_count: 0,
            raise_nums: [0; STREET_COUNT],
            rewards: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn players_in_hand(&self) -> u32 {
        self.is_player_in.iter().filter(|&&p| p).count() as u32
    }

    pub fn folded_count(&self) -> u32 {
        self.player_count - self.players_in_hand()
    }

    pub fn biggest_street_bet(&self) -> u32 {
        self.street_bets.iter().copied().max().unwrap_or(0)
    }

    pub fn pot(&self) -> u32 {
        self.bets.iter().sum()
    }

    /// Next seat after `seat` that is still in the hand.
    pub fn next_player_in(&self, seat: u32) -> u32 {
        let mut i = (seat + 1) % self.player_count;
        while i != seat {
            if self.is_player_in[i as usize] {
                return i;
            }
            i = (i + 1) % self.player_count;
        }
        seat
    }

    pub fn is_round_over(&self) -> bool {
        self.not_raise_count + self.folded_count() >= self.player_count
    }

    pub fn put_in(&mut self, player: u32, amount: u32) {
        self.bets[player as usize] += amount;
        self.street_bets[player as usize] += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn deal_is_disjoint() {
        let mut rng = StdRng::seed_from_u64(7);
        let data = StateData::new(LimitConfig::new(3), 0, &mut rng);
        let mut seen = HashSet::new();
        for hand in &data.hands {
            assert_eq!(hand.len(), 2);
            for card in hand {
                assert!(seen.insert(*card));
            }
        }
        for card in &data.deck {
            assert!(seen.insert(*card));
        }
        assert_eq!(seen.len(), 52);
    }

    #[test]
    fn next_player_skips_folded_seats() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut data = StateData::new(LimitConfig::new(4), 0, &mut rng);
        data.is_player_in[1] = false;
        data.is_player_in[2] = false;
        assert_eq!(data.next_player_in(0), 3);
        assert_eq!(data.next_player_in(3), 0);
        assert_eq!(data.folded_count(), 2);
    }
}
