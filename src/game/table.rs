use super::player::Player;
use super::state_data::StateData;
use poker::Card;

/// Snapshot of the table as the last hand left it.
#[derive(Clone, Debug)]
pub struct Table {
    pub public_cards: Vec<Card>,
    pub players: Vec<Player>,
    pub dealer: u32,
    pub street: u8,
}

impl Table {
    pub fn new(player_cnt: u32) -> Table {
        Table {
            public_cards: Vec::new(),
            players: (0..player_cnt).map(|_| Player::new()).collect(),
            dealer: 0,
            street: 0,
        }
    }

    pub fn update(&mut self, state_data: &StateData) {
        self.public_cards = state_data.board.clone();
        self.dealer = state_data.dealer;
        self.street = state_data.street;
        self.players
            .resize_with(state_data.player_count as usize, Player::new);
        for (i, player) in self.players.iter_mut().enumerate() {
            player.reset(
                state_data.bets[i],
                state_data.hands[i].clone(),
                state_data.is_player_in[i],
            );
        }
    }
}
