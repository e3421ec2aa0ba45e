use poker::Card;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerStatus {
    Alive,
    Folded,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub in_chips: u32,
    pub hand: Vec<Card>,
    pub status: PlayerStatus,
}

impl Player {
    pub fn new() -> Player {
        Player {
            in_chips: 0,
            hand: Vec::new(),
            status: PlayerStatus::Alive,
        }
    }

    pub fn reset(&mut self, in_chips: u32, hand: Vec<Card>, is_in: bool) {
        self.in_chips = in_chips;
        self.hand = hand;
        self.status = if is_in {
            PlayerStatus::Alive
        } else {
            PlayerStatus::Folded
        };
    }
}

impl Default for Player {
    fn default() -> Self {
        Player::new()
    }
}
