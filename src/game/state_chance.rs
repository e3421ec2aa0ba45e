use super::state::{State, StateType};
use super::state_data::StateData;
use super::state_play::StatePlay;

pub struct StateChance {
    pub state_data: StateData,
    pub children: Vec<Option<Box<dyn State>>>,
}

impl State for StateChance {
    fn get_type(&self) -> StateType {
        StateType::Chance
    }

    fn get_child(&mut self, index: usize) -> Option<&mut Box<dyn State>> {
        self.children.get_mut(index).and_then(|c| c.as_mut())
    }

    // Overrides
    fn get_state_data(&self) -> &StateData {
        &self.state_data
    }

    fn create_children(&mut self) {
        if !self.children.is_empty() {
            return;
        }

        let mut new_state_data = self.state_data.clone();
        let player_count = new_state_data.player_count;
        let dealer = new_state_data.dealer;

        new_state_data.street += 1;
        new_state_data.street_bets = vec![0; player_count as usize];
        new_state_data.raise_count = 0;
        new_state_data.not_raise_count = 0;

        match new_state_data.street {
            1 => {
                // Post blinds, first to act is the seat after the big blind
                let sb = (dealer + 1) % player_count;
                let bb = (dealer + 2) % player_count;
                let config = new_state_data.config;
                new_state_data.put_in(sb, config.small_blind);
                new_state_data.put_in(bb, config.big_blind);
                new_state_data.player_to_move = (bb + 1) % player_count;
            }
            street => {
                let cards = if street == 2 { 3 } else { 1 };
                let dealt = new_state_data.deck.drain(..cards).collect::<Vec<_>>();
                new_state_data.board.extend(dealt);

                // Postflop, first to act is the first active player after the dealer
                new_state_data.player_to_move = new_state_data.next_player_in(dealer);
            }
        }

        self.children
            .push(Some(Box::new(StatePlay::new(new_state_data))));
    }
}

impl StateChance {
    pub fn new(state_data: StateData) -> StateChance {
        StateChance {
            state_data,
            children: Vec::new(),
        }
    }
}
