use super::action::ActionType;
use super::card::{card_slot, CARD_SLOTS};
use super::state_data::{StateData, STREET_COUNT};
use poker::Card;

/// Length of the flat observation vector for a given raise cap.
pub fn state_size(allowed_raise_num: u8) -> usize {
    CARD_SLOTS + STREET_COUNT * (allowed_raise_num as usize + 1)
}

/// What the player to move sees, before encoding.
#[derive(Clone, Debug)]
pub struct RawObservation {
    pub current_player: u32,
    pub hand: Vec<Card>,
    pub public_cards: Vec<Card>,
    pub all_chips: Vec<u32>,
    pub my_chips: u32,
    pub legal_actions: Vec<ActionType>,
    pub raise_nums: [u8; STREET_COUNT],
    pub street: u8,
}

#[derive(Clone, Debug)]
pub struct Observation {
    pub obs: Vec<f32>,
    pub valid_actions_mask: Vec<bool>,
    pub raw: RawObservation,
    /// (player, action) pairs taken so far in the hand, empty when recording is off.
    pub action_record: Vec<(u32, ActionType)>,
}

impl Observation {
    pub fn new(
        state_data: &StateData,
        player: u32,
        valid_actions_mask: Vec<bool>,
        action_record: &[(u32, ActionType)],
    ) -> Observation {
        let hand = state_data.hands[player as usize].clone();
        let public_cards = state_data.board.clone();
        let allowed = state_data.config.allowed_raise_num;

        let mut obs = vec![0.0f32; state_size(allowed)];
        for card in public_cards.iter().chain(hand.iter()) {
            obs[card_slot(card)] = 1.0;
        }
        for (street, &raises) in state_data.raise_nums.iter().enumerate() {
            obs[CARD_SLOTS + street * (allowed as usize + 1) + raises as usize] = 1.0;
        }

        let legal_actions = ActionType::ALL
            .iter()
            .zip(valid_actions_mask.iter())
            .filter(|(_, &valid)| valid)
            .map(|(a, _)| *a)
            .collect();

        Observation {
            obs,
            valid_actions_mask,
            raw: RawObservation {
                current_player: player,
                hand,
                public_cards,
                all_chips: state_data.bets.clone(),
                my_chips: state_data.bets[player as usize],
                legal_actions,
                raise_nums: state_data.raise_nums,
                street: state_data.street,
            },
            action_record: action_record.to_vec(),
        }
    }

    pub fn legal_actions(&self) -> Vec<usize> {
        self.valid_actions_mask
            .iter()
            .enumerate()
            .filter(|(_, &valid)| valid)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn is_legal(&self, action_index: usize) -> bool {
        self.valid_actions_mask
            .get(action_index)
            .copied()
            .unwrap_or(false)
    }
}
