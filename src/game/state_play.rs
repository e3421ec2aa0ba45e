use super::action::{Action, ActionType};
use super::state::{State, StateType};
use super::state_chance::StateChance;
use super::state_data::StateData;
use super::state_terminal::StateTerminal;

pub struct StatePlay {
    pub state_data: StateData,
    pub children: Vec<Option<Box<dyn State>>>,
    pub valid_actions_mask: Vec<bool>,
}

impl State for StatePlay {
    fn get_type(&self) -> StateType {
        StateType::Play
    }

    fn get_child(&mut self, index: usize) -> Option<&mut Box<dyn State>> {
        self.children.get_mut(index).and_then(|c| c.as_mut())
    }

    fn get_valid_actions_mask(&self) -> Vec<bool> {
        self.valid_actions_mask.clone()
    }

    // Overrides
    fn get_state_data(&self) -> &StateData {
        &self.state_data
    }

    fn create_children(&mut self) {
        if !self.children.is_empty() {
            return;
        }

        let biggest_bet = self.state_data.biggest_street_bet();

        // Children follow the action index order
        for action_type in ActionType::ALL {
            match action_type {
                ActionType::Call => self.handle_call(biggest_bet),
                ActionType::Raise => self.handle_raise(biggest_bet),
                ActionType::Fold => self.handle_fold(),
                ActionType::Check => self.handle_check(biggest_bet),
            }
        }
    }
}

impl StatePlay {
    pub fn new(state_data: StateData) -> StatePlay {
        StatePlay {
            state_data,
            children: Vec::new(),
            valid_actions_mask: Vec::new(),
        }
    }

    fn handle_call(&mut self, biggest_bet: u32) {
        let to_call = biggest_bet - self.get_to_move_street_bet();
        if to_call == 0 {
            self.push_invalid();
            return;
        }

        let mut new_state_data = self.state_data.clone();
        new_state_data.put_in(self.get_player_to_move(), to_call);
        new_state_data.not_raise_count += 1;
        self.push_action(new_state_data, ActionType::Call, to_call);
    }

    fn handle_raise(&mut self, biggest_bet: u32) {
        if self.state_data.raise_count >= self.state_data.config.allowed_raise_num {
            self.push_invalid();
            return;
        }

        let raise = self.state_data.config.raise_size(self.state_data.street);
        let actual_bet = biggest_bet - self.get_to_move_street_bet() + raise;

        let mut new_state_data = self.state_data.clone();
        new_state_data.put_in(self.get_player_to_move(), actual_bet);
        new_state_data.raise_count += 1;
        new_state_data.raise_nums[new_state_data.street as usize - 1] =
            new_state_data.raise_count;
        new_state_data.not_raise_count = 1;
        self.push_action(new_state_data, ActionType::Raise, actual_bet);
    }

    fn handle_fold(&mut self) {
        let mut new_state_data = self.state_data.clone();
        new_state_data.is_player_in[self.get_player_to_move() as usize] = false;
        self.push_action(new_state_data, ActionType::Fold, 0);
    }

    fn handle_check(&mut self, biggest_bet: u32) {
        if self.get_to_move_street_bet() < biggest_bet {
            self.push_invalid();
            return;
        }

        let mut new_state_data = self.state_data.clone();
        new_state_data.not_raise_count += 1;
        self.push_action(new_state_data, ActionType::Check, 0);
    }

    fn push_invalid(&mut self) {
        self.children.push(None);
        self.valid_actions_mask.push(false);
    }

    fn push_action(&mut self, mut new_state_data: StateData, action_type: ActionType, amount: u32) {
        let player = self.get_player_to_move();
        new_state_data.history.push(Action {
            action_type,
            player_index: player,
            street: new_state_data.street,
            amount,
        });

        let child: Box<dyn State> =
            if self.get_active_players(&new_state_data.is_player_in) == 1 {
                // Everybody else folded
                Box::new(StateTerminal::new(new_state_data))
            } else if new_state_data.is_round_over() {
                if new_state_data.street as usize == super::state_data::STREET_COUNT {
                    Box::new(StateTerminal::new(new_state_data))
                } else {
                    Box::new(StateChance::new(new_state_data))
                }
            } else {
                new_state_data.player_to_move = new_state_data.next_player_in(player);
                Box::new(StatePlay::new(new_state_data))
            };

        self.children.push(Some(child));
        self.valid_actions_mask.push(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::LimitConfig;
    use crate::game::state_data::StateData;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn preflop(player_count: u32) -> Box<dyn State> {
        let mut rng = StdRng::seed_from_u64(3);
        let data = StateData::new(LimitConfig::new(player_count), 0, &mut rng);
        let mut chance = StateChance::new(data);
        chance.create_children();
        chance.children.remove(0).unwrap()
    }

    fn take(state: &mut Box<dyn State>, action: ActionType) -> Box<dyn State> {
        state.create_children();
        let child = state.get_child(action.index()).unwrap();
        // Rebuild an owned node so tests can keep walking
        match child.get_type() {
            StateType::Play => Box::new(StatePlay::new(child.get_state_data().clone())),
            StateType::Chance => Box::new(StateChance::new(child.get_state_data().clone())),
            StateType::Terminal => Box::new(StateTerminal::new(child.get_state_data().clone())),
        }
    }

    #[test]
    fn small_blind_acts_first_heads_up() {
        let mut state = preflop(2);
        let data = state.get_state_data();
        assert_eq!(data.player_to_move, 1);
        assert_eq!(data.bets, vec![2, 1]);

        state.create_children();
        // Facing the big blind: call, raise and fold, no check
        assert_eq!(state.get_valid_actions_mask(), vec![true, true, true, false]);
    }

    #[test]
    fn big_blind_may_check_after_limp() {
        let mut state = preflop(2);
        let mut state = take(&mut state, ActionType::Call);
        assert_eq!(state.get_player_to_move(), 0);
        state.create_children();
        assert_eq!(state.get_valid_actions_mask(), vec![false, true, true, true]);

        let next = take(&mut state, ActionType::Check);
        assert!(matches!(next.get_type(), StateType::Chance));
        assert_eq!(next.get_state_data().bets, vec![2, 2]);
    }

    #[test]
    fn raise_cap_removes_raise() {
        let mut state = preflop(2);
        for _ in 0..4 {
            state = take(&mut state, ActionType::Raise);
        }
        assert_eq!(state.get_state_data().raise_nums[0], 4);
        state.create_children();
        assert_eq!(state.get_valid_actions_mask(), vec![true, false, true, false]);
    }

    #[test]
    fn raise_adds_fixed_amount() {
        let mut state = preflop(2);
        let state = take(&mut state, ActionType::Raise);
        // Small blind completes to 2 and raises 2 more
        assert_eq!(state.get_state_data().bets, vec![2, 4]);
        assert_eq!(state.get_state_data().history[0].amount, 3);
    }

    #[test]
    fn fold_ends_heads_up_hand() {
        let mut state = preflop(2);
        let next = take(&mut state, ActionType::Fold);
        assert!(matches!(next.get_type(), StateType::Terminal));
    }

    #[test]
    fn three_way_round_closes_after_everyone_acts() {
        let mut state = preflop(3);
        // Dealer 0, small blind 1, big blind 2, seat 0 opens
        assert_eq!(state.get_player_to_move(), 0);
        let mut state = take(&mut state, ActionType::Raise);
        let mut state = take(&mut state, ActionType::Fold);
        assert_eq!(state.get_player_to_move(), 2);
        let next = take(&mut state, ActionType::Call);
        assert!(matches!(next.get_type(), StateType::Chance));
    }

    fn deal(state: &mut Box<dyn State>) -> Box<dyn State> {
        assert!(matches!(state.get_type(), StateType::Chance));
        state.create_children();
        let child = state.get_child(0).unwrap();
        Box::new(StatePlay::new(child.get_state_data().clone()))
    }

    #[test]
    fn flop_opens_with_the_seat_after_the_dealer() {
        let mut state = preflop(2);
        let mut state = take(&mut state, ActionType::Call);
        let mut state = take(&mut state, ActionType::Check);
        let flop = deal(&mut state);

        let data = flop.get_state_data();
        assert_eq!(data.street, 2);
        assert_eq!(data.board.len(), 3);
        assert_eq!(data.street_bets, vec![0, 0]);
        // Dealer 0, so seat 1 opens
        assert_eq!(flop.get_player_to_move(), 1);
    }

    #[test]
    fn flop_opener_skips_folded_seat() {
        let mut state = preflop(3);
        // Seat 0 limps, seat 1 folds its small blind, seat 2 checks
        let mut state = take(&mut state, ActionType::Call);
        assert_eq!(state.get_player_to_move(), 1);
        let mut state = take(&mut state, ActionType::Fold);
        assert_eq!(state.get_player_to_move(), 2);
        let mut state = take(&mut state, ActionType::Check);
        let flop = deal(&mut state);

        assert!(!flop.is_player_in(1));
        assert_eq!(flop.get_player_to_move(), 2);
    }
}
