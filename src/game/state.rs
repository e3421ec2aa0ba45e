use super::state_data::StateData;

pub enum StateType {
    Play,
    Terminal,
    Chance,
}

pub trait State: Send {
    fn get_state_data(&self) -> &StateData;

    fn get_player_to_move(&self) -> u32 {
        self.get_state_data().player_to_move
    }
    fn is_player_in(&self, player_index: u32) -> bool {
        self.get_state_data().is_player_in[player_index as usize]
    }
    fn get_to_move_street_bet(&self) -> u32 {
        self.get_state_data().street_bets[self.get_player_to_move() as usize]
    }

    fn get_active_players(&self, new_is_player_in: &[bool]) -> u32 {
        new_is_player_in.iter().filter(|&&p| p).count() as u32
    }

    fn print_actions(&self) {
        for h in self.get_state_data().history.iter() {
            log::debug!("player {} street {}: {}", h.player_index, h.street, h.to_print_string());
        }
    }

    // Functions that need to be implemented by the state
    fn get_type(&self) -> StateType;
    fn create_children(&mut self);
    fn get_child(&mut self, _index: usize) -> Option<&mut Box<dyn State>> {
        None
    }
    fn get_valid_actions_mask(&self) -> Vec<bool> {
        Vec::new()
    }
    fn get_rewards(&mut self) -> anyhow::Result<Vec<f32>> {
        anyhow::bail!("rewards are only defined once the hand is over")
    }
}
