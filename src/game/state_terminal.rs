use super::state::{State, StateType};
use super::state_data::StateData;
use anyhow::anyhow;
use poker::{Eval, Evaluator};

pub struct StateTerminal {
    pub state_data: StateData,
    rewards_generated: bool,
}

impl State for StateTerminal {
    fn get_type(&self) -> StateType {
        StateType::Terminal
    }

    fn create_children(&mut self) {}

    // Overrides
    fn get_state_data(&self) -> &StateData {
        &self.state_data
    }

    fn get_rewards(&mut self) -> anyhow::Result<Vec<f32>> {
        if !self.rewards_generated {
            self.create_rewards()?;
            self.rewards_generated = true;
        }

        Ok(self.state_data.rewards.clone())
    }
}

impl StateTerminal {
    pub fn new(state_data: StateData) -> StateTerminal {
        StateTerminal {
            state_data,
            rewards_generated: false,
        }
    }

    /// Chips won minus chips put in, in big blinds.
    fn create_rewards(&mut self) -> anyhow::Result<()> {
        let player_count = self.state_data.player_count as usize;
        let mut chips = vec![0.0f32; player_count];

        // Remove bets as they are considered as lost
        for (i, chip) in chips.iter_mut().enumerate() {
            *chip -= self.state_data.bets[i] as f32;
        }

        let pot = self.state_data.pot() as f32;
        let winners = self.get_winners()?;
        for i in &winners {
            chips[*i] += pot / winners.len() as f32;
        }

        let big_blind = self.state_data.config.big_blind as f32;
        self.state_data.rewards = chips.into_iter().map(|c| c / big_blind).collect();
        Ok(())
    }

    fn get_winners(&self) -> anyhow::Result<Vec<usize>> {
        let data = &self.state_data;
        let in_hand = (0..data.player_count as usize)
            .filter(|&i| data.is_player_in[i])
            .collect::<Vec<_>>();

        // Last player standing takes the pot
        if in_hand.len() == 1 {
            return Ok(in_hand);
        }

        let eval = Evaluator::new();
        let mut evals: Vec<(usize, Eval)> = Vec::with_capacity(in_hand.len());
        for i in in_hand {
            let mut hand = data.hands[i].clone();
            hand.extend_from_slice(&data.board);
            let result = eval
                .evaluate(hand)
                .map_err(|e| anyhow!("couldn't evaluate hand of player {}: {:?}", i, e))?;
            evals.push((i, result));
        }

        // Get best hand
        let mut best_hand = Eval::WORST;
        for (_, e) in &evals {
            if e.is_better_than(best_hand) {
                best_hand = *e;
            }
        }

        // Get players with the best hand (there could be a draw)
        Ok(evals
            .into_iter()
            .filter(|(_, e)| e.is_equal_to(best_hand))
            .map(|(i, _)| i)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::LimitConfig;
    use poker::{Card, Rank, Suit};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn showdown(hands: Vec<Vec<Card>>, board: Vec<Card>) -> StateTerminal {
        let mut rng = StdRng::seed_from_u64(0);
        let mut data = StateData::new(LimitConfig::new(hands.len() as u32), 0, &mut rng);
        data.hands = hands;
        data.board = board;
        data.bets = vec![4; data.player_count as usize];
        StateTerminal::new(data)
    }

    fn board() -> Vec<Card> {
        vec![
            Card::new(Rank::Two, Suit::Clubs),
            Card::new(Rank::Seven, Suit::Diamonds),
            Card::new(Rank::Nine, Suit::Hearts),
            Card::new(Rank::Jack, Suit::Spades),
            Card::new(Rank::Four, Suit::Spades),
        ]
    }

    #[test]
    fn best_hand_takes_the_pot() {
        let mut state = showdown(
            vec![
                vec![Card::new(Rank::Ace, Suit::Hearts), Card::new(Rank::Ace, Suit::Clubs)],
                vec![Card::new(Rank::King, Suit::Hearts), Card::new(Rank::Three, Suit::Clubs)],
            ],
            board(),
        );
        assert_eq!(state.get_rewards().unwrap(), vec![2.0, -2.0]);
    }

    #[test]
    fn ties_split_the_pot() {
        let mut state = showdown(
            vec![
                vec![Card::new(Rank::Ace, Suit::Hearts), Card::new(Rank::King, Suit::Clubs)],
                vec![Card::new(Rank::Ace, Suit::Diamonds), Card::new(Rank::King, Suit::Spades)],
            ],
            board(),
        );
        assert_eq!(state.get_rewards().unwrap(), vec![0.0, 0.0]);
    }

    #[test]
    fn last_player_standing_wins_without_showdown() {
        let mut state = showdown(
            vec![
                vec![Card::new(Rank::Two, Suit::Hearts), Card::new(Rank::Three, Suit::Clubs)],
                vec![Card::new(Rank::Ace, Suit::Diamonds), Card::new(Rank::Ace, Suit::Spades)],
            ],
            Vec::new(),
        );
        state.state_data.is_player_in[1] = false;
        state.state_data.bets = vec![2, 1];
        assert_eq!(state.get_rewards().unwrap(), vec![0.5, -0.5]);
    }
}
