use super::Agent;
use crate::game::action::ActionType;
use crate::game::card::colored_cards;
use crate::game::observation::Observation;

use anyhow::bail;
use colored::*;
use dialoguer::Select;

/// The part of `record` that came after `player`'s own last action.
pub fn actions_since_last_turn(record: &[(u32, ActionType)], player: u32) -> &[(u32, ActionType)] {
    let start = record
        .iter()
        .rposition(|(p, _)| *p == player)
        .map_or(0, |i| i + 1);
    &record[start..]
}

/// Reads actions from the terminal.
pub struct AgentHuman {
    num_actions: usize,
}

impl AgentHuman {
    pub fn new(num_actions: usize) -> AgentHuman {
        AgentHuman { num_actions }
    }

    fn print_state(observation: &Observation) {
        let raw = &observation.raw;

        let since_last_turn = actions_since_last_turn(&observation.action_record, raw.current_player);
        for (player, action) in since_last_turn {
            println!(">> Player {} chooses {}", player, action);
        }

        println!();
        println!("=============== Community Card ===============");
        println!("{}", colored_cards(&raw.public_cards));
        println!("===============   Your Hand    ===============");
        println!("{}", colored_cards(&raw.hand));
        println!("===============     Chips      ===============");
        println!("Yours:   {} ({})", "+".repeat(raw.my_chips as usize).green(), raw.my_chips);
        for (i, chips) in raw.all_chips.iter().enumerate() {
            if i as u32 != raw.current_player {
                println!("Agent {}: {} ({})", i, "+".repeat(*chips as usize).red(), chips);
            }
        }
        println!();
        println!("=========== Actions You Can Choose ===========");
    }
}

impl Agent for AgentHuman {
    fn name(&self) -> &str {
        "Human"
    }

    fn step(&self, observation: &Observation) -> anyhow::Result<usize> {
        if observation.valid_actions_mask.len() != self.num_actions {
            bail!(
                "expected {} actions, got a mask of {}",
                self.num_actions,
                observation.valid_actions_mask.len()
            );
        }

        Self::print_state(observation);

        let legal_actions = observation.legal_actions();
        let labels = legal_actions
            .iter()
            .filter_map(|&i| ActionType::from_index(i))
            .map(ActionType::label)
            .collect::<Vec<_>>();
        if labels.is_empty() {
            bail!("no legal action to choose from");
        }

        let selection = Select::new()
            .with_prompt(">> You choose action")
            .items(&labels)
            .default(0)
            .interact()?;

        Ok(legal_actions[selection])
    }
}
