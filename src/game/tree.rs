use std::sync::Arc;

use anyhow::{anyhow, bail};
use rand::rngs::StdRng;
use rand::Rng;

use super::action::{ActionType, LimitConfig};
use super::observation::Observation;
use super::state::{State, StateType};
use super::state_chance::StateChance;
use super::state_data::StateData;
use super::table::Table;
use super::trajectory::Trajectory;
use crate::agent::Agent;

pub struct Tree {
    config: LimitConfig,
    record_action: bool,
    rng: StdRng,
    root: Option<Box<dyn State>>,
    pub table: Table,
}

impl Tree {
    pub fn new(config: LimitConfig, rng: StdRng, record_action: bool) -> Tree {
        Tree {
            config,
            record_action,
            rng,
            root: None,
            table: Table::new(config.player_count),
        }
    }

    fn reset(&mut self) {
        // Shuffle the deck and move the button
        let dealer = self.rng.gen_range(0..self.config.player_count);
        let state_data = StateData::new(self.config, dealer, &mut self.rng);
        self.table.update(&state_data);
        self.root = Some(Box::new(StateChance::new(state_data)));
    }

    /// Plays a full hand, returns every player's trajectory and the payoffs in big blinds.
    pub fn play_one_hand(
        &mut self,
        agents: &[Arc<dyn Agent>],
        is_training: bool,
    ) -> anyhow::Result<(Vec<Trajectory>, Vec<f32>)> {
        if agents.len() != self.config.player_count as usize {
            bail!(
                "{} agents for a {} player table",
                agents.len(),
                self.config.player_count
            );
        }

        self.reset();

        let mut trajectories = (0..self.config.player_count)
            .map(Trajectory::new)
            .collect::<Vec<_>>();
        let mut action_record: Vec<(u32, ActionType)> = Vec::new();
        let record_action = self.record_action;

        let mut gs = self
            .root
            .as_mut()
            .ok_or_else(|| anyhow!("hand was not dealt"))?;

        loop {
            match gs.get_type() {
                StateType::Terminal => break,
                StateType::Chance => {
                    gs.create_children();
                    gs = gs
                        .get_child(0)
                        .ok_or_else(|| anyhow!("chance node without a child"))?;
                    log::debug!(
                        "street {} board {:?}",
                        gs.get_state_data().street,
                        super::card::card_indices(&gs.get_state_data().board)
                    );
                }
                StateType::Play => {
                    let p_to_move = gs.get_player_to_move();
                    gs.create_children();

                    let observation = Observation::new(
                        gs.get_state_data(),
                        p_to_move,
                        gs.get_valid_actions_mask(),
                        &action_record,
                    );

                    let agent = &agents[p_to_move as usize];
                    let action_index = if is_training {
                        agent.step(&observation)?
                    } else {
                        agent.eval_step(&observation)?
                    };

                    if !observation.is_legal(action_index) {
                        bail!(
                            "{} chose illegal action {} (legal: {:?})",
                            agent.name(),
                            action_index,
                            observation.legal_actions()
                        );
                    }

                    trajectories[p_to_move as usize].push(observation, action_index);
                    gs = gs
                        .get_child(action_index)
                        .ok_or_else(|| anyhow!("no state behind action {}", action_index))?;

                    if let Some(action) = gs.get_state_data().history.last() {
                        log::debug!(
                            "player {} ({}): {}",
                            p_to_move,
                            agent.name(),
                            action.to_print_string()
                        );
                        if record_action {
                            action_record.push((p_to_move, action.action_type));
                        }
                    }
                }
            }
        }

        let payoffs = gs.get_rewards()?;
        gs.print_actions();
        let final_data = gs.get_state_data().clone();

        for (player, trajectory) in trajectories.iter_mut().enumerate() {
            trajectory.finish(Observation::new(
                &final_data,
                player as u32,
                Vec::new(),
                &action_record,
            ));
        }
        self.table.update(&final_data);

        log::debug!("hand over, payoffs {:?}", payoffs);
        Ok((trajectories, payoffs))
    }
}
