use std::sync::Arc;

use anyhow::bail;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::agent::Agent;
use crate::config::EnvConfig;
use crate::game::action::ActionType;
use crate::game::observation::state_size;
use crate::game::table::Table;
use crate::game::trajectory::Trajectory;
use crate::game::tree::Tree;

/// Fixed-limit hold'em environment driving a set of agents hand by hand.
pub struct Env {
    config: EnvConfig,
    tree: Tree,
    agents: Vec<Arc<dyn Agent>>,
}

impl Env {
    pub fn new(config: EnvConfig) -> anyhow::Result<Env> {
        config.game.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Env {
            tree: Tree::new(config.game, rng, config.record_action),
            config,
            agents: Vec::new(),
        })
    }

    pub fn num_players(&self) -> usize {
        self.config.game.player_count as usize
    }

    pub fn num_actions(&self) -> usize {
        ActionType::ALL.len()
    }

    /// Observation shape per player.
    pub fn state_shape(&self) -> Vec<Vec<usize>> {
        vec![vec![state_size(self.config.game.allowed_raise_num)]; self.num_players()]
    }

    /// Binds one agent per seat, in seat order.
    pub fn set_agents(&mut self, agents: Vec<Arc<dyn Agent>>) -> anyhow::Result<()> {
        if agents.len() != self.num_players() {
            bail!(
                "expected {} agents, got {}",
                self.num_players(),
                agents.len()
            );
        }
        self.agents = agents;
        Ok(())
    }

    /// Plays one hand. Agents explore when `is_training`, act greedily otherwise.
    pub fn run(&mut self, is_training: bool) -> anyhow::Result<(Vec<Trajectory>, Vec<f32>)> {
        if self.agents.is_empty() {
            bail!("no agents bound to the environment");
        }
        self.tree.play_one_hand(&self.agents, is_training)
    }

    /// Live game state as the last hand left it.
    pub fn game(&self) -> &Table {
        &self.tree.table
    }
}
