use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, ensure, Context};
use candle_core::{Device, Tensor};
use rand::distributions::{Distribution, WeightedIndex};

use super::Agent;
use crate::config::DqnConfig;
use crate::game::observation::Observation;
use crate::helper;
use crate::model::checkpoint;
use crate::model::q_network::QNetwork;

pub struct AgentDqn {
    network: QNetwork,
    config: DqnConfig,
}

impl Agent for AgentDqn {
    fn name(&self) -> &str {
        "DQN"
    }

    fn step(&self, observation: &Observation) -> anyhow::Result<usize> {
        let q_values = self.predict(observation)?;
        let legal_actions = observation.legal_actions();
        let best_action = Self::best_action(&q_values)?;

        // Epsilon-greedy over the legal actions
        let epsilon = self.config.epsilon.clamp(0.0, 1.0);
        let mut probas = vec![epsilon / legal_actions.len() as f32; legal_actions.len()];
        let best_index = legal_actions
            .iter()
            .position(|&a| a == best_action)
            .ok_or_else(|| anyhow!("best action {} is not legal", best_action))?;
        probas[best_index] += 1.0 - epsilon;

        let mut rng = rand::thread_rng();
        let distribution = WeightedIndex::new(&probas)
            .map_err(|e| anyhow!("invalid action distribution {:?}: {}", probas, e))?;
        Ok(legal_actions[distribution.sample(&mut rng)])
    }

    fn eval_step(&self, observation: &Observation) -> anyhow::Result<usize> {
        let q_values = self.predict(observation)?;
        Self::best_action(&q_values)
    }
}

impl AgentDqn {
    /// Fresh agent with untrained weights.
    pub fn new(config: DqnConfig, device: Device) -> anyhow::Result<AgentDqn> {
        ensure!(config.num_actions > 0, "DQN needs at least one action");
        ensure!(config.state_size() > 0, "DQN needs a non-empty state shape");
        let network = QNetwork::new(&config, device)?;
        Ok(AgentDqn { network, config })
    }

    /// Restores an agent; `expected` describes the environment it will play in.
    ///
    /// Metadata stored next to the checkpoint wins over `expected.mlp_layers`
    /// and `expected.epsilon`, but must agree on actions and state shape.
    pub fn from_checkpoint(
        path: &Path,
        expected: DqnConfig,
        device: Device,
    ) -> anyhow::Result<AgentDqn> {
        let config = match checkpoint::read_metadata(path)? {
            Some(stored) => {
                ensure!(
                    stored.num_actions == expected.num_actions,
                    "checkpoint {} was trained with {} actions, environment has {}",
                    path.display(),
                    stored.num_actions,
                    expected.num_actions
                );
                ensure!(
                    stored.state_shape == expected.state_shape,
                    "checkpoint {} expects state shape {:?}, environment has {:?}",
                    path.display(),
                    stored.state_shape,
                    expected.state_shape
                );
                stored
            }
            None => expected,
        };

        let mut agent = Self::new(config, device)?;
        agent
            .network
            .load_var_map(path)
            .with_context(|| format!("failed to load checkpoint {}", path.display()))?;

        log::info!(
            "loaded DQN checkpoint {} (layers {:?})",
            path.display(),
            agent.config.mlp_layers
        );
        Ok(agent)
    }

    pub fn save_checkpoint(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        self.network
            .save_var_map(path)
            .with_context(|| format!("failed to save checkpoint {}", path.display()))?;
        checkpoint::write_metadata(path, &self.config)
    }

    pub fn config(&self) -> &DqnConfig {
        &self.config
    }

    /// Q-values with illegal actions masked to negative infinity.
    pub fn predict(&self, observation: &Observation) -> anyhow::Result<Vec<f32>> {
        let state_size = self.config.state_size();
        if observation.obs.len() != state_size {
            bail!(
                "observation has {} values, network expects {}",
                observation.obs.len(),
                state_size
            );
        }

        let input = Tensor::from_slice(&observation.obs, (1, state_size), self.network.device())?;
        let output = self.network.forward(&input)?.squeeze(0)?;
        let mut q_values = helper::to_checked_vec(&output)?;

        for (i, q) in q_values.iter_mut().enumerate() {
            if !observation.is_legal(i) {
                *q = f32::NEG_INFINITY;
            }
        }
        Ok(q_values)
    }

    fn best_action(q_values: &[f32]) -> anyhow::Result<usize> {
        q_values
            .iter()
            .enumerate()
            .filter(|(_, q)| q.is_finite())
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .ok_or_else(|| anyhow!("no legal action to choose from"))
    }
}
