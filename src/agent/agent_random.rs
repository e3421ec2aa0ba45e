use super::Agent;
use crate::game::observation::Observation;

use anyhow::anyhow;
use rand::seq::SliceRandom;

pub struct AgentRandom {}

impl Agent for AgentRandom {
    fn name(&self) -> &str {
        "Random"
    }

    fn step(&self, observation: &Observation) -> anyhow::Result<usize> {
        let mut rng = rand::thread_rng();
        observation
            .legal_actions()
            .choose(&mut rng)
            .copied()
            .ok_or_else(|| anyhow!("no legal action to choose from"))
    }
}
