use crate::game::observation::Observation;

pub trait Agent: Send + Sync {
    fn name(&self) -> &str;

    /// Chooses an action index while training, exploration allowed.
    fn step(&self, observation: &Observation) -> anyhow::Result<usize>;

    /// Chooses the agent's best action index.
    fn eval_step(&self, observation: &Observation) -> anyhow::Result<usize> {
        self.step(observation)
    }
}

pub mod agent_dqn;
pub mod agent_human;
pub mod agent_random;
pub mod tournament;
