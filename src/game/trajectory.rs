use super::observation::Observation;

/// Observations and actions of one player over a hand.
///
/// `observations` holds one entry per decision plus the final observation
/// once the hand is over, so it is one longer than `actions`.
#[derive(Clone, Debug, Default)]
pub struct Trajectory {
    pub player: u32,
    pub observations: Vec<Observation>,
    pub actions: Vec<usize>,
}

#[derive(Debug)]
pub struct Transition<'a> {
    pub state: &'a Observation,
    pub action: usize,
    pub reward: f32,
    pub next_state: &'a Observation,
    pub done: bool,
}

impl Trajectory {
    pub fn new(player: u32) -> Trajectory {
        Trajectory {
            player,
            observations: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, observation: Observation, action: usize) {
        self.observations.push(observation);
        self.actions.push(action);
    }

    pub fn finish(&mut self, observation: Observation) {
        self.observations.push(observation);
    }

    /// Splits the trajectory into transitions, the payoff goes to the last one.
    pub fn transitions(&self, payoff: f32) -> Vec<Transition<'_>> {
        let count = self.actions.len().min(self.observations.len().saturating_sub(1));
        (0..count)
            .map(|i| {
                let done = i + 1 == count;
                Transition {
                    state: &self.observations[i],
                    action: self.actions[i],
                    reward: if done { payoff } else { 0.0 },
                    next_state: &self.observations[i + 1],
                    done,
                }
            })
            .collect()
    }
}
