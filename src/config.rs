use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::game::action::LimitConfig;

pub const DEFAULT_CHECKPOINT: &str = "checkpoints/dqn_2players.pt";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Seed for dealing; a fresh one is drawn when absent.
    pub seed: Option<u64>,
    /// Keep the (player, action) history in every observation.
    pub record_action: bool,
    #[serde(flatten)]
    pub game: LimitConfig,
}

impl Default for EnvConfig {
    fn default() -> Self {
        EnvConfig {
            seed: None,
            record_action: true,
            game: LimitConfig::default(),
        }
    }
}

/// Shape of the DQN agent, also stored next to its checkpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DqnConfig {
    pub num_actions: usize,
    pub state_shape: Vec<usize>,
    pub mlp_layers: Vec<usize>,
    /// Exploration rate used by `step`; evaluation is always greedy.
    pub epsilon: f32,
}

impl Default for DqnConfig {
    fn default() -> Self {
        DqnConfig {
            num_actions: 4,
            state_shape: vec![72],
            mlp_layers: vec![512, 256, 128],
            epsilon: 0.1,
        }
    }
}

impl DqnConfig {
    pub fn state_size(&self) -> usize {
        self.state_shape.iter().product()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    pub env: EnvConfig,
    pub agent: DqnConfig,
    pub checkpoint: PathBuf,
}

impl Default for PlayConfig {
    fn default() -> Self {
        PlayConfig {
            env: EnvConfig::default(),
            agent: DqnConfig::default(),
            checkpoint: PathBuf::from(DEFAULT_CHECKPOINT),
        }
    }
}

impl PlayConfig {
    /// Reads a JSON config, missing fields keep their defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<PlayConfig> {
        match path {
            None => Ok(PlayConfig::default()),
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open config {}", path.display()))?;
                serde_json::from_reader(BufReader::new(file))
                    .with_context(|| format!("failed to parse config {}", path.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: PlayConfig =
            serde_json::from_str(r#"{ "env": { "seed": 42, "big_blind": 4 } }"#).unwrap();
        assert_eq!(config.env.seed, Some(42));
        assert_eq!(config.env.game.big_blind, 4);
        assert_eq!(config.env.game.player_count, 2);
        assert!(config.env.record_action);
        assert_eq!(config.agent.mlp_layers, vec![512, 256, 128]);
        assert_eq!(config.checkpoint, PathBuf::from(DEFAULT_CHECKPOINT));
    }

    #[test]
    fn raise_follows_configured_big_blind() {
        use crate::game::action::ActionType;
        use crate::game::state::State;
        use crate::game::state_chance::StateChance;
        use crate::game::state_data::StateData;
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let config: PlayConfig =
            serde_json::from_str(r#"{ "env": { "big_blind": 4, "small_blind": 2 } }"#).unwrap();
        assert_eq!(config.env.game.raise_size(1), 4);
        assert_eq!(config.env.game.raise_size(3), 8);

        // Heads-up, dealer 0: seat 1 posts the small blind and acts first
        let mut rng = StdRng::seed_from_u64(1);
        let mut chance = StateChance::new(StateData::new(config.env.game, 0, &mut rng));
        chance.create_children();
        let preflop = chance.get_child(0).unwrap();
        assert_eq!(preflop.get_state_data().bets, vec![4, 2]);
        preflop.create_children();
        let raised = preflop.get_child(ActionType::Raise.index()).unwrap();
        assert_eq!(raised.get_state_data().bets, vec![4, 8]);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        assert!(PlayConfig::load(Some(Path::new("does/not/exist.json"))).is_err());
    }
}
