use std::path::PathBuf;
use std::sync::Arc;

use candle_core::Device;
use clap::Parser;

use holdem_manual_play::agent::agent_dqn::AgentDqn;
use holdem_manual_play::agent::agent_random::AgentRandom;
use holdem_manual_play::agent::tournament::Tournament;
use holdem_manual_play::agent::Agent;
use holdem_manual_play::config::{DqnConfig, PlayConfig};
use holdem_manual_play::env::Env;

/// Measure a DQN checkpoint against a random opponent.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Weights of the DQN agent (safetensors)
    #[arg(long)]
    checkpoint: Option<PathBuf>,
    /// JSON file with environment and agent settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Base seed, worker `i` deals with `seed + i`
    #[arg(long)]
    seed: Option<u64>,
    /// Number of hands to play
    #[arg(long, default_value_t = 10_000)]
    hands: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = PlayConfig::load(args.config.as_deref())?;
    if let Some(checkpoint) = args.checkpoint {
        config.checkpoint = checkpoint;
    }
    if args.seed.is_some() {
        config.env.seed = args.seed;
    }
    config.env.record_action = false;

    let env = Env::new(config.env.clone())?;
    let expected = DqnConfig {
        num_actions: env.num_actions(),
        state_shape: env.state_shape()[0].clone(),
        ..config.agent.clone()
    };
    let dqn_agent = AgentDqn::from_checkpoint(&config.checkpoint, expected, Device::Cpu)?;

    let agents: Vec<Arc<dyn Agent>> = vec![Arc::new(dqn_agent), Arc::new(AgentRandom {})];
    let tournament = Tournament::new(config.env, agents.clone())?;
    let averages = tournament.play(args.hands)?;

    for (seat, (agent, average)) in agents.iter().zip(averages.iter()).enumerate() {
        println!(
            "Player {} ({}): {:.4} bb/hand over {} hands",
            seat,
            agent.name(),
            average,
            args.hands
        );
    }
    Ok(())
}
