use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use candle_core::Device;
use clap::Parser;

use holdem_manual_play::agent::agent_dqn::AgentDqn;
use holdem_manual_play::agent::agent_human::AgentHuman;
use holdem_manual_play::agent::Agent;
use holdem_manual_play::config::{DqnConfig, PlayConfig};
use holdem_manual_play::env::Env;
use holdem_manual_play::session::{self, HUMAN_SEAT};

/// Play heads-up limit hold'em against a trained DQN agent.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Weights of the DQN agent (safetensors)
    #[arg(long)]
    checkpoint: Option<PathBuf>,
    /// JSON file with environment and agent settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the card dealing
    #[arg(long)]
    seed: Option<u64>,
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

    // 1. Environment
    let mut env = Env::new(config.env.clone())?;

    // 2. Trained agent, restored on CPU
    println!("Loading DQN Agent...");
    let expected = DqnConfig {
        num_actions: env.num_actions(),
        state_shape: env.state_shape()[0].clone(),
        ..config.agent.clone()
    };
    let dqn_agent = AgentDqn::from_checkpoint(&config.checkpoint, expected, Device::Cpu)?;
    let agent_name = dqn_agent.name().to_string();

    // 3. Human agent
    let human_agent = AgentHuman::new(env.num_actions());

    // 4. Human in seat 0, DQN in seat 1
    env.set_agents(vec![Arc::new(human_agent), Arc::new(dqn_agent)])?;
    println!("\n>> Game Setup Complete. You are Player {}.", HUMAN_SEAT);

    // 5. Interactive loop
    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = session::run(&mut env, &agent_name, stdin.lock(), stdout.lock())?;
    log::info!("session over after {} hands", summary.hands);
    Ok(())
}
