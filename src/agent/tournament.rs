use std::sync::{Arc, Mutex, PoisonError};

use anyhow::bail;
use threadpool::ThreadPool;

use super::Agent;
use crate::config::EnvConfig;
use crate::env::Env;

/// Plays many hands between a fixed set of seated agents.
pub struct Tournament {
    env_config: EnvConfig,
    agents: Vec<Arc<dyn Agent>>,
}

impl Tournament {
    pub fn new(env_config: EnvConfig, agents: Vec<Arc<dyn Agent>>) -> anyhow::Result<Tournament> {
        env_config.game.validate()?;
        if agents.len() != env_config.game.player_count as usize {
            bail!(
                "tournament needs {} agents, got {}",
                env_config.game.player_count,
                agents.len()
            );
        }
        Ok(Tournament { env_config, agents })
    }

    /// Average payoff per seat over `num_hands` hands, in big blinds.
    pub fn play(&self, num_hands: usize) -> anyhow::Result<Vec<f32>> {
        if num_hands == 0 {
            bail!("a tournament needs at least one hand");
        }

        let player_count = self.agents.len();
        let n_workers = num_cpus::get().clamp(1, num_hands);
        let thread_pool = ThreadPool::new(n_workers);

        let totals = Arc::new(Mutex::new(vec![0.0f64; player_count]));
        let errors: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

        let batch_size = num_hands / n_workers;
        let remainder = num_hands % n_workers;

        for worker in 0..n_workers {
            let hands = batch_size + usize::from(worker < remainder);
            let mut env_config = self.env_config.clone();
            env_config.seed = env_config.seed.map(|s| s.wrapping_add(worker as u64));
            let agents = self.agents.clone();
            let totals = Arc::clone(&totals);
            let errors = Arc::clone(&errors);

            thread_pool.execute(move || {
                let result = Self::play_batch(env_config, agents, hands);
                match result {
                    Ok(won) => {
                        let mut totals = totals.lock().unwrap_or_else(PoisonError::into_inner);
                        for (t, w) in totals.iter_mut().zip(won) {
                            *t += w;
                        }
                        log::debug!("worker {} played {} hands", worker, hands);
                    }
                    Err(error) => {
                        errors
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .push(format!("worker {}: {:#}", worker, error));
                    }
                }
            });
        }

        thread_pool.join();

        if thread_pool.panic_count() > 0 {
            bail!("{} tournament workers panicked", thread_pool.panic_count());
        }
        let errors = errors.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(error) = errors.first() {
            bail!("tournament failed: {}", error);
        }

        let totals = totals.lock().unwrap_or_else(PoisonError::into_inner);
        let averages = totals
            .iter()
            .map(|t| (t / num_hands as f64) as f32)
            .collect::<Vec<_>>();

        for (agent, average) in self.agents.iter().zip(averages.iter()) {
            log::info!("{}: {:.4} bb/hand over {} hands", agent.name(), average, num_hands);
        }
        Ok(averages)
    }

    fn play_batch(
        env_config: EnvConfig,
        agents: Vec<Arc<dyn Agent>>,
        hands: usize,
    ) -> anyhow::Result<Vec<f64>> {
        let mut env = Env::new(env_config)?;
        env.set_agents(agents)?;

        let mut won = vec![0.0f64; env.num_players()];
        for _ in 0..hands {
            let (_, payoffs) = env.run(false)?;
            for (w, p) in won.iter_mut().zip(payoffs) {
                *w += p as f64;
            }
        }
        Ok(won)
    }
}
