//! Simulation runner driving agents against an environment

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use tracing::info;

use crate::step_sim::agent::{Agent, BatchAgent};
use crate::step_sim::batch::BatchStepEnv;
use crate::step_sim::env::StepEnv;
use crate::step_sim::instruction::InstructionError;

/// Run a fixed number of steps over stateful agents.
///
/// Each step, every agent's `update` is invoked in list order with a
/// runner-owned generator seeded from `seed`, then the environment steps.
/// Returns the recorded level-1 market data.
pub fn run(
    env: &mut StepEnv,
    agents: &mut [Box<dyn Agent>],
    n_steps: usize,
    seed: u64,
) -> BTreeMap<&'static str, Vec<u32>> {
    let mut rng = ChaCha12Rng::seed_from_u64(seed);
    for step in 0..n_steps {
        for agent in agents.iter_mut() {
            agent.update(&mut rng, env);
        }
        env.step();
        if (step + 1) % 100 == 0 {
            info!(step = step + 1, n_steps, "simulation progress");
        }
    }
    env.get_market_data()
}

/// Run a fixed number of steps over batch agents.
///
/// Each step, every agent observes the current level-2 data vector and
/// returns an instruction block the runner submits, then the environment
/// steps. Returns the recorded level-2 market data.
///
/// # Errors
/// Propagates the first batch validation failure; the step the failing
/// block belonged to is not executed.
pub fn run_batch(
    env: &mut BatchStepEnv,
    agents: &mut [Box<dyn BatchAgent>],
    n_steps: usize,
    seed: u64,
) -> Result<BTreeMap<String, Vec<u32>>, InstructionError> {
    let mut rng = ChaCha12Rng::seed_from_u64(seed);
    for step in 0..n_steps {
        let level_2_data = env.level_2_data();
        for agent in agents.iter_mut() {
            let block = agent.update(&mut rng, &level_2_data);
            env.submit_instructions(&block)?;
        }
        env.step();
        if (step + 1) % 100 == 0 {
            info!(step = step + 1, n_steps, "simulation progress");
        }
    }
    Ok(env.get_market_data())
}
