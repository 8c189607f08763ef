//! Step-based simulation environments, agents and the runner.

mod agent;
mod batch;
mod env;
mod instruction;
mod records;
mod runner;

pub use agent::{Agent, BatchAgent, RandomAgent, RandomBatchAgents};
pub use batch::{BatchStepEnv, LEVEL_1_LEN, LEVEL_2_LEN};
pub use env::StepEnv;
pub use instruction::{Instruction, InstructionBlock, InstructionError};
pub use runner::{run, run_batch};
