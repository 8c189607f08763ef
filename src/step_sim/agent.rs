//! Agent capabilities and reference random agents

use rand::{Rng, RngCore};

use crate::orderbook::{OrderId, OrderStatus, Price, Side, TraderId, Vol};
use crate::step_sim::batch::LEVEL_2_LEN;
use crate::step_sim::env::StepEnv;
use crate::step_sim::instruction::InstructionBlock;

/// A simulation participant driving a [`StepEnv`] directly.
///
/// The runner calls `update` once per step for every agent in list order;
/// agents stage instructions through the environment and must never call
/// [`StepEnv::step`] themselves.
pub trait Agent {
    /// Update internal state and stage instructions for this step.
    fn update(&mut self, rng: &mut dyn RngCore, env: &mut StepEnv);
}

/// A simulation participant producing batched array instructions.
///
/// Instead of touching the environment, a batch agent observes the flat
/// level-2 data vector and returns an [`InstructionBlock`] for the runner
/// to submit.
pub trait BatchAgent {
    /// Update internal state and return this step's instructions.
    fn update(&mut self, rng: &mut dyn RngCore, level_2_data: &[u32; LEVEL_2_LEN])
    -> InstructionBlock;
}

/// Agent placing uniformly sampled orders.
///
/// Each step, with probability `activity_rate`: cancel the live order if
/// one is still active, otherwise place a new order on a random side with
/// price and volume sampled from the configured ranges. Not a model of
/// any realistic behaviour; intended for testing and benchmarking.
pub struct RandomAgent {
    trader_id: TraderId,
    activity_rate: f64,
    tick_range: (Price, Price),
    vol_range: (Vol, Vol),
    tick_size: Price,
    order_id: Option<OrderId>,
}

impl RandomAgent {
    /// Create an agent sampling ticks from `tick_range` and volumes from
    /// `vol_range` (upper bounds exclusive).
    pub fn new(
        trader_id: TraderId,
        activity_rate: f64,
        tick_range: (Price, Price),
        vol_range: (Vol, Vol),
        tick_size: Price,
    ) -> Self {
        Self {
            trader_id,
            activity_rate,
            tick_range,
            vol_range,
            tick_size,
            order_id: None,
        }
    }
}

impl Agent for RandomAgent {
    fn update(&mut self, rng: &mut dyn RngCore, env: &mut StepEnv) {
        if rng.gen_range(0.0..1.0) >= self.activity_rate {
            return;
        }
        match self.order_id {
            Some(id) if env.order_status(id) == Some(OrderStatus::Active) => {
                env.cancel_order(id);
                self.order_id = None;
            }
            _ => {
                let tick = rng.gen_range(self.tick_range.0..self.tick_range.1);
                let vol = rng.gen_range(self.vol_range.0..self.vol_range.1);
                let side = Side::from(rng.gen_bool(0.5));
                let id = env.place_order(side, vol, self.trader_id, Some(tick * self.tick_size));
                self.order_id = Some(id);
            }
        }
    }
}

/// A pool of agents placing one uniformly sampled order each per step,
/// batched into a single [`InstructionBlock`].
pub struct RandomBatchAgents {
    n_agents: usize,
    tick_range: (Price, Price),
    vol_range: (Vol, Vol),
    tick_size: Price,
}

impl RandomBatchAgents {
    /// Create a pool of `n_agents` samplers (range upper bounds
    /// exclusive).
    pub fn new(
        n_agents: usize,
        tick_range: (Price, Price),
        vol_range: (Vol, Vol),
        tick_size: Price,
    ) -> Self {
        Self {
            n_agents,
            tick_range,
            vol_range,
            tick_size,
        }
    }
}

impl BatchAgent for RandomBatchAgents {
    fn update(
        &mut self,
        rng: &mut dyn RngCore,
        _level_2_data: &[u32; LEVEL_2_LEN],
    ) -> InstructionBlock {
        let n = self.n_agents;
        let mut block = InstructionBlock {
            kinds: vec![1; n],
            sides: Vec::with_capacity(n),
            vols: Vec::with_capacity(n),
            trader_ids: (0..n as TraderId).collect(),
            prices: Vec::with_capacity(n),
            order_ids: vec![0; n],
        };
        for _ in 0..n {
            block.sides.push(rng.gen_bool(0.5));
            block.vols.push(rng.gen_range(self.vol_range.0..self.vol_range.1));
            block
                .prices
                .push(rng.gen_range(self.tick_range.0..self.tick_range.1) * self.tick_size);
        }
        block
    }
}
