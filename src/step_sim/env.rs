//! Step-based discrete event simulation environment

use std::collections::BTreeMap;
use std::mem;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha12Rng;
use tracing::trace;

use crate::orderbook::{
    Nanos, Order, OrderBook, OrderId, OrderStatus, Price, Side, TradeRecord, TraderId, Vol,
};
use crate::step_sim::instruction::{Instruction, apply};
use crate::step_sim::records::Level1Records;

/// Discrete-event simulation environment advancing an [`OrderBook`] in
/// fixed time steps.
///
/// Mutating calls between steps do not touch the book; they stage
/// [`Instruction`]s. Each [`StepEnv::step`] shuffles the staged
/// instructions under the environment's seeded generator, applies them in
/// the permuted order, advances the clock by the step size and records one
/// sample of the level-1 market data. Two environments constructed with
/// the same parameters and fed identical instruction sequences produce
/// identical histories.
pub struct StepEnv {
    book: OrderBook,
    rng: ChaCha12Rng,
    step_size: Nanos,
    staged: Vec<Instruction>,
    records: Level1Records,
}

impl StepEnv {
    /// Create an environment over a fresh book.
    ///
    /// `seed` fixes the per-step instruction permutation; `step_size` is
    /// the number of simulated nanoseconds each step advances the clock.
    pub fn new(seed: u64, start_time: Nanos, tick_size: Price, step_size: Nanos) -> Self {
        Self {
            book: OrderBook::with_tick_size(start_time, tick_size),
            rng: ChaCha12Rng::seed_from_u64(seed),
            step_size,
            staged: Vec::new(),
            records: Level1Records::default(),
        }
    }

    /// Current simulated time.
    #[inline]
    pub fn time(&self) -> Nanos {
        self.book.time()
    }

    /// Number of completed steps.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.records.len()
    }

    /// The underlying book, for read-only queries.
    #[inline]
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// Best bid and ask prices.
    #[inline]
    pub fn bid_ask(&self) -> (Price, Price) {
        self.book.bid_ask()
    }

    /// Total bid volume.
    #[inline]
    pub fn bid_vol(&self) -> Vol {
        self.book.bid_vol()
    }

    /// Total ask volume.
    #[inline]
    pub fn ask_vol(&self) -> Vol {
        self.book.ask_vol()
    }

    /// Volume at the best bid.
    #[inline]
    pub fn best_bid_vol(&self) -> Vol {
        self.book.best_bid_vol()
    }

    /// Volume at the best ask.
    #[inline]
    pub fn best_ask_vol(&self) -> Vol {
        self.book.best_ask_vol()
    }

    /// Status of an order, `None` for an id this book never issued.
    #[inline]
    pub fn order_status(&self, id: OrderId) -> Option<OrderStatus> {
        self.book.order_status(id)
    }

    /// Full trade log.
    #[inline]
    pub fn get_trades(&self) -> &[TradeRecord] {
        self.book.get_trades()
    }

    /// Full order history.
    #[inline]
    pub fn get_orders(&self) -> &[Order] {
        self.book.get_orders()
    }

    /// Stage a new order, returning its pre-allocated id.
    ///
    /// The order is created in the arena immediately (so the id is stable)
    /// but only applied to the book by the next [`StepEnv::step`].
    /// Validation failures mark it rejected exactly as
    /// [`OrderBook::place_order`] does.
    pub fn place_order(
        &mut self,
        side: Side,
        vol: Vol,
        trader_id: TraderId,
        price: Option<Price>,
    ) -> OrderId {
        let id = self.book.create_order(side, vol, trader_id, price);
        self.staged.push(Instruction::Submit(id));
        id
    }

    /// Stage a cancellation. Unknown or inactive targets are no-ops at
    /// apply time.
    pub fn cancel_order(&mut self, id: OrderId) {
        self.staged.push(Instruction::Cancel(id));
    }

    /// Stage a modification. Invalid targets or parameters are no-ops at
    /// apply time.
    pub fn modify_order(&mut self, id: OrderId, new_price: Option<Price>, new_vol: Option<Vol>) {
        self.staged.push(Instruction::Modify {
            order_id: id,
            new_price,
            new_vol,
        });
    }

    /// Number of instructions currently staged.
    #[inline]
    pub fn n_staged(&self) -> usize {
        self.staged.len()
    }

    /// Run one simulation step.
    ///
    /// Shuffles the staged instructions with the environment's generator,
    /// applies them in the permuted order at the current simulated time,
    /// clears the buffer, advances the clock by the step size and records
    /// one level-1 sample of the post-application state.
    pub fn step(&mut self) {
        let mut staged = mem::take(&mut self.staged);
        staged.shuffle(&mut self.rng);
        trace!(n = staged.len(), time = self.book.time(), "applying step");

        let mark = self.book.trade_count();
        for instruction in staged {
            apply(&mut self.book, instruction);
        }
        self.book.advance_clock(self.step_size);

        let trade_vol = self.book.trade_vol_since(mark);
        self.records.record(&self.book, trade_vol);
    }

    /// Bid and ask touch prices per step.
    pub fn get_prices(&self) -> (Vec<Price>, Vec<Price>) {
        (
            self.records.bid_price.clone(),
            self.records.ask_price.clone(),
        )
    }

    /// Total bid and ask volumes per step.
    pub fn get_volumes(&self) -> (Vec<Vol>, Vec<Vol>) {
        (self.records.bid_vol.clone(), self.records.ask_vol.clone())
    }

    /// Bid and ask touch volumes per step.
    pub fn get_touch_volumes(&self) -> (Vec<Vol>, Vec<Vol>) {
        (
            self.records.bid_touch_vol.clone(),
            self.records.ask_touch_vol.clone(),
        )
    }

    /// Bid and ask touch order counts per step.
    pub fn get_touch_order_counts(&self) -> (Vec<u32>, Vec<u32>) {
        (
            self.records.bid_touch_orders.clone(),
            self.records.ask_touch_orders.clone(),
        )
    }

    /// Traded volume per step.
    pub fn get_trade_volumes(&self) -> Vec<Vol> {
        self.records.trade_vol.clone()
    }

    /// All level-1 series keyed by name.
    ///
    /// Keys: `bid_price`, `ask_price`, `bid_vol`, `ask_vol`,
    /// `bid_touch_vol`, `ask_touch_vol`, `bid_touch_order_count`,
    /// `ask_touch_order_count`, `trade_vol`.
    pub fn get_market_data(&self) -> BTreeMap<&'static str, Vec<u32>> {
        self.records.to_map()
    }
}
