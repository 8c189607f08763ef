//! Batch step environment surfacing flat-array market data

use std::collections::BTreeMap;
use std::mem;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha12Rng;
use tracing::trace;

use crate::orderbook::{
    Nanos, Order, OrderBook, OrderId, OrderStatus, Price, Side, TOP_LEVELS, TradeRecord, TraderId,
    Vol,
};
use crate::step_sim::instruction::{
    Instruction, InstructionBlock, InstructionError, KIND_CANCEL, KIND_NEW_ORDER, apply,
    check_new_order,
};
use crate::step_sim::records::Level2Records;

/// Length of the flat level-1 data vector.
pub const LEVEL_1_LEN: usize = 9;

/// Length of the flat level-2 data vector: five header values followed by
/// a `(bid_vol, bid_orders, ask_vol, ask_orders)` quadruple per depth
/// level.
pub const LEVEL_2_LEN: usize = 5 + 4 * TOP_LEVELS;

/// Step environment variant driven through batched instruction arrays.
///
/// Mirrors [`crate::step_sim::StepEnv`] but exchanges market state as flat
/// `u32` vectors and accepts columnar instruction batches, the shape used
/// by array-programming agent implementations. Batch submissions validate
/// every row before staging anything; a bad row fails the whole call.
/// Records the level-2 series (touch plus top [`TOP_LEVELS`] levels per
/// side) each step.
pub struct BatchStepEnv {
    book: OrderBook,
    rng: ChaCha12Rng,
    step_size: Nanos,
    staged: Vec<Instruction>,
    records: Level2Records,
    last_trade_vol: Vol,
}

impl BatchStepEnv {
    /// Create an environment over a fresh book.
    pub fn new(seed: u64, start_time: Nanos, tick_size: Price, step_size: Nanos) -> Self {
        Self {
            book: OrderBook::with_tick_size(start_time, tick_size),
            rng: ChaCha12Rng::seed_from_u64(seed),
            step_size,
            staged: Vec::new(),
            records: Level2Records::default(),
            last_trade_vol: 0,
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

    /// Flat level-1 market data vector.
    ///
    /// Layout: `[trade_vol, bid_price, ask_price, bid_vol, ask_vol,
    /// bid_touch_vol, bid_touch_orders, ask_touch_vol, ask_touch_orders]`
    /// where `trade_vol` is the volume traded in the previous step. Equal
    /// to the first [`LEVEL_1_LEN`] values of
    /// [`BatchStepEnv::level_2_data`].
    pub fn level_1_data(&self) -> [u32; LEVEL_1_LEN] {
        let (bid_price, ask_price) = self.book.bid_ask();
        [
            self.last_trade_vol,
            bid_price,
            ask_price,
            self.book.bid_vol(),
            self.book.ask_vol(),
            self.book.best_bid_vol(),
            self.book.best_bid_orders() as u32,
            self.book.best_ask_vol(),
            self.book.best_ask_orders() as u32,
        ]
    }

    /// Flat level-2 market data vector.
    ///
    /// The five header values `[trade_vol, bid_price, ask_price, bid_vol,
    /// ask_vol]` followed, for each of the top [`TOP_LEVELS`] levels per
    /// side in best-first order, by `(bid_vol_k, bid_orders_k, ask_vol_k,
    /// ask_orders_k)`; missing levels are zero-padded.
    pub fn level_2_data(&self) -> [u32; LEVEL_2_LEN] {
        let depth = self.book.level_2_data();
        let mut data = [0u32; LEVEL_2_LEN];
        data[0] = self.last_trade_vol;
        data[1] = depth.bid_price;
        data[2] = depth.ask_price;
        data[3] = depth.bid_vol;
        data[4] = depth.ask_vol;
        for k in 0..TOP_LEVELS {
            let base = 5 + 4 * k;
            data[base] = depth.bid_levels[k].vol;
            data[base + 1] = depth.bid_levels[k].n_orders;
            data[base + 2] = depth.ask_levels[k].vol;
            data[base + 3] = depth.ask_levels[k].n_orders;
        }
        data
    }

    /// Stage a batch of limit orders from columnar arrays, returning the
    /// pre-allocated dense ids.
    ///
    /// Every row is validated first (equal lengths, positive volume,
    /// tick-aligned in-range price).
    ///
    /// # Errors
    /// Any invalid row fails the whole call with nothing staged.
    pub fn submit_limit_orders(
        &mut self,
        sides: &[bool],
        vols: &[Vol],
        trader_ids: &[TraderId],
        prices: &[Price],
    ) -> Result<Vec<OrderId>, InstructionError> {
        let rows = sides.len();
        for column_len in [vols.len(), trader_ids.len(), prices.len()] {
            if column_len != rows {
                return Err(InstructionError::LengthMismatch {
                    expected: rows,
                    got: column_len,
                });
            }
        }
        let tick_size = self.book.tick_size();
        for index in 0..rows {
            check_new_order(index, vols[index], prices[index], tick_size)?;
        }

        let mut ids = Vec::with_capacity(rows);
        for index in 0..rows {
            let id = self.book.create_order(
                Side::from(sides[index]),
                vols[index],
                trader_ids[index],
                Some(prices[index]),
            );
            self.staged.push(Instruction::Submit(id));
            ids.push(id);
        }
        Ok(ids)
    }

    /// Stage a batch of cancellations. Unknown or inactive ids become
    /// no-ops at apply time.
    pub fn submit_cancellations(&mut self, order_ids: &[OrderId]) {
        self.staged
            .extend(order_ids.iter().map(|&id| Instruction::Cancel(id)));
    }

    /// Stage a mixed instruction block, returning the ids allocated for
    /// its new-order rows.
    ///
    /// # Errors
    /// The whole block is validated up front; any bad row fails the call
    /// with nothing staged.
    pub fn submit_instructions(
        &mut self,
        block: &InstructionBlock,
    ) -> Result<Vec<OrderId>, InstructionError> {
        block.validate(self.book.tick_size())?;

        let mut ids = Vec::new();
        for index in 0..block.len() {
            match block.kinds[index] {
                KIND_NEW_ORDER => {
                    let id = self.book.create_order(
                        Side::from(block.sides[index]),
                        block.vols[index],
                        block.trader_ids[index],
                        Some(block.prices[index]),
                    );
                    self.staged.push(Instruction::Submit(id));
                    ids.push(id);
                }
                KIND_CANCEL => self.staged.push(Instruction::Cancel(block.order_ids[index])),
                _ => self.staged.push(Instruction::NoOp),
            }
        }
        Ok(ids)
    }

    /// Number of instructions currently staged.
    #[inline]
    pub fn n_staged(&self) -> usize {
        self.staged.len()
    }

    /// Run one simulation step.
    ///
    /// Identical to [`crate::step_sim::StepEnv::step`] except that the
    /// recorded sample covers the full level-2 depth.
    pub fn step(&mut self) {
        let mut staged = mem::take(&mut self.staged);
        staged.shuffle(&mut self.rng);
        trace!(n = staged.len(), time = self.book.time(), "applying step");

        let mark = self.book.trade_count();
        for instruction in staged {
            apply(&mut self.book, instruction);
        }
        self.book.advance_clock(self.step_size);

        self.last_trade_vol = self.book.trade_vol_since(mark);
        self.records.record(&self.book, self.last_trade_vol);
    }

    /// All level-2 series keyed by name.
    ///
    /// Keys: the nine level-1 keys plus `bid_vol_0..=9`, `ask_vol_0..=9`,
    /// `n_bid_0..=9` and `n_ask_0..=9`.
    pub fn get_market_data(&self) -> BTreeMap<String, Vec<u32>> {
        self.records.to_map()
    }
}
