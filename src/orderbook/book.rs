//! Core OrderBook: order arena, side books, trade log and clock

use super::arena::OrderArena;
use super::error::OrderBookError;
use super::side::SideBook;
use super::types::{MAX_PRICE, Nanos, Order, OrderId, OrderStatus, Price, Side, TradeRecord, Vol};

/// A single-instrument limit order book with price-time priority matching.
///
/// The book owns an [`OrderArena`] holding every order record ever issued,
/// one [`SideBook`] per side referencing those records by id, an
/// append-only trade log and the simulated clock. All operations are
/// synchronous and single-threaded; `&mut self` enforces exclusive access.
pub struct OrderBook {
    pub(super) arena: OrderArena,
    pub(super) bids: SideBook,
    pub(super) asks: SideBook,
    pub(super) trades: Vec<TradeRecord>,
    pub(super) time: Nanos,
    pub(super) tick_size: Price,
}

impl OrderBook {
    /// Create a new order book with tick size 1.
    pub fn new(start_time: Nanos) -> Self {
        Self::with_tick_size(start_time, 1)
    }

    /// Create a new order book with price validation against `tick_size`.
    ///
    /// Limit prices submitted to this book must be exact multiples of
    /// `tick_size`, strictly between `0` and [`MAX_PRICE`].
    ///
    /// # Panics
    /// Panics if `tick_size` is zero.
    pub fn with_tick_size(start_time: Nanos, tick_size: Price) -> Self {
        assert!(tick_size > 0, "tick size must be positive");
        Self {
            arena: OrderArena::new(),
            bids: SideBook::new(Side::Bid),
            asks: SideBook::new(Side::Ask),
            trades: Vec::new(),
            time: start_time,
            tick_size,
        }
    }

    /// Current simulated time in nanoseconds.
    #[inline]
    pub fn time(&self) -> Nanos {
        self.time
    }

    /// Tick size limit prices are validated against.
    #[inline]
    pub fn tick_size(&self) -> Price {
        self.tick_size
    }

    /// Set the simulated clock.
    ///
    /// # Errors
    /// [`OrderBookError::TimeReversal`] if `time` is before the current
    /// clock; the clock is left unchanged.
    pub fn set_time(&mut self, time: Nanos) -> Result<(), OrderBookError> {
        if time < self.time {
            return Err(OrderBookError::TimeReversal {
                time,
                now: self.time,
            });
        }
        self.time = time;
        Ok(())
    }

    /// Advance the clock by `step`, used by the step environments after
    /// applying a batch of instructions.
    pub(crate) fn advance_clock(&mut self, step: Nanos) {
        self.time += step;
    }

    /// Best bid and ask prices.
    ///
    /// An empty side reports its sentinel: `0` for bids, [`MAX_PRICE`]
    /// for asks.
    #[inline]
    pub fn bid_ask(&self) -> (Price, Price) {
        (
            self.bids.best_price().unwrap_or(0),
            self.asks.best_price().unwrap_or(MAX_PRICE),
        )
    }

    /// Total volume resting on the bid side.
    #[inline]
    pub fn bid_vol(&self) -> Vol {
        self.bids.vol()
    }

    /// Total volume resting on the ask side.
    #[inline]
    pub fn ask_vol(&self) -> Vol {
        self.asks.vol()
    }

    /// Volume at the best bid, `0` when the side is empty.
    #[inline]
    pub fn best_bid_vol(&self) -> Vol {
        self.bids.best_vol()
    }

    /// Volume at the best ask, `0` when the side is empty.
    #[inline]
    pub fn best_ask_vol(&self) -> Vol {
        self.asks.best_vol()
    }

    /// Number of orders at the best bid.
    #[inline]
    pub fn best_bid_orders(&self) -> usize {
        self.bids.best_n_orders()
    }

    /// Number of orders at the best ask.
    #[inline]
    pub fn best_ask_orders(&self) -> usize {
        self.asks.best_n_orders()
    }

    /// Bid side of the book.
    #[inline]
    pub fn bids(&self) -> &SideBook {
        &self.bids
    }

    /// Ask side of the book.
    #[inline]
    pub fn asks(&self) -> &SideBook {
        &self.asks
    }

    /// Status of an order, `None` if the id was never issued.
    #[inline]
    pub fn order_status(&self, id: OrderId) -> Option<OrderStatus> {
        self.arena.get(id).map(|order| order.status)
    }

    /// Record of an order, `None` if the id was never issued.
    #[inline]
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.arena.get(id)
    }

    /// Full order history, one record per issued id in id order.
    #[inline]
    pub fn get_orders(&self) -> &[Order] {
        self.arena.as_slice()
    }

    /// Full trade log in chronological order.
    #[inline]
    pub fn get_trades(&self) -> &[TradeRecord] {
        &self.trades
    }

    /// Number of trades recorded so far.
    #[inline]
    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    /// Volume traded since the trade log held `mark` entries.
    pub fn trade_vol_since(&self, mark: usize) -> Vol {
        self.trades
            .get(mark..)
            .map_or(0, |trades| trades.iter().map(|trade| trade.vol).sum())
    }

    pub(super) fn side(&self, side: Side) -> &SideBook {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    pub(super) fn side_mut(&mut self, side: Side) -> &mut SideBook {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    /// `true` when `price` is a valid limit price for this book.
    pub(super) fn valid_limit_price(&self, price: Price) -> bool {
        price > 0 && price < MAX_PRICE && price % self.tick_size == 0
    }
}
