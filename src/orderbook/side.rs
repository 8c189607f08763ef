//! One side of the order book: a sorted map of price levels

use std::collections::BTreeMap;

use either::Either;

use super::level::PriceLevel;
use super::types::{OrderId, Price, Side, Vol};

/// Sorted mapping from price to [`PriceLevel`] for one side of the book.
///
/// Bids iterate best-first from the highest price, asks from the lowest.
/// The `BTreeMap` keeps prices ordered so best-price lookup and best-first
/// iteration need no sorting; a running `vol` total makes the side volume
/// query O(1). The map never holds an empty level.
#[derive(Debug)]
pub struct SideBook {
    side: Side,
    levels: BTreeMap<Price, PriceLevel>,
    vol: Vol,
}

impl SideBook {
    /// Create an empty side book.
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
            vol: 0,
        }
    }

    /// Side this book holds.
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Total resting volume across all levels.
    #[inline]
    pub fn vol(&self) -> Vol {
        self.vol
    }

    /// Number of non-empty price levels.
    #[inline]
    pub fn n_levels(&self) -> usize {
        self.levels.len()
    }

    /// `true` when no orders rest on this side.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Best price: highest for bids, lowest for asks.
    #[inline]
    pub fn best_price(&self) -> Option<Price> {
        match self.side {
            Side::Bid => self.levels.keys().next_back().copied(),
            Side::Ask => self.levels.keys().next().copied(),
        }
    }

    /// Level at the touch.
    #[inline]
    pub fn best_level(&self) -> Option<&PriceLevel> {
        match self.side {
            Side::Bid => self.levels.values().next_back(),
            Side::Ask => self.levels.values().next(),
        }
    }

    /// Volume resting at the touch, `0` when the side is empty.
    #[inline]
    pub fn best_vol(&self) -> Vol {
        self.best_level().map_or(0, PriceLevel::vol)
    }

    /// Number of orders at the touch, `0` when the side is empty.
    #[inline]
    pub fn best_n_orders(&self) -> usize {
        self.best_level().map_or(0, PriceLevel::n_orders)
    }

    /// Level at `price`, if present.
    #[inline]
    pub fn level(&self, price: Price) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    /// Levels in best-first order: descending prices for bids, ascending
    /// for asks.
    pub fn iter_best_first(&self) -> impl Iterator<Item = &PriceLevel> + '_ {
        match self.side {
            Side::Ask => Either::Left(self.levels.values()),
            Side::Bid => Either::Right(self.levels.values().rev()),
        }
    }

    /// Oldest order id at `price`.
    pub(super) fn front_order(&self, price: Price) -> Option<OrderId> {
        self.levels.get(&price).and_then(PriceLevel::front)
    }

    /// Append an order at the tail of its price level, creating the level
    /// if needed.
    pub(super) fn insert_order(&mut self, price: Price, id: OrderId, vol: Vol) {
        self.levels
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price))
            .push_back(id, vol);
        self.vol += vol;
    }

    /// Remove an order from its level, dropping the level if it empties.
    /// Returns whether the order was found.
    pub(super) fn remove_order(&mut self, price: Price, id: OrderId, vol: Vol) -> bool {
        let Some(level) = self.levels.get_mut(&price) else {
            return false;
        };
        if !level.remove(id, vol) {
            return false;
        }
        self.vol -= vol;
        if level.is_empty() {
            self.levels.remove(&price);
        }
        true
    }

    /// Consume `fill` volume from the oldest order at `price`, popping the
    /// order when `exhausted` and dropping the level if it empties.
    pub(super) fn consume_front(&mut self, price: Price, fill: Vol, exhausted: bool) {
        if let Some(level) = self.levels.get_mut(&price) {
            level.consume_front(fill, exhausted);
            self.vol -= fill;
            if level.is_empty() {
                self.levels.remove(&price);
            }
        }
    }

    /// Reduce an order's contribution in place, keeping its queue position.
    pub(super) fn reduce_order(&mut self, price: Price, delta: Vol) {
        if let Some(level) = self.levels.get_mut(&price) {
            level.reduce(delta);
            self.vol -= delta;
        }
    }
}
