//! Depth snapshots of the book for market data

use serde::{Deserialize, Serialize};

use super::book::OrderBook;
use super::level::PriceLevel;
use super::types::{Price, Vol};

/// Number of price levels per side captured in a level-2 snapshot.
pub const TOP_LEVELS: usize = 10;

/// Volume and order count at a single price level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelData {
    /// Aggregate volume resting at the level.
    pub vol: Vol,
    /// Number of orders queued at the level.
    pub n_orders: u32,
}

impl From<&PriceLevel> for LevelData {
    fn from(level: &PriceLevel) -> Self {
        Self {
            vol: level.vol(),
            n_orders: level.n_orders() as u32,
        }
    }
}

/// Level-2 snapshot: touch prices, side totals and the top
/// [`TOP_LEVELS`] levels per side in best-first order.
///
/// Missing levels are zero-padded, so the arrays always hold
/// [`TOP_LEVELS`] entries. The first entry of each array is the touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level2Data {
    /// Best bid price, `0` when the bid side is empty.
    pub bid_price: Price,
    /// Best ask price, [`crate::orderbook::MAX_PRICE`] when the ask side
    /// is empty.
    pub ask_price: Price,
    /// Total bid volume.
    pub bid_vol: Vol,
    /// Total ask volume.
    pub ask_vol: Vol,
    /// Top bid levels, best first.
    pub bid_levels: [LevelData; TOP_LEVELS],
    /// Top ask levels, best first.
    pub ask_levels: [LevelData; TOP_LEVELS],
}

impl OrderBook {
    /// Capture a [`Level2Data`] snapshot of the current book state.
    pub fn level_2_data(&self) -> Level2Data {
        let (bid_price, ask_price) = self.bid_ask();

        let mut bid_levels = [LevelData::default(); TOP_LEVELS];
        for (slot, level) in bid_levels.iter_mut().zip(self.bids.iter_best_first()) {
            *slot = LevelData::from(level);
        }
        let mut ask_levels = [LevelData::default(); TOP_LEVELS];
        for (slot, level) in ask_levels.iter_mut().zip(self.asks.iter_best_first()) {
            *slot = LevelData::from(level);
        }

        Level2Data {
            bid_price,
            ask_price,
            bid_vol: self.bid_vol(),
            ask_vol: self.ask_vol(),
            bid_levels,
            ask_levels,
        }
    }
}
