//! Per-step market data series

use std::collections::BTreeMap;

use crate::orderbook::{OrderBook, Price, TOP_LEVELS, Vol};

/// Level-1 time series: one sample per step of the top-of-book state and
/// the step's traded volume.
#[derive(Debug, Clone, Default)]
pub(super) struct Level1Records {
    pub bid_price: Vec<Price>,
    pub ask_price: Vec<Price>,
    pub bid_vol: Vec<Vol>,
    pub ask_vol: Vec<Vol>,
    pub bid_touch_vol: Vec<Vol>,
    pub ask_touch_vol: Vec<Vol>,
    pub bid_touch_orders: Vec<u32>,
    pub ask_touch_orders: Vec<u32>,
    pub trade_vol: Vec<Vol>,
}

impl Level1Records {
    /// Record one sample from the post-application book state.
    pub fn record(&mut self, book: &OrderBook, trade_vol: Vol) {
        let (bid_price, ask_price) = book.bid_ask();
        self.bid_price.push(bid_price);
        self.ask_price.push(ask_price);
        self.bid_vol.push(book.bid_vol());
        self.ask_vol.push(book.ask_vol());
        self.bid_touch_vol.push(book.best_bid_vol());
        self.ask_touch_vol.push(book.best_ask_vol());
        self.bid_touch_orders.push(book.best_bid_orders() as u32);
        self.ask_touch_orders.push(book.best_ask_orders() as u32);
        self.trade_vol.push(trade_vol);
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.trade_vol.len()
    }

    /// Copy the series into a keyed map.
    pub fn to_map(&self) -> BTreeMap<&'static str, Vec<u32>> {
        BTreeMap::from([
            ("bid_price", self.bid_price.clone()),
            ("ask_price", self.ask_price.clone()),
            ("bid_vol", self.bid_vol.clone()),
            ("ask_vol", self.ask_vol.clone()),
            ("bid_touch_vol", self.bid_touch_vol.clone()),
            ("ask_touch_vol", self.ask_touch_vol.clone()),
            ("bid_touch_order_count", self.bid_touch_orders.clone()),
            ("ask_touch_order_count", self.ask_touch_orders.clone()),
            ("trade_vol", self.trade_vol.clone()),
        ])
    }
}

/// Level-2 time series: the level-1 series plus per-step volume and order
/// count for the top [`TOP_LEVELS`] price levels each side.
#[derive(Debug, Clone, Default)]
pub(super) struct Level2Records {
    pub level_1: Level1Records,
    pub bid_level_vol: [Vec<Vol>; TOP_LEVELS],
    pub bid_level_orders: [Vec<u32>; TOP_LEVELS],
    pub ask_level_vol: [Vec<Vol>; TOP_LEVELS],
    pub ask_level_orders: [Vec<u32>; TOP_LEVELS],
}

impl Level2Records {
    /// Record one sample from the post-application book state.
    pub fn record(&mut self, book: &OrderBook, trade_vol: Vol) {
        self.level_1.record(book, trade_vol);
        let depth = book.level_2_data();
        for (k, level) in depth.bid_levels.iter().enumerate() {
            self.bid_level_vol[k].push(level.vol);
            self.bid_level_orders[k].push(level.n_orders);
        }
        for (k, level) in depth.ask_levels.iter().enumerate() {
            self.ask_level_vol[k].push(level.vol);
            self.ask_level_orders[k].push(level.n_orders);
        }
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.level_1.len()
    }

    /// Copy the series into a keyed map.
    pub fn to_map(&self) -> BTreeMap<String, Vec<u32>> {
        let mut data: BTreeMap<String, Vec<u32>> = self
            .level_1
            .to_map()
            .into_iter()
            .map(|(key, series)| (key.to_string(), series))
            .collect();
        for k in 0..TOP_LEVELS {
            data.insert(format!("bid_vol_{k}"), self.bid_level_vol[k].clone());
            data.insert(format!("ask_vol_{k}"), self.ask_level_vol[k].clone());
            data.insert(format!("n_bid_{k}"), self.bid_level_orders[k].clone());
            data.insert(format!("n_ask_{k}"), self.ask_level_orders[k].clone());
        }
        data
    }
}
