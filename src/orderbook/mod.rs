//! Limit order book with price-time priority matching.

mod arena;
mod book;
mod error;
mod level;
mod matching;
mod operations;
mod side;
mod snapshot;
mod types;

#[cfg(test)]
mod tests;

pub use arena::OrderArena;
pub use book::OrderBook;
pub use error::OrderBookError;
pub use level::PriceLevel;
pub use side::SideBook;
pub use snapshot::{Level2Data, LevelData, TOP_LEVELS};
pub use types::{
    MAX_PRICE, Nanos, Order, OrderId, OrderStatus, Price, Side, TradeRecord, TraderId, Vol,
};
