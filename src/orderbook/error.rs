//! Order book error types

use thiserror::Error;

use super::types::{Nanos, OrderId, OrderStatus, Price};

/// Errors surfaced by order book operations.
///
/// These are validation rejections, not failures of the engine: callers
/// that stage instructions drop them as no-ops so a simulation never
/// aborts on a bad sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum OrderBookError {
    /// The id was never issued by this book.
    #[error("order {0} not found")]
    OrderNotFound(OrderId),

    /// The order exists but is not resting on the book.
    #[error("order {id} is not active (status {status})")]
    OrderNotActive {
        /// The targeted order id.
        id: OrderId,
        /// Its current status.
        status: OrderStatus,
    },

    /// The price is not a positive multiple of the tick size inside the
    /// valid limit range.
    #[error("invalid price {price} for tick size {tick_size}")]
    InvalidPrice {
        /// The offending price.
        price: Price,
        /// The book's tick size.
        tick_size: Price,
    },

    /// Attempt to move the clock backwards.
    #[error("time {time} is before the current book time {now}")]
    TimeReversal {
        /// The requested time.
        time: Nanos,
        /// The current book time.
        now: Nanos,
    },
}
