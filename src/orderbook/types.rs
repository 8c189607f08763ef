//! Core order types and boundary constants

use std::fmt;

use serde::{Deserialize, Serialize};

/// Price in integral ticks. Limit prices must be exact multiples of the
/// book's tick size.
pub type Price = u32;

/// Order volume.
pub type Vol = u32;

/// Identifier of the trader/agent that placed an order.
pub type TraderId = u32;

/// Dense order identifier, assigned from 0 in placement order and never
/// reused.
pub type OrderId = u64;

/// Simulated time in nanoseconds.
pub type Nanos = u64;

/// Maximum representable price.
///
/// Reserved as the limit of a market buy order, so that the crossing
/// condition `bid price >= best ask` is trivially true. The symmetric
/// market sell sentinel is `0`. Neither value is a valid limit price.
pub const MAX_PRICE: Price = Price::MAX;

/// Side of the order book.
///
/// The boundary encoding is `bid = true`, `ask = false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy side.
    Bid,
    /// Sell side.
    Ask,
}

impl Side {
    /// Returns the opposite side of the book.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }

    /// Sentinel price assigned to a market order on this side.
    ///
    /// A market buy carries [`MAX_PRICE`] and a market sell carries `0`,
    /// which makes the crossing check against the opposite touch trivially
    /// true while the opposite side holds volume.
    #[inline]
    pub fn market_price(self) -> Price {
        match self {
            Side::Bid => MAX_PRICE,
            Side::Ask => 0,
        }
    }

    /// `true` for [`Side::Bid`].
    #[inline]
    pub fn is_bid(self) -> bool {
        matches!(self, Side::Bid)
    }
}

impl From<bool> for Side {
    fn from(is_bid: bool) -> Self {
        if is_bid { Side::Bid } else { Side::Ask }
    }
}

impl From<Side> for bool {
    fn from(side: Side) -> Self {
        side.is_bid()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => write!(f, "bid"),
            Side::Ask => write!(f, "ask"),
        }
    }
}

/// Lifecycle status of an order.
///
/// Orders are created `New`, become `Active` once resting on the book,
/// and end in one of the terminal states `Filled`, `Cancelled` or
/// `Rejected`. The `u8` representation is the stable boundary encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OrderStatus {
    /// Created but not yet applied to the book.
    New = 0,
    /// Resting on the book with remaining volume.
    Active = 1,
    /// Fully executed.
    Filled = 2,
    /// Cancelled by request, or a market-order residual that was dropped.
    Cancelled = 3,
    /// Failed validation at placement.
    Rejected = 4,
}

impl OrderStatus {
    /// Stable numeric code of this status.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// `true` once the order can no longer change state.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Filled | OrderStatus::Cancelled | OrderStatus::Rejected
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderStatus::New => "new",
            OrderStatus::Active => "active",
            OrderStatus::Filled => "filled",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Rejected => "rejected",
        };
        write!(f, "{name}")
    }
}

/// A single order record.
///
/// Records live in the order arena for the lifetime of the book; `vol`
/// tracks the remaining volume while `start_vol` keeps the volume the
/// order was placed with. Market orders carry their side's sentinel
/// price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Side the order was placed on.
    pub side: Side,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Simulated time the order was applied to the book.
    pub arr_time: Nanos,
    /// Simulated time the order reached a terminal state, `0` until then.
    pub end_time: Nanos,
    /// Remaining volume.
    pub vol: Vol,
    /// Volume the order was placed with.
    pub start_vol: Vol,
    /// Limit price, or the side's market sentinel.
    pub price: Price,
    /// Id of the trader that placed the order.
    pub trader_id: TraderId,
    /// Dense order id.
    pub order_id: OrderId,
}

impl Order {
    /// `true` when the price is one of the market-order sentinels.
    #[inline]
    pub fn is_market(&self) -> bool {
        self.price == 0 || self.price == MAX_PRICE
    }
}

/// Record of a single fill.
///
/// `side` and `price` describe the passive (resting) order consumed by the
/// aggressor, so `price` is the maker price rather than the aggressor's
/// limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Simulated time of the fill.
    pub time: Nanos,
    /// Side of the passive order.
    pub side: Side,
    /// Resting price of the passive order.
    pub price: Price,
    /// Executed volume.
    pub vol: Vol,
    /// Id of the aggressing order.
    pub active_id: OrderId,
    /// Id of the passive order.
    pub passive_id: OrderId,
}
