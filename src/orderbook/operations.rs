//! Order placement, cancellation and modification

use tracing::{debug, trace};

use super::book::OrderBook;
use super::error::OrderBookError;
use super::types::{Order, OrderId, OrderStatus, Price, Side, TraderId, Vol};

impl OrderBook {
    /// Place an order, returning its newly assigned dense id.
    ///
    /// With `price = None` the order is a market order and carries the
    /// side's sentinel price. A limit price must be a multiple of the tick
    /// size, strictly between `0` and the market sentinels. Validation
    /// failures (`vol == 0`, bad price) do not error: the order is
    /// recorded with status [`OrderStatus::Rejected`] and the book is left
    /// untouched, so a simulation never aborts on a bad sample.
    ///
    /// Placement may trigger immediate trades; any limit residual rests
    /// at the tail of its price level.
    pub fn place_order(
        &mut self,
        side: Side,
        vol: Vol,
        trader_id: TraderId,
        price: Option<Price>,
    ) -> OrderId {
        let id = self.create_order(side, vol, trader_id, price);
        self.submit_order(id);
        id
    }

    /// Create an order record without applying it to the book.
    ///
    /// Used by the step environments to pre-allocate the id at staging
    /// time; the returned id is stable across the later application by
    /// [`OrderBook::submit_order`]. Invalid parameters mark the record
    /// [`OrderStatus::Rejected`] immediately.
    pub(crate) fn create_order(
        &mut self,
        side: Side,
        vol: Vol,
        trader_id: TraderId,
        price: Option<Price>,
    ) -> OrderId {
        let is_market = price.is_none();
        let price = price.unwrap_or_else(|| side.market_price());
        let valid = vol > 0 && (is_market || self.valid_limit_price(price));
        let now = self.time;

        let status = if valid {
            OrderStatus::New
        } else {
            OrderStatus::Rejected
        };
        let end_time = if valid { 0 } else { now };
        let id = self.arena.insert(Order {
            side,
            status,
            arr_time: now,
            end_time,
            vol,
            start_vol: vol,
            trader_id,
            price,
            order_id: 0,
        });

        if valid {
            trace!(id, %side, vol, price, trader_id, "order created");
        } else {
            debug!(id, %side, vol, price, trader_id, "order rejected");
        }
        id
    }

    /// Apply a previously created order to the book at the current
    /// simulated time.
    ///
    /// A no-op unless the order is in status [`OrderStatus::New`], so
    /// rejected records and double submissions fall through harmlessly.
    pub(crate) fn submit_order(&mut self, id: OrderId) {
        match self.arena.get_mut(id) {
            Some(order) if order.status == OrderStatus::New => {
                order.arr_time = self.time;
                order.status = OrderStatus::Active;
            }
            _ => return,
        }
        self.match_incoming(id);
    }

    /// Cancel an active order, removing it from its price level.
    ///
    /// Sets status [`OrderStatus::Cancelled`] and `end_time` to the
    /// current time.
    ///
    /// # Errors
    /// [`OrderBookError::OrderNotFound`] for an unknown id,
    /// [`OrderBookError::OrderNotActive`] if the order is not resting on
    /// the book. Either way the book is unchanged.
    pub fn cancel_order(&mut self, id: OrderId) -> Result<(), OrderBookError> {
        let (side, price, vol) = match self.arena.get(id) {
            None => return Err(OrderBookError::OrderNotFound(id)),
            Some(order) if order.status != OrderStatus::Active => {
                return Err(OrderBookError::OrderNotActive {
                    id,
                    status: order.status,
                });
            }
            Some(order) => (order.side, order.price, order.vol),
        };

        self.side_mut(side).remove_order(price, id, vol);
        let now = self.time;
        let order = &mut self.arena[id];
        order.status = OrderStatus::Cancelled;
        order.end_time = now;
        trace!(id, "order cancelled");
        Ok(())
    }

    /// Modify an active order's price and/or volume.
    ///
    /// A volume-only decrease is applied in place and keeps the order's
    /// time priority; a volume increase re-queues the order at the tail of
    /// its level (it loses priority); `new_vol = 0` behaves as a
    /// cancellation. A volume-only change never re-triggers matching.
    ///
    /// A price change is cancel-and-replace: the order is removed from its
    /// level and re-run through the matching loop as if freshly placed
    /// (possibly trading immediately), with `arr_time` unchanged.
    ///
    /// # Errors
    /// As [`OrderBook::cancel_order`] for unknown/inactive targets, plus
    /// [`OrderBookError::InvalidPrice`] when `new_price` fails tick
    /// validation. The order is unchanged on error.
    pub fn modify_order(
        &mut self,
        id: OrderId,
        new_price: Option<Price>,
        new_vol: Option<Vol>,
    ) -> Result<(), OrderBookError> {
        let (side, price, vol) = match self.arena.get(id) {
            None => return Err(OrderBookError::OrderNotFound(id)),
            Some(order) if order.status != OrderStatus::Active => {
                return Err(OrderBookError::OrderNotActive {
                    id,
                    status: order.status,
                });
            }
            Some(order) => (order.side, order.price, order.vol),
        };
        if let Some(price) = new_price
            && !self.valid_limit_price(price)
        {
            return Err(OrderBookError::InvalidPrice {
                price,
                tick_size: self.tick_size,
            });
        }

        match new_price {
            Some(price_to) if price_to != price => {
                let vol_to = new_vol.unwrap_or(vol);
                self.side_mut(side).remove_order(price, id, vol);
                if vol_to == 0 {
                    let now = self.time;
                    let order = &mut self.arena[id];
                    order.status = OrderStatus::Cancelled;
                    order.end_time = now;
                    return Ok(());
                }
                {
                    let order = &mut self.arena[id];
                    order.price = price_to;
                    order.vol = vol_to;
                }
                trace!(id, price_to, vol_to, "order repriced");
                self.match_incoming(id);
            }
            _ => {
                let Some(vol_to) = new_vol else {
                    return Ok(());
                };
                if vol_to == 0 {
                    self.side_mut(side).remove_order(price, id, vol);
                    let now = self.time;
                    let order = &mut self.arena[id];
                    order.status = OrderStatus::Cancelled;
                    order.end_time = now;
                } else if vol_to < vol {
                    self.side_mut(side).reduce_order(price, vol - vol_to);
                    self.arena[id].vol = vol_to;
                } else if vol_to > vol {
                    // Larger size drops the order to the back of the queue.
                    self.side_mut(side).remove_order(price, id, vol);
                    self.side_mut(side).insert_order(price, id, vol_to);
                    self.arena[id].vol = vol_to;
                }
                trace!(id, vol_to, "order volume modified");
            }
        }
        Ok(())
    }
}
