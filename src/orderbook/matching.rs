//! Price-time priority matching core

use tracing::trace;

use super::book::OrderBook;
use super::types::{OrderId, OrderStatus, Side, TradeRecord};

impl OrderBook {
    /// Match an incoming order against the opposite side, then settle the
    /// residual.
    ///
    /// The loop consumes the oldest order at the best opposite price while
    /// the incoming order still has volume and its price crosses the
    /// opposite touch. Market orders carry a sentinel price so the
    /// crossing check is trivially true while the opposite side holds
    /// volume. Each fill trades `min(incoming.vol, passive.vol)` at the
    /// passive order's resting price.
    pub(super) fn match_incoming(&mut self, order_id: OrderId) {
        loop {
            let (in_side, in_price, in_vol) = {
                let order = &self.arena[order_id];
                (order.side, order.price, order.vol)
            };
            if in_vol == 0 {
                break;
            }

            let opposite = in_side.opposite();
            let Some(best) = self.side(opposite).best_price() else {
                break;
            };
            let crosses = match in_side {
                Side::Bid => in_price >= best,
                Side::Ask => in_price <= best,
            };
            if !crosses {
                break;
            }
            let Some(passive_id) = self.side(opposite).front_order(best) else {
                break;
            };

            let passive_vol = self.arena[passive_id].vol;
            let fill = in_vol.min(passive_vol);
            let exhausted = fill == passive_vol;
            let now = self.time;

            {
                let passive = &mut self.arena[passive_id];
                passive.vol -= fill;
                if exhausted {
                    passive.status = OrderStatus::Filled;
                    passive.end_time = now;
                }
            }
            self.side_mut(opposite).consume_front(best, fill, exhausted);
            self.arena[order_id].vol -= fill;

            self.trades.push(TradeRecord {
                time: now,
                side: opposite,
                price: best,
                vol: fill,
                active_id: order_id,
                passive_id,
            });
            trace!(
                active = order_id,
                passive = passive_id,
                price = best,
                vol = fill,
                "trade"
            );
        }

        self.settle_incoming(order_id);
    }

    /// Dispose of whatever remains of the incoming order once matching
    /// stops: a fully executed order is `Filled`, a market-order residual
    /// is dropped as `Cancelled`, and a limit residual rests at the tail
    /// of its price level.
    fn settle_incoming(&mut self, order_id: OrderId) {
        let (side, price, vol, is_market) = {
            let order = &self.arena[order_id];
            (order.side, order.price, order.vol, order.is_market())
        };
        let now = self.time;

        if vol == 0 {
            let order = &mut self.arena[order_id];
            order.status = OrderStatus::Filled;
            order.end_time = now;
        } else if is_market {
            let order = &mut self.arena[order_id];
            order.status = OrderStatus::Cancelled;
            order.end_time = now;
            trace!(id = order_id, residual = vol, "market residual dropped");
        } else {
            self.side_mut(side).insert_order(price, order_id, vol);
        }
    }
}
