//! End-to-end order book scenarios

use stepbook::prelude::*;

/// The four-order book used by several scenarios: bids at 50 and 55,
/// asks at 60 and 65.
fn four_order_book() -> (OrderBook, [OrderId; 4]) {
    let mut book = OrderBook::new(0);
    let bid_50 = book.place_order(Side::Bid, 10, 11, Some(50));
    let ask_60 = book.place_order(Side::Ask, 20, 12, Some(60));
    let bid_55 = book.place_order(Side::Bid, 10, 11, Some(55));
    let ask_65 = book.place_order(Side::Ask, 20, 12, Some(65));
    (book, [bid_50, ask_60, bid_55, ask_65])
}

#[test]
fn test_init() {
    let book = OrderBook::new(0);
    assert_eq!(book.bid_ask(), (0, MAX_PRICE));
    assert_eq!(book.bid_vol(), 0);
    assert_eq!(book.ask_vol(), 0);
    assert_eq!(book.best_bid_vol(), 0);
    assert_eq!(book.best_ask_vol(), 0);
}

#[test]
fn test_place_orders() {
    let (book, _) = four_order_book();

    assert_eq!(book.bid_ask(), (55, 60));
    assert_eq!(book.bid_vol(), 20);
    assert_eq!(book.ask_vol(), 40);
    assert_eq!(book.best_bid_vol(), 10);
    assert_eq!(book.best_ask_vol(), 20);
}

#[test]
fn test_market_order_matching() {
    let (mut book, [_, ask_60, _, ask_65]) = four_order_book();

    book.set_time(10).unwrap();
    let market = book.place_order(Side::Bid, 30, 11, None);

    assert_eq!(book.order_status(market), Some(OrderStatus::Filled));
    assert_eq!(book.order_status(ask_60), Some(OrderStatus::Filled));
    assert_eq!(book.bid_ask(), (55, 65));
    assert_eq!(book.bid_vol(), 20);
    assert_eq!(book.ask_vol(), 10);

    let trades = book.get_trades();
    assert_eq!(trades.len(), 2);
    assert_eq!(
        (trades[0].time, trades[0].side, trades[0].price, trades[0].vol),
        (10, Side::Ask, 60, 20)
    );
    assert_eq!((trades[0].active_id, trades[0].passive_id), (market, ask_60));
    assert_eq!(
        (trades[1].time, trades[1].side, trades[1].price, trades[1].vol),
        (10, Side::Ask, 65, 10)
    );
    assert_eq!((trades[1].active_id, trades[1].passive_id), (market, ask_65));
}

#[test]
fn test_cancellation_restores_book() {
    let (mut book, [bid_50, ask_60, bid_55, ask_65]) = four_order_book();

    book.cancel_order(bid_55).unwrap();
    book.cancel_order(ask_65).unwrap();

    assert_eq!(book.order_status(bid_55), Some(OrderStatus::Cancelled));
    assert_eq!(book.order_status(ask_65), Some(OrderStatus::Cancelled));
    assert_eq!(book.bid_ask(), (50, 60));
    assert_eq!(book.bid_vol(), 10);
    assert_eq!(book.ask_vol(), 20);

    book.cancel_order(bid_50).unwrap();
    book.cancel_order(ask_60).unwrap();

    assert_eq!(book.bid_ask(), (0, MAX_PRICE));
    assert_eq!(book.bid_vol(), 0);
    assert_eq!(book.ask_vol(), 0);
    for id in [bid_50, ask_60, bid_55, ask_65] {
        assert_eq!(book.order_status(id).unwrap().code(), 3);
    }
}

#[test]
fn test_volume_only_modify() {
    let mut book = OrderBook::new(0);
    book.place_order(Side::Bid, 10, 11, Some(50));
    let bid_55 = book.place_order(Side::Bid, 10, 11, Some(55));
    let ask_65 = book.place_order(Side::Ask, 20, 12, Some(65));
    book.place_order(Side::Ask, 20, 12, Some(60));

    book.modify_order(bid_55, None, Some(5)).unwrap();
    book.modify_order(ask_65, None, Some(10)).unwrap();

    assert_eq!(book.bid_ask(), (55, 60));
    assert_eq!(book.bid_vol(), 15);
    assert_eq!(book.ask_vol(), 30);
    assert_eq!(book.best_bid_vol(), 5);
    assert_eq!(book.best_ask_vol(), 20);
}

#[test]
fn test_price_modify() {
    let mut book = OrderBook::new(0);
    let bid = book.place_order(Side::Bid, 10, 11, Some(50));
    book.place_order(Side::Ask, 30, 11, Some(60));

    book.modify_order(bid, Some(45), Some(20)).unwrap();

    assert_eq!(book.bid_ask(), (45, 60));
    assert_eq!(book.bid_vol(), 20);
    assert_eq!(book.ask_vol(), 30);
    assert_eq!(book.order_status(bid), Some(OrderStatus::Active));
}

#[test]
fn test_ids_are_dense() {
    let mut book = OrderBook::new(0);
    let first = book.place_order(Side::Bid, 10, 1, Some(10));
    for k in 1..20u64 {
        // Spread orders out so nothing matches.
        let id = book.place_order(Side::Bid, 10, 1, Some(10 + k as u32));
        assert_eq!(id, first + k);
    }
    assert_eq!(book.get_orders().len(), 20);
}

#[test]
fn test_market_buy_sweeps_entire_side() {
    let (mut book, _) = four_order_book();

    let market = book.place_order(Side::Bid, 100, 13, None);

    let order = book.order(market).unwrap();
    assert_eq!(order.status, OrderStatus::Cancelled);
    assert_eq!(order.vol, 60);
    assert_eq!(book.ask_vol(), 0);
    assert_eq!(book.bid_ask().1, MAX_PRICE);
    // Bid side is untouched by a buy-side sweep.
    assert_eq!(book.bid_vol(), 20);
}

#[test]
fn test_order_history_serializes() {
    let (book, _) = four_order_book();

    let json = serde_json::to_string(book.get_orders()).unwrap();
    let orders: Vec<Order> = serde_json::from_str(&json).unwrap();
    assert_eq!(orders.as_slice(), book.get_orders());

    let json = serde_json::to_string(book.get_trades()).unwrap();
    let trades: Vec<TradeRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(trades.as_slice(), book.get_trades());
}
