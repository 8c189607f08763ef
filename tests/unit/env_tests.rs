//! End-to-end step environment scenarios

use stepbook::prelude::*;

#[test]
fn test_step_env_sequence() {
    let mut env = StepEnv::new(101, 0, 1, 100_000);

    env.place_order(Side::Bid, 100, 101, Some(50));
    env.place_order(Side::Ask, 100, 101, Some(60));
    env.step();
    assert_eq!(env.bid_ask(), (50, 60));
    assert_eq!(env.bid_vol(), 100);
    assert_eq!(env.ask_vol(), 100);
    assert_eq!(env.time(), 100_000);

    env.place_order(Side::Bid, 100, 101, Some(55));
    env.place_order(Side::Ask, 100, 101, Some(65));
    env.step();
    assert_eq!(env.bid_ask(), (55, 60));
    assert_eq!(env.bid_vol(), 200);
    assert_eq!(env.ask_vol(), 200);
    assert_eq!(env.time(), 200_000);

    env.place_order(Side::Bid, 150, 101, None);
    env.step();
    assert_eq!(env.bid_ask(), (55, 65));
    assert_eq!(env.bid_vol(), 200);
    assert_eq!(env.ask_vol(), 50);
    assert_eq!(env.time(), 300_000);

    env.step();

    let (bids, asks) = env.get_prices();
    assert_eq!(bids, vec![50, 55, 55, 55]);
    assert_eq!(asks, vec![60, 60, 65, 65]);

    let data = env.get_market_data();
    assert_eq!(data["bid_vol"], vec![100, 200, 200, 200]);
    assert_eq!(data["ask_vol"], vec![100, 200, 50, 50]);
    assert_eq!(data["bid_touch_vol"], vec![100, 100, 100, 100]);
    assert_eq!(data["ask_touch_vol"], vec![100, 100, 50, 50]);
    assert_eq!(data["bid_touch_order_count"], vec![1, 1, 1, 1]);
    assert_eq!(data["ask_touch_order_count"], vec![1, 1, 1, 1]);
    assert_eq!(data["trade_vol"], vec![0, 0, 150, 0]);
}

#[test]
fn test_deterministic_trend_agents() {
    // Two alternating agents place a rising bid and a falling ask each
    // step; after 10 steps the series are fully determined.
    struct Trend {
        bid: bool,
        start: Price,
        k: Price,
    }

    impl Agent for Trend {
        fn update(&mut self, _rng: &mut dyn rand::RngCore, env: &mut StepEnv) {
            let price = if self.bid {
                self.start + self.k
            } else {
                self.start - self.k
            };
            env.place_order(Side::from(self.bid), 10, 101, Some(price));
            self.k += 1;
        }
    }

    let mut env = StepEnv::new(101, 0, 1, 100_000);
    let mut agents: Vec<Box<dyn Agent>> = vec![
        Box::new(Trend {
            bid: true,
            start: 10,
            k: 0,
        }),
        Box::new(Trend {
            bid: false,
            start: 50,
            k: 0,
        }),
    ];

    let data = run(&mut env, &mut agents, 10, 101);

    for k in 0..10u32 {
        assert_eq!(data["bid_price"][k as usize], 10 + k);
        assert_eq!(data["ask_price"][k as usize], 50 - k);
        assert_eq!(data["bid_vol"][k as usize], 10 * (k + 1));
        assert_eq!(data["trade_vol"][k as usize], 0);
    }
}

#[test]
fn test_staged_modify_applies_on_step() {
    let mut env = StepEnv::new(7, 0, 1, 1_000);
    let bid = env.place_order(Side::Bid, 10, 1, Some(50));
    env.step();

    env.modify_order(bid, Some(45), Some(20));
    env.step();

    assert_eq!(env.bid_ask().0, 45);
    assert_eq!(env.bid_vol(), 20);
    assert_eq!(env.order_status(bid), Some(OrderStatus::Active));
}

#[test]
fn test_rejected_staged_order() {
    let mut env = StepEnv::new(7, 0, 2, 1_000);
    let bad = env.place_order(Side::Bid, 10, 1, Some(21));
    env.step();

    assert_eq!(env.order_status(bad), Some(OrderStatus::Rejected));
    assert_eq!(env.bid_vol(), 0);
}

#[test]
fn test_trades_visible_through_env() {
    let mut env = StepEnv::new(7, 0, 1, 1_000);
    env.place_order(Side::Bid, 10, 1, Some(50));
    env.step();
    env.place_order(Side::Ask, 10, 2, Some(50));
    env.step();

    let trades = env.get_trades();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].price, 50);
    assert_eq!(trades[0].side, Side::Bid);
    // Applied during the second step, before the clock advanced.
    assert_eq!(trades[0].time, 1_000);

    assert_eq!(env.get_orders().len(), 2);
}
