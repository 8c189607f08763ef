//! # Deterministic Step-Based Order Book Simulation Engine
//!
//! A discrete-event limit order book simulation engine written in Rust, designed for market-microstructure experiments and agent-based research. The library maintains a single instrument's order book, matches aggressive orders against resting liquidity under price-time priority, and advances a simulated clock in fixed steps.
//!
//! ## Key Features
//!
//! - **Price-Time Priority Matching**: A classic matching engine over sorted price levels with FIFO queues, supporting limit orders, market orders, cancellations and modifications with partial fills.
//!
//! - **Deterministic Stepping**: Between steps, agents stage market instructions; each step shuffles the staged instructions under a seeded ChaCha generator and applies them atomically. Identical seeds and instruction sequences reproduce bit-identical histories.
//!
//! - **Level-1 / Level-2 Market Data**: Every step records touch prices, side volumes, touch order counts, traded volume, and (in the batch environment) depth across the top 10 price levels per side.
//!
//! - **Batch Array Interface**: A step environment variant that exchanges market state as flat `u32` vectors and accepts columnar instruction batches, the shape expected by array-programming agent frameworks.
//!
//! - **Agent Capabilities**: Minimal `Agent`/`BatchAgent` traits plus runner functions driving a list of agents for a fixed number of steps, and random reference agents for benchmarking.
//!
//! ## Design Goals
//!
//! 1. **Determinism**: The only source of randomness is the environment's seeded generator; the matching core is a pure function of its input sequence.
//! 2. **Correctness**: The book is never crossed at rest, price levels aggregate exactly, and order ids are dense and stable for the lifetime of the book.
//! 3. **Simplicity**: Single-threaded and synchronous by construction; `&mut self` enforces exclusive access, so the engine carries no locks.
//! 4. **Robust simulations**: Bad samples (zero volumes, misaligned prices, cancels of dead orders) reject the offending order or become no-ops rather than aborting a run; only malformed instruction batches fail loudly.
//!
//! ## Architecture
//!
//! Orders live in a dense append-only arena indexed by order id. Price
//! levels hold FIFO queues of ids, side books keep levels in sorted maps,
//! and the book composes the two sides with a trade log and the simulated
//! clock. The step environments own a book, an instruction buffer and the
//! seeded generator. No back-references exist: levels reference orders by
//! id only.
//!
//! ## Example
//!
//! ```rust
//! use stepbook::prelude::*;
//!
//! let mut book = OrderBook::new(0);
//! book.place_order(Side::Bid, 10, 11, Some(50));
//! book.place_order(Side::Ask, 20, 12, Some(60));
//! assert_eq!(book.bid_ask(), (50, 60));
//!
//! // A market buy consumes the resting ask liquidity.
//! book.set_time(10).unwrap();
//! book.place_order(Side::Bid, 20, 13, None);
//! assert_eq!(book.get_trades().len(), 1);
//! assert_eq!(book.get_trades()[0].price, 60);
//! ```
//!
//! Step environments stage instructions and apply them in a shuffled
//! order each step:
//!
//! ```rust
//! use stepbook::prelude::*;
//!
//! let mut env = StepEnv::new(101, 0, 1, 100_000);
//! env.place_order(Side::Bid, 100, 1, Some(50));
//! env.place_order(Side::Ask, 100, 2, Some(60));
//! env.step();
//!
//! assert_eq!(env.bid_ask(), (50, 60));
//! assert_eq!(env.time(), 100_000);
//! let data = env.get_market_data();
//! assert_eq!(data["bid_price"], vec![50]);
//! ```

pub mod orderbook;
pub mod step_sim;

pub mod prelude;

pub use orderbook::{
    Level2Data, LevelData, MAX_PRICE, Nanos, Order, OrderBook, OrderBookError, OrderId,
    OrderStatus, Price, Side, TOP_LEVELS, TradeRecord, TraderId, Vol,
};
pub use step_sim::{
    Agent, BatchAgent, BatchStepEnv, Instruction, InstructionBlock, InstructionError, LEVEL_1_LEN,
    LEVEL_2_LEN, RandomAgent, RandomBatchAgents, StepEnv, run, run_batch,
};
