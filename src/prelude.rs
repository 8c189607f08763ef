//! Prelude module that re-exports commonly used types and traits.
//!
//! This module provides a convenient way to import the most commonly used
//! types from the stepbook crate. Instead of importing each type
//! individually, you can use:
//!
//! ```rust
//! use stepbook::prelude::*;
//! ```

// Core order book types
pub use crate::orderbook::{Order, OrderBook, OrderBookError, OrderStatus, Side, TradeRecord};

// Scalar aliases and boundary constants
pub use crate::orderbook::{MAX_PRICE, Nanos, OrderId, Price, TraderId, Vol};

// Depth snapshot types
pub use crate::orderbook::{Level2Data, LevelData, TOP_LEVELS};

// Step simulation environments and instructions
pub use crate::step_sim::{
    BatchStepEnv, Instruction, InstructionBlock, InstructionError, LEVEL_1_LEN, LEVEL_2_LEN,
    StepEnv,
};

// Agent capabilities and runners
pub use crate::step_sim::{Agent, BatchAgent, RandomAgent, RandomBatchAgents, run, run_batch};
