//! Whitebox tests for the order book internals
