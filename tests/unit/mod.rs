//! Integration test harness

mod batch_tests;
mod book_tests;
mod determinism_tests;
mod env_tests;
