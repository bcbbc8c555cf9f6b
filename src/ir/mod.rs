//! Compiled backtest configuration: the flat record handed to the engine.

pub mod types;

pub use types::*;
