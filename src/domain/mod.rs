//! Core domain types and logic.

pub mod price;
pub mod moving_average;
pub mod signal;
pub mod backtest;
pub mod metrics;
pub mod simulation;
pub mod config_validation;
pub mod error;
