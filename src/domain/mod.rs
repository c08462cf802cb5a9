//! Core domain types and logic.

pub mod augment;
pub mod backtest;
pub mod config_validation;
pub mod error;
pub mod handicap;
pub mod indicator;
pub mod indicator_helpers;
pub mod metrics;
pub mod ohlcv;
pub mod resample;
pub mod segment;
pub mod table;
pub mod timeframe;
pub mod trade;
