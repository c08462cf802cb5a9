//! Configuration validation.
//!
//! Validates every key an operation reads before it runs. Absent keys are
//! fine (defaults apply); present keys must parse and be in range.

use std::str::FromStr;

use crate::domain::error::TradekitError;
use crate::domain::handicap::BetMode;
use crate::domain::timeframe::Timeframe;
use crate::ports::config_port::ConfigPort;

pub fn validate_trade_config(config: &dyn ConfigPort) -> Result<(), TradekitError> {
    validate_digit(config)?;
    validate_pip_profit(config)?;
    validate_non_negative(config, "trade", "commission")?;
    Ok(())
}

pub fn validate_stock_config(config: &dyn ConfigPort) -> Result<(), TradekitError> {
    validate_shares(config)?;
    validate_non_negative(config, "stock", "commission")?;
    validate_non_negative(config, "stock", "vat")?;
    Ok(())
}

pub fn validate_resample_config(config: &dyn ConfigPort) -> Result<(), TradekitError> {
    if let Some(value) = config.get_string("resample", "timeframe") {
        value
            .parse::<Timeframe>()
            .map_err(|e| invalid("resample", "timeframe", e.to_string()))?;
    }
    Ok(())
}

pub fn validate_handicap_config(config: &dyn ConfigPort) -> Result<(), TradekitError> {
    if let Some(value) = config.get_string("handicap", "mode") {
        value
            .parse::<BetMode>()
            .map_err(|e| invalid("handicap", "mode", e.to_string()))?;
    }
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> TradekitError {
    TradekitError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

/// Parse a present key, failing on text that is not a `T`.
fn parse_key<T: FromStr>(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    expected: &str,
) -> Result<Option<T>, TradekitError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(s) => s
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| invalid(section, key, format!("{key} must be {expected}, got '{s}'"))),
    }
}

fn validate_digit(config: &dyn ConfigPort) -> Result<(), TradekitError> {
    match parse_key::<i64>(config, "trade", "digit", "an integer")? {
        Some(d) if d < 0 => Err(invalid("trade", "digit", "digit must be non-negative")),
        Some(d) if d > i32::MAX as i64 => Err(invalid("trade", "digit", "digit is too large")),
        _ => Ok(()),
    }
}

fn validate_pip_profit(config: &dyn ConfigPort) -> Result<(), TradekitError> {
    match parse_key::<f64>(config, "trade", "pip_profit", "a number")? {
        Some(v) if !v.is_finite() => Err(invalid("trade", "pip_profit", "pip_profit must be finite")),
        _ => Ok(()),
    }
}

fn validate_shares(config: &dyn ConfigPort) -> Result<(), TradekitError> {
    match parse_key::<f64>(config, "stock", "shares", "a number")? {
        Some(v) if !v.is_finite() || v <= 0.0 => {
            Err(invalid("stock", "shares", "shares must be positive"))
        }
        _ => Ok(()),
    }
}

fn validate_non_negative(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), TradekitError> {
    match parse_key::<f64>(config, section, key, "a number")? {
        Some(v) if !v.is_finite() || v < 0.0 => {
            Err(invalid(section, key, format!("{key} must be non-negative")))
        }
        _ => Ok(()),
    }
}
