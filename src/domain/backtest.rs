//! Signal-driven trade simulation.
//!
//! Both simulators segment the `signal` column at each change of value and
//! turn every closed segment into one trade: entry at the close of the
//! segment's first bar, exit at the close of the first bar of the next
//! segment. The segment containing the last row never closes and is
//! discarded.

use tracing::debug;

use crate::domain::error::{SchemaError, TradekitError};
use crate::domain::segment::{closed_segments, Segment};
use crate::domain::table::Table;
use crate::domain::trade::{StockTrade, Trade};

/// Parameters for pip-based simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct PipConfig {
    /// Decimal places of the quote; price moves are scaled by `10^digit`.
    pub digit: i32,
    pub pip_profit: f64,
    /// Flat amount subtracted from every trade.
    pub commission: f64,
}

impl Default for PipConfig {
    fn default() -> Self {
        Self {
            digit: 1,
            pip_profit: 1.0,
            commission: 0.0,
        }
    }
}

/// Parameters for share-based simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct StockConfig {
    pub shares: f64,
    /// Brokerage rate in percent of traded value.
    pub commission: f64,
    /// Tax rate in percent, applied to the brokerage fee.
    pub vat: f64,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            shares: 1.0,
            commission: 0.5,
            vat: 7.0,
        }
    }
}

const STOCK_COLUMNS: [&str; 6] = ["time", "open", "high", "low", "close", "signal"];

/// Pip-based ledger. Flat segments produce no trade.
pub fn simulate_trades(table: &Table, config: &PipConfig) -> Result<Vec<Trade>, TradekitError> {
    table.require(&["signal", "time", "close"])?;
    let inputs = SegmentInputs::read(table, "simulate_trades")?;

    let scale = 10f64.powi(config.digit) * config.pip_profit;
    let mut equity = 0.0;
    let mut trades = Vec::new();

    for segment in &inputs.segments {
        if segment.signal == 0 {
            continue;
        }
        let (open_price, close_price) = inputs.prices(segment);
        let pnl = (close_price - open_price) * segment.signal as f64 * scale - config.commission;
        equity += pnl;

        let (open_time, close_time) = inputs.times(segment);
        trades.push(Trade {
            kind: segment.signal,
            open_time,
            close_time,
            open_price,
            close_price,
            length: segment.len,
            pnl,
            equity,
        });
    }

    debug!(
        rows = table.len(),
        segments = inputs.segments.len(),
        trades = trades.len(),
        equity,
        "simulated pip trades"
    );
    Ok(trades)
}

/// Share-based ledger. Only buy segments (`signal == 1`) are traded.
pub fn simulate_stock_trades(
    table: &Table,
    config: &StockConfig,
) -> Result<Vec<StockTrade>, TradekitError> {
    table.require(&STOCK_COLUMNS)?;
    let inputs = SegmentInputs::read(table, "simulate_stock_trades")?;

    let mut equity = 0.0;
    let mut trades = Vec::new();

    for segment in inputs.segments.iter().filter(|s| s.signal == 1) {
        let (open_price, close_price) = inputs.prices(segment);
        let profit = (close_price - open_price) * config.shares;
        let commission = stock_commission(open_price, config);
        let pnl = profit - commission;
        equity += pnl;

        let (open_time, close_time) = inputs.times(segment);
        trades.push(StockTrade {
            kind: segment.signal,
            open_time,
            close_time,
            open_price,
            close_price,
            length: segment.len,
            shares: config.shares,
            profit,
            commission,
            pnl,
            equity,
        });
    }

    debug!(
        rows = table.len(),
        segments = inputs.segments.len(),
        trades = trades.len(),
        equity,
        "simulated stock trades"
    );
    Ok(trades)
}

/// Brokerage fee on entry with tax on the fee, rounded to cents (ties to even).
pub fn stock_commission(open_price: f64, config: &StockConfig) -> f64 {
    let fee = open_price * config.shares * (config.commission / 100.0) * (config.vat / 100.0);
    round_cents(fee)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

struct SegmentInputs<'a> {
    times: &'a [chrono::NaiveDateTime],
    close: std::borrow::Cow<'a, [f64]>,
    segments: Vec<Segment>,
}

impl<'a> SegmentInputs<'a> {
    fn read(table: &'a Table, operation: &'static str) -> Result<Self, TradekitError> {
        if table.is_empty() {
            return Err(TradekitError::EmptyInput { operation });
        }
        let signals = table.ints("signal")?;
        let times = table.times("time")?;
        let close = table.floats("close")?;
        if close.len() != signals.len() {
            return Err(SchemaError::ColumnLength {
                column: "close".into(),
                expected: signals.len(),
                found: close.len(),
            }
            .into());
        }
        Ok(Self {
            times,
            close,
            segments: closed_segments(&signals),
        })
    }

    // A closed segment always has a following row at `end()`.
    fn prices(&self, segment: &Segment) -> (f64, f64) {
        (self.close[segment.start], self.close[segment.end()])
    }

    fn times(&self, segment: &Segment) -> (chrono::NaiveDateTime, chrono::NaiveDateTime) {
        (self.times[segment.start], self.times[segment.end()])
    }
}
