//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line
//!
//! Default parameters: fast=12, slow=26, signal=9
//! Warmup: max(fast, slow) - 1 + signal - 1 bars.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::indicator_helpers::{difference, ema_values};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

pub fn calculate_macd(
    bars: &[OhlcvBar],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> IndicatorSeries {
    let indicator_type = IndicatorType::Macd {
        fast,
        slow,
        signal: signal_period,
    };
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let macd_line = difference(&ema_values(&closes, fast), &ema_values(&closes, slow));
    let signal_line = ema_values(&macd_line, signal_period);

    let values = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(&line, &signal)| IndicatorPoint {
            valid: !line.is_nan() && !signal.is_nan(),
            value: IndicatorValue::Macd {
                line,
                signal,
                histogram: line - signal,
            },
        })
        .collect();

    IndicatorSeries {
        indicator_type,
        values,
    }
}

pub fn calculate_macd_default(bars: &[OhlcvBar]) -> IndicatorSeries {
    calculate_macd(bars, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}

/// Extract one component of every MACD point; invalid points are NaN.
pub fn macd_component(series: &IndicatorSeries, pick: fn(f64, f64, f64) -> f64) -> Vec<f64> {
    series.column_by(|v| match *v {
        IndicatorValue::Macd {
            line,
            signal,
            histogram,
        } => pick(line, signal, histogram),
        _ => f64::NAN,
    })
}
