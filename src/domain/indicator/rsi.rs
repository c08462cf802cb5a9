//! RSI (Relative Strength Index) indicator.
//!
//! Uses Wilder's smoothing for average gain/loss calculation:
//! - First average: simple mean of gains/losses over first n changes
//! - Subsequent: avg = (prev_avg * (n-1) + current) / n
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0: RSI = 100
//!
//! Warmup: first n bars are invalid (need n price changes to compute initial average).

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

fn rsi_from(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }
}

pub fn calculate_rsi(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let mut values = vec![f64::NAN; bars.len()];
    if period == 0 || bars.len() <= period {
        return IndicatorSeries::simple(IndicatorType::Rsi(period), values);
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = bars
        .windows(2)
        .map(|w| {
            let change = w[1].close - w[0].close;
            (change.max(0.0), (-change).max(0.0))
        })
        .unzip();

    let mut avg_gain = gains[..period].iter().sum::<f64>() / period as f64;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / period as f64;
    values[period] = rsi_from(avg_gain, avg_loss);

    let n = period as f64;
    for i in (period + 1)..bars.len() {
        avg_gain = (avg_gain * (n - 1.0) + gains[i - 1]) / n;
        avg_loss = (avg_loss * (n - 1.0) + losses[i - 1]) / n;
        values[i] = rsi_from(avg_gain, avg_loss);
    }

    IndicatorSeries::simple(IndicatorType::Rsi(period), values)
}
