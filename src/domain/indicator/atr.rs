//! ATR (Average True Range) indicator.
//!
//! TR[0] = high - low, TR[i] = max(H-L, |H-C[i-1]|, |L-C[i-1]|).
//! Seeded with the mean of the first n true ranges, then Wilder smoothing:
//! ATR[i] = (ATR[i-1] * (n-1) + TR[i]) / n
//! Warmup: first (n-1) bars are invalid.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_PERIOD: usize = 14;

pub fn true_ranges(bars: &[OhlcvBar]) -> Vec<f64> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            if i == 0 {
                bar.high - bar.low
            } else {
                bar.true_range(bars[i - 1].close)
            }
        })
        .collect()
}

pub fn calculate_atr(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let mut values = vec![f64::NAN; bars.len()];
    if period == 0 || bars.len() < period {
        return IndicatorSeries::simple(IndicatorType::Atr(period), values);
    }

    let tr_values = true_ranges(bars);
    let n = period as f64;
    let mut atr = tr_values[..period].iter().sum::<f64>() / n;
    values[period - 1] = atr;
    for i in period..bars.len() {
        atr = (atr * (n - 1.0) + tr_values[i]) / n;
        values[i] = atr;
    }

    IndicatorSeries::simple(IndicatorType::Atr(period), values)
}
