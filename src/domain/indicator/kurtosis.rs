//! Rolling kurtosis of closing prices.
//!
//! Sample excess kurtosis (bias-corrected), the same estimator pandas uses
//! for `rolling().kurt()`:
//!
//! G2 = n(n+1) / ((n-1)(n-2)(n-3)) * sum((x - mean)^4) / s^4
//!      - 3(n-1)^2 / ((n-2)(n-3))
//!
//! with `s^2` the sample variance. Undefined for n < 4 or zero variance.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::indicator_helpers::rolling_by;
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_PERIOD: usize = 30;

pub fn excess_kurtosis(window: &[f64]) -> f64 {
    let n = window.len() as f64;
    if window.len() < 4 {
        return f64::NAN;
    }
    let mean = window.iter().sum::<f64>() / n;
    let m2: f64 = window.iter().map(|x| (x - mean).powi(2)).sum();
    let m4: f64 = window.iter().map(|x| (x - mean).powi(4)).sum();
    let variance = m2 / (n - 1.0);
    if variance <= f64::EPSILON * mean.abs().max(1.0) {
        return f64::NAN;
    }

    let lead = n * (n + 1.0) / ((n - 1.0) * (n - 2.0) * (n - 3.0));
    let tail = 3.0 * (n - 1.0).powi(2) / ((n - 2.0) * (n - 3.0));
    lead * m4 / variance.powi(2) - tail
}

pub fn calculate_kurtosis(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    IndicatorSeries::simple(
        IndicatorType::Kurtosis(period),
        rolling_by(&closes, period, excess_kurtosis),
    )
}
