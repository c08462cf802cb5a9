//! Stochastic oscillator and Williams %R.
//!
//! %K(n) = 100 * (C - LL(n)) / (HH(n) - LL(n))
//! %D(m) = SMA(m) of %K
//! %R(n) = -100 * (HH(n) - C) / (HH(n) - LL(n))
//!
//! Both are undefined when the window's high equals its low.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::indicator_helpers::{rolling_by, rolling_max, rolling_min, safe_div};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_K_PERIOD: usize = 14;
pub const DEFAULT_D_PERIOD: usize = 3;
pub const DEFAULT_WR_PERIOD: usize = 14;

fn channel(bars: &[OhlcvBar], period: usize) -> (Vec<f64>, Vec<f64>) {
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
    (rolling_max(&highs, period), rolling_min(&lows, period))
}

pub fn calculate_stochastic(bars: &[OhlcvBar], k_period: usize, d_period: usize) -> IndicatorSeries {
    let (hh, ll) = channel(bars, k_period);
    let k: Vec<f64> = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| 100.0 * safe_div(bar.close - ll[i], hh[i] - ll[i]))
        .collect();
    let d = rolling_by(&k, d_period, |w| w.iter().sum::<f64>() / w.len() as f64);

    let values = k
        .iter()
        .zip(&d)
        .map(|(&k, &d)| IndicatorPoint {
            valid: !k.is_nan() && !d.is_nan(),
            value: IndicatorValue::Stochastic { k, d },
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Stochastic { k_period, d_period },
        values,
    }
}

/// `%K` and `%D` columns. `%K` is reported wherever it is defined, even
/// before `%D` has warmed up.
pub fn stochastic_columns(series: &IndicatorSeries) -> (Vec<f64>, Vec<f64>) {
    series
        .values
        .iter()
        .map(|p| match p.value {
            IndicatorValue::Stochastic { k, d } => (k, d),
            _ => (f64::NAN, f64::NAN),
        })
        .unzip()
}

pub fn calculate_williams_r(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let (hh, ll) = channel(bars, period);
    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| -100.0 * safe_div(hh[i] - bar.close, hh[i] - ll[i]))
        .collect();
    IndicatorSeries::simple(IndicatorType::WilliamsR(period), values)
}
