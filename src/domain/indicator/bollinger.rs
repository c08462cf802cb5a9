//! Bollinger Bands indicator.
//!
//! Bollinger Bands consist of:
//! - Middle: Simple Moving Average (SMA) over n periods
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! Where StdDev is population standard deviation (divides by N, not N-1).
//!
//! Default parameters: period=20, multiplier=2.0
//! Warmup: first (period-1) bars are invalid.

use crate::domain::indicator::stddev::population_stddev;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_MULT_X100: u32 = 200;

pub fn calculate_bollinger(
    bars: &[OhlcvBar],
    period: usize,
    stddev_mult_x100: u32,
) -> IndicatorSeries {
    let mult = stddev_mult_x100 as f64 / 100.0;
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let values = (0..closes.len())
        .map(|i| {
            if period == 0 || i + 1 < period {
                return IndicatorPoint {
                    valid: false,
                    value: IndicatorValue::Bollinger {
                        upper: f64::NAN,
                        middle: f64::NAN,
                        lower: f64::NAN,
                    },
                };
            }
            let window = &closes[i + 1 - period..=i];
            let middle = window.iter().sum::<f64>() / period as f64;
            let stddev = population_stddev(window);
            IndicatorPoint {
                valid: true,
                value: IndicatorValue::Bollinger {
                    upper: middle + mult * stddev,
                    middle,
                    lower: middle - mult * stddev,
                },
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Bollinger {
            period,
            stddev_mult_x100,
        },
        values,
    }
}

/// Band columns `(upper, middle, lower)`.
pub fn band_columns(series: &IndicatorSeries) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let band = |pick: fn(f64, f64, f64) -> f64| {
        series.column_by(|v| match *v {
            IndicatorValue::Bollinger {
                upper,
                middle,
                lower,
            } => pick(upper, middle, lower),
            _ => f64::NAN,
        })
    };
    (band(|u, _, _| u), band(|_, m, _| m), band(|_, _, l| l))
}
