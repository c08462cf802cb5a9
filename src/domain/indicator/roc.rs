//! ROC (Rate of Change) indicator.
//!
//! ROC(n)[i] = ((C[i] - C[i-n]) / C[i-n]) * 100
//! Undefined (NaN) when C[i-n] == 0.
//! Warmup: first n bars invalid.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::indicator_helpers::safe_div;
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_roc(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let values = (0..bars.len())
        .map(|i| {
            if i < period {
                return f64::NAN;
            }
            let prev_close = bars[i - period].close;
            safe_div(bars[i].close - prev_close, prev_close) * 100.0
        })
        .collect();

    IndicatorSeries::simple(IndicatorType::Roc(period), values)
}
