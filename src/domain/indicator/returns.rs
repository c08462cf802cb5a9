//! Return series, in percent.
//!
//! DR[i] = (C[i] / C[i-1] - 1) * 100
//! DLR[i] = ln(C[i] / C[i-1]) * 100
//! CR[i] = (C[i] / C[0] - 1) * 100
//!
//! DR and DLR are undefined on the first bar.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::indicator_helpers::safe_div;
use crate::domain::ohlcv::OhlcvBar;

fn ratio_to_previous(bars: &[OhlcvBar]) -> Vec<f64> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            if i == 0 {
                f64::NAN
            } else {
                safe_div(bar.close, bars[i - 1].close)
            }
        })
        .collect()
}

pub fn calculate_daily_return(bars: &[OhlcvBar]) -> IndicatorSeries {
    let values = ratio_to_previous(bars)
        .into_iter()
        .map(|r| (r - 1.0) * 100.0)
        .collect();
    IndicatorSeries::simple(IndicatorType::DailyReturn, values)
}

pub fn calculate_daily_log_return(bars: &[OhlcvBar]) -> IndicatorSeries {
    let values = ratio_to_previous(bars)
        .into_iter()
        .map(|r| r.ln() * 100.0)
        .collect();
    IndicatorSeries::simple(IndicatorType::DailyLogReturn, values)
}

pub fn calculate_cumulative_return(bars: &[OhlcvBar]) -> IndicatorSeries {
    let values = match bars.first() {
        Some(first) => bars
            .iter()
            .map(|b| (safe_div(b.close, first.close) - 1.0) * 100.0)
            .collect(),
        None => Vec::new(),
    };
    IndicatorSeries::simple(IndicatorType::CumulativeReturn, values)
}
