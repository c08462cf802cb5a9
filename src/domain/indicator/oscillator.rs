//! Price oscillators.
//!
//! - AO(fast, slow) = SMA(fast) - SMA(slow) of median price
//! - APO(fast, slow) = EMA(fast) - EMA(slow) of close
//! - BOP = (C - O) / (H - L), undefined when H == L
//! - CG(n) = -sum((n - j) * P[j]) / sum(P[j]) over the window, oldest first

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::indicator_helpers::{difference, ema_values, rolling_by, rolling_mean, safe_div};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_AO_FAST: usize = 5;
pub const DEFAULT_AO_SLOW: usize = 34;
pub const DEFAULT_APO_FAST: usize = 12;
pub const DEFAULT_APO_SLOW: usize = 26;
pub const DEFAULT_CG_PERIOD: usize = 10;

pub fn calculate_ao(bars: &[OhlcvBar], fast: usize, slow: usize) -> IndicatorSeries {
    let median: Vec<f64> = bars.iter().map(OhlcvBar::median_price).collect();
    IndicatorSeries::simple(
        IndicatorType::Ao { fast, slow },
        difference(&rolling_mean(&median, fast), &rolling_mean(&median, slow)),
    )
}

pub fn calculate_apo(bars: &[OhlcvBar], fast: usize, slow: usize) -> IndicatorSeries {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    IndicatorSeries::simple(
        IndicatorType::Apo { fast, slow },
        difference(&ema_values(&closes, fast), &ema_values(&closes, slow)),
    )
}

pub fn calculate_bop(bars: &[OhlcvBar]) -> IndicatorSeries {
    let values = bars
        .iter()
        .map(|b| safe_div(b.close - b.open, b.high - b.low))
        .collect();
    IndicatorSeries::simple(IndicatorType::Bop, values)
}

pub fn calculate_cg(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let values = rolling_by(&closes, period, |window| {
        let n = window.len();
        let numerator: f64 = window
            .iter()
            .enumerate()
            .map(|(j, p)| (n - j) as f64 * p)
            .sum();
        -safe_div(numerator, window.iter().sum())
    });
    IndicatorSeries::simple(IndicatorType::Cg(period), values)
}
