//! Volume-weighted indicators.
//!
//! - ADI: cumulative sum of CLV * volume, CLV = ((C-L) - (H-C)) / (H-L),
//!   taken as 0 when H == L
//! - CMF(n): sum(CLV * volume, n) / sum(volume, n)
//! - FI(n): EMA(n) of (C[i] - C[i-1]) * volume[i]
//! - MFI(n): 100 - 100 / (1 + positive flow / negative flow) over n changes
//!   of typical price
//! - VPT: cumulative sum of volume * percentage change of close
//! - VWAP(n): sum(typical price * volume, n) / sum(volume, n)

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::indicator_helpers::{ema_values, rolling_sum, safe_div};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_CMF_PERIOD: usize = 20;
pub const DEFAULT_FI_PERIOD: usize = 13;
pub const DEFAULT_MFI_PERIOD: usize = 14;
pub const DEFAULT_VWAP_PERIOD: usize = 14;

/// Close location value times volume.
fn money_flow_volume(bar: &OhlcvBar) -> f64 {
    let range = bar.high - bar.low;
    if range == 0.0 {
        return 0.0;
    }
    ((bar.close - bar.low) - (bar.high - bar.close)) / range * bar.volume
}

fn cumulative(values: impl Iterator<Item = f64>) -> Vec<f64> {
    values
        .scan(0.0, |acc, v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}

pub fn calculate_adi(bars: &[OhlcvBar]) -> IndicatorSeries {
    IndicatorSeries::simple(
        IndicatorType::Adi,
        cumulative(bars.iter().map(money_flow_volume)),
    )
}

pub fn calculate_cmf(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let mfv: Vec<f64> = bars.iter().map(money_flow_volume).collect();
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();
    let values = rolling_sum(&mfv, period)
        .into_iter()
        .zip(rolling_sum(&volumes, period))
        .map(|(flow, vol)| safe_div(flow, vol))
        .collect();
    IndicatorSeries::simple(IndicatorType::Cmf(period), values)
}

pub fn calculate_force_index(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let raw: Vec<f64> = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            if i == 0 {
                f64::NAN
            } else {
                (bar.close - bars[i - 1].close) * bar.volume
            }
        })
        .collect();
    IndicatorSeries::simple(IndicatorType::ForceIndex(period), ema_values(&raw, period))
}

pub fn calculate_mfi(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let mut values = vec![f64::NAN; bars.len()];
    if period == 0 {
        return IndicatorSeries::simple(IndicatorType::Mfi(period), values);
    }

    let (positive, negative): (Vec<f64>, Vec<f64>) = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            if i == 0 {
                return (0.0, 0.0);
            }
            let tp = bar.typical_price();
            let prev_tp = bars[i - 1].typical_price();
            let flow = tp * bar.volume;
            if tp > prev_tp {
                (flow, 0.0)
            } else if tp < prev_tp {
                (0.0, flow)
            } else {
                (0.0, 0.0)
            }
        })
        .unzip();

    for i in period..bars.len() {
        let window = i + 1 - period..=i;
        let pos: f64 = positive[window.clone()].iter().sum();
        let neg: f64 = negative[window].iter().sum();
        values[i] = if neg == 0.0 {
            if pos == 0.0 { f64::NAN } else { 100.0 }
        } else {
            100.0 - 100.0 / (1.0 + pos / neg)
        };
    }

    IndicatorSeries::simple(IndicatorType::Mfi(period), values)
}

pub fn calculate_vpt(bars: &[OhlcvBar]) -> IndicatorSeries {
    let changes = bars.iter().enumerate().map(|(i, bar)| {
        if i == 0 {
            return 0.0;
        }
        let prev = bars[i - 1].close;
        let pct = safe_div(bar.close - prev, prev);
        if pct.is_nan() { 0.0 } else { bar.volume * pct }
    });
    IndicatorSeries::simple(IndicatorType::Vpt, cumulative(changes))
}

pub fn calculate_vwap(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let pv: Vec<f64> = bars.iter().map(|b| b.typical_price() * b.volume).collect();
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();
    let values = rolling_sum(&pv, period)
        .into_iter()
        .zip(rolling_sum(&volumes, period))
        .map(|(pv, vol)| safe_div(pv, vol))
        .collect();
    IndicatorSeries::simple(IndicatorType::Vwap(period), values)
}
