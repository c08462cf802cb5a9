//! Exponential Moving Average indicator.
//!
//! k = 2/(n+1), seed with first SMA, then EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//! Warmup: first (n-1) bars are invalid.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::indicator_helpers::ema_values;
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_ema(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    IndicatorSeries::simple(IndicatorType::Ema(period), ema_values(&closes, period))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::make_bars;
    use crate::domain::indicator::IndicatorValue;

    #[test]
    fn ema_warmup() {
        let bars = make_bars(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let series = calculate_ema(&bars, 3);

        assert!(!series.values[0].valid);
        assert!(!series.values[1].valid);
        assert!(series.values[2].valid);
        assert!(series.values[3].valid);
        assert!(series.values[4].valid);
    }

    #[test]
    fn ema_period_1() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let series = calculate_ema(&bars, 1);

        assert!(series.values.iter().all(|p| p.valid));

        if let IndicatorValue::Simple(v) = series.values[0].value {
            assert!((v - 10.0).abs() < f64::EPSILON);
        }
        if let IndicatorValue::Simple(v) = series.values[1].value {
            assert!((v - 20.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn ema_recursive_calculation() {
        let bars = make_bars(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let series = calculate_ema(&bars, 3);

        let k = 2.0 / 4.0;
        let sma = (10.0 + 20.0 + 30.0) / 3.0;

        if let IndicatorValue::Simple(v) = series.values[2].value {
            assert!((v - sma).abs() < f64::EPSILON);
        }

        let ema_3 = 40.0 * k + sma * (1.0 - k);
        if let IndicatorValue::Simple(v) = series.values[3].value {
            assert!((v - ema_3).abs() < f64::EPSILON);
        }

        let ema_4 = 50.0 * k + ema_3 * (1.0 - k);
        if let IndicatorValue::Simple(v) = series.values[4].value {
            assert!((v - ema_4).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn ema_equal_prices() {
        let bars = make_bars(&[100.0, 100.0, 100.0, 100.0, 100.0]);
        let series = calculate_ema(&bars, 3);

        for i in 2..5 {
            if let IndicatorValue::Simple(v) = series.values[i].value {
                assert!((v - 100.0).abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn ema_indicator_type() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let series = calculate_ema(&bars, 5);

        assert_eq!(series.indicator_type, IndicatorType::Ema(5));
        assert!(series.values.iter().all(|p| !p.valid));
    }

    #[test]
    fn ema_empty_bars() {
        let series = calculate_ema(&[], 3);
        assert!(series.values.is_empty());
    }
}
