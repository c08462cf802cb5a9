//! OBV (On-Balance Volume) indicator.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

/// Calculate OBV (On-Balance Volume) indicator.
///
/// OBV[0] = volume[0]
/// If close[i] > close[i-1]: OBV[i] = OBV[i-1] + volume[i]
/// If close[i] < close[i-1]: OBV[i] = OBV[i-1] - volume[i]
/// If close[i] == close[i-1]: OBV[i] = OBV[i-1]
///
/// No warmup period; all bars are valid.
pub fn calculate_obv(bars: &[OhlcvBar]) -> IndicatorSeries {
    let mut values = Vec::with_capacity(bars.len());
    let mut obv: f64 = 0.0;
    let mut prev_close: f64 = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        if i == 0 {
            obv = bar.volume;
        } else if bar.close > prev_close {
            obv += bar.volume;
        } else if bar.close < prev_close {
            obv -= bar.volume;
        }
        prev_close = bar.close;
        values.push(obv);
    }

    IndicatorSeries::simple(IndicatorType::Obv, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bar(close: f64, volume: f64) -> OhlcvBar {
        OhlcvBar {
            open: close,
            high: close,
            low: close,
            close,
            volume,
        }
    }

    #[test]
    fn obv_empty() {
        assert!(calculate_obv(&[]).values.is_empty());
    }

    #[test]
    fn obv_first_bar_is_volume() {
        let series = calculate_obv(&[make_bar(10.0, 500.0)]);
        assert!(series.values[0].valid);
        assert_eq!(series.column(), vec![500.0]);
    }

    #[test]
    fn obv_up_down_flat() {
        let bars = vec![
            make_bar(10.0, 100.0),
            make_bar(11.0, 200.0),
            make_bar(10.5, 50.0),
            make_bar(10.5, 999.0),
        ];
        let series = calculate_obv(&bars);
        assert_eq!(series.column(), vec![100.0, 300.0, 250.0, 250.0]);
        assert_eq!(series.indicator_type, IndicatorType::Obv);
    }
}
