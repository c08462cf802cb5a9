//! Fibonacci-weighted moving average.
//!
//! FWMA(n) weights the window with the first n Fibonacci numbers
//! (1, 1, 2, 3, 5, ...), normalised to sum to one, the largest weight on the
//! most recent bar.
//!
//! Warmup: first (n-1) bars are invalid.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::indicator_helpers::rolling_by;
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_FWMA_PERIOD: usize = 10;

/// Normalised Fibonacci weights, oldest first.
pub fn fibonacci_weights(n: usize) -> Vec<f64> {
    let mut fibs = Vec::with_capacity(n);
    let (mut a, mut b) = (1.0_f64, 1.0_f64);
    for _ in 0..n {
        fibs.push(a);
        (a, b) = (b, a + b);
    }
    let total: f64 = fibs.iter().sum();
    fibs.iter().map(|f| f / total).collect()
}

pub fn calculate_fwma(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let weights = fibonacci_weights(period);
    let values = rolling_by(&closes, period, |window| {
        window.iter().zip(&weights).map(|(c, w)| c * w).sum()
    });
    IndicatorSeries::simple(IndicatorType::Fwma(period), values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::make_bars;
    use crate::domain::indicator::IndicatorValue;

    #[test]
    fn fibonacci_weights_sum_to_one() {
        let w = fibonacci_weights(10);
        assert_eq!(w.len(), 10);
        assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        // 1,1,2,3,5,8,13,21,34,55 → sum 143
        assert!((w[0] - 1.0 / 143.0).abs() < 1e-12);
        assert!((w[9] - 55.0 / 143.0).abs() < 1e-12);
    }

    #[test]
    fn fwma_weights_latest_most() {
        let bars = make_bars(&[1.0, 2.0, 3.0, 4.0]);
        let series = calculate_fwma(&bars, 4);
        // weights 1,1,2,3 / 7
        let expected = (1.0 + 2.0 + 2.0 * 3.0 + 3.0 * 4.0) / 7.0;
        assert!(!series.values[2].valid);
        if let IndicatorValue::Simple(v) = series.values[3].value {
            assert!((v - expected).abs() < 1e-12);
        } else {
            panic!("Expected Simple value");
        }
    }

    #[test]
    fn fwma_constant_prices() {
        let bars = make_bars(&[7.0; 12]);
        let series = calculate_fwma(&bars, DEFAULT_FWMA_PERIOD);
        assert_eq!(series.indicator_type, IndicatorType::Fwma(10));
        for p in &series.values[9..] {
            if let IndicatorValue::Simple(v) = p.value {
                assert!((v - 7.0).abs() < 1e-12);
            }
        }
    }
}
