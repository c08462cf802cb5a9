//! Shared helper functions for indicator calculations.
//!
//! All helpers work on raw `f64` slices and return one value per input, with
//! NaN for positions that have no value yet.

/// Sum over a trailing window of `period` values.
///
/// Each window is summed on its own so a NaN only poisons the windows that
/// contain it.
pub fn rolling_sum(values: &[f64], period: usize) -> Vec<f64> {
    rolling_by(values, period, |w| w.iter().sum())
}

/// Arithmetic mean over a trailing window of `period` values.
pub fn rolling_mean(values: &[f64], period: usize) -> Vec<f64> {
    rolling_sum(values, period)
        .into_iter()
        .map(|s| s / period as f64)
        .collect()
}

/// Highest value over a trailing window.
pub fn rolling_max(values: &[f64], period: usize) -> Vec<f64> {
    rolling_by(values, period, |w| w.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

/// Lowest value over a trailing window.
pub fn rolling_min(values: &[f64], period: usize) -> Vec<f64> {
    rolling_by(values, period, |w| w.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Apply `f` to every full trailing window.
pub fn rolling_by(values: &[f64], period: usize, f: impl Fn(&[f64]) -> f64) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if period == 0 {
        return out;
    }
    for i in (period - 1)..values.len() {
        out[i] = f(&values[i + 1 - period..=i]);
    }
    out
}

/// EMA with k = 2/(n+1), seeded with the SMA of the first `period` values.
///
/// Leading NaNs are skipped, so the helper can smooth the output of another
/// indicator that has its own warm-up.
pub fn ema_values(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if period == 0 {
        return out;
    }
    let Some(first) = values.iter().position(|v| !v.is_nan()) else {
        return out;
    };
    let seed_end = first + period;
    if seed_end > values.len() {
        return out;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut ema = values[first..seed_end].iter().sum::<f64>() / period as f64;
    out[seed_end - 1] = ema;
    for i in seed_end..values.len() {
        ema = values[i] * k + ema * (1.0 - k);
        out[i] = ema;
    }
    out
}

/// Element-wise `a - b`.
pub fn difference(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x - y).collect()
}

/// `numerator / denominator`, NaN where the denominator is zero.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        f64::NAN
    } else {
        numerator / denominator
    }
}
