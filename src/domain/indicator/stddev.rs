//! Population standard deviation, the band width of Bollinger bands.
//!
//! STDDEV(w) = sqrt(sum((x - mean(w))^2 for x in w) / len(w))

/// Population standard deviation of `window`.
pub fn population_stddev(window: &[f64]) -> f64 {
    let n = window.len() as f64;
    let mean = window.iter().sum::<f64>() / n;
    let variance = window
        .iter()
        .map(|x| {
            let diff = x - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;
    variance.sqrt()
}
