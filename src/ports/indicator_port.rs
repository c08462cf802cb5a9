//! Indicator library port.

use crate::domain::ohlcv::OhlcvBar;

/// A catalog of indicators computed over a full bar series.
///
/// Every returned column has one value per bar; undefined values are NaN.
/// Column names must be unique and must not collide with the OHLCV names.
pub trait IndicatorLibrary {
    fn compute_all(&self, bars: &[OhlcvBar]) -> Vec<(String, Vec<f64>)>;
}
