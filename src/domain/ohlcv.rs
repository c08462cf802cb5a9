//! OHLCV bar representation.

use crate::domain::error::SchemaError;
use crate::domain::table::Table;

pub const OHLCV_COLUMNS: [&str; 5] = ["open", "high", "low", "close", "volume"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OhlcvBar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl OhlcvBar {
    /// (high + low) / 2
    pub fn median_price(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    /// (high + low + close) / 3
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }
}

/// Read the five OHLCV columns of `table` into bars.
pub fn bars_from_table(table: &Table) -> Result<Vec<OhlcvBar>, SchemaError> {
    table.require(&OHLCV_COLUMNS)?;
    let open = table.floats("open")?;
    let high = table.floats("high")?;
    let low = table.floats("low")?;
    let close = table.floats("close")?;
    let volume = table.floats("volume")?;

    Ok((0..table.len())
        .map(|i| OhlcvBar {
            open: open[i],
            high: high[i],
            low: low[i],
            close: close[i],
            volume: volume[i],
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::Column;

    fn sample_bar() -> OhlcvBar {
        OhlcvBar {
            open: 100.0,
            high: 110.0,
            low: 90.0,
            close: 105.0,
            volume: 50_000.0,
        }
    }

    #[test]
    fn median_price() {
        assert!((sample_bar().median_price() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn typical_price() {
        let bar = sample_bar();
        // (110 + 90 + 105) / 3 = 101.666...
        let expected = (110.0 + 90.0 + 105.0) / 3.0;
        assert!((bar.typical_price() - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn true_range_hl_dominates() {
        let bar = sample_bar();
        // high-low=20, |high-100|=10, |low-100|=10 → 20
        assert!((bar.true_range(100.0) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn true_range_gap_up() {
        let bar = sample_bar();
        // high-low=20, |110-70|=40, |90-70|=20 → 40
        assert!((bar.true_range(70.0) - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn true_range_gap_down() {
        let bar = sample_bar();
        // high-low=20, |110-130|=20, |90-130|=40 → 40
        assert!((bar.true_range(130.0) - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn bars_from_table_reads_rows() {
        let table = Table::new()
            .with_column("open", Column::Float(vec![1.0, 2.0]))
            .unwrap()
            .with_column("high", Column::Float(vec![3.0, 4.0]))
            .unwrap()
            .with_column("low", Column::Float(vec![0.5, 1.5]))
            .unwrap()
            .with_column("close", Column::Float(vec![2.0, 3.0]))
            .unwrap()
            .with_column("volume", Column::Int(vec![100, 200]))
            .unwrap();

        let bars = bars_from_table(&table).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].high, 4.0);
        assert_eq!(bars[1].volume, 200.0);
    }

    #[test]
    fn bars_from_table_requires_volume() {
        let table = Table::new()
            .with_column("open", Column::Float(vec![1.0]))
            .unwrap()
            .with_column("high", Column::Float(vec![1.0]))
            .unwrap()
            .with_column("low", Column::Float(vec![1.0]))
            .unwrap()
            .with_column("close", Column::Float(vec![1.0]))
            .unwrap();
        assert_eq!(
            bars_from_table(&table).unwrap_err(),
            SchemaError::missing("volume")
        );
    }
}
