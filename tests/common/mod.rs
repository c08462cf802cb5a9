#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::cell::RefCell;
use std::collections::HashMap;
use tradekit::domain::error::TradekitError;
pub use tradekit::domain::table::{Column, Table};
use tradekit::ports::data_port::DataPort;
use tradekit::ports::report_port::ReportPort;

/// In-memory data source keyed by path.
pub struct MockDataPort {
    pub tables: HashMap<String, Table>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    pub fn with_table(mut self, source: &str, table: Table) -> Self {
        self.tables.insert(source.to_string(), table);
        self
    }
}

impl DataPort for MockDataPort {
    fn load_table(&self, source: &str) -> Result<Table, TradekitError> {
        self.tables
            .get(source)
            .cloned()
            .ok_or_else(|| TradekitError::DataFormat {
                reason: format!("no table at {source}"),
            })
    }
}

/// Captures written tables instead of touching the filesystem.
pub struct MockReportPort {
    pub written: RefCell<Vec<(String, Table)>>,
}

impl MockReportPort {
    pub fn new() -> Self {
        Self {
            written: RefCell::new(Vec::new()),
        }
    }
}

impl ReportPort for MockReportPort {
    fn write(&self, table: &Table, output_path: &str) -> Result<(), TradekitError> {
        self.written
            .borrow_mut()
            .push((output_path.to_string(), table.clone()));
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap()
}

/// Timestamps `step_minutes` apart starting at `start`.
pub fn minute_times(start: NaiveDateTime, step_minutes: i64, n: usize) -> Vec<NaiveDateTime> {
    (0..n)
        .map(|i| start + Duration::minutes(step_minutes * i as i64))
        .collect()
}

/// `time, close, signal` table with one-minute bars.
pub fn signal_table(closes: &[f64], signals: &[i64]) -> Table {
    assert_eq!(closes.len(), signals.len());
    Table::new()
        .with_column(
            "time",
            Column::Time(minute_times(at(2024, 1, 1, 9, 0), 1, closes.len())),
        )
        .and_then(|t| t.with_column("close", Column::Float(closes.to_vec())))
        .and_then(|t| t.with_column("signal", Column::Int(signals.to_vec())))
        .unwrap()
}

/// Full `time, open, high, low, close, volume` table where every bar has
/// open = high = low = close.
pub fn flat_ohlcv_table(times: Vec<NaiveDateTime>, closes: &[f64], volumes: &[f64]) -> Table {
    Table::new()
        .with_column("time", Column::Time(times))
        .and_then(|t| t.with_column("open", Column::Float(closes.to_vec())))
        .and_then(|t| t.with_column("high", Column::Float(closes.to_vec())))
        .and_then(|t| t.with_column("low", Column::Float(closes.to_vec())))
        .and_then(|t| t.with_column("close", Column::Float(closes.to_vec())))
        .and_then(|t| t.with_column("volume", Column::Float(volumes.to_vec())))
        .unwrap()
}

/// Five-column OHLCV table (no time) for indicator augmentation.
pub fn ohlcv_table(n: usize) -> Table {
    let close: Vec<f64> = (0..n)
        .map(|i| 100.0 + i as f64 * 0.2 + (i as f64 * 0.7).sin() * 2.0)
        .collect();
    Table::new()
        .with_column("open", Column::Float(close.iter().map(|c| c - 0.4).collect()))
        .and_then(|t| t.with_column("high", Column::Float(close.iter().map(|c| c + 1.5).collect())))
        .and_then(|t| t.with_column("low", Column::Float(close.iter().map(|c| c - 1.5).collect())))
        .and_then(|t| t.with_column("close", Column::Float(close)))
        .and_then(|t| {
            t.with_column(
                "volume",
                Column::Int((0..n).map(|i| 1_000 + (i as i64 % 5) * 250).collect()),
            )
        })
        .unwrap()
}

/// Match table with the columns every bet mode reads.
pub fn match_table(rows: &[[f64; 10]]) -> Table {
    let names = [
        "gh", "ga", "ghf", "gaf", "handicap", "goalline", "oddh", "odda", "oddo", "oddu",
    ];
    let mut table = Table::new();
    for (i, name) in names.iter().enumerate() {
        table
            .push_column(*name, Column::Float(rows.iter().map(|r| r[i]).collect()))
            .unwrap();
    }
    table
}
