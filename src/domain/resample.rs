//! Candle aggregation into coarser fixed-width timeframes.
//!
//! Buckets are anchored at midnight of the day of the earliest timestamp.
//! Within a bucket: open = first, high = max, low = min, close = last,
//! volume = sum. Empty buckets are not emitted.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime};
use tracing::debug;

use crate::domain::error::TradekitError;
use crate::domain::table::{Column, Table};
use crate::domain::timeframe::Timeframe;

const REQUIRED: [&str; 5] = ["time", "open", "high", "low", "close"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reduction {
    First,
    Max,
    Min,
    Last,
    Sum,
}

impl Reduction {
    fn for_column(name: &str) -> Option<Self> {
        match name {
            "open" => Some(Reduction::First),
            "high" => Some(Reduction::Max),
            "low" => Some(Reduction::Min),
            "close" => Some(Reduction::Last),
            "volume" => Some(Reduction::Sum),
            _ => None,
        }
    }

    fn apply(self, values: &[f64], rows: &[usize]) -> f64 {
        let mut it = rows.iter().map(|&i| values[i]);
        match self {
            Reduction::First => it.next().unwrap_or(f64::NAN),
            Reduction::Last => it.last().unwrap_or(f64::NAN),
            Reduction::Max => it.fold(f64::NEG_INFINITY, f64::max),
            Reduction::Min => it.fold(f64::INFINITY, f64::min),
            Reduction::Sum => it.sum(),
        }
    }
}

/// Parse `timeframe` (e.g. `"1D"`, `"4h"`) and resample.
pub fn resample_str(table: &Table, timeframe: &str) -> Result<Table, TradekitError> {
    resample(table, &timeframe.parse()?)
}

/// Aggregate `table` into `timeframe` candles.
///
/// Output columns keep the input order; only `time` and the OHLCV columns
/// survive. Rows are ordered by bucket start, which becomes the new `time`.
pub fn resample(table: &Table, timeframe: &Timeframe) -> Result<Table, TradekitError> {
    table.require(&REQUIRED)?;
    let times = table.times("time")?;

    let buckets = bucket_rows(times, timeframe);

    let mut out = Table::new();
    for (name, _) in table.columns() {
        if name == "time" {
            out.push_column(name, Column::Time(buckets.keys().copied().collect()))?;
            continue;
        }
        let Some(reduction) = Reduction::for_column(name) else {
            continue;
        };
        let values = table.floats(name)?;
        let reduced = buckets
            .values()
            .map(|rows| reduction.apply(&values, rows))
            .collect();
        out.push_column(name, Column::Float(reduced))?;
    }

    debug!(
        rows = table.len(),
        candles = out.len(),
        %timeframe,
        "resampled"
    );
    Ok(out)
}

/// Row indices per bucket start, buckets ascending, rows in input order.
fn bucket_rows(
    times: &[NaiveDateTime],
    timeframe: &Timeframe,
) -> BTreeMap<NaiveDateTime, Vec<usize>> {
    let mut buckets: BTreeMap<NaiveDateTime, Vec<usize>> = BTreeMap::new();
    let Some(origin) = times.iter().min().and_then(|t| t.date().and_hms_opt(0, 0, 0)) else {
        return buckets;
    };

    let width = timeframe.seconds();
    for (i, t) in times.iter().enumerate() {
        let offset = (*t - origin).num_seconds();
        let start = origin + Duration::seconds(offset.div_euclid(width) * width);
        buckets.entry(start).or_default().push(i);
    }
    buckets
}
