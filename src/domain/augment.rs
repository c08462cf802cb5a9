//! Indicator augmentation of OHLCV tables.

use tracing::debug;

use crate::domain::error::SchemaError;
use crate::domain::indicator::catalog::StandardCatalog;
use crate::domain::indicator::kurtosis::{self, calculate_kurtosis};
use crate::domain::indicator::oscillator::{
    calculate_ao, calculate_apo, calculate_bop, calculate_cg, DEFAULT_AO_FAST, DEFAULT_AO_SLOW,
    DEFAULT_APO_FAST, DEFAULT_APO_SLOW, DEFAULT_CG_PERIOD,
};
use crate::domain::indicator::wma::{calculate_fwma, DEFAULT_FWMA_PERIOD};
use crate::domain::ohlcv::{bars_from_table, OhlcvBar, OHLCV_COLUMNS};
use crate::domain::table::{Column, Table};
use crate::ports::indicator_port::IndicatorLibrary;

/// Named columns appended after the catalog, in order.
pub const EXTRA_COLUMNS: [&str; 6] = ["ao", "apo", "bop", "cg", "fwma", "kurtosis"];

/// Append the [`StandardCatalog`] columns and the extra oscillators to an
/// `open, high, low, close, volume` table.
pub fn add_all_technical_indicators(table: &Table) -> Result<Table, SchemaError> {
    add_technical_indicators_with(table, &StandardCatalog)
}

pub fn add_technical_indicators_with(
    table: &Table,
    library: &dyn IndicatorLibrary,
) -> Result<Table, SchemaError> {
    let found: Vec<&str> = table.column_names().collect();
    if found != OHLCV_COLUMNS {
        return Err(SchemaError::UnexpectedColumns {
            expected: OHLCV_COLUMNS.iter().map(|s| s.to_string()).collect(),
            found: found.iter().map(|s| s.to_string()).collect(),
        });
    }

    let bars = bars_from_table(table)?;
    let mut out = table.clone();
    for (name, values) in library.compute_all(&bars) {
        out.push_column(name, Column::Float(values))?;
    }
    for (name, values) in EXTRA_COLUMNS.iter().zip(extra_columns(&bars)) {
        out.push_column(*name, Column::Float(values))?;
    }

    debug!(
        rows = table.len(),
        columns = out.width() - table.width(),
        "added technical indicators"
    );
    Ok(out)
}

fn extra_columns(bars: &[OhlcvBar]) -> [Vec<f64>; 6] {
    [
        calculate_ao(bars, DEFAULT_AO_FAST, DEFAULT_AO_SLOW).column(),
        calculate_apo(bars, DEFAULT_APO_FAST, DEFAULT_APO_SLOW).column(),
        calculate_bop(bars).column(),
        calculate_cg(bars, DEFAULT_CG_PERIOD).column(),
        calculate_fwma(bars, DEFAULT_FWMA_PERIOD).column(),
        calculate_kurtosis(bars, kurtosis::DEFAULT_PERIOD).column(),
    ]
}
