//! Settled trade records and their table form.

use chrono::NaiveDateTime;

use crate::domain::error::SchemaError;
use crate::domain::table::{Column, Table};

/// One closed trade of a pip-based ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    /// Signal value of the segment: 1 long, -1 short.
    pub kind: i64,
    pub open_time: NaiveDateTime,
    pub close_time: NaiveDateTime,
    pub open_price: f64,
    pub close_price: f64,
    pub length: usize,
    pub pnl: f64,
    pub equity: f64,
}

/// One closed trade of a share-based ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct StockTrade {
    pub kind: i64,
    pub open_time: NaiveDateTime,
    pub close_time: NaiveDateTime,
    pub open_price: f64,
    pub close_price: f64,
    pub length: usize,
    pub shares: f64,
    pub profit: f64,
    pub commission: f64,
    pub pnl: f64,
    pub equity: f64,
}

/// Common view of ledger rows used by summaries.
pub trait LedgerEntry {
    fn pnl(&self) -> f64;
    fn length(&self) -> usize;
}

impl LedgerEntry for Trade {
    fn pnl(&self) -> f64 {
        self.pnl
    }

    fn length(&self) -> usize {
        self.length
    }
}

impl LedgerEntry for StockTrade {
    fn pnl(&self) -> f64 {
        self.pnl
    }

    fn length(&self) -> usize {
        self.length
    }
}

struct LedgerColumns {
    kind: Vec<i64>,
    open_time: Vec<NaiveDateTime>,
    open_price: Vec<f64>,
    close_time: Vec<NaiveDateTime>,
    close_price: Vec<f64>,
    length: Vec<i64>,
}

impl LedgerColumns {
    fn with_capacity(n: usize) -> Self {
        Self {
            kind: Vec::with_capacity(n),
            open_time: Vec::with_capacity(n),
            open_price: Vec::with_capacity(n),
            close_time: Vec::with_capacity(n),
            close_price: Vec::with_capacity(n),
            length: Vec::with_capacity(n),
        }
    }

    fn push(
        &mut self,
        kind: i64,
        open_time: NaiveDateTime,
        open_price: f64,
        close_time: NaiveDateTime,
        close_price: f64,
        length: usize,
    ) {
        self.kind.push(kind);
        self.open_time.push(open_time);
        self.open_price.push(open_price);
        self.close_time.push(close_time);
        self.close_price.push(close_price);
        self.length.push(length as i64);
    }

    fn into_table(self) -> Result<Table, SchemaError> {
        let mut table = Table::new();
        let columns = [
            ("type", Column::Int(self.kind)),
            ("open_time", Column::Time(self.open_time)),
            ("open_price", Column::Float(self.open_price)),
            ("close_time", Column::Time(self.close_time)),
            ("close_price", Column::Float(self.close_price)),
            ("length", Column::Int(self.length)),
        ];
        for (name, column) in columns {
            table.push_column(name, column)?;
        }
        Ok(table)
    }
}

/// `type, open_time, open_price, close_time, close_price, length, pnl, equity`
pub fn trades_to_table(trades: &[Trade]) -> Result<Table, SchemaError> {
    let mut cols = LedgerColumns::with_capacity(trades.len());
    for t in trades {
        cols.push(
            t.kind,
            t.open_time,
            t.open_price,
            t.close_time,
            t.close_price,
            t.length,
        );
    }
    let mut table = cols.into_table()?;
    table.push_column("pnl", Column::Float(trades.iter().map(|t| t.pnl).collect()))?;
    table.push_column(
        "equity",
        Column::Float(trades.iter().map(|t| t.equity).collect()),
    )?;
    Ok(table)
}

/// Same leading columns as [`trades_to_table`], then
/// `shares, profit, commission, pnl, equity`.
pub fn stock_trades_to_table(trades: &[StockTrade]) -> Result<Table, SchemaError> {
    let mut cols = LedgerColumns::with_capacity(trades.len());
    for t in trades {
        cols.push(
            t.kind,
            t.open_time,
            t.open_price,
            t.close_time,
            t.close_price,
            t.length,
        );
    }
    let mut table = cols.into_table()?;
    let tail: [(&str, fn(&StockTrade) -> f64); 5] = [
        ("shares", |t| t.shares),
        ("profit", |t| t.profit),
        ("commission", |t| t.commission),
        ("pnl", |t| t.pnl),
        ("equity", |t| t.equity),
    ];
    for (name, field) in tail {
        table.push_column(name, Column::Float(trades.iter().map(field).collect()))?;
    }
    Ok(table)
}
