//! Asian handicap and over/under settlement.
//!
//! Settlement compares a mode-dependent value with a line:
//! `base = value - line`, `win = odd - 1`
//! - base > 0.25: full win, `win`
//! - base == 0.25: half win, `win / 2`
//! - base == -0.25: half loss, `-0.5`
//! - base < -0.25: full loss, `-1`
//! - otherwise: push, `0`
//!
//! Lines on .0 or .5 settle fully; quarter lines split the stake across two
//! half bets, which is where the ±0.25 outcomes come from.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::domain::error::TradekitError;
use crate::domain::table::{Column, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BetMode {
    Home,
    Away,
    Over,
    Under,
}

impl BetMode {
    /// Line and odd columns read by this mode, in addition to the goal columns.
    pub fn columns(self) -> [&'static str; 2] {
        match self {
            BetMode::Home => ["handicap", "oddh"],
            BetMode::Away => ["handicap", "odda"],
            BetMode::Over => ["goalline", "oddo"],
            BetMode::Under => ["goalline", "oddu"],
        }
    }
}

impl FromStr for BetMode {
    type Err = TradekitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" => Ok(BetMode::Home),
            "away" => Ok(BetMode::Away),
            "over" => Ok(BetMode::Over),
            "under" => Ok(BetMode::Under),
            _ => Err(TradekitError::InvalidMode {
                mode: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for BetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BetMode::Home => "home",
            BetMode::Away => "away",
            BetMode::Over => "over",
            BetMode::Under => "under",
        };
        f.write_str(name)
    }
}

/// One match, as seen at the moment the bet was placed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MatchRow {
    /// Home goals when the bet was placed.
    pub gh: f64,
    /// Away goals when the bet was placed.
    pub ga: f64,
    /// Final home goals.
    pub ghf: f64,
    /// Final away goals.
    pub gaf: f64,
    pub handicap: f64,
    pub goalline: f64,
    pub oddh: f64,
    pub odda: f64,
    pub oddo: f64,
    pub oddu: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settlement {
    pub pnl: f64,
    pub cum_pnl: f64,
}

/// Stake-normalised PnL of one bet.
pub fn asian_result(value: f64, line: f64, odd: f64) -> f64 {
    let base = value - line;
    let win = odd - 1.0;

    if base > 0.25 {
        win
    } else if base == 0.25 {
        win / 2.0
    } else if base == -0.25 {
        -0.5
    } else if base < -0.25 {
        -1.0
    } else {
        0.0
    }
}

pub fn settle_row(row: &MatchRow, mode: BetMode) -> f64 {
    let total = row.ghf + row.gaf;
    // Handicap bets only count goals scored after the bet was placed.
    let home_margin = (row.ghf - row.gh) - (row.gaf - row.ga);

    let (value, line, odd) = match mode {
        BetMode::Over => (total, row.goalline, row.oddo),
        BetMode::Under => (-total, -row.goalline, row.oddu),
        BetMode::Home => (home_margin, -row.handicap, row.oddh),
        BetMode::Away => (-home_margin, row.handicap, row.odda),
    };

    asian_result(value, line, odd)
}

/// Per-row settlement with running total, in input order.
pub fn settle_matches(rows: &[MatchRow], mode: BetMode) -> Vec<Settlement> {
    let mut cum_pnl = 0.0;
    rows.iter()
        .map(|row| {
            let pnl = settle_row(row, mode);
            cum_pnl += pnl;
            Settlement { pnl, cum_pnl }
        })
        .collect()
}

/// Copy of `table` with `pnl` and `cum_pnl` columns appended.
pub fn settle(table: &Table, mode: &str) -> Result<Table, TradekitError> {
    let mode: BetMode = mode.parse()?;
    let rows = match_rows(table, mode)?;
    let settlements = settle_matches(&rows, mode);

    debug!(
        %mode,
        rows = rows.len(),
        cum_pnl = settlements.last().map(|s| s.cum_pnl).unwrap_or(0.0),
        "settled matches"
    );

    let mut out = table.clone();
    out.push_column(
        "pnl",
        Column::Float(settlements.iter().map(|s| s.pnl).collect()),
    )?;
    out.push_column(
        "cum_pnl",
        Column::Float(settlements.iter().map(|s| s.cum_pnl).collect()),
    )?;
    Ok(out)
}

/// Read the columns `mode` needs; the others stay at zero.
fn match_rows(table: &Table, mode: BetMode) -> Result<Vec<MatchRow>, TradekitError> {
    let [line_col, odd_col] = mode.columns();
    table.require(&["gh", "ga", "ghf", "gaf", line_col, odd_col])?;

    let gh = table.floats("gh")?;
    let ga = table.floats("ga")?;
    let ghf = table.floats("ghf")?;
    let gaf = table.floats("gaf")?;
    let line = table.floats(line_col)?;
    let odd = table.floats(odd_col)?;

    Ok((0..table.len())
        .map(|i| {
            let mut row = MatchRow {
                gh: gh[i],
                ga: ga[i],
                ghf: ghf[i],
                gaf: gaf[i],
                ..MatchRow::default()
            };
            match mode {
                BetMode::Home => (row.handicap, row.oddh) = (line[i], odd[i]),
                BetMode::Away => (row.handicap, row.odda) = (line[i], odd[i]),
                BetMode::Over => (row.goalline, row.oddo) = (line[i], odd[i]),
                BetMode::Under => (row.goalline, row.oddu) = (line[i], odd[i]),
            }
            row
        })
        .collect())
}
