//! Technical indicator implementations.
//!
//! This module provides types for representing indicator values and series:
//! - `IndicatorPoint`: A single point in an indicator series
//! - `IndicatorValue`: Enum for different indicator output shapes
//! - `IndicatorType`: Enum for indicator identity + parameters
//! - `IndicatorSeries`: A series of indicator values, one per input bar
//!
//! Every calculator returns one point per bar. Points inside the warm-up
//! window, or where the formula is undefined, are marked invalid and become
//! NaN when flattened into a table column.

pub mod atr;
pub mod bollinger;
pub mod catalog;
pub mod ema;
pub mod kurtosis;
pub mod macd;
pub mod obv;
pub mod oscillator;
pub mod returns;
pub mod roc;
pub mod rsi;
pub mod sma;
pub mod stddev;
pub mod stochastic;
pub mod volume;
pub mod wma;

pub use ema::calculate_ema;
pub use sma::calculate_sma;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPoint {
    pub valid: bool,
    pub value: IndicatorValue,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorValue {
    Simple(f64),
    Macd {
        line: f64,
        signal: f64,
        histogram: f64,
    },
    Stochastic {
        k: f64,
        d: f64,
    },
    Bollinger {
        upper: f64,
        middle: f64,
        lower: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Fwma(usize),
    Rsi(usize),
    Roc(usize),
    Atr(usize),
    Kurtosis(usize),
    Obv,
    Adi,
    Vpt,
    Cmf(usize),
    ForceIndex(usize),
    Mfi(usize),
    Vwap(usize),
    WilliamsR(usize),
    Cg(usize),
    Bop,
    Ao {
        fast: usize,
        slow: usize,
    },
    Apo {
        fast: usize,
        slow: usize,
    },
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    Stochastic {
        k_period: usize,
        d_period: usize,
    },
    Bollinger {
        period: usize,
        stddev_mult_x100: u32,
    },
    DailyReturn,
    DailyLogReturn,
    CumulativeReturn,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Single-valued series from raw numbers; NaN marks an invalid point.
    pub fn simple(indicator_type: IndicatorType, raw: Vec<f64>) -> Self {
        let values = raw
            .into_iter()
            .map(|v| IndicatorPoint {
                valid: !v.is_nan(),
                value: IndicatorValue::Simple(v),
            })
            .collect();
        Self {
            indicator_type,
            values,
        }
    }

    /// Flatten one component of each point into a column; invalid points are NaN.
    pub fn column_by(&self, component: impl Fn(&IndicatorValue) -> f64) -> Vec<f64> {
        self.values
            .iter()
            .map(|p| if p.valid { component(&p.value) } else { f64::NAN })
            .collect()
    }

    /// Column of a single-valued series.
    pub fn column(&self) -> Vec<f64> {
        self.column_by(|v| match v {
            IndicatorValue::Simple(x) => *x,
            _ => f64::NAN,
        })
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Ema(period) => write!(f, "EMA({})", period),
            IndicatorType::Fwma(period) => write!(f, "FWMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Roc(period) => write!(f, "ROC({})", period),
            IndicatorType::Atr(period) => write!(f, "ATR({})", period),
            IndicatorType::Kurtosis(period) => write!(f, "KURTOSIS({})", period),
            IndicatorType::Obv => write!(f, "OBV"),
            IndicatorType::Adi => write!(f, "ADI"),
            IndicatorType::Vpt => write!(f, "VPT"),
            IndicatorType::Cmf(period) => write!(f, "CMF({})", period),
            IndicatorType::ForceIndex(period) => write!(f, "FI({})", period),
            IndicatorType::Mfi(period) => write!(f, "MFI({})", period),
            IndicatorType::Vwap(period) => write!(f, "VWAP({})", period),
            IndicatorType::WilliamsR(period) => write!(f, "WR({})", period),
            IndicatorType::Cg(period) => write!(f, "CG({})", period),
            IndicatorType::Bop => write!(f, "BOP"),
            IndicatorType::Ao { fast, slow } => write!(f, "AO({},{})", fast, slow),
            IndicatorType::Apo { fast, slow } => write!(f, "APO({},{})", fast, slow),
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            IndicatorType::Stochastic { k_period, d_period } => {
                write!(f, "STOCHASTIC({},{})", k_period, d_period)
            }
            IndicatorType::Bollinger {
                period,
                stddev_mult_x100,
            } => {
                let mult = *stddev_mult_x100 as f64 / 100.0;
                write!(f, "BOLLINGER({},{})", period, mult)
            }
            IndicatorType::DailyReturn => write!(f, "DR"),
            IndicatorType::DailyLogReturn => write!(f, "DLR"),
            IndicatorType::CumulativeReturn => write!(f, "CR"),
        }
    }
}
