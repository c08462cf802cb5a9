//! The default indicator catalog.
//!
//! Column names follow the `ta` convention of `<family>_<indicator>`.

use crate::domain::indicator::bollinger::{self, band_columns, calculate_bollinger};
use crate::domain::indicator::macd::{calculate_macd_default, macd_component};
use crate::domain::indicator::oscillator::{calculate_ao, DEFAULT_AO_FAST, DEFAULT_AO_SLOW};
use crate::domain::indicator::returns::{
    calculate_cumulative_return, calculate_daily_log_return, calculate_daily_return,
};
use crate::domain::indicator::stochastic::{
    calculate_stochastic, calculate_williams_r, stochastic_columns, DEFAULT_D_PERIOD,
    DEFAULT_K_PERIOD, DEFAULT_WR_PERIOD,
};
use crate::domain::indicator::volume::{
    calculate_adi, calculate_cmf, calculate_force_index, calculate_mfi, calculate_vpt,
    calculate_vwap, DEFAULT_CMF_PERIOD, DEFAULT_FI_PERIOD, DEFAULT_MFI_PERIOD,
    DEFAULT_VWAP_PERIOD,
};
use crate::domain::indicator::{
    atr, calculate_ema, calculate_sma, obv::calculate_obv, roc::calculate_roc,
    rsi::calculate_rsi,
};
use crate::domain::indicator_helpers::safe_div;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::indicator_port::IndicatorLibrary;

pub const TREND_FAST: usize = 12;
pub const TREND_SLOW: usize = 26;
pub const RSI_PERIOD: usize = 14;
pub const ROC_PERIOD: usize = 12;

/// Column names produced by [`StandardCatalog`], in output order.
pub const STANDARD_COLUMNS: [&str; 29] = [
    "volume_adi",
    "volume_obv",
    "volume_cmf",
    "volume_fi",
    "volume_mfi",
    "volume_vpt",
    "volume_vwap",
    "volatility_bbm",
    "volatility_bbh",
    "volatility_bbl",
    "volatility_bbw",
    "volatility_bbp",
    "volatility_atr",
    "trend_macd",
    "trend_macd_signal",
    "trend_macd_diff",
    "trend_sma_fast",
    "trend_sma_slow",
    "trend_ema_fast",
    "trend_ema_slow",
    "momentum_rsi",
    "momentum_stoch",
    "momentum_stoch_signal",
    "momentum_wr",
    "momentum_ao",
    "momentum_roc",
    "others_dr",
    "others_dlr",
    "others_cr",
];

/// Volume, volatility, trend, momentum and return indicators with their
/// customary default windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCatalog;

impl IndicatorLibrary for StandardCatalog {
    fn compute_all(&self, bars: &[OhlcvBar]) -> Vec<(String, Vec<f64>)> {
        let (bbh, bbm, bbl) = band_columns(&calculate_bollinger(
            bars,
            bollinger::DEFAULT_PERIOD,
            bollinger::DEFAULT_MULT_X100,
        ));
        let bbw: Vec<f64> = (0..bars.len())
            .map(|i| safe_div(bbh[i] - bbl[i], bbm[i]) * 100.0)
            .collect();
        let bbp: Vec<f64> = bars
            .iter()
            .enumerate()
            .map(|(i, b)| safe_div(b.close - bbl[i], bbh[i] - bbl[i]))
            .collect();

        let macd = calculate_macd_default(bars);
        let (stoch_k, stoch_d) =
            stochastic_columns(&calculate_stochastic(bars, DEFAULT_K_PERIOD, DEFAULT_D_PERIOD));

        let columns = vec![
            calculate_adi(bars).column(),
            calculate_obv(bars).column(),
            calculate_cmf(bars, DEFAULT_CMF_PERIOD).column(),
            calculate_force_index(bars, DEFAULT_FI_PERIOD).column(),
            calculate_mfi(bars, DEFAULT_MFI_PERIOD).column(),
            calculate_vpt(bars).column(),
            calculate_vwap(bars, DEFAULT_VWAP_PERIOD).column(),
            bbm,
            bbh,
            bbl,
            bbw,
            bbp,
            atr::calculate_atr(bars, atr::DEFAULT_PERIOD).column(),
            macd_component(&macd, |line, _, _| line),
            macd_component(&macd, |_, signal, _| signal),
            macd_component(&macd, |_, _, histogram| histogram),
            calculate_sma(bars, TREND_FAST).column(),
            calculate_sma(bars, TREND_SLOW).column(),
            calculate_ema(bars, TREND_FAST).column(),
            calculate_ema(bars, TREND_SLOW).column(),
            calculate_rsi(bars, RSI_PERIOD).column(),
            stoch_k,
            stoch_d,
            calculate_williams_r(bars, DEFAULT_WR_PERIOD).column(),
            calculate_ao(bars, DEFAULT_AO_FAST, DEFAULT_AO_SLOW).column(),
            calculate_roc(bars, ROC_PERIOD).column(),
            calculate_daily_return(bars).column(),
            calculate_daily_log_return(bars).column(),
            calculate_cumulative_return(bars).column(),
        ];

        STANDARD_COLUMNS
            .iter()
            .map(|name| name.to_string())
            .zip(columns)
            .collect()
    }
}
