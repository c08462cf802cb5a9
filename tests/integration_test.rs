//! Integration tests across the domain operations.
//!
//! Tests cover:
//! - Load → augment with indicators through the data port
//! - Load → resample → simulate pipeline with known trades
//! - Ledger properties: equity is the running sum of PnL, segments
//!   partition rows (property-based)
//! - Resampling identity and exact aggregation
//! - Handicap settlement worked examples

mod common;

use approx::assert_relative_eq;
use common::*;
use proptest::prelude::*;
use tradekit::domain::augment::{add_all_technical_indicators, EXTRA_COLUMNS};
use tradekit::domain::backtest::{
    simulate_stock_trades, simulate_trades, stock_commission, PipConfig, StockConfig,
};
use tradekit::domain::error::{SchemaError, TradekitError};
use tradekit::domain::handicap::{asian_result, settle, settle_row, BetMode, MatchRow};
use tradekit::domain::indicator::catalog::STANDARD_COLUMNS;
use tradekit::domain::metrics::LedgerSummary;
use tradekit::domain::resample::{resample, resample_str};
use tradekit::domain::segment::segment_signals;
use tradekit::domain::timeframe::Timeframe;
use tradekit::domain::trade::trades_to_table;
use tradekit::ports::data_port::DataPort;
use tradekit::ports::report_port::ReportPort;

mod indicator_pipeline {
    use super::*;

    #[test]
    fn load_and_augment() {
        let port = MockDataPort::new().with_table("bars.csv", ohlcv_table(80));
        let table = port.load_table("bars.csv").unwrap();

        let out = add_all_technical_indicators(&table).unwrap();

        assert_eq!(out.len(), 80);
        assert_eq!(out.width(), 5 + STANDARD_COLUMNS.len() + EXTRA_COLUMNS.len());
        for name in STANDARD_COLUMNS.iter().chain(EXTRA_COLUMNS.iter()) {
            let values = out.floats(name).unwrap();
            assert!(!values[79].is_nan(), "{name} undefined on last bar");
        }
    }

    #[test]
    fn table_with_time_column_is_rejected() {
        let table = flat_ohlcv_table(
            minute_times(at(2024, 1, 1, 0, 0), 1, 3),
            &[1.0, 2.0, 3.0],
            &[1.0, 1.0, 1.0],
        );
        let err = add_all_technical_indicators(&table).unwrap_err();
        assert!(matches!(err, SchemaError::UnexpectedColumns { .. }));
    }

    #[test]
    fn bop_matches_formula() {
        let table = ohlcv_table(10);
        let out = add_all_technical_indicators(&table).unwrap();
        let bop = out.floats("bop").unwrap();
        // open = close - 0.4, range = 3.0
        for v in bop.iter() {
            assert_relative_eq!(*v, 0.4 / 3.0, epsilon = 1e-12);
        }
    }
}

mod resample_then_simulate {
    use super::*;

    #[test]
    fn minute_bars_to_hourly_trades() {
        // Three hours of 30-minute bars; one signal per hour.
        let times = minute_times(at(2024, 3, 1, 0, 0), 30, 6);
        let closes = [10.0, 10.5, 11.0, 11.5, 12.0, 11.0];
        let table = flat_ohlcv_table(times, &closes, &[1.0; 6]);

        let hourly = resample_str(&table, "1h").unwrap();
        assert_eq!(hourly.len(), 3);
        assert_eq!(&*hourly.floats("close").unwrap(), &[10.5, 11.5, 11.0]);
        assert_eq!(&*hourly.floats("volume").unwrap(), &[2.0, 2.0, 2.0]);

        let with_signal = hourly
            .with_column("signal", Column::Int(vec![1, -1, 0]))
            .unwrap();
        let trades = simulate_trades(&with_signal, &PipConfig::default()).unwrap();

        assert_eq!(trades.len(), 2);
        // long 10.5 -> 11.5, short 11.5 -> 11.0; the flat hour stays open
        assert_relative_eq!(trades[0].pnl, 10.0, epsilon = 1e-9);
        assert_relative_eq!(trades[1].pnl, 5.0, epsilon = 1e-9);
        assert_eq!(trades[1].length, 1);
        assert_eq!(trades[1].open_time, at(2024, 3, 1, 1, 0));
    }

    #[test]
    fn worked_example_through_ledger_table() {
        let table = signal_table(
            &[10.0, 10.0, 11.0, 12.0, 13.0, 12.0, 11.0],
            &[0, 0, 1, 1, 1, -1, -1],
        );
        let trades = simulate_trades(&table, &PipConfig::default()).unwrap();

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].open_price, 11.0);
        assert_eq!(trades[0].close_price, 12.0);
        assert_eq!(trades[0].length, 3);
        assert_relative_eq!(trades[0].pnl, 10.0);

        let ledger = trades_to_table(&trades).unwrap();
        let names: Vec<&str> = ledger.column_names().collect();
        assert_eq!(
            names,
            [
                "type",
                "open_time",
                "open_price",
                "close_time",
                "close_price",
                "length",
                "pnl",
                "equity"
            ]
        );
        assert_eq!(ledger.len(), 1);

        let summary = LedgerSummary::compute(&trades);
        assert_eq!(summary.trades_won, 1);
        assert_relative_eq!(summary.final_equity, 10.0);
    }

    #[test]
    fn stock_ledger_buys_only() {
        let times = minute_times(at(2024, 5, 1, 10, 0), 1, 6);
        let table = flat_ohlcv_table(times, &[100.0, 100.0, 102.0, 101.0, 99.0, 99.0], &[0.0; 6])
            .with_column("signal", Column::Int(vec![1, 1, -1, 1, 1, 0]))
            .unwrap();
        let config = StockConfig {
            shares: 100.0,
            ..StockConfig::default()
        };

        let trades = simulate_stock_trades(&table, &config).unwrap();

        assert_eq!(trades.len(), 2);
        assert!(trades.iter().all(|t| t.kind == 1));
        // 100 -> 102 and 101 -> 99, each closed at the next segment's first bar
        assert_relative_eq!(trades[0].profit, 200.0);
        assert_relative_eq!(trades[1].profit, -200.0);
        assert_relative_eq!(trades[0].commission, stock_commission(100.0, &config));
        assert_relative_eq!(
            trades[1].equity,
            trades[0].pnl + trades[1].pnl,
            epsilon = 1e-9
        );
    }

    #[test]
    fn empty_table_cannot_be_segmented() {
        let table = signal_table(&[], &[]);
        let err = simulate_trades(&table, &PipConfig::default()).unwrap_err();
        assert!(matches!(err, TradekitError::EmptyInput { .. }));
    }

    #[test]
    fn ledger_written_through_report_port() {
        let table = signal_table(&[1.0, 2.0, 3.0], &[1, 1, 0]);
        let trades = simulate_trades(&table, &PipConfig::default()).unwrap();
        let report = MockReportPort::new();

        report
            .write(&trades_to_table(&trades).unwrap(), "ledger.csv")
            .unwrap();

        let written = report.written.borrow();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].0, "ledger.csv");
        assert_eq!(written[0].1.len(), 1);
    }
}

mod resampling {
    use super::*;

    #[test]
    fn identity_at_target_granularity() {
        let times = (0..5)
            .map(|d| date(2024, 2, 1 + d).and_hms_opt(0, 0, 0).unwrap())
            .collect();
        let table = flat_ohlcv_table(times, &[1.0, 2.0, 3.0, 4.0, 5.0], &[10.0; 5]);

        assert_eq!(resample(&table, &Timeframe::DAILY).unwrap(), table);
    }

    #[test]
    fn exact_high_low_volume() {
        let times = minute_times(at(2024, 2, 1, 9, 0), 5, 4);
        let mut table = flat_ohlcv_table(times, &[5.0, 7.0, 3.0, 6.0], &[1.5, 2.5, 3.0, 4.0]);
        table
            .push_column("high", Column::Float(vec![5.5, 9.0, 3.5, 6.5]))
            .unwrap();
        table
            .push_column("low", Column::Float(vec![4.5, 6.0, 1.0, 5.5]))
            .unwrap();

        let out = resample_str(&table, "15min").unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(&*out.floats("open").unwrap(), &[5.0, 6.0]);
        assert_eq!(&*out.floats("high").unwrap(), &[9.0, 6.5]);
        assert_eq!(&*out.floats("low").unwrap(), &[1.0, 5.5]);
        assert_eq!(&*out.floats("close").unwrap(), &[3.0, 6.0]);
        assert_eq!(&*out.floats("volume").unwrap(), &[7.0, 4.0]);
    }
}

mod handicap_examples {
    use super::*;

    #[test]
    fn over_goalline_full_win() {
        let row = MatchRow {
            gh: 0.0,
            ga: 0.0,
            ghf: 2.0,
            gaf: 1.0,
            goalline: 2.5,
            oddo: 1.9,
            ..MatchRow::default()
        };
        assert_relative_eq!(settle_row(&row, BetMode::Over), 0.9, epsilon = 1e-12);
    }

    #[test]
    fn quarter_loss_ignores_odd() {
        for odd in [1.5, 2.0, 3.75] {
            assert_relative_eq!(asian_result(-0.25, 0.0, odd), -0.5);
        }
    }

    #[test]
    fn settle_table_appends_running_total() {
        let table = match_table(&[
            // gh ga ghf gaf handicap goalline oddh odda oddo oddu
            [0.0, 0.0, 2.0, 0.0, -0.5, 2.5, 1.9, 2.0, 1.8, 2.1],
            [0.0, 0.0, 1.0, 1.0, 0.0, 2.5, 2.0, 1.9, 1.8, 2.1],
            [1.0, 0.0, 1.0, 2.0, -0.5, 2.5, 1.9, 2.0, 1.8, 2.1],
        ]);

        let out = settle(&table, "home").unwrap();
        let pnl = out.floats("pnl").unwrap();
        let cum = out.floats("cum_pnl").unwrap();

        assert_relative_eq!(pnl[0], 0.9, epsilon = 1e-12);
        assert_relative_eq!(pnl[1], 0.0);
        assert_relative_eq!(pnl[2], -1.0);
        assert_relative_eq!(cum[2], -0.1, epsilon = 1e-12);
    }

    #[test]
    fn unknown_mode_rejected() {
        let table = match_table(&[[0.0; 10]]);
        assert!(matches!(
            settle(&table, "draw"),
            Err(TradekitError::InvalidMode { .. })
        ));
    }
}

proptest! {
    #[test]
    fn equity_is_running_sum_of_pnl(
        rows in proptest::collection::vec((1.0f64..200.0, -1i64..=1), 1..60),
        digit in 0i32..5,
        commission in 0.0f64..5.0,
    ) {
        let closes: Vec<f64> = rows.iter().map(|(c, _)| *c).collect();
        let signals: Vec<i64> = rows.iter().map(|(_, s)| *s).collect();
        let table = signal_table(&closes, &signals);
        let config = PipConfig { digit, pip_profit: 1.0, commission };

        let trades = simulate_trades(&table, &config).unwrap();
        let mut running = 0.0;
        for trade in &trades {
            running += trade.pnl;
            prop_assert!((trade.equity - running).abs() <= 1e-6 * running.abs().max(1.0));
            prop_assert!(trade.kind != 0);
        }
    }

    #[test]
    fn segments_partition_rows(signals in proptest::collection::vec(-2i64..=2, 0..80)) {
        let segments = segment_signals(&signals);

        let mut next = 0;
        for (i, seg) in segments.iter().enumerate() {
            prop_assert_eq!(seg.start, next);
            prop_assert!(seg.len > 0);
            prop_assert!(signals[seg.start..seg.end()].iter().all(|s| *s == seg.signal));
            if i > 0 {
                prop_assert_ne!(segments[i - 1].signal, seg.signal);
            }
            next = seg.end();
        }
        prop_assert_eq!(next, signals.len());
    }
}
