//! CLI definition and dispatch.
//!
//! Every subcommand reads a CSV table, runs one domain operation and writes
//! the resulting table as CSV to `--output` or stdout. Settings resolve as
//! command-line flag, then INI file, then built-in default. A bad
//! `--timeframe` or `--mode` flag is an input error, not a config error.

use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::augment::add_all_technical_indicators;
use crate::domain::backtest::{simulate_stock_trades, simulate_trades, PipConfig, StockConfig};
use crate::domain::config_validation::{
    validate_handicap_config, validate_resample_config, validate_stock_config,
    validate_trade_config,
};
use crate::domain::error::TradekitError;
use crate::domain::handicap::{settle, BetMode};
use crate::domain::metrics::LedgerSummary;
use crate::domain::resample::resample;
use crate::domain::table::Table;
use crate::domain::timeframe::Timeframe;
use crate::domain::trade::{stock_trades_to_table, trades_to_table};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "tradekit", about = "OHLCV analytics and signal backtesting")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct IoArgs {
    /// Input CSV file
    #[arg(short, long)]
    pub input: PathBuf,
    /// Output CSV file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// INI configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Append technical indicator columns to an OHLCV table
    Indicators {
        #[command(flatten)]
        io: IoArgs,
    },
    /// Aggregate OHLCV bars into a coarser timeframe
    Resample {
        #[command(flatten)]
        io: IoArgs,
        /// Target timeframe, e.g. 15min, 4h, 1D
        #[arg(short, long)]
        timeframe: Option<String>,
    },
    /// Pip-based trade ledger from a signal column
    Simulate {
        #[command(flatten)]
        io: IoArgs,
        #[arg(long)]
        digit: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        pip_profit: Option<f64>,
        #[arg(long)]
        commission: Option<f64>,
    },
    /// Share-based trade ledger from a signal column (buy segments only)
    SimulateStock {
        #[command(flatten)]
        io: IoArgs,
        #[arg(long)]
        shares: Option<f64>,
        #[arg(long)]
        commission: Option<f64>,
        #[arg(long)]
        vat: Option<f64>,
    },
    /// Settle Asian-handicap bets over a match table
    Handicap {
        #[command(flatten)]
        io: IoArgs,
        /// home, away, over or under
        #[arg(short, long)]
        mode: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Indicators { io } => run_indicators(&io),
        Command::Resample { io, timeframe } => run_resample(&io, timeframe),
        Command::Simulate {
            io,
            digit,
            pip_profit,
            commission,
        } => run_simulate(&io, digit, pip_profit, commission),
        Command::SimulateStock {
            io,
            shares,
            commission,
            vat,
        } => run_simulate_stock(&io, shares, commission, vat),
        Command::Handicap { io, mode } => run_handicap(&io, mode),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Load the INI file, or an empty configuration when none is given.
pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, TradekitError> {
    match path {
        Some(p) => {
            info!("loading config from {}", p.display());
            FileConfigAdapter::from_file(p)
        }
        None => FileConfigAdapter::from_string(""),
    }
}

/// A configuration view where command-line values shadow the underlying file.
pub struct Overrides<'a> {
    base: &'a dyn ConfigPort,
    values: Vec<(&'static str, &'static str, String)>,
}

impl<'a> Overrides<'a> {
    pub fn new(base: &'a dyn ConfigPort) -> Self {
        Self {
            base,
            values: Vec::new(),
        }
    }

    pub fn set<T: ToString>(mut self, section: &'static str, key: &'static str, value: Option<T>) -> Self {
        if let Some(v) = value {
            self.values.push((section, key, v.to_string()));
        }
        self
    }
}

impl ConfigPort for Overrides<'_> {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.values
            .iter()
            .rev()
            .find(|(s, k, _)| *s == section && *k == key)
            .map(|(_, _, v)| v.clone())
            .or_else(|| self.base.get_string(section, key))
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.get_string(section, key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.get_string(section, key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}

pub fn build_pip_config(config: &dyn ConfigPort) -> Result<PipConfig, TradekitError> {
    validate_trade_config(config)?;
    let defaults = PipConfig::default();
    Ok(PipConfig {
        digit: config.get_int("trade", "digit", defaults.digit as i64) as i32,
        pip_profit: config.get_double("trade", "pip_profit", defaults.pip_profit),
        commission: config.get_double("trade", "commission", defaults.commission),
    })
}

pub fn build_stock_config(config: &dyn ConfigPort) -> Result<StockConfig, TradekitError> {
    validate_stock_config(config)?;
    let defaults = StockConfig::default();
    Ok(StockConfig {
        shares: config.get_double("stock", "shares", defaults.shares),
        commission: config.get_double("stock", "commission", defaults.commission),
        vat: config.get_double("stock", "vat", defaults.vat),
    })
}

pub fn build_timeframe(config: &dyn ConfigPort) -> Result<Timeframe, TradekitError> {
    validate_resample_config(config)?;
    match config.get_string("resample", "timeframe") {
        Some(value) => value.parse(),
        None => Ok(Timeframe::default()),
    }
}

pub fn build_mode(config: &dyn ConfigPort) -> Result<BetMode, TradekitError> {
    validate_handicap_config(config)?;
    match config.get_string("handicap", "mode") {
        Some(value) => value.parse(),
        None => Ok(BetMode::Home),
    }
}

pub fn simulate_pipeline(
    table: &Table,
    config: &PipConfig,
) -> Result<(Table, LedgerSummary), TradekitError> {
    let trades = simulate_trades(table, config)?;
    let summary = LedgerSummary::compute(&trades);
    Ok((trades_to_table(&trades)?, summary))
}

pub fn simulate_stock_pipeline(
    table: &Table,
    config: &StockConfig,
) -> Result<(Table, LedgerSummary), TradekitError> {
    let trades = simulate_stock_trades(table, config)?;
    let summary = LedgerSummary::compute(&trades);
    Ok((stock_trades_to_table(&trades)?, summary))
}

fn read_input(data_port: &dyn DataPort, io: &IoArgs) -> Result<Table, TradekitError> {
    info!("reading {}", io.input.display());
    let table = data_port.load_table(&io.input.to_string_lossy())?;
    info!(rows = table.len(), columns = table.width(), "loaded table");
    Ok(table)
}

fn write_output(adapter: &CsvAdapter, table: &Table, io: &IoArgs) -> Result<(), TradekitError> {
    match &io.output {
        Some(path) => {
            adapter.write(table, &path.to_string_lossy())?;
            info!(rows = table.len(), "wrote {}", path.display());
            Ok(())
        }
        None => adapter.write_table(table, io::stdout().lock()),
    }
}

fn log_summary(summary: &LedgerSummary) {
    if summary.total_trades == 0 {
        warn!("no closed trades; the final segment is still open");
    }
    info!("{summary}");
}

fn run_indicators(io: &IoArgs) -> Result<(), TradekitError> {
    // No settings; a bad config file is still reported.
    load_config(io.config.as_ref())?;
    let adapter = CsvAdapter::new();
    let table = read_input(&adapter, io)?;
    let out = add_all_technical_indicators(&table)?;
    write_output(&adapter, &out, io)
}

fn run_resample(io: &IoArgs, timeframe: Option<String>) -> Result<(), TradekitError> {
    let file = load_config(io.config.as_ref())?;
    let timeframe = match timeframe {
        Some(flag) => flag.parse()?,
        None => build_timeframe(&file)?,
    };

    let adapter = CsvAdapter::new();
    let table = read_input(&adapter, io)?;
    let out = resample(&table, &timeframe)?;
    info!(%timeframe, rows_in = table.len(), rows_out = out.len(), "resampled");
    write_output(&adapter, &out, io)
}

fn run_simulate(
    io: &IoArgs,
    digit: Option<i64>,
    pip_profit: Option<f64>,
    commission: Option<f64>,
) -> Result<(), TradekitError> {
    let file = load_config(io.config.as_ref())?;
    let config = build_pip_config(
        &Overrides::new(&file)
            .set("trade", "digit", digit)
            .set("trade", "pip_profit", pip_profit)
            .set("trade", "commission", commission),
    )?;

    let adapter = CsvAdapter::new();
    let table = read_input(&adapter, io)?;
    let (ledger, summary) = simulate_pipeline(&table, &config)?;
    log_summary(&summary);
    write_output(&adapter, &ledger, io)
}

fn run_simulate_stock(
    io: &IoArgs,
    shares: Option<f64>,
    commission: Option<f64>,
    vat: Option<f64>,
) -> Result<(), TradekitError> {
    let file = load_config(io.config.as_ref())?;
    let config = build_stock_config(
        &Overrides::new(&file)
            .set("stock", "shares", shares)
            .set("stock", "commission", commission)
            .set("stock", "vat", vat),
    )?;

    let adapter = CsvAdapter::new();
    let table = read_input(&adapter, io)?;
    let (ledger, summary) = simulate_stock_pipeline(&table, &config)?;
    log_summary(&summary);
    write_output(&adapter, &ledger, io)
}

fn run_handicap(io: &IoArgs, mode: Option<String>) -> Result<(), TradekitError> {
    let file = load_config(io.config.as_ref())?;
    let mode = match mode {
        Some(flag) => flag.parse()?,
        None => build_mode(&file)?,
    };

    let adapter = CsvAdapter::new();
    let table = read_input(&adapter, io)?;
    let out = settle(&table, &mode.to_string())?;
    info!(%mode, rows = out.len(), "settled bets");
    write_output(&adapter, &out, io)
}
