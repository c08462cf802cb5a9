//! Ledger summary statistics.

use std::fmt;

use super::trade::LedgerEntry;

#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSummary {
    pub total_trades: usize,
    pub trades_won: usize,
    pub trades_lost: usize,
    pub trades_breakeven: usize,
    pub win_rate: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub profit_factor: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub largest_win: f64,
    pub largest_loss: f64,
    pub avg_length: f64,
    pub final_equity: f64,
    pub max_drawdown: f64,
}

impl LedgerSummary {
    pub fn compute<T: LedgerEntry>(trades: &[T]) -> Self {
        let mut trades_won = 0usize;
        let mut trades_lost = 0usize;
        let mut trades_breakeven = 0usize;
        let mut gross_profit = 0.0_f64;
        let mut gross_loss = 0.0_f64;
        let mut largest_win = 0.0_f64;
        let mut largest_loss = 0.0_f64;
        let mut total_length = 0usize;

        for trade in trades {
            let pnl = trade.pnl();
            if pnl > 0.0 {
                trades_won += 1;
                gross_profit += pnl;
                if pnl > largest_win {
                    largest_win = pnl;
                }
            } else if pnl < 0.0 {
                trades_lost += 1;
                gross_loss += pnl.abs();
                if pnl.abs() > largest_loss {
                    largest_loss = pnl.abs();
                }
            } else {
                trades_breakeven += 1;
            }
            total_length += trade.length();
        }

        let total_trades = trades.len();
        let win_rate = if total_trades > 0 {
            trades_won as f64 / total_trades as f64
        } else {
            0.0
        };

        let profit_factor = if gross_loss > 0.0 {
            gross_profit / gross_loss
        } else if gross_profit > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        let avg_win = if trades_won > 0 {
            gross_profit / trades_won as f64
        } else {
            0.0
        };

        let avg_loss = if trades_lost > 0 {
            gross_loss / trades_lost as f64
        } else {
            0.0
        };

        let avg_length = if total_trades > 0 {
            total_length as f64 / total_trades as f64
        } else {
            0.0
        };

        let (final_equity, max_drawdown) = compute_drawdown(trades.iter().map(|t| t.pnl()));

        LedgerSummary {
            total_trades,
            trades_won,
            trades_lost,
            trades_breakeven,
            win_rate,
            gross_profit,
            gross_loss,
            profit_factor,
            avg_win,
            avg_loss,
            largest_win,
            largest_loss,
            avg_length,
            final_equity,
            max_drawdown,
        }
    }
}

/// Final equity and largest peak-to-trough fall of the running PnL sum.
/// The curve starts at zero, which counts as the first peak.
fn compute_drawdown(pnls: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut equity = 0.0_f64;
    let mut peak = 0.0_f64;
    let mut max_dd = 0.0_f64;

    for pnl in pnls {
        equity += pnl;
        if equity > peak {
            peak = equity;
        }
        let dd = peak - equity;
        if dd > max_dd {
            max_dd = dd;
        }
    }

    (equity, max_dd)
}

impl fmt::Display for LedgerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "trades={} won={} lost={} breakeven={} win_rate={:.2}% profit_factor={:.2} \
             final_equity={:.2} max_drawdown={:.2}",
            self.total_trades,
            self.trades_won,
            self.trades_lost,
            self.trades_breakeven,
            self.win_rate * 100.0,
            self.profit_factor,
            self.final_equity,
            self.max_drawdown,
        )
    }
}
