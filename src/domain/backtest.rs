//! Backtest engine: single long-only position driven by crossover signals.
//!
//! State machine: FLAT —BUY→ LONG (entered at that day's close),
//! LONG —SELL→ FLAT (closed at that day's close, one realized [`Trade`]).
//! A BUY while LONG and a SELL while FLAT are ignored.
//!
//! Equity starts at 1.0. Each day the position was held coming into it
//! multiplies equity by close[i]/close[i-1]; flat days leave it unchanged.
//! A position still open at the end of the series is not force-closed: it is
//! excluded from the realized trade ledger but its unrealized effect is
//! already in the equity curve, since entry happens at the close and every
//! subsequent daily return was applied.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::metrics::PerformanceMetrics;
use crate::domain::price::PriceSeries;
use crate::domain::signal::{Signal, SignalKind};

/// A realized round trip. Created only when a LONG position is closed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trade {
    pub entry_date: NaiveDate,
    pub entry_price: f64,
    pub exit_date: NaiveDate,
    pub exit_price: f64,
    pub return_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestOutcome {
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
    pub metrics: PerformanceMetrics,
}

#[derive(Debug, Clone, Copy)]
enum PositionState {
    Flat,
    Long {
        entry_date: NaiveDate,
        entry_price: f64,
    },
}

/// Simulate the signal sequence over the price series.
///
/// `signals` must be ordered by date; dates that do not appear in the series
/// are skipped. The same inputs always produce the same outcome.
pub fn run(series: &PriceSeries, signals: &[Signal]) -> BacktestOutcome {
    let points = series.points();
    let mut trades = Vec::new();
    let mut equity_curve = Vec::with_capacity(points.len());

    let mut state = PositionState::Flat;
    let mut equity = 1.0_f64;
    let mut signal_idx = 0usize;

    for (i, point) in points.iter().enumerate() {
        // Return earned from the previous close, if we held through it.
        if i > 0 {
            if let PositionState::Long { .. } = state {
                equity *= point.close / points[i - 1].close;
            }
        }

        equity_curve.push(EquityPoint {
            date: point.date,
            equity,
        });

        while signal_idx < signals.len() && signals[signal_idx].date < point.date {
            signal_idx += 1;
        }
        if signal_idx >= signals.len() || signals[signal_idx].date != point.date {
            continue;
        }
        let signal = &signals[signal_idx];
        signal_idx += 1;

        state = match (state, signal.kind) {
            (PositionState::Flat, SignalKind::Buy) => PositionState::Long {
                entry_date: point.date,
                entry_price: point.close,
            },
            (
                PositionState::Long {
                    entry_date,
                    entry_price,
                },
                SignalKind::Sell,
            ) => {
                trades.push(Trade {
                    entry_date,
                    entry_price,
                    exit_date: point.date,
                    exit_price: point.close,
                    return_pct: (point.close / entry_price - 1.0) * 100.0,
                });
                PositionState::Flat
            }
            // No pyramiding; no selling what we do not hold.
            (state, _) => state,
        };
    }

    let metrics = PerformanceMetrics::compute(&equity_curve, &trades);

    BacktestOutcome {
        trades,
        equity_curve,
        metrics,
    }
}
