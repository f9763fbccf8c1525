//! Single-pass pipeline: price series → signals → backtest.

use serde::Serialize;

use crate::domain::backtest::{self, EquityPoint, Trade};
use crate::domain::error::SmacrossError;
use crate::domain::metrics::PerformanceMetrics;
use crate::domain::price::PriceSeries;
use crate::domain::signal::{generate_signals, Signal};

/// Parameters of one simulation request.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub symbol: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub short_window: usize,
    pub long_window: usize,
}

/// Everything one simulation run produces, as plain immutable data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub signals: Vec<Signal>,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
    pub metrics: PerformanceMetrics,
}

/// A result annotated with what was simulated, for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub symbol: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub short_window: usize,
    pub long_window: usize,
    pub prices: Vec<crate::domain::price::PricePoint>,
    #[serde(flatten)]
    pub result: SimulationResult,
}

/// Generate crossover signals and backtest them over `series`.
///
/// Window order is validated here even when a request surface already
/// checked it. A series with insufficient history yields empty signals,
/// empty trades and zeroed metrics rather than an error.
pub fn run_simulation(
    series: &PriceSeries,
    short_window: usize,
    long_window: usize,
) -> Result<SimulationResult, SmacrossError> {
    let signals = generate_signals(series, short_window, long_window)?;
    let outcome = backtest::run(series, &signals);

    Ok(SimulationResult {
        signals,
        trades: outcome.trades,
        equity_curve: outcome.equity_curve,
        metrics: outcome.metrics,
    })
}
