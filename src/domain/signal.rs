//! Crossover signal generation.
//!
//! A BUY fires when the short SMA transitions from at-or-below to strictly
//! above the long SMA between consecutive days; a SELL fires on the opposite
//! transition. Exact equality of the two averages counts as "not yet crossed",
//! so no signal repeats while the averages stay tied.

use crate::domain::error::SmacrossError;
use crate::domain::moving_average::calculate_sma;
use crate::domain::price::PriceSeries;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    Buy,
    Sell,
}

/// A crossover event aligned to a trading day of the price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Signal {
    pub date: NaiveDate,
    pub kind: SignalKind,
    pub short_ma: f64,
    pub long_ma: f64,
}

/// Generate crossover signals for `series` using SMA windows
/// `short_window` and `long_window`.
///
/// Windows are validated here regardless of any outer request validation:
/// both must be positive and the short window strictly smaller. A series too
/// short to define both averages on two consecutive days yields `Ok(vec![])`.
pub fn generate_signals(
    series: &PriceSeries,
    short_window: usize,
    long_window: usize,
) -> Result<Vec<Signal>, SmacrossError> {
    validate_windows(short_window, long_window)?;

    if series.len() < long_window + 1 {
        return Ok(Vec::new());
    }

    let short_ma = calculate_sma(series, short_window);
    let long_ma = calculate_sma(series, long_window);

    let mut signals = Vec::new();

    for i in 1..series.len() {
        if !short_ma[i].valid
            || !long_ma[i].valid
            || !short_ma[i - 1].valid
            || !long_ma[i - 1].valid
        {
            continue;
        }

        let prev_short = short_ma[i - 1].value;
        let prev_long = long_ma[i - 1].value;
        let curr_short = short_ma[i].value;
        let curr_long = long_ma[i].value;

        let kind = if prev_short <= prev_long && curr_short > curr_long {
            SignalKind::Buy
        } else if prev_short >= prev_long && curr_short < curr_long {
            SignalKind::Sell
        } else {
            continue;
        };

        signals.push(Signal {
            date: short_ma[i].date,
            kind,
            short_ma: curr_short,
            long_ma: curr_long,
        });
    }

    Ok(signals)
}

pub fn validate_windows(short_window: usize, long_window: usize) -> Result<(), SmacrossError> {
    if short_window == 0 || long_window == 0 {
        return Err(SmacrossError::InvalidWindows {
            short: short_window,
            long: long_window,
            reason: "windows must be positive".into(),
        });
    }
    if short_window >= long_window {
        return Err(SmacrossError::InvalidWindows {
            short: short_window,
            long: long_window,
            reason: "short window must be smaller than long window".into(),
        });
    }
    Ok(())
}
