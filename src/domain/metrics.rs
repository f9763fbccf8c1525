//! Performance metrics over the equity curve and realized trades.
//!
//! Degenerate cases resolve to 0 by policy rather than erroring or producing
//! NaN: zero-variance returns give a Sharpe of 0, zero trades give a win rate
//! of 0, an empty curve gives all-zero metrics.

use serde::Serialize;

use crate::domain::backtest::{EquityPoint, Trade};

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    pub total_return_pct: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown_pct: f64,
    pub win_rate_pct: f64,
    pub num_trades: usize,
}

impl PerformanceMetrics {
    pub fn zeroed() -> Self {
        PerformanceMetrics {
            total_return_pct: 0.0,
            sharpe_ratio: 0.0,
            max_drawdown_pct: 0.0,
            win_rate_pct: 0.0,
            num_trades: 0,
        }
    }

    pub fn compute(equity_curve: &[EquityPoint], trades: &[Trade]) -> Self {
        let Some(last) = equity_curve.last() else {
            return Self::zeroed();
        };

        let total_return_pct = (last.equity - 1.0) * 100.0;
        let sharpe_ratio = compute_sharpe(equity_curve);
        let max_drawdown_pct = compute_max_drawdown(equity_curve);

        let num_trades = trades.len();
        let wins = trades.iter().filter(|t| t.return_pct > 0.0).count();
        let win_rate_pct = if num_trades > 0 {
            100.0 * wins as f64 / num_trades as f64
        } else {
            0.0
        };

        PerformanceMetrics {
            total_return_pct,
            sharpe_ratio,
            max_drawdown_pct,
            win_rate_pct,
            num_trades,
        }
    }
}

/// Annualized Sharpe: mean(r) / stdev(r) * sqrt(252) over daily strategy
/// returns, 0 when the standard deviation is 0.
fn compute_sharpe(equity_curve: &[EquityPoint]) -> f64 {
    if equity_curve.len() < 2 {
        return 0.0;
    }

    let returns: Vec<f64> = equity_curve
        .windows(2)
        .map(|w| w[1].equity / w[0].equity - 1.0)
        .collect();

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let stddev = variance.sqrt();

    if stddev > 0.0 {
        mean / stddev * TRADING_DAYS_PER_YEAR.sqrt()
    } else {
        0.0
    }
}

/// Maximum peak-to-trough decline of the equity curve, in percent of the peak.
fn compute_max_drawdown(equity_curve: &[EquityPoint]) -> f64 {
    let mut peak = f64::MIN;
    let mut max_dd = 0.0_f64;

    for point in equity_curve {
        if point.equity > peak {
            peak = point.equity;
        } else if peak > 0.0 {
            let dd = (peak - point.equity) / peak * 100.0;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn make_curve(values: &[f64]) -> Vec<EquityPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &equity)| EquityPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64),
                equity,
            })
            .collect()
    }

    fn make_trade(return_pct: f64) -> Trade {
        let entry_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Trade {
            entry_date,
            entry_price: 100.0,
            exit_date: entry_date + chrono::Duration::days(5),
            exit_price: 100.0 * (1.0 + return_pct / 100.0),
            return_pct,
        }
    }

    #[test]
    fn empty_curve_is_all_zero() {
        let metrics = PerformanceMetrics::compute(&[], &[]);
        assert_eq!(metrics, PerformanceMetrics::zeroed());
    }

    #[test]
    fn total_return_from_final_equity() {
        let curve = make_curve(&[1.0, 1.05, 1.10]);
        let metrics = PerformanceMetrics::compute(&curve, &[]);
        assert_relative_eq!(metrics.total_return_pct, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn flat_curve_has_zero_sharpe() {
        let curve = make_curve(&[1.0, 1.0, 1.0, 1.0, 1.0]);
        let metrics = PerformanceMetrics::compute(&curve, &[]);
        assert_relative_eq!(metrics.sharpe_ratio, 0.0);
        assert_relative_eq!(metrics.max_drawdown_pct, 0.0);
    }

    #[test]
    fn constant_growth_has_zero_variance() {
        // Identical daily returns (exact doubling): stdev is 0, Sharpe
        // reports 0 by policy.
        let curve = make_curve(&[1.0, 2.0, 4.0, 8.0]);
        let metrics = PerformanceMetrics::compute(&curve, &[]);
        assert_relative_eq!(metrics.sharpe_ratio, 0.0);
    }

    #[test]
    fn sharpe_positive_for_mostly_rising_curve() {
        let curve = make_curve(&[1.0, 1.02, 1.01, 1.05, 1.04, 1.09]);
        let metrics = PerformanceMetrics::compute(&curve, &[]);
        assert!(metrics.sharpe_ratio > 0.0);
        assert!(metrics.sharpe_ratio.is_finite());
    }

    #[test]
    fn max_drawdown_known_curve() {
        // Peak 1.2 to trough 0.9 is a 25% drawdown.
        let curve = make_curve(&[1.0, 1.2, 0.9, 1.1]);
        let metrics = PerformanceMetrics::compute(&curve, &[]);
        assert_relative_eq!(metrics.max_drawdown_pct, 25.0, epsilon = 1e-9);
    }

    #[test]
    fn max_drawdown_monotonic_curve_is_zero() {
        let curve = make_curve(&[1.0, 1.1, 1.2, 1.3]);
        let metrics = PerformanceMetrics::compute(&curve, &[]);
        assert_relative_eq!(metrics.max_drawdown_pct, 0.0);
    }

    #[test]
    fn win_rate_counts_positive_trades() {
        let trades = vec![make_trade(5.0), make_trade(-2.0), make_trade(8.0), make_trade(0.0)];
        let curve = make_curve(&[1.0, 1.1]);
        let metrics = PerformanceMetrics::compute(&curve, &trades);

        assert_eq!(metrics.num_trades, 4);
        // Breakeven trades are not wins.
        assert_relative_eq!(metrics.win_rate_pct, 50.0);
    }

    #[test]
    fn win_rate_zero_trades_is_zero_not_nan() {
        let curve = make_curve(&[1.0, 1.1]);
        let metrics = PerformanceMetrics::compute(&curve, &[]);
        assert_eq!(metrics.num_trades, 0);
        assert_relative_eq!(metrics.win_rate_pct, 0.0);
    }
}
