//! Simple moving average over daily closes.
//!
//! O(n) sliding window sum. SMA(w) at index i is the arithmetic mean of
//! closes [i-w+1, i]. Warmup: first (w-1) points are invalid.

use crate::domain::price::PriceSeries;
use chrono::NaiveDate;

/// One point of a moving-average series, aligned to the price series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: f64,
}

/// Compute the simple moving average of `series` closes with window `window`.
///
/// Returns one point per price point. A zero window yields an empty vector;
/// callers validate windows before signal generation.
pub fn calculate_sma(series: &PriceSeries, window: usize) -> Vec<MaPoint> {
    if window == 0 {
        return Vec::new();
    }

    let points = series.points();
    let mut values = Vec::with_capacity(points.len());
    let mut window_sum: f64 = 0.0;

    for (i, point) in points.iter().enumerate() {
        window_sum += point.close;
        if i >= window {
            window_sum -= points[i - window].close;
        }

        let valid = i >= window - 1;
        let value = if valid { window_sum / window as f64 } else { 0.0 };

        values.push(MaPoint {
            date: point.date,
            valid,
            value,
        });
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price::PricePoint;
    use approx::assert_relative_eq;

    fn make_series(closes: &[f64]) -> PriceSeries {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: NaiveDate::from_ymd_opt(2024, 1, (i + 1) as u32).unwrap(),
                close,
            })
            .collect();
        PriceSeries::new(points).unwrap()
    }

    #[test]
    fn sma_warmup() {
        let series = make_series(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let sma = calculate_sma(&series, 3);

        assert_eq!(sma.len(), 5);
        assert!(!sma[0].valid);
        assert!(!sma[1].valid);
        assert!(sma[2].valid);
        assert!(sma[3].valid);
        assert!(sma[4].valid);
    }

    #[test]
    fn sma_known_values() {
        let series = make_series(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let sma = calculate_sma(&series, 3);

        assert_relative_eq!(sma[2].value, 20.0);
        assert_relative_eq!(sma[3].value, 30.0);
        assert_relative_eq!(sma[4].value, 40.0);
    }

    #[test]
    fn sma_window_1_is_identity() {
        let series = make_series(&[10.0, 20.0, 30.0]);
        let sma = calculate_sma(&series, 1);

        assert!(sma.iter().all(|p| p.valid));
        assert_relative_eq!(sma[0].value, 10.0);
        assert_relative_eq!(sma[1].value, 20.0);
        assert_relative_eq!(sma[2].value, 30.0);
    }

    #[test]
    fn sma_flat_prices() {
        let series = make_series(&[100.0, 100.0, 100.0, 100.0]);
        let sma = calculate_sma(&series, 2);

        for point in sma.iter().skip(1) {
            assert!(point.valid);
            assert_relative_eq!(point.value, 100.0);
        }
    }

    #[test]
    fn sma_window_longer_than_series() {
        let series = make_series(&[10.0, 20.0, 30.0]);
        let sma = calculate_sma(&series, 5);

        assert_eq!(sma.len(), 3);
        assert!(sma.iter().all(|p| !p.valid));
    }

    #[test]
    fn sma_window_0() {
        let series = make_series(&[10.0, 20.0]);
        let sma = calculate_sma(&series, 0);
        assert!(sma.is_empty());
    }

    #[test]
    fn sma_dates_align_with_series() {
        let series = make_series(&[10.0, 20.0, 30.0]);
        let sma = calculate_sma(&series, 2);

        for (ma, price) in sma.iter().zip(series.points()) {
            assert_eq!(ma.date, price.date);
        }
    }
}
