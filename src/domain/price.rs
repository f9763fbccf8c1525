//! Daily closing-price representation.

use crate::domain::error::SmacrossError;
use chrono::NaiveDate;
use serde::Serialize;

/// One trading day's closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// An immutable, validated series of daily closes.
///
/// Invariants enforced at construction: at least two points, strictly
/// ascending dates (no duplicates), every close finite and positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Result<Self, SmacrossError> {
        if points.len() < 2 {
            return Err(SmacrossError::InvalidSeries {
                reason: format!("need at least 2 price points, got {}", points.len()),
            });
        }

        for point in &points {
            if !point.close.is_finite() || point.close <= 0.0 {
                return Err(SmacrossError::InvalidSeries {
                    reason: format!("non-positive close {} on {}", point.close, point.date),
                });
            }
        }

        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(SmacrossError::InvalidSeries {
                    reason: format!(
                        "dates not strictly ascending: {} followed by {}",
                        pair[0].date, pair[1].date
                    ),
                });
            }
        }

        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.close)
    }

    pub fn first_date(&self) -> NaiveDate {
        self.points[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.points[self.points.len() - 1].date
    }
}
