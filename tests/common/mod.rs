#![allow(dead_code)]

use chrono::NaiveDate;
use smacross::domain::error::SmacrossError;
pub use smacross::domain::price::{PricePoint, PriceSeries};
use smacross::ports::data_port::DataPort;
use std::collections::HashMap;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn make_point(day_offset: i64, close: f64) -> PricePoint {
    PricePoint {
        date: date(2024, 1, 1) + chrono::Duration::days(day_offset),
        close,
    }
}

pub fn make_points(closes: &[f64]) -> Vec<PricePoint> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| make_point(i as i64, close))
        .collect()
}

pub fn make_series(closes: &[f64]) -> PriceSeries {
    PriceSeries::new(make_points(closes)).unwrap()
}

/// Daily closes rising by a constant step, starting at `start`.
pub fn trending_points(days: usize, start: f64, step: f64) -> Vec<PricePoint> {
    (0..days)
        .map(|i| make_point(i as i64, start + step * i as f64))
        .collect()
}

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PricePoint>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_points(mut self, symbol: &str, points: Vec<PricePoint>) -> Self {
        self.data.insert(symbol.to_string(), points);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_prices(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>, SmacrossError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(SmacrossError::Data {
                reason: reason.clone(),
            });
        }
        match self.data.get(symbol) {
            Some(points) => Ok(points
                .iter()
                .filter(|p| p.date >= start_date && p.date <= end_date)
                .copied()
                .collect()),
            None => Err(SmacrossError::NoData {
                symbol: symbol.to_string(),
            }),
        }
    }

    fn list_symbols(&self) -> Result<Vec<String>, SmacrossError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, SmacrossError> {
        Ok(self.data.get(symbol).and_then(|points| {
            match (points.first(), points.last()) {
                (Some(first), Some(last)) => Some((first.date, last.date, points.len())),
                _ => None,
            }
        }))
    }
}
