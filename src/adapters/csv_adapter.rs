//! CSV file price data adapter.
//!
//! One file per symbol: `<SYMBOL>.csv` with a header row and
//! `date,close` columns, dates in YYYY-MM-DD.

use crate::domain::error::SmacrossError;
use crate::domain::price::PricePoint;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    prices_dir: PathBuf,
}

impl CsvAdapter {
    pub fn new(prices_dir: PathBuf) -> Self {
        Self { prices_dir }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.prices_dir.join(format!("{symbol}.csv"))
    }

    fn read_all(&self, symbol: &str) -> Result<Vec<PricePoint>, SmacrossError> {
        let path = self.csv_path(symbol);
        if !path.exists() {
            return Err(SmacrossError::NoData {
                symbol: symbol.to_string(),
            });
        }
        let content = fs::read_to_string(&path).map_err(|e| SmacrossError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut points = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| SmacrossError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let date_str = record.get(0).ok_or_else(|| SmacrossError::Data {
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                SmacrossError::Data {
                    reason: format!("invalid date {date_str:?}: {e}"),
                }
            })?;

            let close: f64 = record
                .get(1)
                .ok_or_else(|| SmacrossError::Data {
                    reason: "missing close column".into(),
                })?
                .parse()
                .map_err(|e| SmacrossError::Data {
                    reason: format!("invalid close value: {e}"),
                })?;

            points.push(PricePoint { date, close });
        }

        points.sort_by_key(|p| p.date);
        Ok(points)
    }
}

impl DataPort for CsvAdapter {
    fn fetch_prices(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>, SmacrossError> {
        let points = self.read_all(symbol)?;
        Ok(points
            .into_iter()
            .filter(|p| p.date >= start_date && p.date <= end_date)
            .collect())
    }

    fn list_symbols(&self) -> Result<Vec<String>, SmacrossError> {
        let entries = fs::read_dir(&self.prices_dir).map_err(|e| SmacrossError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.prices_dir.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SmacrossError::Data {
                reason: format!("directory entry error: {e}"),
            })?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, SmacrossError> {
        let points = match self.read_all(symbol) {
            Ok(points) => points,
            Err(SmacrossError::NoData { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };
        match (points.first(), points.last()) {
            (Some(first), Some(last)) => Ok(Some((first.date, last.date, points.len()))),
            _ => Ok(None),
        }
    }
}
