//! Price data access port trait.
//!
//! Provider failures (unknown symbol, unreadable file) surface here, before
//! the core pipeline ever runs; the domain itself does no I/O.

use crate::domain::error::SmacrossError;
use crate::domain::price::PricePoint;
use chrono::NaiveDate;

pub trait DataPort {
    fn fetch_prices(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>, SmacrossError>;

    fn list_symbols(&self) -> Result<Vec<String>, SmacrossError>;

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, SmacrossError>;
}
