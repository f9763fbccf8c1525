//! Simulation configuration validation.
//!
//! These are request-surface checks run before the core pipeline; the core
//! still re-validates window order on its own, since it can be invoked
//! without going through a config file.

use crate::domain::error::SmacrossError;
use crate::ports::config_port::ConfigPort;
use chrono::{NaiveDate, Utc};

/// Minimum calendar span of the requested date range, in days.
pub const MIN_RANGE_DAYS: i64 = 30;

pub fn validate_simulation_config(config: &dyn ConfigPort) -> Result<(), SmacrossError> {
    validate_symbol(config)?;
    let (start_date, end_date) = validate_dates(config)?;
    validate_windows(config, end_date - start_date)?;
    Ok(())
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<(), SmacrossError> {
    let symbol = config
        .get_string("simulation", "symbol")
        .ok_or_else(|| SmacrossError::ConfigMissing {
            section: "simulation".into(),
            key: "symbol".into(),
        })?;
    if symbol.trim().is_empty() {
        return Err(SmacrossError::ConfigInvalid {
            section: "simulation".into(),
            key: "symbol".into(),
            reason: "symbol must be non-empty".into(),
        });
    }
    Ok(())
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(NaiveDate, NaiveDate), SmacrossError> {
    let start_date = parse_date(config, "start_date")?;
    let end_date = parse_date(config, "end_date")?;

    if start_date >= end_date {
        return Err(SmacrossError::ConfigInvalid {
            section: "simulation".into(),
            key: "start_date".into(),
            reason: "start_date must be before end_date".into(),
        });
    }
    if end_date > Utc::now().date_naive() {
        return Err(SmacrossError::ConfigInvalid {
            section: "simulation".into(),
            key: "end_date".into(),
            reason: "end_date must not be in the future".into(),
        });
    }
    if (end_date - start_date).num_days() < MIN_RANGE_DAYS {
        return Err(SmacrossError::ConfigInvalid {
            section: "simulation".into(),
            key: "end_date".into(),
            reason: format!("date range must span at least {MIN_RANGE_DAYS} days"),
        });
    }

    Ok((start_date, end_date))
}

fn parse_date(config: &dyn ConfigPort, key: &str) -> Result<NaiveDate, SmacrossError> {
    let value = config
        .get_string("simulation", key)
        .ok_or_else(|| SmacrossError::ConfigMissing {
            section: "simulation".into(),
            key: key.into(),
        })?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| SmacrossError::ConfigInvalid {
        section: "simulation".into(),
        key: key.into(),
        reason: "invalid date format (expected YYYY-MM-DD)".into(),
    })
}

fn validate_windows(
    config: &dyn ConfigPort,
    range: chrono::Duration,
) -> Result<(), SmacrossError> {
    let short = config.get_int("simulation", "short_window", 0);
    let long = config.get_int("simulation", "long_window", 0);

    if short <= 0 {
        return Err(SmacrossError::ConfigInvalid {
            section: "simulation".into(),
            key: "short_window".into(),
            reason: "short_window must be positive".into(),
        });
    }
    if long <= 0 {
        return Err(SmacrossError::ConfigInvalid {
            section: "simulation".into(),
            key: "long_window".into(),
            reason: "long_window must be positive".into(),
        });
    }
    if short >= long {
        return Err(SmacrossError::ConfigInvalid {
            section: "simulation".into(),
            key: "short_window".into(),
            reason: "short_window must be smaller than long_window".into(),
        });
    }
    if long > range.num_days() {
        return Err(SmacrossError::ConfigInvalid {
            section: "simulation".into(),
            key: "long_window".into(),
            reason: "long_window exceeds the requested date range".into(),
        });
    }
    Ok(())
}
