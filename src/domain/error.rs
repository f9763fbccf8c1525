//! Domain error types.

/// Top-level error type for smacross.
#[derive(Debug, thiserror::Error)]
pub enum SmacrossError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid price series: {reason}")]
    InvalidSeries { reason: String },

    #[error("invalid moving-average windows ({short}, {long}): {reason}")]
    InvalidWindows {
        short: usize,
        long: usize,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no price data for {symbol}")]
    NoData { symbol: String },

    #[error("insufficient price data for {symbol}: have {points} points, need {minimum}")]
    InsufficientData {
        symbol: String,
        points: usize,
        minimum: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&SmacrossError> for std::process::ExitCode {
    fn from(err: &SmacrossError) -> Self {
        let code: u8 = match err {
            SmacrossError::Io(_) => 1,
            SmacrossError::ConfigParse { .. }
            | SmacrossError::ConfigMissing { .. }
            | SmacrossError::ConfigInvalid { .. } => 2,
            SmacrossError::Data { .. } => 3,
            SmacrossError::InvalidSeries { .. } | SmacrossError::InvalidWindows { .. } => 4,
            SmacrossError::NoData { .. } | SmacrossError::InsufficientData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
