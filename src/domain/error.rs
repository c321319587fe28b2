//! Domain error types.

use crate::domain::classification::Classification;
use crate::domain::period::{Duration, Interval};
use rust_decimal::Decimal;

/// Coarse error category, for callers that handle failures by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidSymbol,
    ParsingFailure,
    SecurityTypeMismatch,
    DuplicateSymbol,
    SymbolNotFound,
    InvalidQuantity,
    InvalidCostBasis,
    ExternalLookupFailure,
    NoHistory,
    Config,
    Io,
}

/// Top-level error type for tickerfolio.
#[derive(Debug, thiserror::Error)]
pub enum TickerfolioError {
    #[error("invalid symbol {symbol}: {reason}")]
    InvalidSymbol { symbol: String, reason: String },

    #[error("failed to parse {field} for {symbol}: {reason}")]
    Parsing {
        symbol: String,
        field: String,
        reason: String,
    },

    #[error("{symbol} is classified as {actual}, expected {expected}")]
    SecurityTypeMismatch {
        symbol: String,
        expected: Classification,
        actual: Classification,
    },

    #[error("{symbol} is already in the portfolio")]
    DuplicateSymbol { symbol: String },

    #[error("{symbol} is not in the portfolio")]
    SymbolNotFound { symbol: String },

    #[error("invalid quantity {quantity} for {symbol}: {reason}")]
    InvalidQuantity {
        symbol: String,
        quantity: Decimal,
        reason: String,
    },

    #[error("invalid cost basis {cost_basis} for {symbol}: {reason}")]
    InvalidCostBasis {
        symbol: String,
        cost_basis: Decimal,
        reason: String,
    },

    #[error("{service} lookup failed for {symbol}: {reason}")]
    ExternalLookup {
        service: String,
        symbol: String,
        reason: String,
    },

    #[error("no history for {symbol} over {duration} at {interval}")]
    NoHistory {
        symbol: String,
        duration: Duration,
        interval: Interval,
    },

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

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TickerfolioError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TickerfolioError::InvalidSymbol { .. } => ErrorKind::InvalidSymbol,
            TickerfolioError::Parsing { .. } => ErrorKind::ParsingFailure,
            TickerfolioError::SecurityTypeMismatch { .. } => ErrorKind::SecurityTypeMismatch,
            TickerfolioError::DuplicateSymbol { .. } => ErrorKind::DuplicateSymbol,
            TickerfolioError::SymbolNotFound { .. } => ErrorKind::SymbolNotFound,
            TickerfolioError::InvalidQuantity { .. } => ErrorKind::InvalidQuantity,
            TickerfolioError::InvalidCostBasis { .. } => ErrorKind::InvalidCostBasis,
            TickerfolioError::ExternalLookup { .. } => ErrorKind::ExternalLookupFailure,
            TickerfolioError::NoHistory { .. } => ErrorKind::NoHistory,
            TickerfolioError::ConfigParse { .. }
            | TickerfolioError::ConfigMissing { .. }
            | TickerfolioError::ConfigInvalid { .. } => ErrorKind::Config,
            TickerfolioError::Io(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn parsing(symbol: &str, field: &str, reason: impl Into<String>) -> Self {
        TickerfolioError::Parsing {
            symbol: symbol.to_string(),
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TickerfolioError>;
