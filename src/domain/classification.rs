//! Instrument classification derived from the provider's `quoteType` field.

use crate::domain::error::{Result, TickerfolioError};
use crate::ports::market_data_port::MarketDataPort;
use std::fmt;

pub const QUOTE_TYPE_FIELD: &str = "quoteType";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Classification {
    Equity,
    ExchangeTradedFund,
    MutualFund,
    /// Treasury yields are quoted by providers as indices.
    TreasuryInstrument,
    Currency,
    Cryptocurrency,
    Generic,
}

impl Classification {
    /// Provider-facing tag for this classification.
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Equity => "EQUITY",
            Classification::ExchangeTradedFund => "ETF",
            Classification::MutualFund => "MUTUALFUND",
            Classification::TreasuryInstrument => "INDEX",
            Classification::Currency => "CURRENCY",
            Classification::Cryptocurrency => "CRYPTOCURRENCY",
            Classification::Generic => "MISC",
        }
    }

    /// Maps a provider tag; unrecognized tags fall back to `Generic`.
    pub fn from_quote_type(quote_type: &str) -> Self {
        match quote_type.trim().to_uppercase().as_str() {
            "EQUITY" => Classification::Equity,
            "ETF" => Classification::ExchangeTradedFund,
            "MUTUALFUND" => Classification::MutualFund,
            "INDEX" => Classification::TreasuryInstrument,
            "CURRENCY" => Classification::Currency,
            "CRYPTOCURRENCY" => Classification::Cryptocurrency,
            _ => Classification::Generic,
        }
    }

    pub fn is_currency_like(&self) -> bool {
        matches!(
            self,
            Classification::Currency | Classification::Cryptocurrency
        )
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Queries the provider once and reads the record's quote type.
pub fn classify(port: &dyn MarketDataPort, symbol: &str) -> Result<Classification> {
    let record = port.quote_record(symbol)?;
    classification_of(&record, symbol)
}

pub(crate) fn classification_of(
    record: &crate::domain::quote_record::QuoteRecord,
    symbol: &str,
) -> Result<Classification> {
    match record.get(QUOTE_TYPE_FIELD) {
        Some(tag) if !tag.trim().is_empty() => Ok(Classification::from_quote_type(tag)),
        _ => Err(TickerfolioError::InvalidSymbol {
            symbol: symbol.to_string(),
            reason: format!("record has no {QUOTE_TYPE_FIELD}"),
        }),
    }
}
