//! Fallback for quote types without a dedicated variant (futures, options, ...).

use super::{Instrument, SpotFields};
use crate::domain::classification::Classification;
use crate::domain::error::{Result, TickerfolioError};
use crate::domain::quote_record::QuoteRecord;
use crate::ports::market_data_port::MarketDataPort;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Keeps the raw provider record; only a symbol and a price are required.
pub struct GenericInstrument {
    port: Arc<dyn MarketDataPort>,
    symbol: String,
    price: Decimal,
    record: QuoteRecord,
}

impl GenericInstrument {
    pub fn new(port: Arc<dyn MarketDataPort>, symbol: &str) -> Result<Self> {
        let record = port.quote_record(symbol)?;
        Self::from_record(port, symbol, record)
    }

    pub fn from_record(
        port: Arc<dyn MarketDataPort>,
        symbol: &str,
        record: QuoteRecord,
    ) -> Result<Self> {
        let invalid = |reason: &str| TickerfolioError::InvalidSymbol {
            symbol: symbol.to_string(),
            reason: reason.to_string(),
        };
        let own_symbol = record
            .optional_text("symbol")
            .ok_or_else(|| invalid("record has no symbol"))?;
        let price = record
            .optional_decimal(symbol, "regularMarketPrice")
            .ok()
            .flatten()
            .ok_or_else(|| invalid("record has no usable price"))?;

        Ok(Self {
            port,
            symbol: own_symbol,
            price,
            record,
        })
    }

    /// Every field the provider returned.
    pub fn info(&self) -> &QuoteRecord {
        &self.record
    }

    pub fn quote_type(&self) -> Option<&str> {
        self.record.get(crate::domain::classification::QUOTE_TYPE_FIELD)
    }

    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("ticker_symbol", self.symbol.clone()),
            ("quote_type", self.quote_type().unwrap_or_default().to_string()),
            ("price", self.price.to_string()),
        ])
    }
}

impl fmt::Display for GenericInstrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ticker Symbol: {}, Quote Type: {}",
            self.symbol,
            self.quote_type().unwrap_or_default()
        )
    }
}

impl fmt::Debug for GenericInstrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericInstrument")
            .field("symbol", &self.symbol)
            .field("price", &self.price)
            .field("fields", &self.record.len())
            .finish_non_exhaustive()
    }
}

impl Instrument for GenericInstrument {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn classification(&self) -> Classification {
        Classification::Generic
    }

    fn price(&self) -> Decimal {
        self.price
    }

    fn spot(&self) -> Option<&SpotFields> {
        None
    }

    fn market_data(&self) -> &dyn MarketDataPort {
        self.port.as_ref()
    }
}
