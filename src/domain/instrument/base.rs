//! Fields and behaviour shared by every non-fallback instrument.

use super::Instrument;
use crate::domain::classification::{Classification, classification_of};
use crate::domain::error::{Result, TickerfolioError};
use crate::domain::quote_record::QuoteRecord;
use crate::ports::market_data_port::MarketDataPort;
use log::debug;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Market snapshot captured when the instrument is built.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpotFields {
    pub symbol: String,
    pub price: Decimal,
    pub volume: Decimal,
    pub open: Decimal,
    pub previous_close: Decimal,
    pub day_high: Decimal,
    pub day_low: Decimal,
    pub exchange: String,
}

impl SpotFields {
    pub fn from_record(record: &QuoteRecord, symbol: &str) -> Result<Self> {
        Ok(Self {
            symbol: record.text(symbol, "symbol")?,
            price: record.decimal(symbol, "regularMarketPrice")?,
            volume: record.decimal(symbol, "regularMarketVolume")?,
            open: record.decimal(symbol, "regularMarketOpen")?,
            previous_close: record.decimal(symbol, "regularMarketPreviousClose")?,
            day_high: record.decimal(symbol, "regularMarketDayHigh")?,
            day_low: record.decimal(symbol, "regularMarketDayLow")?,
            exchange: record.text(symbol, "exchange")?,
        })
    }
}

/// Top of book; providers leave these blank outside trading hours.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BidAsk {
    pub bid: Option<Decimal>,
    pub bid_size: Option<Decimal>,
    pub ask: Option<Decimal>,
    pub ask_size: Option<Decimal>,
}

impl BidAsk {
    pub fn from_record(record: &QuoteRecord, symbol: &str) -> Result<Self> {
        Ok(Self {
            bid: record.optional_decimal(symbol, "bid")?,
            bid_size: record.optional_decimal(symbol, "bidSize")?,
            ask: record.optional_decimal(symbol, "ask")?,
            ask_size: record.optional_decimal(symbol, "askSize")?,
        })
    }

    pub fn spread(&self) -> Option<Decimal> {
        Some(self.ask? - self.bid?)
    }

    pub(crate) fn extend_map(&self, map: &mut BTreeMap<&'static str, String>) {
        map.extend([
            ("bid", optional_entry(self.bid)),
            ("bid_size", optional_entry(self.bid_size)),
            ("ask", optional_entry(self.ask)),
            ("ask_size", optional_entry(self.ask_size)),
        ]);
    }
}

/// Map entry for a figure the provider may leave out; blank when absent.
pub(crate) fn optional_entry<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub struct BaseInstrument {
    port: Arc<dyn MarketDataPort>,
    classification: Classification,
    spot: SpotFields,
}

impl BaseInstrument {
    pub fn new(port: Arc<dyn MarketDataPort>, symbol: &str) -> Result<Self> {
        let record = port.quote_record(symbol)?;
        Self::from_record(port, symbol, &record)
    }

    /// Reads the classification and spot fields from an already fetched record.
    pub fn from_record(
        port: Arc<dyn MarketDataPort>,
        symbol: &str,
        record: &QuoteRecord,
    ) -> Result<Self> {
        let classification = classification_of(record, symbol)?;
        let spot = SpotFields::from_record(record, symbol)?;
        debug!(
            "Loaded {} ({}) at {} on {}",
            spot.symbol, classification, spot.price, spot.exchange
        );
        Ok(Self {
            port,
            classification,
            spot,
        })
    }

    /// Fails unless the fetched classification is one of `accepted`.
    pub(crate) fn ensure_kind(&self, accepted: &[Classification]) -> Result<()> {
        if accepted.contains(&self.classification) {
            return Ok(());
        }
        Err(TickerfolioError::SecurityTypeMismatch {
            symbol: self.spot.symbol.clone(),
            expected: accepted.first().copied().unwrap_or(Classification::Generic),
            actual: self.classification,
        })
    }

    pub fn spot_fields(&self) -> &SpotFields {
        &self.spot
    }

    pub fn volume(&self) -> Decimal {
        self.spot.volume
    }

    pub fn opening_price(&self) -> Decimal {
        self.spot.open
    }

    pub fn closing_price(&self) -> Decimal {
        self.spot.previous_close
    }

    pub fn day_high(&self) -> Decimal {
        self.spot.day_high
    }

    pub fn day_low(&self) -> Decimal {
        self.spot.day_low
    }

    pub fn exchange(&self) -> &str {
        &self.spot.exchange
    }

    pub(crate) fn port(&self) -> &Arc<dyn MarketDataPort> {
        &self.port
    }

    /// Flat view of the spot snapshot keyed by field name.
    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        let s = &self.spot;
        BTreeMap::from([
            ("ticker_symbol", s.symbol.clone()),
            ("quote_type", self.classification.to_string()),
            ("price", s.price.to_string()),
            ("opening_price", s.open.to_string()),
            ("closing_price", s.previous_close.to_string()),
            ("day_low", s.day_low.to_string()),
            ("day_high", s.day_high.to_string()),
            ("exchange", s.exchange.clone()),
            ("volume", s.volume.to_string()),
        ])
    }
}

impl fmt::Debug for BaseInstrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseInstrument")
            .field("classification", &self.classification)
            .field("spot", &self.spot)
            .finish_non_exhaustive()
    }
}

impl Instrument for BaseInstrument {
    fn symbol(&self) -> &str {
        &self.spot.symbol
    }

    fn classification(&self) -> Classification {
        self.classification
    }

    fn price(&self) -> Decimal {
        self.spot.price
    }

    fn spot(&self) -> Option<&SpotFields> {
        Some(&self.spot)
    }

    fn market_data(&self) -> &dyn MarketDataPort {
        self.port.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::domain::error::ErrorKind;
    use rust_decimal_macros::dec;

    #[test]
    fn ingests_spot_fields() {
        let port = StubPort::default()
            .with("AAPL", &spot_pairs("AAPL", "EQUITY"))
            .shared();
        let base = BaseInstrument::new(port, "AAPL").unwrap();
        assert_eq!(base.symbol(), "AAPL");
        assert_eq!(base.price(), dec!(100.5));
        assert_eq!(base.volume(), dec!(12000));
        assert_eq!(base.opening_price(), dec!(99));
        assert_eq!(base.closing_price(), dec!(98.75));
        assert_eq!(base.day_high(), dec!(101));
        assert_eq!(base.day_low(), dec!(97.5));
        assert_eq!(base.exchange(), "NMS");
        assert_eq!(base.classification(), Classification::Equity);
    }

    #[test]
    fn missing_spot_field_is_parsing_failure() {
        let pairs: Vec<_> = spot_pairs("AAPL", "EQUITY")
            .into_iter()
            .filter(|(k, _)| *k != "regularMarketDayLow")
            .collect();
        let port = StubPort::default().with("AAPL", &pairs).shared();
        let err = BaseInstrument::new(port, "AAPL").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParsingFailure);
    }

    #[test]
    fn unknown_symbol_is_invalid() {
        let err = BaseInstrument::new(StubPort::default().shared(), "NOPE").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSymbol);
    }

    #[test]
    fn ensure_kind_reports_mismatch() {
        let port = StubPort::default()
            .with("SPY", &spot_pairs("SPY", "ETF"))
            .shared();
        let base = BaseInstrument::new(port, "SPY").unwrap();
        assert!(base.ensure_kind(&[Classification::ExchangeTradedFund]).is_ok());
        let err = base.ensure_kind(&[Classification::Equity]).unwrap_err();
        assert!(matches!(
            err,
            TickerfolioError::SecurityTypeMismatch {
                expected: Classification::Equity,
                actual: Classification::ExchangeTradedFund,
                ..
            }
        ));
    }

    #[test]
    fn to_map_exposes_snapshot() {
        let port = StubPort::default()
            .with("AAPL", &spot_pairs("AAPL", "EQUITY"))
            .shared();
        let map = BaseInstrument::new(port, "AAPL").unwrap().to_map();
        assert_eq!(map["ticker_symbol"], "AAPL");
        assert_eq!(map["quote_type"], "EQUITY");
        assert_eq!(map["closing_price"], "98.75");
        assert_eq!(map.len(), 9);
    }

    #[test]
    fn spread_needs_both_sides() {
        let q = BidAsk {
            bid: Some(dec!(10.1)),
            ask: Some(dec!(10.3)),
            ..Default::default()
        };
        assert_eq!(q.spread(), Some(dec!(0.2)));
        assert_eq!(BidAsk::default().spread(), None);
    }
}
