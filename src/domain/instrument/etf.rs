//! Exchange-traded funds.

use super::equity::{CorporateAction, dividends_from};
use super::{BaseInstrument, BidAsk, Instrument, SpotFields};
use crate::domain::classification::Classification;
use crate::domain::error::Result;
use crate::domain::period::{Duration, Interval};
use crate::domain::quote_record::QuoteRecord;
use crate::ports::market_data_port::MarketDataPort;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug)]
pub struct Etf {
    base: BaseInstrument,
    name: String,
    business_summary: Option<String>,
    total_assets: Decimal,
    quote: BidAsk,
    dividends: Vec<CorporateAction>,
}

impl Etf {
    pub fn new(port: Arc<dyn MarketDataPort>, symbol: &str) -> Result<Self> {
        let record = port.quote_record(symbol)?;
        Self::from_record(port, symbol, record)
    }

    /// Builds from an already fetched record.
    pub fn from_record(
        port: Arc<dyn MarketDataPort>,
        symbol: &str,
        record: QuoteRecord,
    ) -> Result<Self> {
        let base = BaseInstrument::from_record(port, symbol, &record)?;
        base.ensure_kind(&[Classification::ExchangeTradedFund])?;
        let history = base
            .port()
            .history(symbol, Duration::Max, Interval::Day1)?;

        Ok(Self {
            name: record.text(symbol, "shortName")?,
            business_summary: record.optional_text("longBusinessSummary"),
            total_assets: record.decimal(symbol, "totalAssets")?,
            quote: BidAsk::from_record(&record, symbol)?,
            dividends: dividends_from(&history),
            base,
        })
    }

    pub fn base(&self) -> &BaseInstrument {
        &self.base
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn business_summary(&self) -> Option<&str> {
        self.business_summary.as_deref()
    }

    pub fn total_assets(&self) -> Decimal {
        self.total_assets
    }

    pub fn quote(&self) -> &BidAsk {
        &self.quote
    }

    pub fn dividends(&self) -> &[CorporateAction] {
        &self.dividends
    }

    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        let mut map = self.base.to_map();
        map.extend([
            ("short_name", self.name.clone()),
            ("total_assets", self.total_assets.to_string()),
            (
                "business_summary",
                self.business_summary.clone().unwrap_or_default(),
            ),
        ]);
        self.quote.extend_map(&mut map);
        map
    }
}

impl fmt::Display for Etf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ticker Symbol: {}, Name: {}", self.symbol(), self.name)
    }
}

impl Instrument for Etf {
    fn symbol(&self) -> &str {
        self.base.symbol()
    }

    fn classification(&self) -> Classification {
        Classification::ExchangeTradedFund
    }

    fn price(&self) -> Decimal {
        self.base.price()
    }

    fn spot(&self) -> Option<&SpotFields> {
        Some(self.base.spot_fields())
    }

    fn market_data(&self) -> &dyn MarketDataPort {
        self.base.market_data()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::domain::error::ErrorKind;
    use rust_decimal_macros::dec;

    fn spy_pairs() -> Vec<(&'static str, &'static str)> {
        let mut pairs = spot_pairs("SPY", "ETF");
        pairs.extend([
            ("shortName", "SPDR S&P 500"),
            ("totalAssets", "500000000000"),
            ("bidSize", "800"),
        ]);
        pairs
    }

    #[test]
    fn ingests_fund_fields() {
        let port = StubPort::default()
            .with("SPY", &spy_pairs())
            .with_bars(
                "SPY",
                vec![
                    bar(1, dec!(100), dec!(101), dec!(1.2)),
                    bar(2, dec!(101), dec!(102), Decimal::ZERO),
                ],
            )
            .shared();
        let etf = Etf::new(port, "SPY").unwrap();
        assert_eq!(etf.name(), "SPDR S&P 500");
        assert_eq!(etf.total_assets(), dec!(500000000000));
        assert_eq!(etf.business_summary(), None);
        assert_eq!(etf.quote().bid_size, Some(dec!(800)));
        assert_eq!(etf.dividends().len(), 1);
        assert!(!etf.reinvests_dividends());
    }

    #[test]
    fn missing_total_assets_fails() {
        let pairs: Vec<_> = spy_pairs()
            .into_iter()
            .filter(|(k, _)| *k != "totalAssets")
            .collect();
        let port = StubPort::default()
            .with("SPY", &pairs)
            .with_bars("SPY", vec![])
            .shared();
        assert_eq!(
            Etf::new(port, "SPY").unwrap_err().kind(),
            ErrorKind::ParsingFailure
        );
    }

    #[test]
    fn rejects_equity_symbol() {
        let port = StubPort::default()
            .with("AAPL", &spot_pairs("AAPL", "EQUITY"))
            .shared();
        assert_eq!(
            Etf::new(port, "AAPL").unwrap_err().kind(),
            ErrorKind::SecurityTypeMismatch
        );
    }

    #[test]
    fn to_map_and_display() {
        let port = StubPort::default()
            .with("SPY", &spy_pairs())
            .with_bars("SPY", vec![])
            .shared();
        let etf = Etf::new(port, "SPY").unwrap();
        let map = etf.to_map();
        assert_eq!(map["short_name"], "SPDR S&P 500");
        assert_eq!(map["total_assets"], "500000000000");
        assert_eq!(map["bid_size"], "800");
        assert_eq!(map["business_summary"], "");
        assert_eq!(map["exchange"], "NMS");
        assert_eq!(etf.to_string(), "Ticker Symbol: SPY, Name: SPDR S&P 500");
    }
}
