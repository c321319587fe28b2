//! Treasury yields. Providers list these as indices.

use super::{BaseInstrument, Instrument, SpotFields};
use crate::domain::classification::Classification;
use crate::domain::error::Result;
use crate::domain::quote_record::QuoteRecord;
use crate::ports::market_data_port::MarketDataPort;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug)]
pub struct TreasuryInstrument {
    base: BaseInstrument,
    name: String,
    max_age: Decimal,
}

impl TreasuryInstrument {
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
        base.ensure_kind(&[Classification::TreasuryInstrument])?;
        Ok(Self {
            name: record.text(symbol, "shortName")?,
            max_age: record.decimal(symbol, "maxAge")?,
            base,
        })
    }

    pub fn base(&self) -> &BaseInstrument {
        &self.base
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Age of the quote as reported by the provider.
    pub fn max_age(&self) -> Decimal {
        self.max_age
    }

    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        let mut map = self.base.to_map();
        map.insert("short_name", self.name.clone());
        map.insert("max_age", self.max_age.to_string());
        map
    }
}

impl fmt::Display for TreasuryInstrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ticker Symbol: {}, Name: {}", self.symbol(), self.name)
    }
}

impl Instrument for TreasuryInstrument {
    fn symbol(&self) -> &str {
        self.base.symbol()
    }

    fn classification(&self) -> Classification {
        Classification::TreasuryInstrument
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
    use rust_decimal_macros::dec;

    #[test]
    fn ingests_treasury_fields() {
        let mut pairs = spot_pairs("^TNX", "INDEX");
        pairs.extend([("shortName", "Treasury Yield 10 Years"), ("maxAge", "1")]);
        let port = StubPort::default().with("^TNX", &pairs).shared();
        let t = TreasuryInstrument::new(port, "^TNX").unwrap();
        assert_eq!(t.name(), "Treasury Yield 10 Years");
        assert_eq!(t.max_age(), dec!(1));
        assert_eq!(t.price(), dec!(100.5));
    }

    #[test]
    fn missing_max_age_fails() {
        let mut pairs = spot_pairs("^TNX", "INDEX");
        pairs.push(("shortName", "Treasury Yield 10 Years"));
        let port = StubPort::default().with("^TNX", &pairs).shared();
        assert!(TreasuryInstrument::new(port, "^TNX").is_err());
    }

    #[test]
    fn to_map_and_display() {
        let mut pairs = spot_pairs("^TNX", "INDEX");
        pairs.extend([("shortName", "Treasury Yield 10 Years"), ("maxAge", "1")]);
        let port = StubPort::default().with("^TNX", &pairs).shared();
        let t = TreasuryInstrument::new(port, "^TNX").unwrap();
        let map = t.to_map();
        assert_eq!(map["max_age"], "1");
        assert_eq!(map["quote_type"], "INDEX");
        assert_eq!(map.len(), 11);
        assert_eq!(
            t.to_string(),
            "Ticker Symbol: ^TNX, Name: Treasury Yield 10 Years"
        );
    }
}
