//! Fiat and crypto currency pairs.

use super::base::optional_entry;
use super::{BaseInstrument, BidAsk, Instrument, SpotFields};
use crate::domain::classification::Classification;
use crate::domain::error::{Result, TickerfolioError};
use crate::domain::quote_record::QuoteRecord;
use crate::ports::market_data_port::MarketDataPort;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug)]
pub struct Currency {
    base: BaseInstrument,
    kind: Classification,
    name: String,
    short_name: String,
    base_currency: String,
    quote_currency: String,
    quote: BidAsk,
    circulating_supply: Option<Decimal>,
}

/// Splits a provider pair name into `(base, quote)`.
///
/// `"USD/JPY"` gives `("USD", "JPY")`; `"Bitcoin USD"` gives `("Bitcoin", "USD")`.
/// Both forms are read base first. Providers that name pairs with a space are
/// normalised to the slash order here rather than taken as quote first.
pub fn split_pair(short_name: &str) -> Option<(String, String)> {
    let (base, quote) = short_name
        .split_once('/')
        .or_else(|| short_name.trim().split_once(' '))?;
    let (base, quote) = (base.trim(), quote.trim());
    if base.is_empty() || quote.is_empty() {
        return None;
    }
    Some((base.to_string(), quote.to_string()))
}

impl Currency {
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
        base.ensure_kind(&[Classification::Currency, Classification::Cryptocurrency])?;

        let short_name = record.text(symbol, "shortName")?;
        let (base_currency, quote_currency) = split_pair(&short_name).ok_or_else(|| {
            TickerfolioError::parsing(
                symbol,
                "shortName",
                format!("cannot split pair from '{short_name}'"),
            )
        })?;

        Ok(Self {
            kind: base.classification(),
            name: record
                .optional_text("name")
                .unwrap_or_else(|| short_name.clone()),
            quote: BidAsk::from_record(&record, symbol)?,
            circulating_supply: record.optional_decimal(symbol, "circulatingSupply")?,
            short_name,
            base_currency,
            quote_currency,
            base,
        })
    }

    pub fn base(&self) -> &BaseInstrument {
        &self.base
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    pub fn quote_currency(&self) -> &str {
        &self.quote_currency
    }

    pub fn quote(&self) -> &BidAsk {
        &self.quote
    }

    /// Only reported for cryptocurrencies.
    pub fn circulating_supply(&self) -> Option<Decimal> {
        self.circulating_supply
    }

    pub fn is_crypto(&self) -> bool {
        self.kind == Classification::Cryptocurrency
    }

    /// Spot snapshot plus the pair's own fields.
    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        let mut map = self.base.to_map();
        map.extend([
            ("name", self.name.clone()),
            ("short_name", self.short_name.clone()),
            ("base_currency", self.base_currency.clone()),
            ("quote_currency", self.quote_currency.clone()),
            ("circulating_supply", optional_entry(self.circulating_supply)),
        ]);
        self.quote.extend_map(&mut map);
        map
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ticker Symbol: {}, Name: {}, Short Name: {}",
            self.symbol(),
            self.name,
            self.short_name
        )
    }
}

impl Instrument for Currency {
    fn symbol(&self) -> &str {
        self.base.symbol()
    }

    fn classification(&self) -> Classification {
        self.kind
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
