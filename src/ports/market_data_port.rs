//! Market-data provider port.

use crate::domain::error::{Result, TickerfolioError};
use crate::domain::fundamentals::{DataTable, Fundamentals};
use crate::domain::history::HistoryBar;
use crate::domain::period::{Duration, Interval};
use crate::domain::quote_record::QuoteRecord;

/// Blocking access to an external quote provider.
///
/// Implementations make at most one upstream request per call and apply
/// their own retry policy, if any. Failures map onto the crate error:
/// an unknown symbol is `InvalidSymbol`, an unreadable history is `Parsing`.
pub trait MarketDataPort: Send + Sync {
    /// The provider's key/value snapshot for a symbol, including `quoteType`.
    fn quote_record(&self, symbol: &str) -> Result<QuoteRecord>;

    /// History rows in ascending date order for the given window and sampling.
    fn history(&self, symbol: &str, duration: Duration, interval: Interval)
    -> Result<Vec<HistoryBar>>;

    /// A fundamentals table for a stock. Sources without fundamentals report
    /// every table as an `ExternalLookup` failure.
    fn fundamentals(&self, symbol: &str, table: Fundamentals) -> Result<DataTable> {
        Err(TickerfolioError::ExternalLookup {
            service: table.to_string(),
            symbol: symbol.to_string(),
            reason: "not offered by this market-data source".to_string(),
        })
    }
}
