//! Best-effort social and news lookups.
//!
//! Nothing in portfolio valuation depends on this port; errors surface only
//! from the equity lookups that call it.

use crate::domain::error::Result;
use rust_decimal::Decimal;

pub trait SocialPort {
    /// Links to news articles mentioning the symbol.
    fn news_links(&self, symbol: &str, limit: usize) -> Result<Vec<String>>;

    /// Recent public posts mentioning the symbol.
    fn posts(&self, symbol: &str, limit: usize) -> Result<Vec<String>>;

    /// Sentiment of a single text in `[-1, 1]`.
    fn sentiment_score(&self, text: &str) -> Result<Decimal>;
}
