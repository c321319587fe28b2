#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tickerfolio::domain::error::{Result, TickerfolioError};
pub use tickerfolio::domain::fundamentals::{DataTable, Fundamentals};
pub use tickerfolio::domain::history::HistoryBar;
use tickerfolio::domain::period::{Duration, Interval};
use tickerfolio::domain::quote_record::QuoteRecord;
use tickerfolio::ports::market_data_port::MarketDataPort;
use tickerfolio::ports::social_port::SocialPort;

pub struct MockMarketDataPort {
    pub quotes: HashMap<String, QuoteRecord>,
    pub bars: HashMap<String, Vec<HistoryBar>>,
    pub errors: HashMap<String, String>,
    pub tables: HashMap<(String, Fundamentals), DataTable>,
    pub quote_calls: AtomicUsize,
    pub history_calls: AtomicUsize,
}

impl MockMarketDataPort {
    pub fn new() -> Self {
        Self {
            quotes: HashMap::new(),
            bars: HashMap::new(),
            errors: HashMap::new(),
            tables: HashMap::new(),
            quote_calls: AtomicUsize::new(0),
            history_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_quote(mut self, symbol: &str, pairs: &[(&str, &str)]) -> Self {
        self.quotes.insert(
            symbol.to_string(),
            QuoteRecord::from_pairs(pairs.iter().copied()),
        );
        self
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<HistoryBar>) -> Self {
        self.bars.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_table(mut self, symbol: &str, kind: Fundamentals, table: DataTable) -> Self {
        self.tables.insert((symbol.to_string(), kind), table);
        self
    }

    /// History requests for `symbol` fail with a parsing error.
    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }

    pub fn quote_calls(&self) -> usize {
        self.quote_calls.load(Ordering::SeqCst)
    }
}

impl MarketDataPort for MockMarketDataPort {
    fn quote_record(&self, symbol: &str) -> Result<QuoteRecord> {
        self.quote_calls.fetch_add(1, Ordering::SeqCst);
        self.quotes
            .get(symbol)
            .cloned()
            .ok_or_else(|| TickerfolioError::InvalidSymbol {
                symbol: symbol.to_string(),
                reason: "no quote".to_string(),
            })
    }

    fn history(
        &self,
        symbol: &str,
        _duration: Duration,
        _interval: Interval,
    ) -> Result<Vec<HistoryBar>> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = self.errors.get(symbol) {
            return Err(TickerfolioError::Parsing {
                symbol: symbol.to_string(),
                field: "history".to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self.bars.get(symbol).cloned().unwrap_or_default())
    }

    fn fundamentals(&self, symbol: &str, table: Fundamentals) -> Result<DataTable> {
        self.tables
            .get(&(symbol.to_string(), table))
            .cloned()
            .ok_or_else(|| TickerfolioError::ExternalLookup {
                service: table.to_string(),
                symbol: symbol.to_string(),
                reason: "not published".to_string(),
            })
    }
}

/// Raw `(field, value)` pairs of a quote response.
pub type QuoteFields = Vec<(&'static str, &'static str)>;

/// Spot fields every priced instrument needs.
pub fn spot_quote(
    symbol: &'static str,
    quote_type: &'static str,
    price: &'static str,
) -> QuoteFields {
    vec![
        ("quoteType", quote_type),
        ("symbol", symbol),
        ("regularMarketPrice", price),
        ("regularMarketVolume", "1000000"),
        ("regularMarketOpen", price),
        ("regularMarketPreviousClose", price),
        ("regularMarketDayHigh", price),
        ("regularMarketDayLow", price),
        ("exchange", "CCC"),
    ]
}

pub fn equity_quote(symbol: &'static str, price: &'static str) -> QuoteFields {
    let mut pairs = spot_quote(symbol, "EQUITY", price);
    pairs.extend([("shortName", symbol), ("marketCap", "1000000000")]);
    pairs
}

pub fn etf_quote(symbol: &'static str, price: &'static str) -> QuoteFields {
    let mut pairs = spot_quote(symbol, "ETF", price);
    pairs.extend([("shortName", symbol), ("totalAssets", "500000000")]);
    pairs
}

pub fn crypto_quote(symbol: &'static str, name: &'static str, price: &'static str) -> QuoteFields {
    let mut pairs = spot_quote(symbol, "CRYPTOCURRENCY", price);
    pairs.push(("shortName", name));
    pairs
}

pub fn fx_quote(symbol: &'static str, pair: &'static str, price: &'static str) -> QuoteFields {
    let mut pairs = spot_quote(symbol, "CURRENCY", price);
    pairs.push(("shortName", pair));
    pairs
}

/// The port most integration tests share.
pub fn sample_port() -> MockMarketDataPort {
    MockMarketDataPort::new()
        .with_quote("AAPL", &equity_quote("AAPL", "190"))
        .with_bars("AAPL", ramp(30))
        .with_quote("SPY", &etf_quote("SPY", "500"))
        .with_bars("SPY", ramp(30))
        .with_quote("BTC-USD", &crypto_quote("BTC-USD", "Bitcoin USD", "64000"))
        .with_bars("BTC-USD", ramp(30))
        .with_quote("EURUSD=X", &fx_quote("EURUSD=X", "EUR/USD", "1.08"))
}

pub fn shared(port: MockMarketDataPort) -> Arc<dyn MarketDataPort> {
    Arc::new(port)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bar(date: NaiveDate, open: Decimal, close: Decimal) -> HistoryBar {
    HistoryBar {
        date,
        open,
        high: open.max(close),
        low: open.min(close),
        close,
        volume: Decimal::from(10_000),
        dividend: Decimal::ZERO,
        split: Decimal::ZERO,
    }
}

/// `n` daily bars closing at 101, 102, ... from 2024-03-01.
pub fn ramp(n: i64) -> Vec<HistoryBar> {
    (0..n)
        .map(|i| {
            let close = Decimal::from(101 + i);
            make_bar(
                date(2024, 3, 1) + chrono::TimeDelta::days(i),
                close - Decimal::ONE,
                close,
            )
        })
        .collect()
}

pub struct MockSocialPort {
    pub news: Vec<String>,
    pub posts: Vec<String>,
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl MockSocialPort {
    pub fn new(news: &[&str], posts: &[&str]) -> Self {
        Self {
            news: news.iter().map(|s| s.to_string()).collect(),
            posts: posts.iter().map(|s| s.to_string()).collect(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(&[], &[])
        }
    }
}

impl SocialPort for MockSocialPort {
    fn news_links(&self, symbol: &str, limit: usize) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(TickerfolioError::ExternalLookup {
                service: "news".to_string(),
                symbol: symbol.to_string(),
                reason: "offline".to_string(),
            });
        }
        Ok(self.news.iter().take(limit).cloned().collect())
    }

    fn posts(&self, symbol: &str, limit: usize) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(TickerfolioError::ExternalLookup {
                service: "posts".to_string(),
                symbol: symbol.to_string(),
                reason: "offline".to_string(),
            });
        }
        Ok(self.posts.iter().take(limit).cloned().collect())
    }

    fn sentiment_score(&self, text: &str) -> Result<Decimal> {
        let score = if text.contains("bull") {
            Decimal::ONE
        } else if text.contains("bear") {
            Decimal::NEGATIVE_ONE
        } else {
            Decimal::ZERO
        };
        Ok(score)
    }
}
