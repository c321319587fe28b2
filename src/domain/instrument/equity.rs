//! Common stock.

use super::base::optional_entry;
use super::{BaseInstrument, BidAsk, Instrument, SpotFields};
use crate::domain::classification::Classification;
use crate::domain::error::{Result, TickerfolioError};
use crate::domain::fundamentals::{DataTable, Fundamentals};
use crate::domain::history::HistoryBar;
use crate::domain::period::{Duration, Interval};
use crate::domain::quote_record::QuoteRecord;
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::social_port::SocialPort;
use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

pub const NEWS_LIMIT: usize = 10;
pub const POST_LIMIT: usize = 20;

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CompanyProfile {
    pub name: Option<String>,
    pub address: Option<String>,
    pub business_summary: Option<String>,
    pub logo_url: Option<String>,
    pub sector: Option<String>,
    pub profit_margins: Option<Decimal>,
    pub country: Option<String>,
    pub website: Option<String>,
}

impl fmt::Display for CompanyProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        writeln!(f, "Company Name: {}", text(&self.name))?;
        writeln!(f, "Address: {}", text(&self.address))?;
        writeln!(f, "Summary: {}", text(&self.business_summary))?;
        writeln!(f, "Logo URL: {}", text(&self.logo_url))?;
        writeln!(f, "Country: {}", text(&self.country))?;
        writeln!(f, "Website: {}", text(&self.website))?;
        writeln!(f, "Industry Sector: {}", text(&self.sector))?;
        write!(f, "Profit Margins: {}", optional_entry(self.profit_margins))
    }
}

/// A dated corporate action amount: cash per share for dividends, ratio for splits.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CorporateAction {
    pub date: NaiveDate,
    pub amount: Decimal,
}

pub(crate) fn dividends_from(bars: &[HistoryBar]) -> Vec<CorporateAction> {
    bars.iter()
        .filter(|b| b.has_dividend())
        .map(|b| CorporateAction {
            date: b.date,
            amount: b.dividend,
        })
        .collect()
}

fn splits_from(bars: &[HistoryBar]) -> Vec<CorporateAction> {
    bars.iter()
        .filter(|b| b.has_split())
        .map(|b| CorporateAction {
            date: b.date,
            amount: b.split,
        })
        .collect()
}

#[derive(Debug)]
pub struct Equity {
    base: BaseInstrument,
    name: String,
    profile: CompanyProfile,
    market_cap: Decimal,
    pe_ratio: Option<Decimal>,
    peg_ratio: Option<Decimal>,
    quote: BidAsk,
    dividends: Vec<CorporateAction>,
    splits: Vec<CorporateAction>,
    news: OnceLock<Vec<String>>,
    posts: OnceLock<Vec<String>>,
}

impl Equity {
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
        base.ensure_kind(&[Classification::Equity])?;

        let profile = CompanyProfile {
            name: record.optional_text("longName"),
            address: record.optional_text("address1"),
            business_summary: record.optional_text("longBusinessSummary"),
            logo_url: record.optional_text("logo_url"),
            sector: record.optional_text("sector"),
            profit_margins: record.optional_decimal(symbol, "profitMargins")?,
            country: record.optional_text("country"),
            website: record.optional_text("website"),
        };
        let actions = base
            .port()
            .history(symbol, Duration::Max, Interval::Day1)?;

        Ok(Self {
            name: record.text(symbol, "shortName")?,
            market_cap: record.decimal(symbol, "marketCap")?,
            pe_ratio: record.optional_decimal(symbol, "trailingPE")?,
            peg_ratio: record.optional_decimal(symbol, "pegRatio")?,
            quote: BidAsk::from_record(&record, symbol)?,
            dividends: dividends_from(&actions),
            splits: splits_from(&actions),
            profile,
            base,
            news: OnceLock::new(),
            posts: OnceLock::new(),
        })
    }

    pub fn base(&self) -> &BaseInstrument {
        &self.base
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn profile(&self) -> &CompanyProfile {
        &self.profile
    }

    pub fn market_cap(&self) -> Decimal {
        self.market_cap
    }

    pub fn pe_ratio(&self) -> Option<Decimal> {
        self.pe_ratio
    }

    pub fn peg_ratio(&self) -> Option<Decimal> {
        self.peg_ratio
    }

    pub fn quote(&self) -> &BidAsk {
        &self.quote
    }

    pub fn dividends(&self) -> &[CorporateAction] {
        &self.dividends
    }

    pub fn splits(&self) -> &[CorporateAction] {
        &self.splits
    }

    /// Company profile rendered as labelled lines.
    pub fn company_summary(&self) -> String {
        self.profile.to_string()
    }

    /// Spot snapshot plus the stock's own fields.
    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        let mut map = self.base.to_map();
        map.extend([
            ("short_name", self.name.clone()),
            ("market_cap", self.market_cap.to_string()),
            ("pe_ratio", optional_entry(self.pe_ratio)),
            ("peg_ratio", optional_entry(self.peg_ratio)),
        ]);
        self.quote.extend_map(&mut map);
        map
    }

    /// Analyst upgrades and downgrades.
    pub fn industry_recommendations(&self) -> Result<DataTable> {
        self.fundamentals(Fundamentals::Recommendations)
    }

    pub fn financials(&self) -> Result<DataTable> {
        self.fundamentals(Fundamentals::Financials)
    }

    pub fn balance_sheet(&self) -> Result<DataTable> {
        self.fundamentals(Fundamentals::BalanceSheet)
    }

    pub fn cashflow(&self) -> Result<DataTable> {
        self.fundamentals(Fundamentals::Cashflow)
    }

    pub fn earnings(&self) -> Result<DataTable> {
        self.fundamentals(Fundamentals::Earnings)
    }

    /// Upcoming earnings and dividend dates.
    pub fn calendar(&self) -> Result<DataTable> {
        self.fundamentals(Fundamentals::Calendar)
    }

    pub fn major_holders(&self) -> Result<DataTable> {
        self.fundamentals(Fundamentals::MajorHolders)
    }

    pub fn institutional_holders(&self) -> Result<DataTable> {
        self.fundamentals(Fundamentals::InstitutionalHolders)
    }

    pub fn mutualfund_holders(&self) -> Result<DataTable> {
        self.fundamentals(Fundamentals::MutualFundHolders)
    }

    /// Fetched from the provider on every call.
    pub fn fundamentals(&self, table: Fundamentals) -> Result<DataTable> {
        let data = self.base.port().fundamentals(self.symbol(), table)?;
        debug!("Fetched {} ({} rows) for {}", table, data.len(), self.symbol());
        Ok(data)
    }

    /// News links, fetched on first success and reused afterwards.
    pub fn related_news(&self, social: &dyn SocialPort) -> Result<&[String]> {
        if let Some(links) = self.news.get() {
            return Ok(links);
        }
        let links = social
            .news_links(self.symbol(), NEWS_LIMIT)
            .map_err(|e| lookup_failure("news", self.symbol(), e))?;
        if links.is_empty() {
            return Err(lookup_failure(
                "news",
                self.symbol(),
                "no related news found",
            ));
        }
        debug!("Fetched {} news links for {}", links.len(), self.symbol());
        Ok(self.news.get_or_init(|| links))
    }

    /// Recent posts, fetched on first success and reused afterwards. An empty
    /// result is a success and is cached as such.
    pub fn tweets(&self, social: &dyn SocialPort) -> Result<&[String]> {
        if let Some(posts) = self.posts.get() {
            return Ok(posts);
        }
        let posts = social
            .posts(self.symbol(), POST_LIMIT)
            .map_err(|e| lookup_failure("posts", self.symbol(), e))?;
        debug!("Fetched {} posts for {}", posts.len(), self.symbol());
        Ok(self.posts.get_or_init(|| posts))
    }

    pub fn cached_tweets(&self) -> Option<&[String]> {
        self.posts.get().map(Vec::as_slice)
    }

    /// Mean sentiment over the cached posts. Requires a prior successful,
    /// non-empty [`Equity::tweets`] call.
    pub fn sentiment(&self, social: &dyn SocialPort) -> Result<Decimal> {
        let posts = match self.posts.get() {
            Some(posts) if !posts.is_empty() => posts,
            _ => {
                return Err(lookup_failure(
                    "sentiment",
                    self.symbol(),
                    "no posts cached; fetch tweets first",
                ));
            }
        };
        let mut total = Decimal::ZERO;
        for post in posts {
            total += social
                .sentiment_score(post)
                .map_err(|e| lookup_failure("sentiment", self.symbol(), e))?;
        }
        Ok(total / Decimal::from(posts.len()))
    }
}

fn lookup_failure(service: &str, symbol: &str, reason: impl ToString) -> TickerfolioError {
    let reason = reason.to_string();
    warn!("{service} lookup for {symbol} failed: {reason}");
    TickerfolioError::ExternalLookup {
        service: service.to_string(),
        symbol: symbol.to_string(),
        reason,
    }
}

impl fmt::Display for Equity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ticker Symbol: {}, Name: {}", self.symbol(), self.name)
    }
}

impl Instrument for Equity {
    fn symbol(&self) -> &str {
        self.base.symbol()
    }

    fn classification(&self) -> Classification {
        Classification::Equity
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

    fn reinvests_dividends(&self) -> bool {
        true
    }
}
