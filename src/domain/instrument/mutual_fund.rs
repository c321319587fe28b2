//! Open-end mutual funds.

use super::base::optional_entry;
use super::{BaseInstrument, Instrument, SpotFields};
use crate::domain::classification::Classification;
use crate::domain::error::Result;
use crate::domain::quote_record::QuoteRecord;
use crate::ports::market_data_port::MarketDataPort;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Provider-reported fund statistics. Coverage varies by fund family, so
/// every figure is optional.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FundStats {
    pub expense_ratio: Option<Decimal>,
    pub holdings_turnover: Option<Decimal>,
    pub total_assets: Option<Decimal>,
    pub overall_rating: Option<Decimal>,
    pub risk_rating: Option<Decimal>,
    pub yield_rate: Option<Decimal>,
    pub ytd_return: Option<Decimal>,
}

#[derive(Debug)]
pub struct MutualFund {
    base: BaseInstrument,
    name: String,
    business_summary: Option<String>,
    stats: FundStats,
}

impl MutualFund {
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
        base.ensure_kind(&[Classification::MutualFund])?;

        let stats = FundStats {
            expense_ratio: record.optional_decimal(symbol, "annualReportExpenseRatio")?,
            holdings_turnover: record.optional_decimal(symbol, "annualHoldingsTurnover")?,
            total_assets: record.optional_decimal(symbol, "totalAssets")?,
            overall_rating: record.optional_decimal(symbol, "morningStarOverallRating")?,
            risk_rating: record.optional_decimal(symbol, "morningStarRiskRating")?,
            yield_rate: record.optional_decimal(symbol, "yield")?,
            ytd_return: record.optional_decimal(symbol, "ytdReturn")?,
        };

        Ok(Self {
            name: record.text(symbol, "shortName")?,
            business_summary: record.optional_text("longBusinessSummary"),
            stats,
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

    pub fn stats(&self) -> &FundStats {
        &self.stats
    }

    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        let st = &self.stats;
        let mut map = self.base.to_map();
        map.extend([
            ("short_name", self.name.clone()),
            (
                "business_summary",
                self.business_summary.clone().unwrap_or_default(),
            ),
            ("expense_ratio", optional_entry(st.expense_ratio)),
            ("holdings_turnover", optional_entry(st.holdings_turnover)),
            ("total_assets", optional_entry(st.total_assets)),
            ("overall_rating", optional_entry(st.overall_rating)),
            ("risk_rating", optional_entry(st.risk_rating)),
            ("yield", optional_entry(st.yield_rate)),
            ("ytd_return", optional_entry(st.ytd_return)),
        ]);
        map
    }
}

impl fmt::Display for MutualFund {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ticker Symbol: {}, Name: {}", self.symbol(), self.name)
    }
}

impl Instrument for MutualFund {
    fn symbol(&self) -> &str {
        self.base.symbol()
    }

    fn classification(&self) -> Classification {
        Classification::MutualFund
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
