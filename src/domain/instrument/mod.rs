//! Instruments: the shared capability set and its concrete variants.
//!
//! Every variant composes a [`BaseInstrument`] (or, for the fallback, a bare
//! symbol + price) and implements [`Instrument`]. The indicator pipeline and
//! return calculations are default methods on the trait, so each variant gets
//! them for free once it can name its symbol and provider.

pub mod base;
pub mod currency;
pub mod equity;
pub mod etf;
pub mod factory;
pub mod generic;
pub mod mutual_fund;
pub mod treasury;

pub use base::{BaseInstrument, BidAsk, SpotFields};
pub use currency::Currency;
pub use equity::{CompanyProfile, CorporateAction, Equity};
pub use etf::Etf;
pub use generic::GenericInstrument;
pub use mutual_fund::{FundStats, MutualFund};
pub use treasury::TreasuryInstrument;

use crate::domain::classification::Classification;
use crate::domain::error::{Result, TickerfolioError};
use crate::domain::history::{self, Column, HistoryBar};
use crate::domain::indicator::{
    IndicatorSeries, IndicatorType, ad, bollinger, bop, cci, clamp_timeperiod, linreg, roc, rsi,
    sma, stddev,
};
use crate::domain::period::{Duration, Interval, Multiplier};
use crate::ports::market_data_port::MarketDataPort;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;

/// History sampling used by every indicator.
pub const INDICATOR_INTERVAL: Interval = Interval::Day1;

pub const DEFAULT_RETURNS_DURATION: Duration = Duration::Year1;
pub const DEFAULT_RETURNS_INTERVAL: Interval = Interval::Month1;

pub trait Instrument: fmt::Debug + Send + Sync {
    fn symbol(&self) -> &str;

    fn classification(&self) -> Classification;

    /// Snapshot price captured at construction.
    fn price(&self) -> Decimal;

    /// Full spot snapshot; `None` only for the generic fallback.
    fn spot(&self) -> Option<&SpotFields>;

    fn market_data(&self) -> &dyn MarketDataPort;

    /// Whether [`Instrument::returns`] credits dividends paid in the window.
    fn reinvests_dividends(&self) -> bool {
        false
    }

    fn historical_data(&self, duration: Duration, interval: Interval) -> Result<Vec<HistoryBar>> {
        self.market_data().history(self.symbol(), duration, interval)
    }

    /// History restricted to an inclusive date window.
    fn download_data(
        &self,
        duration: Duration,
        interval: Interval,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<HistoryBar>> {
        let bars = self.historical_data(duration, interval)?;
        Ok(history::within(bars, start, end))
    }

    fn moving_average(&self, duration: Duration, timeperiod: usize) -> Result<IndicatorSeries> {
        let period = clamp_timeperiod(timeperiod);
        let bars = self.historical_data(duration, INDICATOR_INTERVAL)?;
        let out = sma::sma(&history::column(&bars, Column::Close), period);
        Ok(IndicatorSeries::from_simple(IndicatorType::Sma(period), &dates(&bars), out))
    }

    fn bollinger_bands(
        &self,
        duration: Duration,
        timeperiod: usize,
        dev_up: Multiplier,
        dev_down: Multiplier,
    ) -> Result<IndicatorSeries> {
        let period = clamp_timeperiod(timeperiod);
        let bars = self.historical_data(duration, INDICATOR_INTERVAL)?;
        let bands = bollinger::bollinger(
            &history::column(&bars, Column::Close),
            period,
            dev_up.value(),
            dev_down.value(),
        );
        let ty = IndicatorType::Bollinger {
            period,
            dev_up,
            dev_down,
        };
        Ok(IndicatorSeries::from_bands(ty, &dates(&bars), bands))
    }

    fn rate_of_change_ratio(
        &self,
        duration: Duration,
        timeperiod: usize,
    ) -> Result<IndicatorSeries> {
        let period = clamp_timeperiod(timeperiod);
        let bars = self.historical_data(duration, INDICATOR_INTERVAL)?;
        let out = roc::rocr(&history::column(&bars, Column::Close), period);
        Ok(IndicatorSeries::from_simple(IndicatorType::Rocr(period), &dates(&bars), out))
    }

    fn relative_strength_index(
        &self,
        duration: Duration,
        timeperiod: usize,
    ) -> Result<IndicatorSeries> {
        let period = clamp_timeperiod(timeperiod);
        let bars = self.historical_data(duration, INDICATOR_INTERVAL)?;
        let out = rsi::rsi(&history::column(&bars, Column::Close), period);
        Ok(IndicatorSeries::from_simple(IndicatorType::Rsi(period), &dates(&bars), out))
    }

    fn balance_of_power(&self, duration: Duration) -> Result<IndicatorSeries> {
        let bars = self.historical_data(duration, INDICATOR_INTERVAL)?;
        let out = bop::bop(
            &history::column(&bars, Column::Open),
            &history::column(&bars, Column::High),
            &history::column(&bars, Column::Low),
            &history::column(&bars, Column::Close),
        );
        Ok(IndicatorSeries::from_simple(IndicatorType::Bop, &dates(&bars), out))
    }

    fn commodity_channel_index(
        &self,
        duration: Duration,
        timeperiod: usize,
    ) -> Result<IndicatorSeries> {
        let period = clamp_timeperiod(timeperiod);
        let bars = self.historical_data(duration, INDICATOR_INTERVAL)?;
        let out = cci::cci(
            &history::column(&bars, Column::High),
            &history::column(&bars, Column::Low),
            &history::column(&bars, Column::Close),
            period,
        );
        Ok(IndicatorSeries::from_simple(IndicatorType::Cci(period), &dates(&bars), out))
    }

    fn accumulation_distribution(&self, duration: Duration) -> Result<IndicatorSeries> {
        let bars = self.historical_data(duration, INDICATOR_INTERVAL)?;
        let out = ad::ad(
            &history::column(&bars, Column::High),
            &history::column(&bars, Column::Low),
            &history::column(&bars, Column::Close),
            &history::column(&bars, Column::Volume),
        );
        Ok(IndicatorSeries::from_simple(IndicatorType::Ad, &dates(&bars), out))
    }

    fn linear_regression(&self, duration: Duration, timeperiod: usize) -> Result<IndicatorSeries> {
        let period = clamp_timeperiod(timeperiod);
        let bars = self.historical_data(duration, INDICATOR_INTERVAL)?;
        let out = linreg::linear_regression(&history::column(&bars, Column::Close), period);
        Ok(IndicatorSeries::from_simple(
            IndicatorType::LinearReg(period),
            &dates(&bars),
            out,
        ))
    }

    fn standard_deviation(
        &self,
        duration: Duration,
        timeperiod: usize,
        dev: Multiplier,
    ) -> Result<IndicatorSeries> {
        let period = clamp_timeperiod(timeperiod);
        let bars = self.historical_data(duration, INDICATOR_INTERVAL)?;
        let out = stddev::stddev(&history::column(&bars, Column::Close), period, dev.value());
        Ok(IndicatorSeries::from_simple(
            IndicatorType::Stddev { period, dev },
            &dates(&bars),
            out,
        ))
    }

    fn variance(
        &self,
        duration: Duration,
        timeperiod: usize,
        dev: Multiplier,
    ) -> Result<IndicatorSeries> {
        let period = clamp_timeperiod(timeperiod);
        let bars = self.historical_data(duration, INDICATOR_INTERVAL)?;
        let out = stddev::variance(&history::column(&bars, Column::Close), period, dev.value());
        Ok(IndicatorSeries::from_simple(
            IndicatorType::Var { period, dev },
            &dates(&bars),
            out,
        ))
    }

    fn time_series_forecast(
        &self,
        duration: Duration,
        timeperiod: usize,
    ) -> Result<IndicatorSeries> {
        let period = clamp_timeperiod(timeperiod);
        let bars = self.historical_data(duration, INDICATOR_INTERVAL)?;
        let out = linreg::time_series_forecast(&history::column(&bars, Column::Close), period);
        Ok(IndicatorSeries::from_simple(IndicatorType::Tsf(period), &dates(&bars), out))
    }

    /// Close at the end of the window minus open at its start, plus
    /// `dividend × mid price` per paying row when dividends are reinvested.
    fn returns(&self, period: Duration, interval: Interval) -> Result<Decimal> {
        let bars = self.historical_data(period, interval)?;
        let (total, _) =
            total_return(self.symbol(), &bars, self.reinvests_dividends(), period, interval)?;
        Ok(total)
    }

    /// [`Instrument::returns`] as a percentage of the opening price.
    fn returns_percentage(&self, period: Duration, interval: Interval) -> Result<Decimal> {
        let bars = self.historical_data(period, interval)?;
        let (total, open) =
            total_return(self.symbol(), &bars, self.reinvests_dividends(), period, interval)?;
        if open.is_zero() {
            return Err(TickerfolioError::parsing(
                self.symbol(),
                "open",
                "opening price is zero",
            ));
        }
        total
            .checked_div(open)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or_else(|| {
                TickerfolioError::parsing(self.symbol(), "open", "return percentage overflows")
            })
    }
}

fn dates(bars: &[HistoryBar]) -> Vec<NaiveDate> {
    bars.iter().map(|b| b.date).collect()
}

/// Returns `(total_return, starting_open)`.
fn total_return(
    symbol: &str,
    bars: &[HistoryBar],
    with_dividends: bool,
    duration: Duration,
    interval: Interval,
) -> Result<(Decimal, Decimal)> {
    let (Some(first), Some(last)) = (bars.first(), bars.last()) else {
        return Err(TickerfolioError::NoHistory {
            symbol: symbol.to_string(),
            duration,
            interval,
        });
    };

    let overflow = || TickerfolioError::parsing(symbol, "history", "return overflows");
    let mut total = last.close.checked_sub(first.open).ok_or_else(overflow)?;
    if with_dividends {
        for bar in bars.iter().filter(|b| b.has_dividend()) {
            let reinvested = bar
                .open
                .checked_add(bar.close)
                .and_then(|sum| bar.dividend.checked_mul(sum / Decimal::TWO))
                .ok_or_else(overflow)?;
            total = total.checked_add(reinvested).ok_or_else(overflow)?;
        }
    }
    Ok((total, first.open))
}

/// Tagged union over every concrete variant; what the factory returns and
/// what a portfolio stores.
#[derive(Debug)]
pub enum AnyInstrument {
    Equity(Equity),
    Etf(Etf),
    MutualFund(MutualFund),
    Treasury(TreasuryInstrument),
    Currency(Currency),
    Generic(GenericInstrument),
}

impl AnyInstrument {
    fn inner(&self) -> &dyn Instrument {
        match self {
            AnyInstrument::Equity(i) => i,
            AnyInstrument::Etf(i) => i,
            AnyInstrument::MutualFund(i) => i,
            AnyInstrument::Treasury(i) => i,
            AnyInstrument::Currency(i) => i,
            AnyInstrument::Generic(i) => i,
        }
    }

    pub fn as_equity(&self) -> Option<&Equity> {
        match self {
            AnyInstrument::Equity(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_etf(&self) -> Option<&Etf> {
        match self {
            AnyInstrument::Etf(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_mutual_fund(&self) -> Option<&MutualFund> {
        match self {
            AnyInstrument::MutualFund(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_treasury(&self) -> Option<&TreasuryInstrument> {
        match self {
            AnyInstrument::Treasury(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_currency(&self) -> Option<&Currency> {
        match self {
            AnyInstrument::Currency(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_generic(&self) -> Option<&GenericInstrument> {
        match self {
            AnyInstrument::Generic(i) => Some(i),
            _ => None,
        }
    }

    /// The variant's own key/value projection.
    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        match self {
            AnyInstrument::Equity(i) => i.to_map(),
            AnyInstrument::Etf(i) => i.to_map(),
            AnyInstrument::MutualFund(i) => i.to_map(),
            AnyInstrument::Treasury(i) => i.to_map(),
            AnyInstrument::Currency(i) => i.to_map(),
            AnyInstrument::Generic(i) => i.to_map(),
        }
    }
}

impl fmt::Display for AnyInstrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyInstrument::Equity(i) => fmt::Display::fmt(i, f),
            AnyInstrument::Etf(i) => fmt::Display::fmt(i, f),
            AnyInstrument::MutualFund(i) => fmt::Display::fmt(i, f),
            AnyInstrument::Treasury(i) => fmt::Display::fmt(i, f),
            AnyInstrument::Currency(i) => fmt::Display::fmt(i, f),
            AnyInstrument::Generic(i) => fmt::Display::fmt(i, f),
        }
    }
}

impl Instrument for AnyInstrument {
    fn symbol(&self) -> &str {
        self.inner().symbol()
    }

    fn classification(&self) -> Classification {
        self.inner().classification()
    }

    fn price(&self) -> Decimal {
        self.inner().price()
    }

    fn spot(&self) -> Option<&SpotFields> {
        self.inner().spot()
    }

    fn market_data(&self) -> &dyn MarketDataPort {
        self.inner().market_data()
    }

    fn reinvests_dividends(&self) -> bool {
        self.inner().reinvests_dividends()
    }
}
