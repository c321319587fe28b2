//! File-backed market data provider.
//!
//! Layout under the base directory:
//!
//! ```text
//! quotes.csv              symbol,field,value
//! history/<SYMBOL>.csv    date,open,high,low,close,volume,dividend,split
//! fundamentals/<SYMBOL>/<table>.csv
//! ```
//!
//! `dividend` and `split` may be left blank or omitted. Fundamentals files
//! are named after [`Fundamentals::as_str`] and keep their own header row.

use crate::domain::error::{Result, TickerfolioError};
use crate::domain::fundamentals::{DataTable, Fundamentals};
use crate::domain::history::HistoryBar;
use crate::domain::period::{Duration, Interval};
use crate::domain::quote_record::{QuoteRecord, parse_decimal};
use crate::ports::market_data_port::MarketDataPort;
use chrono::{Datelike, NaiveDate, TimeDelta};
use log::debug;
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;

pub const QUOTES_FILE: &str = "quotes.csv";
pub const HISTORY_DIR: &str = "history";
pub const FUNDAMENTALS_DIR: &str = "fundamentals";

pub struct CsvMarketDataAdapter {
    base_path: PathBuf,
}

impl CsvMarketDataAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn history_path(&self, symbol: &str) -> PathBuf {
        self.base_path
            .join(HISTORY_DIR)
            .join(format!("{}.csv", symbol))
    }

    fn read_history(&self, symbol: &str) -> Result<Vec<HistoryBar>> {
        let path = self.history_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| {
            TickerfolioError::parsing(
                symbol,
                "history",
                format!("failed to read {}: {}", path.display(), e),
            )
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| {
                TickerfolioError::parsing(symbol, "history", format!("CSV parse error: {}", e))
            })?;

            let date_str = record
                .get(0)
                .ok_or_else(|| TickerfolioError::parsing(symbol, "date", "missing date column"))?;
            let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| {
                TickerfolioError::parsing(symbol, "date", format!("invalid date format: {}", e))
            })?;

            let column = |idx: usize, name: &str| -> Result<Decimal> {
                let raw = record.get(idx).ok_or_else(|| {
                    TickerfolioError::parsing(symbol, name, format!("missing {} column", name))
                })?;
                parse_decimal(raw).ok_or_else(|| {
                    TickerfolioError::parsing(
                        symbol,
                        name,
                        format!("invalid {} value: {}", name, raw),
                    )
                })
            };
            let optional = |idx: usize, name: &str| -> Result<Decimal> {
                match record.get(idx).map(str::trim) {
                    None | Some("") => Ok(Decimal::ZERO),
                    Some(_) => column(idx, name),
                }
            };

            bars.push(HistoryBar {
                date,
                open: column(1, "open")?,
                high: column(2, "high")?,
                low: column(3, "low")?,
                close: column(4, "close")?,
                volume: column(5, "volume")?,
                dividend: optional(6, "dividend")?,
                split: optional(7, "split")?,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

impl MarketDataPort for CsvMarketDataAdapter {
    fn quote_record(&self, symbol: &str) -> Result<QuoteRecord> {
        let path = self.base_path.join(QUOTES_FILE);
        let content = fs::read_to_string(&path)?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut quote = QuoteRecord::new();
        for result in rdr.records() {
            let record = result.map_err(|e| {
                TickerfolioError::parsing(symbol, "quote", format!("CSV parse error: {}", e))
            })?;
            if record.get(0).map(str::trim) != Some(symbol) {
                continue;
            }
            if let (Some(field), Some(value)) = (record.get(1), record.get(2)) {
                quote.insert(field.trim(), value.trim());
            }
        }

        if quote.is_empty() {
            return Err(TickerfolioError::InvalidSymbol {
                symbol: symbol.to_string(),
                reason: format!("not listed in {}", path.display()),
            });
        }
        Ok(quote)
    }

    fn history(
        &self,
        symbol: &str,
        duration: Duration,
        interval: Interval,
    ) -> Result<Vec<HistoryBar>> {
        let bars = trim_to_duration(self.read_history(symbol)?, duration);
        let bars = resample(bars, interval);
        debug!(
            "Loaded {} {} bars for {} over {}",
            bars.len(),
            interval,
            symbol,
            duration
        );
        Ok(bars)
    }

    fn fundamentals(&self, symbol: &str, table: Fundamentals) -> Result<DataTable> {
        let path = self
            .base_path
            .join(FUNDAMENTALS_DIR)
            .join(symbol)
            .join(format!("{}.csv", table.as_str()));
        let content = fs::read_to_string(&path).map_err(|e| TickerfolioError::ExternalLookup {
            service: table.to_string(),
            symbol: symbol.to_string(),
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());
        let csv_error = |e: csv::Error| {
            TickerfolioError::parsing(symbol, table.as_str(), format!("CSV parse error: {}", e))
        };
        let headers = rdr.headers().map_err(csv_error)?;
        let mut data = DataTable::new(headers.iter().map(str::trim));
        for result in rdr.records() {
            let record = result.map_err(csv_error)?;
            data.push_row(record.iter().map(str::trim));
        }
        debug!("Loaded {} {} rows for {}", data.len(), table, symbol);
        Ok(data)
    }
}

/// Keeps rows inside `duration`, measured back from the latest row.
pub fn trim_to_duration(bars: Vec<HistoryBar>, duration: Duration) -> Vec<HistoryBar> {
    let Some(latest) = bars.last().map(|b| b.date) else {
        return bars;
    };
    let cutoff = match duration {
        Duration::Max => return bars,
        Duration::YearToDate => NaiveDate::from_ymd_opt(latest.year(), 1, 1),
        other => other
            .lookback_days()
            .and_then(|days| latest.checked_sub_signed(TimeDelta::days(days - 1))),
    };
    match cutoff {
        Some(cutoff) => bars.into_iter().filter(|b| b.date >= cutoff).collect(),
        None => bars,
    }
}

/// Aggregates daily rows into `interval` buckets. Intraday and daily
/// intervals return the rows unchanged.
pub fn resample(bars: Vec<HistoryBar>, interval: Interval) -> Vec<HistoryBar> {
    if interval.is_intraday() || interval == Interval::Day1 {
        return bars;
    }

    let mut out: Vec<HistoryBar> = Vec::new();
    let mut current_key = None;
    for (idx, bar) in bars.into_iter().enumerate() {
        let key = bucket_key(interval, idx, bar.date);
        match out.last_mut() {
            Some(acc) if current_key == Some(key) => merge(acc, &bar),
            _ => {
                current_key = Some(key);
                out.push(bar);
            }
        }
    }
    out
}

fn bucket_key(interval: Interval, idx: usize, date: NaiveDate) -> (i32, u32) {
    match interval {
        Interval::Day5 => (0, (idx / 5) as u32),
        Interval::Week1 => {
            let week = date.iso_week();
            (week.year(), week.week())
        }
        Interval::Month3 => (date.year(), date.month0() / 3),
        _ => (date.year(), date.month()),
    }
}

fn merge(acc: &mut HistoryBar, bar: &HistoryBar) {
    acc.high = acc.high.max(bar.high);
    acc.low = acc.low.min(bar.low);
    acc.close = bar.close;
    acc.volume += bar.volume;
    acc.dividend += bar.dividend;
    if bar.has_split() {
        acc.split = if acc.has_split() {
            acc.split * bar.split
        } else {
            bar.split
        };
    }
}
