//! Historical OHLCV rows with corporate actions.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HistoryBar {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    /// Cash dividend paid on this date, zero when none.
    pub dividend: Decimal,
    /// Split ratio effective on this date, zero when none.
    pub split: Decimal,
}

impl HistoryBar {
    /// (open + close) / 2
    pub fn mid_price(&self) -> Decimal {
        (self.open + self.close) / Decimal::TWO
    }

    pub fn has_dividend(&self) -> bool {
        self.dividend > Decimal::ZERO
    }

    pub fn has_split(&self) -> bool {
        self.split > Decimal::ZERO
    }
}

/// Which column of a history to feed into an indicator kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Open,
    High,
    Low,
    Close,
    Volume,
}

/// Projects one column as `f64`, preserving row alignment.
pub fn column(bars: &[HistoryBar], col: Column) -> Vec<f64> {
    bars.iter()
        .map(|b| {
            let v = match col {
                Column::Open => b.open,
                Column::High => b.high,
                Column::Low => b.low,
                Column::Close => b.close,
                Column::Volume => b.volume,
            };
            v.to_f64().unwrap_or(f64::NAN)
        })
        .collect()
}

/// Rows restricted to an inclusive date window.
pub fn within(
    bars: Vec<HistoryBar>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<HistoryBar> {
    bars.into_iter()
        .filter(|b| start.is_none_or(|s| b.date >= s))
        .filter(|b| end.is_none_or(|e| b.date <= e))
        .collect()
}
