//! History window vocabulary: durations, sampling intervals and deviation multipliers.

use std::fmt;

/// How much trailing history to retrieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Duration {
    Day1,
    Day5,
    #[default]
    Month1,
    Month3,
    Month6,
    Year1,
    Year2,
    Year5,
    Year10,
    YearToDate,
    Max,
}

impl Duration {
    pub const ALL: [Duration; 11] = [
        Duration::Day1,
        Duration::Day5,
        Duration::Month1,
        Duration::Month3,
        Duration::Month6,
        Duration::Year1,
        Duration::Year2,
        Duration::Year5,
        Duration::Year10,
        Duration::YearToDate,
        Duration::Max,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Duration::Day1 => "1d",
            Duration::Day5 => "5d",
            Duration::Month1 => "1mo",
            Duration::Month3 => "3mo",
            Duration::Month6 => "6mo",
            Duration::Year1 => "1y",
            Duration::Year2 => "2y",
            Duration::Year5 => "5y",
            Duration::Year10 => "10y",
            Duration::YearToDate => "ytd",
            Duration::Max => "max",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == s.trim())
    }

    /// Calendar lookback in days; `None` for `YearToDate` and `Max`, which are
    /// anchored differently.
    pub fn lookback_days(&self) -> Option<i64> {
        match self {
            Duration::Day1 => Some(1),
            Duration::Day5 => Some(5),
            Duration::Month1 => Some(31),
            Duration::Month3 => Some(92),
            Duration::Month6 => Some(183),
            Duration::Year1 => Some(365),
            Duration::Year2 => Some(2 * 365),
            Duration::Year5 => Some(5 * 365),
            Duration::Year10 => Some(10 * 365),
            Duration::YearToDate | Duration::Max => None,
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sampling granularity of a history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interval {
    Minute1,
    Minute5,
    Minute15,
    Minute30,
    Hour1,
    #[default]
    Day1,
    Day5,
    Week1,
    Month1,
    Month3,
}

impl Interval {
    pub const ALL: [Interval; 10] = [
        Interval::Minute1,
        Interval::Minute5,
        Interval::Minute15,
        Interval::Minute30,
        Interval::Hour1,
        Interval::Day1,
        Interval::Day5,
        Interval::Week1,
        Interval::Month1,
        Interval::Month3,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Minute1 => "1m",
            Interval::Minute5 => "5m",
            Interval::Minute15 => "15m",
            Interval::Minute30 => "30m",
            Interval::Hour1 => "1h",
            Interval::Day1 => "1d",
            Interval::Day5 => "5d",
            Interval::Week1 => "1wk",
            Interval::Month1 => "1mo",
            Interval::Month3 => "3mo",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.as_str() == s.trim())
    }

    pub fn is_intraday(&self) -> bool {
        matches!(
            self,
            Interval::Minute1
                | Interval::Minute5
                | Interval::Minute15
                | Interval::Minute30
                | Interval::Hour1
        )
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standard-deviation multiplier for bands and dispersion indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Multiplier {
    #[default]
    Once,
    Twice,
    Thrice,
    Quadruple,
    Half,
    Quarter,
}

impl Multiplier {
    pub fn value(&self) -> f64 {
        match self {
            Multiplier::Once => 1.0,
            Multiplier::Twice => 2.0,
            Multiplier::Thrice => 3.0,
            Multiplier::Quadruple => 4.0,
            Multiplier::Half => 0.5,
            Multiplier::Quarter => 0.25,
        }
    }
}
