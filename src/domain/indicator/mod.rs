//! Technical indicator kernels and their dated series representation.
//!
//! Kernels are pure functions over aligned `f64` slices. Every kernel returns a
//! vector with exactly one output per input; entries inside the warm-up window
//! are `NaN`. The pipeline in [`crate::domain::instrument`] pairs the output with
//! history dates to build an [`IndicatorSeries`].
//!
//! - `IndicatorPoint`: a single dated point
//! - `IndicatorValue`: single-line or band-shaped output
//! - `IndicatorType`: indicator identity + parameters
//! - `IndicatorSeries`: the dated output series

pub mod ad;
pub mod bollinger;
pub mod bop;
pub mod cci;
pub mod linreg;
pub mod roc;
pub mod rsi;
pub mod sma;
pub mod stddev;

use crate::domain::period::Multiplier;
use chrono::NaiveDate;
use std::fmt;

pub const MIN_TIMEPERIOD: usize = 2;
pub const MAX_TIMEPERIOD: usize = 1000;
pub const DEFAULT_TIMEPERIOD: usize = 7;

/// Bounds a requested window to `[MIN_TIMEPERIOD, MAX_TIMEPERIOD]`.
pub fn clamp_timeperiod(timeperiod: usize) -> usize {
    timeperiod.clamp(MIN_TIMEPERIOD, MAX_TIMEPERIOD)
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: IndicatorValue,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorValue {
    Simple(f64),
    Bands { upper: f64, middle: f64, lower: f64 },
}

impl IndicatorValue {
    pub fn as_simple(&self) -> Option<f64> {
        match self {
            IndicatorValue::Simple(v) => Some(*v),
            IndicatorValue::Bands { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Bollinger {
        period: usize,
        dev_up: Multiplier,
        dev_down: Multiplier,
    },
    Rocr(usize),
    Rsi(usize),
    Bop,
    Cci(usize),
    Ad,
    LinearReg(usize),
    Stddev { period: usize, dev: Multiplier },
    Var { period: usize, dev: Multiplier },
    Tsf(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Pairs a kernel output with the history dates it was computed from.
    pub fn from_simple(
        indicator_type: IndicatorType,
        dates: &[NaiveDate],
        output: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(dates.len(), output.len());
        let values = dates
            .iter()
            .zip(output)
            .map(|(&date, v)| IndicatorPoint {
                date,
                valid: !v.is_nan(),
                value: IndicatorValue::Simple(v),
            })
            .collect();
        Self {
            indicator_type,
            values,
        }
    }

    pub fn from_bands(
        indicator_type: IndicatorType,
        dates: &[NaiveDate],
        bands: bollinger::Bands,
    ) -> Self {
        debug_assert_eq!(dates.len(), bands.middle.len());
        let values = dates
            .iter()
            .enumerate()
            .map(|(i, &date)| {
                let (upper, middle, lower) = (bands.upper[i], bands.middle[i], bands.lower[i]);
                IndicatorPoint {
                    date,
                    valid: !middle.is_nan(),
                    value: IndicatorValue::Bands {
                        upper,
                        middle,
                        lower,
                    },
                }
            })
            .collect();
        Self {
            indicator_type,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Single-line values in date order; band series yield their middle line.
    pub fn to_vec(&self) -> Vec<f64> {
        self.values
            .iter()
            .map(|p| match p.value {
                IndicatorValue::Simple(v) => v,
                IndicatorValue::Bands { middle, .. } => middle,
            })
            .collect()
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Bollinger {
                period,
                dev_up,
                dev_down,
            } => write!(
                f,
                "BBANDS({},{},{})",
                period,
                dev_up.value(),
                dev_down.value()
            ),
            IndicatorType::Rocr(period) => write!(f, "ROCR({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Bop => write!(f, "BOP"),
            IndicatorType::Cci(period) => write!(f, "CCI({})", period),
            IndicatorType::Ad => write!(f, "AD"),
            IndicatorType::LinearReg(period) => write!(f, "LINEARREG({})", period),
            IndicatorType::Stddev { period, dev } => {
                write!(f, "STDDEV({},{})", period, dev.value())
            }
            IndicatorType::Var { period, dev } => write!(f, "VAR({},{})", period, dev.value()),
            IndicatorType::Tsf(period) => write!(f, "TSF({})", period),
        }
    }
}

/// Output buffer pre-filled with `NaN`.
pub(crate) fn nan_vec(len: usize) -> Vec<f64> {
    vec![f64::NAN; len]
}

/// Population mean and variance of a window.
pub(crate) fn mean_variance(window: &[f64]) -> (f64, f64) {
    let n = window.len() as f64;
    let mean = window.iter().sum::<f64>() / n;
    let variance = window
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;
    (mean, variance)
}
