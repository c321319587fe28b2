//! Bollinger Bands.
//!
//! - Middle: SMA over n periods
//! - Upper: Middle + (dev_up × StdDev)
//! - Lower: Middle - (dev_down × StdDev)
//!
//! StdDev is population standard deviation (divides by N).
//! Warmup: first (n-1) outputs are NaN on all three bands.

use super::{mean_variance, nan_vec};

#[derive(Debug, Clone, PartialEq)]
pub struct Bands {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

pub fn bollinger(input: &[f64], period: usize, dev_up: f64, dev_down: f64) -> Bands {
    let len = input.len();
    let mut bands = Bands {
        upper: nan_vec(len),
        middle: nan_vec(len),
        lower: nan_vec(len),
    };
    if period == 0 || len < period {
        return bands;
    }

    for i in (period - 1)..len {
        let (middle, variance) = mean_variance(&input[i + 1 - period..=i]);
        let stddev = variance.sqrt();
        bands.middle[i] = middle;
        bands.upper[i] = middle + dev_up * stddev;
        bands.lower[i] = middle - dev_down * stddev;
    }
    bands
}
