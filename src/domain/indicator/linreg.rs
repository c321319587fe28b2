//! Least-squares line indicators: Linear Regression and Time Series Forecast.
//!
//! For each window of n values at x = 0..n-1, fit y = b + m·x, then
//! - LINEARREG[i] = b + m·(n-1)  (fitted value at the current bar)
//! - TSF[i]       = b + m·n      (one bar ahead)
//!
//! Warmup: first (n-1) outputs are NaN.

use super::nan_vec;

pub fn linear_regression(input: &[f64], period: usize) -> Vec<f64> {
    fitted(input, period, |slope, intercept, n| intercept + slope * (n - 1.0))
}

pub fn time_series_forecast(input: &[f64], period: usize) -> Vec<f64> {
    fitted(input, period, |slope, intercept, n| intercept + slope * n)
}

fn fitted(input: &[f64], period: usize, project: impl Fn(f64, f64, f64) -> f64) -> Vec<f64> {
    let mut out = nan_vec(input.len());
    if period == 0 || input.len() < period {
        return out;
    }

    let n = period as f64;
    let sum_x = n * (n - 1.0) / 2.0;
    let sum_x2 = n * (n - 1.0) * (2.0 * n - 1.0) / 6.0;
    let divisor = n * sum_x2 - sum_x * sum_x;

    for i in (period - 1)..input.len() {
        let window = &input[i + 1 - period..=i];
        let sum_y: f64 = window.iter().sum();
        let sum_xy: f64 = window
            .iter()
            .enumerate()
            .map(|(x, y)| x as f64 * y)
            .sum();

        let slope = if divisor == 0.0 {
            0.0
        } else {
            (n * sum_xy - sum_x * sum_y) / divisor
        };
        let intercept = (sum_y - slope * sum_x) / n;
        out[i] = project(slope, intercept, n);
    }
    out
}
