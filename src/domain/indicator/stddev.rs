//! Standard Deviation and Variance.
//!
//! Population statistics over n values.
//! VAR(n)[i]         = sum((x[i-j] - SMA(n)[i])^2 for j in 0..n) / n
//! STDDEV(n, k)[i]   = sqrt(VAR(n)[i]) × k
//! VARIANCE(n, k)[i] = STDDEV(n, k)[i]^2 = VAR(n)[i] × k²
//! Warmup: first (n-1) outputs are NaN.

use super::{mean_variance, nan_vec};

pub fn stddev(input: &[f64], period: usize, dev: f64) -> Vec<f64> {
    windowed_variance(input, period)
        .into_iter()
        .map(|var| var.max(0.0).sqrt() * dev)
        .collect()
}

/// Windowed population variance scaled by `dev²`, the square of [`stddev`].
///
/// TA-Lib's `VAR` accepts a deviation multiplier but ignores it. Here it is
/// applied, so the output matches TA-Lib only when `dev` is 1.
pub fn variance(input: &[f64], period: usize, dev: f64) -> Vec<f64> {
    windowed_variance(input, period)
        .into_iter()
        .map(|var| var * dev * dev)
        .collect()
}

fn windowed_variance(input: &[f64], period: usize) -> Vec<f64> {
    let mut out = nan_vec(input.len());
    if period == 0 || input.len() < period {
        return out;
    }
    for i in (period - 1)..input.len() {
        out[i] = mean_variance(&input[i + 1 - period..=i]).1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn stddev_warmup() {
        let out = stddev(&[10.0, 20.0, 30.0, 40.0, 50.0], 3, 1.0);
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert!(!out[2].is_nan());
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn stddev_constant_is_zero() {
        let out = stddev(&[100.0; 5], 3, 1.0);
        assert_relative_eq!(out[4], 0.0);
    }

    #[test]
    fn stddev_population() {
        let out = stddev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], 8, 1.0);
        assert_relative_eq!(out[7], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn stddev_multiplier_scales() {
        let once = stddev(&[10.0, 20.0, 30.0], 3, 1.0);
        let twice = stddev(&[10.0, 20.0, 30.0], 3, 2.0);
        assert_relative_eq!(twice[2], 2.0 * once[2], epsilon = 1e-12);
    }

    #[test]
    fn variance_is_squared_stddev() {
        let data = [3.0, 8.0, 1.0, 9.0, 4.0];
        let sd = stddev(&data, 4, 0.5);
        let var = variance(&data, 4, 0.5);
        for i in 3..5 {
            assert_relative_eq!(var[i], sd[i] * sd[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn variance_unit_multiplier() {
        let out = variance(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], 8, 1.0);
        assert_relative_eq!(out[7], 4.0, epsilon = 1e-12);
    }
}
