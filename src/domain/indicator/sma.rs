//! Simple Moving Average.
//!
//! SMA(n)[i] = sum(x[i-n+1..=i]) / n
//! Warmup: first (n-1) outputs are NaN.

use super::nan_vec;

pub fn sma(input: &[f64], period: usize) -> Vec<f64> {
    let mut out = nan_vec(input.len());
    if period == 0 || input.len() < period {
        return out;
    }

    let mut sum: f64 = input[..period].iter().sum();
    out[period - 1] = sum / period as f64;

    for i in period..input.len() {
        sum += input[i] - input[i - period];
        out[i] = sum / period as f64;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sma_warmup_is_nan() {
        let out = sma(&[1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(out.len(), 4);
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert_relative_eq!(out[2], 2.0);
        assert_relative_eq!(out[3], 3.0);
    }

    #[test]
    fn sma_period_two() {
        let out = sma(&[10.0, 20.0, 40.0], 2);
        assert!(out[0].is_nan());
        assert_relative_eq!(out[1], 15.0);
        assert_relative_eq!(out[2], 30.0);
    }

    #[test]
    fn sma_short_input_all_nan() {
        let out = sma(&[1.0, 2.0], 5);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn sma_empty() {
        assert!(sma(&[], 3).is_empty());
    }

    #[test]
    fn sma_constant_series() {
        let out = sma(&[5.0; 10], 4);
        for v in &out[3..] {
            assert_relative_eq!(*v, 5.0);
        }
    }
}
