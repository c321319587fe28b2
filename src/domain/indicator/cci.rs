//! Commodity Channel Index.
//!
//! TP[i]  = (H[i] + L[i] + C[i]) / 3
//! CCI[i] = (TP[i] - SMA(TP, n)[i]) / (0.015 × MeanDeviation(TP, n)[i])
//! 0 when either the numerator or the mean deviation is 0.
//! Warmup: first (n-1) outputs are NaN.

use super::nan_vec;

const LAMBERT_CONSTANT: f64 = 0.015;

pub fn cci(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<f64> {
    let typical: Vec<f64> = high
        .iter()
        .zip(low)
        .zip(close)
        .map(|((h, l), c)| (h + l + c) / 3.0)
        .collect();

    let mut out = nan_vec(typical.len());
    if period == 0 || typical.len() < period {
        return out;
    }

    let n = period as f64;
    for i in (period - 1)..typical.len() {
        let window = &typical[i + 1 - period..=i];
        let average = window.iter().sum::<f64>() / n;
        let mean_dev = window.iter().map(|tp| (tp - average).abs()).sum::<f64>() / n;
        let deviation = typical[i] - average;

        out[i] = if deviation != 0.0 && mean_dev != 0.0 {
            deviation / (LAMBERT_CONSTANT * mean_dev)
        } else {
            0.0
        };
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cci_warmup() {
        let h = [11.0, 12.0, 13.0, 14.0];
        let l = [9.0, 10.0, 11.0, 12.0];
        let c = [10.0, 11.0, 12.0, 13.0];
        let out = cci(&h, &l, &c, 3);
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert!(!out[2].is_nan());
    }

    #[test]
    fn cci_known_value() {
        // typical prices equal closes here: 10, 11, 12
        let h = [10.0, 11.0, 12.0];
        let l = [10.0, 11.0, 12.0];
        let c = [10.0, 11.0, 12.0];
        let out = cci(&h, &l, &c, 3);
        // avg 11, mean dev 2/3, deviation 1 → 1 / (0.015 × 2/3) = 100
        assert_relative_eq!(out[2], 100.0, epsilon = 1e-9);
    }

    #[test]
    fn cci_flat_is_zero() {
        let flat = [5.0; 4];
        let out = cci(&flat, &flat, &flat, 2);
        assert_relative_eq!(out[3], 0.0);
    }
}
