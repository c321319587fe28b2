//! Rate of Change Ratio.
//!
//! ROCR(n)[i] = x[i] / x[i-n]
//! If x[i-n] == 0: ROCR = 0
//! Warmup: first n outputs are NaN.

use super::nan_vec;

pub fn rocr(input: &[f64], period: usize) -> Vec<f64> {
    let mut out = nan_vec(input.len());
    if period == 0 {
        return out;
    }

    for i in period..input.len() {
        let prev = input[i - period];
        out[i] = if prev == 0.0 { 0.0 } else { input[i] / prev };
    }
    out
}
