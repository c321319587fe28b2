//! Balance of Power.
//!
//! BOP[i] = (C[i] - O[i]) / (H[i] - L[i]); 0 when the bar has no range.
//! No warmup.

pub fn bop(open: &[f64], high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
    open.iter()
        .zip(high)
        .zip(low)
        .zip(close)
        .map(|(((o, h), l), c)| {
            let range = h - l;
            if range > 0.0 { (c - o) / range } else { 0.0 }
        })
        .collect()
}
