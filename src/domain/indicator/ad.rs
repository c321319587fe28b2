//! Chaikin Accumulation/Distribution line.
//!
//! CLV[i] = ((C - L) - (H - C)) / (H - L), skipped when H == L
//! AD[i]  = AD[i-1] + CLV[i] × V[i], starting from 0
//! No warmup.

pub fn ad(high: &[f64], low: &[f64], close: &[f64], volume: &[f64]) -> Vec<f64> {
    let mut line = 0.0;
    high.iter()
        .zip(low)
        .zip(close)
        .zip(volume)
        .map(|(((h, l), c), v)| {
            let range = h - l;
            if range > 0.0 {
                line += ((c - l) - (h - c)) / range * v;
            }
            line
        })
        .collect()
}
