//! RSI (Relative Strength Index).
//!
//! Uses Wilder's smoothing for average gain/loss:
//! - First average: simple mean of gains/losses over the first n changes
//! - Subsequent: avg = (prev_avg * (n-1) + current) / n
//!
//! Formula: RSI = 100 * avg_gain / (avg_gain + avg_loss)
//! which equals 100 - 100 / (1 + avg_gain / avg_loss). A flat window yields 0.
//!
//! Warmup: first n outputs are NaN (n price changes are needed).

use super::nan_vec;

pub fn rsi(input: &[f64], period: usize) -> Vec<f64> {
    let mut out = nan_vec(input.len());
    if period == 0 || input.len() <= period {
        return out;
    }

    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for i in 1..=period {
        let change = input[i] - input[i - 1];
        if change > 0.0 {
            gain_sum += change;
        } else {
            loss_sum -= change;
        }
    }

    let n = period as f64;
    let mut avg_gain = gain_sum / n;
    let mut avg_loss = loss_sum / n;
    out[period] = strength(avg_gain, avg_loss);

    for i in (period + 1)..input.len() {
        let change = input[i] - input[i - 1];
        let (gain, loss) = if change > 0.0 {
            (change, 0.0)
        } else {
            (0.0, -change)
        };
        avg_gain = (avg_gain * (n - 1.0) + gain) / n;
        avg_loss = (avg_loss * (n - 1.0) + loss) / n;
        out[i] = strength(avg_gain, avg_loss);
    }
    out
}

fn strength(avg_gain: f64, avg_loss: f64) -> f64 {
    let total = avg_gain + avg_loss;
    if total == 0.0 {
        0.0
    } else {
        100.0 * avg_gain / total
    }
}
