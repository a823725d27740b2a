// src/aggregate.rs
use crate::types::VolatilityReading;
use crate::units::round_dp;

// Composite weights, sum to 1.0. Biased toward the shortest timeframe,
// with the longer horizons damping single-spike overreaction.
pub const W_MINUTE: f64 = 0.5;
pub const W_HOUR: f64 = 0.3;
pub const W_DAY: f64 = 0.2;

/// Fixed-weight composite of the three timeframes, rounded to 2 decimals.
pub fn weighted_average(reading: &VolatilityReading) -> f64 {
    let raw = W_MINUTE * reading.minute + W_HOUR * reading.hour + W_DAY * reading.day;
    round_dp(raw, 2)
}
