// src/sources/synthetic.rs
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;

use super::VolatilitySource;
use crate::types::VolatilityReading;
use crate::units::round_dp;

// Calibration bands (percent) approximating real short/medium/long-horizon
// volatility. Fixed constants, not computed.
pub const MINUTE_BAND: (f64, f64) = (0.01, 0.30);
pub const HOUR_BAND: (f64, f64) = (0.30, 1.50);
pub const DAY_BAND: (f64, f64) = (1.50, 6.50);

/// Mocked feed: uniform draws from the calibration bands, rounded to 3
/// decimals. Never errors.
pub struct SyntheticSource {
    last_ts_ms: AtomicI64,
}

impl SyntheticSource {
    pub fn new() -> Self {
        Self { last_ts_ms: AtomicI64::new(0) }
    }

    fn draw(rng: &mut impl Rng, (lo, hi): (f64, f64)) -> f64 {
        round_dp(rng.random_range(lo..=hi), 3)
    }

    // Wall-clock ms, bumped past the previous reading if the clock did not
    // advance, so timestamps are strictly increasing within a run.
    fn next_ts_ms(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let prev = self.last_ts_ms.load(Ordering::Relaxed);
        let ts = now.max(prev + 1);
        self.last_ts_ms.store(ts, Ordering::Relaxed);
        ts
    }
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VolatilitySource for SyntheticSource {
    async fn latest(&self) -> Result<VolatilityReading, anyhow::Error> {
        let mut rng = rand::rng();
        Ok(VolatilityReading {
            ts_ms: self.next_ts_ms(),
            minute: Self::draw(&mut rng, MINUTE_BAND),
            hour: Self::draw(&mut rng, HOUR_BAND),
            day: Self::draw(&mut rng, DAY_BAND),
        })
    }
}
