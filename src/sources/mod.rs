// src/sources/mod.rs
use async_trait::async_trait;

use crate::types::VolatilityReading;

/// Volatility feed seam. The synthetic source below is a stand-in for a
/// real market-data provider; a live feed implements the same trait and
/// nothing downstream changes.
#[async_trait]
pub trait VolatilitySource: Send + Sync {
    /// Return the latest three-timeframe volatility reading.
    async fn latest(&self) -> Result<VolatilityReading, anyhow::Error>;
}

pub mod synthetic;
