// src/types.rs
use serde::{Deserialize, Serialize};

/// Three-timeframe volatility sample. Values are percentages
/// (e.g. 0.25 = 0.25%), timestamps unix ms.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VolatilityReading {
    pub ts_ms: i64,
    pub minute: f64,
    pub hour: f64,
    pub day: f64,
}

/// On-chain submission shape: integer basis points (1 bp = 0.01
/// percentage point). Serialized field names match the contract struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerPayload {
    pub timestamp: i64,
    pub minute: u32,
    pub hour: u32,
    pub day: u32,
    pub weighted_average: u32,
}

/// One diagnostic row per tick; display only, never submitted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub ts_ms: i64,
    pub minute: f64,
    pub hour: f64,
    pub day: f64,
    pub weighted_average: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxReceipt {
    pub tx_hash: String,
}
