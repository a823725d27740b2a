// src/units.rs
use crate::types::{LedgerPayload, VolatilityReading};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum ConvertError {
    #[error("not a finite non-negative percentage: {0}")]
    Invalid(f64),
    #[error("basis-point overflow: {0}")]
    Overflow(f64),
}

/// Round to `dp` decimal places, ties away from zero (`f64::round`).
#[inline]
pub fn round_dp(x: f64, dp: u32) -> f64 {
    let f = 10f64.powi(dp as i32);
    (x * f).round() / f
}

/// Percent -> integer basis points. Ties round away from zero, so
/// `to_basis_points(0.005) == 1`. Values that scale past `i32::MAX`
/// error out rather than wrap or truncate.
pub fn to_basis_points(pct: f64) -> Result<u32, ConvertError> {
    if !pct.is_finite() || pct < 0.0 {
        return Err(ConvertError::Invalid(pct));
    }
    let scaled = (pct * 100.0).round();
    if scaled > i32::MAX as f64 {
        return Err(ConvertError::Overflow(pct));
    }
    Ok(scaled as u32)
}

/// Build the submission payload from a reading and its composite score.
/// Any conversion failure rejects the whole payload so partial or
/// truncated data never reaches the ledger.
pub fn payload_from(
    reading: &VolatilityReading,
    weighted_average: f64,
) -> Result<LedgerPayload, ConvertError> {
    Ok(LedgerPayload {
        timestamp: reading.ts_ms,
        minute: to_basis_points(reading.minute)?,
        hour: to_basis_points(reading.hour)?,
        day: to_basis_points(reading.day)?,
        weighted_average: to_basis_points(weighted_average)?,
    })
}
