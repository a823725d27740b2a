// src/lib.rs
pub mod types;
pub mod config;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod units;
pub mod aggregate;
pub mod history;
pub mod sources;
pub mod publishing;
pub mod operator;
