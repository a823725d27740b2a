// src/config.rs
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct OperatorConfig {
    #[serde(default = "d_rpc_url")]            pub rpc_url: String,
    #[serde(default)]                          pub contract_address: String,
    #[serde(default = "d_method")]             pub method: String,
    #[serde(default = "d_update_interval_ms")] pub update_interval_ms: u64,
    #[serde(default = "d_submit_timeout_ms")]  pub submit_timeout_ms: u64,
    #[serde(default)]                          pub operator_key: String,
}
fn d_rpc_url() -> String { "http://127.0.0.1:8545".into() }
fn d_method() -> String { "submitNewVolatilityData".into() }
fn d_update_interval_ms() -> u64 { 10_000 }
fn d_submit_timeout_ms() -> u64 { 8_000 }

#[inline]
pub fn ms(d: u64) -> Duration {
    Duration::from_millis(d)
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            rpc_url: d_rpc_url(),
            contract_address: String::new(),
            method: d_method(),
            update_interval_ms: d_update_interval_ms(),
            submit_timeout_ms: d_submit_timeout_ms(),
            operator_key: String::new(),
        }
    }
}

impl OperatorConfig {
    /// Optional TOML file via `OPERATOR_CONFIG`, then env overrides for
    /// the deployment-specific pieces. `.env` is honored for local runs.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let mut cfg: Self = match std::env::var("OPERATOR_CONFIG") {
            Ok(path) => toml::from_str(&std::fs::read_to_string(&path)?)?,
            Err(_) => Self::default(),
        };
        if let Ok(v) = std::env::var("RPC_URL") {
            cfg.rpc_url = v;
        }
        if let Ok(v) = std::env::var("CONTRACT_ADDRESS") {
            cfg.contract_address = v;
        }
        if let Ok(v) = std::env::var("OPERATOR_KEY") {
            cfg.operator_key = v;
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_cadence() {
        let cfg = OperatorConfig::default();
        assert_eq!(cfg.update_interval_ms, 10_000);
        assert_eq!(cfg.method, "submitNewVolatilityData");
        assert_eq!(cfg.submit_timeout_ms, 8_000);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: OperatorConfig = toml::from_str(
            r#"
            contract_address = "0xabc"
            update_interval_ms = 300000
            "#,
        )
        .unwrap();
        assert_eq!(cfg.contract_address, "0xabc");
        assert_eq!(cfg.update_interval_ms, 300_000);
        assert_eq!(cfg.method, "submitNewVolatilityData");
        assert_eq!(cfg.rpc_url, "http://127.0.0.1:8545");
    }
}
