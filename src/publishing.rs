// src/publishing.rs
use async_trait::async_trait;
use serde_json::json;

use crate::types::{LedgerPayload, TxReceipt};

#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("http status {0}")]
    BadStatus(u16),
    #[error("contract rejected ({code}): {message}")]
    Contract { code: i64, message: String },
}

impl SubmitError {
    pub fn reason(&self) -> &'static str {
        match self {
            SubmitError::Transport(_) | SubmitError::BadStatus(_) => "transport",
            SubmitError::Contract { .. } => "contract",
        }
    }
}

/// Sign-and-submit seam to the ledger. The operator only needs one
/// capability: call a named contract method with a structured payload.
/// Signing, nonce handling and routing live behind this trait.
#[async_trait]
pub trait LedgerClient: Send + Sync + 'static {
    async fn submit(
        &self,
        method: &str,
        payload: &LedgerPayload,
    ) -> Result<TxReceipt, SubmitError>;
}

/// Dev/demo client that prints the call instead of submitting it.
pub struct StdoutLedger;

#[async_trait]
impl LedgerClient for StdoutLedger {
    async fn submit(
        &self,
        method: &str,
        payload: &LedgerPayload,
    ) -> Result<TxReceipt, SubmitError> {
        println!(
            "[LEDGER] {method} ts={} bps min/hr/day/wavg={}/{}/{}/{}",
            payload.timestamp, payload.minute, payload.hour, payload.day, payload.weighted_average
        );
        Ok(TxReceipt { tx_hash: "0xstdout".into() })
    }
}

/// JSON-RPC client for an operator gateway that signs and routes the
/// call on our behalf. The operator credential rides along as a header.
pub struct JsonRpcLedger {
    pub http: reqwest::Client,
    pub endpoint: String,
    pub contract_address: String,
    pub operator_key: String,
}

impl JsonRpcLedger {
    pub fn new(endpoint: String, contract_address: String, operator_key: String) -> Self {
        Self { http: reqwest::Client::new(), endpoint, contract_address, operator_key }
    }
}

#[async_trait]
impl LedgerClient for JsonRpcLedger {
    async fn submit(
        &self,
        method: &str,
        payload: &LedgerPayload,
    ) -> Result<TxReceipt, SubmitError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": [self.contract_address, payload],
        });

        let resp = self
            .http
            .post(&self.endpoint)
            .header("X-Operator-Key", &self.operator_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SubmitError::BadStatus(status.as_u16()));
        }

        let reply: serde_json::Value = resp.json().await?;
        if let Some(err) = reply.get("error") {
            return Err(SubmitError::Contract {
                code: err.get("code").and_then(|c| c.as_i64()).unwrap_or(0),
                message: err
                    .get("message")
                    .and_then(|m| m.as_str())
                    .unwrap_or("unknown")
                    .to_string(),
            });
        }

        let tx_hash = reply
            .get("result")
            .and_then(|r| r.as_str())
            .unwrap_or_default()
            .to_string();
        Ok(TxReceipt { tx_hash })
    }
}
