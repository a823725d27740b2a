// tests/operator_tests.rs
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use httpmock::prelude::*;
use serde_json::json;

use volatility_operator::config::OperatorConfig;
use volatility_operator::operator::Operator;
use volatility_operator::publishing::{JsonRpcLedger, LedgerClient, SubmitError};
use volatility_operator::sources::synthetic::SyntheticSource;
use volatility_operator::sources::VolatilitySource;
use volatility_operator::types::{LedgerPayload, TxReceipt, VolatilityReading};

/// Records every submit; fails the first `fail_first` calls with a
/// contract error.
struct RecordingLedger {
    calls: Mutex<Vec<(String, LedgerPayload)>>,
    fail_first: usize,
    seen: AtomicUsize,
}

impl RecordingLedger {
    fn new(fail_first: usize) -> Self {
        Self { calls: Mutex::new(Vec::new()), fail_first, seen: AtomicUsize::new(0) }
    }

    fn calls(&self) -> Vec<(String, LedgerPayload)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LedgerClient for RecordingLedger {
    async fn submit(
        &self,
        method: &str,
        payload: &LedgerPayload,
    ) -> Result<TxReceipt, SubmitError> {
        let n = self.seen.fetch_add(1, Ordering::SeqCst);
        if n < self.fail_first {
            return Err(SubmitError::Contract { code: 3, message: "reverted".into() });
        }
        self.calls.lock().unwrap().push((method.to_string(), *payload));
        Ok(TxReceipt { tx_hash: format!("0x{n:02x}") })
    }
}

/// Replays one fixed reading, advancing the timestamp each call.
struct FixedSource {
    minute: f64,
    hour: f64,
    day: f64,
    ticks: AtomicUsize,
}

impl FixedSource {
    fn new(minute: f64, hour: f64, day: f64) -> Self {
        Self { minute, hour, day, ticks: AtomicUsize::new(0) }
    }
}

#[async_trait]
impl VolatilitySource for FixedSource {
    async fn latest(&self) -> Result<VolatilityReading, anyhow::Error> {
        let n = self.ticks.fetch_add(1, Ordering::SeqCst) as i64;
        Ok(VolatilityReading {
            ts_ms: 1_700_000_000_000 + n,
            minute: self.minute,
            hour: self.hour,
            day: self.day,
        })
    }
}

fn operator_with(source: Arc<dyn VolatilitySource>, ledger: Arc<dyn LedgerClient>) -> Operator {
    Operator::new(OperatorConfig::default(), source, ledger)
}

#[tokio::test]
async fn history_grows_one_entry_per_tick_in_order() {
    let ledger = Arc::new(RecordingLedger::new(0));
    let mut op = operator_with(Arc::new(SyntheticSource::new()), ledger.clone());

    for _ in 0..5 {
        if let Some(handle) = op.tick_once().await {
            handle.await.unwrap();
        }
    }

    assert_eq!(op.history.len(), 5);
    let ts: Vec<i64> = op.history.snapshot().iter().map(|e| e.ts_ms).collect();
    assert!(ts.windows(2).all(|w| w[0] <= w[1]), "timestamps out of order: {ts:?}");
    assert_eq!(ledger.calls().len(), 5);
}

#[tokio::test]
async fn submitted_payload_matches_worked_example() {
    let ledger = Arc::new(RecordingLedger::new(0));
    let mut op = operator_with(Arc::new(FixedSource::new(0.10, 0.80, 3.00)), ledger.clone());

    op.tick_once().await.unwrap().await.unwrap();

    let calls = ledger.calls();
    assert_eq!(calls.len(), 1);
    let (method, payload) = &calls[0];
    assert_eq!(method, "submitNewVolatilityData");
    assert_eq!(payload.minute, 10);
    assert_eq!(payload.hour, 80);
    assert_eq!(payload.day, 300);
    assert_eq!(payload.weighted_average, 89);
}

#[tokio::test]
async fn failed_submission_does_not_stop_the_next_tick() {
    let ledger = Arc::new(RecordingLedger::new(1));
    let mut op = operator_with(Arc::new(SyntheticSource::new()), ledger.clone());

    // first submission fails inside its task; the tick itself completes
    op.tick_once().await.unwrap().await.unwrap();
    op.tick_once().await.unwrap().await.unwrap();

    assert_eq!(op.history.len(), 2);
    assert_eq!(ledger.calls().len(), 1); // only the second landed
}

#[tokio::test]
async fn overflowing_reading_is_logged_but_never_submitted() {
    let ledger = Arc::new(RecordingLedger::new(0));
    let mut op = operator_with(Arc::new(FixedSource::new(0.10, 0.80, 1e300)), ledger.clone());

    let handle = op.tick_once().await;
    assert!(handle.is_none(), "overflowing payload must not spawn a submission");
    assert_eq!(op.history.len(), 1);
    assert!(ledger.calls().is_empty());

    // the next, sane tick still goes through
    let mut op2 = operator_with(Arc::new(FixedSource::new(0.10, 0.80, 3.00)), ledger.clone());
    op2.tick_once().await.unwrap().await.unwrap();
    assert_eq!(ledger.calls().len(), 1);
}

#[tokio::test]
async fn json_rpc_ledger_posts_method_and_payload() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/")
                .header("X-Operator-Key", "op-secret")
                .json_body_partial(
                    json!({
                        "method": "submitNewVolatilityData",
                        "params": ["0xcontract", {
                            "timestamp": 1_700_000_000_000i64,
                            "minute": 10,
                            "hour": 80,
                            "day": 300,
                            "weightedAverage": 89,
                        }],
                    })
                    .to_string(),
                );
            then.status(200)
                .json_body(json!({"jsonrpc": "2.0", "id": 1, "result": "0xdeadbeef"}));
        })
        .await;

    let ledger = JsonRpcLedger::new(server.url("/"), "0xcontract".into(), "op-secret".into());
    let payload = LedgerPayload {
        timestamp: 1_700_000_000_000,
        minute: 10,
        hour: 80,
        day: 300,
        weighted_average: 89,
    };

    let receipt = ledger.submit("submitNewVolatilityData", &payload).await.unwrap();
    assert_eq!(receipt.tx_hash, "0xdeadbeef");
    mock.assert_async().await;
}

#[tokio::test]
async fn json_rpc_ledger_surfaces_contract_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {"code": 3, "message": "execution reverted"},
            }));
        })
        .await;

    let ledger = JsonRpcLedger::new(server.url("/"), "0xcontract".into(), String::new());
    let payload = LedgerPayload { timestamp: 0, minute: 1, hour: 2, day: 3, weighted_average: 2 };

    match ledger.submit("submitNewVolatilityData", &payload).await {
        Err(SubmitError::Contract { code, message }) => {
            assert_eq!(code, 3);
            assert_eq!(message, "execution reverted");
        }
        other => panic!("expected contract error, got {other:?}"),
    }
}
