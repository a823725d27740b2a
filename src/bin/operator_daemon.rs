// src/bin/operator_daemon.rs
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use volatility_operator::config::OperatorConfig;
use volatility_operator::operator::Operator;
use volatility_operator::publishing::{JsonRpcLedger, LedgerClient, StdoutLedger};
use volatility_operator::sources::synthetic::SyntheticSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let cfg = OperatorConfig::load()?;
    tracing::info!(
        endpoint = %cfg.rpc_url,
        contract = %cfg.contract_address,
        interval_ms = cfg.update_interval_ms,
        "starting volatility operator"
    );

    let source = Arc::new(SyntheticSource::new());
    let ledger: Arc<dyn LedgerClient> = if cfg.contract_address.is_empty() {
        tracing::warn!("CONTRACT_ADDRESS not set, printing submissions instead");
        Arc::new(StdoutLedger)
    } else {
        Arc::new(JsonRpcLedger::new(
            cfg.rpc_url.clone(),
            cfg.contract_address.clone(),
            cfg.operator_key.clone(),
        ))
    };

    let mut operator = Operator::new(cfg, source, ledger);
    operator.run().await;
    Ok(())
}
