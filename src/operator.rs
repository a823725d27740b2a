// src/operator.rs
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::{interval, timeout, MissedTickBehavior};

use crate::aggregate::weighted_average;
use crate::config::{ms, OperatorConfig};
use crate::history::HistoryLog;
use crate::publishing::LedgerClient;
use crate::sources::VolatilitySource;
use crate::types::HistoryEntry;
use crate::units::payload_from;

/// Tick driver: samples, aggregates, converts, logs, and hands the
/// payload off to the ledger client. Sole owner of the history log.
pub struct Operator {
    pub cfg: OperatorConfig,
    pub source: Arc<dyn VolatilitySource>,
    pub ledger: Arc<dyn LedgerClient>,
    pub history: HistoryLog,
}

impl Operator {
    pub fn new(
        cfg: OperatorConfig,
        source: Arc<dyn VolatilitySource>,
        ledger: Arc<dyn LedgerClient>,
    ) -> Self {
        Self { cfg, source, ledger, history: HistoryLog::new() }
    }

    /// One scheduler firing. The submission runs on its own task so a
    /// slow ledger never delays the next tick; the handle is returned
    /// for callers that want to join it (the daemon loop drops it).
    pub async fn tick_once(&mut self) -> Option<JoinHandle<()>> {
        let reading = match self.source.latest().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("volatility source read failed: {e:?}");
                return None;
            }
        };
        let wavg = weighted_average(&reading);

        self.history.append(HistoryEntry {
            ts_ms: reading.ts_ms,
            minute: reading.minute,
            hour: reading.hour,
            day: reading.day,
            weighted_average: wavg,
        });
        println!("{}", self.history.render_table());

        #[cfg(feature = "metrics")]
        crate::metrics::TICKS_TOTAL.inc();

        let payload = match payload_from(&reading, wavg) {
            Ok(p) => p,
            Err(e) => {
                // Reject the tick's submission rather than push truncated data.
                tracing::warn!("dropping tick, basis-point conversion failed: {e}");
                #[cfg(feature = "metrics")]
                crate::metrics::SUBMIT_ERRORS_TOTAL
                    .with_label_values(&["convert"])
                    .inc();
                return None;
            }
        };

        tracing::info!(
            ts_ms = payload.timestamp,
            wavg_bps = payload.weighted_average,
            "submitting volatility update"
        );

        let ledger = Arc::clone(&self.ledger);
        let method = self.cfg.method.clone();
        let deadline = ms(self.cfg.submit_timeout_ms);
        Some(tokio::spawn(async move {
            match timeout(deadline, ledger.submit(&method, &payload)).await {
                Ok(Ok(receipt)) => {
                    tracing::info!(tx = %receipt.tx_hash, "volatility update accepted");
                }
                Ok(Err(e)) => {
                    tracing::warn!("volatility submission failed: {e}");
                    #[cfg(feature = "metrics")]
                    crate::metrics::SUBMIT_ERRORS_TOTAL
                        .with_label_values(&[e.reason()])
                        .inc();
                }
                Err(_) => {
                    tracing::warn!("volatility submission timed out after {deadline:?}");
                    #[cfg(feature = "metrics")]
                    crate::metrics::SUBMIT_ERRORS_TOTAL
                        .with_label_values(&["timeout"])
                        .inc();
                }
            }
        }))
    }

    /// Fixed-interval loop. Ticks are independent: a failed read,
    /// conversion, or submission never stops the next firing.
    pub async fn run(&mut self) {
        let mut clock = interval(ms(self.cfg.update_interval_ms));
        clock.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            clock.tick().await;
            // fire-and-forget: in-flight submissions may overlap ticks
            let _inflight = self.tick_once().await;
        }
    }
}
