// src/metrics.rs
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

pub static TICKS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("operator_ticks_total", "Ticks processed").unwrap()
});

pub static SUBMIT_ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "operator_submit_errors_total",
        "Submissions dropped or failed",
        &["reason"] // convert|transport|contract|timeout
    )
    .unwrap()
});
