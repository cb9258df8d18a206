// Path: crates/telemetry/src/prometheus.rs
//! A concrete implementation of the metrics sinks using the Prometheus crate.

use crate::sinks::*;
use once_cell::sync::OnceCell;
use prometheus::{
    exponential_buckets, register_histogram_vec, register_int_counter, register_int_counter_vec,
    HistogramVec, IntCounter, IntCounterVec,
};

// --- Metric Statics ---
// Collectors are set exactly once by `install`.

static SUBMISSION_ATTEMPTS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static NODE_FAILURES_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static PRECHECK_REJECTIONS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static OPERATION_DURATION_SECONDS: OnceCell<HistogramVec> = OnceCell::new();
static RECEIPT_POLLS_TOTAL: OnceCell<IntCounter> = OnceCell::new();
static RECEIPT_TIMEOUTS_TOTAL: OnceCell<IntCounter> = OnceCell::new();
static RECEIPTS_RESOLVED_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static CHUNKS_ACCEPTED_TOTAL: OnceCell<IntCounter> = OnceCell::new();
static PARTIAL_CHUNK_FAILURES_TOTAL: OnceCell<IntCounter> = OnceCell::new();
static ERRORS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();

/// The Prometheus-backed [`MetricsSink`].
#[derive(Debug, Clone, Copy)]
pub struct PrometheusSink;

/// Runs `$body` with the collector bound to `$m` if `install()` has run.
macro_rules! with_metric {
    ($metric:ident, |$m:ident| $body:expr) => {
        if let Some($m) = $metric.get() {
            $body;
        }
    };
}

impl SubmissionMetricsSink for PrometheusSink {
    fn inc_submission_attempts(&self, method: &str) {
        with_metric!(SUBMISSION_ATTEMPTS_TOTAL, |m| m.with_label_values(&[method]).inc());
    }
    fn inc_node_failures(&self, node: &str, kind: &'static str) {
        with_metric!(NODE_FAILURES_TOTAL, |m| m.with_label_values(&[node, kind]).inc());
    }
    fn inc_precheck_rejections(&self, status: &str) {
        with_metric!(PRECHECK_REJECTIONS_TOTAL, |m| m
            .with_label_values(&[status])
            .inc());
    }
    fn observe_operation_duration(&self, method: &str, duration_secs: f64) {
        with_metric!(OPERATION_DURATION_SECONDS, |m| m
            .with_label_values(&[method])
            .observe(duration_secs));
    }
}

impl ReceiptMetricsSink for PrometheusSink {
    fn inc_receipt_polls(&self) {
        with_metric!(RECEIPT_POLLS_TOTAL, |m| m.inc());
    }
    fn inc_receipt_timeouts(&self) {
        with_metric!(RECEIPT_TIMEOUTS_TOTAL, |m| m.inc());
    }
    fn inc_receipts_resolved(&self, status: &str) {
        with_metric!(RECEIPTS_RESOLVED_TOTAL, |m| m.with_label_values(&[status]).inc());
    }
}

impl ChunkMetricsSink for PrometheusSink {
    fn inc_chunks_accepted(&self) {
        with_metric!(CHUNKS_ACCEPTED_TOTAL, |m| m.inc());
    }
    fn inc_partial_chunk_failures(&self) {
        with_metric!(PARTIAL_CHUNK_FAILURES_TOTAL, |m| m.inc());
    }
}

impl ErrorMetricsSink for PrometheusSink {
    fn inc_error(&self, kind: &'static str, variant: &'static str) {
        with_metric!(ERRORS_TOTAL, |m| m.with_label_values(&[kind, variant]).inc());
    }
}

fn already_initialized(name: &str) -> prometheus::Error {
    tracing::warn!(target: "telemetry", metric = name, "metric collector already initialized");
    prometheus::Error::AlreadyReg
}

macro_rules! set_once {
    ($cell:ident, $collector:expr) => {
        $cell
            .set($collector)
            .map_err(|_| already_initialized(stringify!($cell)))?
    };
}

/// Registers all collectors with the default registry, installs the global
/// sink and returns a static reference to it.
///
/// Call once at startup. A second call fails with `AlreadyReg`.
pub fn install() -> Result<&'static dyn MetricsSink, prometheus::Error> {
    set_once!(
        SUBMISSION_ATTEMPTS_TOTAL,
        register_int_counter_vec!(
            "hgsdk_submission_attempts_total",
            "Total submission attempts sent to nodes.",
            &["method"]
        )?
    );
    set_once!(
        NODE_FAILURES_TOTAL,
        register_int_counter_vec!(
            "hgsdk_node_failures_total",
            "Total failed attempts, by node and failure kind.",
            &["node", "kind"]
        )?
    );
    set_once!(
        PRECHECK_REJECTIONS_TOTAL,
        register_int_counter_vec!(
            "hgsdk_precheck_rejections_total",
            "Total transactions rejected at precheck, by status.",
            &["status"]
        )?
    );
    set_once!(
        OPERATION_DURATION_SECONDS,
        register_histogram_vec!(
            "hgsdk_operation_duration_seconds",
            "End-to-end latency of one operation from submission to receipt.",
            &["method"],
            exponential_buckets(0.01, 2.0, 14)?
        )?
    );
    set_once!(
        RECEIPT_POLLS_TOTAL,
        register_int_counter!("hgsdk_receipt_polls_total", "Total receipt queries sent.")?
    );
    set_once!(
        RECEIPT_TIMEOUTS_TOTAL,
        register_int_counter!(
            "hgsdk_receipt_timeouts_total",
            "Total receipt polling budgets exhausted without a final status."
        )?
    );
    set_once!(
        RECEIPTS_RESOLVED_TOTAL,
        register_int_counter_vec!(
            "hgsdk_receipts_resolved_total",
            "Total receipts resolved, by final status.",
            &["status"]
        )?
    );
    set_once!(
        CHUNKS_ACCEPTED_TOTAL,
        register_int_counter!(
            "hgsdk_chunks_accepted_total",
            "Total chunks of split payloads accepted by the ledger."
        )?
    );
    set_once!(
        PARTIAL_CHUNK_FAILURES_TOTAL,
        register_int_counter!(
            "hgsdk_partial_chunk_failures_total",
            "Total chunked submissions that stopped after some chunks were accepted."
        )?
    );
    set_once!(
        ERRORS_TOTAL,
        register_int_counter_vec!(
            "hgsdk_errors_total",
            "Total number of errors, categorized by type and variant.",
            &["kind", "variant"]
        )?
    );

    static PROMETHEUS_SINK: PrometheusSink = PrometheusSink;
    let sink: &'static dyn MetricsSink = &PROMETHEUS_SINK;
    let _ = SINK.set(sink);
    Ok(sink)
}
