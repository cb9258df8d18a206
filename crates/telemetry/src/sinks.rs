// Path: crates/telemetry/src/sinks.rs
//! Defines abstract traits for metrics reporting, decoupling the client pipeline
//! from the backend.

use once_cell::sync::OnceCell;

// --- Static Sink Access ---

/// A no-op sink for use in tests or when telemetry is disabled.
#[derive(Debug, Clone, Copy)]
pub struct NopSink;

/// A lazily-initialized static reference to the global `MetricsSink` implementation.
pub static SINK: OnceCell<&'static dyn MetricsSink> = OnceCell::new();
static NOP_SINK: NopSink = NopSink;

/// Returns the configured submission metrics sink, or a no-op sink.
pub fn submission_metrics() -> &'static dyn SubmissionMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

/// Returns the configured receipt metrics sink, or a no-op sink.
pub fn receipt_metrics() -> &'static dyn ReceiptMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

/// Returns the configured chunk metrics sink, or a no-op sink.
pub fn chunk_metrics() -> &'static dyn ChunkMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

/// Returns the configured error metrics sink, or a no-op sink.
pub fn error_metrics() -> &'static dyn ErrorMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

// --- Trait Definitions ---

/// A sink for metrics about submitting operations to nodes.
pub trait SubmissionMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments the counter of submission attempts, labeled by gRPC method.
    fn inc_submission_attempts(&self, method: &str);
    /// Increments the counter of failed attempts against one node, labeled by
    /// node and failure kind.
    fn inc_node_failures(&self, node: &str, kind: &'static str);
    /// Increments the counter of precheck rejections, labeled by status.
    fn inc_precheck_rejections(&self, status: &str);
    /// Observes the end-to-end latency of one operation, labeled by method.
    fn observe_operation_duration(&self, method: &str, duration_secs: f64);
}
impl SubmissionMetricsSink for NopSink {
    fn inc_submission_attempts(&self, _method: &str) {}
    fn inc_node_failures(&self, _node: &str, _kind: &'static str) {}
    fn inc_precheck_rejections(&self, _status: &str) {}
    fn observe_operation_duration(&self, _method: &str, _duration_secs: f64) {}
}

/// A sink for receipt polling metrics.
pub trait ReceiptMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments the counter of receipt queries sent.
    fn inc_receipt_polls(&self);
    /// Increments the counter of receipt polling budgets that ran out.
    fn inc_receipt_timeouts(&self);
    /// Increments the counter of resolved receipts, labeled by final status.
    fn inc_receipts_resolved(&self, status: &str);
}
impl ReceiptMetricsSink for NopSink {
    fn inc_receipt_polls(&self) {}
    fn inc_receipt_timeouts(&self) {}
    fn inc_receipts_resolved(&self, _status: &str) {}
}

/// A sink for chunked submission progress.
pub trait ChunkMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments the counter of chunks accepted by the ledger.
    fn inc_chunks_accepted(&self);
    /// Increments the counter of chunked submissions that stopped part way.
    fn inc_partial_chunk_failures(&self);
}
impl ChunkMetricsSink for NopSink {
    fn inc_chunks_accepted(&self) {}
    fn inc_partial_chunk_failures(&self) {}
}

/// A sink for recording structured error metrics.
pub trait ErrorMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for a specific error, categorized by its kind and variant.
    fn inc_error(&self, kind: &'static str, variant: &'static str);
}
impl ErrorMetricsSink for NopSink {
    fn inc_error(&self, _kind: &'static str, _variant: &'static str) {}
}

/// A unified sink that implements all domain-specific traits, providing a single
/// point of implementation for metrics backends like Prometheus.
pub trait MetricsSink:
    SubmissionMetricsSink + ReceiptMetricsSink + ChunkMetricsSink + ErrorMetricsSink
{
}

// Blanket implementation to allow any type that implements all sub-traits
// to be used as a `MetricsSink`.
impl<T> MetricsSink for T where
    T: SubmissionMetricsSink + ReceiptMetricsSink + ChunkMetricsSink + ErrorMetricsSink
{
}
