// Path: crates/telemetry/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # hgsdk Telemetry
//!
//! Observability for the hgsdk client: structured logging initialization and
//! abstract metrics sinks, with a Prometheus backend, that decouple pipeline
//! instrumentation from where the numbers end up.

/// The initialization routine for global structured logging.
pub mod init;
/// The concrete implementation of metrics sinks using the `prometheus` crate.
pub mod prometheus;
/// Abstract traits (`*MetricsSink`) that define the contract for metrics reporting.
pub mod sinks;
/// A simple RAII timer for measuring the duration of an operation.
pub mod time;

// Re-export the public helper functions for easy access to the global sinks.
pub use sinks::{chunk_metrics, error_metrics, receipt_metrics, submission_metrics};

#[cfg(test)]
mod tests {
    use super::sinks::*;
    use super::time::Timer;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[derive(Debug, Default)]
    struct CountingSink {
        observed: AtomicU64,
    }

    impl SubmissionMetricsSink for CountingSink {
        fn inc_submission_attempts(&self, _method: &str) {}
        fn inc_node_failures(&self, _node: &str, _kind: &'static str) {}
        fn inc_precheck_rejections(&self, _status: &str) {}
        fn observe_operation_duration(&self, _method: &str, _duration_secs: f64) {
            self.observed.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_timer_observes_on_drop() {
        let sink = CountingSink::default();
        {
            let _t = Timer::new(&sink, "submitMessage");
            assert_eq!(sink.observed.load(Ordering::SeqCst), 0);
        }
        assert_eq!(sink.observed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_default_sinks_are_nop() {
        // No sink installed in unit tests; the accessors must still work.
        submission_metrics().inc_submission_attempts("cryptoTransfer");
        receipt_metrics().inc_receipt_polls();
        chunk_metrics().inc_chunks_accepted();
        error_metrics().inc_error("transport", "TRANSPORT_TIMEOUT");
    }
}
