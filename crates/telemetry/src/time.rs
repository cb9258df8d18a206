// Path: crates/telemetry/src/time.rs
use crate::sinks::SubmissionMetricsSink;
use std::time::Instant;

/// Records the lifetime of the scope it lives in as one operation's duration.
pub struct Timer<'a> {
    sink: &'a dyn SubmissionMetricsSink,
    method: &'a str,
    start: Instant,
}

impl<'a> Timer<'a> {
    /// Starts timing an operation calling `method`.
    pub fn new(sink: &'a dyn SubmissionMetricsSink, method: &'a str) -> Self {
        Self {
            sink,
            method,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer<'_> {
    fn drop(&mut self) {
        self.sink
            .observe_operation_duration(self.method, self.start.elapsed().as_secs_f64());
    }
}
