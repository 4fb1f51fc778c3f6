//! Tracing setup shared by the command line tools.

use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber for a CLI invocation.
///
/// Diagnostics go to stderr; stdout is reserved for tool output.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("slack_dump=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Track operation timing and log on drop
pub struct Timer {
    start: Instant,
    operation: String,
}

impl Timer {
    /// Create a new timer for an operation
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            operation: operation.into(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let duration_ms = self.start.elapsed().as_millis() as u64;
        tracing::debug!(
            operation = %self.operation,
            duration_ms = duration_ms,
            "Operation completed"
        );
    }
}
