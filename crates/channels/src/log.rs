use tracing::{error, info};

use crate::error::Error;

/// Operator-visible log sink for action outcomes.
///
/// Distinct from ambient `tracing` diagnostics: these messages surface in the
/// operator's integration console, so each one carries its full context
/// inline.
pub trait OperatorLog: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Default sink that forwards to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl OperatorLog for TracingLog {
    fn info(&self, message: &str) {
        info!("{message}");
    }

    fn error(&self, message: &str) {
        error!("{message}");
    }
}

/// Record a failure for the operator, then hand the typed error back.
///
/// Every error an action surfaces goes through here exactly once, so the
/// operator log always shows the diagnostic before the caller sees the
/// failure.
#[must_use]
pub fn fail(log: &dyn OperatorLog, error: Error) -> Error {
    log.error(&error.to_string());
    error
}
