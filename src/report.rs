//! Injected reporting capabilities.
//!
//! The sender never resolves a logger or diagnostics reporter through
//! process-wide state; both are passed explicitly at construction and
//! absence is a legal no-op.

use tracing::{debug, error, info};

/// Logging capability injected into the sender.
///
/// The sender emits exactly one debug line before each attempt and one
/// info or error line after it. Hosts supply their own implementation or
/// use [`TracingLogger`].
pub trait NoticeLogger: Send + Sync {
    fn debug(&self, msg: &str);
    fn info(&self, msg: &str);
    fn error(&self, msg: &str);
}

/// Context handed to the diagnostics reporter once per attempt.
#[derive(Debug, Clone, Copy)]
pub struct AttemptContext<'a> {
    /// Destination the attempt was addressed to.
    pub url: &'a str,
    /// Terminal outcome label, e.g. `success`, `http failure`,
    /// `transport failure`.
    pub outcome: &'a str,
}

/// Diagnostics capability invoked after every attempt, successful or not.
pub trait DiagnosticsReporter: Send + Sync {
    /// Called exactly once per `send` call, for every outcome.
    fn attempt_delivered(&self, context: &AttemptContext<'_>);

    /// Called additionally when a response with a body exists.
    fn response_body(&self, body: &str);
}

/// [`NoticeLogger`] backed by the host's `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl NoticeLogger for TracingLogger {
    fn debug(&self, msg: &str) {
        debug!(target: "notice_delivery", "{msg}");
    }

    fn info(&self, msg: &str) {
        info!(target: "notice_delivery", "{msg}");
    }

    fn error(&self, msg: &str) {
        error!(target: "notice_delivery", "{msg}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracing_logger_is_object_safe() {
        let logger: Box<dyn NoticeLogger> = Box::new(TracingLogger);
        logger.debug("debug line");
        logger.info("info line");
        logger.error("error line");
    }

    #[test]
    fn attempt_context_is_copyable() {
        let context = AttemptContext {
            url: "https://collector.example/api/notices",
            outcome: "success",
        };
        let copied = context;
        assert_eq!(copied.url, context.url);
        assert_eq!(copied.outcome, context.outcome);
    }
}
