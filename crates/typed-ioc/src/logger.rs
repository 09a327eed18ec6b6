/// Receives human readable registry events: registrations, failed
/// registrations, resolutions and misses.
///
/// Any `Fn(&str) + Send + Sync` closure is a logger.
pub trait Logger: Send + Sync {
    fn send(&self, msg: &str);

    /// The container skips formatting events when this returns `false`.
    fn enabled(&self) -> bool {
        true
    }
}

/// Forwards events to `tracing` at debug level.
#[derive(Debug, Clone, Copy)]
pub struct TracingLogger {
    enabled: bool,
}

impl TracingLogger {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Logger for TracingLogger {
    fn send(&self, msg: &str) {
        if self.enabled {
            tracing::debug!("{}", msg);
        }
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn send(&self, _: &str) {}

    fn enabled(&self) -> bool {
        false
    }
}

impl<F> Logger for F
where
    F: Fn(&str) + Send + Sync,
{
    fn send(&self, msg: &str) {
        self(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn tracing_logger_emits_when_enabled() {
        TracingLogger::default().send("type: u8 registered sync successfully");
        assert!(logs_contain("type: u8 registered sync successfully"));
    }

    #[test]
    #[traced_test]
    fn tracing_logger_silent_when_disabled() {
        let logger = TracingLogger::new(false);
        logger.send("should not appear");
        assert!(!logger.enabled());
        assert!(!logs_contain("should not appear"));
    }

    #[test]
    fn closure_logger_receives_messages() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let logger = {
            let lines = lines.clone();
            move |msg: &str| lines.lock().push(msg.to_owned())
        };

        logger.send("first");
        Logger::send(&logger, "second");

        assert!(Logger::enabled(&logger));
        assert_eq!(*lines.lock(), vec!["first".to_owned(), "second".to_owned()]);
    }
}
