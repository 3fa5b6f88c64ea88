use std::sync::Arc;

/// Severity of a user-visible message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Success,
}

/// Trait for surfacing user-visible messages.
///
/// Implementations can show host toasts, print to a terminal, or collect
/// messages for assertions in tests.
pub trait Notifier: Send + Sync {
    /// Display a message to the user.
    fn notify(&self, severity: Severity, message: &str);

    fn info(&self, message: &str) {
        self.notify(Severity::Info, message);
    }

    fn warning(&self, message: &str) {
        self.notify(Severity::Warning, message);
    }

    fn error(&self, message: &str) {
        self.notify(Severity::Error, message);
    }

    fn success(&self, message: &str) {
        self.notify(Severity::Success, message);
    }
}

/// A shared reference to a notifier
pub type SharedNotifier = Arc<dyn Notifier>;

/// A no-op notifier that silently ignores all messages.
/// Useful for tests or quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _severity: Severity, _message: &str) {
        // Intentionally empty
    }
}

impl NoopNotifier {
    /// Create a new NoopNotifier wrapped in an Arc
    pub fn shared() -> SharedNotifier {
        Arc::new(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recording(Mutex<Vec<(Severity, String)>>);

    impl Notifier for Recording {
        fn notify(&self, severity: Severity, message: &str) {
            self.0.lock().unwrap().push((severity, message.to_string()));
        }
    }

    #[test]
    fn convenience_methods_route_severity() {
        let recorder = Recording(Mutex::new(Vec::new()));

        recorder.info("a");
        recorder.warning("b");
        recorder.error("c");
        recorder.success("d");

        let messages = recorder.0.lock().unwrap();
        assert_eq!(messages[0], (Severity::Info, "a".to_string()));
        assert_eq!(messages[1], (Severity::Warning, "b".to_string()));
        assert_eq!(messages[2], (Severity::Error, "c".to_string()));
        assert_eq!(messages[3], (Severity::Success, "d".to_string()));
    }

    #[test]
    fn noop_notifier_handles_all_severities() {
        let notifier = NoopNotifier;
        notifier.notify(Severity::Info, "info");
        notifier.notify(Severity::Warning, "warning");
        notifier.notify(Severity::Error, "error");
        notifier.notify(Severity::Success, "success");
    }
}
