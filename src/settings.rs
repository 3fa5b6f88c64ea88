//! Read-only view of the host's user preferences.

/// User-configurable settings consumed by the engine. Every key is optional;
/// the engine falls back to its own defaults when a key is unset or the
/// backing store is unreadable.
pub trait Settings: Send + Sync {
    /// One of the closed set of date patterns in [`crate::datefmt`].
    fn preferred_date_format(&self) -> Option<String> {
        None
    }

    /// Override for the per-feed entry cap.
    fn max_items(&self) -> Option<usize> {
        None
    }
}

/// Fixed in-memory settings, for tests and embedders without a settings store
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    pub preferred_date_format: Option<String>,
    pub max_items: Option<usize>,
}

impl Settings for StaticSettings {
    fn preferred_date_format(&self) -> Option<String> {
        self.preferred_date_format.clone()
    }

    fn max_items(&self) -> Option<usize> {
        self.max_items
    }
}
