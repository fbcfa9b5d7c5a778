//! Diagnostic observers for service resolution.
//!
//! Observers are the provider's logging hook: they are told when a service
//! starts resolving, when it was built, when a cached or manually set
//! instance short-circuited construction, and when resolution failed.

use std::sync::Arc;
use std::time::Duration;

use crate::DiError;

/// Observer trait for resolution events.
///
/// Calls are made synchronously on the resolving thread; keep
/// implementations cheap.
///
/// # Examples
///
/// ```
/// use ferrous_provider::{DiObserver, ServiceCollection};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Recorder {
///     built: Mutex<Vec<String>>,
/// }
///
/// impl DiObserver for Recorder {
///     fn resolving(&self, _name: &str) {}
///
///     fn resolved(&self, name: &str, _duration: Duration) {
///         self.built.lock().unwrap().push(name.to_string());
///     }
/// }
///
/// let recorder = Arc::new(Recorder::default());
/// let mut services = ServiceCollection::new();
/// services.add_observer(recorder.clone());
/// ```
pub trait DiObserver: Send + Sync {
    /// Called before the arguments of a configured service are resolved.
    fn resolving(&self, name: &str);

    /// Called after the factory returned a new instance.
    fn resolved(&self, name: &str, duration: Duration);

    /// Called when a singleton is served from the cache.
    fn singleton_hit(&self, _name: &str) {}

    /// Called when a manually set instance is returned.
    fn override_hit(&self, _name: &str) {}

    /// Called when resolution of `name` failed.
    fn failed(&self, _name: &str, _error: &DiError) {}
}

/// Observer that writes every event to stdout/stderr.
///
/// # Examples
///
/// ```
/// use ferrous_provider::{LoggingObserver, ServiceCollection};
/// use std::sync::Arc;
///
/// let mut services = ServiceCollection::new();
/// services.add_observer(Arc::new(LoggingObserver::with_prefix("[app-di]")));
/// ```
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    /// Creates a new logging observer with default prefix.
    pub fn new() -> Self {
        Self {
            prefix: "[ferrous-provider]".to_string(),
        }
    }

    /// Creates a new logging observer with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl DiObserver for LoggingObserver {
    fn resolving(&self, name: &str) {
        println!("{} Resolving: {}", self.prefix, name);
    }

    fn resolved(&self, name: &str, duration: Duration) {
        println!("{} Resolved: {} in {:?}", self.prefix, name, duration);
    }

    fn singleton_hit(&self, name: &str) {
        println!("{} Cached singleton: {}", self.prefix, name);
    }

    fn override_hit(&self, name: &str) {
        println!("{} Manually set: {}", self.prefix, name);
    }

    fn failed(&self, name: &str, error: &DiError) {
        eprintln!("{} FAILED {}: {}", self.prefix, name, error);
    }
}

/// Fan-out over the registered observers.
#[derive(Clone, Default)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn DiObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn DiObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub(crate) fn resolving(&self, name: &str) {
        for observer in &self.observers {
            observer.resolving(name);
        }
    }

    pub(crate) fn resolved(&self, name: &str, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(name, duration);
        }
    }

    pub(crate) fn singleton_hit(&self, name: &str) {
        for observer in &self.observers {
            observer.singleton_hit(name);
        }
    }

    pub(crate) fn override_hit(&self, name: &str) {
        for observer in &self.observers {
            observer.override_hit(name);
        }
    }

    pub(crate) fn failed(&self, name: &str, error: &DiError) {
        for observer in &self.observers {
            observer.failed(name, error);
        }
    }
}
