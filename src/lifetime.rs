//! Service lifetime definitions.

/// Service lifetimes controlling instance caching behavior
///
/// A configured service is either a singleton (`is_singleton: true`) or
/// transient (the default). Manually set services are outside this model:
/// they live as long as the provider does.
///
/// # Examples
///
/// ```rust
/// use ferrous_provider::Lifetime;
///
/// assert_eq!(Lifetime::from_singleton_flag(true), Lifetime::Singleton);
/// assert_eq!(Lifetime::from_singleton_flag(false), Lifetime::Transient);
/// assert!(Lifetime::Singleton.is_cached());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifetime {
    /// Single instance per provider, created on first request and cached forever
    ///
    /// Later requests return the cached instance without resolving the
    /// configured arguments again and without invoking the factory.
    Singleton,
    /// New instance per resolution, never cached
    #[default]
    Transient,
}

impl Lifetime {
    /// Maps the `is_singleton` configuration flag to a lifetime.
    pub fn from_singleton_flag(is_singleton: bool) -> Self {
        if is_singleton {
            Lifetime::Singleton
        } else {
            Lifetime::Transient
        }
    }

    /// Whether instances with this lifetime go into the singleton cache.
    pub fn is_cached(self) -> bool {
        matches!(self, Lifetime::Singleton)
    }
}
