//! Service provider module for dependency injection.
//!
//! This module contains the ServiceProvider type: the validated
//! definitions, the singleton cache and the manually set services.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::descriptors::ServiceDefinition;
use crate::environment::Environment;
use crate::graph::DependencyGraph;
use crate::loader::ObjectLoader;
use crate::observer::Observers;
use crate::traits::ResolverCore;
use crate::value::{AnyArc, Arguments};
use crate::{DiError, DiResult};

mod instantiate;

/// Service provider resolving configured services by name.
///
/// Configuration is fixed once the provider is built. Singletons are created
/// at their first request and cached for the provider's lifetime; manually
/// set services shadow configured ones for every later request.
///
/// # Thread Safety
///
/// The provider is `Send + Sync` and cheap to clone (it uses `Arc`
/// internally). Locks are never held while a factory runs, so two threads
/// requesting the same singleton for the first time may both construct it;
/// the first instance stored wins and is returned to both.
///
/// # Examples
///
/// ```
/// use ferrous_provider::{ObjectRegistry, Resolver, ServiceCollection, YamlStrSource};
/// use std::sync::Arc;
///
/// struct Clock;
///
/// let mut registry = ObjectRegistry::new();
/// registry.register_factory("app.Clock", |_| Ok(Clock));
///
/// let mut services = ServiceCollection::new();
/// services
///     .use_loader(registry)
///     .add_source(YamlStrSource::new("inline", "clock:\n  class: app.Clock\n  is_singleton: true\n"));
/// let provider = services.build().unwrap();
///
/// let a = provider.get::<Clock>("clock").unwrap();
/// let b = provider.get::<Clock>("clock").unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
///
/// // Manually set services win over configuration.
/// let fixed = provider.set("clock", Arc::new(Clock));
/// assert!(Arc::ptr_eq(&provider.get::<Clock>("clock").unwrap(), &fixed));
/// ```
pub struct ServiceProvider {
    inner: Arc<ProviderInner>,
}

pub(crate) struct ProviderInner {
    pub(crate) definitions: BTreeMap<String, ServiceDefinition>,
    pub(crate) graph: DependencyGraph,
    pub(crate) loader: Arc<dyn ObjectLoader>,
    pub(crate) environment: Arc<dyn Environment>,
    pub(crate) singletons: Mutex<HashMap<String, AnyArc>>,
    pub(crate) overrides: Mutex<HashMap<String, AnyArc>>,
    pub(crate) observers: Observers,
}

impl ServiceProvider {
    pub(crate) fn new(
        definitions: BTreeMap<String, ServiceDefinition>,
        graph: DependencyGraph,
        loader: Arc<dyn ObjectLoader>,
        environment: Arc<dyn Environment>,
        observers: Observers,
    ) -> Self {
        Self {
            inner: Arc::new(ProviderInner {
                definitions,
                graph,
                loader,
                environment,
                singletons: Mutex::new(HashMap::new()),
                overrides: Mutex::new(HashMap::new()),
                observers,
            }),
        }
    }

    /// Convenience accessor for the inner provider
    #[inline]
    pub(crate) fn inner(&self) -> &ProviderInner {
        &self.inner
    }

    /// Registers a manually built instance under `name` and returns it.
    ///
    /// The name does not need to be configured. A configured service of the
    /// same name is shadowed for every later `get`.
    pub fn set<T: Any + Send + Sync>(&self, name: impl Into<String>, instance: Arc<T>) -> Arc<T> {
        self.inner()
            .overrides
            .lock()
            .insert(name.into(), instance.clone());
        instance
    }

    /// Type-erased variant of [`set`](Self::set).
    pub fn set_any(&self, name: impl Into<String>, instance: AnyArc) -> AnyArc {
        self.inner()
            .overrides
            .lock()
            .insert(name.into(), instance.clone());
        instance
    }

    /// Whether `name` has been manually set.
    pub fn is_set(&self, name: &str) -> bool {
        self.inner().overrides.lock().contains_key(name)
    }

    /// Names of all configured services, sorted. Manually set names are not included.
    pub fn list_service_names(&self) -> Vec<String> {
        self.inner().definitions.keys().cloned().collect()
    }

    /// Whether `name` is a configured service.
    pub fn contains(&self, name: &str) -> bool {
        self.inner().definitions.contains_key(name)
    }

    /// The validated definition of a configured service.
    pub fn definition(&self, name: &str) -> Option<&ServiceDefinition> {
        self.inner().definitions.get(name)
    }

    /// The dependency graph derived from the definitions.
    pub fn dependency_graph(&self) -> &DependencyGraph {
        &self.inner().graph
    }

    /// Whether the singleton `name` has already been created.
    pub fn is_singleton_cached(&self, name: &str) -> bool {
        self.inner().singletons.lock().contains_key(name)
    }

    #[cfg(feature = "diagnostics")]
    pub fn to_debug_string(&self) -> String {
        let mut s = String::new();
        s.push_str("=== Service Provider Debug ===\n");
        s.push_str("Configured Services:\n");
        for (name, def) in &self.inner().definitions {
            let deps = self
                .inner()
                .graph
                .dependencies_of(name)
                .unwrap_or_default()
                .join(", ");
            s.push_str(&format!(
                "  {} ({}) [{:?}] from {} -> [{}]\n",
                name, def.class_path, def.lifetime, def.location, deps
            ));
        }
        s.push_str("Manually Set:\n");
        let overrides = self.inner().overrides.lock();
        let mut names: Vec<_> = overrides.keys().collect();
        names.sort();
        for name in names {
            s.push_str(&format!("  {}\n", name));
        }
        s
    }
}

impl Clone for ServiceProvider {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl ResolverCore for ServiceProvider {
    fn resolve_any(&self, name: &str, extra: Arguments) -> DiResult<AnyArc> {
        let overridden = self.inner().overrides.lock().get(name).cloned();
        if let Some(instance) = overridden {
            if !self.inner().observers.is_empty() {
                self.inner().observers.override_hit(name);
            }
            return Ok(instance);
        }

        if !self.contains(name) {
            return Err(DiError::ServiceDefinitionNotFound(name.to_string()));
        }

        self.instantiate(name, extra)
    }
}
