//! Resolver traits for service resolution.

use std::any::type_name;
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::value::{AnyArc, Arguments};

/// Core resolver trait for object-safe service resolution.
///
/// Resolution works on service names and hands back type-erased instances.
/// Most users should use the [`Resolver`] trait instead, which downcasts to
/// the concrete type on top of this trait.
pub trait ResolverCore: Send + Sync {
    /// Resolves the named service, passing `extra` to its factory.
    ///
    /// Manually set services are returned as-is and ignore `extra`.
    ///
    /// # Returns
    ///
    /// * `Ok(AnyArc)` - The instance wrapped in `Arc<dyn Any>`
    /// * `Err(DiError)` - Not found, load failure, construction failure, ...
    fn resolve_any(&self, name: &str, extra: Arguments) -> DiResult<AnyArc>;
}

/// High-level resolver interface with generic methods for type-safe service resolution.
///
/// # Examples
///
/// ```
/// use ferrous_provider::{Arguments, ObjectRegistry, Resolver, ServiceCollection, Signature, YamlStrSource};
/// use std::sync::Arc;
///
/// struct Counter { start: i64 }
///
/// let mut registry = ObjectRegistry::new();
/// registry.register_with_signature::<Counter, _>(
///     "app.Counter",
///     Signature::new().required("start"),
///     |args| Ok(Counter { start: args.i64("start")? }),
/// );
///
/// let mut services = ServiceCollection::new();
/// services
///     .use_loader(registry)
///     .add_source(YamlStrSource::new("inline", "counter:\n  class: app.Counter\n"));
/// let provider = services.build().unwrap();
///
/// let counter = provider
///     .get_with::<Counter>("counter", Arguments::new().with_named("start", 10))
///     .unwrap();
/// assert_eq!(counter.start, 10);
/// ```
pub trait Resolver: ResolverCore {
    /// Resolves a service of concrete type `T`.
    fn get<T: 'static + Send + Sync>(&self, name: &str) -> DiResult<Arc<T>> {
        self.get_with::<T>(name, Arguments::new())
    }

    /// Resolves a service of concrete type `T`, passing extra arguments to its factory.
    fn get_with<T: 'static + Send + Sync>(&self, name: &str, extra: Arguments) -> DiResult<Arc<T>> {
        let any = self.resolve_any(name, extra)?;
        any.downcast::<T>().map_err(|_| DiError::TypeMismatch {
            service: name.to_string(),
            expected: type_name::<T>(),
        })
    }
}

impl<R: ResolverCore + ?Sized> Resolver for R {}
