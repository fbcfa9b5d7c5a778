//! Object loading: resolving fully-qualified paths to factories and objects.
//!
//! The provider never reflects on types. Everything a configuration can name,
//! through a service's `class` or through a `^path` reference, is registered
//! up front in an [`ObjectLoader`], typically an [`ObjectRegistry`].

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::signature::{BoundArguments, FactoryError, Signature};
use crate::value::{AnyArc, Arguments};

/// Constructor of a configured service
///
/// Implemented for any `Fn(Arguments) -> Result<AnyArc, FactoryError>`.
pub trait ServiceFactory: Send + Sync {
    fn create(&self, args: Arguments) -> Result<AnyArc, FactoryError>;
}

impl<F> ServiceFactory for F
where
    F: Fn(Arguments) -> Result<AnyArc, FactoryError> + Send + Sync,
{
    fn create(&self, args: Arguments) -> Result<AnyArc, FactoryError> {
        (self)(args)
    }
}

/// Anything a path can resolve to
#[derive(Clone)]
pub enum Loadable {
    Factory(Arc<dyn ServiceFactory>),
    Object(AnyArc),
}

impl fmt::Debug for Loadable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Loadable::Factory(_) => f.write_str("Factory(..)"),
            Loadable::Object(_) => f.write_str("Object(..)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// Nothing is registered under the path
    NotFound,
    /// The path names an object where a factory was required
    NotConstructible,
}

/// Failure of the loading capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    pub path: String,
    pub kind: LoadErrorKind,
}

impl LoadError {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self { path: path.into(), kind: LoadErrorKind::NotFound }
    }

    pub fn not_constructible(path: impl Into<String>) -> Self {
        Self { path: path.into(), kind: LoadErrorKind::NotConstructible }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LoadErrorKind::NotFound => write!(f, "no object registered under '{}'", self.path),
            LoadErrorKind::NotConstructible => write!(f, "'{}' is not a factory", self.path),
        }
    }
}

impl std::error::Error for LoadError {}

/// Resolves a fully-qualified path to a loadable entity, or fails
pub trait ObjectLoader: Send + Sync {
    fn load(&self, path: &str) -> Result<Loadable, LoadError>;
}

/// Explicit path-to-entity registry
///
/// # Examples
///
/// ```rust
/// use ferrous_provider::{Loadable, ObjectLoader, ObjectRegistry, Signature};
/// use std::sync::Arc;
///
/// struct Greeter { greeting: String }
///
/// let mut registry = ObjectRegistry::new();
/// registry.register_object("app.DEFAULT_GREETING", Arc::new("hello".to_string()));
/// registry.register_with_signature::<Greeter, _>(
///     "app.Greeter",
///     Signature::new().required("greeting"),
///     |args| Ok(Greeter { greeting: args.string("greeting")? }),
/// );
///
/// assert!(matches!(registry.load("app.Greeter"), Ok(Loadable::Factory(_))));
/// assert!(matches!(registry.load("app.DEFAULT_GREETING"), Ok(Loadable::Object(_))));
/// assert!(registry.load("app.Missing").is_err());
/// ```
#[derive(Default, Clone)]
pub struct ObjectRegistry {
    entries: HashMap<String, Loadable>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory taking the raw argument bag.
    pub fn register_factory<T, F>(&mut self, path: impl Into<String>, factory: F) -> &mut Self
    where
        T: Any + Send + Sync,
        F: Fn(Arguments) -> Result<T, FactoryError> + Send + Sync + 'static,
    {
        let ctor = move |args: Arguments| -> Result<AnyArc, FactoryError> {
            Ok(Arc::new(factory(args)?))
        };
        self.register_constructor(path, Arc::new(ctor))
    }

    /// Registers a factory whose arguments are bound against `signature` first.
    pub fn register_with_signature<T, F>(
        &mut self,
        path: impl Into<String>,
        signature: Signature,
        factory: F,
    ) -> &mut Self
    where
        T: Any + Send + Sync,
        F: Fn(BoundArguments) -> Result<T, FactoryError> + Send + Sync + 'static,
    {
        self.register_factory(path, move |args| factory(signature.bind(args)?))
    }

    /// Registers an already type-erased constructor.
    pub fn register_constructor(
        &mut self,
        path: impl Into<String>,
        factory: Arc<dyn ServiceFactory>,
    ) -> &mut Self {
        self.entries.insert(path.into(), Loadable::Factory(factory));
        self
    }

    /// Registers a plain object for `^path` references.
    pub fn register_object<T: Any + Send + Sync>(
        &mut self,
        path: impl Into<String>,
        object: Arc<T>,
    ) -> &mut Self {
        self.entries.insert(path.into(), Loadable::Object(object));
        self
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ObjectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut paths: Vec<_> = self.entries.keys().collect();
        paths.sort();
        f.debug_struct("ObjectRegistry").field("paths", &paths).finish()
    }
}

impl ObjectLoader for ObjectRegistry {
    fn load(&self, path: &str) -> Result<Loadable, LoadError> {
        self.entries
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError::not_found(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_receives_arguments() {
        let mut registry = ObjectRegistry::new();
        registry.register_factory("pkg.Len", |args: Arguments| {
            Ok(args.positional().len())
        });

        let Ok(Loadable::Factory(factory)) = registry.load("pkg.Len") else {
            panic!("expected a factory");
        };
        let instance = factory
            .create(Arguments::new().with_arg(1).with_arg(2))
            .unwrap();
        assert_eq!(*instance.downcast::<usize>().unwrap(), 2);
    }

    #[test]
    fn test_signature_errors_propagate() {
        let mut registry = ObjectRegistry::new();
        registry.register_with_signature::<String, _>(
            "pkg.Echo",
            Signature::new().required("text"),
            |args| args.string("text"),
        );

        let Ok(Loadable::Factory(factory)) = registry.load("pkg.Echo") else {
            panic!("expected a factory");
        };
        let err = factory.create(Arguments::new()).err().unwrap();
        assert_eq!(err, FactoryError::MissingArgument("text".into()));
    }

    #[test]
    fn test_not_found() {
        let registry = ObjectRegistry::new();
        let err = registry.load("pkg.Nothing").unwrap_err();
        assert_eq!(err.kind, LoadErrorKind::NotFound);
        assert_eq!(err.to_string(), "no object registered under 'pkg.Nothing'");
    }

    #[test]
    fn test_later_registration_replaces() {
        let mut registry = ObjectRegistry::new();
        registry.register_object("pkg.X", Arc::new(1u8));
        registry.register_object("pkg.X", Arc::new(2u8));
        assert_eq!(registry.len(), 1);

        let Ok(Loadable::Object(obj)) = registry.load("pkg.X") else {
            panic!("expected an object");
        };
        assert_eq!(*obj.downcast::<u8>().unwrap(), 2);
    }
}
