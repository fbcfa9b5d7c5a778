//! # ferrous-provider
//!
//! Declarative dependency injection for Rust: services are described in YAML
//! or JSON configuration, and the provider turns those descriptions into live
//! object graphs on demand.
//!
//! ## Features
//!
//! - **Configuration driven**: class path, positional and named arguments, singleton flag
//! - **Reference expressions**: `@service`, `^object.path`, `$ENV_VAR`, or a literal
//! - **Fail fast**: duplicated names, schema errors and cycles are all rejected at build time
//! - **Lazy singletons**: created on first request, cached for the provider's lifetime
//! - **Manual overrides**: `set` a ready-made instance that shadows the configuration
//! - **No reflection**: class paths resolve through an explicit [`ObjectRegistry`]
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_provider::{
//!     MapEnvironment, ObjectRegistry, Resolver, ServiceCollection, Signature, YamlStrSource,
//! };
//! use std::sync::Arc;
//!
//! struct NoParamsService;
//!
//! struct SimpleService {
//!     greeting: Option<String>,
//!     helper: Arc<NoParamsService>,
//! }
//!
//! let mut registry = ObjectRegistry::new();
//! registry.register_factory("pkg.NoParamsService", |_| Ok(NoParamsService));
//! registry.register_with_signature::<SimpleService, _>(
//!     "pkg.SimpleService",
//!     Signature::new().required("greeting").required("helper"),
//!     |args| {
//!         Ok(SimpleService {
//!             greeting: args.optional_string("greeting")?,
//!             helper: args.instance("helper")?,
//!         })
//!     },
//! );
//!
//! let yaml = r#"
//! no-params-service:
//!   class: pkg.NoParamsService
//! simple-service:
//!   class: pkg.SimpleService
//!   arguments: ["$ENVVAR", "@no-params-service"]
//! "#;
//!
//! let mut services = ServiceCollection::new();
//! services
//!     .add_source(YamlStrSource::new("services.yaml", yaml))
//!     .use_loader(registry)
//!     .use_environment(MapEnvironment::new().with_var("ENVVAR", "hello"));
//!
//! let provider = services.build().unwrap();
//! let simple = provider.get::<SimpleService>("simple-service").unwrap();
//! assert_eq!(simple.greeting.as_deref(), Some("hello"));
//! ```
//!
//! ## Service Lifetimes
//!
//! - **Singleton** (`is_singleton: true`): created once and shared
//! - **Transient** (default): created fresh on every request

// Module declarations
pub mod collection;
pub mod config;
pub mod descriptors;
pub mod environment;
pub mod error;
pub mod graph;
pub mod lifetime;
pub mod loader;
pub mod observer;
pub mod provider;
pub mod reference;
pub mod signature;
pub mod traits;
pub mod value;

mod validation;

// Re-export core types
pub use collection::ServiceCollection;
pub use config::{
    ConfigValue, DefinitionSource, JsonFileSource, RawDefinition, RawServices, YamlFileSource,
    YamlStrSource,
};
pub use descriptors::ServiceDefinition;
pub use environment::{Environment, MapEnvironment, ProcessEnvironment};
pub use error::{DiError, DiResult};
pub use graph::{DependencyGraph, MAX_DEPENDENCY_DEPTH};
pub use lifetime::Lifetime;
pub use loader::{LoadError, LoadErrorKind, Loadable, ObjectLoader, ObjectRegistry, ServiceFactory};
pub use observer::{DiObserver, LoggingObserver};
pub use provider::ServiceProvider;
pub use reference::Reference;
pub use signature::{BoundArguments, FactoryError, Signature};
pub use traits::{Resolver, ResolverCore};
pub use value::{AnyArc, Arguments, Value};
