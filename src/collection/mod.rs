//! Service collection module for dependency injection.
//!
//! This module contains the ServiceCollection type: it gathers the
//! configuration sources and collaborators, then loads, merges, validates
//! and cycle-checks the definitions to build a [`ServiceProvider`].

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{DefinitionSource, JsonFileSource, YamlFileSource};
use crate::environment::{Environment, ProcessEnvironment};
use crate::graph::DependencyGraph;
use crate::loader::{ObjectLoader, ObjectRegistry};
use crate::observer::Observers;
use crate::validation::{validate_all, LocatedDefinition};
use crate::{DiError, DiObserver, DiResult, ServiceProvider};

/// Builder for a [`ServiceProvider`]
///
/// # Examples
///
/// ```rust
/// use ferrous_provider::{
///     MapEnvironment, ObjectRegistry, Resolver, ServiceCollection, Signature, YamlStrSource,
/// };
/// use std::sync::Arc;
///
/// struct Database { url: String }
/// struct UserService { db: Arc<Database> }
///
/// let mut registry = ObjectRegistry::new();
/// registry.register_with_signature::<Database, _>(
///     "app.Database",
///     Signature::new().required("url"),
///     |args| Ok(Database { url: args.string("url")? }),
/// );
/// registry.register_with_signature::<UserService, _>(
///     "app.UserService",
///     Signature::new().required("db"),
///     |args| Ok(UserService { db: args.instance("db")? }),
/// );
///
/// let yaml = r#"
/// database:
///   class: app.Database
///   arguments: ["$DATABASE_URL"]
///   is_singleton: true
/// users:
///   class: app.UserService
///   named_arguments:
///     db: "@database"
/// "#;
///
/// let mut services = ServiceCollection::new();
/// services
///     .add_source(YamlStrSource::new("services.yaml", yaml))
///     .use_loader(registry)
///     .use_environment(MapEnvironment::new().with_var("DATABASE_URL", "postgres://localhost"));
///
/// let provider = services.build().unwrap();
/// let users = provider.get::<UserService>("users").unwrap();
/// assert_eq!(users.db.url, "postgres://localhost");
/// ```
pub struct ServiceCollection {
    sources: Vec<Box<dyn DefinitionSource>>,
    loader: Arc<dyn ObjectLoader>,
    environment: Arc<dyn Environment>,
    observers: Observers,
}

impl ServiceCollection {
    /// Creates a collection with no sources, an empty object registry and
    /// the process environment.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            loader: Arc::new(ObjectRegistry::new()),
            environment: Arc::new(ProcessEnvironment),
            observers: Observers::new(),
        }
    }

    // ----- Sources -----

    /// Adds a configuration source.
    ///
    /// Sources sharing a location are loaded once.
    pub fn add_source<S: DefinitionSource + 'static>(&mut self, source: S) -> &mut Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Adds every source of an iterator.
    pub fn add_sources<I, S>(&mut self, sources: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: DefinitionSource + 'static,
    {
        for source in sources {
            self.add_source(source);
        }
        self
    }

    /// Adds a YAML file source.
    pub fn add_yaml_file(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.add_source(YamlFileSource::new(path))
    }

    /// Adds a JSON file source.
    pub fn add_json_file(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.add_source(JsonFileSource::new(path))
    }

    /// Locations of the added sources, duplicates included.
    pub fn source_locations(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.location()).collect()
    }

    // ----- Collaborators -----

    /// Sets the loader resolving class paths and `^path` references.
    pub fn use_loader<L: ObjectLoader + 'static>(&mut self, loader: L) -> &mut Self {
        self.loader = Arc::new(loader);
        self
    }

    /// Sets a loader shared with other collections.
    pub fn use_shared_loader(&mut self, loader: Arc<dyn ObjectLoader>) -> &mut Self {
        self.loader = loader;
        self
    }

    /// Sets the environment queried by `$NAME` references.
    pub fn use_environment<E: Environment + 'static>(&mut self, environment: E) -> &mut Self {
        self.environment = Arc::new(environment);
        self
    }

    /// Registers a resolution observer.
    pub fn add_observer(&mut self, observer: Arc<dyn DiObserver>) -> &mut Self {
        self.observers.add(observer);
        self
    }

    /// Loads, merges, validates and cycle-checks the definitions.
    ///
    /// Fails with the first error found, in that order: duplicated names,
    /// then schema errors, then dependency graph errors.
    pub fn build(self) -> DiResult<ServiceProvider> {
        let merged = load_and_merge(&self.sources)?;
        let definitions = validate_all(merged)?;
        let graph = DependencyGraph::from_definitions(&definitions);
        graph.check_acyclic()?;

        Ok(ServiceProvider::new(
            definitions,
            graph,
            self.loader,
            self.environment,
            self.observers,
        ))
    }
}

impl Default for ServiceCollection {
    fn default() -> Self {
        Self::new()
    }
}

fn load_and_merge(
    sources: &[Box<dyn DefinitionSource>],
) -> DiResult<BTreeMap<String, LocatedDefinition>> {
    let mut seen = HashSet::new();
    let mut merged: BTreeMap<String, LocatedDefinition> = BTreeMap::new();

    for source in sources {
        let location = source.location();
        if !seen.insert(location.to_string()) {
            continue;
        }

        for (name, raw) in source.load()? {
            match merged.entry(name) {
                Entry::Occupied(existing) => {
                    return Err(DiError::DuplicatedServiceName {
                        name: existing.key().clone(),
                        first_location: existing.get().location.clone(),
                        second_location: location.to_string(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(LocatedDefinition {
                        raw,
                        location: location.to_string(),
                    });
                }
            }
        }
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::YamlStrSource;

    #[test]
    fn test_same_location_is_loaded_once() {
        let mut services = ServiceCollection::new();
        services
            .add_source(YamlStrSource::new("a.yaml", "svc:\n  class: pkg.Svc\n"))
            .add_source(YamlStrSource::new("a.yaml", "svc:\n  class: pkg.Svc\n"));
        assert_eq!(services.source_locations(), ["a.yaml", "a.yaml"]);

        let provider = services.build().unwrap();
        assert_eq!(provider.list_service_names(), ["svc"]);
    }

    #[test]
    fn test_duplicate_across_sources() {
        let mut services = ServiceCollection::new();
        services.add_sources([
            YamlStrSource::new("one.yaml", "svc:\n  class: pkg.One\n"),
            YamlStrSource::new("two.yaml", "svc:\n  class: pkg.Two\n"),
        ]);

        match services.build().err().unwrap() {
            DiError::DuplicatedServiceName { name, first_location, second_location } => {
                assert_eq!(name, "svc");
                assert_eq!(first_location, "one.yaml");
                assert_eq!(second_location, "two.yaml");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicates_reported_before_schema_errors() {
        let mut services = ServiceCollection::new();
        services
            .add_source(YamlStrSource::new("one.yaml", "bad:\n  klass: x\nsvc:\n  class: a\n"))
            .add_source(YamlStrSource::new("two.yaml", "svc:\n  class: b\n"));
        assert!(matches!(
            services.build().err().unwrap(),
            DiError::DuplicatedServiceName { .. }
        ));
    }

    #[test]
    fn test_schema_errors_reported_before_graph_errors() {
        let mut services = ServiceCollection::new();
        services.add_source(YamlStrSource::new(
            "one.yaml",
            "a:\n  class: x\n  arguments: ['@ghost']\nb:\n  klass: y\n",
        ));
        assert!(matches!(
            services.build().err().unwrap(),
            DiError::MissingConfigurationKey { .. }
        ));
    }

    #[test]
    fn test_name_repeated_within_one_source_keeps_last() {
        use crate::{Arguments, Resolver};

        let yaml = "svc:\n  class: pkg.One\nsvc:\n  class: pkg.Two\n";
        let raw = YamlStrSource::new("one.yaml", yaml).load().unwrap();
        assert_eq!(raw.len(), 1);

        let mut registry = ObjectRegistry::new();
        registry
            .register_factory("pkg.One", |_: Arguments| Ok("one"))
            .register_factory("pkg.Two", |_: Arguments| Ok("two"));

        let mut services = ServiceCollection::new();
        services
            .use_loader(registry)
            .add_source(YamlStrSource::new("one.yaml", yaml));
        let provider = services.build().unwrap();

        assert_eq!(provider.definition("svc").unwrap().class_path, "pkg.Two");
        assert_eq!(*provider.get::<&'static str>("svc").unwrap(), "two");
    }

    #[test]
    fn test_shared_loader_serves_several_providers() {
        use crate::Resolver;

        let mut registry = ObjectRegistry::new();
        registry.register_factory("pkg.Counter", |_| Ok(7_u32));
        let shared: Arc<dyn ObjectLoader> = Arc::new(registry);

        let build = |location: &str| {
            let mut services = ServiceCollection::new();
            services
                .use_shared_loader(shared.clone())
                .add_source(YamlStrSource::new(location, "svc:\n  class: pkg.Counter\n"));
            services.build().unwrap()
        };

        let first = build("a.yaml");
        let second = build("b.yaml");
        assert_eq!(*first.get::<u32>("svc").unwrap(), 7);
        assert_eq!(*second.get::<u32>("svc").unwrap(), 7);
        assert_eq!(Arc::strong_count(&shared), 3);
    }
}
