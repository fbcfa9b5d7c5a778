//! Argument resolution and instantiation of configured services.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ConfigValue;
use crate::descriptors::ServiceDefinition;
use crate::loader::{LoadError, Loadable, ServiceFactory};
use crate::reference::{strip_quotes, Reference};
use crate::signature::FactoryError;
use crate::value::{AnyArc, Arguments, Value};
use crate::{DiError, DiResult};

use super::ServiceProvider;

impl ServiceProvider {
    /// Builds (or fetches from the singleton cache) the configured service `name`.
    pub(crate) fn instantiate(&self, name: &str, extra: Arguments) -> DiResult<AnyArc> {
        let inner = self.inner();
        let definition = inner
            .definitions
            .get(name)
            .ok_or_else(|| DiError::ServiceDefinitionNotFound(name.to_string()))?;

        if definition.is_singleton() {
            let cached = inner.singletons.lock().get(name).cloned();
            if let Some(instance) = cached {
                if !inner.observers.is_empty() {
                    inner.observers.singleton_hit(name);
                }
                return Ok(instance);
            }
        }

        let observed = !inner.observers.is_empty();
        let start = observed.then(Instant::now);
        if observed {
            inner.observers.resolving(name);
        }

        match self.construct(name, definition, extra) {
            Ok(instance) => {
                if let Some(start) = start {
                    inner.observers.resolved(name, start.elapsed());
                }
                Ok(instance)
            }
            Err(err) => {
                if observed {
                    inner.observers.failed(name, &err);
                }
                Err(err)
            }
        }
    }

    fn construct(
        &self,
        name: &str,
        definition: &ServiceDefinition,
        extra: Arguments,
    ) -> DiResult<AnyArc> {
        let mut configured = Arguments::new();
        for value in &definition.arguments {
            configured.push_positional(self.resolve_value(value, name)?);
        }
        for (key, value) in &definition.named_arguments {
            configured.push_named(key.clone(), self.resolve_value(value, name)?);
        }

        let factory = self.load_factory(&definition.class_path, name)?;

        let extra_positional = extra.has_positional();
        let instance = factory
            .create(configured.chain(extra))
            .map_err(|source| match source {
                FactoryError::MultipleValues(_) if extra_positional => {
                    DiError::ServiceArgumentsOrder {
                        service: name.to_string(),
                        source,
                    }
                }
                source => DiError::Construction {
                    service: name.to_string(),
                    source,
                },
            })?;

        if definition.is_singleton() {
            let mut cache = self.inner().singletons.lock();
            return Ok(cache.entry(name.to_string()).or_insert(instance).clone());
        }

        Ok(instance)
    }

    fn load_factory(&self, path: &str, service: &str) -> DiResult<Arc<dyn ServiceFactory>> {
        let importing = |source: LoadError| DiError::ImportingObject {
            path: path.to_string(),
            service: service.to_string(),
            source,
        };

        match self.inner().loader.load(path) {
            Ok(Loadable::Factory(factory)) => Ok(factory),
            Ok(Loadable::Object(_)) => Err(importing(LoadError::not_constructible(path))),
            Err(source) => Err(importing(source)),
        }
    }

    /// Resolves one argument expression of the service `context`.
    fn resolve_value(&self, value: &ConfigValue, context: &str) -> DiResult<Value> {
        match Reference::parse(value) {
            Reference::Object(path) => match self.inner().loader.load(path) {
                Ok(Loadable::Object(object)) => Ok(Value::Instance(object)),
                Ok(Loadable::Factory(factory)) => Ok(Value::Factory(factory)),
                Err(source) => Err(DiError::ImportingObject {
                    path: path.to_string(),
                    service: context.to_string(),
                    source,
                }),
            },
            Reference::Env(var) => Ok(self
                .inner()
                .environment
                .var(var)
                .map_or(Value::Absent, |v| Value::from(strip_quotes(&v).to_string()))),
            // Manually set services only shadow top-level requests.
            Reference::Service(dependency) => {
                Ok(Value::Instance(self.instantiate(dependency, Arguments::new())?))
            }
            Reference::Literal(literal) => Ok(Value::Literal(literal.clone())),
        }
    }
}
