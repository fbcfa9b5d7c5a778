//! Error types for the dependency injection container.

use std::fmt;

use crate::loader::LoadError;
use crate::signature::FactoryError;

/// Dependency injection errors
///
/// Every failure the container can report, from loading the configuration
/// sources through to constructing a requested service. All of them are
/// fatal at the point they are raised; the container never retries.
///
/// # Examples
///
/// ```rust
/// use ferrous_provider::{DiError, ServiceCollection, YamlStrSource, ResolverCore};
///
/// let mut services = ServiceCollection::new();
/// services.add_source(YamlStrSource::new("empty.yaml", "{}"));
/// let provider = services.build().unwrap();
///
/// match provider.resolve_any("missing", Default::default()) {
///     Err(DiError::ServiceDefinitionNotFound(name)) => assert_eq!(name, "missing"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone)]
pub enum DiError {
    /// The same service name is declared in two configuration sources
    DuplicatedServiceName {
        name: String,
        first_location: String,
        second_location: String,
    },
    /// A service definition lacks the mandatory `class` key
    MissingConfigurationKey { service: String, key: &'static str },
    /// A service definition carries keys outside the recognised set
    UnknownConfigurationKey { service: String, keys: Vec<String> },
    /// A recognised key holds a value of the wrong shape
    InvalidConfigurationValue {
        service: String,
        key: &'static str,
        expected: &'static str,
    },
    /// A dependency names a service missing from the merged namespace
    UnknownServiceName {
        service: String,
        dependency: String,
        known: Vec<String>,
    },
    /// The acyclicity proof did not converge within the round bound
    MaxDependencyDepthReached {
        max_depth: usize,
        unresolved: Vec<String>,
    },
    /// A class path or object reference could not be loaded
    ImportingObject {
        path: String,
        service: String,
        source: LoadError,
    },
    /// `get` was called for a name that is neither overridden nor configured
    ServiceDefinitionNotFound(String),
    /// Configured positional arguments and extra positional arguments collided
    ServiceArgumentsOrder { service: String, source: FactoryError },
    /// The service factory rejected its arguments or failed to build
    Construction { service: String, source: FactoryError },
    /// The instance exists but is not of the requested type
    TypeMismatch {
        service: String,
        expected: &'static str,
    },
    /// A configuration source could not be read or parsed
    ConfigSource { location: String, message: String },
}

impl fmt::Display for DiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiError::DuplicatedServiceName { name, first_location, second_location } => write!(
                f,
                "Service {} is defined twice in {} and {}",
                name, second_location, first_location
            ),
            DiError::MissingConfigurationKey { service, key } => {
                write!(f, "Missing '{}' key in service {}", key, service)
            }
            DiError::UnknownConfigurationKey { service, keys } => write!(
                f,
                "Unknown configuration keys '{}' for service {}",
                keys.join(", "),
                service
            ),
            DiError::InvalidConfigurationValue { service, key, expected } => write!(
                f,
                "Configuration key '{}' of service {} must be {}",
                key, service, expected
            ),
            DiError::UnknownServiceName { service, dependency, known } => write!(
                f,
                "Service '{}' depends on unknown service '{}'. Defined services are [{}]",
                service,
                dependency,
                known.join(", ")
            ),
            DiError::MaxDependencyDepthReached { max_depth, unresolved } => write!(
                f,
                "Dependency graph did not settle after {} rounds, circular dependency among [{}]",
                max_depth,
                unresolved.join(", ")
            ),
            DiError::ImportingObject { path, service, source } => write!(
                f,
                "Couldn't import {} for service {}: {}",
                path, service, source
            ),
            DiError::ServiceDefinitionNotFound(name) => {
                write!(f, "Service '{}' is not set in the configured services", name)
            }
            DiError::ServiceArgumentsOrder { service, source } => write!(
                f,
                "The extra arguments order is undefined for service {} when its dependencies are \
                 configured as arguments. Pass extra values as named arguments, or configure the \
                 dependencies as named_arguments ({})",
                service, source
            ),
            DiError::Construction { service, source } => {
                write!(f, "Failed to construct service {}: {}", service, source)
            }
            DiError::TypeMismatch { service, expected } => {
                write!(f, "Service {} is not of type {}", service, expected)
            }
            DiError::ConfigSource { location, message } => {
                write!(f, "Invalid configuration source {}: {}", location, message)
            }
        }
    }
}

impl std::error::Error for DiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiError::ImportingObject { source, .. } => Some(source),
            DiError::ServiceArgumentsOrder { source, .. } => Some(source),
            DiError::Construction { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type for DI operations
///
/// A convenience type alias for `Result<T, DiError>` used throughout
/// ferrous-provider.
pub type DiResult<T> = Result<T, DiError>;
