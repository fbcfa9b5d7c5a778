//! Validated service definitions.

use std::collections::BTreeMap;

use crate::config::ConfigValue;
use crate::lifetime::Lifetime;
use crate::reference::Reference;

/// Key naming the factory path of a service.
pub const KEY_CLASS: &str = "class";
/// Key holding the ordered positional arguments.
pub const KEY_ARGUMENTS: &str = "arguments";
/// Key holding the keyed arguments.
pub const KEY_NAMED_ARGUMENTS: &str = "named_arguments";
/// Key holding the singleton flag.
pub const KEY_IS_SINGLETON: &str = "is_singleton";

/// Every key a service definition may carry.
pub const VALID_SERVICE_KEYS: [&str; 4] =
    [KEY_CLASS, KEY_ARGUMENTS, KEY_NAMED_ARGUMENTS, KEY_IS_SINGLETON];

/// A service definition that passed schema validation
///
/// Argument values are kept in their configured form; they are resolved
/// through [`Reference`] each time the service is instantiated.
///
/// # Examples
///
/// ```rust
/// use ferrous_provider::{ServiceCollection, YamlStrSource, Lifetime};
///
/// let yaml = r#"
/// mailer:
///   class: app.Mailer
///   arguments: ["@transport", "$SMTP_HOST"]
///   named_arguments:
///     retries: 3
///   is_singleton: true
/// transport:
///   class: app.Transport
/// "#;
///
/// let mut services = ServiceCollection::new();
/// services.add_source(YamlStrSource::new("services.yaml", yaml));
/// let provider = services.build().unwrap();
///
/// let mailer = provider.definition("mailer").unwrap();
/// assert_eq!(mailer.class_path, "app.Mailer");
/// assert_eq!(mailer.lifetime, Lifetime::Singleton);
/// assert_eq!(mailer.location, "services.yaml");
/// assert_eq!(mailer.service_dependencies().collect::<Vec<_>>(), ["transport"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDefinition {
    /// Path of the factory, resolved through the object loader
    pub class_path: String,
    /// Positional argument expressions, in declared order
    pub arguments: Vec<ConfigValue>,
    /// Keyed argument expressions
    pub named_arguments: BTreeMap<String, ConfigValue>,
    /// Singleton or transient
    pub lifetime: Lifetime,
    /// Location of the source that declared this service
    pub location: String,
}

impl ServiceDefinition {
    pub fn is_singleton(&self) -> bool {
        self.lifetime == Lifetime::Singleton
    }

    /// All argument expressions: positional first, then keyed values.
    pub fn references(&self) -> impl Iterator<Item = Reference<'_>> {
        self.arguments
            .iter()
            .chain(self.named_arguments.values())
            .map(Reference::parse)
    }

    /// Names of the services this one references directly.
    pub fn service_dependencies(&self) -> impl Iterator<Item = &str> {
        self.references().filter_map(|r| r.service_name())
    }
}
