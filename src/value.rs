//! Resolved argument values and the argument bag handed to factories.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::config::ConfigValue;
use crate::loader::ServiceFactory;

/// Type-erased shared instance, the currency of the container
pub type AnyArc = Arc<dyn Any + Send + Sync>;

/// A fully resolved argument value
///
/// # Examples
///
/// ```rust
/// use ferrous_provider::Value;
/// use std::sync::Arc;
///
/// struct Mailer;
///
/// let literal = Value::from("hello");
/// assert_eq!(literal.as_str(), Some("hello"));
///
/// let instance = Value::instance(Arc::new(Mailer));
/// assert!(instance.downcast::<Mailer>().is_some());
/// assert!(instance.downcast::<String>().is_none());
///
/// assert!(Value::from(None::<String>).is_absent());
/// ```
#[derive(Clone)]
pub enum Value {
    /// An unset environment variable
    Absent,
    /// A literal from the configuration, or a plain value passed by the caller
    Literal(ConfigValue),
    /// A service instance or a loaded object
    Instance(AnyArc),
    /// A loaded factory, referenced with `^` but not invoked
    Factory(Arc<dyn ServiceFactory>),
}

impl Value {
    /// Wraps a typed instance.
    pub fn instance<T: Any + Send + Sync>(instance: Arc<T>) -> Self {
        Value::Instance(instance)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn as_literal(&self) -> Option<&ConfigValue> {
        match self {
            Value::Literal(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_literal().and_then(ConfigValue::as_str)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_literal().and_then(ConfigValue::as_i64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_literal().and_then(ConfigValue::as_f64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_literal().and_then(ConfigValue::as_bool)
    }

    /// The erased instance, if this value holds one.
    pub fn as_instance(&self) -> Option<&AnyArc> {
        match self {
            Value::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    /// Downcasts an instance value to a concrete type.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.as_instance()?.clone().downcast::<T>().ok()
    }

    pub fn as_factory(&self) -> Option<&Arc<dyn ServiceFactory>> {
        match self {
            Value::Factory(factory) => Some(factory),
            _ => None,
        }
    }

    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Literal(_) => "literal",
            Value::Instance(_) => "instance",
            Value::Factory(_) => "factory",
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => f.write_str("Absent"),
            Value::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Value::Instance(_) => f.write_str("Instance(..)"),
            Value::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

impl From<ConfigValue> for Value {
    fn from(value: ConfigValue) -> Self {
        Value::Literal(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Literal(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Literal(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Literal(value.into())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Literal(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Literal(value.into())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Literal(value.into())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Absent, Into::into)
    }
}

/// Positional and keyed values for one factory call
///
/// Keyed values keep their insertion order and are not de-duplicated:
/// binding them against a [`Signature`](crate::Signature) is what reports a
/// name supplied twice.
///
/// # Examples
///
/// ```rust
/// use ferrous_provider::Arguments;
///
/// let args = Arguments::new()
///     .with_arg(44)
///     .with_named("is_admin_user", true);
///
/// assert_eq!(args.positional().len(), 1);
/// assert_eq!(args.named()[0].0, "is_admin_user");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    positional: Vec<Value>,
    named: Vec<(String, Value)>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional value.
    pub fn with_arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Appends a keyed value.
    pub fn with_named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.push((name.into(), value.into()));
        self
    }

    pub fn push_positional(&mut self, value: Value) {
        self.positional.push(value);
    }

    pub fn push_named(&mut self, name: impl Into<String>, value: Value) {
        self.named.push((name.into(), value));
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn named(&self) -> &[(String, Value)] {
        &self.named
    }

    /// First keyed value with the given name.
    pub fn get_named(&self, name: &str) -> Option<&Value> {
        self.named.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn has_positional(&self) -> bool {
        !self.positional.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    /// Appends `extra` after these arguments: positional after positional,
    /// keyed after keyed.
    pub fn chain(mut self, extra: Arguments) -> Self {
        self.positional.extend(extra.positional);
        self.named.extend(extra.named);
        self
    }

    pub fn into_parts(self) -> (Vec<Value>, Vec<(String, Value)>) {
        (self.positional, self.named)
    }
}
