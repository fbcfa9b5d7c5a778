//! Parameter binding for service factories.
//!
//! Factories receive an [`Arguments`] bag of positional and keyed values.
//! Most of them declare a [`Signature`] and let it bind the bag to named
//! parameters: positional values fill parameters in declared order, keyed
//! values bind by name, and a parameter bound twice is reported as
//! [`FactoryError::MultipleValues`]. That last case is how the provider
//! notices that caller-supplied positional values shifted onto a parameter
//! the configuration already fills by name.

use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::value::{Arguments, Value};

/// Errors reported by a factory while binding or building
#[derive(Debug, Clone, PartialEq)]
pub enum FactoryError {
    /// A parameter received both a positional and a keyed value, or two keyed values
    MultipleValues(String),
    /// A keyed value names no parameter
    UnexpectedArgument(String),
    /// A required parameter received no value
    MissingArgument(String),
    /// More positional values than parameters
    TooManyPositional { expected: usize, given: usize },
    /// A bound value has the wrong shape for the parameter
    InvalidArgument { name: String, expected: &'static str },
    /// Any other failure raised by the factory itself
    Custom(String),
}

impl FactoryError {
    pub fn custom(message: impl Into<String>) -> Self {
        FactoryError::Custom(message.into())
    }
}

impl fmt::Display for FactoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactoryError::MultipleValues(name) => {
                write!(f, "got multiple values for argument '{}'", name)
            }
            FactoryError::UnexpectedArgument(name) => {
                write!(f, "got an unexpected keyword argument '{}'", name)
            }
            FactoryError::MissingArgument(name) => {
                write!(f, "missing required argument '{}'", name)
            }
            FactoryError::TooManyPositional { expected, given } => write!(
                f,
                "takes {} positional arguments but {} were given",
                expected, given
            ),
            FactoryError::InvalidArgument { name, expected } => {
                write!(f, "argument '{}' must be {}", name, expected)
            }
            FactoryError::Custom(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for FactoryError {}

#[derive(Debug, Clone)]
struct Parameter {
    name: &'static str,
    required: bool,
}

/// Ordered parameter list of a factory
///
/// # Examples
///
/// ```rust
/// use ferrous_provider::{Arguments, FactoryError, Signature};
///
/// let signature = Signature::new()
///     .required("no_param_service")
///     .required("user_id")
///     .optional("is_admin_user");
///
/// // 44 lands on `no_param_service`, which is also passed by name.
/// let args = Arguments::new()
///     .with_arg(44)
///     .with_named("no_param_service", "svc")
///     .with_named("is_admin_user", true);
///
/// assert_eq!(
///     signature.bind(args).unwrap_err(),
///     FactoryError::MultipleValues("no_param_service".into()),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Signature {
    params: Vec<Parameter>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter that must receive a value.
    pub fn required(mut self, name: &'static str) -> Self {
        self.params.push(Parameter { name, required: true });
        self
    }

    /// Appends a parameter that may be left unbound.
    pub fn optional(mut self, name: &'static str) -> Self {
        self.params.push(Parameter { name, required: false });
        self
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Binds an argument bag to this signature.
    pub fn bind(&self, args: Arguments) -> Result<BoundArguments, FactoryError> {
        let (positional, named) = args.into_parts();

        if positional.len() > self.params.len() {
            return Err(FactoryError::TooManyPositional {
                expected: self.params.len(),
                given: positional.len(),
            });
        }

        let mut values: HashMap<&'static str, Value> = HashMap::with_capacity(self.params.len());
        for (param, value) in self.params.iter().zip(positional) {
            values.insert(param.name, value);
        }

        for (name, value) in named {
            let param = self
                .params
                .iter()
                .find(|p| p.name == name)
                .ok_or_else(|| FactoryError::UnexpectedArgument(name.clone()))?;
            if values.contains_key(param.name) {
                return Err(FactoryError::MultipleValues(name));
            }
            values.insert(param.name, value);
        }

        if let Some(missing) = self
            .params
            .iter()
            .find(|p| p.required && !values.contains_key(p.name))
        {
            return Err(FactoryError::MissingArgument(missing.name.to_string()));
        }

        Ok(BoundArguments { values })
    }
}

/// Arguments bound to parameter names
#[derive(Debug, Default)]
pub struct BoundArguments {
    values: HashMap<&'static str, Value>,
}

impl BoundArguments {
    /// The raw bound value, if the parameter received one.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Removes and returns the bound value.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    /// A bound service or object instance of type `T`.
    pub fn instance<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>, FactoryError> {
        self.required(name)?
            .downcast::<T>()
            .ok_or_else(|| FactoryError::InvalidArgument {
                name: name.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// A bound string; absent values are `None`.
    pub fn optional_string(&self, name: &str) -> Result<Option<String>, FactoryError> {
        match self.values.get(name) {
            None | Some(Value::Absent) => Ok(None),
            Some(value) => value
                .as_str()
                .map(|s| Some(s.to_string()))
                .ok_or_else(|| invalid(name, "a string")),
        }
    }

    pub fn string(&self, name: &str) -> Result<String, FactoryError> {
        self.optional_string(name)?
            .ok_or_else(|| FactoryError::MissingArgument(name.to_string()))
    }

    pub fn i64(&self, name: &str) -> Result<i64, FactoryError> {
        self.required(name)?.as_i64().ok_or_else(|| invalid(name, "an integer"))
    }

    pub fn f64(&self, name: &str) -> Result<f64, FactoryError> {
        self.required(name)?.as_f64().ok_or_else(|| invalid(name, "a number"))
    }

    pub fn bool(&self, name: &str) -> Result<bool, FactoryError> {
        self.required(name)?.as_bool().ok_or_else(|| invalid(name, "a boolean"))
    }

    /// A boolean that defaults when the parameter was left unbound.
    pub fn bool_or(&self, name: &str, default: bool) -> Result<bool, FactoryError> {
        match self.values.get(name) {
            None => Ok(default),
            Some(value) => value.as_bool().ok_or_else(|| invalid(name, "a boolean")),
        }
    }

    fn required(&self, name: &str) -> Result<&Value, FactoryError> {
        self.values
            .get(name)
            .ok_or_else(|| FactoryError::MissingArgument(name.to_string()))
    }
}

fn invalid(name: &str, expected: &'static str) -> FactoryError {
    FactoryError::InvalidArgument {
        name: name.to_string(),
        expected,
    }
}
