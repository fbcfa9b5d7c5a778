//! Reference expressions found in service arguments.

use crate::config::ConfigValue;

/// Sigil marking a reference to another configured service.
pub const SERVICE_REFERENCE: char = '@';
/// Sigil marking a reference to a loadable object.
pub const OBJECT_REFERENCE: char = '^';
/// Sigil marking a reference to an environment variable.
pub const ENV_VAR_REFERENCE: char = '$';

/// A parsed argument value
///
/// Only string values can carry a sigil. Every other configuration value,
/// and every string without a leading sigil, is a literal passed through to
/// the factory unchanged.
///
/// # Examples
///
/// ```rust
/// use ferrous_provider::{ConfigValue, Reference};
///
/// let value = ConfigValue::from("@database ");
/// assert_eq!(Reference::parse(&value), Reference::Service("database"));
///
/// let value = ConfigValue::from("^app.settings.DEFAULTS");
/// assert_eq!(Reference::parse(&value), Reference::Object("app.settings.DEFAULTS"));
///
/// let value = ConfigValue::from("$DATABASE_URL");
/// assert_eq!(Reference::parse(&value), Reference::Env("DATABASE_URL"));
///
/// let value = ConfigValue::from("plain text");
/// assert_eq!(Reference::parse(&value), Reference::Literal(&value));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reference<'a> {
    /// `@name`: another configured service, whitespace trimmed
    Service(&'a str),
    /// `^path`: an object resolved through the object loader
    Object(&'a str),
    /// `$NAME`: an environment variable
    Env(&'a str),
    /// Anything else
    Literal(&'a ConfigValue),
}

impl<'a> Reference<'a> {
    /// Classifies a configuration value by its leading sigil.
    pub fn parse(value: &'a ConfigValue) -> Self {
        let Some(text) = value.as_str() else {
            return Reference::Literal(value);
        };

        if let Some(name) = text.strip_prefix(SERVICE_REFERENCE) {
            Reference::Service(name.trim())
        } else if let Some(path) = text.strip_prefix(OBJECT_REFERENCE) {
            Reference::Object(path)
        } else if let Some(var) = text.strip_prefix(ENV_VAR_REFERENCE) {
            Reference::Env(var)
        } else {
            Reference::Literal(value)
        }
    }

    /// The referenced service name, if this is a service reference.
    pub fn service_name(&self) -> Option<&'a str> {
        match self {
            Reference::Service(name) => Some(name),
            _ => None,
        }
    }
}

/// Removes surrounding double quotes, then surrounding single quotes.
pub fn strip_quotes(value: &str) -> &str {
    value.trim_matches('"').trim_matches('\'')
}
