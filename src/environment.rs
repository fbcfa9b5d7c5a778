//! Environment variable providers for `$NAME` references.

use std::collections::HashMap;
use std::env;
use std::fmt;

/// Key-value store queried by `$NAME` reference expressions
///
/// Absent keys yield `None`, never an error. The process environment is the
/// default; tests usually inject a [`MapEnvironment`] instead.
pub trait Environment: Send + Sync + fmt::Debug {
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads the real process environment
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        // Non-unicode values are treated like unset ones.
        env::var(name).ok()
    }
}

/// Fixed in-memory environment
///
/// # Examples
///
/// ```
/// use ferrous_provider::{Environment, MapEnvironment};
///
/// let env = MapEnvironment::new().with_var("GREETING", "hello");
/// assert_eq!(env.var("GREETING").as_deref(), Some("hello"));
/// assert_eq!(env.var("MISSING"), None);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }
}

impl Environment for MapEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnvironment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_environment() {
        env::set_var("FERROUS_PROVIDER_UNIT_ENV", "value");
        assert_eq!(
            ProcessEnvironment.var("FERROUS_PROVIDER_UNIT_ENV").as_deref(),
            Some("value")
        );
        env::remove_var("FERROUS_PROVIDER_UNIT_ENV");
        assert_eq!(ProcessEnvironment.var("FERROUS_PROVIDER_UNIT_ENV"), None);
    }

    #[test]
    fn test_map_environment_from_iter() {
        let env: MapEnvironment = [("A", "1"), ("B", "2")].into_iter().collect();
        assert_eq!(env.var("A").as_deref(), Some("1"));
        assert_eq!(env.var("B").as_deref(), Some("2"));
        assert_eq!(env.var("C"), None);
    }
}
