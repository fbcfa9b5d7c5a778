//! Configuration sources for service definitions.
//!
//! A source is anything that can produce a mapping from service name to a
//! raw, not yet validated definition record. Sources are identified by a
//! location string, used both to de-duplicate sources and to point at the
//! offending files when two of them declare the same service.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{DiError, DiResult};

/// Raw definition record of one service: field name to value.
pub type RawDefinition = BTreeMap<String, ConfigValue>;

/// Raw services of one source, keyed by service name.
pub type RawServices = BTreeMap<String, RawDefinition>;

/// A configuration value as it appears in a source document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<ConfigValue>),
    Object(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Returns the string slice if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is an integer value
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float, widening integers
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Float(x) => Some(*x),
            ConfigValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the boolean if this is a boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the items if this is a sequence
    pub fn as_array(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if this is a mapping
    pub fn as_object(&self) -> Option<&BTreeMap<String, ConfigValue>> {
        match self {
            ConfigValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Integer(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        ConfigValue::Integer(value.into())
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Float(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Boolean(value)
    }
}

/// Trait for service definition sources
///
/// # Examples
///
/// ```
/// use ferrous_provider::{DefinitionSource, YamlStrSource};
///
/// let source = YamlStrSource::new("inline.yaml", "greeter:\n  class: app.Greeter\n");
/// assert_eq!(source.location(), "inline.yaml");
///
/// let services = source.load().unwrap();
/// assert!(services.contains_key("greeter"));
/// ```
pub trait DefinitionSource: fmt::Debug {
    /// Identifier of the source, used for de-duplication and diagnostics.
    fn location(&self) -> &str;

    /// Parses the source into raw definitions.
    fn load(&self) -> DiResult<RawServices>;
}

fn read_file(path: &Path, location: &str) -> DiResult<String> {
    std::fs::read_to_string(path).map_err(|e| DiError::ConfigSource {
        location: location.to_string(),
        message: e.to_string(),
    })
}

fn parse_yaml(content: &str, location: &str) -> DiResult<RawServices> {
    // An empty document deserializes to null.
    let parsed: Option<RawServices> =
        serde_yaml::from_str(content).map_err(|e| DiError::ConfigSource {
            location: location.to_string(),
            message: e.to_string(),
        })?;
    Ok(parsed.unwrap_or_default())
}

/// YAML file configuration source
#[derive(Debug, Clone)]
pub struct YamlFileSource {
    path: PathBuf,
    location: String,
}

impl YamlFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let location = path.display().to_string();
        Self { path, location }
    }
}

impl DefinitionSource for YamlFileSource {
    fn location(&self) -> &str {
        &self.location
    }

    fn load(&self) -> DiResult<RawServices> {
        let content = read_file(&self.path, &self.location)?;
        parse_yaml(&content, &self.location)
    }
}

/// JSON file configuration source
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    location: String,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let location = path.display().to_string();
        Self { path, location }
    }
}

impl DefinitionSource for JsonFileSource {
    fn location(&self) -> &str {
        &self.location
    }

    fn load(&self) -> DiResult<RawServices> {
        let content = read_file(&self.path, &self.location)?;
        serde_json::from_str(&content).map_err(|e| DiError::ConfigSource {
            location: self.location.clone(),
            message: e.to_string(),
        })
    }
}

/// In-memory YAML source, named for diagnostics
#[derive(Debug, Clone)]
pub struct YamlStrSource {
    location: String,
    content: String,
}

impl YamlStrSource {
    pub fn new(location: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            content: content.into(),
        }
    }
}

impl DefinitionSource for YamlStrSource {
    fn location(&self) -> &str {
        &self.location
    }

    fn load(&self) -> DiResult<RawServices> {
        parse_yaml(&self.content, &self.location)
    }
}
