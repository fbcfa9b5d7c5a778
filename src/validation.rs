//! Schema validation of raw service definitions.
//!
//! Every service of the merged namespace is checked before anything is
//! instantiated: one bad definition anywhere keeps the whole provider from
//! being built.

use std::collections::BTreeMap;

use crate::config::{ConfigValue, RawDefinition};
use crate::descriptors::{
    ServiceDefinition, KEY_ARGUMENTS, KEY_CLASS, KEY_IS_SINGLETON, KEY_NAMED_ARGUMENTS,
    VALID_SERVICE_KEYS,
};
use crate::{DiError, DiResult, Lifetime};

/// A raw definition together with the location of the source declaring it.
#[derive(Debug, Clone)]
pub(crate) struct LocatedDefinition {
    pub(crate) raw: RawDefinition,
    pub(crate) location: String,
}

/// Validates every raw definition, in name order, failing on the first bad one.
pub(crate) fn validate_all(
    raw: BTreeMap<String, LocatedDefinition>,
) -> DiResult<BTreeMap<String, ServiceDefinition>> {
    raw.into_iter()
        .map(|(name, located)| {
            let definition = validate_definition(&name, located)?;
            Ok((name, definition))
        })
        .collect()
}

fn validate_definition(service: &str, located: LocatedDefinition) -> DiResult<ServiceDefinition> {
    let LocatedDefinition { mut raw, location } = located;

    if matches!(raw.get(KEY_CLASS), None | Some(ConfigValue::Null)) {
        return Err(DiError::MissingConfigurationKey {
            service: service.to_string(),
            key: KEY_CLASS,
        });
    }

    let unknown: Vec<String> = raw
        .keys()
        .filter(|key| !VALID_SERVICE_KEYS.contains(&key.as_str()))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(DiError::UnknownConfigurationKey {
            service: service.to_string(),
            keys: unknown,
        });
    }

    let invalid = |key: &'static str, expected: &'static str| DiError::InvalidConfigurationValue {
        service: service.to_string(),
        key,
        expected,
    };

    let class_path = match raw.remove(KEY_CLASS) {
        Some(ConfigValue::String(path)) if !path.is_empty() => path,
        _ => return Err(invalid(KEY_CLASS, "a non-empty string")),
    };

    // A key present with no value (`arguments:`) reads as null.
    let arguments = match raw.remove(KEY_ARGUMENTS) {
        None | Some(ConfigValue::Null) => Vec::new(),
        Some(ConfigValue::Array(items)) => items,
        Some(_) => return Err(invalid(KEY_ARGUMENTS, "a sequence")),
    };

    let named_arguments = match raw.remove(KEY_NAMED_ARGUMENTS) {
        None | Some(ConfigValue::Null) => BTreeMap::new(),
        Some(ConfigValue::Object(entries)) => entries,
        Some(_) => return Err(invalid(KEY_NAMED_ARGUMENTS, "a mapping")),
    };

    let is_singleton = match raw.remove(KEY_IS_SINGLETON) {
        None | Some(ConfigValue::Null) => false,
        Some(ConfigValue::Boolean(flag)) => flag,
        Some(_) => return Err(invalid(KEY_IS_SINGLETON, "a boolean")),
    };

    Ok(ServiceDefinition {
        class_path,
        arguments,
        named_arguments,
        lifetime: Lifetime::from_singleton_flag(is_singleton),
        location,
    })
}
