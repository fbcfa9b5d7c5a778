//! Services shared by the integration tests.
#![allow(dead_code)]

use ferrous_provider::{ConfigValue, ObjectRegistry, ServiceCollection, Signature, Value};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug)]
pub struct NoParamsService {
    pub id: usize,
}

impl NoParamsService {
    pub fn new() -> Self {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::SeqCst),
        }
    }
}

#[derive(Debug)]
pub struct SimpleService {
    pub param_one: Option<String>,
    pub param_two: Vec<String>,
    pub param_three: Arc<NoParamsService>,
}

#[derive(Debug)]
pub struct ExampleUserUpdaterService {
    pub no_param_service: Arc<NoParamsService>,
    pub user_id: i64,
    pub is_admin_user: bool,
}

/// Every class path the fixtures refer to.
pub fn registry() -> ObjectRegistry {
    let mut registry = ObjectRegistry::new();

    registry.register_with_signature::<NoParamsService, _>(
        "tests.NoParamsService",
        Signature::new(),
        |_| Ok(NoParamsService::new()),
    );

    registry.register_with_signature::<SimpleService, _>(
        "tests.SimpleService",
        Signature::new()
            .required("param_one")
            .required("param_two")
            .required("param_three"),
        |args| {
            let param_two = args
                .value("param_two")
                .and_then(Value::as_literal)
                .and_then(ConfigValue::as_array)
                .unwrap_or_default()
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
            Ok(SimpleService {
                param_one: args.optional_string("param_one")?,
                param_two,
                param_three: args.instance("param_three")?,
            })
        },
    );

    // `no_param_service` comes first: a positional extra argument lands on it.
    registry.register_with_signature::<ExampleUserUpdaterService, _>(
        "tests.ExampleUserUpdaterService",
        Signature::new()
            .required("no_param_service")
            .required("user_id")
            .optional("is_admin_user"),
        |args| {
            Ok(ExampleUserUpdaterService {
                no_param_service: args.instance("no_param_service")?,
                user_id: args.i64("user_id")?,
                is_admin_user: args.bool_or("is_admin_user", false)?,
            })
        },
    );

    registry.register_object("tests.DEFAULT_GREETING", Arc::new("hi there".to_string()));

    registry
}

pub fn fixture(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(relative)
}

/// A collection wired with [`registry`] and the given YAML fixtures.
pub fn collection(fixtures: &[&str]) -> ServiceCollection {
    let mut services = ServiceCollection::new();
    services.use_loader(registry());
    for relative in fixtures {
        services.add_yaml_file(fixture(relative));
    }
    services
}
