mod common;

use common::{collection, NoParamsService, SimpleService};
use ferrous_provider::{Arguments, Resolver, ResolverCore};
use std::sync::Arc;

const FIXTURE: &str = "simple_service/test_services.yaml";

#[test]
fn test_set_service_wins_over_configuration() {
    let provider = collection(&[FIXTURE]).build().unwrap();

    let manual = provider.set("no-params-service", Arc::new(NoParamsService::new()));
    assert!(provider.is_set("no-params-service"));

    let got = provider.get::<NoParamsService>("no-params-service").unwrap();
    assert!(Arc::ptr_eq(&got, &manual));
}

#[test]
fn test_set_service_ignores_extra_arguments() {
    let provider = collection(&[FIXTURE]).build().unwrap();
    let manual = provider.set("no-params-service", Arc::new(NoParamsService::new()));

    let got = provider
        .resolve_any("no-params-service", Arguments::new().with_arg("ignored"))
        .unwrap()
        .downcast::<NoParamsService>()
        .unwrap();
    assert!(Arc::ptr_eq(&got, &manual));
}

#[test]
fn test_unconfigured_name_can_be_set() {
    let provider = collection(&[FIXTURE]).build().unwrap();
    provider.set("runtime-only", Arc::new(String::from("value")));

    assert_eq!(*provider.get::<String>("runtime-only").unwrap(), "value");
    assert!(!provider.list_service_names().contains(&"runtime-only".to_string()));
    assert!(!provider.contains("runtime-only"));
}

#[test]
fn test_later_set_replaces_earlier_one() {
    let provider = collection(&[FIXTURE]).build().unwrap();
    provider.set("value", Arc::new(1_i64));
    provider.set("value", Arc::new(2_i64));
    assert_eq!(*provider.get::<i64>("value").unwrap(), 2);
}

#[test]
fn test_overrides_are_shared_between_clones() {
    let provider = collection(&[FIXTURE]).build().unwrap();
    let clone = provider.clone();
    let manual = clone.set("no-params-service", Arc::new(NoParamsService::new()));

    let got = provider.get::<NoParamsService>("no-params-service").unwrap();
    assert!(Arc::ptr_eq(&got, &manual));
}

#[test]
fn test_nested_references_use_configured_dependency() {
    let mut services = collection(&[FIXTURE]);
    services.use_environment(ferrous_provider::MapEnvironment::new());
    let provider = services.build().unwrap();
    let manual = provider.set("no-params-service", Arc::new(NoParamsService::new()));

    let simple = provider.get::<SimpleService>("simple-service").unwrap();
    assert!(!Arc::ptr_eq(&simple.param_three, &manual));
}

#[test]
fn test_set_any_stores_erased_instance() {
    let provider = collection(&[FIXTURE]).build().unwrap();
    let erased: ferrous_provider::AnyArc = Arc::new(NoParamsService::new());

    let returned = provider.set_any("no-params-service", erased.clone());
    assert!(Arc::ptr_eq(&returned, &erased));

    let got = provider.get::<NoParamsService>("no-params-service").unwrap();
    let expected = erased.downcast::<NoParamsService>().unwrap();
    assert!(Arc::ptr_eq(&got, &expected));
}

