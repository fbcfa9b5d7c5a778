mod common;

use common::{collection, registry};
use ferrous_provider::{DiError, ServiceCollection, YamlStrSource, MAX_DEPENDENCY_DEPTH};

fn build(yaml: &str) -> Result<(), DiError> {
    let mut services = ServiceCollection::new();
    services
        .use_loader(registry())
        .add_source(YamlStrSource::new("graph.yaml", yaml));
    services.build().map(|_| ())
}

#[test]
fn test_circular_dependency_is_rejected() {
    let err = collection(&["circular/circular_dependency_services.yaml"])
        .build()
        .err()
        .unwrap();

    match err {
        DiError::MaxDependencyDepthReached { max_depth, unresolved } => {
            assert_eq!(max_depth, MAX_DEPENDENCY_DEPTH);
            assert_eq!(unresolved, ["service-a", "service-b", "service-c"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_self_reference_is_rejected() {
    let err = build("loop:\n  class: tests.NoParamsService\n  arguments: ['@loop']\n").unwrap_err();
    assert!(matches!(err, DiError::MaxDependencyDepthReached { .. }));
}

#[test]
fn test_services_depending_on_a_cycle_are_unresolved_too() {
    let yaml = r#"
a:
  class: tests.NoParamsService
  arguments: ["@b"]
b:
  class: tests.NoParamsService
  arguments: ["@a"]
user:
  class: tests.NoParamsService
  named_arguments:
    dep: "@a"
independent:
  class: tests.NoParamsService
"#;
    match build(yaml).unwrap_err() {
        DiError::MaxDependencyDepthReached { unresolved, .. } => {
            assert_eq!(unresolved, ["a", "b", "user"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_dependency_names_known_services() {
    let yaml = r#"
app:
  class: tests.NoParamsService
  arguments: ["@missing"]
other:
  class: tests.NoParamsService
"#;
    let err = build(yaml).unwrap_err();
    match &err {
        DiError::UnknownServiceName { service, dependency, known } => {
            assert_eq!(service, "app");
            assert_eq!(dependency, "missing");
            assert_eq!(known, &["app", "other"]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("unknown service 'missing'"));
}

#[test]
fn test_long_acyclic_chain_is_accepted() {
    let mut yaml = String::from("s0:\n  class: tests.NoParamsService\n");
    for i in 1..40 {
        yaml.push_str(&format!(
            "s{i}:\n  class: tests.NoParamsService\n  arguments: ['@s{}']\n",
            i - 1
        ));
    }
    assert!(build(&yaml).is_ok());
}

#[test]
fn test_object_and_env_references_are_not_edges() {
    let yaml = r#"
app:
  class: tests.NoParamsService
  arguments: ["^app", "$app", "app"]
"#;
    assert!(build(yaml).is_ok());
}
